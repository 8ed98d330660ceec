//! 平均-最大法

use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_non_negative, Result, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::{PolicyResult, PolicyWarning, StockPolicy};

/// 平均-最大法輸入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageMaxInput {
    /// 最長提前期
    pub max_lead_time: f64,
    /// 平均提前期
    pub average_lead_time: f64,
    /// 每期最大銷售
    pub max_sales: f64,
    /// 每期平均銷售
    pub average_sales: f64,
}

/// 平均-最大法計算器
pub struct AverageMaxCalculator;

impl AverageMaxCalculator {
    /// SS = round(最長提前期 × 最大銷售 - 平均提前期 × 平均銷售)
    /// ROP = round(SS + 平均提前期 × 平均銷售)
    ///
    /// 負的安全庫存不截斷：表示平均情境已涵蓋尖峰風險，以警告呈現。
    pub fn calculate(input: &AverageMaxInput, time_unit: TimeUnit) -> Result<PolicyResult> {
        let max_lead_time = ensure_non_negative("最長提前期", input.max_lead_time)?;
        let average_lead_time = ensure_non_negative("平均提前期", input.average_lead_time)?;
        let max_sales = ensure_non_negative("最大銷售", input.max_sales)?;
        let average_sales = ensure_non_negative("平均銷售", input.average_sales)?;

        let lead_time_demand = average_lead_time * average_sales;
        let safety_stock = round_half_even(max_lead_time * max_sales - lead_time_demand);
        let reorder_point = round_half_even(safety_stock + lead_time_demand);

        let mut result = PolicyResult::new(StockPolicy::new(safety_stock, reorder_point, time_unit));

        if safety_stock < 0.0 {
            tracing::warn!("平均-最大法安全庫存為負: {}", safety_stock);
            result.add_warning(PolicyWarning::warning(format!(
                "安全庫存為負 ({})：平均提前期需求已高於尖峰需求",
                safety_stock
            )));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;

    #[test]
    fn test_average_max() {
        let input = AverageMaxInput {
            max_lead_time: 20.0,
            average_lead_time: 10.0,
            max_sales: 150.0,
            average_sales: 100.0,
        };

        let result = AverageMaxCalculator::calculate(&input, TimeUnit::Days).unwrap();

        // SS = 20×150 - 10×100 = 2000；ROP = 2000 + 1000 = 3000
        assert_eq!(result.policy.safety_stock, 2000.0);
        assert_eq!(result.policy.reorder_point, 3000.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_negative_safety_stock_is_preserved() {
        let input = AverageMaxInput {
            max_lead_time: 5.0,
            average_lead_time: 10.0,
            max_sales: 100.0,
            average_sales: 80.0,
        };

        let result = AverageMaxCalculator::calculate(&input, TimeUnit::Days).unwrap();

        // SS = 500 - 800 = -300，不截斷
        assert_eq!(result.policy.safety_stock, -300.0);
        assert_eq!(result.policy.reorder_point, 500.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].severity, WarningSeverity::Warning);
    }

    #[test]
    fn test_fractional_inputs() {
        let input = AverageMaxInput {
            max_lead_time: 2.5,
            average_lead_time: 1.5,
            max_sales: 11.0,
            average_sales: 7.0,
        };

        let result = AverageMaxCalculator::calculate(&input, TimeUnit::Weeks).unwrap();

        // SS = round(27.5 - 10.5) = 17；ROP = round(17 + 10.5) = round(27.5) = 28
        assert_eq!(result.policy.safety_stock, 17.0);
        assert_eq!(result.policy.reorder_point, 28.0);
        assert_eq!(result.policy.time_unit, TimeUnit::Weeks);
    }
}
