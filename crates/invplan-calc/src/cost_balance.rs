//! 成本平衡安全庫存

use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_non_negative, PlanningError, Result};

use crate::statistics::normal_cdf;
use crate::{ensure_same_unit, DemandProfile, LeadTimeProfile, PolicyResult, StockPolicy};

/// 成本平衡計算器
///
/// SS = round((μ + σ·Φ(p/(p+h)))·√L)，ROP = SS + L·μ（不捨入）。
/// 公式依原有報表保留，Φ 的引數是臨界比率本身而非其分位數。
pub struct CostBalanceCalculator;

impl CostBalanceCalculator {
    /// 臨界比率 p/(p+h)
    pub fn critical_ratio(holding_cost: f64, stockout_cost: f64) -> Result<f64> {
        let h = ensure_non_negative("持有成本 (h)", holding_cost)?;
        let p = ensure_non_negative("缺貨成本 (p)", stockout_cost)?;
        if h + p <= 0.0 {
            return Err(PlanningError::config("持有成本與缺貨成本不可同時為 0"));
        }
        Ok(p / (p + h))
    }

    pub fn calculate(
        holding_cost: f64,
        stockout_cost: f64,
        demand: &DemandProfile,
        lead_time: &LeadTimeProfile,
    ) -> Result<PolicyResult> {
        let unit = ensure_same_unit(demand.time_unit, lead_time.time_unit)?;
        let ratio = Self::critical_ratio(holding_cost, stockout_cost)?;
        let mu = ensure_non_negative("平均需求", demand.mean)?;
        let sigma = ensure_non_negative("需求標準差", demand.std_dev)?;
        let l = ensure_non_negative("平均提前期", lead_time.mean)?;

        let factor = normal_cdf(ratio)?;
        let safety_stock = round_half_even((mu + sigma * factor) * l.sqrt());
        let reorder_point = safety_stock + l * mu;

        tracing::debug!(
            "成本平衡安全庫存: h={}, p={}, Φ={:.4}, SS={}, ROP={}",
            holding_cost,
            stockout_cost,
            factor,
            safety_stock,
            reorder_point
        );

        Ok(PolicyResult::new(StockPolicy::new(safety_stock, reorder_point, unit)).with_safety_factor(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invplan_core::TimeUnit;
    use rstest::rstest;

    #[rstest]
    #[case(0.2, 0.2, 0.5)]
    #[case(0.0, 5.0, 1.0)]
    #[case(5.0, 0.0, 0.0)]
    fn test_critical_ratio(#[case] h: f64, #[case] p: f64, #[case] expected: f64) {
        assert_eq!(CostBalanceCalculator::critical_ratio(h, p).unwrap(), expected);
    }

    #[test]
    fn test_cost_balance_defaults() {
        let demand = DemandProfile::new(TimeUnit::Days, 100.0, 10.0);
        let lead_time = LeadTimeProfile::new(TimeUnit::Days, 4.0, 1.0);

        let result = CostBalanceCalculator::calculate(0.2, 0.2, &demand, &lead_time).unwrap();

        // (100 + 10 × Φ(0.5)) × 2 ≈ 213.83
        assert_eq!(result.policy.safety_stock, 214.0);
        assert_eq!(result.policy.reorder_point, 614.0);
    }

    #[test]
    fn test_cost_balance_fractional_lead_time() {
        let demand = DemandProfile::new(TimeUnit::Weeks, 50.0, 20.0);
        let lead_time = LeadTimeProfile::new(TimeUnit::Weeks, 3.0, 0.5);

        let result = CostBalanceCalculator::calculate(0.0, 1.0, &demand, &lead_time).unwrap();

        // Φ(1) ≈ 0.8413，(50 + 16.83) × √3 ≈ 115.75
        assert_eq!(result.policy.safety_stock, 116.0);
        assert_eq!(result.policy.reorder_point, 266.0);
        assert_eq!(result.policy.time_unit, TimeUnit::Weeks);
    }

    #[test]
    fn test_zero_costs_rejected() {
        let demand = DemandProfile::new(TimeUnit::Days, 100.0, 10.0);
        let lead_time = LeadTimeProfile::new(TimeUnit::Days, 4.0, 1.0);

        assert!(matches!(
            CostBalanceCalculator::calculate(0.0, 0.0, &demand, &lead_time),
            Err(PlanningError::InvalidConfig(_))
        ));
        assert!(CostBalanceCalculator::calculate(-0.1, 0.2, &demand, &lead_time).is_err());
    }
}
