//! 常態分佈安全庫存（週期服務水準）

use invplan_core::rounding::{round_half_even, round_to};
use invplan_core::{ensure_non_negative, PlanningError, Result, UncertaintyType};

use crate::statistics::probit;
use crate::{ensure_same_unit, DemandProfile, LeadTimeProfile, PolicyResult, PolicyWarning, StockPolicy};

/// 常態分佈安全庫存計算器
pub struct NormalSafetyStockCalculator;

impl NormalSafetyStockCalculator {
    /// 服務水準對應的 Z 值 Φ⁻¹(r)，捨入至 2 位小數
    ///
    /// r 必須在開區間 (0, 1) 內。
    pub fn z_score(service_level: f64) -> Result<f64> {
        if !(service_level > 0.0 && service_level < 1.0) {
            return Err(PlanningError::config(format!(
                "週期服務水準必須介於 0 與 1 之間（不含端點），實際 {}",
                service_level
            )));
        }
        Ok(round_to(probit(service_level)?, 2))
    }

    /// 依不確定性類型計算安全庫存與再訂購點
    ///
    /// ROP = round(SS + L × μ)
    pub fn calculate(
        uncertainty: UncertaintyType,
        service_level: f64,
        demand: &DemandProfile,
        lead_time: &LeadTimeProfile,
    ) -> Result<PolicyResult> {
        let unit = ensure_same_unit(demand.time_unit, lead_time.time_unit)?;
        let z = Self::z_score(service_level)?;

        let mu = ensure_non_negative("平均需求", demand.mean)?;
        let sigma_d = ensure_non_negative("需求標準差", demand.std_dev)?;
        let l = ensure_non_negative("平均提前期", lead_time.mean)?;
        let sigma_l = ensure_non_negative("提前期標準差", lead_time.std_dev)?;

        let raw = match uncertainty {
            UncertaintyType::UncertainDemand => z * sigma_d * l.sqrt(),
            UncertaintyType::UncertainLeadTime => z * sigma_l * mu,
            UncertaintyType::IndependentCombined => {
                z * (l * sigma_d.powi(2) + (mu * sigma_l).powi(2)).sqrt()
            }
            UncertaintyType::DependentCombined => z * sigma_d * l.sqrt() + z * mu * sigma_l,
        };

        let safety_stock = round_half_even(raw);
        let reorder_point = round_half_even(safety_stock + l * mu);

        tracing::debug!(
            "常態安全庫存 {:?}: Z={}, μ={}, σd={}, L={}, σL={}, SS={}, ROP={}",
            uncertainty,
            z,
            mu,
            sigma_d,
            l,
            sigma_l,
            safety_stock,
            reorder_point
        );

        let mut result =
            PolicyResult::new(StockPolicy::new(safety_stock, reorder_point, unit)).with_safety_factor(z);

        if z < 0.0 {
            result.add_warning(PolicyWarning::warning(format!(
                "服務水準 {} 低於 50%，Z 值為負，安全庫存為 {}",
                service_level, safety_stock
            )));
        }

        Ok(result)
    }
}
