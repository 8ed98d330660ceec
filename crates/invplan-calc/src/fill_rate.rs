//! 滿足率（Fill Rate）安全庫存
//!
//! 以損失函數的封閉近似式估算安全係數：
//! x = μ(1-β)/σ，z = 4.85 - 0.3924·x^1.3 - 5.359·x^0.135

use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_non_negative, ensure_positive, PlanningError, Result};

use crate::{ensure_same_unit, DemandProfile, LeadTimeProfile, PolicyResult, StockPolicy};

/// 滿足率安全庫存計算器
pub struct FillRateCalculator;

impl FillRateCalculator {
    /// 目標滿足率 β 對應的安全係數
    pub fn safety_factor(target_fill_rate: f64, mean: f64, std_dev: f64) -> Result<f64> {
        if !(target_fill_rate > 0.0 && target_fill_rate < 1.0) {
            return Err(PlanningError::config(format!(
                "目標滿足率必須介於 0 與 1 之間（不含端點），實際 {}",
                target_fill_rate
            )));
        }
        let mu = ensure_non_negative("平均需求", mean)?;
        let sigma = ensure_positive("需求標準差", std_dev)?;

        let x = mu * (1.0 - target_fill_rate) / sigma;
        Ok(4.85 - 0.3924 * x.powf(1.3) - 5.359 * x.powf(0.135))
    }

    /// SS = round(z·σ·√L)，ROP = SS + L·μ（ROP 不捨入）
    pub fn calculate(
        target_fill_rate: f64,
        demand: &DemandProfile,
        lead_time: &LeadTimeProfile,
    ) -> Result<PolicyResult> {
        let unit = ensure_same_unit(demand.time_unit, lead_time.time_unit)?;
        let z = Self::safety_factor(target_fill_rate, demand.mean, demand.std_dev)?;
        let l = ensure_non_negative("平均提前期", lead_time.mean)?;

        let safety_stock = round_half_even(z * demand.std_dev * l.sqrt());
        let reorder_point = safety_stock + l * demand.mean;

        tracing::debug!(
            "滿足率安全庫存: β={}, z={:.4}, SS={}, ROP={}",
            target_fill_rate,
            z,
            safety_stock,
            reorder_point
        );

        Ok(PolicyResult::new(StockPolicy::new(safety_stock, reorder_point, unit)).with_safety_factor(z))
    }
}
