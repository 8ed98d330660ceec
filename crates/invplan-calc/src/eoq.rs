//! 經濟訂購量（EOQ）

use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_non_negative, ensure_positive, Result};
use serde::{Deserialize, Serialize};

/// EOQ 計算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicOrderQuantity {
    /// 未捨入的 EOQ = sqrt(2DK/H)
    pub raw: f64,
    /// 捨入至最接近的批量倍數
    pub rounded: f64,
    /// 使用的批量大小
    pub lot_size: f64,
}

/// EOQ 計算器
pub struct EoqCalculator;

impl EoqCalculator {
    /// 經濟訂購量（Wilson 公式）
    ///
    /// EOQ = sqrt(2 * 年需求量 D * 訂購成本 K / 持有成本 H)，
    /// 再捨入為 `round(EOQ / lot_size) * lot_size`。
    ///
    /// H ≤ 0 或批量 ≤ 0 屬於配置錯誤，不會產生 NaN / ∞。
    pub fn calculate(
        annual_demand: f64,
        order_cost: f64,
        holding_cost: f64,
        lot_size: f64,
    ) -> Result<EconomicOrderQuantity> {
        let d = ensure_non_negative("年需求量 (D)", annual_demand)?;
        let k = ensure_non_negative("訂購成本 (K)", order_cost)?;
        let h = ensure_positive("持有成本 (H)", holding_cost)?;
        let lot_size = ensure_positive("批量大小", lot_size)?;

        let raw = (2.0 * d * k / h).sqrt();
        let rounded = round_half_even(raw / lot_size) * lot_size;

        tracing::debug!("EOQ: D={}, K={}, H={}, 原始值={:.2}, 批量捨入={}", d, k, h, raw, rounded);

        Ok(EconomicOrderQuantity {
            raw,
            rounded,
            lot_size,
        })
    }
}
