//! 安全天數法（基本再訂購點）

use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_non_negative, Result, TimeUnit};

use crate::StockPolicy;

/// 安全天數計算器
pub struct SafetyDaysCalculator;

impl SafetyDaysCalculator {
    /// SS = round(AS × N)，ROP = round(AS × L + SS)
    ///
    /// * `avg_daily_sales` - 平均每日銷售 (AS)
    /// * `lead_time_days` - 提前期天數 (L)
    /// * `safety_days` - 安全天數 (N)
    pub fn calculate(avg_daily_sales: f64, lead_time_days: f64, safety_days: f64) -> Result<StockPolicy> {
        let sales = ensure_non_negative("平均每日銷售", avg_daily_sales)?;
        let lead_time = ensure_non_negative("提前期", lead_time_days)?;
        let days = ensure_non_negative("安全天數", safety_days)?;

        let safety_stock = round_half_even(sales * days);
        let reorder_point = round_half_even(sales * lead_time + safety_stock);

        Ok(StockPolicy::new(safety_stock, reorder_point, TimeUnit::Days))
    }
}
