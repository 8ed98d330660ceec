//! 需求統計

use invplan_core::demand::{aggregate_daily, total_quantity};
use invplan_core::rounding::{round_half_even, round_to};
use invplan_core::{DemandRecord, PlanningError, Result, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::bucketing::BucketingCalculator;
use crate::statistics::{remove_outliers_iqr, sample_std_dev};

/// 平均需求率：總需求 ÷ {365, 52, 12}，捨入至整數
///
/// 結果刻意為整數；需要小數精度的呼叫端不應使用本函式。
pub fn average_demand_rate(records: &[DemandRecord], unit: TimeUnit) -> Result<i64> {
    if records.is_empty() {
        return Err(PlanningError::insufficient("沒有需求記錄，無法計算平均需求"));
    }
    Ok(round_half_even(total_quantity(records) / unit.periods_per_year()) as i64)
}

/// 需求標準差：先以 IQR 移除原始記錄中的離群值，再按時間單位分桶，
/// 取樣本標準差並捨入至 1 位小數
pub fn stddev_demand(records: &[DemandRecord], unit: TimeUnit) -> Result<f64> {
    let filtered = remove_outliers_iqr(records, |r: &DemandRecord| r.quantity);
    let totals = BucketingCalculator::bucket_totals(&filtered, unit);

    let sd = sample_std_dev(&totals).ok_or_else(|| {
        PlanningError::insufficient(format!(
            "需求標準差至少需要兩個 {:?} 期間，實際 {} 個",
            unit,
            totals.len()
        ))
    })?;

    Ok(round_to(sd, 1))
}

/// 年度需求摘要（預設輸入值）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandSummary {
    /// 年需求總量 (D)
    pub demand_per_year: f64,
    /// 平均每日需求（總量 ÷ 365，捨入至整數）
    pub avg_daily_demand: f64,
    /// 單日最大需求（同日多筆先加總）
    pub max_daily_demand: f64,
}

/// 計算需求摘要；沒有記錄時全部為 0
pub fn demand_summary(records: &[DemandRecord]) -> DemandSummary {
    let daily = aggregate_daily(records);
    let demand_per_year: f64 = daily.values().sum();
    let max_daily_demand = daily.values().copied().reduce(f64::max).unwrap_or(0.0);

    DemandSummary {
        demand_per_year,
        avg_daily_demand: round_half_even(demand_per_year / 365.0),
        max_daily_demand,
    }
}

/// 以特定時間單位表示的需求分佈
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    /// 統計時間單位
    pub time_unit: TimeUnit,
    /// 平均需求率 (μ)
    pub mean: f64,
    /// 需求標準差 (σ)
    pub std_dev: f64,
}

impl DemandProfile {
    /// 直接指定（例如使用者覆寫的數值）
    pub fn new(time_unit: TimeUnit, mean: f64, std_dev: f64) -> Self {
        Self {
            time_unit,
            mean,
            std_dev,
        }
    }

    /// 由需求記錄計算
    pub fn from_records(records: &[DemandRecord], unit: TimeUnit) -> Result<Self> {
        Ok(Self::new(
            unit,
            average_demand_rate(records, unit)? as f64,
            stddev_demand(records, unit)?,
        ))
    }

    /// 只計算平均需求率，σ 記為 0（提前期不確定的公式用不到 σ）
    pub fn mean_only(records: &[DemandRecord], unit: TimeUnit) -> Result<Self> {
        Ok(Self::new(unit, average_demand_rate(records, unit)? as f64, 0.0))
    }
}
