//! 提前期統計

use invplan_core::rounding::round_to;
use invplan_core::{LeadTimeRecord, PlanningError, Result, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::statistics::{mean, sample_std_dev};

/// 提前期統計計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 換算成指定時間單位的提前期
    pub fn converted(records: &[LeadTimeRecord], unit: TimeUnit) -> Vec<f64> {
        let divisor = unit.lead_time_divisor();
        records
            .iter()
            .map(|r| r.lead_time_days as f64 / divisor)
            .collect()
    }

    /// 平均提前期，捨入至 2 位小數
    pub fn average_lead_time(records: &[LeadTimeRecord], unit: TimeUnit) -> Result<f64> {
        let avg = mean(&Self::converted(records, unit))
            .ok_or_else(|| PlanningError::insufficient("沒有提前期記錄，無法計算平均提前期"))?;
        Ok(round_to(avg, 2))
    }

    /// 提前期樣本標準差，捨入至 2 位小數
    pub fn stddev_lead_time(records: &[LeadTimeRecord], unit: TimeUnit) -> Result<f64> {
        let sd = sample_std_dev(&Self::converted(records, unit)).ok_or_else(|| {
            PlanningError::insufficient(format!(
                "提前期標準差至少需要兩筆記錄，實際 {} 筆",
                records.len()
            ))
        })?;
        Ok(round_to(sd, 2))
    }

    /// 最長提前期（天）
    pub fn max_lead_time_days(records: &[LeadTimeRecord]) -> Option<i64> {
        records.iter().map(|r| r.lead_time_days).max()
    }
}

/// 以特定時間單位表示的提前期分佈
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeProfile {
    /// 統計時間單位
    pub time_unit: TimeUnit,
    /// 平均提前期 (L)
    pub mean: f64,
    /// 提前期標準差 (σL)
    pub std_dev: f64,
}

impl LeadTimeProfile {
    /// 直接指定
    pub fn new(time_unit: TimeUnit, mean: f64, std_dev: f64) -> Self {
        Self {
            time_unit,
            mean,
            std_dev,
        }
    }

    /// 由提前期記錄計算
    pub fn from_records(records: &[LeadTimeRecord], unit: TimeUnit) -> Result<Self> {
        Ok(Self::new(
            unit,
            LeadTimeCalculator::average_lead_time(records, unit)?,
            LeadTimeCalculator::stddev_lead_time(records, unit)?,
        ))
    }

    /// 只計算平均提前期，σL 記為 0
    ///
    /// 公式不使用 σL 時用這個，單筆記錄也能計算。
    pub fn mean_only(records: &[LeadTimeRecord], unit: TimeUnit) -> Result<Self> {
        Ok(Self::new(unit, LeadTimeCalculator::average_lead_time(records, unit)?, 0.0))
    }
}
