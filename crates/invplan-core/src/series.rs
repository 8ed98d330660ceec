//! 連續每日序列
//!
//! 模擬與預測使用的每日需求序列：缺漏日期補 0，負值截斷為 0。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::demand::{aggregate_daily, DemandRecord};
use crate::Result;

/// 單日數值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// 連續每日序列（日期遞增、無缺漏）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    points: Vec<DailyPoint>,
}

impl DailySeries {
    /// 由需求記錄建立 `[start, end]` 區間的連續序列
    pub fn from_records(records: &[DemandRecord], start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let daily = aggregate_daily(records);
        let points = calendar::date_range(start, end)?
            .into_iter()
            .map(|date| DailyPoint {
                date,
                value: daily.get(&date).copied().unwrap_or(0.0).max(0.0),
            })
            .collect();

        Ok(Self { points })
    }

    /// 整個日曆年度的連續序列
    pub fn for_year(records: &[DemandRecord], year: i32) -> Result<Self> {
        Self::from_records(records, calendar::year_start(year)?, calendar::year_end(year)?)
    }

    /// 從起始日期開始、逐日排列的數值建立序列（例如預測輸出）
    ///
    /// 數值原樣保留，不做截斷。
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Result<Self> {
        let mut points = Vec::with_capacity(values.len());
        for (offset, &value) in values.iter().enumerate() {
            points.push(DailyPoint {
                date: calendar::add_days(start, offset as u64)?,
                value,
            });
        }
        Ok(Self { points })
    }

    /// 所有資料點
    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    /// 數值序列
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// 總量
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_for_year_fills_gaps_and_clips_negatives() {
        let records = vec![
            DemandRecord::new("P1", date(2023, 1, 2), 10.0),
            DemandRecord::new("P1", date(2023, 1, 2), 5.0),
            DemandRecord::new("P1", date(2023, 1, 3), -8.0),
            DemandRecord::new("P1", date(2022, 12, 31), 99.0),
        ];

        let series = DailySeries::for_year(&records, 2023).unwrap();

        assert_eq!(series.len(), 365);
        assert_eq!(series.first_date(), Some(date(2023, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2023, 12, 31)));
        assert_eq!(series.points()[0].value, 0.0);
        assert_eq!(series.points()[1].value, 15.0);
        // 負值只在建立連續序列時截斷
        assert_eq!(series.points()[2].value, 0.0);
        assert_eq!(series.total(), 15.0);
    }

    #[test]
    fn test_leap_year_length() {
        let series = DailySeries::for_year(&[], 2024).unwrap();
        assert_eq!(series.len(), 366);
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn test_from_values_dates_consecutive() {
        let series = DailySeries::from_values(date(2023, 12, 30), &[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.last_date(), Some(date(2024, 1, 1)));
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
    }
}
