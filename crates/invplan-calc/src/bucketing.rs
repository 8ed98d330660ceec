//! 時間分桶

use std::collections::BTreeMap;

use chrono::NaiveDate;
use invplan_core::calendar::{iso_week_number, month_number};
use invplan_core::{DemandRecord, TimeUnit};
use serde::{Deserialize, Serialize};

/// 分桶鍵
///
/// 週與月只取週次／月份編號，不含年度：跨年資料會落在同一個桶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeriodKey {
    Day(NaiveDate),
    /// ISO 週次
    Week(u32),
    /// 月份
    Month(u32),
}

impl PeriodKey {
    /// 依時間單位計算日期所屬的桶
    pub fn for_date(date: NaiveDate, unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Days => PeriodKey::Day(date),
            TimeUnit::Weeks => PeriodKey::Week(iso_week_number(date)),
            TimeUnit::Months => PeriodKey::Month(month_number(date)),
        }
    }
}

/// 時間分桶計算器
pub struct BucketingCalculator;

impl BucketingCalculator {
    /// 按時間單位彙總需求（加總）
    ///
    /// 每個鍵只出現一次；後續只做平均／標準差，順序不具意義。
    pub fn group_by_time_unit(records: &[DemandRecord], unit: TimeUnit) -> Vec<(PeriodKey, f64)> {
        let mut buckets: BTreeMap<PeriodKey, f64> = BTreeMap::new();
        for record in records {
            *buckets.entry(PeriodKey::for_date(record.date, unit)).or_insert(0.0) += record.quantity;
        }
        buckets.into_iter().collect()
    }

    /// 只取各桶的總量
    pub fn bucket_totals(records: &[DemandRecord], unit: TimeUnit) -> Vec<f64> {
        Self::group_by_time_unit(records, unit)
            .into_iter()
            .map(|(_, total)| total)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invplan_core::calendar;
    use rstest::rstest;

    /// 2023 全年每日需求 100
    fn flat_year() -> Vec<DemandRecord> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        calendar::date_range(start, end)
            .unwrap()
            .into_iter()
            .map(|d| DemandRecord::new("P1", d, 100.0))
            .collect()
    }

    #[rstest]
    #[case(TimeUnit::Days, 365)]
    #[case(TimeUnit::Weeks, 52)]
    #[case(TimeUnit::Months, 12)]
    fn test_group_by_time_unit_counts(#[case] unit: TimeUnit, #[case] buckets: usize) {
        let grouped = BucketingCalculator::group_by_time_unit(&flat_year(), unit);
        assert_eq!(grouped.len(), buckets);

        let total: f64 = grouped.iter().map(|(_, v)| v).sum();
        assert_eq!(total, 36_500.0);
    }

    #[test]
    fn test_weeks_merge_across_year_boundary() {
        // 2023-01-01 屬於 ISO 第 52 週，與 2023-12-25..31 同桶
        let grouped = BucketingCalculator::group_by_time_unit(&flat_year(), TimeUnit::Weeks);
        let week_52 = grouped
            .iter()
            .find(|(k, _)| *k == PeriodKey::Week(52))
            .map(|(_, v)| *v)
            .unwrap();
        assert_eq!(week_52, 800.0);
    }

    #[test]
    fn test_months_merge_across_years() {
        let records = vec![
            DemandRecord::new("P1", NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(), 10.0),
            DemandRecord::new("P1", NaiveDate::from_ymd_opt(2016, 3, 9).unwrap(), 15.0),
            DemandRecord::new("P1", NaiveDate::from_ymd_opt(2016, 4, 1).unwrap(), -5.0),
        ];

        let grouped = BucketingCalculator::group_by_time_unit(&records, TimeUnit::Months);

        assert_eq!(grouped, vec![(PeriodKey::Month(3), 25.0), (PeriodKey::Month(4), -5.0)]);
    }
}
