//! 日曆工具

use chrono::{Datelike, NaiveDate};

use crate::{PlanningError, Result};

/// 年度第一天
pub fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| PlanningError::InvalidDate(format!("無效的年度: {}", year)))
}

/// 年度最後一天
pub fn year_end(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| PlanningError::InvalidDate(format!("無效的年度: {}", year)))
}

/// 向後推算日期
pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(chrono::Days::new(days))
        .ok_or_else(|| PlanningError::InvalidDate(format!("日期溢出: {} + {} 天", date, days)))
}

/// 連續日期區間（含頭尾）
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(PlanningError::InvalidDate(format!(
            "結束日期 {} 早於開始日期 {}",
            end, start
        )));
    }

    let mut dates = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(dates)
}

/// ISO 週次（1..=53，不含年度）
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// 月份（1..=12，不含年度）
pub fn month_number(date: NaiveDate) -> u32 {
    date.month()
}
