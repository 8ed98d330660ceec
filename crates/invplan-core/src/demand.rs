//! 需求模型

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PlanningError, Result};

/// 需求記錄
///
/// 數量可以是負數（退貨、沖銷），統計時不做截斷。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    /// 需求日期
    pub date: NaiveDate,

    /// 需求數量
    pub quantity: f64,

    /// 物料代碼
    pub product_code: String,
}

impl DemandRecord {
    /// 創建新的需求記錄
    pub fn new(product_code: impl Into<String>, date: NaiveDate, quantity: f64) -> Self {
        Self {
            date,
            quantity,
            product_code: product_code.into(),
        }
    }

    /// 從原始文字數量建立（支援會計括號負數，如 `(120)`）
    pub fn parse(product_code: impl Into<String>, date: NaiveDate, raw_quantity: &str) -> Result<Self> {
        Ok(Self::new(product_code, date, parse_quantity(raw_quantity)?))
    }
}

/// 解析需求數量文字
///
/// `"(120)"` 表示 `-120`；其餘按一般數字解析。
pub fn parse_quantity(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let value: f64 = digits
        .parse()
        .map_err(|_| PlanningError::InvalidQuantity(raw.to_string()))?;

    if !value.is_finite() || (negative && value < 0.0) {
        return Err(PlanningError::InvalidQuantity(raw.to_string()));
    }

    Ok(if negative { -value } else { value })
}

/// 篩選指定物料的需求
pub fn filter_product(records: &[DemandRecord], product_code: &str) -> Vec<DemandRecord> {
    records
        .iter()
        .filter(|r| r.product_code == product_code)
        .cloned()
        .collect()
}

/// 篩選指定年度的需求
pub fn filter_year(records: &[DemandRecord], year: i32) -> Vec<DemandRecord> {
    records
        .iter()
        .filter(|r| r.date.year() == year)
        .cloned()
        .collect()
}

/// 需求資料中出現的年度（遞增）
pub fn years(records: &[DemandRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.date.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// 按日期彙總需求（同日多筆相加）
pub fn aggregate_daily(records: &[DemandRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut daily = BTreeMap::new();
    for record in records {
        *daily.entry(record.date).or_insert(0.0) += record.quantity;
    }
    daily
}

/// 需求總量
pub fn total_quantity(records: &[DemandRecord]) -> f64 {
    records.iter().map(|r| r.quantity).sum()
}
