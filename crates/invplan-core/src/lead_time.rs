//! 提前期記錄模型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PlanningError, Result};

/// 供應商提前期記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimeRecord {
    /// 物料代碼
    pub product_code: String,

    /// 下單日期
    pub ordered_date: NaiveDate,

    /// 到貨日期
    pub received_date: NaiveDate,

    /// 提前期（天）= 到貨日期 - 下單日期
    pub lead_time_days: i64,
}

impl LeadTimeRecord {
    /// 創建新的提前期記錄
    ///
    /// 到貨日期早於下單日期時回傳 [`PlanningError::InvalidDate`]。
    pub fn new(
        product_code: impl Into<String>,
        ordered_date: NaiveDate,
        received_date: NaiveDate,
    ) -> Result<Self> {
        if received_date < ordered_date {
            return Err(PlanningError::InvalidDate(format!(
                "到貨日期 {} 早於下單日期 {}",
                received_date, ordered_date
            )));
        }

        Ok(Self {
            product_code: product_code.into(),
            ordered_date,
            received_date,
            lead_time_days: (received_date - ordered_date).num_days(),
        })
    }
}

/// 篩選指定物料、且到貨日期落在指定年度的記錄
pub fn filter_for(records: &[LeadTimeRecord], product_code: &str, year: i32) -> Vec<LeadTimeRecord> {
    records
        .iter()
        .filter(|r| r.product_code == product_code && r.received_date.year() == year)
        .cloned()
        .collect()
}
