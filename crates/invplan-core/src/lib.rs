//! # Inventory Planning Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod config;
pub mod demand;
pub mod lead_time;
pub mod rounding;
pub mod series;

// Re-export 主要類型
pub use config::{ForecastHorizon, PlanningConfig, TimeUnit, UncertaintyType};
pub use demand::{parse_quantity, DemandRecord};
pub use lead_time::LeadTimeRecord;
pub use series::{DailyPoint, DailySeries};

/// 庫存規劃錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("配置錯誤: {0}")]
    InvalidConfig(String),

    #[error("資料不足: {0}")]
    InsufficientData(String),

    #[error("時間單位不一致：預期 {expected:?}，實際 {found:?}")]
    UnitMismatch { expected: TimeUnit, found: TimeUnit },

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),

    #[error("預測錯誤: {0}")]
    Forecast(String),
}

pub type Result<T> = std::result::Result<T, PlanningError>;

impl PlanningError {
    /// 配置錯誤的便捷建構
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// 資料不足的便捷建構
    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }
}

/// 檢查參數為有限數值
pub fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlanningError::config(format!("{} 必須為有限數值，實際為 {}", name, value)))
    }
}

/// 檢查參數為非負有限數值
pub fn ensure_non_negative(name: &str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(PlanningError::config(format!("{} 不可為負數，實際為 {}", name, value)));
    }
    Ok(value)
}

/// 檢查參數為正的有限數值
pub fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(PlanningError::config(format!("{} 必須大於 0，實際為 {}", name, value)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_guards() {
        assert_eq!(ensure_positive("H", 0.2), Ok(0.2));
        assert!(matches!(ensure_positive("H", 0.0), Err(PlanningError::InvalidConfig(_))));
        assert!(ensure_non_negative("K", 0.0).is_ok());
        assert!(ensure_non_negative("K", -1.0).is_err());
        assert!(ensure_finite("D", f64::NAN).is_err());
        assert!(ensure_finite("D", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = PlanningError::UnitMismatch {
            expected: TimeUnit::Days,
            found: TimeUnit::Weeks,
        };
        assert!(err.to_string().contains("Weeks"));
        assert!(PlanningError::config("H = 0").to_string().starts_with("配置錯誤"));
    }
}
