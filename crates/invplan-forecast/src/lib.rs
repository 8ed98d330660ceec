//! # Demand Forecast Boundary
//!
//! 預測模型介面、基準模型、歷史回測與評分

pub mod backtest;
pub mod models;
pub mod score;

use invplan_core::{PlanningError, Result};

// Re-export 主要類型
pub use backtest::{evaluate, evaluation_start, forecast_future, historical_forecasts, Evaluation};
pub use models::{ForecastModel, NaiveDrift, NaiveMovingAverage};
pub use score::{compare_models, ForecastScore, ModelScore, ScoreDelta};

/// 預測模型
///
/// 純函式：以訓練窗口的每日數值預測接下來 `horizon` 天。
/// 模型不保存訓練狀態，可在多執行緒間共用。
pub trait Forecaster: std::fmt::Debug + Send + Sync {
    /// 模型名稱
    fn name(&self) -> String;

    /// 預測 `horizon` 個點
    fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<f64>>;
}

/// 預測前置條件：歷史非空、時界至少 1
pub(crate) fn ensure_forecastable(history: &[f64], horizon: usize) -> Result<()> {
    if history.is_empty() {
        return Err(PlanningError::Forecast("訓練資料為空".to_string()));
    }
    if horizon == 0 {
        return Err(PlanningError::Forecast("預測時界必須至少 1 天".to_string()));
    }
    Ok(())
}
