//! 基準預測模型

use invplan_core::{PlanningError, Result};
use serde::{Deserialize, Serialize};

use crate::{ensure_forecastable, Forecaster};

/// 移動平均預設窗口
pub const DEFAULT_WINDOW: usize = 3;

/// 趨勢外推：最後一點加上平均每期變化
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaiveDrift;

impl Forecaster for NaiveDrift {
    fn name(&self) -> String {
        "Naive Drift".to_string()
    }

    fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<f64>> {
        ensure_forecastable(history, horizon)?;

        let (first, last) = match (history.first(), history.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(PlanningError::Forecast("訓練資料為空".to_string())),
        };
        let slope = if history.len() > 1 {
            (last - first) / (history.len() - 1) as f64
        } else {
            0.0
        };

        Ok((1..=horizon).map(|step| last + slope * step as f64).collect())
    }
}

/// 移動平均：每一步取最近 `window` 個值（含先前預測值）的平均
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaiveMovingAverage {
    window: usize,
}

impl NaiveMovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(PlanningError::config("移動平均窗口必須至少 1"));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for NaiveMovingAverage {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl Forecaster for NaiveMovingAverage {
    fn name(&self) -> String {
        format!("Moving Average ({})", self.window)
    }

    fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<f64>> {
        ensure_forecastable(history, horizon)?;
        if history.len() < self.window {
            return Err(PlanningError::Forecast(format!(
                "移動平均需要至少 {} 個訓練點，實際 {} 個",
                self.window,
                history.len()
            )));
        }

        let mut buffer: Vec<f64> = history[history.len() - self.window..].to_vec();
        let mut predictions = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let next = buffer[buffer.len() - self.window..].iter().sum::<f64>() / self.window as f64;
            buffer.push(next);
            predictions.push(next);
        }

        Ok(predictions)
    }
}

/// 可序列化的模型選擇
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ForecastModel {
    /// 基準模型
    #[default]
    NaiveDrift,
    MovingAverage { window: usize },
}

impl ForecastModel {
    /// 建立對應的預測模型
    pub fn build(self) -> Result<Box<dyn Forecaster>> {
        Ok(match self {
            ForecastModel::NaiveDrift => Box::new(NaiveDrift),
            ForecastModel::MovingAverage { window } => Box::new(NaiveMovingAverage::new(window)?),
        })
    }
}
