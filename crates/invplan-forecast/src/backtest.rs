//! 擴張窗口歷史回測與未來預測

use invplan_core::{calendar, DailySeries, PlanningError, Result};
use serde::{Deserialize, Serialize};

use crate::score::ForecastScore;
use crate::Forecaster;

/// 讓最後一個預測點落在第 `history_days` 個索引（即次年第一天）的起始切點
///
/// 例：365 天歷史、時界 7 → 359。
pub fn evaluation_start(history_days: usize, horizon: usize) -> Result<usize> {
    if horizon == 0 || horizon > history_days + 1 {
        return Err(PlanningError::Forecast(format!(
            "預測時界 {} 不適用於 {} 天的歷史",
            horizon, history_days
        )));
    }
    Ok(history_days + 1 - horizon)
}

/// 擴張窗口歷史預測
///
/// 從 `start` 起每個切點 t：以 `series[..t]` 訓練、預測 `horizon` 點，
/// 只保留最後一點（日期為 t + horizon - 1）。
pub fn historical_forecasts(
    model: &dyn Forecaster,
    series: &DailySeries,
    horizon: usize,
    start: usize,
) -> Result<DailySeries> {
    if horizon == 0 {
        return Err(PlanningError::Forecast("預測時界必須至少 1 天".to_string()));
    }
    if start == 0 || start + horizon > series.len() {
        return Err(PlanningError::Forecast(format!(
            "起始切點 {} 與時界 {} 超出序列長度 {}",
            start,
            horizon,
            series.len()
        )));
    }

    let values = series.values();
    let mut predicted = Vec::with_capacity(values.len() + 1 - start - horizon);

    for cutoff in start..=values.len() - horizon {
        let segment = model.forecast(&values[..cutoff], horizon)?;
        let last = segment
            .last()
            .copied()
            .ok_or_else(|| PlanningError::Forecast(format!("{} 未產生預測值", model.name())))?;
        predicted.push(last);
    }

    let first_date = series.points()[start + horizon - 1].date;
    tracing::debug!(
        "{} 歷史回測：{} 個預測點，自 {}",
        model.name(),
        predicted.len(),
        first_date
    );

    DailySeries::from_values(first_date, &predicted)
}

/// 預測序列結束後的 `horizon` 天
pub fn forecast_future(model: &dyn Forecaster, series: &DailySeries, horizon: usize) -> Result<DailySeries> {
    let last_date = series
        .last_date()
        .ok_or_else(|| PlanningError::Forecast("訓練資料為空".to_string()))?;
    let values = model.forecast(&series.values(), horizon)?;
    DailySeries::from_values(calendar::add_days(last_date, 1)?, &values)
}

/// 單一模型的回測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 模型名稱
    pub model: String,
    /// 回測預測值
    pub predicted: DailySeries,
    /// 同期實際值
    pub actual: DailySeries,
    /// 評分
    pub score: ForecastScore,
}

/// 回測並評分
pub fn evaluate(model: &dyn Forecaster, series: &DailySeries, horizon: usize, start: usize) -> Result<Evaluation> {
    let predicted = historical_forecasts(model, series, horizon, start)?;

    let offset = start + horizon - 1;
    let actual_values: Vec<f64> = series.values()[offset..].to_vec();
    let actual = DailySeries::from_values(series.points()[offset].date, &actual_values)?;
    let score = ForecastScore::compute(&predicted.values(), &actual_values)?;

    Ok(Evaluation {
        model: model.name(),
        predicted,
        actual,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NaiveDrift, NaiveMovingAverage};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn linear(len: usize) -> DailySeries {
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        DailySeries::from_values(date(2023, 1, 1), &values).unwrap()
    }

    #[test]
    fn test_evaluation_start() {
        assert_eq!(evaluation_start(365, 1).unwrap(), 365);
        assert_eq!(evaluation_start(365, 7).unwrap(), 359);
        assert_eq!(evaluation_start(365, 30).unwrap(), 336);
        assert!(evaluation_start(365, 0).is_err());
        assert!(evaluation_start(5, 7).is_err());
    }

    #[test]
    fn test_historical_forecasts_keep_last_point() {
        let series = linear(10);

        let predicted = historical_forecasts(&NaiveDrift, &series, 3, 4).unwrap();

        // 切點 4..=7，每個預測最後一點日期為 t + 2
        assert_eq!(predicted.len(), 4);
        assert_eq!(predicted.first_date(), Some(date(2023, 1, 7)));
        assert_eq!(predicted.last_date(), Some(date(2023, 1, 10)));
        // 線性序列上趨勢外推完全準確
        assert_eq!(predicted.values(), vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_historical_forecasts_bounds() {
        let series = linear(10);
        assert!(historical_forecasts(&NaiveDrift, &series, 3, 8).is_err());
        assert!(historical_forecasts(&NaiveDrift, &series, 3, 0).is_err());
        assert!(historical_forecasts(&NaiveDrift, &series, 0, 4).is_err());
        assert_eq!(historical_forecasts(&NaiveDrift, &series, 3, 7).unwrap().len(), 1);
    }

    #[test]
    fn test_two_year_evaluation_targets_second_year() {
        let values: Vec<f64> = (0..730).map(|i| 100.0 + (i % 7) as f64).collect();
        let series = DailySeries::from_values(date(2022, 1, 1), &values).unwrap();
        let start = evaluation_start(365, 7).unwrap();

        let evaluation = evaluate(&NaiveMovingAverage::default(), &series, 7, start).unwrap();

        assert_eq!(evaluation.predicted.first_date(), Some(date(2023, 1, 1)));
        assert_eq!(evaluation.predicted.len(), 365);
        assert_eq!(evaluation.actual.len(), evaluation.predicted.len());
        assert_eq!(evaluation.actual.first_date(), evaluation.predicted.first_date());
        assert_eq!(evaluation.model, "Moving Average (3)");
    }

    #[test]
    fn test_forecast_future_dates_follow_series() {
        let series = linear(5);

        let future = forecast_future(&NaiveDrift, &series, 7).unwrap();

        assert_eq!(future.len(), 7);
        assert_eq!(future.first_date(), Some(date(2023, 1, 6)));
        assert_eq!(future.values()[0], 5.0);

        assert!(forecast_future(&NaiveDrift, &DailySeries::default(), 7).is_err());
    }
}
