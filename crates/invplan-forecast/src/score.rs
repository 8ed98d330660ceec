//! 預測評分與模型比較

use invplan_core::rounding::round_half_even;
use invplan_core::{DailySeries, PlanningError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::backtest::evaluate;
use crate::Forecaster;

/// 預測評分（皆捨入為整數）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastScore {
    /// 平均誤差（預測 - 實際）
    pub bias: i64,
    /// 平均絕對誤差
    pub mae: i64,
    /// 平均絕對百分比誤差（%），只計實際值非 0 的點；全為 0 時為 `None`
    pub mape: Option<i64>,
}

impl ForecastScore {
    pub fn compute(predicted: &[f64], actual: &[f64]) -> Result<Self> {
        if predicted.len() != actual.len() {
            return Err(PlanningError::Forecast(format!(
                "預測與實際長度不一致：{} 對 {}",
                predicted.len(),
                actual.len()
            )));
        }
        if actual.is_empty() {
            return Err(PlanningError::insufficient("沒有可評分的預測點"));
        }

        let n = actual.len() as f64;
        let errors: Vec<f64> = predicted.iter().zip(actual).map(|(p, a)| p - a).collect();
        let bias = errors.iter().sum::<f64>() / n;
        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

        let percentage: Vec<f64> = errors
            .iter()
            .zip(actual)
            .filter(|(_, a)| **a != 0.0)
            .map(|(e, a)| (e / a).abs())
            .collect();
        let mape = if percentage.is_empty() {
            None
        } else {
            let mean = percentage.iter().sum::<f64>() / percentage.len() as f64;
            Some(round_half_even(mean * 100.0) as i64)
        };

        Ok(Self {
            bias: round_half_even(bias) as i64,
            mae: round_half_even(mae) as i64,
            mape,
        })
    }

    /// 相對基準的變化比例 (本模型 - 基準) / 基準
    pub fn relative_to(&self, baseline: &ForecastScore) -> ScoreDelta {
        let ratio = |value: i64, base: i64| {
            (base != 0).then(|| (value - base) as f64 / base as f64)
        };
        ScoreDelta {
            mae: ratio(self.mae, baseline.mae),
            mape: match (self.mape, baseline.mape) {
                (Some(value), Some(base)) => ratio(value, base),
                _ => None,
            },
        }
    }
}

/// 相對基準模型的變化（負值代表較佳）；基準為 0 時為 `None`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub mae: Option<f64>,
    pub mape: Option<f64>,
}

/// 單一模型的比較結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub model: String,
    pub score: ForecastScore,
    /// 相對基準的變化；基準本身為 `None`
    pub delta: Option<ScoreDelta>,
}

/// 在同一序列上回測基準與候選模型並比較
///
/// 候選模型彼此獨立，並行評估。結果第一筆為基準。
pub fn compare_models(
    baseline: &dyn Forecaster,
    candidates: &[Box<dyn Forecaster>],
    series: &DailySeries,
    horizon: usize,
    start: usize,
) -> Result<Vec<ModelScore>> {
    tracing::info!(
        "開始模型比較：基準 {}，候選 {} 個，時界 {} 天",
        baseline.name(),
        candidates.len(),
        horizon
    );
    let start_time = std::time::Instant::now();

    let base = evaluate(baseline, series, horizon, start)?.score;

    let evaluations = candidates
        .par_iter()
        .map(|model| evaluate(model.as_ref(), series, horizon, start))
        .collect::<Result<Vec<_>>>()?;

    let mut scores = Vec::with_capacity(candidates.len() + 1);
    scores.push(ModelScore {
        model: baseline.name(),
        score: base,
        delta: None,
    });
    scores.extend(evaluations.into_iter().map(|evaluation| ModelScore {
        delta: Some(evaluation.score.relative_to(&base)),
        model: evaluation.model,
        score: evaluation.score,
    }));

    tracing::info!("模型比較完成，耗時 {:?}", start_time.elapsed());

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NaiveDrift, NaiveMovingAverage};
    use chrono::NaiveDate;

    #[test]
    fn test_score_metrics() {
        let score = ForecastScore::compute(&[12.0, 8.0, 10.0], &[10.0, 10.0, 0.0]).unwrap();

        // 誤差 [2, -2, 10]；MAPE 只計前兩點
        assert_eq!(score.bias, 3);
        assert_eq!(score.mae, 5);
        assert_eq!(score.mape, Some(20));
    }

    #[test]
    fn test_score_without_non_zero_actuals() {
        let score = ForecastScore::compute(&[1.0, 2.0], &[0.0, 0.0]).unwrap();
        assert_eq!(score.mape, None);
        assert_eq!(score.mae, 2);
    }

    #[test]
    fn test_score_input_checks() {
        assert!(matches!(
            ForecastScore::compute(&[1.0], &[1.0, 2.0]),
            Err(PlanningError::Forecast(_))
        ));
        assert!(ForecastScore::compute(&[], &[]).is_err());
    }

    #[test]
    fn test_relative_delta() {
        let baseline = ForecastScore {
            bias: 0,
            mae: 10,
            mape: Some(40),
        };
        let model = ForecastScore {
            bias: 1,
            mae: 5,
            mape: Some(50),
        };

        let delta = model.relative_to(&baseline);
        assert_eq!(delta.mae, Some(-0.5));
        assert_eq!(delta.mape, Some(0.25));

        let zero = ForecastScore {
            bias: 0,
            mae: 0,
            mape: None,
        };
        assert_eq!(model.relative_to(&zero), ScoreDelta { mae: None, mape: None });
    }

    #[test]
    fn test_compare_models() {
        // 線性成長：趨勢外推零誤差，移動平均落後
        let values: Vec<f64> = (1..=60).map(|i| i as f64 * 10.0).collect();
        let series = DailySeries::from_values(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &values).unwrap();
        let candidates: Vec<Box<dyn Forecaster>> = vec![
            Box::new(NaiveMovingAverage::default()),
            Box::new(NaiveDrift),
        ];

        let scores = compare_models(&NaiveDrift, &candidates, &series, 7, 30).unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].model, "Naive Drift");
        assert_eq!(scores[0].score.mae, 0);
        assert_eq!(scores[0].delta, None);

        assert_eq!(scores[1].model, "Moving Average (3)");
        assert!(scores[1].score.mae > 0);
        assert!(scores[1].score.bias < 0);
        // 基準 MAE 為 0，無法計算比例
        assert_eq!(scores[1].delta.map(|d| d.mae), Some(None));
        assert_eq!(scores[2].score, scores[0].score);
    }
}
