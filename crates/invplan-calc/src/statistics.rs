//! 統計輔助函式

use invplan_core::{PlanningError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// 平均值（空序列回傳 `None`）
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 樣本標準差（n - 1 自由度；少於兩點回傳 `None`）
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// 分位數（順序統計量之間線性內插）
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// IQR 離群值界限 `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`
pub fn iqr_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - 1.5 * iqr, q3 + 1.5 * iqr))
}

/// 以 IQR 規則移除離群記錄
///
/// `field` 取出要檢查的欄位。界限以未分組的原始值計算；
/// 只有一筆（或零筆）時 IQR 為 0，全部保留。
pub fn remove_outliers_iqr<T, F>(records: &[T], field: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let values: Vec<f64> = records.iter().map(&field).collect();
    let Some((lower, upper)) = iqr_bounds(&values) else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|r| {
            let v = field(r);
            v >= lower && v <= upper
        })
        .cloned()
        .collect()
}

/// 標準常態分佈
fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| PlanningError::Calculation(e.to_string()))
}

/// 標準常態分佈反函數 Φ⁻¹(p)
pub fn probit(p: f64) -> Result<f64> {
    Ok(standard_normal()?.inverse_cdf(p))
}

/// 標準常態分佈累積函數 Φ(x)
pub fn normal_cdf(x: f64) -> Result<f64> {
    Ok(standard_normal()?.cdf(x))
}
