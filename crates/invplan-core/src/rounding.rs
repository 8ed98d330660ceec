//! 數值捨入
//!
//! 所有公式輸出採用「四捨六入五成雙」（round half to even），
//! 與既有報表的數字保持一致。

/// 捨入至整數（五成雙）
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// 捨入至指定小數位數（五成雙）
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}
