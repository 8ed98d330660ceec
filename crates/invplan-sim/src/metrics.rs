//! 滿足率指標

use chrono::NaiveDate;
use invplan_core::rounding::round_to;
use serde::{Deserialize, Serialize};

use crate::SimulatedDay;

/// 單日滿足率
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFillRate {
    pub date: NaiveDate,
    pub fill_rate: f64,
}

/// 每日滿足率：只計需求 > 0 的日子，min(水位 / 需求, 1)，捨入至 2 位小數
pub fn daily_fill_rates(days: &[SimulatedDay]) -> Vec<DailyFillRate> {
    days.iter()
        .filter(|d| d.demand > 0.0)
        .map(|d| DailyFillRate {
            date: d.date,
            fill_rate: round_to(d.inventory_level / d.demand, 2).min(1.0),
        })
        .collect()
}

/// 年初至今滿足率 min(Σ水位 / Σ需求, 1)
///
/// 只計需求 > 0 的日子；沒有這樣的日子時為 0.0。
pub fn ytd_fill_rate(days: &[SimulatedDay]) -> f64 {
    let (filled, demand) = days
        .iter()
        .filter(|d| d.demand > 0.0)
        .fold((0.0, 0.0), |(filled, demand), d| {
            (filled + d.inventory_level, demand + d.demand)
        });

    if demand > 0.0 {
        (filled / demand).min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(demand: &[f64], levels: &[f64]) -> Vec<SimulatedDay> {
        let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        demand
            .iter()
            .zip(levels)
            .enumerate()
            .map(|(i, (&demand, &inventory_level))| SimulatedDay {
                date: start + chrono::Days::new(i as u64),
                demand,
                inventory_level,
                replenished: false,
            })
            .collect()
    }

    #[test]
    fn test_ytd_fill_rate_is_capped() {
        let days = days(&[10.0, 0.0, 30.0], &[80.0, 50.0, 60.0]);
        assert_eq!(ytd_fill_rate(&days), 1.0);
    }

    #[test]
    fn test_ytd_fill_rate_partial() {
        // 需求 > 0 的日子：水位 5 + 15，需求 20 + 20
        let days = days(&[20.0, 0.0, 20.0], &[5.0, 100.0, 15.0]);
        assert_eq!(ytd_fill_rate(&days), 0.5);
    }

    #[test]
    fn test_ytd_fill_rate_without_demand() {
        assert_eq!(ytd_fill_rate(&[]), 0.0);
        assert_eq!(ytd_fill_rate(&days(&[0.0, 0.0], &[10.0, 10.0])), 0.0);
    }

    #[test]
    fn test_daily_fill_rates() {
        let days = days(&[3.0, 0.0, 30.0, 8.0], &[1.0, 50.0, 60.0, 0.0]);
        let rates = daily_fill_rates(&days);

        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].fill_rate, 0.33);
        assert_eq!(rates[1].fill_rate, 1.0);
        assert_eq!(rates[2].fill_rate, 0.0);
        assert_eq!(rates[1].date, NaiveDate::from_ymd_opt(2023, 3, 3).unwrap());
    }
}
