//! 逐日庫存模擬

use invplan_core::{DailySeries, DemandRecord, Result};

use crate::{SimulatedDay, SimulationPolicy, SimulationResult};

/// 模擬狀態
#[derive(Debug, Clone, Copy)]
struct InventoryState {
    /// 現有庫存（缺貨不回補，最低為 0）
    on_hand: f64,

    /// 觸及再訂購點後經過的天數
    days_since_trigger: i64,
}

impl InventoryState {
    fn new(policy: &SimulationPolicy) -> Self {
        Self {
            on_hand: policy.initial_inventory(),
            days_since_trigger: 0,
        }
    }

    /// 推進一天，回傳扣除需求前的水位與是否補貨
    fn step(&mut self, policy: &SimulationPolicy, demand: f64) -> (f64, bool) {
        let mut replenished = false;

        if self.on_hand <= policy.reorder_point {
            if self.days_since_trigger == policy.lead_time_days {
                self.on_hand += policy.order_quantity;
                self.days_since_trigger = 0;
                replenished = true;
            } else {
                self.days_since_trigger += 1;
            }
        }

        let level = self.on_hand;
        self.on_hand = (self.on_hand - demand).max(0.0);

        (level, replenished)
    }
}

/// 庫存模擬器
///
/// 以 (SS, ROP, Q, L) 政策重播連續每日需求：
/// 每日先檢查再訂購點與提前期，記錄水位，再扣除需求。
#[derive(Debug, Clone)]
pub struct InventorySimulator {
    policy: SimulationPolicy,
}

impl InventorySimulator {
    /// 創建模擬器（參數不合法時回傳配置錯誤）
    pub fn new(policy: SimulationPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// 重播任意連續每日序列（歷史或預測）
    ///
    /// 負需求視為 0。
    pub fn run(&self, series: &DailySeries) -> SimulationResult {
        tracing::info!(
            "開始庫存模擬：{} 天，SS={}，ROP={}，Q={}，L={}",
            series.len(),
            self.policy.safety_stock,
            self.policy.reorder_point,
            self.policy.order_quantity,
            self.policy.lead_time_days
        );

        let mut state = InventoryState::new(&self.policy);
        let days: Vec<SimulatedDay> = series
            .points()
            .iter()
            .map(|point| {
                let demand = point.value.max(0.0);
                let (inventory_level, replenished) = state.step(&self.policy, demand);
                if replenished {
                    tracing::debug!("{} 補貨到達 {}", point.date, self.policy.order_quantity);
                }
                SimulatedDay {
                    date: point.date,
                    demand,
                    inventory_level,
                    replenished,
                }
            })
            .collect();

        let result = SimulationResult {
            policy: self.policy,
            days,
        };

        tracing::info!(
            "庫存模擬完成：補貨 {} 次，滿足率 {:.2}",
            result.replenishment_count(),
            result.ytd_fill_rate()
        );

        result
    }

    /// 重播某一日曆年度的歷史需求
    pub fn run_year(&self, records: &[DemandRecord], year: i32) -> Result<SimulationResult> {
        let series = DailySeries::for_year(records, year)?;
        Ok(self.run(&series))
    }
}
