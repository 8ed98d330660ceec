//! # Inventory Simulator
//!
//! 以再訂購點政策逐日重播需求序列，產生庫存軌跡與滿足率

pub mod metrics;
pub mod simulator;

use chrono::NaiveDate;
use invplan_calc::{LeadTimeProfile, StockPolicy};
use invplan_core::rounding::round_half_even;
use invplan_core::{ensure_finite, ensure_non_negative, ensure_positive, PlanningError, Result, TimeUnit};
use serde::{Deserialize, Serialize};

// Re-export 主要類型
pub use metrics::{daily_fill_rates, ytd_fill_rate, DailyFillRate};
pub use simulator::InventorySimulator;

/// 補貨政策參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationPolicy {
    /// 安全庫存 (SS)
    pub safety_stock: f64,

    /// 再訂購點 (ROP)
    pub reorder_point: f64,

    /// 訂購量 (Q)
    pub order_quantity: f64,

    /// 提前期（天）
    pub lead_time_days: i64,
}

impl SimulationPolicy {
    pub fn new(safety_stock: f64, reorder_point: f64, order_quantity: f64, lead_time_days: i64) -> Self {
        Self {
            safety_stock,
            reorder_point,
            order_quantity,
            lead_time_days,
        }
    }

    /// 由計算出的政策建立
    ///
    /// 模擬以日為步長，政策必須是以日為單位計算的結果。
    pub fn from_stock_policy(policy: &StockPolicy, order_quantity: f64, lead_time_days: i64) -> Result<Self> {
        policy.ensure_unit(TimeUnit::Days)?;
        Ok(Self::new(
            policy.safety_stock,
            policy.reorder_point,
            order_quantity,
            lead_time_days,
        ))
    }

    /// 由計算出的政策與以日為單位的提前期分佈建立，L 取平均提前期捨入至整數天
    pub fn from_lead_time_profile(
        policy: &StockPolicy,
        order_quantity: f64,
        lead_time: &LeadTimeProfile,
    ) -> Result<Self> {
        if lead_time.time_unit != TimeUnit::Days {
            return Err(PlanningError::UnitMismatch {
                expected: TimeUnit::Days,
                found: lead_time.time_unit,
            });
        }
        let days = round_half_even(ensure_non_negative("平均提前期", lead_time.mean)?);
        Self::from_stock_policy(policy, order_quantity, days as i64)
    }

    /// 檢查參數
    ///
    /// - Q > 0
    /// - L ≥ 0
    /// - SS ≥ 0，ROP 為有限數值
    pub fn validate(&self) -> Result<()> {
        ensure_positive("訂購量 (Q)", self.order_quantity)?;
        ensure_non_negative("安全庫存 (SS)", self.safety_stock)?;
        ensure_finite("再訂購點 (ROP)", self.reorder_point)?;
        if self.lead_time_days < 0 {
            return Err(PlanningError::config(format!(
                "提前期不可為負數，實際為 {}",
                self.lead_time_days
            )));
        }
        Ok(())
    }

    /// 初始庫存 Q + SS
    pub fn initial_inventory(&self) -> f64 {
        self.order_quantity + self.safety_stock
    }

    /// 庫存水位上限 max(Q + SS, ROP + Q)
    ///
    /// ROP ≤ SS 時即為 Q + SS。
    pub fn level_ceiling(&self) -> f64 {
        self.initial_inventory()
            .max(self.reorder_point + self.order_quantity)
    }
}

/// 單日模擬紀錄
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedDay {
    pub date: NaiveDate,

    /// 當日需求
    pub demand: f64,

    /// 扣除需求前的庫存水位
    pub inventory_level: f64,

    /// 當日是否有補貨到達
    pub replenished: bool,
}

/// 模擬結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// 使用的政策
    pub policy: SimulationPolicy,

    /// 逐日軌跡
    pub days: Vec<SimulatedDay>,
}

impl SimulationResult {
    /// 庫存水位序列
    pub fn inventory_levels(&self) -> Vec<f64> {
        self.days.iter().map(|d| d.inventory_level).collect()
    }

    /// 補貨到達次數
    pub fn replenishment_count(&self) -> usize {
        self.days.iter().filter(|d| d.replenished).count()
    }

    /// 年初至今滿足率
    pub fn ytd_fill_rate(&self) -> f64 {
        ytd_fill_rate(&self.days)
    }

    /// 每日滿足率（僅需求 > 0 的日子）
    pub fn daily_fill_rates(&self) -> Vec<DailyFillRate> {
        daily_fill_rates(&self.days)
    }
}
