//! # Inventory Policy Calculation Engine
//!
//! 安全庫存、再訂購點與經濟訂購量計算

pub mod average_max;
pub mod bucketing;
pub mod calculator;
pub mod cost_balance;
pub mod demand_stats;
pub mod eoq;
pub mod fill_rate;
pub mod lead_time;
pub mod normal;
pub mod safety_days;
pub mod statistics;

use invplan_core::{PlanningError, Result, TimeUnit};
use serde::{Deserialize, Serialize};

// Re-export 主要類型
pub use average_max::{AverageMaxCalculator, AverageMaxInput};
pub use bucketing::{BucketingCalculator, PeriodKey};
pub use calculator::{PlanningReport, PolicyCalculator, SafetyStockMethod};
pub use cost_balance::CostBalanceCalculator;
pub use demand_stats::{DemandProfile, DemandSummary};
pub use eoq::{EconomicOrderQuantity, EoqCalculator};
pub use fill_rate::FillRateCalculator;
pub use lead_time::{LeadTimeCalculator, LeadTimeProfile};
pub use normal::NormalSafetyStockCalculator;
pub use safety_days::SafetyDaysCalculator;

/// 庫存政策（安全庫存 + 再訂購點）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockPolicy {
    /// 安全庫存 (SS)
    pub safety_stock: f64,

    /// 再訂購點 (ROP)
    pub reorder_point: f64,

    /// 計算時使用的時間單位
    pub time_unit: TimeUnit,
}

impl StockPolicy {
    pub fn new(safety_stock: f64, reorder_point: f64, time_unit: TimeUnit) -> Self {
        Self {
            safety_stock,
            reorder_point,
            time_unit,
        }
    }

    /// 確認政策仍對應目前選定的時間單位
    ///
    /// 單位變更後舊結果必須重新計算，不可沿用。
    pub fn ensure_unit(&self, current: TimeUnit) -> Result<()> {
        if self.time_unit != current {
            return Err(PlanningError::UnitMismatch {
                expected: current,
                found: self.time_unit,
            });
        }
        Ok(())
    }
}

/// 政策計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    /// 計算出的政策
    pub policy: StockPolicy,

    /// 公式中使用的 Z／安全係數（若適用）
    pub safety_factor: Option<f64>,

    /// 警告信息
    pub warnings: Vec<PolicyWarning>,
}

impl PolicyResult {
    /// 創建沒有警告的結果
    pub fn new(policy: StockPolicy) -> Self {
        Self {
            policy,
            safety_factor: None,
            warnings: Vec::new(),
        }
    }

    /// 建構器模式：設置安全係數
    pub fn with_safety_factor(mut self, z: f64) -> Self {
        self.safety_factor = Some(z);
        self
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PolicyWarning) {
        self.warnings.push(warning);
    }
}

/// 政策警告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyWarning {
    pub message: String,
    pub severity: WarningSeverity,
}

impl PolicyWarning {
    pub fn new(message: String, severity: WarningSeverity) -> Self {
        Self { message, severity }
    }

    pub fn info(message: String) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 確認需求與提前期分佈使用同一時間單位
pub(crate) fn ensure_same_unit(demand: TimeUnit, lead_time: TimeUnit) -> Result<TimeUnit> {
    if demand != lead_time {
        return Err(PlanningError::UnitMismatch {
            expected: demand,
            found: lead_time,
        });
    }
    Ok(demand)
}
