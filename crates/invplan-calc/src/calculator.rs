//! 庫存政策主計算器

use invplan_core::{DemandRecord, LeadTimeRecord, PlanningConfig, PlanningError, Result, TimeUnit, UncertaintyType};
use serde::{Deserialize, Serialize};

use crate::average_max::{AverageMaxCalculator, AverageMaxInput};
use crate::cost_balance::CostBalanceCalculator;
use crate::demand_stats::{demand_summary, DemandProfile, DemandSummary};
use crate::eoq::{EconomicOrderQuantity, EoqCalculator};
use crate::fill_rate::FillRateCalculator;
use crate::lead_time::{LeadTimeCalculator, LeadTimeProfile};
use crate::normal::NormalSafetyStockCalculator;
use crate::safety_days::SafetyDaysCalculator;
use crate::{PolicyResult, PolicyWarning};

/// 基本法預設提前期（天）
pub const DEFAULT_LEAD_TIME_DAYS: f64 = 20.0;
/// 基本法預設安全天數
pub const DEFAULT_SAFETY_DAYS: f64 = 5.0;
/// 平均-最大法預設最長提前期（天）
pub const DEFAULT_MAX_LEAD_TIME_DAYS: f64 = 20.0;
/// 平均-最大法預設平均提前期（天）
pub const DEFAULT_AVERAGE_LEAD_TIME_DAYS: f64 = 10.0;

/// 安全庫存計算方法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SafetyStockMethod {
    /// 安全天數法（固定以日為單位）
    Basic { lead_time_days: f64, safety_days: f64 },

    /// 平均-最大法（固定以日為單位）
    AverageMax {
        max_lead_time: f64,
        average_lead_time: f64,
    },

    /// 週期服務水準（常態分佈）
    CycleServiceRate {
        uncertainty: UncertaintyType,
        service_level: f64,
    },

    /// 目標滿足率
    FillRate { target: f64 },

    /// 成本平衡
    CostBalancing { holding_cost: f64, stockout_cost: f64 },
}

impl SafetyStockMethod {
    /// 以預設值建立安全天數法
    pub fn basic() -> Self {
        Self::Basic {
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            safety_days: DEFAULT_SAFETY_DAYS,
        }
    }

    /// 以預設值建立平均-最大法
    pub fn average_max() -> Self {
        Self::AverageMax {
            max_lead_time: DEFAULT_MAX_LEAD_TIME_DAYS,
            average_lead_time: DEFAULT_AVERAGE_LEAD_TIME_DAYS,
        }
    }

    /// 以歷史提前期記錄（天）建立平均-最大法
    pub fn average_max_from(lead_times: &[LeadTimeRecord]) -> Result<Self> {
        let max_lead_time = LeadTimeCalculator::max_lead_time_days(lead_times)
            .ok_or_else(|| PlanningError::insufficient("沒有提前期記錄，無法取得最長提前期"))?;
        Ok(Self::AverageMax {
            max_lead_time: max_lead_time as f64,
            average_lead_time: LeadTimeCalculator::average_lead_time(lead_times, TimeUnit::Days)?,
        })
    }

    /// 是否固定以日為單位計算
    pub fn is_daily_only(&self) -> bool {
        matches!(self, Self::Basic { .. } | Self::AverageMax { .. })
    }

    /// 方法名稱（日誌用）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "安全天數法",
            Self::AverageMax { .. } => "平均-最大法",
            Self::CycleServiceRate { .. } => "週期服務水準",
            Self::FillRate { .. } => "滿足率",
            Self::CostBalancing { .. } => "成本平衡",
        }
    }
}

/// 一次完整規劃的輸出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningReport {
    /// 使用的時間單位
    pub time_unit: TimeUnit,
    /// 需求摘要
    pub summary: DemandSummary,
    /// 經濟訂購量
    pub eoq: EconomicOrderQuantity,
    /// 週期服務水準政策（無法計算時為 `None`，原因見 `warnings`）
    pub cycle_service: Option<PolicyResult>,
    /// 滿足率政策
    pub fill_rate: Option<PolicyResult>,
    /// 成本平衡政策
    pub cost_balancing: Option<PolicyResult>,
    /// 略過的政策與原因
    pub warnings: Vec<PolicyWarning>,
    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

/// 庫存政策計算器
///
/// 持有單一產品的需求與提前期記錄，依方法計算安全庫存與再訂購點。
pub struct PolicyCalculator<'a> {
    /// 需求記錄
    demand: &'a [DemandRecord],

    /// 提前期記錄
    lead_times: &'a [LeadTimeRecord],
}

impl<'a> PolicyCalculator<'a> {
    /// 創建新的政策計算器
    pub fn new(demand: &'a [DemandRecord], lead_times: &'a [LeadTimeRecord]) -> Self {
        Self { demand, lead_times }
    }

    /// 需求摘要
    pub fn summary(&self) -> DemandSummary {
        demand_summary(self.demand)
    }

    /// 指定單位的需求分佈
    pub fn demand_profile(&self, unit: TimeUnit) -> Result<DemandProfile> {
        DemandProfile::from_records(self.demand, unit)
    }

    /// 指定單位的提前期分佈
    pub fn lead_time_profile(&self, unit: TimeUnit) -> Result<LeadTimeProfile> {
        LeadTimeProfile::from_records(self.lead_times, unit)
    }

    /// 依公式需要取得需求分佈；不用 σ 時只算平均值
    fn demand_for(&self, unit: TimeUnit, needs_std_dev: bool) -> Result<DemandProfile> {
        if needs_std_dev {
            DemandProfile::from_records(self.demand, unit)
        } else {
            DemandProfile::mean_only(self.demand, unit)
        }
    }

    /// 依公式需要取得提前期分佈；不用 σL 時單筆記錄即可
    fn lead_time_for(&self, unit: TimeUnit, needs_std_dev: bool) -> Result<LeadTimeProfile> {
        if needs_std_dev {
            LeadTimeProfile::from_records(self.lead_times, unit)
        } else {
            LeadTimeProfile::mean_only(self.lead_times, unit)
        }
    }

    /// 以年需求計算 EOQ
    pub fn eoq(&self, order_cost: f64, holding_cost: f64, lot_size: f64) -> Result<EconomicOrderQuantity> {
        EoqCalculator::calculate(self.summary().demand_per_year, order_cost, holding_cost, lot_size)
    }

    /// 依方法計算政策
    ///
    /// 安全天數法與平均-最大法以每日銷售為基礎，結果固定為日單位，忽略 `unit`。
    pub fn calculate(&self, method: &SafetyStockMethod, unit: TimeUnit) -> Result<PolicyResult> {
        tracing::info!(
            "開始計算安全庫存：方法 {}，需求 {} 筆，提前期 {} 筆",
            method.name(),
            self.demand.len(),
            self.lead_times.len()
        );

        let start_time = std::time::Instant::now();

        let mut result = match *method {
            SafetyStockMethod::Basic {
                lead_time_days,
                safety_days,
            } => {
                let sales = self.summary().avg_daily_demand;
                PolicyResult::new(SafetyDaysCalculator::calculate(sales, lead_time_days, safety_days)?)
            }
            SafetyStockMethod::AverageMax {
                max_lead_time,
                average_lead_time,
            } => {
                let summary = self.summary();
                let input = AverageMaxInput {
                    max_lead_time,
                    average_lead_time,
                    max_sales: summary.max_daily_demand,
                    average_sales: summary.avg_daily_demand,
                };
                AverageMaxCalculator::calculate(&input, TimeUnit::Days)?
            }
            SafetyStockMethod::CycleServiceRate {
                uncertainty,
                service_level,
            } => NormalSafetyStockCalculator::calculate(
                uncertainty,
                service_level,
                &self.demand_for(unit, uncertainty.uses_demand_std_dev())?,
                &self.lead_time_for(unit, uncertainty.uses_lead_time_std_dev())?,
            )?,
            SafetyStockMethod::FillRate { target } => FillRateCalculator::calculate(
                target,
                &self.demand_for(unit, true)?,
                &self.lead_time_for(unit, false)?,
            )?,
            SafetyStockMethod::CostBalancing {
                holding_cost,
                stockout_cost,
            } => CostBalanceCalculator::calculate(
                holding_cost,
                stockout_cost,
                &self.demand_for(unit, true)?,
                &self.lead_time_for(unit, false)?,
            )?,
        };

        if method.is_daily_only() && unit != TimeUnit::Days {
            result.add_warning(PolicyWarning::info(format!(
                "{}固定以日為單位計算，忽略 {:?}",
                method.name(),
                unit
            )));
        }

        tracing::info!(
            "安全庫存計算完成，耗時 {:?}：SS={}，ROP={}",
            start_time.elapsed(),
            result.policy.safety_stock,
            result.policy.reorder_point
        );

        Ok(result)
    }

    /// 依配置一次計算 EOQ 與三種統計政策
    ///
    /// EOQ 只依年需求計算，失敗即回傳錯誤；個別統計政策失敗時略過並記錄警告。
    pub fn plan(&self, config: &PlanningConfig) -> Result<PlanningReport> {
        config.validate()?;

        tracing::info!("開始庫存規劃：時間單位 {:?}", config.time_unit);
        let start_time = std::time::Instant::now();

        let unit = config.time_unit;
        let eoq = self.eoq(config.order_cost, config.holding_cost, config.lot_size)?;

        let mut warnings = Vec::new();
        let mut attempt = |method: SafetyStockMethod| match self.calculate(&method, unit) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!("略過{}：{}", method.name(), err);
                warnings.push(PolicyWarning::warning(format!("略過{}：{}", method.name(), err)));
                None
            }
        };

        let cycle_service = attempt(SafetyStockMethod::CycleServiceRate {
            uncertainty: config.uncertainty_type,
            service_level: config.cycle_service_rate,
        });
        let fill_rate = attempt(SafetyStockMethod::FillRate {
            target: config.fill_rate,
        });
        let cost_balancing = attempt(SafetyStockMethod::CostBalancing {
            holding_cost: config.holding_cost,
            stockout_cost: config.stockout_cost,
        });

        let elapsed = start_time.elapsed();
        tracing::info!("庫存規劃完成，耗時 {:?}，EOQ={}", elapsed, eoq.rounded);

        Ok(PlanningReport {
            time_unit: unit,
            summary: self.summary(),
            eoq,
            cycle_service,
            fill_rate,
            cost_balancing,
            warnings,
            calculation_time_ms: Some(elapsed.as_millis()),
        })
    }
}
