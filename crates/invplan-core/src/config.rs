//! 庫存規劃配置模型

use serde::{Deserialize, Serialize};

use crate::{ensure_non_negative, ensure_positive, PlanningError, Result};

/// 統計時間單位
///
/// 一次分析只選定一種單位，需求與提前期的平均值、標準差都以此單位表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    /// 日
    #[default]
    Days,
    /// 週
    Weeks,
    /// 月
    Months,
}

impl TimeUnit {
    /// 提前期（天）換算成此單位時的除數
    pub fn lead_time_divisor(self) -> f64 {
        match self {
            TimeUnit::Days => 1.0,
            TimeUnit::Weeks => 7.0,
            TimeUnit::Months => 30.0,
        }
    }

    /// 年需求換算成每單位需求時的除數
    pub fn periods_per_year(self) -> f64 {
        match self {
            TimeUnit::Days => 365.0,
            TimeUnit::Weeks => 52.0,
            TimeUnit::Months => 12.0,
        }
    }
}

/// 常態分佈安全庫存的不確定性類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UncertaintyType {
    /// 需求不確定
    #[default]
    UncertainDemand,
    /// 提前期不確定
    UncertainLeadTime,
    /// 需求與提前期皆不確定（彼此獨立）
    IndependentCombined,
    /// 需求與提前期皆不確定（彼此相依）
    DependentCombined,
}

impl UncertaintyType {
    /// 公式是否用到需求標準差
    pub fn uses_demand_std_dev(self) -> bool {
        !matches!(self, UncertaintyType::UncertainLeadTime)
    }

    /// 公式是否用到提前期標準差
    pub fn uses_lead_time_std_dev(self) -> bool {
        !matches!(self, UncertaintyType::UncertainDemand)
    }
}

/// 預測時界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ForecastHorizon {
    Day,
    #[default]
    Week,
    Month,
}

impl ForecastHorizon {
    /// 時界天數
    pub fn days(self) -> usize {
        match self {
            ForecastHorizon::Day => 1,
            ForecastHorizon::Week => 7,
            ForecastHorizon::Month => 30,
        }
    }
}

/// 庫存規劃參數配置
///
/// 所有計算器都以明確參數呼叫，本結構只是呼叫端彙整輸入的容器。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 統計時間單位
    pub time_unit: TimeUnit,

    /// 目標週期服務水準（不缺貨機率）
    pub cycle_service_rate: f64,

    /// 目標滿足率（由庫存直接滿足的需求比例）
    pub fill_rate: f64,

    /// 每單位每年持有成本 (h / H)
    pub holding_cost: f64,

    /// 每單位缺貨成本 (p)
    pub stockout_cost: f64,

    /// 每張採購單的訂購成本 (K)
    pub order_cost: f64,

    /// 批量大小
    pub lot_size: f64,

    /// 不確定性類型
    pub uncertainty_type: UncertaintyType,
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            time_unit: TimeUnit::Days,
            cycle_service_rate: 0.90,
            fill_rate: 0.90,
            holding_cost: 0.20,
            stockout_cost: 0.20,
            order_cost: 20.0,
            lot_size: 100.0,
            uncertainty_type: UncertaintyType::UncertainDemand,
        }
    }

    /// 建構器模式：設置時間單位
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// 建構器模式：設置週期服務水準
    pub fn with_cycle_service_rate(mut self, rate: f64) -> Self {
        self.cycle_service_rate = rate;
        self
    }

    /// 建構器模式：設置目標滿足率
    pub fn with_fill_rate(mut self, rate: f64) -> Self {
        self.fill_rate = rate;
        self
    }

    /// 建構器模式：設置持有成本
    pub fn with_holding_cost(mut self, cost: f64) -> Self {
        self.holding_cost = cost;
        self
    }

    /// 建構器模式：設置缺貨成本
    pub fn with_stockout_cost(mut self, cost: f64) -> Self {
        self.stockout_cost = cost;
        self
    }

    /// 建構器模式：設置訂購成本
    pub fn with_order_cost(mut self, cost: f64) -> Self {
        self.order_cost = cost;
        self
    }

    /// 建構器模式：設置批量大小
    pub fn with_lot_size(mut self, lot_size: f64) -> Self {
        self.lot_size = lot_size;
        self
    }

    /// 建構器模式：設置不確定性類型
    pub fn with_uncertainty_type(mut self, uncertainty_type: UncertaintyType) -> Self {
        self.uncertainty_type = uncertainty_type;
        self
    }

    /// 檢查輸入範圍
    ///
    /// - 週期服務水準：[0, 1]
    /// - 滿足率：[0, 0.99]
    /// - 成本：非負；批量：正數
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.cycle_service_rate) {
            return Err(PlanningError::config(format!(
                "週期服務水準必須介於 0 與 1 之間，實際為 {}",
                self.cycle_service_rate
            )));
        }
        if !(0.0..=0.99).contains(&self.fill_rate) {
            return Err(PlanningError::config(format!(
                "目標滿足率必須介於 0 與 0.99 之間，實際為 {}",
                self.fill_rate
            )));
        }
        ensure_non_negative("持有成本", self.holding_cost)?;
        ensure_non_negative("缺貨成本", self.stockout_cost)?;
        ensure_non_negative("訂購成本", self.order_cost)?;
        ensure_positive("批量大小", self.lot_size)?;
        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_config() {
        let config = PlanningConfig::new();

        assert_eq!(config.time_unit, TimeUnit::Days);
        assert_eq!(config.cycle_service_rate, 0.90);
        assert_eq!(config.lot_size, 100.0);
        assert_eq!(config.uncertainty_type, UncertaintyType::UncertainDemand);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PlanningConfig::new()
            .with_time_unit(TimeUnit::Weeks)
            .with_cycle_service_rate(0.95)
            .with_fill_rate(0.98)
            .with_holding_cost(10.0)
            .with_stockout_cost(50.0)
            .with_order_cost(25.0)
            .with_lot_size(50.0)
            .with_uncertainty_type(UncertaintyType::DependentCombined);

        assert_eq!(config.time_unit, TimeUnit::Weeks);
        assert_eq!(config.fill_rate, 0.98);
        assert_eq!(config.stockout_cost, 50.0);
        assert_eq!(config.uncertainty_type, UncertaintyType::DependentCombined);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        // 滿足率上限為 0.99
        assert!(PlanningConfig::new().with_fill_rate(1.0).validate().is_err());
        assert!(PlanningConfig::new().with_cycle_service_rate(1.2).validate().is_err());
        assert!(PlanningConfig::new().with_lot_size(0.0).validate().is_err());
        assert!(PlanningConfig::new().with_holding_cost(-0.1).validate().is_err());
    }

    #[rstest]
    #[case(UncertaintyType::UncertainDemand, true, false)]
    #[case(UncertaintyType::UncertainLeadTime, false, true)]
    #[case(UncertaintyType::IndependentCombined, true, true)]
    #[case(UncertaintyType::DependentCombined, true, true)]
    fn test_uncertainty_inputs(#[case] uncertainty: UncertaintyType, #[case] demand: bool, #[case] lead_time: bool) {
        assert_eq!(uncertainty.uses_demand_std_dev(), demand);
        assert_eq!(uncertainty.uses_lead_time_std_dev(), lead_time);
    }

    #[rstest]
    #[case(TimeUnit::Days, 1.0, 365.0)]
    #[case(TimeUnit::Weeks, 7.0, 52.0)]
    #[case(TimeUnit::Months, 30.0, 12.0)]
    fn test_time_unit_divisors(
        #[case] unit: TimeUnit,
        #[case] lead_time_divisor: f64,
        #[case] periods: f64,
    ) {
        assert_eq!(unit.lead_time_divisor(), lead_time_divisor);
        assert_eq!(unit.periods_per_year(), periods);
    }

    #[test]
    fn test_forecast_horizon_days() {
        assert_eq!(ForecastHorizon::Day.days(), 1);
        assert_eq!(ForecastHorizon::default().days(), 7);
        assert_eq!(ForecastHorizon::Month.days(), 30);
    }

    #[test]
    fn test_enum_wire_names() {
        let json = serde_json::to_string(&UncertaintyType::IndependentCombined).unwrap();
        assert_eq!(json, "\"IndependentCombined\"");

        let unit: TimeUnit = serde_json::from_str("\"Months\"").unwrap();
        assert_eq!(unit, TimeUnit::Months);
    }
}
