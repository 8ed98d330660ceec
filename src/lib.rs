//! # invplan
//!
//! 庫存政策計算與模擬引擎
//!
//! - [`model`]：需求、提前期資料模型與配置
//! - [`calc`]：安全庫存、再訂購點、EOQ
//! - [`sim`]：逐日庫存模擬與滿足率
//! - [`forecast`]：預測模型介面與回測

pub use invplan_calc as calc;
pub use invplan_core as model;
pub use invplan_forecast as forecast;
pub use invplan_sim as sim;

pub use invplan_calc::{PolicyCalculator, PolicyResult, SafetyStockMethod, StockPolicy};
pub use invplan_core::{
    DailySeries, DemandRecord, LeadTimeRecord, PlanningConfig, PlanningError, Result, TimeUnit, UncertaintyType,
};
pub use invplan_forecast::Forecaster;
pub use invplan_sim::{InventorySimulator, SimulationPolicy, SimulationResult};

/// 以預測序列重播政策
///
/// 預測值與歷史需求走同一個模擬流程，負的預測值視為 0。
pub fn simulate_forecast(
    model: &dyn Forecaster,
    history: &DailySeries,
    horizon: usize,
    policy: SimulationPolicy,
) -> Result<SimulationResult> {
    let forecast = invplan_forecast::forecast_future(model, history, horizon)?;
    Ok(InventorySimulator::new(policy)?.run(&forecast))
}
