//! 庫存政策報表示例

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use invplan::calc::SafetyStockMethod;
use invplan::forecast::{compare_models, evaluation_start, NaiveDrift, NaiveMovingAverage};
use invplan::model::{calendar, ForecastHorizon};
use invplan::{
    simulate_forecast, DailySeries, DemandRecord, Forecaster, InventorySimulator, LeadTimeRecord, PlanningConfig,
    PolicyCalculator, SimulationPolicy, TimeUnit,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 庫存政策計算示例 ===\n");

    let start = NaiveDate::from_ymd_opt(2022, 1, 1).context("無效的起始日期")?;
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).context("無效的結束日期")?;

    // 兩年需求：週末較高，年中有一筆退貨
    let mut demand: Vec<DemandRecord> = calendar::date_range(start, end)?
        .into_iter()
        .map(|d| {
            let weekend = d.weekday().number_from_monday() >= 6;
            DemandRecord::new("BIKE-001", d, if weekend { 140.0 } else { 80.0 })
        })
        .collect();
    demand.push(DemandRecord::parse(
        "BIKE-001",
        NaiveDate::from_ymd_opt(2023, 6, 15).context("無效的日期")?,
        "(45)",
    )?);

    let lead_times = [(1, 14), (3, 21), (6, 10), (9, 18)]
        .iter()
        .map(|&(month, days)| {
            let ordered = NaiveDate::from_ymd_opt(2023, month, 1).context("無效的下單日期")?;
            Ok(LeadTimeRecord::new("BIKE-001", ordered, calendar::add_days(ordered, days)?)?)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let year_demand = invplan::model::demand::filter_year(&demand, 2023);
    let calculator = PolicyCalculator::new(&year_demand, &lead_times);

    // 統計政策
    let config = PlanningConfig::new()
        .with_time_unit(TimeUnit::Days)
        .with_cycle_service_rate(0.95);
    let report = calculator.plan(&config)?;

    println!("年需求: {}", report.summary.demand_per_year);
    println!("EOQ: {} (原始 {:.1})", report.eoq.rounded, report.eoq.raw);
    for (name, result) in [
        ("週期服務水準", &report.cycle_service),
        ("滿足率", &report.fill_rate),
        ("成本平衡", &report.cost_balancing),
    ] {
        match result {
            Some(result) => println!(
                "  - {}: SS={}, ROP={:.1}",
                name, result.policy.safety_stock, result.policy.reorder_point
            ),
            None => println!("  - {}: 無法計算", name),
        }
    }
    for warning in &report.warnings {
        println!("  ! {}", warning.message);
    }

    // 平均-最大法（取歷史提前期）
    let average_max = calculator.calculate(&SafetyStockMethod::average_max_from(&lead_times)?, TimeUnit::Days)?;
    println!(
        "  - 平均-最大法: SS={}, ROP={}",
        average_max.policy.safety_stock, average_max.policy.reorder_point
    );

    // 安全天數法 + 年度模擬（L 取平均提前期）
    let basic = calculator.calculate(&SafetyStockMethod::basic(), TimeUnit::Days)?;
    let lead_time = calculator.lead_time_profile(TimeUnit::Days)?;
    let policy = SimulationPolicy::from_lead_time_profile(&basic.policy, report.eoq.rounded, &lead_time)?;
    let simulation = InventorySimulator::new(policy)?.run_year(&year_demand, 2023)?;

    println!(
        "\n2023 模擬：補貨 {} 次，年初至今滿足率 {:.1}",
        simulation.replenishment_count(),
        simulation.ytd_fill_rate()
    );

    // 預測模型比較與未來重播
    let history = DailySeries::from_records(&demand, start, end)?;
    let horizon = ForecastHorizon::Week.days();
    let candidates: Vec<Box<dyn Forecaster>> = vec![Box::new(NaiveMovingAverage::default())];
    let scores = compare_models(
        &NaiveDrift,
        &candidates,
        &history,
        horizon,
        evaluation_start(365, horizon)?,
    )?;

    println!("\n預測模型比較:");
    for score in &scores {
        println!(
            "  - {}: MAE={}, MAPE={}",
            score.model,
            score.score.mae,
            score
                .score
                .mape
                .map(|m| format!("{}%", m))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    let replay = simulate_forecast(&NaiveMovingAverage::default(), &history, 30, policy)?;
    println!("\n未來 30 天預測重播滿足率: {:.1}", replay.ytd_fill_rate());

    Ok(())
}
