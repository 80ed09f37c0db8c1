//! Advise command implementation.

use anyhow::{Context, Result};
use quant_risk::{advise, AdvisorParams, Decision, RiskSizer};
use rust_decimal::Decimal;
use std::path::Path;

use crate::cli::AdviseArgs;

pub fn run(args: AdviseArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_app_config(config_path)?;
    let series = super::load_series(&args.data, &args.symbol)?;
    let (bundle, _) = super::bundle_and_matrix(&config, &series);

    let params = AdvisorParams {
        rsi_buy: config.indicators.rsi.buy_threshold,
        rsi_sell: config.indicators.rsi.sell_threshold,
    };
    let advice = advise(&bundle, params).context("not enough data to advise on")?;

    let decision = match advice.decision {
        Decision::Accumulate => "ACCUMULATE",
        Decision::Hold => "HOLD",
        Decision::Reduce => "REDUCE",
    };

    println!("ADVICE — {}", args.symbol);
    println!("───────────────────────────────────────────────────────────");
    println!("  Last Close:     {:.4}", advice.last_close);
    println!("  Decision:       {decision} (score {})", advice.score);
    if advice.reasons.is_empty() {
        println!("  Reasons:        insufficient indicator readings");
    } else {
        for reason in &advice.reasons {
            println!("  Reason:         {reason}");
        }
    }
    println!("  ATR:            {:.4}", advice.atr);
    println!("  Stop Loss:      {:.4}", advice.stop_loss);
    println!("  Take Profit:    {:.4}", advice.take_profit);

    // Sizing from the same volatility state: stop distance as ATR/price
    if advice.last_close > 0.0 {
        let price = Decimal::try_from(advice.last_close).unwrap_or(Decimal::ZERO);
        let stop_fraction =
            Decimal::try_from(advice.atr / advice.last_close).unwrap_or(Decimal::ZERO);
        let sizing = RiskSizer::new(config.risk.clone()).size(price, stop_fraction);

        println!("───────────────────────────────────────────────────────────");
        println!("  Risk Amount:    {}", sizing.risk_amount.round_dp(2));
        println!("  Notional:       {}", sizing.position_notional.round_dp(2));
        println!("  Position Size:  {}", sizing.position_size.round_dp(6));
    }

    Ok(())
}
