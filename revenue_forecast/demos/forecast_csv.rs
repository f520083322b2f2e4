//! Forecast a revenue CSV and print the JSON records.
//!
//! ```text
//! cargo run --example forecast_csv -- revenue.csv 30 [config.json]
//! ```
//!
//! Set `RUST_LOG=revenue_forecast=debug` to see the fit details.

use revenue_forecast::{DataLoader, ForecastModel, Prophet, ProphetConfig, TrainedForecastModel};
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <csv> <periods> [config.json]", args[0]);
        std::process::exit(2);
    }

    let data = DataLoader::from_csv(&args[1])?;
    let periods: usize = args[2].parse()?;
    let config = match args.get(3) {
        Some(path) => ProphetConfig::from_json(&fs::read_to_string(path)?)?,
        None => ProphetConfig::default(),
    };

    let fitted = Prophet::new(config)?.train(&data)?;
    let forecast = fitted.forecast(periods)?;

    println!("{}", forecast.to_json()?);
    Ok(())
}
