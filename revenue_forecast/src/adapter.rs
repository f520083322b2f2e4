//! Dates and revenues in, JSON forecast out

use crate::config::ProphetConfig;
use crate::data::{TimeSeriesData, TimestampLike};
use crate::error::Result;
use crate::models::prophet::Prophet;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::records::{self, ForecastRecord};
use tracing::debug;

/// Forecast `period` steps past the last date and return the JSON records
/// for the history and the extension.
///
/// Uses [`ProphetConfig::default`]. Unequal input lengths fail while the
/// table is built; unparseable dates, too little data and fitting problems
/// are returned unchanged.
///
/// ```
/// use revenue_forecast::forecast_data;
///
/// let json = forecast_data(&["2021-01-01", "2021-01-02", "2021-01-03"], &[100.0, 110.0, 105.0], 2)?;
/// assert!(json.starts_with('['));
/// # Ok::<(), revenue_forecast::ForecastError>(())
/// ```
pub fn forecast_data<D: TimestampLike>(dates: &[D], revenues: &[f64], period: usize) -> Result<String> {
    forecast_data_with_config(dates, revenues, period, &ProphetConfig::default())
}

/// [`forecast_data`] with an explicit model configuration
pub fn forecast_data_with_config<D: TimestampLike>(
    dates: &[D],
    revenues: &[f64],
    period: usize,
    config: &ProphetConfig,
) -> Result<String> {
    let rows = forecast_records(dates, revenues, period, config)?;
    records::to_json(&rows)
}

/// The forecast pipeline without the final serialization step
pub fn forecast_records<D: TimestampLike>(
    dates: &[D],
    revenues: &[f64],
    period: usize,
    config: &ProphetConfig,
) -> Result<Vec<ForecastRecord>> {
    let data = TimeSeriesData::from_raw(dates, revenues)?;
    debug!(rows = data.len(), period, "Forecasting revenue series");

    let model = Prophet::new(config.clone())?;
    let fitted = model.train(&data)?;
    let future = fitted.make_future_timestamps(period)?;
    let forecast = fitted.predict(&future)?;

    Ok(forecast.to_records())
}
