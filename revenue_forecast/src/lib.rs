//! # Revenue Forecast
//!
//! Forecast a revenue time series and hand the result back as JSON.
//!
//! ## Features
//!
//! - Two-column time series table (`ds`, `y`) backed by a polars `DataFrame`
//! - Dates accepted as strings, `NaiveDate`, `NaiveDateTime` or `DateTime<Tz>`
//! - Prophet (from `augurs`) with automatic yearly/weekly/daily seasonality
//!   and uncertainty intervals
//! - Explicit, serde-loadable model configuration with documented defaults
//! - JSON output with exactly `ds`, `yhat`, `yhat_lower` and `yhat_upper` per row
//!
//! ## Quick Start
//!
//! ```rust
//! use revenue_forecast::{forecast_data, records};
//!
//! let dates = ["2021-01-01", "2021-01-02", "2021-01-03"];
//! let revenues = [100.0, 110.0, 105.0];
//!
//! let json = forecast_data(&dates, &revenues, 2)?;
//! let rows = records::from_json(&json)?;
//!
//! assert_eq!(rows.len(), 5);
//! assert_eq!(rows[3].ds, "2021-01-04 00:00:00");
//! # Ok::<(), revenue_forecast::ForecastError>(())
//! ```
//!
//! ## Future timestamps
//!
//! Future dates are generated daily by default, whatever the spacing of the
//! history. Use [`config::Frequency`] to pick hourly, weekly, monthly or an
//! inferred spacing instead.

pub mod adapter;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod records;
pub mod utils;

// Re-export commonly used types
pub use crate::adapter::{forecast_data, forecast_data_with_config, forecast_records};
pub use crate::config::{Frequency, Growth, ProphetConfig, SeasonalityToggle};
pub use crate::data::{DataLoader, TimeSeriesData, TimestampLike};
pub use crate::error::ForecastError;
pub use crate::models::prophet::{FittedProphet, Prophet};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::records::ForecastRecord;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
