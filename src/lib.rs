//! # Revenue Forecast Workspace
//!
//! Workspace root for [`revenue_forecast`]; re-exports its public entry points.
//!
//! ## Example
//!
//! ```
//! use revenue_forecast_workspace::forecast_data;
//!
//! let json = forecast_data(&["2021-01-01", "2021-01-02"], &[10.0, 12.0], 1).unwrap();
//! assert!(json.contains("\"yhat_upper\""));
//! ```

pub use revenue_forecast::{
    forecast_data, forecast_data_with_config, ForecastError, ForecastRecord, ProphetConfig,
};
