//! Forecast records and their JSON form

use crate::error::Result;
use crate::models::ForecastResult;
use crate::utils::date_parser::format_timestamp;
use serde::{Deserialize, Serialize};

/// One output row: timestamp, point estimate and interval bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastRecord {
    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`, with a fraction when sub-second
    pub ds: String,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

impl ForecastResult {
    /// Keep the timestamp, the point estimate and the bounds; drop the components
    pub fn to_records(&self) -> Vec<ForecastRecord> {
        self.timestamps
            .iter()
            .zip(&self.yhat)
            .zip(self.yhat_lower.iter().zip(&self.yhat_upper))
            .map(|((ts, &yhat), (&yhat_lower, &yhat_upper))| ForecastRecord {
                ds: format_timestamp(ts),
                yhat,
                yhat_lower,
                yhat_upper,
            })
            .collect()
    }

    /// Serialize the projected records as a JSON array
    pub fn to_json(&self) -> Result<String> {
        to_json(&self.to_records())
    }
}

pub fn to_json(records: &[ForecastRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

pub fn from_json(json: &str) -> Result<Vec<ForecastRecord>> {
    Ok(serde_json::from_str(json)?)
}
