//! Forecasting models for time series data

use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use chrono::NaiveDateTime;
use std::fmt::Debug;

/// Forecast result covering every requested timestamp
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub(crate) timestamps: Vec<NaiveDateTime>,
    /// Point estimates
    pub(crate) yhat: Vec<f64>,
    pub(crate) yhat_lower: Vec<f64>,
    pub(crate) yhat_upper: Vec<f64>,
    /// Trend component
    pub(crate) trend: Vec<f64>,
}

impl ForecastResult {
    /// Create a new forecast result; every column must have one entry per timestamp
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        yhat: Vec<f64>,
        intervals: (Vec<f64>, Vec<f64>),
        trend: Vec<f64>,
    ) -> Result<Self> {
        let (yhat_lower, yhat_upper) = intervals;
        let expected = timestamps.len();
        for (name, len) in [
            ("yhat", yhat.len()),
            ("yhat_lower", yhat_lower.len()),
            ("yhat_upper", yhat_upper.len()),
            ("trend", trend.len()),
        ] {
            if len != expected {
                return Err(ForecastError::ValidationError(format!(
                    "{} length ({}) doesn't match timestamps ({})",
                    name, len, expected
                )));
            }
        }

        Ok(Self {
            timestamps,
            yhat,
            yhat_lower,
            yhat_upper,
            trend,
        })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Get the point estimates
    pub fn values(&self) -> &[f64] {
        &self.yhat
    }

    /// Get the (lower, upper) interval bounds
    pub fn intervals(&self) -> (&[f64], &[f64]) {
        (&self.yhat_lower, &self.yhat_upper)
    }

    pub fn trend(&self) -> &[f64] {
        &self.trend
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Calculate mean absolute error between the first `actual.len()` point
    /// estimates and the actual values, skipping missing actuals
    pub fn mean_absolute_error(&self, actual: &[f64]) -> Result<f64> {
        if actual.len() > self.yhat.len() {
            return Err(ForecastError::ValidationError(format!(
                "Forecast length ({}) is shorter than actual length ({})",
                self.yhat.len(),
                actual.len()
            )));
        }

        let errors: Vec<f64> = self
            .yhat
            .iter()
            .zip(actual.iter())
            .filter(|(_, a)| a.is_finite())
            .map(|(f, a)| (f - a).abs())
            .collect();
        if errors.is_empty() {
            return Err(ForecastError::ValidationError(
                "No finite actual values to compare against".to_string(),
            ));
        }

        Ok(errors.iter().sum::<f64>() / errors.len() as f64)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// History timestamps followed by `periods` future timestamps
    fn make_future_timestamps(&self, periods: usize) -> Result<Vec<NaiveDateTime>>;

    /// Predict values (with intervals) at the given timestamps
    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<ForecastResult>;

    /// Predict over the history and `periods` steps past it
    fn forecast(&self, periods: usize) -> Result<ForecastResult> {
        let timestamps = self.make_future_timestamps(periods)?;
        self.predict(&timestamps)
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on time series data
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on time series data
    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod prophet;
