//! Model configuration.
//!
//! Every knob handed to the Prophet model is spelled out here with the
//! library's own defaults (linear growth, 25 changepoints over the first 80%
//! of history, automatic yearly/weekly/daily seasonality, 80% intervals from
//! 1000 simulated paths). [`ProphetConfig::default`] is what
//! [`crate::forecast_data`] uses.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Trend shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Growth {
    /// Piecewise-linear trend with changepoints
    #[default]
    Linear,
    /// Constant level
    Flat,
}

/// Whether a seasonal component is fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityToggle {
    /// Decide from the span and spacing of the history
    #[default]
    Auto,
    /// Always fit
    Enabled,
    /// Never fit
    Disabled,
}

impl From<bool> for SeasonalityToggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            SeasonalityToggle::Enabled
        } else {
            SeasonalityToggle::Disabled
        }
    }
}

/// Spacing of the generated future timestamps.
///
/// The default is `Daily` regardless of how the history is spaced, which is
/// what the reference forecasting workflow does when no frequency is given.
/// `Infer` uses the median spacing of the history instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    /// Calendar months, counted from the last history timestamp
    Monthly,
    /// Median spacing of the history
    Infer,
}

/// Configuration for [`crate::models::prophet::Prophet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProphetConfig {
    pub growth: Growth,
    /// Number of potential changepoints placed in the history
    pub n_changepoints: usize,
    /// Share of the history in which changepoints may be placed
    pub changepoint_range: f64,
    /// Scale of the Laplace prior on trend changes
    pub changepoint_prior_scale: f64,
    /// Scale of the Normal prior on seasonal coefficients
    pub seasonality_prior_scale: f64,
    pub yearly_seasonality: SeasonalityToggle,
    pub weekly_seasonality: SeasonalityToggle,
    pub daily_seasonality: SeasonalityToggle,
    /// Coverage of the uncertainty interval
    pub interval_width: f64,
    /// Simulated paths used for the interval bounds.
    ///
    /// 0 skips sampling and the bounds collapse onto yhat. The bounds are
    /// quantiles of the simulated paths, so a single path is rejected.
    pub uncertainty_samples: usize,
    pub frequency: Frequency,
}

impl Default for ProphetConfig {
    fn default() -> Self {
        Self {
            growth: Growth::Linear,
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly_seasonality: SeasonalityToggle::Auto,
            weekly_seasonality: SeasonalityToggle::Auto,
            daily_seasonality: SeasonalityToggle::Auto,
            interval_width: 0.8,
            uncertainty_samples: 1000,
            frequency: Frequency::Daily,
        }
    }
}

impl ProphetConfig {
    /// Parse a (possibly partial) JSON configuration; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range;
        self
    }

    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    pub fn with_seasonality_prior_scale(mut self, scale: f64) -> Self {
        self.seasonality_prior_scale = scale;
        self
    }

    pub fn with_yearly_seasonality(mut self, toggle: impl Into<SeasonalityToggle>) -> Self {
        self.yearly_seasonality = toggle.into();
        self
    }

    pub fn with_weekly_seasonality(mut self, toggle: impl Into<SeasonalityToggle>) -> Self {
        self.weekly_seasonality = toggle.into();
        self
    }

    pub fn with_daily_seasonality(mut self, toggle: impl Into<SeasonalityToggle>) -> Self {
        self.daily_seasonality = toggle.into();
        self
    }

    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = width;
        self
    }

    pub fn with_uncertainty_samples(mut self, samples: usize) -> Self {
        self.uncertainty_samples = samples;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval_width must be between 0 and 1, got {}",
                self.interval_width
            )));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_range must be in (0, 1], got {}",
                self.changepoint_range
            )));
        }
        if !(self.changepoint_prior_scale > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_prior_scale must be positive, got {}",
                self.changepoint_prior_scale
            )));
        }
        if !(self.seasonality_prior_scale > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonality_prior_scale must be positive, got {}",
                self.seasonality_prior_scale
            )));
        }
        if self.uncertainty_samples == 1 {
            return Err(ForecastError::InvalidParameter(
                "uncertainty_samples must be 0 or at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
