//! Prophet forecaster from `augurs`, fitted with the Stan model compiled to
//! WebAssembly.
//!
//! The library works on whole-second timestamps. The history keeps its full
//! precision here and only the model's time axis is truncated to seconds.

use super::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::config::{Growth, ProphetConfig, SeasonalityToggle};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::utils::{future_timestamps, resolve_step};
use augurs::prophet::wasmstan::WasmstanOptimizer;
use augurs::prophet::{
    GrowthType, PredictionData, Prophet as ProphetModel, ProphetOptions, SeasonalityOption,
    TrainingData,
};
use chrono::{NaiveDateTime, TimeZone, Utc};
use std::fmt;
use tracing::{debug, warn};

/// Untrained model; holds only configuration
#[derive(Debug, Clone)]
pub struct Prophet {
    name: String,
    config: ProphetConfig,
}

/// Fitted model together with the timeline it was trained on
pub struct FittedProphet {
    name: String,
    config: ProphetConfig,
    /// Every history timestamp, including rows with a missing value
    timeline: Vec<NaiveDateTime>,
    model: ProphetModel<WasmstanOptimizer>,
}

impl Prophet {
    /// Create a model with validated configuration
    pub fn new(config: ProphetConfig) -> Result<Self> {
        config.validate()?;
        let name = match config.growth {
            Growth::Linear => "Prophet (linear growth)",
            Growth::Flat => "Prophet (flat growth)",
        };
        Ok(Self {
            name: name.to_string(),
            config,
        })
    }
}

impl Default for Prophet {
    fn default() -> Self {
        Self {
            name: "Prophet (linear growth)".to_string(),
            config: ProphetConfig::default(),
        }
    }
}

fn to_seconds(ts: &NaiveDateTime) -> i64 {
    Utc.from_utc_datetime(ts).timestamp()
}

fn seasonality_option(toggle: SeasonalityToggle) -> SeasonalityOption {
    match toggle {
        SeasonalityToggle::Auto => SeasonalityOption::Auto,
        SeasonalityToggle::Enabled => SeasonalityOption::Manual(true),
        SeasonalityToggle::Disabled => SeasonalityOption::Manual(false),
    }
}

fn float_option<T: TryFrom<f64>>(name: &str, value: f64) -> Result<T> {
    T::try_from(value)
        .map_err(|_| ForecastError::InvalidParameter(format!("{} is out of range: {}", name, value)))
}

fn count_option<T: TryFrom<usize>>(name: &str, value: usize) -> Result<T> {
    T::try_from(value)
        .map_err(|_| ForecastError::InvalidParameter(format!("{} is too large: {}", name, value)))
}

/// Translate the configuration into the library's options
fn prophet_options(config: &ProphetConfig) -> Result<ProphetOptions> {
    Ok(ProphetOptions {
        growth: match config.growth {
            Growth::Linear => GrowthType::Linear,
            Growth::Flat => GrowthType::Flat,
        },
        n_changepoints: count_option("n_changepoints", config.n_changepoints)?,
        changepoint_range: float_option("changepoint_range", config.changepoint_range)?,
        changepoint_prior_scale: float_option(
            "changepoint_prior_scale",
            config.changepoint_prior_scale,
        )?,
        seasonality_prior_scale: float_option(
            "seasonality_prior_scale",
            config.seasonality_prior_scale,
        )?,
        yearly_seasonality: seasonality_option(config.yearly_seasonality),
        weekly_seasonality: seasonality_option(config.weekly_seasonality),
        daily_seasonality: seasonality_option(config.daily_seasonality),
        interval_width: float_option("interval_width", config.interval_width)?,
        uncertainty_samples: count_option("uncertainty_samples", config.uncertainty_samples)?,
        ..Default::default()
    })
}

impl ForecastModel for Prophet {
    type Trained = FittedProphet;

    fn train(&self, data: &TimeSeriesData) -> Result<FittedProphet> {
        let observations = data.observations()?;

        if let Some(pair) = observations.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ForecastError::ValidationError(format!(
                "Duplicate timestamp in history: {}",
                pair[0].0
            )));
        }
        if observations.iter().any(|(_, y)| y.is_infinite()) {
            return Err(ForecastError::DataError(
                "Found infinity in the value column".to_string(),
            ));
        }

        let timeline: Vec<NaiveDateTime> = observations.iter().map(|(ts, _)| *ts).collect();
        let (ds, y): (Vec<i64>, Vec<f64>) = observations
            .iter()
            .filter(|(_, y)| y.is_finite())
            .map(|(ts, y)| (to_seconds(ts), *y))
            .unzip();
        if y.len() < 2 {
            return Err(ForecastError::DataError(format!(
                "Need at least 2 non-missing observations to fit, got {}",
                y.len()
            )));
        }
        if y.len() < timeline.len() {
            warn!(
                missing = timeline.len() - y.len(),
                "Rows with a missing value are left out of the fit"
            );
        }

        debug!(rows = timeline.len(), fit_rows = y.len(), "Fitting {}", self.name);

        let options = prophet_options(&self.config)?;
        let mut model = ProphetModel::new(options, WasmstanOptimizer::new());
        model.fit(TrainingData::new(ds, y)?, Default::default())?;

        debug!("Fitted {}", self.name);

        Ok(FittedProphet {
            name: self.name.clone(),
            config: self.config.clone(),
            timeline,
            model,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FittedProphet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedProphet")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("timeline", &self.timeline.len())
            .finish_non_exhaustive()
    }
}

impl TrainedForecastModel for FittedProphet {
    fn make_future_timestamps(&self, periods: usize) -> Result<Vec<NaiveDateTime>> {
        let last = *self.timeline.last().ok_or_else(|| {
            ForecastError::ForecastingError("Model has no history".to_string())
        })?;
        let step = resolve_step(self.config.frequency, &self.timeline)?;

        let mut timestamps = self.timeline.clone();
        timestamps.extend(future_timestamps(last, periods, step)?);
        Ok(timestamps)
    }

    fn predict(&self, timestamps: &[NaiveDateTime]) -> Result<ForecastResult> {
        let ds: Vec<i64> = timestamps.iter().map(to_seconds).collect();
        let predictions = self.model.predict(Some(PredictionData::new(ds)))?;

        let yhat = predictions.yhat.point;
        // no bounds are sampled when uncertainty_samples is 0
        let lower = predictions.yhat.lower.unwrap_or_else(|| yhat.clone());
        let upper = predictions.yhat.upper.unwrap_or_else(|| yhat.clone());

        debug!(rows = timestamps.len(), "Predicted with {}", self.name);

        ForecastResult::new(
            timestamps.to_vec(),
            yhat,
            (lower, upper),
            predictions.trend.point,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}
