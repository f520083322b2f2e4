//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use crate::utils::date_parser;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Name of the timestamp column
pub const TIME_COLUMN: &str = "ds";
/// Name of the observed value column
pub const VALUE_COLUMN: &str = "y";

/// Anything that can be normalized into a naive UTC timestamp
pub trait TimestampLike {
    fn to_timestamp(&self) -> Result<NaiveDateTime>;
}

impl TimestampLike for str {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        date_parser::parse_date(self)
    }
}

impl TimestampLike for String {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        date_parser::parse_date(self)
    }
}

impl TimestampLike for NaiveDate {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        Ok(self.and_time(NaiveTime::default()))
    }
}

impl TimestampLike for NaiveDateTime {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        Ok(*self)
    }
}

impl<Tz: TimeZone> TimestampLike for DateTime<Tz> {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        Ok(self.naive_utc())
    }
}

impl<T: TimestampLike + ?Sized> TimestampLike for &T {
    fn to_timestamp(&self) -> Result<NaiveDateTime> {
        (**self).to_timestamp()
    }
}

/// Two-column time series table: `ds` (datetime) and `y` (float)
#[derive(Debug, Clone)]
pub struct TimeSeriesData {
    /// Data frame containing the time series data
    df: DataFrame,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load time series data from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Create time series data from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<TimeSeriesData> {
        let time_column = Self::detect_time_column(&df)?;
        let value_column = Self::detect_value_column(&df, &time_column)?;

        let dates = Self::column_as_timestamps(df.column(&time_column)?)?;
        let values = Self::column_as_f64(df.column(&value_column)?)?;

        TimeSeriesData::new(dates, values)
    }

    /// Detect the time column in a DataFrame
    fn detect_time_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name == TIME_COLUMN
                || lower_name.contains("date")
                || lower_name.contains("time")
            {
                return Ok(name.to_string());
            }
        }

        // Fall back to the first temporal column
        if let Some(col) = df.get_columns().iter().find(|c| c.dtype().is_temporal()) {
            return Ok(col.name().to_string());
        }

        Err(ForecastError::DataError(
            "No time column found in data".to_string(),
        ))
    }

    /// Detect the value column in a DataFrame
    fn detect_value_column(df: &DataFrame, time_column: &str) -> Result<String> {
        const CANDIDATES: [&str; 5] = ["revenue", "value", "sales", "amount", "price"];

        let column_names: Vec<&str> = df
            .get_column_names()
            .into_iter()
            .filter(|name| *name != time_column)
            .collect();

        if let Some(name) = column_names.iter().find(|n| n.to_lowercase() == VALUE_COLUMN) {
            return Ok(name.to_string());
        }
        for candidate in CANDIDATES {
            if let Some(name) = column_names
                .iter()
                .find(|n| n.to_lowercase().contains(candidate))
            {
                return Ok(name.to_string());
            }
        }

        Err(ForecastError::DataError(
            "No value column found in data".to_string(),
        ))
    }

    fn column_as_timestamps(col: &Series) -> Result<Vec<NaiveDateTime>> {
        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .map(|opt| match opt {
                    Some(s) => date_parser::parse_date(s),
                    None => Err(ForecastError::DataError(format!(
                        "Null timestamp in column '{}'",
                        col.name()
                    ))),
                })
                .collect(),
            dtype if dtype.is_temporal() => {
                let nanos = col
                    .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))?
                    .cast(&DataType::Int64)?;
                nanos
                    .i64()?
                    .into_iter()
                    .map(|opt| {
                        opt.ok_or_else(|| {
                            ForecastError::DataError(format!(
                                "Null timestamp in column '{}'",
                                col.name()
                            ))
                        })
                        .map(nanos_to_timestamp)
                    })
                    .collect()
            }
            other => Err(ForecastError::DataError(format!(
                "Column '{}' of type {} cannot be read as timestamps",
                col.name(),
                other
            ))),
        }
    }

    fn column_as_f64(col: &Series) -> Result<Vec<f64>> {
        if !col.dtype().is_numeric() {
            return Err(ForecastError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                col.name()
            )));
        }
        let values = col.cast(&DataType::Float64)?;
        // missing observations stay on the timeline as NaN
        let out = values
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(out)
    }
}

fn timestamp_to_nanos(ts: &NaiveDateTime) -> Result<i64> {
    Utc.from_utc_datetime(ts)
        .timestamp_nanos_opt()
        .ok_or_else(|| ForecastError::DataError(format!("Timestamp {} out of range", ts)))
}

fn nanos_to_timestamp(nanos: i64) -> NaiveDateTime {
    Utc.timestamp_nanos(nanos).naive_utc()
}

impl TimeSeriesData {
    /// Build the table from already normalized timestamps and values.
    ///
    /// Unequal lengths fail inside polars with a shape mismatch.
    pub fn new(dates: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self> {
        let nanos = dates
            .iter()
            .map(timestamp_to_nanos)
            .collect::<Result<Vec<i64>>>()?;
        let date_series = Series::new(TIME_COLUMN, nanos)
            .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))?;
        let values_series = Series::new(VALUE_COLUMN, values);

        let df = DataFrame::new(vec![date_series, values_series])?;

        Ok(Self { df })
    }

    /// Build the table from raw timestamp-like inputs, normalizing every date
    pub fn from_raw<D: TimestampLike>(dates: &[D], values: &[f64]) -> Result<Self> {
        let dates = dates
            .iter()
            .map(TimestampLike::to_timestamp)
            .collect::<Result<Vec<_>>>()?;
        Self::new(dates, values.to_vec())
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Result<Vec<NaiveDateTime>> {
        let nanos = self.df.column(TIME_COLUMN)?.cast(&DataType::Int64)?;
        let out = nanos
            .i64()?
            .into_iter()
            .map(|opt| {
                opt.map(nanos_to_timestamp)
                    .ok_or_else(|| ForecastError::DataError("Null timestamp".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(out)
    }

    /// Get the observed values as a vector; missing values come back as NaN
    pub fn values(&self) -> Result<Vec<f64>> {
        let out = self
            .df
            .column(VALUE_COLUMN)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(out)
    }

    /// (timestamp, value) pairs sorted by timestamp
    pub fn observations(&self) -> Result<Vec<(NaiveDateTime, f64)>> {
        let mut pairs: Vec<(NaiveDateTime, f64)> = self
            .timestamps()?
            .into_iter()
            .zip(self.values()?)
            .collect();
        pairs.sort_by_key(|(ts, _)| *ts);
        Ok(pairs)
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.df.height()
    }
}
