use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use polars::prelude::*;
use revenue_forecast::data::{DataLoader, TimeSeriesData, TIME_COLUMN, VALUE_COLUMN};
use revenue_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,revenue").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();
    writeln!(file, "2023-01-02,103.0").unwrap();
    writeln!(file, "2023-01-03,106.0").unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert_eq!(data.values().unwrap(), vec![100.0, 103.0, 106.0]);
    assert_eq!(
        data.timestamps().unwrap()[2],
        NaiveDate::from_ymd_opt(2023, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
}

#[test]
fn test_data_loader_prefers_y_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ds,price,y").unwrap();
    writeln!(file, "2023-01-01,1.0,10").unwrap();
    writeln!(file, "2023-01-02,2.0,20").unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(data.values().unwrap(), vec![10.0, 20.0]);
}

#[test]
fn test_data_loader_error_handling() {
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid,csv,format").unwrap();
    writeln!(file, "1,2,3").unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_from_dataframe() {
    let df = df! {
        "order_date" => &["2023-02-01", "2023-02-02"],
        "sales" => &[5i64, 7],
    }
    .unwrap();

    let data = DataLoader::from_dataframe(df).unwrap();
    assert_eq!(data.values().unwrap(), vec![5.0, 7.0]);
    assert_eq!(
        data.dataframe().get_column_names(),
        vec![TIME_COLUMN, VALUE_COLUMN]
    );
}

#[test]
fn test_offsets_normalized_to_utc() {
    let with_offset = ["2021-01-01T02:00:00+02:00", "2021-01-02T00:00:00Z"];
    let data = TimeSeriesData::from_raw(&with_offset, &[1.0, 2.0]).unwrap();
    let ts = data.timestamps().unwrap();
    assert_eq!(ts[0], NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());

    let offset = FixedOffset::east_opt(3600).unwrap();
    let aware: Vec<DateTime<FixedOffset>> = vec![
        offset.with_ymd_and_hms(2021, 1, 1, 1, 0, 0).unwrap(),
        offset.with_ymd_and_hms(2021, 1, 2, 1, 0, 0).unwrap(),
    ];
    let data = TimeSeriesData::from_raw(&aware, &[1.0, 2.0]).unwrap();
    assert_eq!(data.timestamps().unwrap(), ts);

    let utc: Vec<DateTime<Utc>> = vec![Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()];
    assert_eq!(TimeSeriesData::from_raw(&utc, &[1.0]).unwrap().len(), 1);
}

#[test]
fn test_length_mismatch_is_a_shape_error() {
    let result = TimeSeriesData::from_raw(&["2021-01-01", "2021-01-02"], &[1.0]);
    assert!(matches!(result, Err(ForecastError::PolarsError(_))));
}

#[test]
fn test_value_column_detection() {
    let df = df! {
        "ds" => &["2023-02-01", "2023-02-02"],
        "close" => &[5.0, 7.0],
    }
    .unwrap();
    assert!(matches!(
        DataLoader::from_dataframe(df),
        Err(ForecastError::DataError(_))
    ));

    let df = df! {
        "ds" => &["2023-02-01", "2023-02-02"],
        "ads_revenue" => &[5.0, 7.0],
    }
    .unwrap();
    let data = DataLoader::from_dataframe(df).unwrap();
    assert_eq!(data.values().unwrap(), vec![5.0, 7.0]);
}
