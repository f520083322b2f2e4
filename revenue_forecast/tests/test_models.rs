use chrono::{Duration, NaiveDateTime};
use revenue_forecast::utils::date_parser::parse_date;
use revenue_forecast::{
    ForecastModel, Growth, Prophet, ProphetConfig, TimeSeriesData, TrainedForecastModel,
};
use rstest::rstest;

fn create_test_data(days: i64) -> TimeSeriesData {
    let start = parse_date("2023-01-01").unwrap();
    let dates: Vec<NaiveDateTime> = (0..days).map(|d| start + Duration::days(d)).collect();
    let values = (0..days)
        .map(|d| 200.0 + 0.5 * d as f64 + 10.0 * (2.0 * std::f64::consts::PI * d as f64 / 7.0).sin())
        .collect();
    TimeSeriesData::new(dates, values).unwrap()
}

#[test]
fn test_prophet_train_and_forecast() {
    let data = create_test_data(56);
    let model = Prophet::new(ProphetConfig::default().with_uncertainty_samples(0)).unwrap();

    let trained = model.train(&data).unwrap();
    let forecast = trained.forecast(7).unwrap();
    assert_eq!(forecast.len(), 63);
    assert_eq!(forecast.timestamps()[55] + Duration::days(1), forecast.timestamps()[56]);
    assert_eq!(forecast.trend().len(), 63);

    let mae = forecast.mean_absolute_error(&data.values().unwrap()).unwrap();
    assert!(mae < 3.0, "mae = {}", mae);
}

#[test]
fn test_predict_at_arbitrary_timestamps() {
    let data = create_test_data(30);
    let trained = Prophet::default().train(&data).unwrap();

    let ts = vec![parse_date("2023-03-15 12:00").unwrap()];
    let result = trained.predict(&ts).unwrap();
    assert_eq!(result.len(), 1);
    let (lower, upper) = result.intervals();
    assert!(lower[0] <= upper[0]);
}

#[rstest]
#[case(0.5)]
#[case(0.8)]
#[case(0.95)]
fn test_interval_width_orders_bounds(#[case] width: f64) {
    let data = create_test_data(40);
    let config = ProphetConfig::default().with_interval_width(width);
    let forecast = Prophet::new(config).unwrap().train(&data).unwrap().forecast(5).unwrap();

    let (lower, upper) = forecast.intervals();
    for i in 0..forecast.len() {
        assert!(lower[i] <= forecast.values()[i]);
        assert!(forecast.values()[i] <= upper[i]);
    }
}

#[test]
fn test_wider_interval_is_wider() {
    let data = create_test_data(40);
    let width_of = |w: f64| {
        let config = ProphetConfig::default().with_interval_width(w);
        let forecast = Prophet::new(config).unwrap().train(&data).unwrap().forecast(0).unwrap();
        let (lower, upper) = forecast.intervals();
        upper.iter().zip(lower).map(|(u, l)| u - l).sum::<f64>()
    };
    assert!(width_of(0.95) > width_of(0.5));
}

#[test]
fn test_flat_growth_model() {
    let data = create_test_data(21);
    let model = Prophet::new(ProphetConfig::default().with_growth(Growth::Flat)).unwrap();
    assert_eq!(model.name(), "Prophet (flat growth)");

    let trained = model.train(&data).unwrap();
    let forecast = trained.forecast(3).unwrap();
    let trend = forecast.trend();
    assert!(trend.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-6));
}

#[test]
fn test_model_parameter_validation() {
    assert!(Prophet::new(ProphetConfig::default().with_interval_width(1.5)).is_err());
    assert!(Prophet::new(ProphetConfig::default().with_changepoint_range(1.2)).is_err());
    assert!(Prophet::new(ProphetConfig::default().with_seasonality_prior_scale(0.0)).is_err());
    assert!(Prophet::new(ProphetConfig::default().with_uncertainty_samples(1)).is_err());
}
