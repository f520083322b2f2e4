use chrono::{Duration, NaiveDate};
use revenue_forecast::utils::date_parser::{format_timestamp, parse_date};
use revenue_forecast::utils::{future_timestamps, resolve_step, Step};
use revenue_forecast::Frequency;
use rstest::rstest;

#[rstest]
#[case("2021-01-03")]
#[case("2021/01/03")]
#[case("01/03/2021")]
#[case("20210103")]
#[case("2021-01-03 00:00:00")]
#[case("2021-01-03T00:00:00")]
#[case("2021-01-03T00:00:00.000")]
#[case("2021-01-03T00:00:00Z")]
#[case(" 2021-01-03 ")]
fn test_parse_date_formats(#[case] input: &str) {
    let expected = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(parse_date(input).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("yesterday")]
#[case("2021-02-30")]
fn test_parse_date_rejects(#[case] input: &str) {
    assert!(parse_date(input).is_err());
}

#[rstest]
#[case("2021-01-03 14:05:09", "2021-01-03 14:05:09")]
#[case("2021-01-03 14:05:09.25", "2021-01-03 14:05:09.250000")]
#[case("2021-01-03 14:05:09.0001", "2021-01-03 14:05:09.000100")]
#[case("2021-01-03 14:05:09.000000007", "2021-01-03 14:05:09.000000007")]
fn test_format_timestamp(#[case] input: &str, #[case] expected: &str) {
    let ts = parse_date(input).unwrap();
    assert_eq!(format_timestamp(&ts), expected);
}

#[test]
fn test_future_timestamps_daily() {
    let last = parse_date("2021-01-03").unwrap();
    let step = resolve_step(Frequency::Daily, &[]).unwrap();
    let out = future_timestamps(last, 2, step).unwrap();
    assert_eq!(out, vec![parse_date("2021-01-04").unwrap(), parse_date("2021-01-05").unwrap()]);
}

#[rstest]
#[case(Frequency::Hourly, Step::Fixed(Duration::hours(1)))]
#[case(Frequency::Weekly, Step::Fixed(Duration::weeks(1)))]
#[case(Frequency::Monthly, Step::Months(1))]
fn test_resolve_fixed_frequencies(#[case] frequency: Frequency, #[case] expected: Step) {
    assert_eq!(resolve_step(frequency, &[]).unwrap(), expected);
}

#[test]
fn test_infer_weekly_spacing() {
    let start = parse_date("2021-01-04").unwrap();
    let history: Vec<_> = (0..6).map(|w| start + Duration::weeks(w)).collect();
    let step = resolve_step(Frequency::Infer, &history).unwrap();
    assert_eq!(step, Step::Fixed(Duration::weeks(1)));

    let out = future_timestamps(history[5], 1, step).unwrap();
    assert_eq!(out[0], start + Duration::weeks(6));
}

#[test]
fn test_monthly_steps_from_month_end() {
    let last = parse_date("2021-01-31").unwrap();
    let out = future_timestamps(last, 2, Step::Months(1)).unwrap();
    assert_eq!(out[0], parse_date("2021-02-28").unwrap());
    assert_eq!(out[1], parse_date("2021-03-31").unwrap());
}
