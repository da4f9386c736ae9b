//! End-to-end behaviour of the public operations on small concrete series.

use approx::assert_relative_eq;
use chrono::NaiveDate;

use tempute::impute::{check_gaps, project};
use tempute::{
    ImputeError, Observation, RateModel, TimeSeries, TimeUnit, extrapolate, fill_gaps,
    monthly_to_daily, resample, yearly_to_monthly,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(rows: &[(NaiveDate, f64)]) -> TimeSeries {
    TimeSeries::new(
        "value",
        rows.iter().map(|&(date, value)| Observation::new(date, value)).collect(),
    )
}

#[test]
fn yearly_to_monthly_linear() {
    let input = series(&[
        (d(2020, 1, 1), 100.0),
        (d(2021, 1, 1), 150.0),
        (d(2022, 1, 1), 200.0),
    ]);
    let out = yearly_to_monthly(&input, RateModel::Linear).unwrap();

    // Two years of months plus the final observation.
    assert_eq!(out.len(), 25);
    assert_eq!(out.observations[0], Observation::new(d(2020, 1, 1), 100.0));
    assert_eq!(out.observations[1].date, d(2020, 2, 1));
    assert_relative_eq!(out.observations[1].value, 100.0 + 50.0 / 12.0, epsilon = 1e-9);
    assert_relative_eq!(out.observations[1].value, 104.1667, epsilon = 1e-4);

    // Second segment starts on its own observation.
    assert_eq!(out.observations[12], Observation::new(d(2021, 1, 1), 150.0));
    assert_eq!(*out.last().unwrap(), Observation::new(d(2022, 1, 1), 200.0));
    assert_eq!(out.value_column, "value");
}

#[test]
fn monthly_to_daily_exponential() {
    let input = series(&[
        (d(2020, 1, 1), 100.0),
        (d(2020, 2, 1), 110.0),
        (d(2020, 3, 1), 121.0),
    ]);
    let out = monthly_to_daily(&input, RateModel::Exponential).unwrap();

    // January has 31 days, leap February 29, plus the final row.
    assert_eq!(out.len(), 31 + 29 + 1);
    assert_eq!(out.observations[0].value, 100.0);
    assert_eq!(out.observations[31], Observation::new(d(2020, 2, 1), 110.0));

    let jan_rate = 1.1f64.powf(1.0 / 31.0);
    assert_relative_eq!(out.observations[1].value, 100.0 * jan_rate, max_relative = 1e-12);
    let feb_rate = (121.0f64 / 110.0).powf(1.0 / 29.0);
    let expected = 110.0 * feb_rate.powi(28);
    assert_relative_eq!(out.observations[59].value, expected, max_relative = 1e-12);

    assert!(check_gaps(&out.observations, TimeUnit::Days).is_ok());
}

#[test]
fn extrapolate_constant_linear_trend() {
    let input = series(&[
        (d(2018, 1, 1), 70.0),
        (d(2019, 1, 1), 80.0),
        (d(2020, 1, 1), 90.0),
        (d(2021, 1, 1), 100.0),
    ]);
    let out = extrapolate(&input, RateModel::Linear, TimeUnit::Years, d(2021, 1, 1), 3, 2).unwrap();

    assert_eq!(out.dates(), vec![d(2021, 1, 1), d(2022, 1, 1), d(2023, 1, 1), d(2024, 1, 1)]);
    let values = out.values();
    assert_eq!(values[0], 100.0);
    assert_relative_eq!(values[1], 110.0, epsilon = 1e-12);
    assert_relative_eq!(values[2], 120.0, epsilon = 1e-12);
    assert_relative_eq!(values[3], 130.0, epsilon = 1e-12);
}

#[test]
fn extrapolate_last_point_matches_closed_form() {
    let input = series(&[(d(2020, 1, 1), 50.0), (d(2020, 2, 1), 55.0), (d(2020, 3, 1), 66.0)]);
    for model in [RateModel::Linear, RateModel::Exponential] {
        let projection = project(&input, model, TimeUnit::Months, d(2020, 3, 1), 6, 2).unwrap();
        let values = projection.series.values();
        assert_eq!(values[0], 66.0);
        let expected = match model {
            RateModel::Linear => 66.0 + projection.rate * 6.0,
            RateModel::Exponential => 66.0 * projection.rate.powi(6),
        };
        assert_relative_eq!(values[6], expected, max_relative = 1e-12);
    }
}

#[test]
fn two_year_jump_surfaces_gap_error() {
    let input = series(&[(d(2020, 1, 1), 100.0), (d(2022, 1, 1), 121.0)]);
    let before = input.clone();

    let err = fill_gaps(&input, RateModel::Linear, TimeUnit::Years).unwrap_err();
    assert!(matches!(err, ImputeError::Gap { periods: 2, unit: TimeUnit::Years, .. }));
    assert!(err.to_string().contains("fill_gaps"));

    let err = yearly_to_monthly(&input, RateModel::Linear).unwrap_err();
    assert!(matches!(err, ImputeError::Gap { periods: 2, unit: TimeUnit::Years, .. }));
    let err =
        extrapolate(&input, RateModel::Linear, TimeUnit::Years, d(2022, 1, 1), 1, 2).unwrap_err();
    assert!(matches!(err, ImputeError::Gap { .. }));

    assert_eq!(input, before);
}

#[test]
fn fill_gaps_at_a_finer_unit_subdivides_contiguous_years() {
    let input = series(&[(d(2020, 1, 1), 100.0), (d(2021, 1, 1), 121.0)]);
    let out = fill_gaps(&input, RateModel::Exponential, TimeUnit::Months).unwrap();

    assert_eq!(out.len(), 13);
    assert_eq!(out.observations[0], Observation::new(d(2020, 1, 1), 100.0));
    assert_relative_eq!(out.observations[6].value, 110.0, max_relative = 1e-12);
    assert!(check_gaps(&out.observations, TimeUnit::Months).is_ok());
}

#[test]
fn exponential_over_zero_is_degenerate() {
    let input = series(&[(d(2020, 1, 1), 0.0), (d(2021, 1, 1), 10.0)]);
    let err = yearly_to_monthly(&input, RateModel::Exponential).unwrap_err();
    assert!(matches!(err, ImputeError::DegenerateRate { .. }));

    // The linear model has no such restriction.
    let out = yearly_to_monthly(&input, RateModel::Linear).unwrap();
    assert_eq!(out.observations[0].value, 0.0);
}

#[test]
fn unordered_input_is_rejected() {
    let input = series(&[(d(2021, 1, 1), 1.0), (d(2020, 1, 1), 2.0)]);
    let err = fill_gaps(&input, RateModel::Linear, TimeUnit::Months).unwrap_err();
    assert!(matches!(err, ImputeError::UnorderedSeries { .. }));

    let empty = series(&[]);
    assert_eq!(
        resample(&empty, RateModel::Linear, TimeUnit::Days).unwrap_err(),
        ImputeError::EmptySeries
    );
}

#[test]
fn month_end_series_resamples_to_days() {
    let input = series(&[
        (d(2021, 1, 31), 10.0),
        (d(2021, 2, 28), 20.0),
        (d(2021, 3, 31), 30.0),
    ]);
    let out = monthly_to_daily(&input, RateModel::Linear).unwrap();
    assert_eq!(out.len(), 28 + 31 + 1);
    assert_eq!(out.observations[28], Observation::new(d(2021, 2, 28), 20.0));
    assert!(check_gaps(&out.observations, TimeUnit::Days).is_ok());
}
