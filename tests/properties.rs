//! Property tests for gap detection, endpoint exactness and gap-free output.

use chrono::NaiveDate;
use proptest::prelude::*;

use tempute::calendar::advance;
use tempute::domain::Segment;
use tempute::impute::sequence::interpolate_segment;
use tempute::impute::{check_gaps, estimate_rate};
use tempute::{ImputeError, Observation, RateModel, TimeSeries, TimeUnit, fill_gaps, resample};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2060i32, 1u32..13u32, 1u32..29u32)
        .prop_filter_map("valid date", |(year, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
        })
}

fn unit_strategy() -> impl Strategy<Value = TimeUnit> {
    prop_oneof![Just(TimeUnit::Days), Just(TimeUnit::Months), Just(TimeUnit::Years)]
}

fn model_strategy() -> impl Strategy<Value = RateModel> {
    prop_oneof![Just(RateModel::Linear), Just(RateModel::Exponential)]
}

fn contiguous(start: NaiveDate, unit: TimeUnit, values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(n, &v)| Observation::new(advance(start, unit, n as i64).unwrap(), v))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn contiguous_series_pass_gap_check(
        start in date_strategy(),
        unit in unit_strategy(),
        values in prop::collection::vec(1.0f64..1000.0, 1..30),
    ) {
        let obs = contiguous(start, unit, &values);
        prop_assert!(check_gaps(&obs, unit).is_ok());
    }

    #[test]
    fn removing_an_interior_step_fails_gap_check(
        start in date_strategy(),
        unit in unit_strategy(),
        values in prop::collection::vec(1.0f64..1000.0, 3..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut obs = contiguous(start, unit, &values);
        let removed = 1 + pick.index(obs.len() - 2);
        obs.remove(removed);
        let is_gap = matches!(check_gaps(&obs, unit), Err(ImputeError::Gap { periods: 2, .. }));
        prop_assert!(is_gap);
    }

    #[test]
    fn segment_start_is_exact_and_rate_round_trips(
        start in date_strategy(),
        months in 1i64..36,
        v0 in 0.5f64..500.0,
        v1 in 0.5f64..500.0,
        unit in unit_strategy(),
        model in model_strategy(),
    ) {
        let end = advance(start, TimeUnit::Months, months).unwrap();
        let segment = Segment {
            start: Observation::new(start, v0),
            end: Observation::new(end, v1),
            step_count: 1,
        };
        let seq = interpolate_segment(&segment, unit, model).unwrap();
        prop_assert_eq!(seq.points[0], segment.start);
        prop_assert!(seq.points.iter().all(|p| p.date >= start && p.date < end));

        let rate = estimate_rate(&seq.segment, model).unwrap();
        let reached = model.law().project(v0, rate, seq.segment.step_count);
        prop_assert!((reached - v1).abs() <= 1e-9 * v1.abs().max(1.0));
    }

    #[test]
    fn fill_and_resample_output_is_gap_free(
        start in date_strategy(),
        values in prop::collection::vec(1.0f64..1000.0, 1..6),
        target in prop_oneof![Just(TimeUnit::Days), Just(TimeUnit::Months)],
        model in model_strategy(),
    ) {
        let native = target.coarser().unwrap();
        let series = TimeSeries::new("value", contiguous(start, native, &values));

        let resampled = resample(&series, model, target).unwrap();
        prop_assert!(check_gaps(&resampled.observations, target).is_ok());
        prop_assert_eq!(resampled.last(), series.last());
        prop_assert!(resampled.observations.windows(2).all(|w| w[0].date < w[1].date));

        let filled = fill_gaps(&series, model, target).unwrap();
        prop_assert_eq!(filled, resampled);
    }
}
