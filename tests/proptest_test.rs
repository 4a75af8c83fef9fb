//! Property-based tests for bikeshare using proptest

use bikeshare::stats::{
    DurationStatsCalculator, StationStatsCalculator, StatsCalculator, TemporalStatsCalculator,
    UserStatsCalculator,
};
use bikeshare_core::error::BikeshareError;
use bikeshare_core::filters::{FilterApplier, FilterSpec};
use bikeshare_core::mode::mode;
use bikeshare_core::types::{CityId, Dataset, Schema, TripDuration, TripRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

// Strategies for generating test data

prop_compose! {
    fn arb_start_time()(
        day in 0i64..181, // January through June 2017
        secs in 0i64..86_400,
    ) -> NaiveDateTime {
        let base = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        base + Duration::days(day) + Duration::seconds(secs)
    }
}

prop_compose! {
    fn arb_trip()(
        start in arb_start_time(),
        duration_ms in 1u64..7_200_000,
        from in prop::sample::select(vec!["Canal St", "Clark St", "Lake St", "State St"]),
        to in prop::sample::select(vec!["Canal St", "Clark St", "Lake St", "State St"]),
        user_type in prop::sample::select(vec!["Subscriber", "Customer"]),
        gender in prop::option::of(prop::sample::select(vec!["Male", "Female"])),
        birth_year in prop::option::of(1930i32..2005),
    ) -> TripRecord {
        let end = start + Duration::milliseconds(duration_ms as i64);
        let mut trip = TripRecord::new(start, end, from, to, user_type)
            .unwrap()
            .with_duration(TripDuration::from_millis(duration_ms));
        trip.gender = gender.map(str::to_string);
        trip.birth_year = birth_year;
        trip
    }
}

prop_compose! {
    fn arb_spec()(
        month in prop::option::of(1u32..=6),
        day in prop::option::of(0u32..=6),
    ) -> FilterSpec {
        FilterSpec {
            city: CityId::Chicago,
            month,
            day_of_week: day,
        }
    }
}

fn arb_schema() -> impl Strategy<Value = Schema> {
    (any::<bool>(), any::<bool>()).prop_map(|(g, b)| Schema::new(g, b))
}

fn month_and_day_match(spec: &FilterSpec, trip: &TripRecord) -> bool {
    spec.month.is_none_or(|m| trip.month() == m)
        && spec.day_of_week.is_none_or(|d| trip.day_of_week() == d)
}

proptest! {
    #[test]
    fn test_filter_keeps_exactly_matching_trips(
        trips in prop::collection::vec(arb_trip(), 0..200),
        spec in arb_spec(),
    ) {
        let dataset = Dataset::new(CityId::Chicago, Schema::default(), trips);
        let view = FilterApplier::apply(&dataset, &spec);

        prop_assert!(view.iter().all(|trip| month_and_day_match(&spec, trip)));

        let excluded = dataset
            .records()
            .iter()
            .filter(|trip| !month_and_day_match(&spec, trip))
            .count();
        prop_assert_eq!(view.len() + excluded, dataset.len());
    }

    #[test]
    fn test_total_duration_is_exact_sum(
        trips in prop::collection::vec(arb_trip(), 1..200),
        spec in arb_spec(),
    ) {
        let dataset = Dataset::new(CityId::Chicago, Schema::default(), trips);
        let view = FilterApplier::apply(&dataset, &spec);
        let expected_ms: u64 = view.iter().map(|trip| trip.duration.as_millis()).sum();

        match DurationStatsCalculator.compute(&view) {
            Ok(report) => {
                prop_assert_eq!(report.total_duration.as_millis(), expected_ms);
                prop_assert_eq!(report.trip_count, view.len() as u64);
            }
            Err(BikeshareError::EmptyDataset) => prop_assert!(view.is_empty()),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn test_mode_ties_pick_smallest(
        values in prop::collection::vec("[a-e]", 1..50),
    ) {
        let picked = mode(values.iter().cloned()).unwrap();
        let count_of = |v: &String| values.iter().filter(|x| *x == v).count();
        let best = count_of(&picked);

        for value in &values {
            let count = count_of(value);
            prop_assert!(count <= best);
            if count == best {
                prop_assert!(picked <= *value);
            }
        }

        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(mode(reversed.into_iter()), Some(picked));
    }

    #[test]
    fn test_station_mode_independent_of_order(
        trips in prop::collection::vec(arb_trip(), 1..100),
    ) {
        let mut reversed = trips.clone();
        reversed.reverse();

        let forward = Dataset::new(CityId::Chicago, Schema::default(), trips);
        let backward = Dataset::new(CityId::Chicago, Schema::default(), reversed);

        prop_assert_eq!(
            StationStatsCalculator.compute(&forward.view()).unwrap(),
            StationStatsCalculator.compute(&backward.view()).unwrap()
        );
        prop_assert_eq!(
            TemporalStatsCalculator.compute(&forward.view()).unwrap(),
            TemporalStatsCalculator.compute(&backward.view()).unwrap()
        );
    }

    #[test]
    fn test_optional_user_stats_follow_schema(
        trips in prop::collection::vec(arb_trip(), 0..100),
        schema in arb_schema(),
        spec in arb_spec(),
    ) {
        let dataset = Dataset::new(CityId::Chicago, schema, trips);
        let view = FilterApplier::apply(&dataset, &spec);

        match UserStatsCalculator.compute(&view) {
            Ok(report) => {
                prop_assert_eq!(report.gender_counts.is_some(), schema.has_gender);
                if !schema.has_birth_year {
                    prop_assert!(report.birth_year_summary.is_none());
                }
                let total: u64 = report.user_type_counts.values().sum();
                prop_assert_eq!(total, view.len() as u64);
            }
            Err(BikeshareError::EmptyDataset) => prop_assert!(view.is_empty()),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
