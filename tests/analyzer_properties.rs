use chrono::{Duration, NaiveDate};
use cycletrack_backend::analyzer::{
    classify_phase, compute_statistics, extract_episodes, CycleAnalyzer,
};
use cycletrack_backend::models::{Entry, Flow, Phase, Symptom};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn flow_strategy() -> impl Strategy<Value = Flow> {
    prop_oneof![
        Just(Flow::None),
        Just(Flow::Light),
        Just(Flow::Medium),
        Just(Flow::Heavy),
    ]
}

/// Entries on distinct days within a year, in arbitrary order.
fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::btree_map(
        0_i64..365,
        (flow_strategy(), prop::collection::vec(0_usize..12, 0..4)),
        0..80,
    )
    .prop_map(|days| {
        days.into_iter()
            .map(|(offset, (flow, symptoms))| {
                Entry::new(base() + Duration::days(offset), flow)
                    .with_symptoms(symptoms.into_iter().map(|i| Symptom::ALL[i]))
            })
            .collect::<Vec<_>>()
    })
    .prop_shuffle()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn episodes_are_ordered_and_disjoint(entries in entries_strategy()) {
        let episodes = extract_episodes(&entries);
        for episode in &episodes {
            prop_assert!(episode.duration_days >= 1);
            prop_assert!(episode.start_date <= episode.end_date);
        }
        for pair in episodes.windows(2) {
            // at least one non-flow day separates episodes
            prop_assert!((pair[1].start_date - pair[0].end_date).num_days() >= 2);
        }
    }

    #[test]
    fn every_flow_day_belongs_to_exactly_one_episode(entries in entries_strategy()) {
        let episodes = extract_episodes(&entries);
        for entry in entries.iter().filter(|e| e.is_flow_day()) {
            let holders = episodes.iter().filter(|ep| ep.contains(entry.date)).count();
            prop_assert_eq!(holders, 1);
        }
    }

    #[test]
    fn order_of_input_does_not_matter(entries in entries_strategy()) {
        let mut sorted = entries.clone();
        sorted.sort_by_key(|e| e.date);

        let shuffled_episodes = extract_episodes(&entries);
        let sorted_episodes = extract_episodes(&sorted);
        prop_assert_eq!(&shuffled_episodes, &sorted_episodes);
        prop_assert_eq!(
            compute_statistics(&shuffled_episodes, &entries),
            compute_statistics(&sorted_episodes, &sorted)
        );
    }

    #[test]
    fn statistics_are_idempotent(entries in entries_strategy()) {
        let analyzer = CycleAnalyzer::new(entries);
        prop_assert_eq!(analyzer.statistics(), analyzer.statistics());
    }

    #[test]
    fn no_flow_days_means_nothing_to_average(
        offsets in prop::collection::btree_set(0_i64..365, 0..40)
    ) {
        let entries: Vec<Entry> = offsets
            .into_iter()
            .map(|offset| Entry::new(base() + Duration::days(offset), Flow::None))
            .collect();
        let episodes = extract_episodes(&entries);
        prop_assert!(episodes.is_empty());
        let stats = compute_statistics(&episodes, &entries);
        prop_assert_eq!(stats.average_cycle_length, None);
        prop_assert_eq!(stats.average_period_duration, None);
        prop_assert_eq!(stats.predicted_next_period, None);
    }

    #[test]
    fn logged_flow_day_is_menstrual(
        entries in entries_strategy(),
        cycle in 1_i64..60,
        period in 1_i64..10
    ) {
        for entry in entries.iter().filter(|e| e.is_flow_day()) {
            prop_assert_eq!(
                classify_phase(entry.date, &entries, Some(cycle), Some(period)),
                Phase::Menstrual
            );
        }
    }
}
