use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Entry, Episode};

/// Collapses entries to one per date, keeping the last one seen, in date order.
pub(crate) fn latest_by_date<'a, I>(entries: I) -> BTreeMap<NaiveDate, &'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut by_date = BTreeMap::new();
    for entry in entries {
        by_date.insert(entry.date, entry);
    }
    by_date
}

/// Groups flow days into episodes. Days with no entry count as non-flow days,
/// so two flow days one calendar day apart share an episode and anything
/// further apart starts a new one.
pub fn extract_episodes(entries: &[Entry]) -> Vec<Episode> {
    let flow_days = latest_by_date(entries)
        .into_iter()
        .filter(|(_, entry)| entry.is_flow_day())
        .map(|(date, _)| date);

    let mut episodes = Vec::new();
    let mut current: Option<(NaiveDate, NaiveDate)> = None;

    for date in flow_days {
        current = match current {
            Some((start, end)) if (date - end).num_days() <= 1 => Some((start, date)),
            Some((start, end)) => {
                episodes.push(Episode::new(start, end));
                Some((date, date))
            }
            None => Some((date, date)),
        };
    }

    if let Some((start, end)) = current {
        episodes.push(Episode::new(start, end));
    }

    episodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flow;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_flow_days_no_episodes() {
        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::None),
            Entry::new(day(2024, 1, 6), Flow::None),
        ];
        assert!(extract_episodes(&entries).is_empty());
        assert!(extract_episodes(&[]).is_empty());
    }

    #[test]
    fn single_flow_day() {
        let entries = vec![Entry::new(day(2024, 1, 5), Flow::Light)];
        let episodes = extract_episodes(&entries);
        assert_eq!(episodes, vec![Episode::new(day(2024, 1, 5), day(2024, 1, 5))]);
        assert_eq!(episodes[0].duration_days, 1);
    }

    #[test]
    fn adjacent_flow_days_form_one_episode() {
        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::Heavy),
            Entry::new(day(2024, 1, 6), Flow::Medium),
        ];
        let episodes = extract_episodes(&entries);
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].start_date, day(2024, 1, 5));
        assert_eq!(episodes[0].end_date, day(2024, 1, 6));
        assert_eq!(episodes[0].duration_days, 2);
    }

    #[test]
    fn missing_day_splits_episodes() {
        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::Heavy),
            Entry::new(day(2024, 1, 7), Flow::Light),
        ];
        let episodes = extract_episodes(&entries);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[1].start_date, day(2024, 1, 7));
    }

    #[test]
    fn explicit_none_entry_between_flow_days_does_not_bridge() {
        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::Heavy),
            Entry::new(day(2024, 1, 6), Flow::None),
            Entry::new(day(2024, 1, 7), Flow::Light),
        ];
        assert_eq!(extract_episodes(&entries).len(), 2);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let entries = vec![
            Entry::new(day(2024, 1, 30), Flow::Light),
            Entry::new(day(2024, 1, 2), Flow::Medium),
            Entry::new(day(2024, 1, 29), Flow::Heavy),
            Entry::new(day(2024, 1, 1), Flow::Heavy),
        ];
        let episodes = extract_episodes(&entries);
        assert_eq!(
            episodes,
            vec![
                Episode::new(day(2024, 1, 1), day(2024, 1, 2)),
                Episode::new(day(2024, 1, 29), day(2024, 1, 30)),
            ]
        );
    }

    #[test]
    fn duplicate_date_last_write_wins() {
        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::Heavy),
            Entry::new(day(2024, 1, 5), Flow::None),
        ];
        assert!(extract_episodes(&entries).is_empty());

        let entries = vec![
            Entry::new(day(2024, 1, 5), Flow::None),
            Entry::new(day(2024, 1, 5), Flow::Light),
            Entry::new(day(2024, 1, 6), Flow::Light),
        ];
        let episodes = extract_episodes(&entries);
        assert_eq!(episodes, vec![Episode::new(day(2024, 1, 5), day(2024, 1, 6))]);
    }

    #[test]
    fn episode_spanning_month_boundary() {
        let entries = vec![
            Entry::new(day(2024, 1, 31), Flow::Heavy),
            Entry::new(day(2024, 2, 1), Flow::Heavy),
            Entry::new(day(2024, 2, 2), Flow::Light),
        ];
        let episodes = extract_episodes(&entries);
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].duration_days, 3);
    }
}
