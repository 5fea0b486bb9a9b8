//! Cycle statistics derived from a snapshot of logged entries.
//!
//! Everything here is pure: callers fetch entries, hand them over, and get
//! episodes, averages, predictions and phases back. Nothing is cached
//! between calls.

mod episodes;
mod phase;
mod statistics;

pub use episodes::extract_episodes;
pub use phase::{classify_phase, DEFAULT_PERIOD_DURATION};
pub use statistics::{
    average_cycle_length, average_period_duration, common_symptoms, compute_statistics,
    cycle_history, predict_next, symptom_frequencies, COMMON_SYMPTOM_LIMIT, LUTEAL_PHASE_DAYS,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    CycleStat, CycleStatistics, Entry, EntryRecord, Episode, ManualOverride, Phase, Prediction,
    SymptomCount,
};

/// Parses store records into entries, one per date, sorted by date.
///
/// Records that cannot be parsed are skipped so one bad record does not hide
/// the rest of a user's history. Repeated dates keep the later record.
pub fn normalize_entries<I>(records: I) -> Vec<Entry>
where
    I: IntoIterator<Item = EntryRecord>,
{
    let entries: Vec<Entry> = records
        .into_iter()
        .filter_map(|record| match Entry::try_from(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("⚠️ Skipping entry: {}", e);
                None
            }
        })
        .collect();
    dedup_sorted(entries)
}

fn dedup_sorted(entries: Vec<Entry>) -> Vec<Entry> {
    let mut by_date = std::collections::BTreeMap::new();
    for entry in entries {
        by_date.insert(entry.date, entry);
    }
    by_date.into_values().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageSource {
    Computed,
    Manual,
}

/// Averages in effect for prediction and the prediction they give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outlook {
    pub avg_cycle_length: Option<i64>,
    pub avg_period_duration: Option<i64>,
    pub source: AverageSource,
    pub last_period_start: Option<NaiveDate>,
    pub prediction: Option<Prediction>,
}

/// One user's entries and the episodes derived from them.
#[derive(Debug, Clone, Default)]
pub struct CycleAnalyzer {
    entries: Vec<Entry>,
    episodes: Vec<Episode>,
}

impl CycleAnalyzer {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let entries = dedup_sorted(entries.into_iter().collect());
        let episodes = extract_episodes(&entries);
        tracing::debug!(entries = entries.len(), episodes = episodes.len(), "analyzed snapshot");
        Self { entries, episodes }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EntryRecord>,
    {
        Self::new(normalize_entries(records))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn entry_on(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries
            .binary_search_by_key(&date, |entry| entry.date)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Entries whose date falls within the episode.
    pub fn entries_in(&self, episode: &Episode) -> &[Entry] {
        let from = self.entries.partition_point(|e| e.date < episode.start_date);
        let to = self.entries.partition_point(|e| e.date <= episode.end_date);
        &self.entries[from..to]
    }

    pub fn statistics(&self) -> CycleStatistics {
        compute_statistics(&self.episodes, &self.entries)
    }

    pub fn cycle_history(&self) -> Vec<CycleStat> {
        cycle_history(&self.episodes)
    }

    pub fn symptom_frequencies(&self) -> Vec<SymptomCount> {
        symptom_frequencies(&self.entries)
    }

    /// Resolves the averages used for prediction. A complete manual override
    /// replaces both computed averages; historical statistics are untouched.
    pub fn outlook(&self, manual: Option<&ManualOverride>) -> Outlook {
        let (avg_cycle_length, avg_period_duration, source) =
            match manual.and_then(ManualOverride::complete) {
                Some((cycle, period)) => (Some(cycle), Some(period), AverageSource::Manual),
                None => (
                    average_cycle_length(&self.episodes),
                    average_period_duration(&self.episodes),
                    AverageSource::Computed,
                ),
            };

        let last_period_start = self.episodes.last().map(|e| e.start_date);
        let prediction = match (last_period_start, avg_cycle_length) {
            (Some(start), Some(cycle)) => predict_next(start, cycle),
            _ => None,
        };

        Outlook {
            avg_cycle_length,
            avg_period_duration,
            source,
            last_period_start,
            prediction,
        }
    }

    pub fn phase_on(&self, date: NaiveDate, manual: Option<&ManualOverride>) -> Phase {
        let outlook = self.outlook(manual);
        self.phase_with(date, &outlook)
    }

    /// Same as [`phase_on`](Self::phase_on) with averages already resolved.
    pub fn phase_with(&self, date: NaiveDate, outlook: &Outlook) -> Phase {
        classify_phase(
            date,
            &self.entries,
            outlook.avg_cycle_length,
            outlook.avg_period_duration,
        )
    }
}
