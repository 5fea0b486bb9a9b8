use chrono::{Days, NaiveDate};

use super::episodes::latest_by_date;
use crate::models::{CycleStat, CycleStatistics, Entry, Episode, Prediction, Symptom, SymptomCount};

/// Days between ovulation and the next period. Fixed; not tuned per user.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

pub const COMMON_SYMPTOM_LIMIT: usize = 5;

/// Integer mean rounded half up.
pub(crate) fn rounded_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as i64;
    let sum: i64 = values.iter().sum();
    Some((2 * sum + n).div_euclid(2 * n))
}

/// Mean gap between consecutive episode starts. Needs two episodes.
pub fn average_cycle_length(episodes: &[Episode]) -> Option<i64> {
    let gaps: Vec<i64> = episodes
        .windows(2)
        .map(|pair| (pair[1].start_date - pair[0].start_date).num_days())
        .collect();
    rounded_mean(&gaps)
}

pub fn average_period_duration(episodes: &[Episode]) -> Option<i64> {
    let durations: Vec<i64> = episodes.iter().map(|e| e.duration_days).collect();
    rounded_mean(&durations)
}

/// Next period and ovulation dates. `None` when the cycle length is not
/// positive or the result falls outside the representable calendar.
pub fn predict_next(last_episode_start: NaiveDate, avg_cycle_length: i64) -> Option<Prediction> {
    let cycle = u64::try_from(avg_cycle_length).ok().filter(|days| *days > 0)?;
    let next_period = last_episode_start.checked_add_days(Days::new(cycle));
    let next_ovulation =
        next_period.and_then(|p| p.checked_sub_days(Days::new(LUTEAL_PHASE_DAYS as u64)));

    match (next_period, next_ovulation) {
        (Some(next_period), Some(next_ovulation)) => Some(Prediction {
            next_period,
            next_ovulation,
        }),
        _ => {
            tracing::warn!(
                "⚠️ Prediction out of range: {} + {} days",
                last_episode_start,
                avg_cycle_length
            );
            None
        }
    }
}

/// Tallies symptoms over every entry, flow day or not. Ties keep the order in
/// which the symptom first shows up walking the entries by date.
pub fn common_symptoms(entries: &[Entry]) -> Vec<SymptomCount> {
    let mut tally: Vec<SymptomCount> = Vec::new();

    for entry in latest_by_date(entries).into_values() {
        for &symptom in &entry.symptoms {
            match tally.iter_mut().find(|c| c.symptom == symptom) {
                Some(count) => count.count += 1,
                None => tally.push(SymptomCount { symptom, count: 1 }),
            }
        }
    }

    // stable: equal counts stay in first-seen order
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(COMMON_SYMPTOM_LIMIT);
    tally
}

/// Historical averages and the prediction they imply. Nothing is defaulted:
/// too few episodes leaves the corresponding fields empty.
pub fn compute_statistics(episodes: &[Episode], entries: &[Entry]) -> CycleStatistics {
    let average_cycle_length = average_cycle_length(episodes);
    let average_period_duration = average_period_duration(episodes);

    let prediction = match (episodes.last(), average_cycle_length) {
        (Some(last), Some(cycle)) => predict_next(last.start_date, cycle),
        _ => None,
    };

    CycleStatistics {
        average_cycle_length,
        average_period_duration,
        predicted_next_period: prediction.map(|p| p.next_period),
        predicted_next_ovulation: prediction.map(|p| p.next_ovulation),
        common_symptoms: common_symptoms(entries),
    }
}

pub fn cycle_history(episodes: &[Episode]) -> Vec<CycleStat> {
    episodes
        .iter()
        .enumerate()
        .map(|(i, episode)| CycleStat {
            cycle_number: (i + 1) as u32,
            start_date: episode.start_date,
            period_length: episode.duration_days,
            cycle_length: episodes
                .get(i + 1)
                .map(|next| (next.start_date - episode.start_date).num_days()),
        })
        .collect()
}

/// How often each symptom was logged, for every known symptom.
pub fn symptom_frequencies(entries: &[Entry]) -> Vec<SymptomCount> {
    let latest = latest_by_date(entries);
    Symptom::ALL
        .into_iter()
        .map(|symptom| SymptomCount {
            symptom,
            count: latest
                .values()
                .filter(|entry| entry.symptoms.contains(&symptom))
                .count() as u32,
        })
        .collect()
}
