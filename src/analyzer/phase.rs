use chrono::NaiveDate;

use super::episodes::latest_by_date;
use crate::models::{Entry, Phase};

/// Period length assumed when classifying without a known average.
pub const DEFAULT_PERIOD_DURATION: i64 = 5;

const OVULATION_START_DAY: i64 = 14;
const OVULATION_END_DAY: i64 = 16;

/// Places `date` in the cycle. A logged flow day is always menstrual; other
/// days are banded by their offset from the latest flow day on or before
/// them, wrapped by the average cycle length.
pub fn classify_phase(
    date: NaiveDate,
    entries: &[Entry],
    avg_cycle_length: Option<i64>,
    avg_period_duration: Option<i64>,
) -> Phase {
    let Some(cycle_length) = avg_cycle_length.filter(|len| *len > 0) else {
        return Phase::Unknown;
    };

    let by_date = latest_by_date(entries);
    if by_date.get(&date).is_some_and(|entry| entry.is_flow_day()) {
        return Phase::Menstrual;
    }

    let Some(anchor) = by_date
        .range(..=date)
        .rev()
        .find(|(_, entry)| entry.is_flow_day())
        .map(|(anchor, _)| *anchor)
    else {
        return Phase::Unknown;
    };

    let days_since_last_period = (date - anchor).num_days();
    let cycle_day = days_since_last_period.rem_euclid(cycle_length);
    let period_duration = avg_period_duration
        .filter(|len| *len > 0)
        .unwrap_or(DEFAULT_PERIOD_DURATION);

    band(cycle_day, period_duration)
}

fn band(cycle_day: i64, period_duration: i64) -> Phase {
    if cycle_day < period_duration {
        Phase::Menstrual
    } else if cycle_day < OVULATION_START_DAY {
        Phase::Follicular
    } else if cycle_day < OVULATION_END_DAY {
        Phase::Ovulatory
    } else {
        Phase::Luteal
    }
}
