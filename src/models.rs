use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyzer::Outlook;
use crate::error::{EntryError, OverrideError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Menstrual flow logged for a day. Anything but `None` marks a flow day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flow {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
}

impl Flow {
    pub fn is_flow_day(self) -> bool {
        self != Flow::None
    }
}

impl FromStr for Flow {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            // the logging form stores an untouched select as an empty string
            "" | "None" => Ok(Flow::None),
            "Light" => Ok(Flow::Light),
            "Medium" => Ok(Flow::Medium),
            "Heavy" => Ok(Flow::Heavy),
            other => Err(EntryError::UnknownFlow(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    #[serde(rename = "Mood Swings")]
    MoodSwings,
    Nausea,
    #[serde(rename = "Back Pain")]
    BackPain,
    #[serde(rename = "Breast Tenderness")]
    BreastTenderness,
    Fatigue,
    Acne,
    #[serde(rename = "Food Cravings")]
    FoodCravings,
    Insomnia,
    Anxiety,
}

impl Symptom {
    pub const ALL: [Symptom; 12] = [
        Symptom::Cramps,
        Symptom::Headache,
        Symptom::Bloating,
        Symptom::MoodSwings,
        Symptom::Nausea,
        Symptom::BackPain,
        Symptom::BreastTenderness,
        Symptom::Fatigue,
        Symptom::Acne,
        Symptom::FoodCravings,
        Symptom::Insomnia,
        Symptom::Anxiety,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Symptom::Cramps => "Cramps",
            Symptom::Headache => "Headache",
            Symptom::Bloating => "Bloating",
            Symptom::MoodSwings => "Mood Swings",
            Symptom::Nausea => "Nausea",
            Symptom::BackPain => "Back Pain",
            Symptom::BreastTenderness => "Breast Tenderness",
            Symptom::Fatigue => "Fatigue",
            Symptom::Acne => "Acne",
            Symptom::FoodCravings => "Food Cravings",
            Symptom::Insomnia => "Insomnia",
            Symptom::Anxiety => "Anxiety",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Symptom {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.label() == s)
            .ok_or_else(|| EntryError::UnknownSymptom(s.to_string()))
    }
}

/// Free-form fields carried alongside an entry. The analyzer never reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ancillary {
    pub mood: Option<String>,
    pub sleep: Option<String>,
    pub steps: Option<String>,
    pub exercise: Option<String>,
    pub diet: Option<String>,
    pub cervical: Option<String>,
    pub notes: Option<String>,
}

/// A day's record exactly as the data store hands it over.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct EntryRecord {
    pub entry_date: String,
    pub flow: String,
    pub symptoms: Vec<String>,
    pub mood: Option<String>,
    pub sleep: Option<String>,
    pub steps: Option<String>,
    pub exercise: Option<String>,
    pub diet: Option<String>,
    pub cervical: Option<String>,
    pub notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub flow: Flow,
    pub symptoms: Vec<Symptom>,
    #[serde(flatten)]
    pub ancillary: Ancillary,
}

impl Entry {
    pub fn new(date: NaiveDate, flow: Flow) -> Self {
        Self {
            date,
            flow,
            symptoms: Vec::new(),
            ancillary: Ancillary::default(),
        }
    }

    pub fn with_symptoms(mut self, symptoms: impl IntoIterator<Item = Symptom>) -> Self {
        for symptom in symptoms {
            if !self.symptoms.contains(&symptom) {
                self.symptoms.push(symptom);
            }
        }
        self
    }

    pub fn is_flow_day(&self) -> bool {
        self.flow.is_flow_day()
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = EntryError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(record.entry_date.trim(), DATE_FORMAT)
            .map_err(|_| EntryError::MalformedDate(record.entry_date.clone()))?;
        let flow: Flow = record.flow.parse()?;

        let mut symptoms = Vec::with_capacity(record.symptoms.len());
        for raw in &record.symptoms {
            match raw.parse::<Symptom>() {
                Ok(symptom) if !symptoms.contains(&symptom) => symptoms.push(symptom),
                Ok(_) => {}
                Err(e) => tracing::warn!("⚠️ Dropping symptom on {}: {}", date, e),
            }
        }

        Ok(Entry {
            date,
            flow,
            symptoms,
            ancillary: Ancillary {
                mood: record.mood,
                sleep: record.sleep,
                steps: record.steps,
                exercise: record.exercise,
                diet: record.diet,
                cervical: record.cervical,
                notes: record.notes,
            },
        })
    }
}

/// A maximal run of consecutive flow days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

impl Episode {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            duration_days: (end_date - start_date).num_days() + 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.end_date).contains(&date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomCount {
    pub symptom: Symptom,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleStatistics {
    pub average_cycle_length: Option<i64>,
    pub average_period_duration: Option<i64>,
    pub predicted_next_period: Option<NaiveDate>,
    pub predicted_next_ovulation: Option<NaiveDate>,
    pub common_symptoms: Vec<SymptomCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub next_period: NaiveDate,
    pub next_ovulation: NaiveDate,
}

/// One row of the per-cycle history shown on the trends view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleStat {
    pub cycle_number: u32,
    pub start_date: NaiveDate,
    pub period_length: i64,
    /// Days to the next episode start; absent for the ongoing cycle.
    pub cycle_length: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
    Unknown,
}

/// Home view summary for a single day.
#[derive(Debug, Serialize)]
pub struct CycleSummary {
    pub date: NaiveDate,
    pub phase: Phase,
    /// 1-based day of the current cycle, counted from the last episode start.
    pub cycle_day: Option<i64>,
    pub period_expected_in_days: Option<i64>,
    pub outlook: Outlook,
}

#[derive(Debug, Serialize)]
pub struct CycleStatsResponse {
    pub statistics: CycleStatistics,
    pub cycles: Vec<CycleStat>,
}

#[derive(Debug, Serialize)]
pub struct BleedingCycle {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub days: Vec<BleedingDay>,
}

#[derive(Debug, Serialize)]
pub struct BleedingDay {
    pub date: NaiveDate,
    pub intensity: Flow,
}

#[derive(Debug, Serialize)]
pub struct SymptomsByDate {
    pub logged_at: NaiveDate,
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Serialize)]
pub struct SymptomReport {
    pub common: Vec<SymptomCount>,
    pub frequencies: Vec<SymptomCount>,
    pub by_date: Vec<SymptomsByDate>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub phase: Phase,
    pub flow: Option<Flow>,
    pub symptoms: Vec<Symptom>,
}

/// User-entered averages that take over prediction when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ManualOverride {
    pub avg_cycle_length: Option<i32>,
    pub avg_period_duration: Option<i32>,
}

impl ManualOverride {
    pub const MIN_CYCLE_LENGTH: i32 = 21;
    pub const MAX_CYCLE_LENGTH: i32 = 35;

    pub fn new(avg_cycle_length: i32, avg_period_duration: i32) -> Self {
        Self {
            avg_cycle_length: Some(avg_cycle_length),
            avg_period_duration: Some(avg_period_duration),
        }
    }

    /// Both values, if both are present and positive.
    pub fn complete(&self) -> Option<(i64, i64)> {
        match (self.avg_cycle_length, self.avg_period_duration) {
            (Some(cycle), Some(period)) if cycle > 0 && period > 0 => {
                Some((i64::from(cycle), i64::from(period)))
            }
            _ => None,
        }
    }

    /// Checks applied where a user sets the values, not by the analyzer.
    pub fn validate(&self) -> Result<(), OverrideError> {
        let (Some(cycle), Some(period)) = (self.avg_cycle_length, self.avg_period_duration) else {
            return Err(OverrideError::Incomplete);
        };
        if !(Self::MIN_CYCLE_LENGTH..=Self::MAX_CYCLE_LENGTH).contains(&cycle) {
            return Err(OverrideError::CycleLengthOutOfRange(cycle));
        }
        if period <= 0 {
            return Err(OverrideError::NonPositivePeriod(period));
        }
        Ok(())
    }
}
