use thiserror::Error;

/// Reasons a stored record cannot take part in analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("malformed entry date '{0}' (expected YYYY-MM-DD)")]
    MalformedDate(String),

    #[error("unknown flow value '{0}'")]
    UnknownFlow(String),

    #[error("unknown symptom '{0}'")]
    UnknownSymptom(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverrideError {
    #[error("both average cycle length and average period duration are required")]
    Incomplete,

    #[error("average cycle length must be between 21 and 35 days, got {0}")]
    CycleLengthOutOfRange(i32),

    #[error("average period duration must be positive, got {0}")]
    NonPositivePeriod(i32),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store lock poisoned")]
    Poisoned,
}
