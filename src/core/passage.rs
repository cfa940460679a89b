use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PassageError {
    #[error("passages out of order: {later} recorded before {earlier}")]
    OutOfOrder {
        earlier: NaiveDateTime,
        later: NaiveDateTime,
    },
    #[error("passages span more than one day: {first} and {other}")]
    MixedDates { first: NaiveDate, other: NaiveDate },
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// One vehicle's passages for a single calendar day, in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPassages {
    passages: Vec<NaiveDateTime>,
}

impl DayPassages {
    pub fn new(passages: Vec<NaiveDateTime>) -> Result<Self, PassageError> {
        if let Some(first) = passages.first() {
            if let Some(other) = passages.iter().find(|p| p.date() != first.date()) {
                return Err(PassageError::MixedDates {
                    first: first.date(),
                    other: other.date(),
                });
            }
        }
        if let Some(pair) = passages.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(PassageError::OutOfOrder {
                earlier: pair[1],
                later: pair[0],
            });
        }
        Ok(DayPassages { passages })
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.passages.first().map(NaiveDateTime::date)
    }
}

impl Deref for DayPassages {
    type Target = [NaiveDateTime];

    fn deref(&self) -> &Self::Target {
        &self.passages
    }
}

/// CSV record format for recorded passages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageRecord {
    pub timestamp: String,
}

/// Parse "2013-02-08T06:27:00", "2013-02-08 06:27:00" or either without seconds
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, PassageError> {
    let s = s.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| PassageError::InvalidTimestamp(s.to_string()))
}

/// Split records into per-day chronological passage lists
pub fn group_by_day(
    records: &[PassageRecord],
) -> Result<BTreeMap<NaiveDate, DayPassages>, PassageError> {
    let mut days: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
    for record in records {
        let timestamp = parse_timestamp(&record.timestamp)?;
        days.entry(timestamp.date()).or_default().push(timestamp);
    }

    days.into_iter()
        .map(|(date, mut passages)| {
            passages.sort();
            DayPassages::new(passages).map(|day| (date, day))
        })
        .collect()
}
