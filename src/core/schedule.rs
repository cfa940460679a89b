use chrono::NaiveTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Start of the daily toll-free period (inclusive)
pub const TOLL_FREE_FROM: NaiveTime = match NaiveTime::from_hms_opt(18, 30, 0) {
    Some(t) => t,
    None => panic!("invalid toll-free start"),
};

/// End of the daily toll-free period (exclusive), wrapping past midnight
pub const TOLL_FREE_UNTIL: NaiveTime = match NaiveTime::from_hms_opt(6, 0, 0) {
    Some(t) => t,
    None => panic!("invalid toll-free end"),
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("fee schedule has no bands")]
    Empty,
    #[error("thresholds must be strictly ascending: {previous} then {next}")]
    NotAscending { previous: Threshold, next: Threshold },
    #[error("final threshold must be 24:00, found {0}")]
    MissingEndOfDay(Threshold),
    #[error("end of day band must charge 0, found {0}")]
    EndOfDayFee(u32),
    #[error("invalid threshold '{0}', expected HH:MM, HH:MM:SS or 24:00")]
    InvalidThreshold(String),
}

/// Upper bound (inclusive) of a fee band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Threshold {
    Time(NaiveTime),
    /// Sentinel covering the remainder of the day
    EndOfDay,
}

impl Threshold {
    /// `hm(24, 0)` is the end of day
    ///
    /// # Panics
    ///
    /// If `hour:min` is neither a valid time of day nor 24:00.
    pub fn hm(hour: u32, min: u32) -> Self {
        match (hour, min) {
            (24, 0) => Threshold::EndOfDay,
            _ => match NaiveTime::from_hms_opt(hour, min, 0) {
                Some(time) => Threshold::Time(time),
                None => panic!("invalid threshold {:02}:{:02}", hour, min),
            },
        }
    }

    /// Whether a time of day falls at or before this threshold
    pub fn covers(&self, time: NaiveTime) -> bool {
        match self {
            Threshold::Time(until) => time <= *until,
            Threshold::EndOfDay => true,
        }
    }
}

impl std::str::FromStr for Threshold {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "24:00" || s == "24:00:00" {
            return Ok(Threshold::EndOfDay);
        }
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Threshold::Time)
            .map_err(|_| ScheduleError::InvalidThreshold(s.to_string()))
    }
}

impl TryFrom<String> for Threshold {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Threshold> for String {
    fn from(threshold: Threshold) -> Self {
        threshold.to_string()
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Threshold::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Threshold::EndOfDay => write!(f, "24:00:00"),
        }
    }
}

/// A fee charged for passages at or before `until` (and after the previous band)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeeBand {
    /// Upper bound of the band, "HH:MM[:SS]" or "24:00"
    #[schemars(with = "String")]
    pub until: Threshold,
    pub fee: u32,
}

impl FeeBand {
    pub fn new(until: Threshold, fee: u32) -> Self {
        FeeBand { until, fee }
    }
}

/// Ordered time-of-day fee table for one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FeeSchedule {
    bands: Vec<FeeBand>,
}

impl FeeSchedule {
    pub fn new(bands: Vec<FeeBand>) -> Result<Self, ScheduleError> {
        let schedule = FeeSchedule { bands };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the band invariants. Deserialized schedules are validated by the config loader.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let last = self.bands.last().ok_or(ScheduleError::Empty)?;
        for pair in self.bands.windows(2) {
            if pair[0].until >= pair[1].until {
                return Err(ScheduleError::NotAscending {
                    previous: pair[0].until,
                    next: pair[1].until,
                });
            }
        }
        if last.until != Threshold::EndOfDay {
            return Err(ScheduleError::MissingEndOfDay(last.until));
        }
        if last.fee != 0 {
            return Err(ScheduleError::EndOfDayFee(last.fee));
        }
        Ok(())
    }

    pub fn bands(&self) -> &[FeeBand] {
        &self.bands
    }

    /// Gothenburg reference schedule
    pub fn gothenburg() -> Self {
        Self::standard([8, 13, 18, 13, 13, 18, 13, 8])
    }

    /// Stockholm reference schedule
    pub fn stockholm() -> Self {
        Self::standard([10, 15, 20, 15, 15, 20, 15, 10])
    }

    /// Both reference cities share thresholds and differ only in fees
    fn standard(fees: [u32; 8]) -> Self {
        let thresholds = [
            Threshold::hm(6, 0),
            Threshold::hm(6, 30),
            Threshold::hm(7, 0),
            Threshold::hm(8, 0),
            Threshold::hm(15, 0),
            Threshold::hm(15, 30),
            Threshold::hm(17, 0),
            Threshold::hm(18, 0),
        ];
        let mut bands: Vec<FeeBand> = thresholds
            .into_iter()
            .zip(fees)
            .map(|(until, fee)| FeeBand::new(until, fee))
            .collect();
        bands.push(FeeBand::new(Threshold::EndOfDay, 0));
        FeeSchedule { bands }
    }
}
