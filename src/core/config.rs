use super::city::CityRegistry;
use super::exemption::ExemptionRegistry;
use super::schedule::ScheduleError;
use chrono::TimeDelta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DEFAULT_DAILY_MAXIMUM: u32 = 60;
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid fee schedule for {city}: {source}")]
    Schedule {
        city: String,
        #[source]
        source: ScheduleError,
    },
    #[error("window must be a positive number of minutes within chrono's range, found {0}")]
    Window(i64),
}

/// Read-only tax configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxConfig {
    /// Cap on the total charged for one vehicle on one day
    #[serde(default = "default_daily_maximum")]
    pub daily_maximum: u32,
    /// Passages this close to the previous one are charged once
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
    /// Fee schedule per city
    #[serde(default)]
    pub cities: CityRegistry,
    #[serde(default)]
    pub exemptions: ExemptionRegistry,
}

fn default_daily_maximum() -> u32 {
    DEFAULT_DAILY_MAXIMUM
}

fn default_window_minutes() -> i64 {
    DEFAULT_WINDOW_MINUTES
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            daily_maximum: DEFAULT_DAILY_MAXIMUM,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            cities: CityRegistry::default(),
            exemptions: ExemptionRegistry::default(),
        }
    }
}

impl TaxConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let config: TaxConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        log::debug!(
            "Loaded config: {} cities, daily maximum {}, window {} min",
            config.cities.cities().count(),
            config.daily_maximum,
            config.window_minutes
        );
        Ok(config)
    }

    /// Charging window length, if `window_minutes` is positive and representable
    pub fn window(&self) -> Option<TimeDelta> {
        if self.window_minutes < 1 {
            return None;
        }
        TimeDelta::try_minutes(self.window_minutes)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window()
            .ok_or(ConfigError::Window(self.window_minutes))?;
        for (city, schedule) in self.cities.cities() {
            schedule.validate().map_err(|source| ConfigError::Schedule {
                city: city.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::FeeSchedule;

    #[test]
    fn empty_object_gives_reference_config() {
        let config = TaxConfig::from_reader(r#"{}"#.as_bytes()).unwrap();
        assert_eq!(config, TaxConfig::default());
    }

    #[test]
    fn reference_config_round_trips_through_json() {
        let json = serde_json::to_string(&TaxConfig::default()).unwrap();
        let config = TaxConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config, TaxConfig::default());
    }

    #[test]
    fn custom_city_and_cap() {
        let json = r#"{
            "daily_maximum": 100,
            "cities": {
                "Uppsala": [
                    {"until": "07:00", "fee": 12},
                    {"until": "18:00", "fee": 9},
                    {"until": "24:00", "fee": 0}
                ]
            },
            "exemptions": {"vehicle_types": ["bus"]}
        }"#;
        let config = TaxConfig::from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.daily_maximum, 100);
        assert_eq!(config.window_minutes, 60);
        assert!(config.cities.contains("Uppsala"));
        assert!(!config.cities.contains("Gothenburg"));
        assert!(config.exemptions.is_toll_free_type("bus"));
        assert!(!config.exemptions.is_toll_free_type("motorcycle"));
    }

    #[test]
    fn invalid_schedule_names_city() {
        let json = r#"{"cities": {"Uppsala": [{"until": "07:00", "fee": 12}]}}"#;
        let err = TaxConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Schedule { ref city, .. } if city == "Uppsala"));
        assert_eq!(
            err.to_string(),
            "invalid fee schedule for Uppsala: final threshold must be 24:00, found 07:00:00"
        );
    }

    #[test]
    fn bad_threshold_is_a_parse_error() {
        let json = r#"{"cities": {"Uppsala": [{"until": "7 o'clock", "fee": 12}]}}"#;
        let err = TaxConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn zero_window_rejected() {
        let err = TaxConfig::from_reader(r#"{"window_minutes": 0}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Window(0)));
    }

    #[test]
    fn out_of_range_window_rejected() {
        let json = r#"{"window_minutes": 200000000000000}"#;
        let err = TaxConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Window(200_000_000_000_000)));

        let config = TaxConfig {
            window_minutes: i64::MAX,
            ..TaxConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.window(), None);
    }

    #[test]
    fn holidays_only_exemptions() {
        let json = r#"{"exemptions": {"dates": ["2013-12-25"]}}"#;
        let config = TaxConfig::from_reader(json.as_bytes()).unwrap();
        let christmas = chrono::NaiveDate::from_ymd_opt(2013, 12, 25).unwrap();

        assert!(config.exemptions.is_toll_free_date(christmas));
        // The block replaces the built-in exemptions as a whole
        assert_eq!(config.exemptions.vehicle_types().count(), 0);
        assert!(!config.exemptions.is_toll_free_type("motorcycle"));
    }

    #[test]
    fn validate_accepts_programmatic_config() {
        let mut config = TaxConfig::default();
        config.cities = CityRegistry::new().with_city("Stockholm", FeeSchedule::stockholm());
        assert!(config.validate().is_ok());
    }
}
