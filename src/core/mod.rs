pub mod city;
pub mod config;
pub mod exemption;
pub mod passage;
pub mod schedule;
pub mod vehicle;

// Flat public surface for configuration and input types.
pub use city::CityRegistry;
pub use config::{ConfigError, TaxConfig};
pub use exemption::ExemptionRegistry;
pub use passage::{group_by_day, parse_timestamp, DayPassages, PassageError, PassageRecord};
pub use schedule::{FeeBand, FeeSchedule, ScheduleError, Threshold, TOLL_FREE_FROM, TOLL_FREE_UNTIL};
pub use vehicle::Vehicle;
