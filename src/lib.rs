pub mod core;
pub mod tax;

pub use crate::core::{
    CityRegistry, ConfigError, DayPassages, ExemptionRegistry, FeeBand, FeeSchedule,
    PassageError, PassageRecord, ScheduleError, TaxConfig, Threshold, Vehicle,
};
pub use crate::tax::{fee_at, DailyTax, ExemptReason, PassageCharge, TaxAggregator};
