use crate::core::config::TaxConfig;
use crate::core::schedule::FeeSchedule;
use crate::core::vehicle::Vehicle;
use crate::tax::fee::fee_at;
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

/// Why a day was charged nothing without looking at its passages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExemptReason {
    TollFreeVehicle,
    UnknownCity,
}

impl std::fmt::Display for ExemptReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExemptReason::TollFreeVehicle => write!(f, "toll-free vehicle"),
            ExemptReason::UnknownCity => write!(f, "unknown city"),
        }
    }
}

/// How a single passage changed the day's running total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageCharge {
    pub timestamp: NaiveDateTime,
    /// Fee looked up for this passage on its own
    pub fee: u32,
    /// 1-based index of the charging window the passage belongs to
    pub window: usize,
    /// Merged into the window opened by an earlier passage
    pub merged: bool,
    /// Uncapped total after this passage
    pub running_total: u32,
}

/// Tax for one vehicle on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTax {
    pub city: String,
    pub total: u32,
    pub uncapped_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exempt: Option<ExemptReason>,
    pub charges: Vec<PassageCharge>,
}

impl DailyTax {
    fn zero(city: &str, exempt: Option<ExemptReason>) -> Self {
        DailyTax {
            city: city.to_string(),
            total: 0,
            uncapped_total: 0,
            exempt,
            charges: Vec::new(),
        }
    }

    pub fn is_capped(&self) -> bool {
        self.uncapped_total > self.total
    }
}

/// Window state carried from one passage to the next
struct Anchor {
    timestamp: NaiveDateTime,
    fee: u32,
}

/// Computes the daily congestion tax against a read-only configuration
#[derive(Debug, Clone, Copy)]
pub struct TaxAggregator<'a> {
    config: &'a TaxConfig,
}

impl<'a> TaxAggregator<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        TaxAggregator { config }
    }

    /// Total tax for a day of passages, which must be chronological and share one date
    pub fn calculate_total_tax(
        &self,
        vehicle: Option<&Vehicle>,
        passages: &[NaiveDateTime],
        city: &str,
    ) -> u32 {
        self.assess(vehicle, passages, city).total
    }

    /// As `calculate_total_tax`, keeping the per-passage breakdown
    pub fn assess(
        &self,
        vehicle: Option<&Vehicle>,
        passages: &[NaiveDateTime],
        city: &str,
    ) -> DailyTax {
        if self.config.exemptions.is_toll_free_vehicle(vehicle) {
            return DailyTax::zero(city, Some(ExemptReason::TollFreeVehicle));
        }
        let Some(schedule) = self.config.cities.get(city) else {
            return DailyTax::zero(city, Some(ExemptReason::UnknownCity));
        };
        if passages.is_empty() {
            return DailyTax::zero(city, None);
        }

        let charges = self.charge_windows(passages, schedule);
        let uncapped_total = charges.last().map_or(0, |c| c.running_total);
        let total = uncapped_total.min(self.config.daily_maximum);
        if total < uncapped_total {
            log::debug!(
                "{}: total {} capped at daily maximum {}",
                city,
                uncapped_total,
                self.config.daily_maximum
            );
        }

        DailyTax {
            city: city.to_string(),
            total,
            uncapped_total,
            exempt: None,
            charges,
        }
    }

    /// Each passage is compared with the one before it, so close passages chain into one
    /// window. Within a window the previous passage's contribution is replaced by the larger
    /// of the two fees.
    fn charge_windows(
        &self,
        passages: &[NaiveDateTime],
        schedule: &FeeSchedule,
    ) -> Vec<PassageCharge> {
        // Unvalidated configs with an unusable window merge every passage
        let window_length = self.config.window().unwrap_or(TimeDelta::MAX);
        let mut charges = Vec::with_capacity(passages.len());
        let mut total: u32 = 0;
        let mut window = 1;
        let mut anchor = Anchor {
            timestamp: passages[0],
            fee: fee_at(passages[0].time(), schedule),
        };

        for (i, &timestamp) in passages.iter().enumerate() {
            let fee = fee_at(timestamp.time(), schedule);
            let within_window = timestamp - anchor.timestamp <= window_length;

            if within_window {
                if total > 0 {
                    total = total.saturating_sub(anchor.fee);
                }
                total = total.saturating_add(anchor.fee.max(fee));
            } else {
                window += 1;
                total = total.saturating_add(fee);
            }

            log::debug!(
                "Passage {} fee {} window {}{}: total {}",
                timestamp,
                fee,
                window,
                if within_window && i > 0 { " (merged)" } else { "" },
                total
            );

            charges.push(PassageCharge {
                timestamp,
                fee,
                window,
                merged: within_window && i > 0,
                running_total: total,
            });
            anchor = Anchor { timestamp, fee };
        }

        charges
    }
}
