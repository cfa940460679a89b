use crate::core::schedule::{FeeSchedule, TOLL_FREE_FROM, TOLL_FREE_UNTIL};
use chrono::NaiveTime;

/// Evenings and early mornings are never charged
pub fn is_toll_free_time(time: NaiveTime) -> bool {
    time >= TOLL_FREE_FROM || time < TOLL_FREE_UNTIL
}

/// Fee for a passage at the given time of day: the first band whose threshold is at or after it
pub fn fee_at(time: NaiveTime, schedule: &FeeSchedule) -> u32 {
    if is_toll_free_time(time) {
        return 0;
    }
    schedule
        .bands()
        .iter()
        .find(|band| band.until.covers(time))
        .map_or(0, |band| band.fee)
}
