use super::vehicle::Vehicle;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

const TOLL_FREE_VEHICLES: &[&str] = &[
    "motorcycle",
    "tractor",
    "emergency",
    "diplomat",
    "foreign",
    "military",
];

/// Vehicle types and calendar dates that are exempt from congestion tax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExemptionRegistry {
    /// Vehicle type labels, matched ignoring ASCII case
    #[serde(default, deserialize_with = "deserialize_vehicle_types")]
    #[schemars(with = "BTreeSet<String>")]
    vehicle_types: BTreeSet<String>,
    /// Holidays. Not applied when calculating tax.
    #[serde(default)]
    dates: BTreeSet<NaiveDate>,
}

impl ExemptionRegistry {
    pub fn new<I, S>(vehicle_types: I, dates: impl IntoIterator<Item = NaiveDate>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExemptionRegistry {
            vehicle_types: vehicle_types
                .into_iter()
                .map(|label| label.as_ref().to_ascii_lowercase())
                .collect(),
            dates: dates.into_iter().collect(),
        }
    }

    /// An absent vehicle is never toll free
    pub fn is_toll_free_vehicle(&self, vehicle: Option<&Vehicle>) -> bool {
        vehicle.is_some_and(|v| self.is_toll_free_type(v.vehicle_type()))
    }

    pub fn is_toll_free_type(&self, vehicle_type: &str) -> bool {
        self.vehicle_types
            .contains(&vehicle_type.to_ascii_lowercase())
    }

    pub fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn vehicle_types(&self) -> impl Iterator<Item = &str> {
        self.vehicle_types.iter().map(String::as_str)
    }
}

impl Default for ExemptionRegistry {
    fn default() -> Self {
        let dates = [(2013, 1, 1), (2013, 3, 28), (2013, 3, 29)]
            .into_iter()
            .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        ExemptionRegistry::new(TOLL_FREE_VEHICLES, dates)
    }
}

fn deserialize_vehicle_types<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Vec::<String>::deserialize(deserializer)?;
    Ok(labels.iter().map(|l| l.to_ascii_lowercase()).collect())
}
