use super::schedule::FeeSchedule;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cities with a congestion tax, keyed by exact (case-sensitive) name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CityRegistry {
    cities: BTreeMap<String, FeeSchedule>,
}

impl CityRegistry {
    pub fn new() -> Self {
        CityRegistry {
            cities: BTreeMap::new(),
        }
    }

    pub fn with_city(mut self, name: impl Into<String>, schedule: FeeSchedule) -> Self {
        self.cities.insert(name.into(), schedule);
        self
    }

    pub fn get(&self, city: &str) -> Option<&FeeSchedule> {
        self.cities.get(city)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    pub fn cities(&self) -> impl Iterator<Item = (&str, &FeeSchedule)> {
        self.cities.iter().map(|(name, schedule)| (name.as_str(), schedule))
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        CityRegistry::new()
            .with_city("Gothenburg", FeeSchedule::gothenburg())
            .with_city("Stockholm", FeeSchedule::stockholm())
    }
}
