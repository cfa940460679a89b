use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A vehicle as classified by the caller (e.g. "car", "motorcycle", "emergency")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Vehicle {
    vehicle_type: String,
}

impl Vehicle {
    pub fn new(vehicle_type: impl Into<String>) -> Self {
        Vehicle {
            vehicle_type: vehicle_type.into(),
        }
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.vehicle_type)
    }
}
