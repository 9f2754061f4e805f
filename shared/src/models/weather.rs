//! Weather models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Coordinates;

/// Maximum stored city name length, in characters
pub const MAX_CITY_LEN: u64 = 120;

/// Current conditions for a named place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// °C
    pub temperature: Option<f64>,
    /// %
    pub humidity: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CurrentConditions {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Most recently saved weather city
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedCity {
    pub last_city: String,
    pub updated_at: DateTime<Utc>,
}

/// Input for saving the last searched city
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveCityInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "City name is required and must be <= 120 chars"))]
    pub city: String,
}

impl SaveCityInput {
    /// Trim surrounding whitespace before validation
    pub fn normalized(self) -> Self {
        Self {
            city: self.city.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_validation() {
        let ok = SaveCityInput {
            city: "  Kolkata ".to_string(),
        }
        .normalized();
        assert_eq!(ok.city, "Kolkata");
        assert!(ok.validate().is_ok());

        let empty = SaveCityInput { city: "   ".to_string() }.normalized();
        assert!(empty.validate().is_err());

        let long = SaveCityInput {
            city: "x".repeat(MAX_CITY_LEN as usize + 1),
        };
        assert!(long.validate().is_err());
    }
}
