//! Soil heuristic models
//!
//! Synthetic soil properties derived from a location. The estimate is a
//! climate-zone baseline modulated by the sine/cosine of the longitude; it is
//! deterministic and involves no lookups.

use serde::{Deserialize, Serialize};

use crate::types::{round2, Coordinates};

/// Latitude (absolute, degrees) up to and including which a location is tropical
pub const TROPICAL_LATITUDE_LIMIT: f64 = 23.5;

/// Latitude (absolute, degrees) above which a location is boreal
pub const BOREAL_LATITUDE_LIMIT: f64 = 60.0;

/// Broad climate zone derived from latitude alone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Tropical,
    Temperate,
    Boreal,
}

impl ClimateZone {
    /// Classify a latitude: `|lat| <= 23.5` tropical, `|lat| > 60` boreal
    pub fn from_latitude(latitude: f64) -> Self {
        let abs_lat = latitude.abs();
        if abs_lat <= TROPICAL_LATITUDE_LIMIT {
            ClimateZone::Tropical
        } else if abs_lat > BOREAL_LATITUDE_LIMIT {
            ClimateZone::Boreal
        } else {
            ClimateZone::Temperate
        }
    }

    /// Baseline constants and longitude coefficients for this zone
    pub fn coefficients(&self) -> SoilCoefficients {
        match self {
            ClimateZone::Tropical => SoilCoefficients {
                base_ph: 5.5,
                coef_ph: 0.2,
                base_organic_carbon: 1.2,
                coef_organic_carbon: 0.2,
                base_nitrogen: 0.10,
                coef_nitrogen: 0.01,
            },
            ClimateZone::Temperate => SoilCoefficients {
                base_ph: 6.5,
                coef_ph: 0.15,
                base_organic_carbon: 2.0,
                coef_organic_carbon: 0.3,
                base_nitrogen: 0.15,
                coef_nitrogen: 0.02,
            },
            ClimateZone::Boreal => SoilCoefficients {
                base_ph: 5.8,
                coef_ph: 0.1,
                base_organic_carbon: 1.8,
                coef_organic_carbon: 0.2,
                base_nitrogen: 0.13,
                coef_nitrogen: 0.015,
            },
        }
    }
}

impl std::fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClimateZone::Tropical => write!(f, "tropical"),
            ClimateZone::Temperate => write!(f, "temperate"),
            ClimateZone::Boreal => write!(f, "boreal"),
        }
    }
}

/// Per-zone constants of the soil heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilCoefficients {
    pub base_ph: f64,
    pub coef_ph: f64,
    pub base_organic_carbon: f64,
    pub coef_organic_carbon: f64,
    pub base_nitrogen: f64,
    pub coef_nitrogen: f64,
}

/// Estimated topsoil properties, each rounded to two decimals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilEstimate {
    pub ph: f64,
    /// Organic carbon, percent
    pub organic_carbon: f64,
    /// Total nitrogen, percent
    pub nitrogen: f64,
}

/// Estimate soil properties for a latitude/longitude pair
pub fn estimate_soil(latitude: f64, longitude: f64) -> SoilEstimate {
    let c = ClimateZone::from_latitude(latitude).coefficients();
    let lon_rad = longitude.to_radians();
    let lon_mod = lon_rad.sin();
    let lon_cos = lon_rad.cos();

    SoilEstimate {
        ph: round2(c.base_ph + c.coef_ph * lon_mod),
        organic_carbon: round2(c.base_organic_carbon + c.coef_organic_carbon * lon_cos),
        nitrogen: round2(c.base_nitrogen + c.coef_nitrogen * lon_mod),
    }
}

impl From<Coordinates> for SoilEstimate {
    fn from(c: Coordinates) -> Self {
        estimate_soil(c.latitude, c.longitude)
    }
}
