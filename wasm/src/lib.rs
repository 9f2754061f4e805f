//! WebAssembly module for the Agritech Hub platform
//!
//! Provides client-side computation for:
//! - Soil estimation from coordinates
//! - Crop suitability scoring
//! - Climate zone lookup

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("agritech wasm module loaded"));
}

/// The heuristic is periodic in longitude and symmetric in latitude, so any finite pair works
fn finite_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if latitude.is_finite() && longitude.is_finite() {
        Ok(())
    } else {
        Err("Coordinates must be finite numbers")
    }
}

/// Estimate soil properties, returned as `{ph, organicCarbon, nitrogen}` JSON
#[wasm_bindgen]
pub fn estimate_soil_json(latitude: f64, longitude: f64) -> Result<String, JsValue> {
    finite_coordinates(latitude, longitude).map_err(JsValue::from_str)?;
    let soil = estimate_soil(latitude, longitude);
    serde_json::to_string(&soil).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Climate zone name for a latitude
#[wasm_bindgen]
pub fn climate_zone(latitude: f64) -> String {
    ClimateZone::from_latitude(latitude).to_string()
}

/// Score all crops against a condition vector JSON using the default policy
#[wasm_bindgen]
pub fn recommend_crops_json(conditions_json: &str) -> Result<String, JsValue> {
    let conditions: ConditionVector = serde_json::from_str(conditions_json).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str("recommend_crops_json: invalid conditions"));
        JsValue::from_str(&format!("Invalid conditions JSON: {}", e))
    })?;

    let results = recommend_crops(CROP_PROFILES, &conditions, RecommendationPolicy::DEFAULT);
    serde_json::to_string(&results).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suitability score of one crop, or -1 if the crop is unknown
#[wasm_bindgen]
pub fn crop_score(
    crop: &str,
    temperature: f64,
    humidity: f64,
    ph: f64,
    organic_carbon: f64,
    nitrogen: f64,
) -> i32 {
    let Some(profile) = find_crop_profile(crop) else {
        return -1;
    };
    let conditions = ConditionVector {
        temperature,
        humidity,
        ph,
        organic_carbon,
        nitrogen,
        rainfall: None,
    };
    profile.suitability_score(&conditions) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_zone_names() {
        assert_eq!(climate_zone(10.0), "tropical");
        assert_eq!(climate_zone(45.0), "temperate");
        assert_eq!(climate_zone(-70.0), "boreal");
    }

    #[test]
    fn test_soil_accepts_any_finite_coordinates() {
        let json = estimate_soil_json(120.0, 400.0).unwrap();
        let soil: SoilEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(soil, estimate_soil(120.0, 400.0));
        assert_eq!(ClimateZone::from_latitude(120.0), ClimateZone::Boreal);

        assert!(finite_coordinates(-95.0, -720.0).is_ok());
        assert!(finite_coordinates(f64::NAN, 0.0).is_err());
        assert!(finite_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_crop_score() {
        assert_eq!(crop_score("Tomatoes", 24.0, 60.0, 6.4, 2.0, 0.16), 5);
        assert_eq!(crop_score("tomatoes", -5.0, 60.0, 6.4, 2.0, 0.16), 4);
        assert_eq!(crop_score("Quinoa", 24.0, 60.0, 6.4, 2.0, 0.16), -1);
    }
}
