//! Crop suitability models
//!
//! A static table of crop growing ranges and a scorer that counts how many of
//! the observed conditions fall inside each crop's ranges.

use serde::{Deserialize, Serialize};

use crate::models::soil::SoilEstimate;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Growing ranges for one crop
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    pub name: &'static str,
    /// Air temperature, °C
    pub temperature: Range,
    /// Relative humidity, %
    pub humidity: Range,
    pub ph: Range,
    /// Organic carbon, %
    pub organic_carbon: Range,
    /// Nitrogen, %
    pub nitrogen: Range,
    /// Rainfall, mm; only scored when both profile and conditions carry it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<Range>,
}

const fn profile(
    name: &'static str,
    temperature: (f64, f64),
    humidity: (f64, f64),
    ph: (f64, f64),
    organic_carbon: (f64, f64),
    nitrogen: (f64, f64),
) -> CropProfile {
    CropProfile {
        name,
        temperature: Range::new(temperature.0, temperature.1),
        humidity: Range::new(humidity.0, humidity.1),
        ph: Range::new(ph.0, ph.1),
        organic_carbon: Range::new(organic_carbon.0, organic_carbon.1),
        nitrogen: Range::new(nitrogen.0, nitrogen.1),
        rainfall: None,
    }
}

/// Reference crop table; iteration order breaks score ties
pub const CROP_PROFILES: &[CropProfile] = &[
    profile("Tomatoes", (20.0, 28.0), (50.0, 70.0), (6.0, 6.8), (1.5, 2.5), (0.12, 0.20)),
    profile("Corn", (18.0, 30.0), (40.0, 80.0), (6.0, 7.0), (1.8, 2.8), (0.15, 0.25)),
    profile("Peppers", (20.0, 30.0), (50.0, 80.0), (6.0, 6.8), (1.5, 2.5), (0.12, 0.20)),
    profile("Eggplant", (22.0, 30.0), (50.0, 80.0), (5.8, 6.5), (1.5, 2.5), (0.12, 0.20)),
    profile("Watermelon", (24.0, 32.0), (40.0, 80.0), (6.0, 6.8), (1.5, 2.5), (0.10, 0.18)),
    profile("Carrots", (16.0, 24.0), (40.0, 80.0), (6.0, 6.8), (1.5, 2.5), (0.10, 0.18)),
    profile("Cabbage", (15.0, 20.0), (60.0, 90.0), (6.0, 7.0), (1.8, 2.8), (0.14, 0.22)),
    profile("Lettuce", (10.0, 20.0), (50.0, 80.0), (6.0, 7.0), (1.5, 2.5), (0.10, 0.18)),
    profile("Spinach", (15.0, 25.0), (60.0, 90.0), (6.0, 7.0), (1.5, 2.5), (0.12, 0.20)),
    profile("Broccoli", (16.0, 24.0), (60.0, 90.0), (6.0, 7.0), (1.5, 2.5), (0.12, 0.20)),
    profile("Garlic", (10.0, 20.0), (50.0, 80.0), (6.5, 7.5), (1.5, 2.5), (0.10, 0.18)),
    profile("Peas", (10.0, 20.0), (50.0, 80.0), (6.0, 7.5), (1.5, 2.5), (0.10, 0.18)),
    profile("Rice", (20.0, 30.0), (70.0, 95.0), (5.5, 6.5), (1.5, 2.5), (0.15, 0.25)),
    profile("Soybeans", (20.0, 30.0), (60.0, 90.0), (5.5, 6.5), (1.2, 2.0), (0.10, 0.18)),
    profile("Onions", (10.0, 20.0), (50.0, 80.0), (6.0, 7.0), (1.5, 2.5), (0.10, 0.18)),
    profile("Potatoes", (15.0, 25.0), (50.0, 80.0), (5.5, 6.5), (1.5, 2.5), (0.12, 0.20)),
    profile("Wheat", (10.0, 25.0), (30.0, 80.0), (6.0, 7.0), (1.2, 2.5), (0.12, 0.25)),
    profile("Barley", (10.0, 24.0), (30.0, 80.0), (6.0, 7.5), (1.2, 2.4), (0.12, 0.22)),
    profile("Lentils", (10.0, 25.0), (40.0, 80.0), (6.0, 7.5), (1.5, 2.5), (0.12, 0.20)),
    profile("Mustard", (10.0, 25.0), (30.0, 80.0), (6.0, 7.0), (1.2, 2.5), (0.12, 0.25)),
    profile("Groundnut", (20.0, 30.0), (40.0, 80.0), (5.5, 6.5), (1.2, 2.0), (0.10, 0.18)),
    profile("Sugarcane", (20.0, 35.0), (60.0, 90.0), (5.5, 6.5), (1.5, 2.5), (0.15, 0.25)),
    profile("Banana", (20.0, 35.0), (60.0, 95.0), (5.5, 7.0), (1.5, 2.5), (0.15, 0.25)),
    profile("Mango", (20.0, 35.0), (50.0, 80.0), (5.5, 7.0), (1.5, 2.5), (0.15, 0.25)),
    profile("Coconut", (20.0, 35.0), (60.0, 95.0), (5.5, 7.5), (1.5, 2.5), (0.15, 0.25)),
    profile("Pineapple", (22.0, 32.0), (60.0, 90.0), (5.0, 6.5), (1.5, 2.5), (0.12, 0.20)),
];

/// Look up a crop profile by name (case-insensitive)
pub fn find_crop_profile(name: &str) -> Option<&'static CropProfile> {
    CROP_PROFILES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Observed conditions for a location at query time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionVector {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
}

impl ConditionVector {
    /// Combine weather readings with a soil estimate
    pub fn from_weather_and_soil(temperature: f64, humidity: f64, soil: &SoilEstimate) -> Self {
        Self {
            temperature,
            humidity,
            ph: soil.ph,
            organic_carbon: soil.organic_carbon,
            nitrogen: soil.nitrogen,
            rainfall: None,
        }
    }

    pub fn with_rainfall(mut self, rainfall: f64) -> Self {
        self.rainfall = Some(rainfall);
        self
    }
}

impl CropProfile {
    /// Number of criteria this profile is scored on against `conditions`
    pub fn max_score(&self, conditions: &ConditionVector) -> u32 {
        match (self.rainfall, conditions.rainfall) {
            (Some(_), Some(_)) => 6,
            _ => 5,
        }
    }

    /// One point per criterion whose observed value is inside the range
    pub fn suitability_score(&self, conditions: &ConditionVector) -> u32 {
        let mut checks = vec![
            self.temperature.contains(conditions.temperature),
            self.humidity.contains(conditions.humidity),
            self.ph.contains(conditions.ph),
            self.organic_carbon.contains(conditions.organic_carbon),
            self.nitrogen.contains(conditions.nitrogen),
        ];
        if let (Some(range), Some(rainfall)) = (self.rainfall, conditions.rainfall) {
            checks.push(range.contains(rainfall));
        }
        checks.into_iter().filter(|hit| *hit).count() as u32
    }
}

/// A scored crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationResult {
    pub crop: String,
    pub score: u32,
}

/// What to return when no crop reaches the minimum score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// The first `n` results of the sorted list
    TopN(usize),
    /// The whole sorted list
    All,
}

/// Threshold and fallback applied after scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationPolicy {
    pub min_score: u32,
    pub fallback: FallbackPolicy,
}

impl RecommendationPolicy {
    /// Five-criterion scoring: keep crops matching at least 2, else the top 8
    pub const DEFAULT: RecommendationPolicy = RecommendationPolicy {
        min_score: 2,
        fallback: FallbackPolicy::TopN(8),
    };
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Score every profile, sorted by score descending (stable)
pub fn score_crops(profiles: &[CropProfile], conditions: &ConditionVector) -> Vec<RecommendationResult> {
    let mut results: Vec<RecommendationResult> = profiles
        .iter()
        .map(|p| RecommendationResult {
            crop: p.name.to_string(),
            score: p.suitability_score(conditions),
        })
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

/// Score, filter by the policy threshold and apply the fallback when empty
pub fn recommend_crops(
    profiles: &[CropProfile],
    conditions: &ConditionVector,
    policy: RecommendationPolicy,
) -> Vec<RecommendationResult> {
    let ranked = score_crops(profiles, conditions);
    let qualifying: Vec<RecommendationResult> = ranked
        .iter()
        .filter(|r| r.score >= policy.min_score)
        .cloned()
        .collect();

    if !qualifying.is_empty() {
        return qualifying;
    }

    match policy.fallback {
        FallbackPolicy::TopN(n) => ranked.into_iter().take(n).collect(),
        FallbackPolicy::All => ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomato_conditions() -> ConditionVector {
        ConditionVector {
            temperature: 24.0,
            humidity: 60.0,
            ph: 6.4,
            organic_carbon: 2.0,
            nitrogen: 0.16,
            rainfall: None,
        }
    }

    fn hostile_conditions() -> ConditionVector {
        ConditionVector {
            temperature: -40.0,
            humidity: 0.0,
            ph: 1.0,
            organic_carbon: 10.0,
            nitrogen: 5.0,
            rainfall: None,
        }
    }

    #[test]
    fn test_table_has_26_unique_crops() {
        assert_eq!(CROP_PROFILES.len(), 26);
        for (i, a) in CROP_PROFILES.iter().enumerate() {
            for b in &CROP_PROFILES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_ranges_are_ordered() {
        for p in CROP_PROFILES {
            for r in [p.temperature, p.humidity, p.ph, p.organic_carbon, p.nitrogen] {
                assert!(r.min <= r.max, "{} has an inverted range", p.name);
            }
        }
    }

    #[test]
    fn test_range_is_closed() {
        let r = Range::new(6.0, 6.8);
        assert!(r.contains(6.0));
        assert!(r.contains(6.8));
        assert!(!r.contains(5.99));
        assert!(!r.contains(6.81));
    }

    #[test]
    fn test_tomatoes_full_match() {
        let tomatoes = find_crop_profile("tomatoes").unwrap();
        assert_eq!(tomatoes.suitability_score(&tomato_conditions()), 5);
    }

    #[test]
    fn test_lower_bounds_score_maximum() {
        for p in CROP_PROFILES {
            let conditions = ConditionVector {
                temperature: p.temperature.min,
                humidity: p.humidity.min,
                ph: p.ph.min,
                organic_carbon: p.organic_carbon.min,
                nitrogen: p.nitrogen.min,
                rainfall: None,
            };
            assert_eq!(p.suitability_score(&conditions), p.max_score(&conditions));
        }
    }

    #[test]
    fn test_rainfall_only_scored_when_both_present() {
        let mut profile = *find_crop_profile("Rice").unwrap();
        let conditions = ConditionVector {
            temperature: 25.0,
            humidity: 80.0,
            ph: 6.0,
            organic_carbon: 2.0,
            nitrogen: 0.2,
            rainfall: None,
        };
        assert_eq!(profile.suitability_score(&conditions), 5);
        assert_eq!(profile.suitability_score(&conditions.with_rainfall(1500.0)), 5);

        profile.rainfall = Some(Range::new(1000.0, 2000.0));
        assert_eq!(profile.max_score(&conditions), 5);
        assert_eq!(profile.suitability_score(&conditions.with_rainfall(1500.0)), 6);
        assert_eq!(profile.suitability_score(&conditions.with_rainfall(200.0)), 5);
        assert_eq!(profile.max_score(&conditions.with_rainfall(200.0)), 6);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let ranked = score_crops(CROP_PROFILES, &tomato_conditions());
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // Ties keep table order
        for pair in ranked.windows(2) {
            if pair[0].score == pair[1].score {
                let ia = CROP_PROFILES.iter().position(|p| p.name == pair[0].crop);
                let ib = CROP_PROFILES.iter().position(|p| p.name == pair[1].crop);
                assert!(ia < ib);
            }
        }
        assert_eq!(ranked[0].crop, "Tomatoes");
        assert_eq!(ranked[0].score, 5);
    }

    #[test]
    fn test_threshold_filters() {
        let results = recommend_crops(CROP_PROFILES, &tomato_conditions(), RecommendationPolicy::DEFAULT);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.score >= 2));
    }

    #[test]
    fn test_fallback_top_n_when_nothing_qualifies() {
        let results = recommend_crops(CROP_PROFILES, &hostile_conditions(), RecommendationPolicy::DEFAULT);
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| r.score == 0));
        let names: Vec<&str> = results.iter().map(|r| r.crop.as_str()).collect();
        let expected: Vec<&str> = CROP_PROFILES.iter().take(8).map(|p| p.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_fallback_all_when_nothing_qualifies() {
        let policy = RecommendationPolicy {
            min_score: 3,
            fallback: FallbackPolicy::All,
        };
        let results = recommend_crops(CROP_PROFILES, &hostile_conditions(), policy);
        assert_eq!(results.len(), CROP_PROFILES.len());
    }

    #[test]
    fn test_condition_vector_json_uses_ph_key() {
        let json = serde_json::to_value(tomato_conditions()).unwrap();
        assert_eq!(json["pH"], 6.4);
        assert_eq!(json["organicCarbon"], 2.0);
        assert!(json.get("rainfall").is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn conditions() -> impl Strategy<Value = ConditionVector> {
            (
                -30.0f64..50.0,
                0.0f64..100.0,
                3.0f64..10.0,
                0.0f64..5.0,
                0.0f64..0.5,
                proptest::option::of(0.0f64..3000.0),
            )
                .prop_map(|(temperature, humidity, ph, organic_carbon, nitrogen, rainfall)| {
                    ConditionVector {
                        temperature,
                        humidity,
                        ph,
                        organic_carbon,
                        nitrogen,
                        rainfall,
                    }
                })
        }

        proptest! {
            #[test]
            fn score_never_exceeds_max(conditions in conditions()) {
                for p in CROP_PROFILES {
                    prop_assert!(p.suitability_score(&conditions) <= p.max_score(&conditions));
                }
            }

            #[test]
            fn recommendations_keep_ranked_order(conditions in conditions(), min_score in 0u32..=5) {
                let policy = RecommendationPolicy { min_score, fallback: FallbackPolicy::TopN(8) };
                let ranked = score_crops(CROP_PROFILES, &conditions);
                let result = recommend_crops(CROP_PROFILES, &conditions, policy);

                prop_assert!(!result.is_empty());
                prop_assert_eq!(&result[..], &ranked[..result.len()]);
            }
        }
    }
}
