//! Plant disease classification models

use serde::{Deserialize, Serialize};

use crate::types::round2;

/// Output classes of the leaf disease classifier, in model output order
pub const DISEASE_LABELS: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

/// Square input resolution expected by the classifier
pub const CLASSIFIER_INPUT_SIZE: usize = 224;

/// Colour channels expected by the classifier
pub const CLASSIFIER_CHANNELS: usize = 3;

/// Input tensor shape: batch, height, width, channels
pub const CLASSIFIER_INPUT_SHAPE: [usize; 4] =
    [1, CLASSIFIER_INPUT_SIZE, CLASSIFIER_INPUT_SIZE, CLASSIFIER_CHANNELS];

/// Result of a disease prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseasePrediction {
    pub disease: String,
    /// Percent, two decimals, in `[0, 100]`
    pub confidence: f64,
}

/// Numerically stable softmax; `None` for an empty row or any non-finite logit
pub fn softmax(logits: &[f32]) -> Option<Vec<f32>> {
    if logits.is_empty() || !logits.iter().all(|v| v.is_finite()) {
        return None;
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return None;
    }
    Some(exps.into_iter().map(|e| e / sum).collect())
}

/// Index and value of the largest entry; first wins on ties
pub fn arg_max(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
}

/// Map a probability row to a prediction; `None` if the arg-max has no label
pub fn prediction_from_probabilities(probabilities: &[f32]) -> Option<DiseasePrediction> {
    let (index, probability) = arg_max(probabilities)?;
    let label = DISEASE_LABELS.get(index)?;
    let confidence = round2(f64::from(probability) * 100.0).clamp(0.0, 100.0);
    Some(DiseasePrediction {
        disease: (*label).to_string(),
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count() {
        assert_eq!(DISEASE_LABELS.len(), 38);
        assert_eq!(DISEASE_LABELS[0], "Apple___Apple_scab");
        assert_eq!(DISEASE_LABELS[37], "Tomato___healthy");
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]).unwrap();
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]).unwrap();
        assert!((probs[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_softmax_rejects_non_finite_logits() {
        assert_eq!(softmax(&[f32::NAN; 38]), None);
        assert_eq!(softmax(&[0.5, f32::INFINITY, 0.1]), None);
        assert_eq!(softmax(&[f32::NEG_INFINITY, 1.0]), None);
        assert_eq!(softmax(&[]), None);
    }

    #[test]
    fn test_arg_max_first_on_tie() {
        assert_eq!(arg_max(&[0.2, 0.4, 0.4]), Some((1, 0.4)));
        assert_eq!(arg_max(&[]), None);
    }

    #[test]
    fn test_prediction_from_probabilities() {
        let mut probs = vec![0.0f32; 38];
        probs[29] = 0.8765;
        probs[0] = 0.1235;
        let prediction = prediction_from_probabilities(&probs).unwrap();
        assert_eq!(prediction.disease, "Tomato___Early_blight");
        assert!((prediction.confidence - 87.65).abs() < 0.01);
    }

    #[test]
    fn test_prediction_out_of_label_range() {
        let mut probs = vec![0.0f32; 40];
        probs[39] = 1.0;
        assert!(prediction_from_probabilities(&probs).is_none());
    }
}
