//! Disease label mapping, voice fallback and input validation tests

use proptest::prelude::*;
use shared::{
    prediction_from_probabilities, softmax, validate_coordinates, validate_location,
    ChatErrorKind, CreatePostInput, FallbackTopic, Language, DISEASE_LABELS,
};
use tokio_test::{assert_err, assert_ok};
use validator::Validate;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_fallback_topics_by_language() {
        assert_eq!(FallbackTopic::detect("Will it rain? weather please"), FallbackTopic::Weather);
        assert_eq!(FallbackTopic::detect("कौन सी फसल लगाऊं"), FallbackTopic::Crop);
        assert_eq!(FallbackTopic::detect("পাতায় রোগ"), FallbackTopic::Disease);
        assert_eq!(FallbackTopic::detect("hello"), FallbackTopic::General);
    }

    #[test]
    fn test_every_reply_is_localized() {
        let topics = [
            FallbackTopic::Weather,
            FallbackTopic::Crop,
            FallbackTopic::Disease,
            FallbackTopic::General,
        ];
        for topic in topics {
            let english = topic.reply(Language::English);
            for language in Language::ALL {
                assert!(!topic.reply(language).is_empty());
                if language != Language::English {
                    assert_ne!(topic.reply(language), english);
                }
            }
        }
        for kind in [ChatErrorKind::InvalidFormat, ChatErrorKind::NoMessage, ChatErrorKind::ServerError] {
            for language in Language::ALL {
                assert!(!kind.reply(language).is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_language_defaults_to_english() {
        assert_eq!(Language::from_code_or_default("fr"), Language::English);
        assert_eq!(Language::from_code_or_default(" BN "), Language::Bengali);
    }

    #[test]
    fn test_location_and_coordinates() {
        assert_eq!(assert_ok!(validate_location("  Pune ")), "Pune");
        assert_err!(validate_location("   "));
        assert_ok!(validate_location(&"x".repeat(500)));
        assert_ok!(validate_coordinates(22.57, 88.36));
        assert_err!(validate_coordinates(91.0, 0.0));
        assert_err!(validate_coordinates(f64::NAN, 0.0));
    }

    #[test]
    fn test_post_input_is_trimmed_before_validation() {
        let input = CreatePostInput {
            username: "   ".to_string(),
            content: "Rust on wheat leaves".to_string(),
        }
        .normalized();
        assert_err!(input.validate());

        let input = CreatePostInput {
            username: " asha ".to_string(),
            content: " Rust on wheat leaves ".to_string(),
        }
        .normalized();
        assert_ok!(input.validate());
        assert_eq!(input.username, "asha");
    }

    #[test]
    fn test_prediction_rejects_unlabelled_index() {
        let mut probabilities = vec![0.0f32; DISEASE_LABELS.len() + 1];
        probabilities[DISEASE_LABELS.len()] = 1.0;
        assert!(prediction_from_probabilities(&probabilities).is_none());
        assert!(prediction_from_probabilities(&[]).is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Softmax over classifier logits is a probability distribution
    #[test]
    fn test_softmax_is_distribution(logits in prop::collection::vec(-50.0f32..50.0, 38)) {
        let probabilities = softmax(&logits).unwrap();
        let sum: f32 = probabilities.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-4);
        prop_assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    /// The predicted label is the arg-max and confidence is a percentage
    #[test]
    fn test_prediction_picks_peak(index in 0..38usize, peak in 5.0f32..30.0) {
        let mut logits = vec![0.0f32; DISEASE_LABELS.len()];
        logits[index] = peak;
        let prediction = prediction_from_probabilities(&softmax(&logits).unwrap()).unwrap();

        prop_assert_eq!(prediction.disease.as_str(), DISEASE_LABELS[index]);
        prop_assert!(prediction.confidence > 0.0 && prediction.confidence <= 100.0);
    }
}
