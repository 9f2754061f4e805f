//! Leaf disease classifier handle
//!
//! The model is loaded lazily on first use and shared read-only afterwards.
//! Concurrent callers during a load all wait for the same in-flight load; a
//! failed load leaves the handle empty so the next call tries again.

use async_trait::async_trait;
use ndarray::Array4;
use shared::{prediction_from_probabilities, softmax, DiseasePrediction};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::error::AppError;

pub mod preprocess;
pub mod tract;

pub use preprocess::preprocess_image;
pub use tract::TractLoader;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model loading failed: {0}")]
    ModelUnavailable(String),

    #[error("Image preprocessing failed: {0}")]
    Decode(String),

    #[error("Invalid tensor shape: {0:?}")]
    InvalidShape(Vec<usize>),

    #[error("Model prediction failed: {0}")]
    Inference(String),
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        AppError::Model(err.to_string())
    }
}

/// A loaded classifier
pub trait Model: Send + Sync {
    /// Run one `[1, 224, 224, 3]` batch and return the raw output row
    fn run(&self, input: Array4<f32>) -> Result<Vec<f32>, ClassifierError>;
}

/// Source of the classifier model
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Model>, ClassifierError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ModelStatus {
    Unloaded = 0,
    Loading = 1,
    Ready = 2,
    Failed = 3,
}

impl ModelStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ModelStatus::Loading,
            2 => ModelStatus::Ready,
            3 => ModelStatus::Failed,
            _ => ModelStatus::Unloaded,
        }
    }
}

pub struct DiseaseClassifier {
    loader: Arc<dyn ModelLoader>,
    model: OnceCell<Arc<dyn Model>>,
    status: AtomicU8,
}

impl DiseaseClassifier {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
            status: AtomicU8::new(ModelStatus::Unloaded as u8),
        }
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    fn set_status(&self, status: ModelStatus) {
        self.status.store(status as u8, Ordering::Release);
    }

    /// Load the model if needed, waiting on any load already in flight
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn Model>, ClassifierError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                self.set_status(ModelStatus::Loading);
                tracing::info!("Loading disease classifier");
                match self.loader.load().await {
                    Ok(model) => {
                        self.set_status(ModelStatus::Ready);
                        Ok(model)
                    }
                    Err(e) => {
                        self.set_status(ModelStatus::Failed);
                        tracing::error!("Disease classifier load failed: {}", e);
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(model.clone())
    }

    /// Classify one uploaded image
    pub async fn predict(&self, bytes: Vec<u8>) -> Result<DiseasePrediction, ClassifierError> {
        let model = self.ensure_loaded().await?;

        tokio::task::spawn_blocking(move || {
            let input = preprocess_image(&bytes)?;
            let output = model.run(input)?;
            let probabilities = softmax(&output).ok_or_else(|| {
                ClassifierError::Inference("Model produced non-finite scores".to_string())
            })?;
            prediction_from_probabilities(&probabilities).ok_or_else(|| {
                ClassifierError::Inference(format!(
                    "Invalid prediction index for {} outputs",
                    output.len()
                ))
            })
        })
        .await
        .map_err(|e| ClassifierError::Inference(format!("Inference task failed: {}", e)))?
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn png() -> Vec<u8> {
        use image::{ImageBuffer, ImageOutputFormat, Rgb};
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(64, 48, Rgb([30, 140, 40]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_load() {
        let loader = Arc::new(CountingLoader::new(0, peaked_logits(0)));
        let classifier = Arc::new(DiseaseClassifier::new(loader.clone()));
        assert_eq!(classifier.status(), ModelStatus::Unloaded);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let classifier = classifier.clone();
                tokio::spawn(async move { classifier.ensure_loaded().await.is_ok() })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(loader.calls(), 1);
        assert_eq!(classifier.status(), ModelStatus::Ready);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let loader = Arc::new(CountingLoader::new(1, peaked_logits(0)));
        let classifier = DiseaseClassifier::new(loader.clone());

        assert!(classifier.ensure_loaded().await.is_err());
        assert_eq!(classifier.status(), ModelStatus::Failed);

        assert!(classifier.ensure_loaded().await.is_ok());
        assert_eq!(classifier.status(), ModelStatus::Ready);
        assert_eq!(loader.calls(), 2);

        // Cached from here on
        assert!(classifier.ensure_loaded().await.is_ok());
        assert_eq!(loader.calls(), 2);
    }

    #[tokio::test]
    async fn test_predict_returns_labelled_result() {
        let loader = Arc::new(CountingLoader::new(0, peaked_logits(29)));
        let classifier = DiseaseClassifier::new(loader);

        let prediction = classifier.predict(png()).await.unwrap();
        assert_eq!(prediction.disease, "Tomato___Early_blight");
        assert!(prediction.confidence > 99.0 && prediction.confidence <= 100.0);
    }

    #[tokio::test]
    async fn test_predict_rejects_output_outside_labels() {
        let mut logits = vec![0.0; 40];
        logits[39] = 10.0;
        let classifier = DiseaseClassifier::new(Arc::new(CountingLoader::new(0, logits)));

        let err = classifier.predict(png()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
    }

    #[tokio::test]
    async fn test_predict_rejects_non_finite_output() {
        for bad in [f32::NAN, f32::INFINITY] {
            let logits = vec![bad; shared::DISEASE_LABELS.len()];
            let classifier = DiseaseClassifier::new(Arc::new(CountingLoader::new(0, logits)));

            let err = classifier.predict(png()).await.unwrap_err();
            assert!(matches!(err, ClassifierError::Inference(_)));
            assert_eq!(AppError::from(err).status_and_code().0.as_u16(), 500);
        }
    }

    #[tokio::test]
    async fn test_predict_undecodable_image() {
        let classifier =
            DiseaseClassifier::new(Arc::new(CountingLoader::new(0, peaked_logits(3))));
        let err = classifier.predict(b"GIF89a-truncated".to_vec()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }
}
