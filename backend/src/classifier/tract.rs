//! ONNX model loading and inference with tract
//!
//! Pure-Rust path: no ONNX Runtime or system libraries. Loading and inference
//! are CPU-bound and run on the blocking pool.

use async_trait::async_trait;
use ndarray::Array4;
use std::path::PathBuf;
use std::sync::Arc;
use tract_onnx::prelude::*;

use super::{ClassifierError, Model, ModelLoader};
use shared::CLASSIFIER_INPUT_SHAPE;

/// Loads the classifier from an ONNX file on disk
pub struct TractLoader {
    path: PathBuf,
}

impl TractLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Optimized, runnable tract plan
pub struct TractModel {
    plan: TypedRunnableModel<TypedModel>,
}

#[async_trait]
impl ModelLoader for TractLoader {
    async fn load(&self) -> Result<Arc<dyn Model>, ClassifierError> {
        if tokio::fs::metadata(&self.path).await.is_err() {
            return Err(ClassifierError::ModelUnavailable(format!(
                "Model file not accessible: {}",
                self.path.display()
            )));
        }

        let path = self.path.clone();
        let plan = tokio::task::spawn_blocking(move || build_plan(&path))
            .await
            .map_err(|e| ClassifierError::ModelUnavailable(format!("Load task failed: {}", e)))??;

        tracing::info!(path = %self.path.display(), "Disease model loaded");
        Ok(Arc::new(TractModel { plan }))
    }
}

fn build_plan(path: &std::path::Path) -> Result<TypedRunnableModel<TypedModel>, ClassifierError> {
    let unavailable = |stage: &str, e: TractError| {
        ClassifierError::ModelUnavailable(format!("{}: {}", stage, e))
    };

    tract_onnx::onnx()
        .model_for_path(path)
        .map_err(|e| unavailable("Load ONNX", e))?
        .with_input_fact(0, f32::fact(CLASSIFIER_INPUT_SHAPE).into())
        .map_err(|e| unavailable("Input fact", e))?
        .into_optimized()
        .map_err(|e| unavailable("Optimize", e))?
        .into_runnable()
        .map_err(|e| unavailable("Build runnable", e))
}

impl Model for TractModel {
    fn run(&self, input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        let tensor: Tensor = input.into();
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::Inference("No output tensor".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Output to array: {}", e)))?;

        Ok(view.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_model_file() {
        let loader = TractLoader::new("/nonexistent/plant_disease.onnx");
        let err = loader.load().await.err().unwrap();
        assert!(matches!(err, ClassifierError::ModelUnavailable(_)));
    }
}
