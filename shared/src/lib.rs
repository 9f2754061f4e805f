//! Shared types and models for the Agritech Hub platform
//!
//! This crate contains the deterministic agronomy logic (soil heuristic and
//! crop suitability scoring) and the types shared between the backend and the
//! WASM module used by the frontend.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
