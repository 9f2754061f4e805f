//! Government scheme models

use serde::Serialize;

/// A government support scheme for farmers
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GovernmentScheme {
    pub name: &'static str,
    pub description: &'static str,
    pub eligibility: &'static str,
    pub benefits: &'static str,
    pub apply_link: &'static str,
}
