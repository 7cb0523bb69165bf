//! `depsig-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O, no HTTP, no model
//! backends): job identifiers, the closed prompt-strategy enumeration, the
//! strategy-shaped analysis result model, and the domain error type.

pub mod analysis;
pub mod error;
pub mod id;
pub mod strategy;

pub use analysis::{
    AnalysisResult, ChainOfThoughtAnalysis, CotConfidenceAssessment, CotContentThemes,
    CotLinguisticAnalysis, CotPatternRecognition, Evidence, FeatureExtraction, FewShotAnalysis,
    FinalClassification, FreeFormAnalysis, Likelihood, LinguisticFeatures, OverallAssessment,
    Prediction, SimpleAnalysis, StructuredAnalysis, Summary,
};
pub use error::{DomainError, DomainResult};
pub use id::JobId;
pub use strategy::StrategyId;
