//! `depsig-report`
//!
//! **Responsibility:** turning a structured analysis result into a binary
//! report document.
//!
//! The orchestrator only knows the [`ReportGenerator`] contract; the layout
//! engine behind it is swappable. The shipped [`TextReportRenderer`] emits a
//! deterministic plain-text document whose sections follow the strategy's
//! shape (checklist for `structured`, metrics table for `feature_extraction`,
//! and so on). A PDF engine can be slotted in behind the same trait.

pub mod text;

pub use text::TextReportRenderer;

use depsig_core::{AnalysisResult, StrategyId};
use thiserror::Error;

/// Report rendering failure.
///
/// Kept distinct from provider failures: by the time a result reaches the
/// generator it has already passed shape validation, so a failure here is a
/// rendering defect, not a backend one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The result's shape does not match the strategy it is being rendered
    /// for (e.g. a checklist result tagged as feature extraction).
    #[error("result shape {actual} does not match requested strategy {requested}")]
    ShapeMismatch {
        requested: StrategyId,
        actual: StrategyId,
    },
}

/// External report-formatting collaborator.
pub trait ReportGenerator: Send + Sync {
    /// MIME type of the documents this generator produces. The HTTP layer
    /// uses it to label the binary payload on completed jobs.
    fn content_type(&self) -> &'static str;

    /// File extension used for download filenames.
    fn file_extension(&self) -> &'static str;

    /// Render the strategy-appropriate fields of `result` into a document.
    fn generate(
        &self,
        result: &AnalysisResult,
        strategy: StrategyId,
    ) -> Result<Vec<u8>, ReportError>;
}
