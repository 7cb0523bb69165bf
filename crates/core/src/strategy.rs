//! The closed prompt-strategy enumeration.
//!
//! Six analysis styles, each with its own instruction template (owned by the
//! provider layer) and expected result shape (see [`crate::analysis`]).
//! Deliberately an enum rather than an open trait: result shapes stay
//! enumerable and testable, and adding a style is one variant plus one shape.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the six fixed analysis styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    Simple,
    Structured,
    FeatureExtraction,
    ChainOfThought,
    FewShot,
    FreeForm,
}

impl StrategyId {
    pub const ALL: [StrategyId; 6] = [
        StrategyId::Simple,
        StrategyId::Structured,
        StrategyId::FeatureExtraction,
        StrategyId::ChainOfThought,
        StrategyId::FewShot,
        StrategyId::FreeForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::Simple => "simple",
            StrategyId::Structured => "structured",
            StrategyId::FeatureExtraction => "feature_extraction",
            StrategyId::ChainOfThought => "chain_of_thought",
            StrategyId::FewShot => "few_shot",
            StrategyId::FreeForm => "free_form",
        }
    }

    /// Short description surfaced to client UIs.
    pub fn description(&self) -> &'static str {
        match self {
            StrategyId::Simple => "Binary classification with linguistic marker counts",
            StrategyId::Structured => "Checklist evaluation against known depression markers",
            StrategyId::FeatureExtraction => "Quantified linguistic metrics with overall assessment",
            StrategyId::ChainOfThought => "Step-by-step reasoning ending in a classification",
            StrategyId::FewShot => "Assessment guided by labeled exemplars",
            StrategyId::FreeForm => "Narrative clinical impression with a summary judgment",
        }
    }
}

impl core::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(StrategyId::Simple),
            "structured" => Ok(StrategyId::Structured),
            "feature_extraction" => Ok(StrategyId::FeatureExtraction),
            "chain_of_thought" => Ok(StrategyId::ChainOfThought),
            "few_shot" => Ok(StrategyId::FewShot),
            "free_form" => Ok(StrategyId::FreeForm),
            other => Err(DomainError::validation(format!(
                "unknown prompt strategy: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strategy_round_trips() {
        for s in StrategyId::ALL {
            assert_eq!(s.as_str().parse::<StrategyId>().unwrap(), s);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&StrategyId::ChainOfThought).unwrap();
        assert_eq!(json, "\"chain_of_thought\"");
        let back: StrategyId = serde_json::from_str("\"feature_extraction\"").unwrap();
        assert_eq!(back, StrategyId::FeatureExtraction);
    }

    #[test]
    fn unknown_strategy_is_a_validation_error() {
        assert!(matches!(
            "zero_shot".parse::<StrategyId>(),
            Err(DomainError::Validation(_))
        ));
    }
}
