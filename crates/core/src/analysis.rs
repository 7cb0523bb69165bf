//! Strategy-shaped analysis results.
//!
//! Every provider must return, for each strategy it supports, a result
//! conforming to that strategy's shape — or fail explicitly. The shapes below
//! mirror the JSON the instruction templates demand from the model backends,
//! so structural parsing is a plain serde deserialization into the matching
//! struct. A reply that does not fit is rejected whole; we never keep a
//! partially-typed result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyId;

/// Normalized output of one provider analysis, tagged by strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AnalysisResult {
    Simple(SimpleAnalysis),
    Structured(StructuredAnalysis),
    FeatureExtraction(FeatureExtraction),
    ChainOfThought(ChainOfThoughtAnalysis),
    FewShot(FewShotAnalysis),
    FreeForm(FreeFormAnalysis),
}

impl AnalysisResult {
    pub fn strategy(&self) -> StrategyId {
        match self {
            AnalysisResult::Simple(_) => StrategyId::Simple,
            AnalysisResult::Structured(_) => StrategyId::Structured,
            AnalysisResult::FeatureExtraction(_) => StrategyId::FeatureExtraction,
            AnalysisResult::ChainOfThought(_) => StrategyId::ChainOfThought,
            AnalysisResult::FewShot(_) => StrategyId::FewShot,
            AnalysisResult::FreeForm(_) => StrategyId::FreeForm,
        }
    }

    /// Headline judgment, normalized across shapes.
    ///
    /// Confidence is always in `[0, 1]`; shapes that report 0–100 are scaled.
    pub fn summary(&self) -> Summary {
        match self {
            AnalysisResult::Simple(a) => Summary {
                label: a.prediction.class.clone(),
                confidence: a.prediction.confidence,
            },
            AnalysisResult::Structured(a) => Summary {
                label: a.depression_likelihood.to_string(),
                confidence: scale_percent(a.confidence),
            },
            AnalysisResult::FeatureExtraction(a) => Summary {
                label: if a.overall_assessment.depression_probability > 0.5 {
                    "depression".to_string()
                } else {
                    "no-depression".to_string()
                },
                confidence: a.overall_assessment.confidence_score,
            },
            AnalysisResult::ChainOfThought(a) => Summary {
                label: a.final_classification.depression_likelihood.to_string(),
                confidence: scale_percent(a.final_classification.confidence),
            },
            AnalysisResult::FewShot(a) => Summary {
                label: a.assessment.to_string(),
                confidence: scale_percent(a.confidence),
            },
            AnalysisResult::FreeForm(a) => Summary {
                label: a.depression_likelihood.to_string(),
                confidence: scale_percent(a.confidence),
            },
        }
    }
}

/// Confidences prompted on a 0–100 scale are normalized to `[0, 1]`.
fn scale_percent(v: f64) -> f64 {
    if v > 1.0 { v / 100.0 } else { v }
}

/// Label + confidence pair extracted from any result shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label: String,
    pub confidence: f64,
}

/// Coarse likelihood scale shared by several shapes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Likelihood {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl core::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Likelihood::Low => "Low",
            Likelihood::Medium => "Medium",
            Likelihood::High => "High",
        })
    }
}

// -------------------------
// simple
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAnalysis {
    pub prediction: Prediction,
    /// Named marker counts (first-person pronouns, hopelessness indicators…).
    #[serde(default)]
    pub linguistic_features: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Binary label: `depression` or `no-depression`.
    pub class: String,
    pub confidence: f64,
    #[serde(default)]
    pub probability_depression: f64,
    #[serde(default)]
    pub probability_no_depression: f64,
}

// -------------------------
// structured
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub depression_likelihood: Likelihood,
    #[serde(default)]
    pub markers_present: Vec<String>,
    /// Marker → supporting quote(s) from the analyzed text.
    #[serde(default)]
    pub evidence: BTreeMap<String, Evidence>,
    pub confidence: f64,
}

/// Models answer with a single quote or a list; accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    One(String),
    Many(Vec<String>),
}

impl Evidence {
    pub fn quotes(&self) -> Vec<&str> {
        match self {
            Evidence::One(q) => vec![q.as_str()],
            Evidence::Many(qs) => qs.iter().map(String::as_str).collect(),
        }
    }
}

// -------------------------
// feature_extraction
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureExtraction {
    pub features: LinguisticFeatures,
    pub overall_assessment: OverallAssessment,
}

/// The ten quantified metrics the feature-extraction template demands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticFeatures {
    #[serde(default)]
    pub first_person_singular: i64,
    #[serde(default)]
    pub first_person_plural: i64,
    #[serde(default)]
    pub negative_emotion_words: i64,
    #[serde(default)]
    pub positive_emotion_words: i64,
    #[serde(default)]
    pub social_isolation_language: i64,
    #[serde(default)]
    pub absolutist_language: i64,
    #[serde(default)]
    pub death_suicide_references: i64,
    #[serde(default)]
    pub future_oriented_statements: i64,
    #[serde(default)]
    pub past_oriented_statements: i64,
    #[serde(default)]
    pub present_oriented_statements: i64,
}

impl LinguisticFeatures {
    /// Stable (name, count) listing for rendering.
    pub fn named(&self) -> [(&'static str, i64); 10] {
        [
            ("first_person_singular", self.first_person_singular),
            ("first_person_plural", self.first_person_plural),
            ("negative_emotion_words", self.negative_emotion_words),
            ("positive_emotion_words", self.positive_emotion_words),
            ("social_isolation_language", self.social_isolation_language),
            ("absolutist_language", self.absolutist_language),
            ("death_suicide_references", self.death_suicide_references),
            ("future_oriented_statements", self.future_oriented_statements),
            ("past_oriented_statements", self.past_oriented_statements),
            ("present_oriented_statements", self.present_oriented_statements),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub depression_probability: f64,
    pub confidence_score: f64,
    #[serde(default)]
    pub primary_indicators: Vec<String>,
}

// -------------------------
// chain_of_thought
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainOfThoughtAnalysis {
    #[serde(default)]
    pub initial_observation: String,
    pub linguistic_analysis: CotLinguisticAnalysis,
    pub content_themes: CotContentThemes,
    pub pattern_recognition: CotPatternRecognition,
    pub confidence_assessment: CotConfidenceAssessment,
    pub final_classification: FinalClassification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CotLinguisticAnalysis {
    #[serde(default)]
    pub pronoun_usage: String,
    #[serde(default)]
    pub emotion_words: String,
    #[serde(default)]
    pub self_focused_ratio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CotContentThemes {
    #[serde(default)]
    pub social_connections: String,
    #[serde(default)]
    pub future_outlook: String,
    #[serde(default)]
    pub self_perception: String,
    #[serde(default)]
    pub activity_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CotPatternRecognition {
    #[serde(default)]
    pub rumination: bool,
    #[serde(default)]
    pub social_withdrawal: bool,
    #[serde(default)]
    pub anhedonia: bool,
    #[serde(default)]
    pub worthlessness: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CotConfidenceAssessment {
    #[serde(default)]
    pub clear_indicators: bool,
    #[serde(default)]
    pub contradictory_signals: bool,
    #[serde(default)]
    pub sufficient_information: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalClassification {
    pub depression_likelihood: Likelihood,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning_summary: String,
}

// -------------------------
// few_shot
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FewShotAnalysis {
    pub assessment: Likelihood,
    pub confidence: f64,
    #[serde(default)]
    pub indicators_found: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub comparison_to_examples: String,
}

// -------------------------
// free_form
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeFormAnalysis {
    #[serde(default)]
    pub emotional_state: String,
    #[serde(default)]
    pub self_description_patterns: String,
    #[serde(default)]
    pub psychological_distress_indicators: String,
    #[serde(default)]
    pub clinical_observations: String,
    #[serde(default)]
    pub overall_impression: String,
    pub depression_likelihood: Likelihood,
    pub confidence: f64,
    #[serde(default)]
    pub clinical_notes: String,
}
