//! Plain-text report renderer.

use std::fmt::Write as _;

use depsig_core::{AnalysisResult, StrategyId};

use crate::{ReportError, ReportGenerator};

const RULE: &str = "================================================================";

/// Deterministic plain-text renderer.
///
/// Output depends only on the analysis result and strategy, so repeated
/// reads of a terminal job always serve identical bytes.
#[derive(Debug, Default)]
pub struct TextReportRenderer;

impl TextReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextReportRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn generate(
        &self,
        result: &AnalysisResult,
        strategy: StrategyId,
    ) -> Result<Vec<u8>, ReportError> {
        if result.strategy() != strategy {
            return Err(ReportError::ShapeMismatch {
                requested: strategy,
                actual: result.strategy(),
            });
        }

        let summary = result.summary();
        let mut out = String::new();

        // Writing to a String cannot fail; unwraps below are on fmt::Write.
        writeln!(out, "{RULE}").unwrap();
        writeln!(out, "DEPRESSION ANALYSIS REPORT").unwrap();
        writeln!(out, "Analysis style: {} ({})", strategy, strategy.description()).unwrap();
        writeln!(out, "{RULE}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "Judgment:   {}", summary.label).unwrap();
        writeln!(out, "Confidence: {:.1}%", summary.confidence * 100.0).unwrap();
        writeln!(out).unwrap();

        match result {
            AnalysisResult::Simple(a) => {
                writeln!(out, "Probability (depression):    {:.2}", a.prediction.probability_depression).unwrap();
                writeln!(out, "Probability (no depression): {:.2}", a.prediction.probability_no_depression).unwrap();
                if !a.linguistic_features.is_empty() {
                    writeln!(out).unwrap();
                    writeln!(out, "Linguistic features:").unwrap();
                    for (name, value) in &a.linguistic_features {
                        writeln!(out, "  - {}: {}", title_case(name), value).unwrap();
                    }
                }
            }
            AnalysisResult::Structured(a) => {
                writeln!(out, "Depression markers detected:").unwrap();
                if a.markers_present.is_empty() {
                    writeln!(out, "  (none)").unwrap();
                }
                for marker in &a.markers_present {
                    writeln!(out, "  [x] {marker}").unwrap();
                }
                if !a.evidence.is_empty() {
                    writeln!(out).unwrap();
                    writeln!(out, "Evidence from text:").unwrap();
                    for (marker, evidence) in &a.evidence {
                        writeln!(out, "  {marker}:").unwrap();
                        for quote in evidence.quotes() {
                            writeln!(out, "    \"{quote}\"").unwrap();
                        }
                    }
                }
            }
            AnalysisResult::FeatureExtraction(a) => {
                writeln!(out, "Extracted features:").unwrap();
                for (name, value) in a.features.named() {
                    writeln!(out, "  {:<30} {}", title_case(name), value).unwrap();
                }
                writeln!(out).unwrap();
                writeln!(out, "Depression probability: {:.2}", a.overall_assessment.depression_probability).unwrap();
                if !a.overall_assessment.primary_indicators.is_empty() {
                    writeln!(out, "Primary indicators:").unwrap();
                    for indicator in &a.overall_assessment.primary_indicators {
                        writeln!(out, "  * {indicator}").unwrap();
                    }
                }
            }
            AnalysisResult::ChainOfThought(a) => {
                writeln!(out, "Initial observation:").unwrap();
                writeln!(out, "  {}", a.initial_observation).unwrap();
                writeln!(out).unwrap();
                writeln!(out, "Linguistic analysis:").unwrap();
                writeln!(out, "  Pronoun usage:      {}", a.linguistic_analysis.pronoun_usage).unwrap();
                writeln!(out, "  Emotion words:      {}", a.linguistic_analysis.emotion_words).unwrap();
                writeln!(out, "  Self-focused ratio: {}", a.linguistic_analysis.self_focused_ratio).unwrap();
                writeln!(out).unwrap();
                writeln!(out, "Patterns recognized:").unwrap();
                for (name, present) in [
                    ("Rumination", a.pattern_recognition.rumination),
                    ("Social withdrawal", a.pattern_recognition.social_withdrawal),
                    ("Anhedonia", a.pattern_recognition.anhedonia),
                    ("Worthlessness", a.pattern_recognition.worthlessness),
                ] {
                    writeln!(out, "  [{}] {name}", if present { "x" } else { " " }).unwrap();
                }
                writeln!(out).unwrap();
                writeln!(out, "Reasoning summary:").unwrap();
                writeln!(out, "  {}", a.final_classification.reasoning_summary).unwrap();
            }
            AnalysisResult::FewShot(a) => {
                if !a.indicators_found.is_empty() {
                    writeln!(out, "Indicators found:").unwrap();
                    for indicator in &a.indicators_found {
                        writeln!(out, "  * {indicator}").unwrap();
                    }
                    writeln!(out).unwrap();
                }
                writeln!(out, "Reasoning:").unwrap();
                writeln!(out, "  {}", a.reasoning).unwrap();
                writeln!(out).unwrap();
                writeln!(out, "Comparison to exemplars:").unwrap();
                writeln!(out, "  {}", a.comparison_to_examples).unwrap();
            }
            AnalysisResult::FreeForm(a) => {
                for (heading, body) in [
                    ("Emotional state", &a.emotional_state),
                    ("Self-description patterns", &a.self_description_patterns),
                    ("Psychological distress indicators", &a.psychological_distress_indicators),
                    ("Clinical observations", &a.clinical_observations),
                    ("Overall impression", &a.overall_impression),
                    ("Clinical notes", &a.clinical_notes),
                ] {
                    if !body.is_empty() {
                        writeln!(out, "{heading}:").unwrap();
                        writeln!(out, "  {body}").unwrap();
                        writeln!(out).unwrap();
                    }
                }
            }
        }

        writeln!(out).unwrap();
        writeln!(out, "{RULE}").unwrap();
        writeln!(out, "This is not a clinical diagnosis. Please consult a qualified").unwrap();
        writeln!(out, "mental health professional.").unwrap();
        writeln!(out, "{RULE}").unwrap();

        Ok(out.into_bytes())
    }
}

fn title_case(snake: &str) -> String {
    let mut result = snake.replace('_', " ");
    if let Some(first) = result.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsig_core::{
        Evidence, FeatureExtraction, Likelihood, LinguisticFeatures, OverallAssessment,
        Prediction, SimpleAnalysis, StructuredAnalysis,
    };
    use std::collections::BTreeMap;

    fn structured_result() -> AnalysisResult {
        AnalysisResult::Structured(StructuredAnalysis {
            depression_likelihood: Likelihood::High,
            markers_present: vec!["Fatigue or low energy".into()],
            evidence: BTreeMap::from([(
                "Fatigue or low energy".to_string(),
                Evidence::One("too tired to get up".to_string()),
            )]),
            confidence: 80.0,
        })
    }

    fn feature_result() -> AnalysisResult {
        AnalysisResult::FeatureExtraction(FeatureExtraction {
            features: LinguisticFeatures {
                negative_emotion_words: 3,
                first_person_singular: 5,
                ..Default::default()
            },
            overall_assessment: OverallAssessment {
                depression_probability: 0.8,
                confidence_score: 0.7,
                primary_indicators: vec!["negative emotion language".into()],
            },
        })
    }

    #[test]
    fn structured_report_renders_a_checklist() {
        let renderer = TextReportRenderer::new();
        let bytes = renderer
            .generate(&structured_result(), StrategyId::Structured)
            .unwrap();
        let report = String::from_utf8(bytes).unwrap();
        assert!(report.contains("[x] Fatigue or low energy"));
        assert!(report.contains("\"too tired to get up\""));
        assert!(report.contains("Judgment:   High"));
    }

    #[test]
    fn feature_report_renders_metrics_not_a_checklist() {
        let renderer = TextReportRenderer::new();
        let bytes = renderer
            .generate(&feature_result(), StrategyId::FeatureExtraction)
            .unwrap();
        let report = String::from_utf8(bytes).unwrap();
        assert!(report.contains("Negative emotion words"));
        assert!(report.contains("Depression probability: 0.80"));
        assert!(!report.contains("[x]"));
    }

    #[test]
    fn shape_mismatch_is_a_distinct_failure() {
        let renderer = TextReportRenderer::new();
        let err = renderer
            .generate(&structured_result(), StrategyId::FeatureExtraction)
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::ShapeMismatch {
                requested: StrategyId::FeatureExtraction,
                actual: StrategyId::Structured,
            }
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = TextReportRenderer::new();
        let simple = AnalysisResult::Simple(SimpleAnalysis {
            prediction: Prediction {
                class: "depression".into(),
                confidence: 0.9,
                probability_depression: 0.9,
                probability_no_depression: 0.1,
            },
            linguistic_features: BTreeMap::from([("negative_emotion_words".to_string(), 4)]),
        });
        let a = renderer.generate(&simple, StrategyId::Simple).unwrap();
        let b = renderer.generate(&simple, StrategyId::Simple).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
