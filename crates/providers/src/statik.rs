//! Deterministic offline provider.
//!
//! `static` scores the input with a small keyword lexicon instead of calling
//! a model backend. It exists so the full pipeline (submission, dispatch,
//! report, polling) is exercisable without network access or API keys — in
//! dev, in CI, and as the always-registered fallback provider. The scoring is
//! intentionally naive; it is not an analysis model.

use async_trait::async_trait;
use depsig_core::{
    AnalysisResult, ChainOfThoughtAnalysis, CotConfidenceAssessment, CotContentThemes,
    CotLinguisticAnalysis, CotPatternRecognition, Evidence, FeatureExtraction, FewShotAnalysis,
    FinalClassification, FreeFormAnalysis, Likelihood, LinguisticFeatures, OverallAssessment,
    Prediction, SimpleAnalysis, StrategyId, StructuredAnalysis,
};
use std::collections::BTreeMap;

use crate::failure::ProviderFailure;
use crate::provider::Provider;

const NEGATIVE: &[&str] = &[
    "sad", "hopeless", "empty", "worthless", "tired", "exhausted", "numb", "burden", "miserable",
    "pointless",
];
const POSITIVE: &[&str] = &["happy", "joy", "excited", "love", "grateful", "fun", "good"];
const ISOLATION: &[&str] = &["alone", "lonely", "isolated", "nobody", "avoid"];
const ABSOLUTIST: &[&str] = &["always", "never", "nothing", "everything", "everyone"];
const FIRST_SINGULAR: &[&str] = &["i", "me", "my", "myself"];
const FIRST_PLURAL: &[&str] = &["we", "us", "our"];
const FUTURE: &[&str] = &["will", "tomorrow", "plan", "hope", "forward"];
const PAST: &[&str] = &["was", "were", "before", "remember", "used"];
const PRESENT: &[&str] = &["is", "am", "now", "today", "currently"];
const DEATH: &[&str] = &["die", "death", "suicide"];

#[derive(Debug, Default)]
pub struct StaticProvider;

impl StaticProvider {
    pub fn new() -> Self {
        Self
    }
}

struct Scores {
    negative: i64,
    positive: i64,
    isolation: i64,
    probability: f64,
    confidence: f64,
}

impl Scores {
    fn likelihood(&self) -> Likelihood {
        if self.probability < 0.35 {
            Likelihood::Low
        } else if self.probability < 0.65 {
            Likelihood::Medium
        } else {
            Likelihood::High
        }
    }

    fn label(&self) -> &'static str {
        if self.probability > 0.5 {
            "depression"
        } else {
            "no-depression"
        }
    }
}

fn count(words: &[String], lexicon: &[&str]) -> i64 {
    words.iter().filter(|w| lexicon.contains(&w.as_str())).count() as i64
}

fn score(text: &str) -> (Vec<String>, Scores) {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches('\'').to_lowercase())
        .collect();

    let negative = count(&words, NEGATIVE);
    let positive = count(&words, POSITIVE);
    let isolation = count(&words, ISOLATION);

    let raw = 0.1 + 0.25 * (negative + isolation) as f64 - 0.15 * positive as f64;
    let probability = raw.clamp(0.05, 0.95);
    // More triggered words, either direction, means a firmer judgment.
    let confidence = (0.6 + 0.3 * (probability - 0.5).abs() * 2.0).min(0.9);

    (
        words,
        Scores {
            negative,
            positive,
            isolation,
            probability,
            confidence,
        },
    )
}

fn indicators(s: &Scores) -> Vec<String> {
    let mut found = Vec::new();
    if s.negative > 0 {
        found.push("negative emotion language".to_string());
    }
    if s.isolation > 0 {
        found.push("social isolation language".to_string());
    }
    if s.positive > 0 {
        found.push("positive emotion language".to_string());
    }
    found
}

#[async_trait]
impl Provider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn display_name(&self) -> &'static str {
        "Static"
    }

    async fn analyze(
        &self,
        input_text: &str,
        strategy: StrategyId,
    ) -> Result<AnalysisResult, ProviderFailure> {
        let (words, s) = score(input_text);

        let result = match strategy {
            StrategyId::Simple => AnalysisResult::Simple(SimpleAnalysis {
                prediction: Prediction {
                    class: s.label().to_string(),
                    confidence: s.confidence,
                    probability_depression: s.probability,
                    probability_no_depression: 1.0 - s.probability,
                },
                linguistic_features: BTreeMap::from([
                    ("first_person_pronouns".to_string(), count(&words, FIRST_SINGULAR)),
                    ("negative_emotion_words".to_string(), s.negative),
                    ("social_isolation_markers".to_string(), s.isolation),
                    ("future_oriented_statements".to_string(), count(&words, FUTURE)),
                ]),
            }),
            StrategyId::Structured => {
                let mut markers = Vec::new();
                let mut evidence = BTreeMap::new();
                if s.negative > 0 {
                    markers.push("Persistent sadness or emptiness".to_string());
                    evidence.insert(
                        "Persistent sadness or emptiness".to_string(),
                        Evidence::One(format!("{} negative emotion word(s)", s.negative)),
                    );
                }
                if s.isolation > 0 {
                    markers.push("Social withdrawal or isolation".to_string());
                    evidence.insert(
                        "Social withdrawal or isolation".to_string(),
                        Evidence::One(format!("{} isolation term(s)", s.isolation)),
                    );
                }
                AnalysisResult::Structured(StructuredAnalysis {
                    depression_likelihood: s.likelihood(),
                    markers_present: markers,
                    evidence,
                    confidence: s.confidence * 100.0,
                })
            }
            StrategyId::FeatureExtraction => AnalysisResult::FeatureExtraction(FeatureExtraction {
                features: LinguisticFeatures {
                    first_person_singular: count(&words, FIRST_SINGULAR),
                    first_person_plural: count(&words, FIRST_PLURAL),
                    negative_emotion_words: s.negative,
                    positive_emotion_words: s.positive,
                    social_isolation_language: s.isolation,
                    absolutist_language: count(&words, ABSOLUTIST),
                    death_suicide_references: count(&words, DEATH),
                    future_oriented_statements: count(&words, FUTURE),
                    past_oriented_statements: count(&words, PAST),
                    present_oriented_statements: count(&words, PRESENT),
                },
                overall_assessment: OverallAssessment {
                    depression_probability: s.probability,
                    confidence_score: s.confidence,
                    primary_indicators: indicators(&s),
                },
            }),
            StrategyId::ChainOfThought => AnalysisResult::ChainOfThought(ChainOfThoughtAnalysis {
                initial_observation: format!(
                    "lexicon scan: {} negative, {} positive, {} isolation term(s)",
                    s.negative, s.positive, s.isolation
                ),
                linguistic_analysis: CotLinguisticAnalysis {
                    pronoun_usage: format!(
                        "{} first-person singular, {} plural",
                        count(&words, FIRST_SINGULAR),
                        count(&words, FIRST_PLURAL)
                    ),
                    emotion_words: format!("{} negative vs {} positive", s.negative, s.positive),
                    self_focused_ratio: "not estimated".to_string(),
                },
                content_themes: CotContentThemes::default(),
                pattern_recognition: CotPatternRecognition {
                    rumination: false,
                    social_withdrawal: s.isolation > 0,
                    anhedonia: false,
                    worthlessness: words.iter().any(|w| w == "worthless"),
                },
                confidence_assessment: CotConfidenceAssessment {
                    clear_indicators: s.negative + s.isolation > 1,
                    contradictory_signals: s.negative > 0 && s.positive > 0,
                    sufficient_information: words.len() >= 5,
                },
                final_classification: FinalClassification {
                    depression_likelihood: s.likelihood(),
                    confidence: s.confidence * 100.0,
                    reasoning_summary: "deterministic lexicon-based estimate".to_string(),
                },
            }),
            StrategyId::FewShot => AnalysisResult::FewShot(FewShotAnalysis {
                assessment: s.likelihood(),
                confidence: s.confidence * 100.0,
                indicators_found: indicators(&s),
                reasoning: "deterministic lexicon-based estimate".to_string(),
                comparison_to_examples: "not applicable for the offline provider".to_string(),
            }),
            StrategyId::FreeForm => AnalysisResult::FreeForm(FreeFormAnalysis {
                emotional_state: format!("{} negative emotion term(s) detected", s.negative),
                self_description_patterns: String::new(),
                psychological_distress_indicators: indicators(&s).join(", "),
                clinical_observations: "offline lexicon scoring, not a clinical model".to_string(),
                overall_impression: s.label().to_string(),
                depression_likelihood: s.likelihood(),
                confidence: s.confidence * 100.0,
                clinical_notes: "This is not a clinical diagnosis.".to_string(),
            }),
        };

        Ok(result)
    }
}
