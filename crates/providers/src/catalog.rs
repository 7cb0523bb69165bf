//! Prompt strategy catalog.
//!
//! A closed, versioned set: one instruction template per [`StrategyId`],
//! plus the display description the API exposes. Templates substitute the
//! text under analysis for the `{text}` placeholder. Each template pins the
//! exact JSON object the backend must answer with; the shapes are mirrored
//! one-to-one by `depsig_core::analysis`.

use depsig_core::StrategyId;
use serde::Serialize;

/// One catalog entry, introspectable by clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: StrategyId,
    pub description: &'static str,
    #[serde(skip)]
    pub template: &'static str,
}

/// All six entries, in catalog order.
pub fn entries() -> [CatalogEntry; 6] {
    StrategyId::ALL.map(|id| CatalogEntry {
        id,
        description: id.description(),
        template: template(id),
    })
}

/// Render the instruction prompt for a strategy.
pub fn render(strategy: StrategyId, text: &str) -> String {
    template(strategy).replace("{text}", text)
}

fn template(strategy: StrategyId) -> &'static str {
    match strategy {
        StrategyId::Simple => SIMPLE,
        StrategyId::Structured => STRUCTURED,
        StrategyId::FeatureExtraction => FEATURE_EXTRACTION,
        StrategyId::ChainOfThought => CHAIN_OF_THOUGHT,
        StrategyId::FewShot => FEW_SHOT,
        StrategyId::FreeForm => FREE_FORM,
    }
}

const SIMPLE: &str = r#"You are a mental health assessment assistant. Analyze the following text for linguistic markers associated with depression: negative self-referential language, hopelessness, social withdrawal indicators, reduced future-oriented thinking, and anhedonia markers.

TEXT TO ANALYZE:
{text}

Respond ONLY with a valid JSON object in this exact format:
{
  "prediction": {
    "class": "depression or no-depression",
    "confidence": 0.0,
    "probability_depression": 0.0,
    "probability_no_depression": 0.0
  },
  "linguistic_features": {
    "first_person_pronouns": 0,
    "negative_emotion_words": 0,
    "hopelessness_indicators": 0,
    "social_isolation_markers": 0,
    "future_oriented_statements": 0
  }
}"#;

const STRUCTURED: &str = r#"You are a mental health assessment assistant analyzing text for depression indicators.

Evaluate the text against these markers, noting specific evidence for each marker present:
- Negative self-talk or low self-worth
- Hopelessness about the future
- Social withdrawal or isolation
- Loss of interest or pleasure
- Fatigue or low energy
- Persistent sadness or emptiness
- Difficulty concentrating
- Changes in sleep or appetite

TEXT TO ANALYZE:
{text}

Respond ONLY with a valid JSON object in this exact format:
{
  "depression_likelihood": "Low|Medium|High",
  "markers_present": [],
  "evidence": {},
  "confidence": 0
}"#;

const FEATURE_EXTRACTION: &str = r#"You are a linguistic analysis system specialized in mental health assessment. Extract quantifiable depression-associated features from the following text, providing a count for each.

TEXT TO ANALYZE:
{text}

Count: first-person singular pronouns; first-person plural pronouns; negative emotion words; positive emotion words; social isolation language; absolutist language; death or suicide references; future-, past-, and present-oriented statements.

Respond ONLY with a single valid JSON object in this exact format. Do NOT wrap the JSON in markdown or add any other text:
{
  "features": {
    "first_person_singular": 0,
    "first_person_plural": 0,
    "negative_emotion_words": 0,
    "positive_emotion_words": 0,
    "social_isolation_language": 0,
    "absolutist_language": 0,
    "death_suicide_references": 0,
    "future_oriented_statements": 0,
    "past_oriented_statements": 0,
    "present_oriented_statements": 0
  },
  "overall_assessment": {
    "depression_probability": 0.0,
    "confidence_score": 0.0,
    "primary_indicators": []
  }
}"#;

const CHAIN_OF_THOUGHT: &str = r#"You are a mental health assessment assistant. Analyze the following text step by step for depression indicators.

TEXT TO ANALYZE:
{text}

STEP 1: INITIAL OBSERVATION - first impression of tone and emotional quality.
STEP 2: LINGUISTIC ANALYSIS - pronoun usage, emotion words, self-focused vs other-focused ratio.
STEP 3: CONTENT THEMES - social connections, future outlook, self-perception, activity level.
STEP 4: PATTERN RECOGNITION - rumination, social withdrawal, anhedonia, worthlessness.
STEP 5: CONFIDENCE ASSESSMENT - clear indicators, contradictory signals, sufficient information.

Respond ONLY with a valid JSON object in this exact format:
{
  "initial_observation": "",
  "linguistic_analysis": {
    "pronoun_usage": "",
    "emotion_words": "",
    "self_focused_ratio": ""
  },
  "content_themes": {
    "social_connections": "",
    "future_outlook": "",
    "self_perception": "",
    "activity_level": ""
  },
  "pattern_recognition": {
    "rumination": false,
    "social_withdrawal": false,
    "anhedonia": false,
    "worthlessness": false
  },
  "confidence_assessment": {
    "clear_indicators": false,
    "contradictory_signals": false,
    "sufficient_information": false
  },
  "final_classification": {
    "depression_likelihood": "Low|Medium|High",
    "confidence": 0,
    "reasoning_summary": ""
  }
}"#;

const FEW_SHOT: &str = r#"You are a mental health assessment assistant trained to detect depression indicators in text.

EXAMPLE 1 - DEPRESSION DETECTED:
Text: "I've been feeling so empty lately. Nothing brings me joy anymore. I just want to stay in bed all day. I feel like such a burden to everyone."
Assessment: HIGH (95% confidence) - anhedonia, withdrawal, negative self-perception, hopelessness.

EXAMPLE 2 - NO DEPRESSION DETECTED:
Text: "This semester has been challenging, but I'm managing okay. Studying with friends helps. Looking forward to winter break."
Assessment: LOW (10% confidence) - adaptive coping, social connection, future orientation.

Now analyze the following text using the same approach:

TEXT TO ANALYZE:
{text}

Respond ONLY with a valid JSON object in this exact format:
{
  "assessment": "Low|Medium|High",
  "confidence": 0,
  "indicators_found": [],
  "reasoning": "",
  "comparison_to_examples": ""
}"#;

const FREE_FORM: &str = r#"You are an experienced clinical psychologist analyzing written text for signs of depression. Read the following text carefully and assess the writer's emotional state, self-description patterns, and any indications of psychological distress.

TEXT TO ANALYZE:
{text}

Respond ONLY with a valid JSON object in this exact format:
{
  "emotional_state": "",
  "self_description_patterns": "",
  "psychological_distress_indicators": "",
  "clinical_observations": "",
  "overall_impression": "",
  "depression_likelihood": "Low|Medium|High",
  "confidence": 0,
  "clinical_notes": ""
}"#;
