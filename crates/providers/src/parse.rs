//! Structural parsing of normalized replies into strategy shapes.

use depsig_core::{
    AnalysisResult, ChainOfThoughtAnalysis, FeatureExtraction, FewShotAnalysis, FreeFormAnalysis,
    SimpleAnalysis, StrategyId, StructuredAnalysis,
};

use crate::failure::ProviderFailure;
use crate::normalize::extract_json;

const SNIPPET_LEN: usize = 200;

/// Parse a raw backend reply into the shape the strategy demands.
///
/// Normalization (fence stripping, object extraction) happens first; any
/// remaining structural mismatch is `MalformedResponse` carrying a truncated
/// snippet of the offending reply. We never guess at partial data.
pub fn parse_result(strategy: StrategyId, raw: &str) -> Result<AnalysisResult, ProviderFailure> {
    let json = extract_json(raw).ok_or_else(|| {
        ProviderFailure::MalformedResponse(format!("no JSON object in reply: {}", snippet(raw)))
    })?;

    let parsed = match strategy {
        StrategyId::Simple => {
            serde_json::from_str::<SimpleAnalysis>(json).map(AnalysisResult::Simple)
        }
        StrategyId::Structured => {
            serde_json::from_str::<StructuredAnalysis>(json).map(AnalysisResult::Structured)
        }
        StrategyId::FeatureExtraction => serde_json::from_str::<FeatureExtraction>(json)
            .map(AnalysisResult::FeatureExtraction),
        StrategyId::ChainOfThought => serde_json::from_str::<ChainOfThoughtAnalysis>(json)
            .map(AnalysisResult::ChainOfThought),
        StrategyId::FewShot => {
            serde_json::from_str::<FewShotAnalysis>(json).map(AnalysisResult::FewShot)
        }
        StrategyId::FreeForm => {
            serde_json::from_str::<FreeFormAnalysis>(json).map(AnalysisResult::FreeForm)
        }
    };

    parsed.map_err(|e| {
        ProviderFailure::MalformedResponse(format!("{e} in reply: {}", snippet(json)))
    })
}

fn snippet(text: &str) -> String {
    let mut end = SNIPPET_LEN.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if end < text.len() {
        format!("{}…", &text[..end])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_shape() {
        let raw = r#"{
            "prediction": {
                "class": "depression",
                "confidence": 0.9,
                "probability_depression": 0.9,
                "probability_no_depression": 0.1
            },
            "linguistic_features": { "negative_emotion_words": 4 }
        }"#;
        let result = parse_result(StrategyId::Simple, raw).unwrap();
        assert_eq!(result.strategy(), StrategyId::Simple);
        assert_eq!(result.summary().label, "depression");
    }

    #[test]
    fn parses_fenced_structured_shape() {
        let raw = "```json\n{\"depression_likelihood\": \"High\", \"markers_present\": [\"fatigue\"], \"evidence\": {\"fatigue\": \"too tired\"}, \"confidence\": 80}\n```";
        let result = parse_result(StrategyId::Structured, raw).unwrap();
        assert_eq!(result.strategy(), StrategyId::Structured);
    }

    #[test]
    fn wrong_shape_is_malformed_not_partial() {
        // A valid structured reply fed through the feature_extraction parser.
        let raw = r#"{"depression_likelihood": "Low", "markers_present": [], "evidence": {}, "confidence": 20}"#;
        let err = parse_result(StrategyId::FeatureExtraction, raw).unwrap_err();
        assert!(matches!(err, ProviderFailure::MalformedResponse(_)));
    }

    #[test]
    fn garbled_reply_is_malformed() {
        let err = parse_result(StrategyId::Simple, "sorry, as a language model…").unwrap_err();
        assert!(matches!(err, ProviderFailure::MalformedResponse(_)));
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(1000);
        let err = parse_result(StrategyId::Simple, &long).unwrap_err();
        let msg = err.to_string();
        assert!(msg.len() < 300, "snippet not truncated: {} chars", msg.len());
    }
}
