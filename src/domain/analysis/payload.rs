//! Parsing of the external model's analysis reply.
//!
//! The model is asked for bare JSON but often wraps it in a markdown fence or
//! surrounds it with prose. Parsing tries, in order: the trimmed text, the
//! text with a code fence stripped, and the span from the first `{` to the
//! last `}`. A payload that parses but lacks any required field is treated
//! the same as one that does not parse.

use serde::Deserialize;
use serde_json::Value;

use super::{AnalysisInsights, AnalysisResult, EmotionScore, Sentiment, SentimentLabel};

/// Outcome of parsing a model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAnalysis {
    /// A complete, range-checked analysis.
    Parsed(AnalysisResult),
    /// The reply could not be turned into a complete analysis. Holds the raw text.
    Unparseable(String),
}

impl ParsedAnalysis {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedAnalysis::Parsed(_))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    sentiment: Option<SentimentPayload>,
    #[serde(default)]
    emotions: Vec<EmotionPayload>,
    #[serde(default)]
    keywords: Vec<String>,
    wellness_score: Option<f64>,
    #[serde(default)]
    suggestions: Vec<String>,
    insights: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SentimentPayload {
    score: f64,
    magnitude: Option<f64>,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmotionPayload {
    emotion: String,
    confidence: Option<f64>,
}

/// Parses a raw model reply into an analysis.
pub fn parse_analysis_payload(raw: &str) -> ParsedAnalysis {
    let trimmed = raw.trim();
    let candidates = [
        Some(trimmed),
        Some(strip_code_fence(trimmed)),
        extract_braced(trimmed),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Some(result) = try_parse(candidate) {
            return ParsedAnalysis::Parsed(result);
        }
    }
    ParsedAnalysis::Unparseable(raw.to_string())
}

fn try_parse(text: &str) -> Option<AnalysisResult> {
    let payload: AnalysisPayload = serde_json::from_str(text).ok()?;
    payload.into_result()
}

impl AnalysisPayload {
    fn into_result(self) -> Option<AnalysisResult> {
        let sentiment = self.sentiment?;
        if !sentiment.score.is_finite() {
            return None;
        }
        let label = sentiment
            .label
            .as_deref()
            .and_then(SentimentLabel::parse)
            .unwrap_or_else(|| SentimentLabel::for_score(sentiment.score));
        let magnitude = sentiment.magnitude.unwrap_or(sentiment.score.abs());

        let emotions: Vec<EmotionScore> = self
            .emotions
            .into_iter()
            .filter(|e| !e.emotion.trim().is_empty())
            .map(|e| EmotionScore::new(e.emotion.trim(), e.confidence.unwrap_or(0.5)))
            .collect();
        let keywords = non_blank(self.keywords);
        let suggestions = non_blank(self.suggestions);

        let wellness = self.wellness_score.filter(|w| w.is_finite())?;

        if emotions.is_empty() || keywords.is_empty() || suggestions.is_empty() {
            return None;
        }

        Some(AnalysisResult {
            sentiment: Sentiment::new(sentiment.score, magnitude, label),
            emotions,
            keywords,
            wellness_score: wellness.round().clamp(0.0, 100.0) as u8,
            suggestions,
            insights: self.insights.as_ref().and_then(insights_from_value),
        })
    }
}

/// Reads insights leniently; non-string fields become empty strings.
fn insights_from_value(value: &Value) -> Option<AnalysisInsights> {
    let obj = value.as_object()?;
    let field = |name: &str| {
        obj.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(AnalysisInsights {
        patterns: field("patterns"),
        strengths: field("strengths"),
        concerns: field("concerns"),
        growth: field("growth"),
    })
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Removes a leading ```` ```json ```` or ```` ``` ```` fence and a trailing fence.
fn strip_code_fence(text: &str) -> &str {
    let body = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let body = body.trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Span from the first `{` to the last `}`, inclusive.
fn extract_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "sentiment": {"score": 0.6, "magnitude": 0.7, "label": "positive"},
        "emotions": [{"emotion": "joy", "confidence": 0.9}],
        "keywords": ["walk", "river"],
        "wellnessScore": 82,
        "suggestions": ["Keep walking"],
        "insights": {"patterns": "p", "strengths": "s", "concerns": "c", "growth": "g"}
    }"#;

    fn parsed(raw: &str) -> AnalysisResult {
        match parse_analysis_payload(raw) {
            ParsedAnalysis::Parsed(result) => result,
            ParsedAnalysis::Unparseable(text) => panic!("unparseable: {text}"),
        }
    }

    #[test]
    fn parses_bare_json() {
        let result = parsed(FULL);
        assert_eq!(result.sentiment.label, SentimentLabel::Positive);
        assert_eq!(result.wellness_score, 82);
        assert_eq!(result.keywords, vec!["walk", "river"]);
        assert_eq!(result.insights.unwrap().growth, "g");
    }

    #[test]
    fn parses_json_inside_code_fence() {
        let fenced = format!("```json\n{FULL}\n```");
        assert_eq!(parsed(&fenced).wellness_score, 82);

        let plain_fence = format!("```\n{FULL}\n```");
        assert_eq!(parsed(&plain_fence).wellness_score, 82);
    }

    #[test]
    fn extracts_json_surrounded_by_prose() {
        let chatty = format!("Here is the analysis you asked for:\n{FULL}\nHope this helps!");
        assert_eq!(parsed(&chatty).emotions[0].emotion, "joy");
    }

    #[test]
    fn missing_required_field_is_unparseable() {
        let no_keywords = FULL.replace(r#""keywords": ["walk", "river"],"#, "");
        assert!(!parse_analysis_payload(&no_keywords).is_parsed());

        let empty_suggestions = FULL.replace(r#"["Keep walking"]"#, "[]");
        assert!(!parse_analysis_payload(&empty_suggestions).is_parsed());

        let no_wellness = FULL.replace(r#""wellnessScore": 82,"#, "");
        assert!(!parse_analysis_payload(&no_wellness).is_parsed());
    }

    #[test]
    fn garbage_is_unparseable_and_keeps_raw_text() {
        assert_eq!(
            parse_analysis_payload("I cannot help with that."),
            ParsedAnalysis::Unparseable("I cannot help with that.".to_string())
        );
        assert!(!parse_analysis_payload("{ not json }").is_parsed());
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let wild = r#"{
            "sentiment": {"score": 3.5, "magnitude": -1, "label": "POSITIVE"},
            "emotions": [{"emotion": "awe", "confidence": 4}],
            "keywords": ["k"],
            "wellnessScore": 140.6,
            "suggestions": ["s"]
        }"#;
        let result = parsed(wild);
        assert_eq!(result.sentiment.score, 1.0);
        assert_eq!(result.sentiment.magnitude, 0.0);
        assert_eq!(result.emotions[0].confidence, 1.0);
        assert_eq!(result.wellness_score, 100);
        assert!(result.insights.is_none());
    }

    #[test]
    fn unknown_label_is_derived_from_score() {
        let odd = FULL.replace(r#""label": "positive""#, r#""label": "hopeful""#);
        assert_eq!(parsed(&odd).sentiment.label, SentimentLabel::Positive);
    }

    #[test]
    fn mixed_label_from_model_is_kept() {
        let mixed = FULL.replace(r#""label": "positive""#, r#""label": "mixed""#);
        assert_eq!(parsed(&mixed).sentiment.label, SentimentLabel::Mixed);
    }
}
