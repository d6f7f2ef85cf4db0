//! Analysis completeness evaluation.
//!
//! Decides whether a stored analysis can be served from cache, is a stale
//! partial write that must be regenerated, or was never computed.

use super::EntryAnalysis;

/// Classification of a stored analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisState {
    /// All required fields present; safe to serve as-is.
    Complete,
    /// `analyzedAt` is set but at least one required field is missing.
    Stale,
    /// No analysis, or one that was never stamped.
    Absent,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Complete => "complete",
            AnalysisState::Stale => "stale",
            AnalysisState::Absent => "absent",
        }
    }
}

/// Classifies a stored analysis by shape alone.
pub fn evaluate(analysis: Option<&EntryAnalysis>) -> AnalysisState {
    let Some(analysis) = analysis else {
        return AnalysisState::Absent;
    };
    if analysis.analyzed_at.is_none() {
        return AnalysisState::Absent;
    }
    if missing_fields(analysis).is_empty() {
        AnalysisState::Complete
    } else {
        AnalysisState::Stale
    }
}

/// Required fields that are missing or empty, in a stable order.
pub fn missing_fields(analysis: &EntryAnalysis) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if analysis.analyzed_at.is_none() {
        missing.push("analyzedAt");
    }
    if analysis.sentiment.is_none() {
        missing.push("sentiment");
    }
    if analysis.wellness_score.is_none() {
        missing.push("wellnessScore");
    }
    if analysis.suggestions.is_empty() {
        missing.push("suggestions");
    }
    if analysis.keywords.is_empty() {
        missing.push("keywords");
    }
    if analysis.emotions.is_empty() {
        missing.push("emotions");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{EmotionScore, Sentiment, SentimentLabel};
    use crate::domain::foundation::Timestamp;

    fn complete() -> EntryAnalysis {
        EntryAnalysis {
            sentiment: Some(Sentiment::new(0.2, 0.2, SentimentLabel::Positive)),
            emotions: vec![EmotionScore::new("a", 0.5)],
            keywords: vec!["y".to_string()],
            wellness_score: Some(50),
            suggestions: vec!["x".to_string()],
            insights: None,
            analyzed_at: Some(Timestamp::now()),
        }
    }

    #[test]
    fn missing_analysis_is_absent() {
        assert_eq!(evaluate(None), AnalysisState::Absent);
    }

    #[test]
    fn empty_document_is_absent() {
        assert_eq!(evaluate(Some(&EntryAnalysis::default())), AnalysisState::Absent);
    }

    #[test]
    fn stamp_only_is_stale() {
        let analysis = EntryAnalysis {
            analyzed_at: Some(Timestamp::now()),
            ..Default::default()
        };
        assert_eq!(evaluate(Some(&analysis)), AnalysisState::Stale);
        assert_eq!(
            missing_fields(&analysis),
            vec!["sentiment", "wellnessScore", "suggestions", "keywords", "emotions"]
        );
    }

    #[test]
    fn full_document_is_complete() {
        assert_eq!(evaluate(Some(&complete())), AnalysisState::Complete);
        assert!(missing_fields(&complete()).is_empty());
    }

    #[test]
    fn each_missing_required_field_makes_it_stale() {
        let cases: Vec<(&str, Box<dyn Fn(&mut EntryAnalysis)>)> = vec![
            ("sentiment", Box::new(|a| a.sentiment = None)),
            ("wellnessScore", Box::new(|a| a.wellness_score = None)),
            ("suggestions", Box::new(|a| a.suggestions.clear())),
            ("keywords", Box::new(|a| a.keywords.clear())),
            ("emotions", Box::new(|a| a.emotions.clear())),
        ];

        for (field, strip) in cases {
            let mut analysis = complete();
            strip(&mut analysis);
            assert_eq!(evaluate(Some(&analysis)), AnalysisState::Stale, "{field}");
            assert_eq!(missing_fields(&analysis), vec![field]);
        }
    }

    #[test]
    fn unstamped_full_document_is_absent() {
        let mut analysis = complete();
        analysis.analyzed_at = None;
        assert_eq!(evaluate(Some(&analysis)), AnalysisState::Absent);
    }

    #[test]
    fn zero_wellness_still_counts_as_present() {
        let mut analysis = complete();
        analysis.wellness_score = Some(0);
        assert_eq!(evaluate(Some(&analysis)), AnalysisState::Complete);
    }
}
