//! Model-backed `EntryAnalyzer`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{parse_analysis_payload, ParsedAnalysis};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, EntryAnalysisRequest, EntryAnalyzer, MessageRole,
    RequestMetadata,
};

pub const DEFAULT_ANALYSIS_MODEL: &str = "openai/gpt-4o";

const ANALYSIS_MAX_TOKENS: u32 = 800;
const ANALYSIS_TEMPERATURE: f32 = 0.2;
const ANALYSIS_TOP_P: f32 = 0.8;

const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an expert mental health analyst. Analyze the following journal entry and respond ONLY with valid JSON - no additional text, no markdown, no explanation.

Return this EXACT JSON structure with real analysis:
{
  "sentiment": {
    "score": <number between -1 and 1>,
    "magnitude": <number between 0 and 1>,
    "label": "positive" | "negative" | "neutral" | "mixed"
  },
  "emotions": [
    {"emotion": "<emotion name>", "confidence": <number between 0 and 1>}
  ],
  "keywords": ["<keyword1>", "<keyword2>", "<keyword3>"],
  "wellnessScore": <number between 0 and 100>,
  "suggestions": [
    "<actionable suggestion 1>",
    "<actionable suggestion 2>",
    "<actionable suggestion 3>"
  ],
  "insights": {
    "patterns": "<patterns you notice>",
    "strengths": "<positive aspects>",
    "concerns": "<areas needing attention>",
    "growth": "<growth opportunities>"
  }
}

CRITICAL: Return ONLY valid JSON. No text before or after the JSON object."#;

/// Asks the model for a JSON analysis and parses the reply.
pub struct LlmEntryAnalyzer {
    ai_provider: Arc<dyn AIProvider>,
    model: String,
    title: Option<String>,
}

impl LlmEntryAnalyzer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
            title: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the `X-Title` sent with analysis calls.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn user_prompt(request: &EntryAnalysisRequest) -> String {
        format!(
            "Please analyze this journal entry:\n\nTitle: \"{}\"\nContent: \"{}\"\nMood: \"{}\"\n\nProvide analysis in the JSON format specified.",
            request.title, request.content, request.mood
        )
    }

    fn build_request(&self, request: &EntryAnalysisRequest) -> CompletionRequest {
        let mut completion =
            CompletionRequest::new(RequestMetadata::new(request.user_id.clone(), "analysis"))
                .with_system_prompt(ANALYSIS_SYSTEM_PROMPT)
                .with_message(MessageRole::User, Self::user_prompt(request))
                .with_model(self.model.clone())
                .with_max_tokens(ANALYSIS_MAX_TOKENS)
                .with_temperature(ANALYSIS_TEMPERATURE)
                .with_top_p(ANALYSIS_TOP_P);
        if let Some(ref title) = self.title {
            completion = completion.with_title(title.clone());
        }
        completion
    }
}

#[async_trait]
impl EntryAnalyzer for LlmEntryAnalyzer {
    async fn analyze(&self, request: &EntryAnalysisRequest) -> Result<ParsedAnalysis, AIError> {
        let response = self.ai_provider.complete(self.build_request(request)).await?;
        tracing::debug!(
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Analysis completion received"
        );
        Ok(parse_analysis_payload(&response.content))
    }
}
