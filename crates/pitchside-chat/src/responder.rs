//! Answer rendering: LLM first, templates as the fallback

use std::sync::Arc;

use tracing::{debug, warn};

use pitchside_core::{
    ConversationContext, ExtractionResult, FootballData, Intent, LlmClient, ResponseStyle,
};

use crate::prompt::PromptBuilder;
use crate::templates;

/// Renders the reply for one chat turn
#[derive(Clone, Default)]
pub struct ResponseGenerator {
    llm: Option<Arc<dyn LlmClient>>,
}

impl ResponseGenerator {
    /// Generator that only uses templates
    pub fn templates_only() -> Self {
        Self { llm: None }
    }

    /// Generator that asks `llm` first
    pub fn with_llm(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm: Some(llm) }
    }

    /// Generator over an optional LLM client
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    /// Name of the configured LLM, if any
    pub fn llm_name(&self) -> Option<&str> {
        self.llm.as_deref().map(|llm| llm.name())
    }

    /// Render the reply
    ///
    /// Greetings and help always use their fixed text. Any LLM failure is
    /// logged and answered from the template instead.
    pub async fn generate(
        &self,
        result: &ExtractionResult,
        data: &FootballData,
        question: &str,
        context: &ConversationContext,
        style: ResponseStyle,
    ) -> String {
        if let Some(llm) = self.llm_for(result.intent) {
            let prompt = PromptBuilder::for_turn(question, result, data, context, style).build();
            debug!(llm = llm.name(), prompt_chars = prompt.len(), "Calling LLM");

            match llm.generate(&prompt).await {
                Ok(answer) => return answer,
                Err(e) => warn!(llm = llm.name(), "LLM failed, falling back to templates: {}", e),
            }
        }

        templates::render(result.intent, &result.entities, data, style)
    }

    fn llm_for(&self, intent: Intent) -> Option<&Arc<dyn LlmClient>> {
        match intent {
            Intent::Greeting | Intent::Help => None,
            _ => self.llm.as_ref(),
        }
    }
}
