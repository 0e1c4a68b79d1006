//! LLM prompt construction

use pitchside_core::{ConversationContext, ExtractionResult, FootballData, ResponseStyle};

const NO_DATA: &str = "No specific data available";

const ANSWER_INSTRUCTIONS: &[&str] = &[
    "Please provide a helpful response about football/soccer based on the question and data provided.",
    "If the data is incomplete or missing, acknowledge it and provide what general information you can.",
    "Keep the response concise but informative (2-3 paragraphs max unless detailed style is requested).",
    "Focus on being helpful and accurate.",
];

/// System instruction setting the tone for a style
pub fn system_instruction(style: ResponseStyle) -> &'static str {
    match style {
        ResponseStyle::Casual => {
            "You are a friendly football expert who talks casually and uses emojis. \
             Keep responses conversational, engaging, and around 2-3 paragraphs. \
             Use a warm, enthusiastic tone."
        }
        ResponseStyle::Professional => {
            "You are a professional football analyst. Provide detailed, accurate \
             information in a formal tone. Structure your response clearly and professionally."
        }
        ResponseStyle::Detailed => {
            "You are a comprehensive football encyclopedia. Provide extensive details \
             and background information. Include context and comprehensive analysis."
        }
    }
}

/// Builder for answer prompts
#[derive(Debug, Default)]
pub struct PromptBuilder {
    system_instruction: String,
    question: String,
    intent: String,
    entities: String,
    previous_intent: Option<String>,
    data: Option<String>,
    instructions: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt for one chat turn, with the standard answer instructions
    pub fn for_turn(
        question: &str,
        result: &ExtractionResult,
        data: &FootballData,
        context: &ConversationContext,
        style: ResponseStyle,
    ) -> Self {
        let mut builder = Self::new()
            .system(system_instruction(style))
            .question(question)
            .intent(result.intent.as_str())
            .entities(serde_json::to_string(&result.entities).unwrap_or_default())
            .data(data);

        if let Some(previous) = context.last_intent {
            builder = builder.previous_intent(previous.as_str());
        }

        for instruction in ANSWER_INSTRUCTIONS {
            builder = builder.add_instruction(*instruction);
        }
        builder
    }

    /// Set system instruction
    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Set the user question
    pub fn question(mut self, q: impl Into<String>) -> Self {
        self.question = q.into();
        self
    }

    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    pub fn entities(mut self, entities: impl Into<String>) -> Self {
        self.entities = entities.into();
        self
    }

    /// Intent of the turn before this one
    pub fn previous_intent(mut self, intent: impl Into<String>) -> Self {
        self.previous_intent = Some(intent.into());
        self
    }

    /// Attach fetched data as pretty JSON; absent data is left out
    pub fn data(mut self, data: &FootballData) -> Self {
        self.data = match data {
            FootballData::Absent => None,
            data => serde_json::to_string_pretty(data).ok(),
        };
        self
    }

    /// Add an instruction
    pub fn add_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    /// Build the final prompt
    pub fn build(self) -> String {
        let mut prompt = String::new();

        if !self.system_instruction.is_empty() {
            prompt.push_str(&format!("System: {}\n\n", self.system_instruction));
        }

        prompt.push_str(&format!("User Question: {}\n", self.question));
        prompt.push_str(&format!("Intent: {}\n", self.intent));
        prompt.push_str(&format!("Entities: {}\n", self.entities));
        if let Some(previous) = &self.previous_intent {
            prompt.push_str(&format!("Previous Intent: {previous}\n"));
        }
        prompt.push('\n');

        prompt.push_str("Available Data: ");
        prompt.push_str(self.data.as_deref().unwrap_or(NO_DATA));
        prompt.push_str("\n\n");

        prompt.push_str(&self.instructions.join("\n"));
        prompt
    }
}
