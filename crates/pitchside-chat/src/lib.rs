//! Pitchside Chat - Answer rendering and turn orchestration
//!
//! This crate turns an interpreted message into a reply:
//! - LLM clients (Gemini, OpenAI-compatible) and prompt construction
//! - Per-intent template answers used without an LLM or when it fails
//! - Display helpers and follow-up suggestions
//! - The chat orchestrator tying interpreter, data source and renderer together

pub mod format;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod responder;
pub mod suggestions;
pub mod templates;

pub use llm::{create_llm_client, GeminiClient, OpenAiClient};
pub use orchestrator::{ChatOrchestrator, ChatTurn, ERROR_REPLY};
pub use prompt::PromptBuilder;
pub use responder::ResponseGenerator;
pub use suggestions::quick_replies;

/// Greeting shown when a conversation starts
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your football assistant. Ask me about players, teams, transfers, or statistics!";
