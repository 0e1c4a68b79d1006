//! Pitchside CLI - football chatbot on the command line
//!
//! Usage:
//!   pitchside chat [--style <style>]
//!   pitchside ask <question> [--style <style>]
//!   pitchside intent <question> [--json]
//!   pitchside intents
//!   pitchside validate <input>

mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::RwLock;

use pitchside_chat::{create_llm_client, ChatOrchestrator, ResponseGenerator};
use pitchside_core::{
    telemetry::init_tracing, AppConfig, ConversationContext, ExtractionResult, ResponseStyle,
};
use pitchside_data::TransfermarktClient;
use pitchside_intent::IntentProcessor;

#[derive(Parser)]
#[command(name = "pitchside")]
#[command(about = "Football chatbot with rule-based intent and entity extraction")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables still override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Chat {
        /// Answer style: casual, professional or detailed
        #[arg(short, long)]
        style: Option<ResponseStyle>,
    },
    /// Answer a single question
    Ask {
        question: String,
        #[arg(short, long)]
        style: Option<ResponseStyle>,
    },
    /// Show how a message is interpreted
    Intent {
        question: String,
        /// Print the raw extraction result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the supported intents
    Intents,
    /// Check whether a message would be accepted
    Validate { input: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    if !cli.verbose {
        config.logging.level = "warn".to_string();
    }
    init_tracing(&config.logging);

    match cli.command {
        Commands::Chat { style } => {
            let chat = build_chat(&config)?;
            repl::run(&chat, style.unwrap_or(config.chat.default_style)).await?;
        }
        Commands::Ask { question, style } => {
            let chat = build_chat(&config)?;
            let mut context = ConversationContext::new();
            let style = style.unwrap_or(config.chat.default_style);
            let turn = chat.handle_turn(&question, &mut context, style).await;
            println!("{}", turn.reply);
        }
        Commands::Intent { question, json } => {
            let processor = IntentProcessor::with_config(&config.extractor);
            let result = processor.process(&question, None);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_extraction(&result);
            }
        }
        Commands::Intents => {
            let processor = IntentProcessor::with_config(&config.extractor);
            for intent in processor.supported_intents() {
                println!("{intent}");
            }
        }
        Commands::Validate { input } => {
            let processor = IntentProcessor::with_config(&config.extractor);
            if let Err(rejection) = processor.validate_input(&input) {
                bail!("Invalid input: {rejection}");
            }
            println!("Valid input ({} characters)", input.chars().count());
        }
    }

    Ok(())
}

/// Wire the interpreter, data client and responder from config
fn build_chat(config: &AppConfig) -> Result<ChatOrchestrator> {
    let data = TransfermarktClient::from_config(&config.data_api)
        .context("Failed to create football data client")?;
    let llm = create_llm_client(&config.llm).context("Failed to create LLM client")?;
    if llm.is_none() {
        tracing::info!("No LLM API key configured, using template responses");
    }

    let processor = IntentProcessor::with_config(&config.extractor);
    Ok(ChatOrchestrator::new(
        Arc::new(RwLock::new(processor)),
        Arc::new(data),
        ResponseGenerator::new(llm),
    )
    .with_recent_limit(config.data_api.recent_transfers_limit))
}

fn print_extraction(result: &ExtractionResult) {
    println!("Intent:     {}", result.intent);
    println!("Confidence: {:.2}", result.confidence);
    println!("Success:    {}", result.success);
    if let Some(error) = &result.error {
        println!("Error:      {error}");
    }

    if result.entities.is_empty() {
        println!("Entities:   (none)");
    } else {
        println!("Entities:");
        if let Ok(serde_json::Value::Object(entities)) = serde_json::to_value(&result.entities) {
            for (key, value) in entities {
                match value {
                    serde_json::Value::String(text) => println!("  {key}: {text}"),
                    other => println!("  {key}: {other}"),
                }
            }
        }
    }
}
