//! Interactive chat loop

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use pitchside_chat::{ChatOrchestrator, WELCOME_MESSAGE};
use pitchside_core::{ConversationContext, ResponseStyle};

const REPL_HELP: &str = "\
Commands:
  /clear          forget the conversation so far
  /style [name]   show or set the answer style (casual, professional, detailed)
  /help           show this help
  /quit           leave the chat";

/// One line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Message(String),
    Clear,
    Style(Option<String>),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Message(line.to_string());
        };

        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string);

        match name.as_str() {
            "clear" | "reset" => Self::Clear,
            "style" => Self::Style(arg),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(name),
        }
    }
}

/// Run the chat loop on stdin/stdout until `/quit` or end of input
pub async fn run(chat: &ChatOrchestrator, mut style: ResponseStyle) -> Result<()> {
    let mut context = ConversationContext::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{WELCOME_MESSAGE}");
    println!("Type /help for commands.\n");

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{REPL_HELP}\n"),
            ReplCommand::Clear => {
                context.clear();
                println!("Conversation cleared.\n");
            }
            ReplCommand::Style(None) => println!("Current style: {style}\n"),
            ReplCommand::Style(Some(name)) => match name.parse() {
                Ok(new_style) => {
                    style = new_style;
                    println!("Style set to {style}.\n");
                }
                Err(e) => println!("{e}\n"),
            },
            ReplCommand::Unknown(name) => println!("Unknown command /{name}. Type /help.\n"),
            ReplCommand::Message(message) => {
                let turn = chat.handle_turn(&message, &mut context, style).await;
                println!("bot> {}\n", turn.reply);
                if !turn.quick_replies.is_empty() {
                    println!("  try: {}\n", turn.quick_replies.join(" | "));
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_messages() {
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
        assert_eq!(
            ReplCommand::parse("  Tell me about Messi "),
            ReplCommand::Message("Tell me about Messi".to_string())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/QUIT"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/style"), ReplCommand::Style(None));
        assert_eq!(
            ReplCommand::parse("/style  detailed "),
            ReplCommand::Style(Some("detailed".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/dance"),
            ReplCommand::Unknown("dance".to_string())
        );
    }
}
