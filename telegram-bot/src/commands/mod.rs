//! Bot commands (`/start`, `/help`, `/stats`, `/count`) and the registry that dispatches them.

mod count;
mod help;
mod start;
mod stats;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::Result;

pub use count::CountCommand;
pub use help::{help_message, version_string, HelpCommand};
pub use start::StartCommand;
pub use stats::StatsCommand;

/// A slash command. The returned text is sent as HTML.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, args: &str) -> Result<String>;

    /// Whether the reply references the command message.
    fn replies_to_message(&self) -> bool {
        true
    }
}

/// Text produced for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub reply_to_message: bool,
}

/// Maps command names (`/start`) to their implementations.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` under `name`; a leading `/` is added when missing.
    pub fn register(&mut self, name: &str, command: Arc<dyn Command>) -> &mut Self {
        let name = if name.starts_with('/') {
            name.to_string()
        } else {
            format!("/{}", name)
        };
        self.commands.insert(name, command);
        self
    }

    /// Runs `name`; unknown names produce the "not supported" reply.
    pub async fn execute(&self, name: &str, args: &str) -> Result<CommandOutput> {
        match self.commands.get(name) {
            Some(command) => Ok(CommandOutput {
                text: command.execute(args).await?,
                reply_to_message: command.replies_to_message(),
            }),
            None => Ok(CommandOutput {
                text: format!("Not a supported bot command: {}", name),
                reply_to_message: true,
            }),
        }
    }
}

/// Splits `/name@bot args` into (`/name`, `args`). Returns `None` for non-command text.
///
/// A bare `/` is still a command; its name is `/`.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim_start();
    if !text.starts_with('/') {
        return None;
    }

    let (token, args) = match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    };
    let name = token.split('@').next().unwrap_or(token);

    Some((name.to_string(), args.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Command for Echo {
        async fn execute(&self, args: &str) -> Result<String> {
            Ok(format!("echo: {}", args))
        }

        fn replies_to_message(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("/count hello  world "),
            Some(("/count".to_string(), "hello  world".to_string()))
        );
        assert_eq!(
            parse_command("/help@some_bot"),
            Some(("/help".to_string(), String::new()))
        );
        assert_eq!(
            parse_command("/count\nline one"),
            Some(("/count".to_string(), "line one".to_string()))
        );
        assert_eq!(parse_command("hello /count"), None);
        assert_eq!(parse_command("/"), Some(("/".to_string(), String::new())));
        assert_eq!(
            parse_command("/ hello"),
            Some(("/".to_string(), "hello".to_string()))
        );
    }

    #[tokio::test]
    async fn test_registry_dispatch_and_unknown() {
        let mut registry = CommandRegistry::new();
        registry.register("echo", Arc::new(Echo));

        let out = registry.execute("/echo", "x").await.unwrap();
        assert_eq!(out.text, "echo: x");
        assert!(!out.reply_to_message);

        let out = registry.execute("/foo", "").await.unwrap();
        assert_eq!(out.text, "Not a supported bot command: /foo");
        assert!(out.reply_to_message);

        let out = registry.execute("/", "hello").await.unwrap();
        assert_eq!(out.text, "Not a supported bot command: /");
    }
}
