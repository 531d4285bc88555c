//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "telegram-chatgpt-bot", version, about = "Telegram bot that answers messages with the OpenAI chat completion API")]
pub struct Cli {
    /// Path to the JSON config file
    pub config_filepath: Option<PathBuf>,
}

/// Usage text printed when no config file is given.
pub fn usage(program: &str) -> String {
    format!("\nUsage: {} [config_filepath]\n", program)
}
