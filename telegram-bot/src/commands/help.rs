use async_trait::async_trait;

use super::Command;
use crate::core::Result;

/// Build version with target platform, e.g. `0.1.0 (linux/x86_64)`.
pub fn version_string() -> String {
    format!(
        "{} ({}/{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub fn help_message() -> String {
    format!(
        "Help message here:

/count [some_text] : count the number of tokens in a given text.
/stats : show stats of this bot.
/help : show this help message.

<i>version: {}</i>
",
        version_string()
    )
}

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    async fn execute(&self, _args: &str) -> Result<String> {
        Ok(help_message())
    }
}
