//! Binary: loads the JSON config named on the command line and runs the bot.

use anyhow::Result;
use clap::Parser;
use telegram_chatgpt_bot::{init_tracing, run_bot, usage, Cli, Settings};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(config_filepath) = cli.config_filepath else {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "telegram-chatgpt-bot".to_string());
        print!("{}", usage(&program));
        return Ok(());
    };

    let settings = match Settings::load(&config_filepath) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(None, false)?;
            error!(error = %e, "failed to load config");
            return Err(e.into());
        }
    };

    init_tracing(settings.log_filepath.as_deref(), settings.verbose)?;
    if let Err(e) = run_bot(settings).await {
        error!(error = %e, "bot stopped");
        return Err(e);
    }
    Ok(())
}
