//! Startup sequence: validate settings, resolve credentials, build components, poll updates.

use anyhow::Result;
use tracing::{info, instrument};

use crate::components::build_bot_components;
use crate::config::{credential_provider, Settings};
use crate::telegram::run_dispatcher;

#[instrument(skip(settings))]
pub async fn run_bot(settings: Settings) -> Result<()> {
    settings.validate()?;

    let provider = credential_provider(&settings)?;
    let credentials = provider.credentials().await?;
    info!(provider = provider.name(), "credentials resolved");

    let components = build_bot_components(&settings, &credentials).await?;
    let handler_chain = components.handler_chain(&settings);
    info!(
        request_log = components.request_log.is_enabled(),
        "handler chain ready"
    );

    run_dispatcher(components.teloxide_bot.clone(), handler_chain).await
}
