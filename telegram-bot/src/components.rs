//! Component factory: builds BotComponents from settings and resolved credentials, and
//! assembles the handler chain. Isolates assembly logic from the runner.

use anyhow::Result;
use llm_client::{LlmClient, OpenAILlmClient};
use openai_client::{OpenAIClient, OpenAIClientOptions};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::chain::HandlerChain;
use crate::commands::{CommandRegistry, CountCommand, HelpCommand, StartCommand, StatsCommand};
use crate::config::{Credentials, Settings};
use crate::core::Bot;
use crate::handlers::{
    AllowListHandler, CommandHandler, ConversationHandler, LoggingHandler, Notifier,
    UnsupportedHandler,
};
use crate::request_log::RequestLog;
use crate::telegram::TelegramBotAdapter;
use crate::token_counter::{TokenCounter, ENCODING_NAME};

/// Long-lived dependencies shared by every update.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub llm_client: Arc<dyn LlmClient>,
    pub request_log: RequestLog,
    pub token_counter: Arc<TokenCounter>,
}

#[instrument(skip(settings, credentials))]
pub async fn build_bot_components(
    settings: &Settings,
    credentials: &Credentials,
) -> Result<BotComponents> {
    let teloxide_bot = {
        let bot = teloxide::Bot::new(credentials.telegram_bot_token.clone());
        match settings.telegram_api_url.as_deref() {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("invalid telegram_api_url {}: {}", url, e))?;
                info!(url = %url, "using custom Telegram API URL");
                bot.set_api_url(url)
            }
            None => bot,
        }
    };

    let mut options = OpenAIClientOptions::new(credentials.openai_api_key.clone())
        .with_timeout(settings.request_timeout());
    if let Some(org_id) = &credentials.openai_org_id {
        options = options.with_org_id(org_id.clone());
    }
    if let Some(base_url) = &settings.openai_base_url {
        options = options.with_base_url(base_url.clone());
    }
    let llm = OpenAILlmClient::new(OpenAIClient::new(options)?)
        .with_model(settings.openai_model.clone());
    info!(model = %llm.model(), "completion client ready");

    let request_log = RequestLog::open(settings.db_filepath.as_deref()).await;

    let token_counter = Arc::new(TokenCounter::new());
    let warm = token_counter.clone();
    match tokio::task::spawn_blocking(move || warm.preload()).await {
        Ok(Ok(())) => info!(encoding = ENCODING_NAME, "tokenizer ready"),
        Ok(Err(e)) => warn!(error = %e, "tokenizer unavailable, /count will report errors"),
        Err(e) => warn!(error = %e, "tokenizer preload task failed"),
    }

    Ok(BotComponents {
        bot: Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
        teloxide_bot,
        llm_client: Arc::new(llm),
        request_log,
        token_counter,
    })
}

/// `/start`, `/help`, `/stats` and `/count`.
pub fn build_command_registry(
    request_log: RequestLog,
    token_counter: Arc<TokenCounter>,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register("/start", Arc::new(StartCommand))
        .register("/help", Arc::new(HelpCommand))
        .register("/stats", Arc::new(StatsCommand::new(request_log)))
        .register("/count", Arc::new(CountCommand::new(token_counter)));
    registry
}

/// Allow-list → logging → commands → conversation → unsupported.
pub fn build_handler_chain(
    settings: &Settings,
    bot: Arc<dyn Bot>,
    llm_client: Arc<dyn LlmClient>,
    request_log: RequestLog,
    commands: CommandRegistry,
) -> HandlerChain {
    let notifier = Notifier::new(bot, settings.verbose);

    HandlerChain::new()
        .add_handler(Arc::new(AllowListHandler::new(settings.allowed_users())))
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(commands, notifier.clone())))
        .add_handler(Arc::new(ConversationHandler::new(
            llm_client,
            notifier.clone(),
            request_log,
        )))
        .add_handler(Arc::new(UnsupportedHandler::new(notifier)))
}

impl BotComponents {
    pub fn handler_chain(&self, settings: &Settings) -> HandlerChain {
        let commands =
            build_command_registry(self.request_log.clone(), self.token_counter.clone());
        build_handler_chain(
            settings,
            self.bot.clone(),
            self.llm_client.clone(),
            self.request_log.clone(),
            commands,
        )
    }
}
