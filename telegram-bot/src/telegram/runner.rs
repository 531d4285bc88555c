//! Long-polling dispatcher: converts teloxide messages (new and edited) to core::Message and
//! passes them to the HandlerChain one at a time.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::{TelegramMessageWrapper, TelegramUserWrapper};
use crate::chain::HandlerChain;
use crate::core::{ToCoreMessage, ToCoreUser};

/// Display name of the bot account (`@handle (First)`); fails when the token is rejected.
pub async fn bot_identity(bot: &teloxide::Bot) -> Result<String> {
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("failed to get bot info: {}", e))?;
    Ok(TelegramUserWrapper(&me.user).to_core().display_name())
}

/// Polls updates until ctrl-c. Every update goes through the same queue, so the chain sees
/// messages strictly in arrival order.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let identity = bot_identity(&bot).await?;
    info!("launching bot: {}", identity);

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_edited_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .distribution_function(|_: &Update| Some(()))
        .default_handler(|update| async move {
            info!(update_id = update.id.0, "ignoring update without a message");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();

    if let Err(e) = chain.handle(&core_msg).await {
        error!(
            error = %e,
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Handler chain failed"
        );
    }

    Ok(())
}
