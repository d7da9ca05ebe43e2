use anyhow::Result;
use poise::CreateReply;

use crate::bot::Context;

/// Check whether the bot is alive
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<()> {
    let latency = ctx.ping().await;

    ctx.send(
        CreateReply::default()
            .content(format!("Pong! Gateway latency: {}ms", latency.as_millis()))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
