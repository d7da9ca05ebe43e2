use anyhow::Result;
use poise::CreateReply;
use rolecount_utils::{discord::Colors, report};
use serenity::all::CreateEmbed;

use super::{on_error, snapshot_footer};
use crate::bot::Context;

/// Show how many members the server has and how many of them are verified
#[poise::command(slash_command, guild_only, user_cooldown = 10, on_error = on_error)]
pub async fn membercount(ctx: Context<'_>) -> Result<()> {
    ctx.defer().await?;

    let count = ctx.data().count().await?;

    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("Member count")
                .description(report::summary(&count.result))
                .footer(snapshot_footer(&count))
                .color(Colors::Info),
        ),
    )
    .await?;

    Ok(())
}
