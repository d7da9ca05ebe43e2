use anyhow::Result;
use poise::CreateReply;
use rolecount_utils::report;
use serenity::all::CreateEmbed;

use super::{on_error, snapshot_footer};
use crate::bot::Context;

/// Break the verified members down by their highest tracked role
#[poise::command(slash_command, guild_only, user_cooldown = 10, on_error = on_error)]
pub async fn rolecount(ctx: Context<'_>) -> Result<()> {
    ctx.defer().await?;

    let count = ctx.data().count().await?;

    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("Members by role")
                .description(report::role_breakdown(&count.result))
                .field("Total", report::summary(&count.result), false)
                .footer(snapshot_footer(&count))
                .color(report::breakdown_color(&count.result)),
        ),
    )
    .await?;

    Ok(())
}
