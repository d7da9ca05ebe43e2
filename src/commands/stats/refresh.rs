use anyhow::Result;
use log::info;
use poise::CreateReply;
use rolecount_utils::{discord::Colors, report};
use serenity::all::CreateEmbed;

use super::{on_error, snapshot_footer};
use crate::bot::{is_staff, Context};

/// Fetch a fresh member list instead of waiting for the cached one to expire (staff only)
#[poise::command(slash_command, guild_only, check = "is_staff", on_error = on_error)]
pub async fn refresh(ctx: Context<'_>) -> Result<()> {
    ctx.defer_ephemeral().await?;

    let count = ctx.data().refresh().await?;
    info!("{} refreshed the member list", ctx.author().name);

    ctx.send(
        CreateReply::default()
            .embed(
                CreateEmbed::new()
                    .title("Member list refreshed")
                    .description(report::summary(&count.result))
                    .footer(snapshot_footer(&count))
                    .color(Colors::Success),
            )
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
