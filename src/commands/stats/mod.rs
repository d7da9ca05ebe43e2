mod membercount;
mod refresh;
mod rolecount;

pub use membercount::*;
pub use refresh::*;
pub use rolecount::*;

use log::error;
use poise::CreateReply;
use serenity::all::{CreateEmbed, CreateEmbedFooter};
use rolecount_utils::discord::Colors;

use crate::bot::{Count, FrameworkError};

fn snapshot_footer(count: &Count) -> CreateEmbedFooter {
    CreateEmbedFooter::new(format!(
        "Member list as of {}",
        count.fetched_at.format("%Y-%m-%d %H:%M UTC")
    ))
}

async fn on_error(error: FrameworkError<'_>) {
    if let FrameworkError::Command { error, ctx, .. } = error {
        error!("An error occured while counting members: {error}");

        _ = ctx
            .send(
                CreateReply::default()
                    .embed(
                        CreateEmbed::new()
                            .description("An error occured while counting members.")
                            .color(Colors::Error),
                    )
                    .ephemeral(true),
            )
            .await;
    } else if let Err(why) = poise::builtins::on_error(error).await {
        error!("Failed to handle framework error: {why}");
    }
}
