mod bot;
mod commands;

use log::{error, info};
use poise::Framework;
use serenity::all::ClientBuilder;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        #[cfg(debug_assertions)]
        std::env::set_var("RUST_LOG", "rolecount");

        #[cfg(not(debug_assertions))]
        std::env::set_var("RUST_LOG", "rolecount=info");
    }

    env_logger::init();

    info!(
        "Counting members of guild {}",
        rolecount_config::guild_id()
    );

    // Set up bot
    let framework = Framework::builder()
        .setup(|ctx, ready, framework| Box::pin(bot::setup(ctx, ready, framework)))
        .options(bot::framework_opts())
        .build();

    let mut client = match ClientBuilder::new(
        rolecount_config::discord_token(),
        rolecount_config::discord_intents(),
    )
    .framework(framework)
    .await
    {
        Ok(client) => client,
        Err(why) => {
            error!("Fatal error when building Serenity client: {why}");
            return;
        }
    };

    if let Err(why) = client.start().await {
        error!("Fatal error occured during bot operations: {why}");
        error!("Bot will now shut down!");
    }
}
