use crate::commands;
use crate::config::GameConfig;
use crate::functions::audio::ChatAudio;
use poise::serenity_prelude as serenity;
use tracing::info;

pub fn gateway_intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

pub fn prefix_options() -> poise::PrefixFrameworkOptions<Data, Error> {
    poise::PrefixFrameworkOptions {
        prefix: Some("?".into()),
        additional_prefixes: vec![poise::Prefix::Literal("p!")],
        ..Default::default()
    }
}

/// Read-only state shared by every game.
pub struct Data {
    pub config: GameConfig,
    /// Preloaded once; each game plays from its own clone.
    pub audio: ChatAudio,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Builds the Poise framework with all commands and the provided prefix options
pub fn build_framework(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
    data: Data,
) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(framework_options(prefix_options))
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                register_commands(ctx, framework).await?;
                info!(user = %ready.user.display_name(), "connected and ready");
                Ok(data)
            })
        })
        .build()
}

pub async fn run_client(
    token: String,
    intents: serenity::GatewayIntents,
    framework: poise::Framework<Data, Error>,
) -> Result<(), Error> {
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;

    client.start_autosharded().await?;

    Ok(())
}

fn framework_options(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands::load_all(),
        prefix_options,
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    if let poise::FrameworkError::Command { error, ctx, .. } = &error {
        tracing::error!(command = %ctx.command().qualified_name, %error, "command failed");
        return;
    }
    if let Err(e) = poise::builtins::on_error(error).await {
        tracing::error!(error = %e, "failed to report framework error");
    }
}

async fn register_commands(
    ctx: &serenity::Context,
    framework: &poise::Framework<Data, Error>,
) -> Result<(), Error> {
    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
    Ok(())
}
