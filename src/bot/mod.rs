//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the activity tracker,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (activity, report, profile, general)
pub mod commands;
/// Reply text rendering
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::{ReportingTz, Settings},
    core::{
        profile::{self, Identity},
        submission::SubmissionTracker,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument, warn};

/// Poise context type used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Reply for failures that are not the user's fault.
pub const GENERIC_FAILURE: &str =
    "❌ Something went wrong while talking to the database. Please try again later.";

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
#[derive(Debug)]
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings loaded at startup
    pub settings: Settings,
    /// Time zone that calendar days are resolved in
    pub reporting_tz: ReportingTz,
    /// In-flight form submissions
    pub submissions: SubmissionTracker,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings, reporting_tz: ReportingTz) -> Self {
        Self {
            database,
            settings,
            reporting_tz,
            submissions: SubmissionTracker::new(),
        }
    }
}

/// The registered identity of whoever invoked the command, if any.
pub async fn caller_identity(ctx: Context<'_>) -> Result<Option<Identity>> {
    profile::current_identity(&ctx.data().database, &ctx.author().id.to_string()).await
}

/// Text sent back to the user when a command fails.
///
/// Input and authentication problems are echoed; anything else gets a static
/// message so store internals never reach the channel.
#[must_use]
pub fn error_reply(error: &Error) -> String {
    match error {
        Error::AuthenticationRequired => {
            "🔒 You need a profile first. Run `/register` to sign up.".to_string()
        }
        e if e.is_user_error() => format!("❌ {e}"),
        _ => GENERIC_FAILURE.to_string(),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_error() {
                warn!("Command `{}` rejected: {error}", ctx.command().name);
            } else {
                error!("Error in command `{}`: {error:?}", ctx.command().name);
            }
            if let Err(e) = ctx.say(error_reply(&error)).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::register(),
        commands::whoami(),
        commands::team(),
        commands::create_activity(),
        commands::activities(),
        commands::update_activity(),
        commands::history(),
        commands::recent(),
        commands::dashboard(),
        commands::daily(),
        commands::report(),
    ]
}

/// Builds the poise framework and runs the client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
