//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Activity Tracker Help**\n\
        Track the support team's recurring activities and report on them.\n\n\
        **Getting Started**\n\
        • `/register [name]` - Signs you up (or renames you). Required before recording anything.\n\
        • `/whoami` - Shows the profile you are registered as.\n\
        • `/team` - Lists everyone who has registered.\n\n\
        **Activities**\n\
        • `/create_activity <title> [category] [description]` - Adds a new pending activity.\n\
        • `/activities` - Lists activities with their current status.\n\
        • `/update_activity <activity> <status> [remarks]` - Records a pending/done update.\n\
        • `/history <activity>` - Shows every update of one activity.\n\n\
        **Reporting**\n\
        • `/dashboard` - Done/pending totals and the latest updates.\n\
        • `/recent` - The most recent updates across all activities.\n\
        • `/daily [date]` - Everything updated on one day (defaults to today).\n\
        • `/report <start> <end> [category] [status]` - Grouped report with a CSV export.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Dates are written as `YYYY-MM-DD`.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
