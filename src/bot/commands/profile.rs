//! Profile Discord commands - sign-up and identity lookup.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, caller_identity},
        core::profile,
        errors::Result,
    };
    use std::fmt::Write;

    /// Registers you as a team member, or changes your display name.
    ///
    /// Without a name your Discord display name is used.
    #[poise::command(slash_command, prefix_command)]
    pub async fn register(
        ctx: Context<'_>,
        #[description = "Display name shown on your updates (optional)"] name: Option<String>,
    ) -> Result<()> {
        let author = ctx.author();
        let name = name.unwrap_or_else(|| {
            author
                .global_name
                .clone()
                .unwrap_or_else(|| author.name.clone())
        });

        let db = &ctx.data().database;
        let profile = profile::register_profile(db, &author.id.to_string(), &name).await?;

        ctx.say(format!(
            "✅ Registered as **{}**. You can now create and update activities.",
            profile.full_name
        ))
        .await?;
        Ok(())
    }

    /// Shows the profile you are registered as.
    #[poise::command(slash_command, prefix_command)]
    pub async fn whoami(ctx: Context<'_>) -> Result<()> {
        match caller_identity(ctx).await? {
            Some(identity) => {
                ctx.say(format!(
                    "👤 You are registered as **{}** (`{}`).",
                    identity.display_name, identity.user_id
                ))
                .await?;
            }
            None => {
                ctx.say("👤 You are not registered yet. Run `/register` to sign up.")
                    .await?;
            }
        }
        Ok(())
    }

    /// Lists every registered team member.
    #[poise::command(slash_command, prefix_command)]
    pub async fn team(ctx: Context<'_>) -> Result<()> {
        let profiles = profile::list_profiles(&ctx.data().database).await?;

        if profiles.is_empty() {
            ctx.say("👥 Nobody has registered yet. Run `/register` to be the first!")
                .await?;
            return Ok(());
        }

        let mut response = format!("👥 **Team ({})**\n", profiles.len());
        for member in &profiles {
            writeln!(
                &mut response,
                "• {} (joined {})",
                member.full_name,
                member.created_at.format("%Y-%m-%d")
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
