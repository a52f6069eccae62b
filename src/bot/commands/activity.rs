//! Activity Discord commands - create, list, update and history.
//!
//! Writes go through the submission tracker so a form cannot be submitted twice
//! while the first submission is still running.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, caller_identity,
            format::{self, EMBED_FIELD_LIMIT, MESSAGE_LIMIT},
            handlers::autocomplete,
        },
        core::{
            activity::{self, NewActivity},
            dashboard, profile,
            submission::SubmissionKey,
            update,
        },
        errors::Result,
        models::{ActivityStatus, Category},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use tracing::info;

    /// Creates a new activity for the team to track.
    ///
    /// New activities start as pending. The category defaults to General.
    #[poise::command(slash_command, prefix_command)]
    pub async fn create_activity(
        ctx: Context<'_>,
        #[description = "Short title, e.g. 'Daily SMS count'"] title: String,
        #[description = "Category (default: General)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Optional description"] description: Option<String>,
    ) -> Result<()> {
        // Input errors are reported before any database call
        let title = activity::validate_title(&title)?.to_string();
        let category = category.as_deref().map(str::parse::<Category>).transpose()?;

        let data = ctx.data();
        let caller = caller_identity(ctx).await?;
        let _guard = data.submissions.begin(SubmissionKey::CreateActivity {
            user_id: ctx.author().id.to_string(),
        })?;

        let created = activity::create_activity(
            &data.database,
            caller.as_ref(),
            NewActivity {
                title,
                description: description.unwrap_or_default(),
                category,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Created activity **#{} {}** [{}] - status {}",
            created.id,
            created.title,
            created.category,
            format::status_badge(created.status)
        ))
        .await?;
        Ok(())
    }

    /// Lists activities with their current status and latest update.
    #[poise::command(slash_command, prefix_command)]
    pub async fn activities(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let tz = &data.reporting_tz;
        ctx.defer().await?;

        let overview = dashboard::activity_overview(&data.database).await?;
        if overview.is_empty() {
            ctx.say("📋 No activities yet. Create one with `/create_activity`!")
                .await?;
            return Ok(());
        }

        let limit = data
            .settings
            .reporting
            .activity_list_limit
            .clamp(1, EMBED_FIELD_LIMIT);
        let shown = &overview[..overview.len().min(limit)];
        let creators = profile::display_names(
            &data.database,
            shown.iter().map(|o| o.activity.created_by.clone()),
        )
        .await?;

        let fields: Vec<(String, String, bool)> = shown
            .iter()
            .map(|o| {
                let creator = creators
                    .get(&o.activity.created_by)
                    .map_or(o.activity.created_by.as_str(), String::as_str);
                let (name, value) = format::overview_field(o, creator, tz);
                (name, value, false)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("📋 Activities")
            .description(format!(
                "Showing {} of {} (newest first)",
                shown.len(),
                overview.len()
            ))
            .color(0x0034_98DB)
            .fields(fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Records a pending/done update on an activity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_activity(
        ctx: Context<'_>,
        #[description = "Activity id or title"]
        #[autocomplete = "autocomplete::autocomplete_activity_title"]
        activity: String,
        #[description = "New status: pending or done"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
        #[description = "Optional remarks"] remarks: Option<String>,
    ) -> Result<()> {
        let status: ActivityStatus = status.parse()?;

        let data = ctx.data();
        let caller = caller_identity(ctx).await?;
        let target = activity::find_activity(&data.database, &activity).await?;
        let _guard = data.submissions.begin(SubmissionKey::RecordUpdate {
            activity_id: target.id,
            user_id: ctx.author().id.to_string(),
        })?;

        let recorded =
            update::record_update(&data.database, caller.as_ref(), target.id, status, remarks)
                .await?;
        info!(
            "Update {} recorded on activity {} by {}",
            recorded.id,
            target.id,
            ctx.author().id
        );

        let mut response = format!(
            "✅ **{}** is now {}",
            target.title,
            format::status_badge(recorded.status)
        );
        if let Some(remarks) = &recorded.remarks {
            write!(&mut response, "\n**Remarks:** {remarks}")?;
        }
        ctx.say(response).await?;
        Ok(())
    }

    /// Shows every update recorded on an activity, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(
        ctx: Context<'_>,
        #[description = "Activity id or title"]
        #[autocomplete = "autocomplete::autocomplete_activity_title"]
        activity: String,
    ) -> Result<()> {
        let data = ctx.data();
        let tz = &data.reporting_tz;

        let target = activity::find_activity(&data.database, &activity).await?;
        let updates = update::activity_history(&data.database, target.id).await?;

        let mut response = format!(
            "📜 **#{} {}** [{}]\n",
            target.id, target.title, target.category
        );
        if !target.description.is_empty() {
            writeln!(&mut response, "*{}*", target.description)?;
        }
        if updates.is_empty() {
            response.push_str("No updates recorded yet.");
        } else {
            writeln!(&mut response, "{} update(s):", updates.len())?;
            for entry in &updates {
                writeln!(&mut response, "• {}", format::update_line(entry, tz))?;
            }
        }

        ctx.say(format::truncate(&response, MESSAGE_LIMIT)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
