//! Reporting Discord commands - `report`, `daily`, `dashboard` and `recent`.
//!
//! Calendar days are resolved in the configured reporting time zone.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            format::{self, EMBED_FIELD_LIMIT, MESSAGE_LIMIT},
            handlers::autocomplete,
        },
        config::settings::ReportingTz,
        core::{
            aggregate::ActivityGroup,
            dashboard, export,
            report::{self, ReportFilter, Selection},
            update,
        },
        errors::Result,
        models::{ActivityStatus, Category},
    };
    use chrono::{Duration, Utc};
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use tracing::debug;

    fn group_fields(
        groups: &[ActivityGroup],
        tz: &ReportingTz,
    ) -> Vec<(String, String, bool)> {
        groups
            .iter()
            .take(EMBED_FIELD_LIMIT)
            .map(|group| {
                let (name, value) = format::group_field(group, tz);
                (name, value, false)
            })
            .collect()
    }

    fn overflow_footer(shown: usize, total: usize) -> Option<serenity::CreateEmbedFooter> {
        (total > shown).then(|| {
            serenity::CreateEmbedFooter::new(format!(
                "Showing {shown} of {total} activities. The CSV contains everything."
            ))
        })
    }

    /// Generates a grouped activity report with a CSV export.
    ///
    /// Category and status filters apply to each activity's latest update in the range.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(
        ctx: Context<'_>,
        #[description = "First day (YYYY-MM-DD)"] start: String,
        #[description = "Last day, inclusive (YYYY-MM-DD)"] end: String,
        #[description = "Category filter (default: all)"]
        #[autocomplete = "autocomplete::autocomplete_category_filter"]
        category: Option<String>,
        #[description = "Latest status filter (default: all)"]
        #[autocomplete = "autocomplete::autocomplete_status_filter"]
        status: Option<String>,
    ) -> Result<()> {
        let start = report::parse_date(&start)?;
        let end = report::parse_date(&end)?;
        let category: Selection<Category> = category.as_deref().unwrap_or("all").parse()?;
        let status: Selection<ActivityStatus> = status.as_deref().unwrap_or("all").parse()?;
        let filter = ReportFilter::new(start, end)?
            .with_category(category)
            .with_status(status);

        let data = ctx.data();
        let tz = &data.reporting_tz;
        ctx.defer().await?;

        let generated = report::generate_report(&data.database, tz, filter).await?;
        if generated.is_empty() {
            ctx.say(format!(
                "📊 No activity between {start} and {end} (category: {category}, status: {status})."
            ))
            .await?;
            return Ok(());
        }

        let summary = &generated.summary;
        let fields = group_fields(&generated.groups, tz);
        let shown = fields.len();
        let mut embed = serenity::CreateEmbed::default()
            .title(format!("📊 Activity Report {start} → {end}"))
            .description(format!(
                "**{}** activities • ✅ **{}** completed • ⏳ **{}** pending • **{}** updates\n\
                 Category: {category} • Status: {status}",
                summary.total_activities, summary.completed, summary.pending, summary.total_updates
            ))
            .color(0x0034_98DB)
            .fields(fields);
        if let Some(footer) = overflow_footer(shown, generated.groups.len()) {
            embed = embed.footer(footer);
        }

        let csv = export::export_report(&generated, tz);
        debug!(
            "Attaching {} ({}, {} bytes)",
            csv.filename,
            csv.mime_type,
            csv.content.len()
        );
        let attachment = serenity::CreateAttachment::bytes(csv.content.into_bytes(), csv.filename);

        ctx.send(
            poise::CreateReply::default()
                .embed(embed)
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }

    /// Shows everything updated on one day, grouped by activity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn daily(
        ctx: Context<'_>,
        #[description = "Day to show (YYYY-MM-DD, default: today)"] date: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let tz = &data.reporting_tz;
        let date = match date {
            Some(value) => report::parse_date(&value)?,
            None => Utc::now().with_timezone(tz).date_naive(),
        };

        let groups = report::daily_activity(&data.database, tz, date).await?;

        let previous = date - Duration::days(1);
        let next = date + Duration::days(1);
        let navigation = format!("◀ `/daily {previous}` • `/daily {next}` ▶");

        if groups.is_empty() {
            ctx.say(format!("📅 No updates on {date}.\n{navigation}"))
                .await?;
            return Ok(());
        }

        let fields = group_fields(&groups, tz);
        let embed = serenity::CreateEmbed::default()
            .title(format!("📅 Daily Activity {date}"))
            .description(format!("{} activities updated\n{navigation}", groups.len()))
            .color(0x0034_98DB)
            .fields(fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows done/pending totals and the latest updates.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let tz = &data.reporting_tz;

        let board =
            dashboard::load_dashboard(&data.database, data.settings.reporting.recent_updates_limit)
                .await?;

        let mut feed = String::new();
        for record in &board.recent {
            writeln!(&mut feed, "{}", format::feed_line(record, tz))?;
        }
        if feed.is_empty() {
            feed.push_str("*No updates yet*");
        }

        let pending: Vec<String> = board
            .activities
            .iter()
            .filter(|o| o.current_status() == ActivityStatus::Pending)
            .map(|o| format!("• #{} {}", o.activity.id, o.activity.title))
            .collect();
        let pending = if pending.is_empty() {
            "*Nothing pending* 🎉".to_string()
        } else {
            pending.join("\n")
        };

        let embed = serenity::CreateEmbed::default()
            .title("🗂️ Dashboard")
            .description(format::counts_line(&board.counts))
            .color(0x0034_98DB)
            .field(
                "Pending",
                format::truncate(&pending, format::FIELD_VALUE_LIMIT),
                false,
            )
            .field(
                "Recent updates",
                format::truncate(&feed, format::FIELD_VALUE_LIMIT),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the most recent updates across all activities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn recent(
        ctx: Context<'_>,
        #[description = "How many updates to show (default from config)"]
        #[min = 1]
        #[max = 100]
        limit: Option<u64>,
    ) -> Result<()> {
        let data = ctx.data();
        let tz = &data.reporting_tz;
        let limit = limit.unwrap_or(data.settings.reporting.recent_updates_limit);

        let records = update::recent_updates(&data.database, limit).await?;
        if records.is_empty() {
            ctx.say("🕒 No updates recorded yet.").await?;
            return Ok(());
        }

        let mut response = format!("🕒 **Latest {} update(s)**\n", records.len());
        for record in &records {
            writeln!(&mut response, "{}", format::feed_line(record, tz))?;
        }

        ctx.say(format::truncate(&response, MESSAGE_LIMIT)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
