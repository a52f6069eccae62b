//! Text rendering for command replies.
//!
//! Pure functions over domain values so replies can be tested without a
//! Discord connection.

use crate::{
    config::settings::ReportingTz,
    core::{
        aggregate::{ActivityGroup, ActivityOverview, StatusCounts},
        export::TIMESTAMP_FORMAT,
    },
    models::{ActivityStatus, AuthoredUpdate, UpdateRecord},
};
use chrono::{DateTime, Utc};

/// Discord's limit on an embed field value.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Discord's limit on the number of fields in one embed.
pub const EMBED_FIELD_LIMIT: usize = 25;

/// Discord's limit on a plain message.
pub const MESSAGE_LIMIT: usize = 2000;

/// Emoji plus status word.
#[must_use]
pub const fn status_badge(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Done => "✅ done",
        ActivityStatus::Pending => "⏳ pending",
    }
}

/// Formats an instant in the reporting time zone.
#[must_use]
pub fn local_time(instant: DateTime<Utc>, tz: &ReportingTz) -> String {
    instant.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// One line summarizing a status tally.
#[must_use]
pub fn counts_line(counts: &StatusCounts) -> String {
    format!(
        "**{}** activities • ✅ **{}** done • ⏳ **{}** pending",
        counts.total, counts.done, counts.pending
    )
}

/// One update as a single line: status, author, time and remarks.
#[must_use]
pub fn update_line(entry: &AuthoredUpdate, tz: &ReportingTz) -> String {
    let mut line = format!(
        "{} by {} at {}",
        status_badge(entry.update.status),
        entry.author(),
        local_time(entry.update.updated_at, tz)
    );
    if let Some(remarks) = &entry.update.remarks {
        line.push_str(&format!(" - {remarks}"));
    }
    line
}

/// Field name and value for one activity in the activity list.
#[must_use]
pub fn overview_field(
    overview: &ActivityOverview,
    creator: &str,
    tz: &ReportingTz,
) -> (String, String) {
    let activity = &overview.activity;
    let name = format!("#{} {} [{}]", activity.id, activity.title, activity.category);

    let mut value = format!(
        "**Status:** {}\n**Created by:** {creator}",
        status_badge(overview.current_status())
    );
    match &overview.latest {
        Some(latest) => {
            value.push_str(&format!(
                "\n**Last update:** {} at {} ({} total)",
                latest.author(),
                local_time(latest.update.updated_at, tz),
                overview.update_count
            ));
            if let Some(remarks) = overview.latest_remarks() {
                value.push_str(&format!("\n**Remarks:** {remarks}"));
            }
        }
        None => value.push_str("\n*No updates yet*"),
    }

    (truncate(&name, 256), truncate(&value, FIELD_VALUE_LIMIT))
}

/// Field name and value for one activity group in a report or daily view.
#[must_use]
pub fn group_field(group: &ActivityGroup, tz: &ReportingTz) -> (String, String) {
    let name = format!(
        "{} [{}] - {}",
        group.activity.title,
        group.activity.category,
        status_badge(group.current_status())
    );
    let value = group
        .updates
        .iter()
        .map(|entry| format!("• {}", update_line(entry, tz)))
        .collect::<Vec<_>>()
        .join("\n");

    (truncate(&name, 256), truncate(&value, FIELD_VALUE_LIMIT))
}

/// One entry of the recent-updates feed.
#[must_use]
pub fn feed_line(record: &UpdateRecord, tz: &ReportingTz) -> String {
    format!(
        "• **{}** [{}]: {}",
        record.activity.title,
        record.activity.category,
        update_line(&record.entry, tz)
    )
}
