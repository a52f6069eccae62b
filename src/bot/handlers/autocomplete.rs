//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! activity titles, categories and statuses.

use crate::{
    bot::Context,
    core::activity,
    models::{ActivityStatus, Category},
};
use tracing::warn;

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Values from `options` containing `partial` (case-insensitive), in order.
fn matching<I>(options: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'static str>,
{
    let partial_lower = partial.trim().to_lowercase();
    options
        .into_iter()
        .filter(|option| option.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn with_all<I>(options: I) -> impl Iterator<Item = &'static str>
where
    I: IntoIterator<Item = &'static str>,
{
    std::iter::once("all").chain(options)
}

/// Provides autocomplete suggestions for activity titles.
///
/// Returns up to 25 titles containing the partial input, alphabetically.
pub async fn autocomplete_activity_title(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let db = &ctx.data().database;

    let limit = u64::try_from(MAX_SUGGESTIONS).unwrap_or(u64::MAX);
    match activity::search_activity_titles(db, partial, limit).await {
        Ok(titles) => titles,
        Err(e) => {
            warn!("Activity title autocomplete failed: {e}");
            Vec::new()
        }
    }
}

/// Provides autocomplete suggestions for category names.
pub async fn autocomplete_category(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(Category::ALL.map(Category::as_str), partial)
}

/// Category names plus `all`, for report filters.
pub async fn autocomplete_category_filter(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(with_all(Category::ALL.map(Category::as_str)), partial)
}

/// Provides autocomplete suggestions for `pending` / `done`.
pub async fn autocomplete_status(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(ActivityStatus::ALL.map(ActivityStatus::as_str), partial)
}

/// Statuses plus `all`, for report filters.
pub async fn autocomplete_status_filter(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(with_all(ActivityStatus::ALL.map(ActivityStatus::as_str)), partial)
}
