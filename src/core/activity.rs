//! Activity business logic - creating activities and looking them up.
//!
//! New activities always start as pending and default to the General
//! category. Validation runs before any database call so an empty title
//! never reaches the store.

use crate::{
    core::profile::{self, Identity},
    entities::{Activity, activity},
    errors::{Error, Result},
    models::{self, ActivityStatus, Category},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{info, instrument, warn};

/// Input for [`create_activity`].
#[derive(Debug, Clone, Default)]
pub struct NewActivity {
    /// Required, trimmed before storing
    pub title: String,
    /// Optional free text
    pub description: String,
    /// Defaults to [`Category::General`]
    pub category: Option<Category>,
}

/// Trims a title and rejects it if nothing is left.
///
/// # Errors
/// `Error::Validation` for an empty or whitespace-only title.
pub fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation {
            message: "Activity title cannot be empty".to_string(),
        });
    }
    Ok(title)
}

/// Creates a new pending activity owned by the caller.
///
/// # Errors
/// * `Error::Validation` if the title is empty after trimming (checked first)
/// * `Error::AuthenticationRequired` if `caller` is `None`
#[instrument(skip(db, caller, new_activity), fields(title = %new_activity.title))]
pub async fn create_activity(
    db: &DatabaseConnection,
    caller: Option<&Identity>,
    new_activity: NewActivity,
) -> Result<models::Activity> {
    let title = validate_title(&new_activity.title)?;
    let caller = profile::require_identity(caller)?;

    let now = chrono::Utc::now();
    let category = new_activity.category.unwrap_or_default();
    let activity = activity::ActiveModel {
        title: Set(title.to_string()),
        description: Set(new_activity.description.trim().to_string()),
        category: Set(category.as_str().to_string()),
        status: Set(ActivityStatus::Pending.as_str().to_string()),
        created_by: Set(caller.user_id.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = activity.insert(db).await?;
    info!("Created activity {} ({category})", result.id);
    models::Activity::try_from(result)
}

fn map_rows(rows: Vec<activity::Model>) -> Vec<models::Activity> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            models::Activity::try_from(row)
                .inspect_err(|e| warn!("Skipping malformed activity row {id}: {e}"))
                .ok()
        })
        .collect()
}

/// Finds an activity by id.
pub async fn get_activity_by_id(
    db: &DatabaseConnection,
    activity_id: i64,
) -> Result<Option<models::Activity>> {
    Activity::find_by_id(activity_id)
        .one(db)
        .await?
        .map(models::Activity::try_from)
        .transpose()
}

/// Finds the newest activity with exactly this title.
pub async fn get_activity_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Option<models::Activity>> {
    Activity::find()
        .filter(activity::Column::Title.eq(title.trim()))
        .order_by_desc(activity::Column::CreatedAt)
        .order_by_desc(activity::Column::Id)
        .one(db)
        .await?
        .map(models::Activity::try_from)
        .transpose()
}

/// Resolves a user-supplied reference: a numeric id (`12` or `#12`) first,
/// then an exact title.
///
/// # Errors
/// `Error::ActivityNotFound` when nothing matches.
pub async fn find_activity(db: &DatabaseConnection, reference: &str) -> Result<models::Activity> {
    let reference = reference.trim();
    if let Ok(id) = reference.trim_start_matches('#').parse::<i64>() {
        if let Some(activity) = get_activity_by_id(db, id).await? {
            return Ok(activity);
        }
    }

    get_activity_by_title(db, reference)
        .await?
        .ok_or_else(|| Error::ActivityNotFound {
            id: reference.to_string(),
        })
}

/// All activities, newest first.
pub async fn list_activities(db: &DatabaseConnection) -> Result<Vec<models::Activity>> {
    let rows = Activity::find()
        .order_by_desc(activity::Column::CreatedAt)
        .order_by_desc(activity::Column::Id)
        .all(db)
        .await?;
    Ok(map_rows(rows))
}

/// Titles containing `partial` (case-insensitive), alphabetical, at most `limit`.
pub async fn search_activity_titles(
    db: &DatabaseConnection,
    partial: &str,
    limit: u64,
) -> Result<Vec<String>> {
    let titles: Vec<String> = Activity::find()
        .select_only()
        .column(activity::Column::Title)
        .filter(activity::Column::Title.contains(partial.trim()))
        .order_by_asc(activity::Column::Title)
        .limit(limit)
        .into_tuple()
        .all(db)
        .await?;
    Ok(titles)
}
