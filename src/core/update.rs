//! Activity update business logic - appending status entries and reading them back.
//!
//! Updates are append-only. Recording an update never touches the parent
//! activity row: current status is derived from the latest update at read
//! time (see [`crate::core::aggregate`]).
//!
//! Joined reads return [`UpdateRecord`]s. Rows whose parent activity is
//! missing, or whose status/category text does not parse, are skipped with a
//! warning at this boundary.

use crate::{
    core::profile::{self, Identity},
    entities::{Activity, ActivityUpdate, activity, activity_update},
    errors::{Error, Result},
    models::{self, ActivityStatus, AuthoredUpdate, UpdateRecord},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{info, instrument, warn};

/// Upper bound on the size of the recent-updates feed.
pub const MAX_RECENT_UPDATES: u64 = 100;

/// Appends a status update to an activity.
///
/// Blank remarks are stored as `NULL`. The activity must exist.
///
/// # Errors
/// * `Error::AuthenticationRequired` when `caller` is `None`
/// * `Error::ActivityNotFound` when the activity does not exist
#[instrument(skip(db, caller, remarks))]
pub async fn record_update(
    db: &DatabaseConnection,
    caller: Option<&Identity>,
    activity_id: i64,
    status: ActivityStatus,
    remarks: Option<String>,
) -> Result<models::ActivityUpdate> {
    let caller = profile::require_identity(caller)?;

    Activity::find_by_id(activity_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ActivityNotFound {
            id: activity_id.to_string(),
        })?;

    let remarks = remarks
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let update = activity_update::ActiveModel {
        activity_id: Set(activity_id),
        status: Set(status.as_str().to_string()),
        remarks: Set(remarks),
        updated_by: Set(caller.user_id.clone()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = update.insert(db).await?;
    info!(
        "Recorded update {} on activity {activity_id}: {status}",
        result.id
    );
    models::ActivityUpdate::try_from(result)
}

/// Maps one raw update row, logging and dropping it if its status is malformed.
fn authored(
    row: activity_update::Model,
    names: &HashMap<String, String>,
) -> Option<AuthoredUpdate> {
    let row_id = row.id;
    match models::ActivityUpdate::try_from(row) {
        Ok(update) => Some(AuthoredUpdate {
            author_name: names.get(&update.updated_by).cloned(),
            update,
        }),
        Err(e) => {
            warn!("Skipping malformed update row {row_id}: {e}");
            None
        }
    }
}

/// Attaches author names to raw update rows.
async fn with_authors(
    db: &DatabaseConnection,
    rows: Vec<activity_update::Model>,
) -> Result<Vec<AuthoredUpdate>> {
    let names =
        profile::display_names(db, rows.iter().map(|row| row.updated_by.clone())).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| authored(row, &names))
        .collect())
}

/// Maps joined `(update, activity)` rows into records.
async fn into_records(
    db: &DatabaseConnection,
    rows: Vec<(activity_update::Model, Option<activity::Model>)>,
) -> Result<Vec<UpdateRecord>> {
    let names =
        profile::display_names(db, rows.iter().map(|(row, _)| row.updated_by.clone())).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(row, activity)| {
            let Some(activity) = activity else {
                warn!(
                    "Skipping update {} for unknown activity {}",
                    row.id, row.activity_id
                );
                return None;
            };
            let activity = match models::Activity::try_from(activity) {
                Ok(activity) => activity,
                Err(e) => {
                    warn!("Skipping update {} with malformed activity: {e}", row.id);
                    return None;
                }
            };
            authored(row, &names).map(|entry| UpdateRecord { activity, entry })
        })
        .collect())
}

/// All updates of one activity with author names, newest first.
pub async fn activity_history(
    db: &DatabaseConnection,
    activity_id: i64,
) -> Result<Vec<AuthoredUpdate>> {
    let rows = ActivityUpdate::find()
        .filter(activity_update::Column::ActivityId.eq(activity_id))
        .order_by_desc(activity_update::Column::UpdatedAt)
        .order_by_desc(activity_update::Column::Id)
        .all(db)
        .await?;
    with_authors(db, rows).await
}

/// Every update in the store with author names, newest first.
pub async fn all_updates(db: &DatabaseConnection) -> Result<Vec<AuthoredUpdate>> {
    let rows = ActivityUpdate::find()
        .order_by_desc(activity_update::Column::UpdatedAt)
        .order_by_desc(activity_update::Column::Id)
        .all(db)
        .await?;
    with_authors(db, rows).await
}

/// Updates whose timestamp lies within `[start, end]` (both inclusive), joined
/// with their activity and author, newest first.
#[instrument(skip(db))]
pub async fn updates_between(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<UpdateRecord>> {
    let rows = ActivityUpdate::find()
        .find_also_related(Activity)
        .filter(activity_update::Column::UpdatedAt.gte(start))
        .filter(activity_update::Column::UpdatedAt.lte(end))
        .order_by_desc(activity_update::Column::UpdatedAt)
        .order_by_desc(activity_update::Column::Id)
        .all(db)
        .await?;
    into_records(db, rows).await
}

/// The `limit` most recent updates across all activities.
///
/// `limit` is clamped to `1..=MAX_RECENT_UPDATES`.
pub async fn recent_updates(db: &DatabaseConnection, limit: u64) -> Result<Vec<UpdateRecord>> {
    let limit = limit.clamp(1, MAX_RECENT_UPDATES);
    let rows = ActivityUpdate::find()
        .find_also_related(Activity)
        .order_by_desc(activity_update::Column::UpdatedAt)
        .order_by_desc(activity_update::Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    into_records(db, rows).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_update_requires_identity() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = record_update(&db, None, 1, ActivityStatus::Done, None).await;
        assert!(matches!(result, Err(Error::AuthenticationRequired)));
    }

    #[tokio::test]
    async fn test_record_update_unknown_activity() -> Result<()> {
        let (db, caller) = setup_with_identity().await?;
        let result = record_update(&db, Some(&caller), 999, ActivityStatus::Done, None).await;
        assert!(matches!(result, Err(Error::ActivityNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_record_update_does_not_touch_activity_row() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;

        let update = record_update(
            &db,
            Some(&caller),
            activity.id,
            ActivityStatus::Done,
            Some("  verified ".to_string()),
        )
        .await?;
        assert_eq!(update.remarks.as_deref(), Some("verified"));
        assert_eq!(update.updated_by, caller.user_id);

        let stored = crate::core::activity::get_activity_by_id(&db, activity.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, ActivityStatus::Pending);
        assert_eq!(stored.updated_at, activity.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_resubmission_creates_duplicate_rows() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        for _ in 0..2 {
            record_update(&db, Some(&caller), activity.id, ActivityStatus::Done, None).await?;
        }
        assert_eq!(activity_history(&db, activity.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_history_is_newest_first_with_authors() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        let t1 = Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap();
        insert_update_at(&db, activity.id, &caller.user_id, "pending", None, t1).await?;
        insert_update_at(
            &db,
            activity.id,
            &caller.user_id,
            "done",
            Some("verified"),
            t1 + Duration::hours(1),
        )
        .await?;

        let history = activity_history(&db, activity.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].update.status, ActivityStatus::Done);
        assert_eq!(history[0].author(), caller.display_name);
        assert_eq!(history[1].update.status, ActivityStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn test_updates_between_is_inclusive() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        let start = Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 15, 23, 59, 59).unwrap();

        insert_update_at(&db, activity.id, &caller.user_id, "pending", None, start).await?;
        insert_update_at(&db, activity.id, &caller.user_id, "done", None, end).await?;
        insert_update_at(
            &db,
            activity.id,
            &caller.user_id,
            "done",
            None,
            start - Duration::seconds(1),
        )
        .await?;
        insert_update_at(
            &db,
            activity.id,
            &caller.user_id,
            "done",
            None,
            end + Duration::seconds(1),
        )
        .await?;

        let records = updates_between(&db, start, end).await?;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.activity.id == activity.id));
        assert_eq!(records[0].entry.update.updated_at, end);
        assert_eq!(records[1].entry.update.updated_at, start);
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_updates_respects_limit() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        let base = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
        for i in 0..12 {
            insert_update_at(
                &db,
                activity.id,
                &caller.user_id,
                "pending",
                None,
                base + Duration::minutes(i),
            )
            .await?;
        }

        let recent = recent_updates(&db, 10).await?;
        assert_eq!(recent.len(), 10);
        assert_eq!(
            recent[0].entry.update.updated_at,
            base + Duration::minutes(11)
        );
        assert_eq!(recent[0].activity.title, activity.title);
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_updates_limit_is_clamped() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        let base = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
        for i in 0..3 {
            insert_update_at(
                &db,
                activity.id,
                &caller.user_id,
                "done",
                None,
                base + Duration::minutes(i),
            )
            .await?;
        }

        // Zero still shows the newest update
        let zero = recent_updates(&db, 0).await?;
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].entry.update.updated_at, base + Duration::minutes(2));

        // A limit past i64::MAX must not turn into "no limit"
        assert_eq!(recent_updates(&db, u64::MAX).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_status_rows_are_skipped() -> Result<()> {
        let (db, caller, activity) = setup_with_activity().await?;
        let t = Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap();
        insert_update_at(&db, activity.id, &caller.user_id, "archived", None, t).await?;
        insert_update_at(&db, activity.id, &caller.user_id, "done", None, t).await?;

        let records = updates_between(&db, t, t).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry.update.status, ActivityStatus::Done);
        Ok(())
    }
}
