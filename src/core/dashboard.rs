//! Dashboard summary.
//!
//! Combines the activity overview (every activity with its derived status)
//! with the recent-updates feed.

use crate::{
    core::{
        activity,
        aggregate::{self, ActivityOverview, StatusCounts},
        update,
    },
    errors::Result,
    models::UpdateRecord,
};
use sea_orm::DatabaseConnection;
use tracing::instrument;

/// Everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Done / pending counts across all activities
    pub counts: StatusCounts,
    /// All activities, newest first, with their latest update
    pub activities: Vec<ActivityOverview>,
    /// Most recent updates across all activities
    pub recent: Vec<UpdateRecord>,
}

/// All activities with their derived current status, newest first.
pub async fn activity_overview(db: &DatabaseConnection) -> Result<Vec<ActivityOverview>> {
    let activities = activity::list_activities(db).await?;
    let updates = update::all_updates(db).await?;
    Ok(aggregate::build_overview(activities, updates))
}

/// Loads the dashboard with `recent_limit` entries in the feed.
#[instrument(skip(db))]
pub async fn load_dashboard(db: &DatabaseConnection, recent_limit: u64) -> Result<Dashboard> {
    let activities = activity_overview(db).await?;
    let counts = StatusCounts::tally(activities.iter().map(ActivityOverview::current_status));
    let recent = update::recent_updates(db, recent_limit).await?;

    Ok(Dashboard {
        counts,
        activities,
        recent,
    })
}
