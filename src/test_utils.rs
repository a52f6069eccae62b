//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        activity::{self, NewActivity},
        profile::{self, Identity},
    },
    entities::activity_update,
    errors::Result,
    models::{Activity, Category},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An identity that is not backed by a profile row. Only for code paths that
/// must fail before touching the store.
#[must_use]
pub fn test_identity() -> Identity {
    Identity {
        user_id: "1001".to_string(),
        display_name: "Test User".to_string(),
    }
}

/// Sets up a database with one registered profile.
/// Returns (db, identity).
pub async fn setup_with_identity() -> Result<(DatabaseConnection, Identity)> {
    let db = setup_test_db().await?;
    let expected = test_identity();
    let profile = profile::register_profile(&db, &expected.user_id, &expected.display_name).await?;
    Ok((db, Identity::from(profile)))
}

/// Creates an activity owned by `caller`.
pub async fn create_test_activity(
    db: &DatabaseConnection,
    caller: &Identity,
    title: &str,
    category: Category,
) -> Result<Activity> {
    activity::create_activity(
        db,
        Some(caller),
        NewActivity {
            title: title.to_string(),
            description: String::new(),
            category: Some(category),
        },
    )
    .await
}

/// Sets up a database with a profile and a "Daily SMS count" monitoring activity.
/// Returns (db, identity, activity).
pub async fn setup_with_activity() -> Result<(DatabaseConnection, Identity, Activity)> {
    let (db, caller) = setup_with_identity().await?;
    let activity =
        create_test_activity(&db, &caller, "Daily SMS count", Category::Monitoring).await?;
    Ok((db, caller, activity))
}

/// Inserts an update row with an explicit timestamp and raw status text.
///
/// Bypasses `record_update` so tests can control ordering and store values
/// the write path would never produce.
pub async fn insert_update_at(
    db: &DatabaseConnection,
    activity_id: i64,
    user_id: &str,
    status: &str,
    remarks: Option<&str>,
    updated_at: DateTime<Utc>,
) -> Result<activity_update::Model> {
    let update = activity_update::ActiveModel {
        activity_id: Set(activity_id),
        status: Set(status.to_string()),
        remarks: Set(remarks.map(str::to_string)),
        updated_by: Set(user_id.to_string()),
        updated_at: Set(updated_at),
        ..Default::default()
    };
    update.insert(db).await.map_err(Into::into)
}
