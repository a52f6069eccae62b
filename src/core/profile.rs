//! Profile business logic - registration and identity lookup.
//!
//! A platform user becomes an identity once a profile row exists for them.
//! Write operations take the caller as `Option<&Identity>` and refuse to run
//! without one.

use crate::{
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Profile id (platform user id)
    pub user_id: String,
    /// Registered display name
    pub display_name: String,
}

impl From<profile::Model> for Identity {
    fn from(model: profile::Model) -> Self {
        Self {
            user_id: model.id,
            display_name: model.full_name,
        }
    }
}

/// Returns the caller or `Error::AuthenticationRequired`.
///
/// # Errors
/// Fails when no identity is present.
pub fn require_identity(caller: Option<&Identity>) -> Result<&Identity> {
    match caller {
        Some(identity) => Ok(identity),
        None => Err(Error::AuthenticationRequired),
    }
}

/// Creates the caller's profile, or renames it if it already exists.
///
/// The display name is trimmed and must not be empty.
#[instrument(skip(db))]
pub async fn register_profile(
    db: &DatabaseConnection,
    user_id: &str,
    full_name: &str,
) -> Result<profile::Model> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Display name cannot be empty".to_string(),
        });
    }

    if let Some(existing) = Profile::find_by_id(user_id.to_string()).one(db).await? {
        if existing.full_name == full_name {
            return Ok(existing);
        }
        debug!("Renaming profile {user_id} to {full_name}");
        let mut active_model: profile::ActiveModel = existing.into();
        active_model.full_name = Set(full_name.to_string());
        return active_model.update(db).await.map_err(Into::into);
    }

    let profile = profile::ActiveModel {
        id: Set(user_id.to_string()),
        full_name: Set(full_name.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    let result = profile.insert(db).await?;
    info!("Registered profile {user_id}");
    Ok(result)
}

/// Looks up a profile by user id.
pub async fn get_profile(db: &DatabaseConnection, user_id: &str) -> Result<Option<profile::Model>> {
    Profile::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// "Who is the current caller": the identity for a platform user, if registered.
pub async fn current_identity(db: &DatabaseConnection, user_id: &str) -> Result<Option<Identity>> {
    Ok(get_profile(db, user_id).await?.map(Identity::from))
}

/// Lists all profiles ordered by display name.
pub async fn list_profiles(db: &DatabaseConnection) -> Result<Vec<profile::Model>> {
    Profile::find()
        .order_by_asc(profile::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Maps profile ids to display names in one query. Unknown ids are absent from the map.
pub async fn display_names<I>(db: &DatabaseConnection, user_ids: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = String>,
{
    let mut ids: Vec<String> = user_ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let profiles = Profile::find()
        .filter(profile::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(profiles
        .into_iter()
        .map(|p| (p.id, p.full_name))
        .collect())
}
