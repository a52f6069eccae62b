//! Activity entity - A recurring operational check tracked by the support team.
//!
//! `status` is written once at creation. The current status of an activity is
//! always derived from its most recent update, so this column is advisory.
//! `category` and `status` are stored as text and parsed into
//! [`crate::models`] enums when rows are mapped.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    /// Unique identifier for the activity
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short title, never empty
    pub title: String,
    /// Free-text description, may be empty
    pub description: String,
    /// One of the fixed categories (e.g. `"Monitoring"`)
    pub category: String,
    /// Status at creation time (`"pending"` or `"done"`)
    pub status: String,
    /// Profile id of the creator
    pub created_by: String,
    /// When the activity was created
    pub created_at: DateTimeUtc,
    /// When the activity row was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Activity and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One activity has many updates
    #[sea_orm(has_many = "super::activity_update::Entity")]
    Updates,
    /// Each activity was created by one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::CreatedBy",
        to = "super::profile::Column::Id"
    )]
    Creator,
}

impl Related<super::activity_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Updates.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
