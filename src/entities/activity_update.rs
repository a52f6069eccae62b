//! Activity update entity - An immutable status/remarks entry appended to an activity.
//!
//! Rows are only ever inserted. `updated_at` is set once at insert time and is
//! the ordering key for "most recent update".
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity update database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_updates")]
pub struct Model {
    /// Unique identifier for the update
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the activity this update belongs to
    pub activity_id: i64,
    /// Reported status (`"pending"` or `"done"`)
    pub status: String,
    /// Optional remarks left with the update
    pub remarks: Option<String>,
    /// Profile id of the author
    pub updated_by: String,
    /// When the update was recorded
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `ActivityUpdate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each update belongs to one activity
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    Activity,
    /// Each update was written by one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UpdatedBy",
        to = "super::profile::Column::Id"
    )]
    Author,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
