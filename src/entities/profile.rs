//! Profile entity - Display names for registered users.
//! The primary key is the platform user id, so it is not auto-incremented.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Platform user id (Discord snowflake as text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name shown in reports and history
    pub full_name: String,
    /// When the profile was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Activities created by this profile
    #[sea_orm(has_many = "super::activity::Entity")]
    Activities,
    /// Updates written by this profile
    #[sea_orm(has_many = "super::activity_update::Entity")]
    Updates,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl Related<super::activity_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Updates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
