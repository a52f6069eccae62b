//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity;
pub mod activity_update;
pub mod profile;

// Re-export specific types to avoid conflicts
pub use activity::{Column as ActivityColumn, Entity as Activity, Model as ActivityModel};
pub use activity_update::{
    Column as ActivityUpdateColumn, Entity as ActivityUpdate, Model as ActivityUpdateModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
