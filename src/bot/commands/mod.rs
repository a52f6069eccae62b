//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Activity commands (create, list, update, history)
pub mod activity;

/// General utility commands
pub mod general;

/// Profile and sign-up commands
pub mod profile;

/// Reporting commands (report, daily, dashboard, recent)
pub mod report;

// Export commands
pub use activity::*;
pub use general::*;
pub use profile::*;
pub use report::*;
