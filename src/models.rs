//! Domain records mapped from raw database rows.
//!
//! Entity models keep `category` and `status` as plain text. Everything above
//! the store layer works with the typed records here; the `TryFrom`
//! conversions are the single place where a row with an unknown status or
//! category gets rejected.

use crate::{
    entities::{activity, activity_update},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Status of an activity or of a single update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// Not yet completed
    Pending,
    /// Completed
    Done,
}

impl ActivityStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 2] = [Self::Pending, Self::Done];

    /// Lowercase text form used in storage and export.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// Fixed category list for activities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Catch-all, and the default for new activities
    #[default]
    General,
    /// Health and volume checks
    Monitoring,
    /// Routine upkeep
    Maintenance,
    /// Access and audit checks
    Security,
    /// Latency and throughput checks
    Performance,
    /// Incident follow-up
    Troubleshooting,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Monitoring,
        Self::Maintenance,
        Self::Security,
        Self::Performance,
        Self::Troubleshooting,
    ];

    /// Capitalised text form used in storage and export.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Monitoring => "Monitoring",
            Self::Maintenance => "Maintenance",
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::Troubleshooting => "Troubleshooting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidCategory {
                value: s.to_string(),
            })
    }
}

/// A tracked activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Store-assigned id
    pub id: i64,
    /// Short title, never empty
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Category
    pub category: Category,
    /// Status written at creation; see [`crate::core::aggregate`] for the live one
    pub status: ActivityStatus,
    /// Creator profile id
    pub created_by: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time of the row itself
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<activity::Model> for Activity {
    type Error = Error;

    fn try_from(model: activity::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            category: model.category.parse()?,
            status: model.status.parse()?,
            title: model.title,
            description: model.description,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// One immutable status entry on an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    /// Store-assigned id, also the tie-breaker for equal timestamps
    pub id: i64,
    /// Parent activity
    pub activity_id: i64,
    /// Reported status
    pub status: ActivityStatus,
    /// Remarks, `None` when left blank
    pub remarks: Option<String>,
    /// Author profile id
    pub updated_by: String,
    /// When the update was recorded
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<activity_update::Model> for ActivityUpdate {
    type Error = Error;

    fn try_from(model: activity_update::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            activity_id: model.activity_id,
            status: model.status.parse()?,
            remarks: model.remarks.filter(|r| !r.trim().is_empty()),
            updated_by: model.updated_by,
            updated_at: model.updated_at,
        })
    }
}

/// An update together with its author's display name, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredUpdate {
    /// The update itself
    pub update: ActivityUpdate,
    /// Author display name from `profiles`
    pub author_name: Option<String>,
}

impl AuthoredUpdate {
    /// Display name of the author, falling back to the raw profile id.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author_name
            .as_deref()
            .unwrap_or(&self.update.updated_by)
    }
}

/// Result shape of an update query joined with its activity and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    /// Parent activity
    pub activity: Activity,
    /// Update with author name
    pub entry: AuthoredUpdate,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn raw_activity(category: &str, status: &str) -> activity::Model {
        let now = Utc::now();
        activity::Model {
            id: 1,
            title: "Daily SMS count".to_string(),
            description: String::new(),
            category: category.to_string(),
            status: status.to_string(),
            created_by: "u1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Done".parse::<ActivityStatus>().unwrap(), ActivityStatus::Done);
        assert_eq!(
            " pending ".parse::<ActivityStatus>().unwrap(),
            ActivityStatus::Pending
        );
        assert!(matches!(
            "finished".parse::<ActivityStatus>(),
            Err(Error::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!(
            "monitoring".parse::<Category>().unwrap(),
            Category::Monitoring
        );
        assert_eq!(Category::Troubleshooting.to_string(), "Troubleshooting");
        assert_eq!(Category::default(), Category::General);
        assert!(matches!(
            "Networking".parse::<Category>(),
            Err(Error::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_activity_mapping_rejects_unknown_category() {
        let mapped = Activity::try_from(raw_activity("Networking", "pending"));
        assert!(matches!(mapped, Err(Error::InvalidCategory { .. })));

        let mapped = Activity::try_from(raw_activity("Monitoring", "pending")).unwrap();
        assert_eq!(mapped.category, Category::Monitoring);
        assert_eq!(mapped.status, ActivityStatus::Pending);
    }

    #[test]
    fn test_update_mapping_drops_blank_remarks() {
        let model = activity_update::Model {
            id: 3,
            activity_id: 1,
            status: "done".to_string(),
            remarks: Some("   ".to_string()),
            updated_by: "u1".to_string(),
            updated_at: Utc::now(),
        };
        let update = ActivityUpdate::try_from(model).unwrap();
        assert_eq!(update.remarks, None);
        assert_eq!(update.status, ActivityStatus::Done);
    }

    #[test]
    fn test_author_falls_back_to_profile_id() {
        let update = ActivityUpdate {
            id: 1,
            activity_id: 1,
            status: ActivityStatus::Pending,
            remarks: None,
            updated_by: "123".to_string(),
            updated_at: Utc::now(),
        };
        let mut entry = AuthoredUpdate {
            update,
            author_name: None,
        };
        assert_eq!(entry.author(), "123");
        entry.author_name = Some("Ana".to_string());
        assert_eq!(entry.author(), "Ana");
    }
}
