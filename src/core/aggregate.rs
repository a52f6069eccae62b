//! Aggregation of activity updates.
//!
//! Turns a flat list of updates into per-activity views. The latest update of
//! an activity is the one with the greatest `updated_at`; when two updates
//! share a timestamp the one with the higher id wins. An activity without
//! updates is reported as pending.
//!
//! Everything here is pure: callers fetch rows, these functions only reshape them.

use crate::models::{Activity, ActivityStatus, AuthoredUpdate, UpdateRecord};
use std::{cmp::Ordering, collections::HashMap};
use tracing::warn;

/// Orders two updates newest first: later timestamp, then higher id.
#[must_use]
pub fn newest_first(a: &AuthoredUpdate, b: &AuthoredUpdate) -> Ordering {
    (b.update.updated_at, b.update.id).cmp(&(a.update.updated_at, a.update.id))
}

/// Picks the most recent update from any collection of updates.
pub fn latest_update<'a, I>(updates: I) -> Option<&'a AuthoredUpdate>
where
    I: IntoIterator<Item = &'a AuthoredUpdate>,
{
    updates
        .into_iter()
        .max_by_key(|entry| (entry.update.updated_at, entry.update.id))
}

/// Status derived from an optional latest update.
#[must_use]
pub fn derived_status(latest: Option<&AuthoredUpdate>) -> ActivityStatus {
    latest.map_or(ActivityStatus::Pending, |entry| entry.update.status)
}

/// An activity and its updates, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityGroup {
    /// The activity the updates belong to
    pub activity: Activity,
    /// Updates sorted with [`newest_first`]
    pub updates: Vec<AuthoredUpdate>,
}

impl ActivityGroup {
    /// The most recent update of the group.
    #[must_use]
    pub fn latest(&self) -> Option<&AuthoredUpdate> {
        self.updates.first()
    }

    /// Status of the most recent update, or pending when there is none.
    #[must_use]
    pub fn current_status(&self) -> ActivityStatus {
        derived_status(self.latest())
    }
}

/// Groups joined update rows by activity.
///
/// Each group's updates are sorted newest first. Groups are ordered by their
/// latest update, newest first, which is the order a "most recent activity"
/// listing wants.
#[must_use]
pub fn group_updates(records: Vec<UpdateRecord>) -> Vec<ActivityGroup> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<ActivityGroup> = Vec::new();

    for record in records {
        let activity_id = record.activity.id;
        if record.entry.update.activity_id != activity_id {
            warn!(
                "Skipping update {} joined to activity {} but referencing {}",
                record.entry.update.id, activity_id, record.entry.update.activity_id
            );
            continue;
        }
        if let Some(&position) = index.get(&activity_id) {
            groups[position].updates.push(record.entry);
        } else {
            index.insert(activity_id, groups.len());
            groups.push(ActivityGroup {
                activity: record.activity,
                updates: vec![record.entry],
            });
        }
    }

    for group in &mut groups {
        group.updates.sort_by(newest_first);
    }
    groups.sort_by(|a, b| match (a.latest(), b.latest()) {
        (Some(x), Some(y)) => newest_first(x, y),
        _ => b.activity.id.cmp(&a.activity.id),
    });
    groups
}

/// An activity with its derived current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOverview {
    /// Static activity fields
    pub activity: Activity,
    /// Most recent update, if any
    pub latest: Option<AuthoredUpdate>,
    /// Number of updates recorded against the activity
    pub update_count: usize,
}

impl ActivityOverview {
    /// Status of the latest update, pending when none exists.
    #[must_use]
    pub fn current_status(&self) -> ActivityStatus {
        derived_status(self.latest.as_ref())
    }

    /// Remarks of the latest update.
    #[must_use]
    pub fn latest_remarks(&self) -> Option<&str> {
        self.latest
            .as_ref()
            .and_then(|entry| entry.update.remarks.as_deref())
    }

    /// Display name of whoever wrote the latest update.
    #[must_use]
    pub fn latest_author(&self) -> Option<&str> {
        self.latest.as_ref().map(AuthoredUpdate::author)
    }
}

/// Combines activities with their updates into one overview per activity.
///
/// Activities keep their input order and appear even without updates. Updates
/// that reference an activity not in `activities` are skipped with a warning.
#[must_use]
pub fn build_overview(
    activities: Vec<Activity>,
    updates: Vec<AuthoredUpdate>,
) -> Vec<ActivityOverview> {
    let mut by_activity: HashMap<i64, (Option<AuthoredUpdate>, usize)> = activities
        .iter()
        .map(|activity| (activity.id, (None, 0)))
        .collect();

    for entry in updates {
        let Some((latest, count)) = by_activity.get_mut(&entry.update.activity_id) else {
            warn!(
                "Skipping update {} for unknown activity {}",
                entry.update.id, entry.update.activity_id
            );
            continue;
        };
        *count += 1;
        let replace = latest
            .as_ref()
            .is_none_or(|current| newest_first(&entry, current) == Ordering::Less);
        if replace {
            *latest = Some(entry);
        }
    }

    activities
        .into_iter()
        .map(|activity| {
            let (latest, update_count) = by_activity.remove(&activity.id).unwrap_or_default();
            ActivityOverview {
                activity,
                latest,
                update_count,
            }
        })
        .collect()
}

/// Done / pending counts over a set of derived statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Number of activities counted
    pub total: usize,
    /// Activities whose current status is done
    pub done: usize,
    /// Activities whose current status is pending (or that have no update)
    pub pending: usize,
}

impl StatusCounts {
    /// Tallies an iterator of statuses.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ActivityStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut counts, status| {
                counts.total += 1;
                match status {
                    ActivityStatus::Done => counts.done += 1,
                    ActivityStatus::Pending => counts.pending += 1,
                }
                counts
            })
    }
}
