//! Tracking of in-flight form submissions.
//!
//! Each submission key moves through `Idle -> Submitting -> Settled`, and a
//! settled key may start again. The only way into `Submitting` is
//! [`SubmissionTracker::begin`], and the only way out is dropping (or
//! settling) the returned [`SubmissionGuard`], so a second submission for the
//! same key while one is running is refused rather than queued.
//!
//! This bounds a form to one submission in flight at a time. It does not
//! deduplicate: two submissions made one after the other both get recorded.

use crate::errors::{Error, Result};
use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, PoisonError},
};
use tracing::trace;

/// Which form a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubmissionKey {
    /// Activity creation by one caller
    CreateActivity {
        /// Caller's profile id
        user_id: String,
    },
    /// Status update on one activity by one caller
    RecordUpdate {
        /// Target activity
        activity_id: i64,
        /// Caller's profile id
        user_id: String,
    },
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateActivity { user_id } => write!(f, "new activity by {user_id}"),
            Self::RecordUpdate {
                activity_id,
                user_id,
            } => write!(f, "update on activity #{activity_id} by {user_id}"),
        }
    }
}

/// Lifecycle state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Never submitted
    Idle,
    /// A submission is running
    Submitting,
    /// The last submission finished
    Settled,
}

/// Per-key submission states shared by all command invocations.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    states: Mutex<HashMap<SubmissionKey, SubmissionState>>,
}

impl SubmissionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`.
    pub fn state(&self, key: &SubmissionKey) -> SubmissionState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(SubmissionState::Idle)
    }

    /// Moves `key` into `Submitting`.
    ///
    /// # Errors
    /// `Error::SubmissionInFlight` if `key` is already submitting.
    pub fn begin(&self, key: SubmissionKey) -> Result<SubmissionGuard<'_>> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let state = states.entry(key.clone()).or_insert(SubmissionState::Idle);
        if *state == SubmissionState::Submitting {
            return Err(Error::SubmissionInFlight {
                key: key.to_string(),
            });
        }
        *state = SubmissionState::Submitting;
        trace!("Submission started for {key}");
        Ok(SubmissionGuard { tracker: self, key })
    }

    fn settle(&self, key: &SubmissionKey) {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = states.get_mut(key) {
            *state = SubmissionState::Settled;
        }
        trace!("Submission settled for {key}");
    }
}

/// Proof that a submission is in flight. Dropping it settles the key.
#[derive(Debug)]
#[must_use = "dropping the guard immediately settles the submission"]
pub struct SubmissionGuard<'a> {
    tracker: &'a SubmissionTracker,
    key: SubmissionKey,
}

impl SubmissionGuard<'_> {
    /// The key this guard holds.
    #[must_use]
    pub const fn key(&self) -> &SubmissionKey {
        &self.key
    }

    /// Settles the submission explicitly.
    pub fn settle(self) {
        drop(self);
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.tracker.settle(&self.key);
    }
}
