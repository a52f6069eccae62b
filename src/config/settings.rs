//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration. The reporting time zone decides where calendar days begin
//! and end for reports, the daily view and CSV timestamps. Without a
//! configured offset the host zone is used and its offset is looked up for
//! each date, so day boundaries follow daylight-saving changes.

use crate::errors::{Error, Result};
use chrono::{FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;
use std::{fmt, path::Path};
use tracing::info;

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Report and listing settings
    pub reporting: ReportingSettings,
}

/// `[reporting]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Offset of the reporting time zone from UTC, in minutes.
    /// `None` uses the host's local offset at startup.
    pub utc_offset_minutes: Option<i32>,
    /// Number of entries in the recent-updates feed
    pub recent_updates_limit: u64,
    /// Maximum number of activities shown by the list command
    pub activity_list_limit: usize,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: None,
            recent_updates_limit: 10,
            activity_list_limit: 25,
        }
    }
}

impl ReportingSettings {
    /// Resolves the reporting time zone.
    ///
    /// # Errors
    /// Returns `Error::Config` if the configured offset is out of range.
    pub fn time_zone(&self) -> Result<ReportingTz> {
        match self.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .map(ReportingTz::Fixed)
                .ok_or_else(|| Error::Config {
                    message: format!("utc_offset_minutes out of range: {minutes}"),
                }),
            None => Ok(ReportingTz::Local),
        }
    }
}

/// Time zone that calendar days are resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingTz {
    /// A constant offset from UTC
    Fixed(FixedOffset),
    /// The host zone, offset resolved per instant
    Local,
}

impl fmt::Display for ReportingTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "UTC{offset}"),
            Self::Local => f.write_str("host local time"),
        }
    }
}

impl TimeZone for ReportingTz {
    type Offset = FixedOffset;

    fn from_offset(offset: &FixedOffset) -> Self {
        Self::Fixed(*offset)
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        match self {
            Self::Fixed(offset) => offset.offset_from_local_date(local),
            Self::Local => Local.offset_from_local_date(local),
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        match self {
            Self::Fixed(offset) => offset.offset_from_local_datetime(local),
            Self::Local => Local.offset_from_local_datetime(local),
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        match self {
            Self::Fixed(offset) => offset.offset_from_utc_date(utc),
            Self::Local => Local.offset_from_utc_date(utc),
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Fixed(offset) => offset.offset_from_utc_datetime(utc),
            Self::Local => Local.offset_from_utc_datetime(utc),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `./config.toml`, or defaults when the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_settings(DEFAULT_CONFIG_PATH)
    } else {
        info!("No {DEFAULT_CONFIG_PATH} found, using default settings.");
        Ok(Settings::default())
    }
}
