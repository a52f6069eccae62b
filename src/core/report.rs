//! Report generation business logic.
//!
//! A report covers whole calendar days in the reporting time zone. Updates are
//! first restricted to that range, then grouped per activity, and only then
//! are the category and status filters applied, against each group's latest
//! update. A group whose latest status is done is therefore left out of a
//! "pending" report even if it had pending updates earlier in the range.
//!
//! Generation either succeeds completely or returns an error; there is no
//! partial report.

use crate::{
    core::{
        aggregate::{self, ActivityGroup, StatusCounts},
        update,
    },
    errors::{Error, Result},
    models::{ActivityStatus, Category, UpdateRecord},
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::{fmt, str::FromStr};
use tracing::{debug, instrument};

/// Date format accepted on input and used in file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// `Error::InvalidDate` for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Either every value or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection<T> {
    /// No filtering
    #[default]
    All,
    /// Only this value
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes the filter.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = Error>,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// What a report should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilter {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
    /// Category of the activity
    pub category: Selection<Category>,
    /// Latest status of the activity
    pub status: Selection<ActivityStatus>,
}

impl ReportFilter {
    /// Unfiltered report over `start..=end`.
    ///
    /// # Errors
    /// `Error::InvalidDateRange` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self {
            start,
            end,
            category: Selection::All,
            status: Selection::All,
        })
    }

    /// Unfiltered report over a single day.
    #[must_use]
    pub const fn for_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
            category: Selection::All,
            status: Selection::All,
        }
    }

    /// Restricts the report to one category (or all).
    #[must_use]
    pub const fn with_category(mut self, category: Selection<Category>) -> Self {
        self.category = category;
        self
    }

    /// Restricts the report by latest status (or all).
    #[must_use]
    pub const fn with_status(mut self, status: Selection<ActivityStatus>) -> Self {
        self.status = status;
        self
    }

    /// Whether a group passes the category and status filters.
    #[must_use]
    pub fn accepts(&self, group: &ActivityGroup) -> bool {
        self.category.matches(&group.activity.category)
            && self.status.matches(&group.current_status())
    }
}

/// Instant range covering whole days, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// Start of the first day
    pub start: DateTime<Utc>,
    /// Last instant of the last day
    pub end: DateTime<Utc>,
}

impl DayRange {
    /// Expands `start..=end` to start-of-day / end-of-day in `tz`.
    ///
    /// A day whose midnight falls in a DST gap starts at the first minute
    /// that exists.
    ///
    /// # Errors
    /// `Error::InvalidDateRange` if `end` precedes `start` or a day boundary
    /// cannot be resolved in `tz`.
    pub fn new<Tz: TimeZone>(tz: &Tz, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let invalid = || Error::InvalidDateRange { start, end };
        if end < start {
            return Err(invalid());
        }

        let start_of = |date: NaiveDate| {
            let midnight = date.and_time(NaiveTime::MIN);
            (0..MINUTES_PER_DAY).find_map(|minute| {
                tz.from_local_datetime(&(midnight + Duration::minutes(minute)))
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
            })
        };

        let range_start = start_of(start).ok_or_else(invalid)?;
        let next_day = end.succ_opt().ok_or_else(invalid)?;
        let range_end = start_of(next_day).ok_or_else(invalid)? - Duration::nanoseconds(1);

        Ok(Self {
            start: range_start,
            end: range_end,
        })
    }

    /// Whether `instant` falls within the range.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Summary counts over the filtered groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of activity groups in the report
    pub total_activities: usize,
    /// Groups whose latest status is done
    pub completed: usize,
    /// Groups whose latest status is pending or that have no update
    pub pending: usize,
    /// Raw update rows across all groups
    pub total_updates: usize,
}

/// Computes summary counts for a set of groups.
#[must_use]
pub fn summarize(groups: &[ActivityGroup]) -> ReportSummary {
    let counts = StatusCounts::tally(groups.iter().map(ActivityGroup::current_status));
    ReportSummary {
        total_activities: counts.total,
        completed: counts.done,
        pending: counts.pending,
        total_updates: groups.iter().map(|g| g.updates.len()).sum(),
    }
}

/// A generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    /// Filter the report was generated with
    pub filter: ReportFilter,
    /// Instant range the dates expanded to
    pub range: DayRange,
    /// Matching groups, latest activity first
    pub groups: Vec<ActivityGroup>,
    /// Counts over `groups`
    pub summary: ReportSummary,
}

impl ActivityReport {
    /// Whether the report found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builds a report from already fetched rows.
///
/// Rows outside `range` are dropped before grouping; the category/status
/// filters then apply to each group's latest update.
#[must_use]
pub fn build_report(
    filter: ReportFilter,
    range: DayRange,
    records: Vec<UpdateRecord>,
) -> ActivityReport {
    let in_range: Vec<UpdateRecord> = records
        .into_iter()
        .filter(|record| range.contains(record.entry.update.updated_at))
        .collect();

    let groups: Vec<ActivityGroup> = aggregate::group_updates(in_range)
        .into_iter()
        .filter(|group| filter.accepts(group))
        .collect();

    let summary = summarize(&groups);
    ActivityReport {
        filter,
        range,
        groups,
        summary,
    }
}

/// Fetches the updates in the filter's date range and builds the report.
#[instrument(skip(db, tz))]
pub async fn generate_report<Tz: TimeZone>(
    db: &DatabaseConnection,
    tz: &Tz,
    filter: ReportFilter,
) -> Result<ActivityReport> {
    let range = DayRange::new(tz, filter.start, filter.end)?;
    let records = update::updates_between(db, range.start, range.end).await?;
    debug!("Fetched {} update rows for report", records.len());
    Ok(build_report(filter, range, records))
}

/// All activity groups updated on `date`, latest first.
pub async fn daily_activity<Tz: TimeZone>(
    db: &DatabaseConnection,
    tz: &Tz,
    date: NaiveDate,
) -> Result<Vec<ActivityGroup>> {
    Ok(generate_report(db, tz, ReportFilter::for_day(date))
        .await?
        .groups)
}
