//! CSV export of reports.
//!
//! One row per (activity, update) pair. Title and remarks are wrapped in
//! double quotes so embedded commas survive. Embedded double quotes are NOT
//! escaped, so a title or remark containing `"` produces a row that standard
//! CSV readers will split incorrectly.

use crate::core::{
    aggregate::ActivityGroup,
    report::{ActivityReport, DATE_FORMAT},
};
use chrono::{NaiveDate, TimeZone};
use std::fmt::Display;

/// MIME type of the exported document.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Header row of the exported document.
pub const CSV_HEADER: [&str; 6] = [
    "Activity Title",
    "Category",
    "Status",
    "Updated By",
    "Update Time",
    "Remarks",
];

/// Timestamp format of the `Update Time` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name for a report covering `start..=end`.
#[must_use]
pub fn report_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "activity_report_{}_to_{}.csv",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    )
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Serializes groups to CSV, formatting timestamps in `tz`.
///
/// Rows are separated by `\n` with no trailing newline.
#[must_use]
pub fn to_csv<Tz>(groups: &[ActivityGroup], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rows = vec![CSV_HEADER.join(",")];

    for group in groups {
        let title = quoted(&group.activity.title);
        for entry in &group.updates {
            let row = [
                title.clone(),
                group.activity.category.to_string(),
                entry.update.status.to_string(),
                entry.author().to_string(),
                entry
                    .update
                    .updated_at
                    .with_timezone(tz)
                    .format(TIMESTAMP_FORMAT)
                    .to_string(),
                quoted(entry.update.remarks.as_deref().unwrap_or_default()),
            ];
            rows.push(row.join(","));
        }
    }

    rows.join("\n")
}

/// A rendered CSV document ready to be attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `activity_report_<start>_to_<end>.csv`
    pub filename: String,
    /// Always [`CSV_MIME_TYPE`]
    pub mime_type: &'static str,
    /// Document body
    pub content: String,
}

/// Renders a generated report as a CSV document.
#[must_use]
pub fn export_report<Tz>(report: &ActivityReport, tz: &Tz) -> CsvExport
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    CsvExport {
        filename: report_filename(report.filter.start, report.filter.end),
        mime_type: CSV_MIME_TYPE,
        content: to_csv(&report.groups, tz),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Activity, ActivityStatus, ActivityUpdate, AuthoredUpdate, Category};
    use chrono::{DateTime, FixedOffset, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn entry(
        id: i64,
        status: ActivityStatus,
        at: &str,
        remarks: Option<&str>,
        author: Option<&str>,
    ) -> AuthoredUpdate {
        AuthoredUpdate {
            update: ActivityUpdate {
                id,
                activity_id: 1,
                status,
                remarks: remarks.map(str::to_string),
                updated_by: "1001".to_string(),
                updated_at: utc(at),
            },
            author_name: author.map(str::to_string),
        }
    }

    fn group(title: &str, updates: Vec<AuthoredUpdate>) -> ActivityGroup {
        ActivityGroup {
            activity: Activity {
                id: 1,
                title: title.to_string(),
                description: String::new(),
                category: Category::Monitoring,
                status: ActivityStatus::Pending,
                created_by: "1001".to_string(),
                created_at: utc("2026-10-01T00:00:00Z"),
                updated_at: utc("2026-10-01T00:00:00Z"),
            },
            updates,
        }
    }

    /// Splits one line on commas outside double quotes.
    fn split_row(line: &str) -> Vec<String> {
        let mut fields = vec![String::new()];
        let mut in_quotes = false;
        for c in line.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(String::new()),
                _ => fields.last_mut().unwrap().push(c),
            }
        }
        fields
    }

    #[test]
    fn test_filename() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(
            report_filename(start, end),
            "activity_report_2026-10-01_to_2026-10-15.csv"
        );
    }

    #[test]
    fn test_one_row_per_update() {
        let groups = vec![group(
            "Daily SMS count",
            vec![
                entry(
                    2,
                    ActivityStatus::Done,
                    "2026-10-15T10:00:00Z",
                    Some("verified"),
                    Some("Ana"),
                ),
                entry(1, ActivityStatus::Pending, "2026-10-14T09:00:00Z", None, Some("Ana")),
            ],
        )];

        let csv = to_csv(&groups, &Utc);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Activity Title,Category,Status,Updated By,Update Time,Remarks"
        );
        assert_eq!(
            lines[1],
            "\"Daily SMS count\",Monitoring,done,Ana,2026-10-15 10:00:00,\"verified\""
        );
        assert_eq!(
            lines[2],
            "\"Daily SMS count\",Monitoring,pending,Ana,2026-10-14 09:00:00,\"\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_embedded_commas_round_trip() {
        let groups = vec![group(
            "Check queues, topics, and DLQs",
            vec![entry(
                1,
                ActivityStatus::Done,
                "2026-10-15T10:00:00Z",
                Some("ok, 3 retried, 0 lost"),
                None,
            )],
        )];

        let csv = to_csv(&groups, &Utc);
        let rows: Vec<Vec<String>> = csv.lines().skip(1).map(split_row).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(rows[0][0], "Check queues, topics, and DLQs");
        assert_eq!(rows[0][5], "ok, 3 retried, 0 lost");
        // Unknown author falls back to the profile id
        assert_eq!(rows[0][3], "1001");
    }

    #[test]
    fn test_embedded_quotes_are_not_escaped() {
        let groups = vec![group(
            "Check \"prod\" DNS",
            vec![entry(1, ActivityStatus::Done, "2026-10-15T10:00:00Z", None, None)],
        )];

        let csv = to_csv(&groups, &Utc);
        assert!(csv.contains("\"Check \"prod\" DNS\""));
    }

    #[test]
    fn test_timestamps_use_reporting_time_zone() {
        let groups = vec![group(
            "Night batch",
            vec![entry(1, ActivityStatus::Done, "2026-10-15T20:15:30Z", None, None)],
        )];
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();

        let csv = to_csv(&groups, &ist);
        assert!(csv.contains(",2026-10-16 01:45:30,"));
    }

    #[test]
    fn test_export_report() {
        use crate::core::report::{DayRange, ReportFilter, build_report};

        let start = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let filter = ReportFilter::for_day(start);
        let range = DayRange::new(&Utc, start, start).unwrap();
        let report = build_report(filter, range, Vec::new());

        let export = export_report(&report, &Utc);
        assert_eq!(export.filename, "activity_report_2026-10-15_to_2026-10-15.csv");
        assert_eq!(export.mime_type, "text/csv");
        assert_eq!(export.content, CSV_HEADER.join(","));
    }

    #[test]
    fn test_empty_report_is_header_only() {
        assert_eq!(to_csv(&[], &Utc), CSV_HEADER.join(","));
    }
}
