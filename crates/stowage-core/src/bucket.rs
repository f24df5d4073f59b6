// Rust guideline compliant 2026-10-13

//! Date bucketing of eligible files.

use crate::models::{DateBucket, DateKey, FileRecord};
use crate::Result;
use std::collections::BTreeMap;

/// Partitions records by the UTC calendar date of their last-write time.
///
/// # Arguments
///
/// * `records` - Eligible files, in any order
///
/// # Returns
///
/// Non-empty buckets in ascending date-key order; members within a bucket
/// are ordered by path.
pub fn group_by_date<I>(records: I) -> Vec<DateBucket>
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut buckets: BTreeMap<DateKey, DateBucket> = BTreeMap::new();
    for record in records {
        let key = record.date_key();
        buckets
            .entry(key)
            .or_insert_with(|| DateBucket::new(key))
            .push(record);
    }

    buckets
        .into_values()
        .map(|mut bucket| {
            bucket.sort_members();
            bucket
        })
        .collect()
}

/// Drains a fallible scan into date buckets.
///
/// # Errors
///
/// Returns the first scan error; no buckets are produced in that case.
pub fn bucket_by_date<I>(scan: I) -> Result<Vec<DateBucket>>
where
    I: IntoIterator<Item = Result<FileRecord>>,
{
    let records = scan.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(group_by_date(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn record(path: &str, day: u32, hour: u32) -> FileRecord {
        FileRecord::new(
            PathBuf::from(path),
            Utc.with_ymd_and_hms(2026, 4, day, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_groups_same_day_across_hours() {
        let buckets = group_by_date(vec![
            record("b.log", 3, 1),
            record("a.log", 3, 23),
            record("c.log", 2, 12),
        ]);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key().to_string(), "20260402");
        assert_eq!(buckets[1].key().to_string(), "20260403");
        let names: Vec<_> = buckets[1].members().iter().map(|m| m.file_name()).collect();
        assert_eq!(names, vec!["a.log", "b.log"]);
    }

    #[test]
    fn test_empty_input_has_no_buckets() {
        assert!(group_by_date(Vec::new()).is_empty());
    }

    #[test]
    fn test_scan_error_propagates() {
        let scan = vec![
            Ok(record("a.log", 1, 0)),
            Err(crate::Error::InvalidConfig("boom".to_string())),
        ];
        assert!(bucket_by_date(scan).is_err());
    }
}
