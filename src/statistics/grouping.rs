//! Per-subject partitioning for class reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AbsencePolicy;
use crate::models::{ClassStatistics, MarkRecord};

use super::aggregate::aggregate_with;

/// Statistics for a whole class and for each of its subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    /// Statistics over every record.
    pub overall: ClassStatistics<MarkRecord>,
    /// Statistics per subject, keyed by trimmed subject name.
    pub by_subject: BTreeMap<String, ClassStatistics<MarkRecord>>,
}

/// Aggregates each subject separately.
///
/// Records with a blank subject belong to no partition.
pub fn aggregate_by_subject(
    records: &[MarkRecord],
    policy: AbsencePolicy,
) -> BTreeMap<String, ClassStatistics<MarkRecord>> {
    let mut partitions: BTreeMap<String, Vec<MarkRecord>> = BTreeMap::new();
    for record in records {
        let subject = record.subject.trim();
        if subject.is_empty() {
            continue;
        }
        partitions
            .entry(subject.to_string())
            .or_default()
            .push(record.clone());
    }

    partitions
        .into_iter()
        .map(|(subject, records)| (subject, aggregate_with(&records, policy)))
        .collect()
}

/// Builds the whole-class and per-subject statistics in one report.
///
/// # Examples
///
/// ```
/// use result_engine::config::AbsencePolicy;
/// use result_engine::models::MarkRecord;
/// use result_engine::statistics::class_report;
/// use rust_decimal::Decimal;
///
/// let record = |subject: &str, total: i64, grade: &str| MarkRecord {
///     roll_no: "1".to_string(),
///     subject: subject.to_string(),
///     exam_type: "Annual Exam".to_string(),
///     total: Some(Decimal::from(total)),
///     grade: Some(grade.to_string()),
///     ..Default::default()
/// };
///
/// let report = class_report(
///     &[record("Math", 90, "A+"), record("Hindi", 40, "D")],
///     AbsencePolicy::CountAsPass,
/// );
/// assert_eq!(report.overall.class_average, Decimal::from(65));
/// assert_eq!(report.by_subject["Math"].class_average, Decimal::from(90));
/// ```
pub fn class_report(records: &[MarkRecord], policy: AbsencePolicy) -> ClassReport {
    ClassReport {
        overall: aggregate_with(records, policy),
        by_subject: aggregate_by_subject(records, policy),
    }
}
