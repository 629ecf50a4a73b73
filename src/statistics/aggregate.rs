//! Statistics aggregation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculation::grade_record;
use crate::config::{AbsencePolicy, GradingConfig};
use crate::models::{ClassStatistics, MarkRecord};

use super::ScoredEntry;

/// Aggregates entries under the default absence policy.
///
/// # Examples
///
/// ```
/// use result_engine::models::MarkRecord;
/// use result_engine::statistics::aggregate;
/// use rust_decimal::Decimal;
///
/// let record = |roll_no: &str, total: i64, grade: &str| MarkRecord {
///     roll_no: roll_no.to_string(),
///     subject: "Math".to_string(),
///     exam_type: "Annual Exam".to_string(),
///     total: Some(Decimal::from(total)),
///     grade: Some(grade.to_string()),
///     ..Default::default()
/// };
///
/// let stats = aggregate(&[record("1", 80, "A"), record("2", 30, "E1")]);
/// assert_eq!(stats.class_average, Decimal::from(55));
/// assert_eq!(stats.pass_fail.pass, 1);
/// assert_eq!(stats.pass_fail.fail, 1);
/// assert_eq!(stats.top_scorer.unwrap().roll_no, "1");
/// ```
pub fn aggregate<T: ScoredEntry + Clone>(entries: &[T]) -> ClassStatistics<T> {
    aggregate_with(entries, AbsencePolicy::default())
}

/// Aggregates entries, classifying `AB` according to `policy`.
///
/// An entry is used when it has a score and its identifying fields.
/// Entries without a grade count toward the average and top scorer but not
/// toward the distribution or pass/fail counts. The top scorer only changes
/// on a strictly greater score, so ties keep the earliest entry.
pub fn aggregate_with<T: ScoredEntry + Clone>(
    entries: &[T],
    policy: AbsencePolicy,
) -> ClassStatistics<T> {
    let mut stats = ClassStatistics::default();
    let mut total_marks = Decimal::ZERO;
    let mut top: Option<(&T, Decimal)> = None;

    for (index, entry) in entries.iter().enumerate() {
        let score = match entry.score() {
            Some(score) if entry.is_identified() => score,
            _ => {
                debug!(index, "Excluding entry without score or identity");
                stats.excluded_count += 1;
                continue;
            }
        };

        let Some(running_total) = total_marks.checked_add(score) else {
            warn!(index, %score, "Excluding entry whose score overflows the running total");
            stats.excluded_count += 1;
            continue;
        };
        total_marks = running_total;
        stats.valid_count += 1;

        if let Some(grade) = entry.grade_symbol() {
            if policy.is_passing(&grade) {
                stats.pass_fail.pass += 1;
            } else {
                stats.pass_fail.fail += 1;
            }
            *stats.grade_dist.entry(grade).or_insert(0) += 1;
        }

        match top {
            Some((_, best)) if score <= best => {}
            _ => top = Some((entry, score)),
        }
    }

    if stats.valid_count == 0 {
        return stats;
    }

    stats.class_average = total_marks / Decimal::from(stats.valid_count);
    stats.top_scorer = top.map(|(entry, _)| entry.clone());
    stats
}

/// Grades records that have no grade yet, then aggregates them.
///
/// Records that already carry a grade are used as they are. Records that
/// cannot be graded are excluded like any other invalid entry. The absence
/// policy comes from `config`.
pub fn aggregate_graded(
    records: &[MarkRecord],
    config: &GradingConfig,
) -> ClassStatistics<MarkRecord> {
    let mut ungradable = 0;
    let graded: Vec<MarkRecord> = records
        .iter()
        .filter_map(|record| {
            if record.normalized_grade().is_some() {
                return Some(record.clone());
            }
            match grade_record(record, config, 1) {
                Ok(graded) => Some(graded.record),
                Err(err) => {
                    debug!(roll_no = %record.roll_no, error = %err, "Excluding ungradable record");
                    ungradable += 1;
                    None
                }
            }
        })
        .collect();

    let mut stats = aggregate_with(&graded, config.absence_policy());
    stats.excluded_count += ungradable;
    stats
}
