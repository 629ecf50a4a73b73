//! Class statistics for the Result Engine.
//!
//! The aggregator reduces a collection of scored entries to
//! [`ClassStatistics`](crate::models::ClassStatistics): class average, top
//! scorer, grade distribution and pass/fail counts. It has no notion of
//! grouping; callers decide what goes into one call, and the helpers in
//! this module partition by subject for the common reports.
//!
//! Aggregation never fails. Entries it cannot use are left out of every
//! statistic and counted in `excluded_count`.

mod aggregate;
mod grouping;

use rust_decimal::Decimal;

use crate::calculation::normalize_grade;
use crate::models::{MarkRecord, StudentResult};

pub use aggregate::{aggregate, aggregate_graded, aggregate_with};
pub use grouping::{ClassReport, aggregate_by_subject, class_report};

/// Something the aggregator can score.
///
/// Implemented for subject-level [`MarkRecord`]s and per-student
/// [`StudentResult`]s.
pub trait ScoredEntry {
    /// The marks the entry is ranked and averaged by, if present.
    fn score(&self) -> Option<Decimal>;

    /// The normalized grade symbol, if the entry has one.
    fn grade_symbol(&self) -> Option<String>;

    /// Whether the identifying fields are present.
    fn is_identified(&self) -> bool;
}

impl ScoredEntry for MarkRecord {
    fn score(&self) -> Option<Decimal> {
        self.total
    }

    fn grade_symbol(&self) -> Option<String> {
        self.normalized_grade()
    }

    fn is_identified(&self) -> bool {
        self.has_identity()
    }
}

impl ScoredEntry for StudentResult {
    fn score(&self) -> Option<Decimal> {
        Some(self.grand_total)
    }

    fn grade_symbol(&self) -> Option<String> {
        Some(normalize_grade(self.overall_grade.symbol()))
    }

    fn is_identified(&self) -> bool {
        !self.roll_no.trim().is_empty()
    }
}
