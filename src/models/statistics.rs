//! Class statistics models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pass and fail counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFail {
    /// Number of entries with a passing grade.
    pub pass: usize,
    /// Number of entries with a failing grade.
    pub fail: usize,
}

/// Summary statistics over a set of scored entries.
///
/// `T` is the entry type that was aggregated: subject-level
/// [`MarkRecord`](super::MarkRecord)s or per-student
/// [`StudentResult`](super::StudentResult)s. Keeping it generic stops
/// callers from mixing the two levels in one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistics<T> {
    /// The entry with the highest total; the first one on ties.
    pub top_scorer: Option<T>,
    /// Mean total over valid entries.
    pub class_average: Decimal,
    /// Count of entries per normalized grade symbol.
    pub grade_dist: BTreeMap<String, usize>,
    /// Pass and fail counts.
    pub pass_fail: PassFail,
    /// Number of entries that contributed.
    pub valid_count: usize,
    /// Number of entries silently excluded as invalid.
    pub excluded_count: usize,
}

impl<T> Default for ClassStatistics<T> {
    fn default() -> Self {
        Self {
            top_scorer: None,
            class_average: Decimal::ZERO,
            grade_dist: BTreeMap::new(),
            pass_fail: PassFail::default(),
            valid_count: 0,
            excluded_count: 0,
        }
    }
}

impl<T> ClassStatistics<T> {
    /// Returns true when no entry contributed.
    pub fn is_empty(&self) -> bool {
        self.valid_count == 0
    }

    /// Returns the share of graded entries that passed, as a percentage.
    ///
    /// Returns zero when nothing was graded.
    pub fn pass_percentage(&self) -> Decimal {
        let graded = self.pass_fail.pass + self.pass_fail.fail;
        if graded == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.pass_fail.pass) * Decimal::ONE_HUNDRED / Decimal::from(graded))
            .round_dp(2)
    }
}
