//! Pass/fail classification of grade symbols.

use crate::config::AbsencePolicy;
use crate::models::Grade;

/// The normalized symbol of the absence sentinel.
pub const ABSENT_SYMBOL: &str = "AB";

/// Returns the trimmed, upper-cased form of a grade symbol.
pub fn normalize_grade(grade: &str) -> String {
    grade.trim().to_uppercase()
}

/// Returns whether a grade symbol counts as a pass.
///
/// A grade fails only when its normalized symbol is `E1` or `E2`. Every
/// other symbol passes, including `AB`; use [`AbsencePolicy::is_passing`]
/// to fail absentees instead.
///
/// # Examples
///
/// ```
/// use result_engine::calculation::is_passing_grade;
///
/// assert!(is_passing_grade("A+"));
/// assert!(is_passing_grade("d"));
/// assert!(is_passing_grade("AB"));
/// assert!(!is_passing_grade(" e1 "));
/// assert!(!is_passing_grade("E2"));
/// ```
pub fn is_passing_grade(grade: &str) -> bool {
    let normalized = normalize_grade(grade);
    normalized != Grade::E1.symbol() && normalized != Grade::E2.symbol()
}

impl AbsencePolicy {
    /// Returns whether a grade symbol counts as a pass under this policy.
    ///
    /// ```
    /// use result_engine::config::AbsencePolicy;
    ///
    /// assert!(AbsencePolicy::CountAsPass.is_passing("AB"));
    /// assert!(!AbsencePolicy::CountAsFail.is_passing("ab"));
    /// assert!(AbsencePolicy::CountAsFail.is_passing("B1"));
    /// ```
    pub fn is_passing(&self, grade: &str) -> bool {
        match self {
            AbsencePolicy::CountAsPass => is_passing_grade(grade),
            AbsencePolicy::CountAsFail => {
                is_passing_grade(grade) && normalize_grade(grade) != ABSENT_SYMBOL
            }
        }
    }
}
