//! Per-student result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, ExamType, Grade};

/// One graded subject within a student's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    /// Subject name.
    pub subject: String,
    /// Theory marks (zero when absent).
    pub theory: Decimal,
    /// Practical marks; `None` when not applicable.
    pub practical: Option<Decimal>,
    /// Combined marks for the subject.
    pub total: Decimal,
    /// Maximum marks obtainable in the subject.
    pub max_total: Decimal,
    /// Subject grade.
    pub grade: Grade,
    /// Whether the student was absent.
    pub is_absent: bool,
}

/// A student's complete result for one exam sitting.
///
/// # Example
///
/// ```
/// use result_engine::models::{AuditTrace, ExamType, Grade, StudentResult};
/// use rust_decimal::Decimal;
///
/// let result = StudentResult {
///     roll_no: "7".to_string(),
///     name: None,
///     exam_type: ExamType::AnnualExam,
///     session: "2024-25".to_string(),
///     subjects: vec![],
///     grand_total: Decimal::new(410, 0),
///     max_marks: Decimal::new(500, 0),
///     percentage: Decimal::new(8200, 2),
///     score: Decimal::new(8200, 2),
///     overall_grade: Grade::A2,
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(result.is_passing());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    /// Student identifier.
    pub roll_no: String,
    /// Display name from the roster, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The exam sitting this result covers.
    pub exam_type: ExamType,
    /// Academic session.
    pub session: String,
    /// Per-subject results in input order.
    pub subjects: Vec<SubjectResult>,
    /// Sum of subject totals.
    pub grand_total: Decimal,
    /// Sum of subject maximums.
    pub max_marks: Decimal,
    /// Grand total as a percentage of maximum marks.
    pub percentage: Decimal,
    /// The value the overall grade was computed from: the mean subject total
    /// for monthly tests, the percentage otherwise.
    pub score: Decimal,
    /// Overall grade for the sitting.
    pub overall_grade: Grade,
    /// How the result was computed.
    pub audit_trace: AuditTrace,
}

impl StudentResult {
    /// Returns true unless the overall grade is `E1` or `E2`.
    pub fn is_passing(&self) -> bool {
        !self.overall_grade.is_failing()
    }

    /// Returns the subjects the student failed or missed.
    pub fn failed_subjects(&self) -> impl Iterator<Item = &SubjectResult> {
        self.subjects
            .iter()
            .filter(|s| s.is_absent || s.grade.is_failing())
    }
}
