//! Grading of a single mark record.
//!
//! [`grade_record`] is the one path every record takes to get a grade,
//! whether it is about to be stored or re-displayed. It normalizes the
//! record (absence, not-applicable practicals, computed total), validates
//! it, and grades it with [`evaluate_subject_grade`].

use chrono::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GradingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, ExamType, Grade, MarkRecord};

use super::subject_grade::{check_range, evaluate_subject_grade};

/// A mark record with its total and grade filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedRecord {
    /// The normalized record, with `total` and `grade` set.
    pub record: MarkRecord,
    /// The parsed exam type.
    pub exam_type: ExamType,
    /// The computed grade.
    pub grade: Grade,
    /// Maximum marks obtainable in the subject.
    pub max_total: Decimal,
    /// The audit step recording this grading.
    pub audit_step: AuditStep,
    /// Anything tolerated rather than rejected.
    pub warnings: Vec<AuditWarning>,
}

/// Normalizes, validates and grades one mark record.
///
/// - Absent records get zero marks and the `AB` grade.
/// - Monthly tests are theory-only: any practical mark is dropped (with a
///   warning if non-zero) and the total equals the theory mark.
/// - Other exams default a missing practical to zero and total theory plus
///   practical.
///
/// # Errors
///
/// - `UnknownExamType` if the record's exam type is not recognized
/// - `InvalidRecord` if theory is missing, the month is not a calendar
///   month, or a supplied total disagrees with the components
/// - `MarkOutOfRange` if any mark is outside its exam type's limits
///
/// # Examples
///
/// ```
/// use result_engine::calculation::grade_record;
/// use result_engine::config::GradingConfig;
/// use result_engine::models::{Grade, MarkRecord};
/// use rust_decimal::Decimal;
///
/// let record = MarkRecord {
///     roll_no: "14".to_string(),
///     subject: "Physics".to_string(),
///     exam_type: "Annual Exam".to_string(),
///     theory: Some(Decimal::from(58)),
///     practical: Some(Decimal::from(22)),
///     ..Default::default()
/// };
///
/// let graded = grade_record(&record, &GradingConfig::standard(), 1).unwrap();
/// assert_eq!(graded.grade, Grade::A);
/// assert_eq!(graded.record.total, Some(Decimal::from(80)));
/// assert_eq!(graded.record.grade.as_deref(), Some("A"));
/// ```
pub fn grade_record(
    record: &MarkRecord,
    config: &GradingConfig,
    step_number: u32,
) -> EngineResult<GradedRecord> {
    let exam_type = record.parsed_exam_type()?;
    let rule = config.rule(exam_type)?;
    let invalid = |message: String| EngineError::InvalidRecord {
        roll_no: record.roll_no.clone(),
        message,
    };

    let mut warnings = Vec::new();
    let mut normalized = record.clone();

    if let Some(month) = record.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        if !exam_type.is_monthly() {
            warnings.push(AuditWarning::low(
                "MONTH_IGNORED",
                format!("Month '{}' is only meaningful for monthly tests", month),
            ));
        } else if month.parse::<Month>().is_err() {
            return Err(invalid(format!("'{}' is not a calendar month", month)));
        }
    }

    if record.is_absent {
        normalized.theory = Some(Decimal::ZERO);
        normalized.practical = rule.has_practical().then_some(Decimal::ZERO);
        normalized.total = Some(Decimal::ZERO);
        normalized.grade = Some(Grade::Absent.to_string());

        let audit_step = AuditStep {
            step_number,
            rule_id: "absence".to_string(),
            rule_name: "Absence".to_string(),
            input: serde_json::json!({
                "roll_no": record.roll_no,
                "subject": record.subject,
                "exam_type": exam_type.as_str(),
                "is_absent": true
            }),
            output: serde_json::json!({
                "total": "0",
                "grade": Grade::Absent.symbol()
            }),
            reasoning: format!(
                "Student {} was absent for {}; marks are zeroed and graded AB",
                record.roll_no, record.subject
            ),
        };

        return Ok(GradedRecord {
            record: normalized,
            exam_type,
            grade: Grade::Absent,
            max_total: rule.max_total(),
            audit_step,
            warnings,
        });
    }

    let theory = record
        .theory
        .ok_or_else(|| invalid(format!("missing theory mark for {}", record.subject)))?;
    check_range("theory", theory, rule.max_theory)?;

    let practical = match rule.max_practical {
        Some(max_practical) => {
            let practical = record.practical.unwrap_or(Decimal::ZERO);
            check_range("practical", practical, max_practical)?;
            Some(practical)
        }
        None => {
            if let Some(supplied) = record.practical.filter(|p| !p.is_zero()) {
                warn!(
                    roll_no = %record.roll_no,
                    subject = %record.subject,
                    practical = %supplied,
                    "Practical marks supplied for a theory-only exam were ignored"
                );
                warnings.push(AuditWarning::low(
                    "PRACTICAL_IGNORED",
                    format!(
                        "{} has no practical component; {} practical marks ignored",
                        exam_type, supplied
                    ),
                ));
            }
            None
        }
    };

    let total = theory + practical.unwrap_or(Decimal::ZERO);
    if let Some(supplied) = record.total {
        if supplied != total {
            return Err(invalid(format!(
                "total {} does not match theory plus practical {}",
                supplied, total
            )));
        }
    }

    let subject_grade = evaluate_subject_grade(total, theory, exam_type, config, step_number)?;

    if let Some(stored) = record.normalized_grade() {
        if stored != subject_grade.grade.symbol() {
            warnings.push(AuditWarning::low(
                "GRADE_RECOMPUTED",
                format!(
                    "Stored grade {} replaced by computed grade {}",
                    stored, subject_grade.grade
                ),
            ));
        }
    }

    normalized.theory = Some(theory);
    normalized.practical = practical;
    normalized.total = Some(total);
    normalized.grade = Some(subject_grade.grade.to_string());

    Ok(GradedRecord {
        record: normalized,
        exam_type,
        grade: subject_grade.grade,
        max_total: rule.max_total(),
        audit_step: subject_grade.audit_step,
        warnings,
    })
}
