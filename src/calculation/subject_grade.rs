//! Per-subject grade calculation.
//!
//! This module maps a subject's total marks to a grade on the exam type's
//! subject scale and applies the theory-failure override.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GradingConfig, GradingScale};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ExamType, Grade};

/// The result of grading one subject, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGradeResult {
    /// The grade the total alone would earn.
    pub normal_grade: Grade,
    /// The final grade after the theory-failure override.
    pub grade: Grade,
    /// Whether the theory mark was below the pass mark.
    pub theory_failed: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Grades one subject's marks for an exam type.
///
/// This is [`evaluate_subject_grade`] without the audit detail.
///
/// # Examples
///
/// ```
/// use result_engine::calculation::grade_for_total;
/// use result_engine::config::GradingConfig;
/// use result_engine::models::{ExamType, Grade};
/// use rust_decimal::Decimal;
///
/// let config = GradingConfig::standard();
///
/// let grade = grade_for_total(Decimal::from(85), Decimal::from(30), ExamType::AnnualExam, &config);
/// assert_eq!(grade.unwrap(), Grade::APlus);
///
/// // Failing theory caps the grade at E1 however good the total is.
/// let grade = grade_for_total(Decimal::from(60), Decimal::from(10), ExamType::AnnualExam, &config);
/// assert_eq!(grade.unwrap(), Grade::E1);
/// ```
pub fn grade_for_total(
    total: Decimal,
    theory: Decimal,
    exam_type: ExamType,
    config: &GradingConfig,
) -> EngineResult<Grade> {
    evaluate_subject_grade(total, theory, exam_type, config, 1).map(|r| r.grade)
}

/// Grades one subject's marks for an exam type, recording an audit step.
///
/// The normal grade comes from looking `total` up in the exam type's
/// subject scale. If `theory` is below the exam type's theory pass mark the
/// grade is capped: a normal grade at the scale's floor stays there,
/// anything else becomes `E1`.
///
/// # Errors
///
/// - `UnknownExamType` if the exam type has no rule in `config`
/// - `MarkOutOfRange` if `theory` or `total` is negative or above its maximum
///
/// `total` is taken as given; checking it against theory plus practical is
/// the job of [`grade_record`](super::grade_record).
pub fn evaluate_subject_grade(
    total: Decimal,
    theory: Decimal,
    exam_type: ExamType,
    config: &GradingConfig,
    step_number: u32,
) -> EngineResult<SubjectGradeResult> {
    let rule = config.rule(exam_type)?;
    let scale = config.scale(&rule.subject_scale)?;

    check_range("theory", theory, rule.max_theory)?;
    check_range("total", total, rule.max_total())?;

    let normal_grade = scale.grade_for(total);
    let theory_failed = theory < rule.theory_pass_mark;
    let grade = if theory_failed {
        cap_failing(normal_grade, scale)
    } else {
        normal_grade
    };

    let reasoning = if theory_failed {
        debug!(
            %exam_type,
            %total,
            %theory,
            %normal_grade,
            %grade,
            "Theory below pass mark, grade capped"
        );
        format!(
            "Total {} earns {} but theory {} is below the pass mark of {}, so the grade is {}",
            total, normal_grade, theory, rule.theory_pass_mark, grade
        )
    } else {
        format!(
            "Total {} on the '{}' scale earns {}",
            total, rule.subject_scale, grade
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "subject_grade".to_string(),
        rule_name: "Subject Grade".to_string(),
        input: serde_json::json!({
            "exam_type": exam_type.as_str(),
            "total": total.to_string(),
            "theory": theory.to_string(),
            "theory_pass_mark": rule.theory_pass_mark.to_string(),
            "scale": rule.subject_scale
        }),
        output: serde_json::json!({
            "normal_grade": normal_grade.symbol(),
            "grade": grade.symbol(),
            "theory_failed": theory_failed
        }),
        reasoning,
    };

    Ok(SubjectGradeResult {
        normal_grade,
        grade,
        theory_failed,
        audit_step,
    })
}

/// Caps a grade after a failure: the floor stays, anything else becomes `E1`.
pub(crate) fn cap_failing(normal_grade: Grade, scale: &GradingScale) -> Grade {
    if normal_grade == scale.lowest() {
        normal_grade
    } else {
        Grade::E1
    }
}

/// Rejects a mark below zero or above `max`.
pub(crate) fn check_range(component: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > max {
        return Err(EngineError::MarkOutOfRange {
            component: component.to_string(),
            value,
            max,
        });
    }
    Ok(())
}
