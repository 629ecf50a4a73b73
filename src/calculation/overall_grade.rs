//! Overall grade calculation.
//!
//! This module grades a student's whole sitting from the aggregate score
//! and applies the any-subject-failure override.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GradingConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, ExamType, Grade};

use super::subject_grade::{cap_failing, check_range};

/// One subject's outcome as seen by the overall grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectOutcome {
    /// The subject grade.
    pub grade: Grade,
    /// Whether the student was absent for the subject.
    pub is_absent: bool,
}

impl SubjectOutcome {
    /// Creates an outcome for a subject the student sat.
    pub fn graded(grade: Grade) -> Self {
        Self {
            grade,
            is_absent: false,
        }
    }

    /// Creates an outcome for a subject the student missed.
    pub fn absent() -> Self {
        Self {
            grade: Grade::Absent,
            is_absent: true,
        }
    }

    fn missed(&self) -> bool {
        self.is_absent || self.grade.is_absent()
    }
}

/// The result of computing an overall grade, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallGradeResult {
    /// The grade the score alone would earn.
    pub normal_grade: Grade,
    /// The final overall grade.
    pub grade: Grade,
    /// Whether any subject was failed or missed.
    pub override_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes a student's overall grade for an exam sitting.
///
/// `score` is the mean subject total for monthly tests and the percentage
/// of total marks for every other exam type.
///
/// # Examples
///
/// ```
/// use result_engine::calculation::{overall_grade, SubjectOutcome};
/// use result_engine::config::GradingConfig;
/// use result_engine::models::{ExamType, Grade};
/// use rust_decimal::Decimal;
///
/// let config = GradingConfig::standard();
/// let subjects = [SubjectOutcome::graded(Grade::A1), SubjectOutcome::graded(Grade::E1)];
///
/// // 78% would be B1, but a failed subject caps the overall grade.
/// let grade = overall_grade(Decimal::from(78), &subjects, ExamType::AnnualExam, &config);
/// assert_eq!(grade.unwrap(), Grade::E1);
/// ```
pub fn overall_grade(
    score: Decimal,
    subjects: &[SubjectOutcome],
    exam_type: ExamType,
    config: &GradingConfig,
) -> EngineResult<Grade> {
    evaluate_overall_grade(score, subjects, exam_type, config, 1).map(|r| r.grade)
}

/// Computes a student's overall grade, recording an audit step.
///
/// The normal grade comes from the exam type's overall scale. When any
/// subject is `E1`, `E2` or missed, the grade is capped: `E2` if the normal
/// grade is already `E2` or any subject was missed, `E1` otherwise.
///
/// # Errors
///
/// - `UnknownExamType` if the exam type has no rule in `config`
/// - `MarkOutOfRange` if `score` is negative or above the scale maximum
pub fn evaluate_overall_grade(
    score: Decimal,
    subjects: &[SubjectOutcome],
    exam_type: ExamType,
    config: &GradingConfig,
    step_number: u32,
) -> EngineResult<OverallGradeResult> {
    let rule = config.rule(exam_type)?;
    let scale = config.scale(&rule.overall_scale)?;

    check_range("score", score, scale.max_score)?;

    let normal_grade = scale.grade_for(score);
    let missed = subjects.iter().filter(|s| s.missed()).count();
    let failed = subjects.iter().filter(|s| s.grade.is_failing()).count();
    let override_applied = missed > 0 || failed > 0;

    let grade = if missed > 0 {
        scale.lowest()
    } else if failed > 0 {
        cap_failing(normal_grade, scale)
    } else {
        normal_grade
    };

    if override_applied {
        debug!(
            %exam_type,
            %score,
            %normal_grade,
            %grade,
            missed,
            failed,
            "Overall grade capped by subject failure"
        );
    }

    let reasoning = match (missed, failed) {
        (0, 0) => format!(
            "Score {} on the '{}' scale earns {}",
            score, rule.overall_scale, grade
        ),
        (0, _) => format!(
            "Score {} earns {} but {} subject(s) failed, so the overall grade is {}",
            score, normal_grade, failed, grade
        ),
        _ => format!(
            "Score {} earns {} but {} subject(s) were missed, so the overall grade is {}",
            score, normal_grade, missed, grade
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overall_grade".to_string(),
        rule_name: "Overall Grade".to_string(),
        input: serde_json::json!({
            "exam_type": exam_type.as_str(),
            "score": score.to_string(),
            "scale": rule.overall_scale,
            "subject_grades": subjects.iter().map(|s| s.grade.symbol()).collect::<Vec<_>>(),
            "subjects_missed": missed
        }),
        output: serde_json::json!({
            "normal_grade": normal_grade.symbol(),
            "grade": grade.symbol(),
            "override_applied": override_applied
        }),
        reasoning,
    };

    Ok(OverallGradeResult {
        normal_grade,
        grade,
        override_applied,
        audit_step,
    })
}
