//! Per-student result assembly.
//!
//! Grades every subject a student sat in one exam, totals them, and derives
//! the overall grade.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GradingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, MarkRecord, Roster, StudentResult, SubjectResult};

use super::overall_grade::{SubjectOutcome, evaluate_overall_grade};
use super::record_grading::grade_record;

/// Builds one student's result for one exam sitting.
///
/// Every record must carry `roll_no` and the same exam type. Absent
/// subjects add zero marks but still count toward maximum marks.
///
/// The overall grade is computed from the exact score; `percentage` and
/// `score` on the result are rounded to two places for display.
///
/// # Errors
///
/// - `InvalidRecord` if `records` is empty, belongs to another student, or
///   mixes exam types
/// - any error from [`grade_record`] or
///   [`evaluate_overall_grade`](super::evaluate_overall_grade)
///
/// # Examples
///
/// ```
/// use result_engine::calculation::build_student_result;
/// use result_engine::config::GradingConfig;
/// use result_engine::models::{Grade, MarkRecord};
/// use rust_decimal::Decimal;
///
/// let record = |subject: &str, theory: i64, practical: i64| MarkRecord {
///     roll_no: "3".to_string(),
///     subject: subject.to_string(),
///     exam_type: "Annual Exam".to_string(),
///     theory: Some(Decimal::from(theory)),
///     practical: Some(Decimal::from(practical)),
///     ..Default::default()
/// };
///
/// let records = vec![record("Math", 70, 22), record("Science", 60, 20)];
/// let result = build_student_result("3", &records, &GradingConfig::standard()).unwrap();
///
/// assert_eq!(result.grand_total, Decimal::from(172));
/// assert_eq!(result.percentage, Decimal::from(86));
/// assert_eq!(result.overall_grade, Grade::A2);
/// ```
pub fn build_student_result(
    roll_no: &str,
    records: &[MarkRecord],
    config: &GradingConfig,
) -> EngineResult<StudentResult> {
    let roll_no = roll_no.trim();
    let invalid = |message: String| EngineError::InvalidRecord {
        roll_no: roll_no.to_string(),
        message,
    };

    let first = records
        .first()
        .ok_or_else(|| invalid("no mark records".to_string()))?;
    let exam_type = first.parsed_exam_type()?;

    let mut trace = AuditTrace::default();
    let mut subjects = Vec::with_capacity(records.len());
    let mut outcomes = Vec::with_capacity(records.len());
    let mut grand_total = Decimal::ZERO;
    let mut max_marks = Decimal::ZERO;

    for record in records {
        if record.roll_no.trim() != roll_no {
            return Err(invalid(format!(
                "record for {} belongs to roll number '{}'",
                record.subject, record.roll_no
            )));
        }
        if record.parsed_exam_type()? != exam_type {
            return Err(invalid(format!(
                "mixed exam types: {} and {}",
                exam_type, record.exam_type
            )));
        }

        let graded = grade_record(record, config, trace.next_step_number())?;
        trace.steps.push(graded.audit_step);
        trace.warnings.extend(graded.warnings);

        let total = graded.record.total.unwrap_or(Decimal::ZERO);
        grand_total += total;
        max_marks += graded.max_total;

        outcomes.push(SubjectOutcome {
            grade: graded.grade,
            is_absent: record.is_absent,
        });
        subjects.push(SubjectResult {
            subject: graded.record.subject,
            theory: graded.record.theory.unwrap_or(Decimal::ZERO),
            practical: graded.record.practical,
            total,
            max_total: graded.max_total,
            grade: graded.grade,
            is_absent: record.is_absent,
        });
    }

    let percentage = grand_total * Decimal::ONE_HUNDRED / max_marks;
    let score = if exam_type.is_monthly() {
        grand_total / Decimal::from(subjects.len())
    } else {
        percentage
    };

    let overall =
        evaluate_overall_grade(score, &outcomes, exam_type, config, trace.next_step_number())?;
    trace.steps.push(overall.audit_step);

    debug!(
        roll_no,
        %exam_type,
        %grand_total,
        %max_marks,
        overall_grade = %overall.grade,
        "Built student result"
    );

    Ok(StudentResult {
        roll_no: roll_no.to_string(),
        name: None,
        exam_type,
        session: first.session.clone(),
        subjects,
        grand_total,
        max_marks,
        percentage: percentage.round_dp(2),
        score: score.round_dp(2),
        overall_grade: overall.grade,
        audit_trace: trace,
    })
}

/// Groups records by trimmed roll number, skipping records without one.
pub fn group_by_student(records: &[MarkRecord]) -> BTreeMap<String, Vec<MarkRecord>> {
    let mut groups: BTreeMap<String, Vec<MarkRecord>> = BTreeMap::new();
    for record in records {
        let roll_no = record.roll_no.trim();
        if roll_no.is_empty() {
            continue;
        }
        groups
            .entry(roll_no.to_string())
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Builds a result for every student in `records`, ordered by roll number.
///
/// Records are expected to be pre-filtered to one exam sitting. Names are
/// taken from `roster` when given. Fails on the first student whose
/// records cannot be graded, so no partial class result is shown with a
/// wrong grade in it.
pub fn build_class_results(
    records: &[MarkRecord],
    roster: Option<&Roster>,
    config: &GradingConfig,
) -> EngineResult<Vec<StudentResult>> {
    group_by_student(records)
        .into_iter()
        .map(|(roll_no, student_records)| {
            let mut result = build_student_result(&roll_no, &student_records, config)?;
            result.name = roster
                .and_then(|r| r.name_of(&roll_no))
                .map(str::to_string);
            Ok(result)
        })
        .collect()
}
