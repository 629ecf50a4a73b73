//! Grade calculation for the Result Engine.
//!
//! This module contains every grading rule: threshold lookup of subject
//! grades with the theory-failure override, overall grades with the
//! any-subject-failure override, the pass/fail predicate, normalization and
//! grading of stored mark records, and assembly of per-student results.

mod overall_grade;
mod pass_fail;
mod record_grading;
mod student_result;
mod subject_grade;

pub use overall_grade::{
    OverallGradeResult, SubjectOutcome, evaluate_overall_grade, overall_grade,
};
pub use pass_fail::{ABSENT_SYMBOL, is_passing_grade, normalize_grade};
pub use record_grading::{GradedRecord, grade_record};
pub use student_result::{build_class_results, build_student_result, group_by_student};
pub use subject_grade::{SubjectGradeResult, evaluate_subject_grade, grade_for_total};
