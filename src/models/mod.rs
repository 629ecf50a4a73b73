//! Core data models for the Result Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod grade;
mod mark_record;
mod roster;
mod statistics;
mod student_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use grade::{ExamType, Grade};
pub use mark_record::MarkRecord;
pub use roster::{Roster, fill_roster};
pub use statistics::{ClassStatistics, PassFail};
pub use student_result::{StudentResult, SubjectResult};
