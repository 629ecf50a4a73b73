//! Audit models for grading decisions.
//!
//! Every grading rule that fires records an [`AuditStep`], so a grade shown
//! on a report card can be traced back to the marks and thresholds
//! that produced it.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a grading decision.
///
/// # Example
///
/// ```
/// use result_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "subject_grade".to_string(),
///     rule_name: "Subject Grade".to_string(),
///     input: serde_json::json!({"total": "72", "theory": "55"}),
///     output: serde_json::json!({"grade": "B"}),
///     reasoning: "Total 72 meets the B threshold of 60".to_string(),
/// };
/// assert_eq!(step.rule_id, "subject_grade");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during grading.
///
/// Warnings flag data that was tolerated rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a low-severity warning.
    pub fn low(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: "low".to_string(),
        }
    }
}

/// The complete audit trace for a student's result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of grading steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during grading.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the number to give the next step appended to this trace.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}
