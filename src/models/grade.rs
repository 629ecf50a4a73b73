//! Grade symbols and exam types.
//!
//! This module defines the closed [`Grade`] vocabulary shared by the
//! standard and CBSE-style scales, and the [`ExamType`] enum that selects
//! which scale applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A letter grade, or the absence sentinel.
///
/// Both grading vocabularies live in one enum. `E1` and `E2` are the failing
/// grades of both scales.
///
/// # Example
///
/// ```
/// use result_engine::models::Grade;
///
/// let grade: Grade = " a+ ".parse().unwrap();
/// assert_eq!(grade, Grade::APlus);
/// assert_eq!(grade.to_string(), "A+");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Standard scale top grade.
    #[serde(rename = "A+")]
    APlus,
    /// Standard scale.
    A,
    /// Standard scale.
    B,
    /// Standard scale.
    C,
    /// Lowest passing grade on both scales.
    D,
    /// CBSE-style top grade.
    A1,
    /// CBSE-style.
    A2,
    /// CBSE-style.
    B1,
    /// CBSE-style.
    B2,
    /// CBSE-style.
    C1,
    /// CBSE-style.
    C2,
    /// Failing, second-lowest grade.
    E1,
    /// Failing, lowest grade.
    E2,
    /// Absent for the subject or sitting.
    #[serde(rename = "AB")]
    Absent,
}

impl Grade {
    /// Every grade symbol, best first within each scale.
    pub const ALL: [Grade; 14] = [
        Grade::APlus,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::A1,
        Grade::A2,
        Grade::B1,
        Grade::B2,
        Grade::C1,
        Grade::C2,
        Grade::D,
        Grade::E1,
        Grade::E2,
        Grade::Absent,
    ];

    /// Returns the canonical symbol for this grade.
    pub fn symbol(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::A1 => "A1",
            Grade::A2 => "A2",
            Grade::B1 => "B1",
            Grade::B2 => "B2",
            Grade::C1 => "C1",
            Grade::C2 => "C2",
            Grade::E1 => "E1",
            Grade::E2 => "E2",
            Grade::Absent => "AB",
        }
    }

    /// Returns the position of this grade within its own scale.
    ///
    /// Higher is better. Ranks are only comparable between grades of the
    /// same scale; `D`, `E1` and `E2` sit at the same rank on both scales.
    ///
    /// ```
    /// use result_engine::models::Grade;
    ///
    /// assert!(Grade::APlus.rank() > Grade::A.rank());
    /// assert!(Grade::B1.rank() > Grade::B2.rank());
    /// assert!(Grade::E1.rank() > Grade::E2.rank());
    /// ```
    pub fn rank(&self) -> u8 {
        match self {
            Grade::Absent => 0,
            Grade::E2 => 1,
            Grade::E1 => 2,
            Grade::D => 3,
            Grade::C | Grade::C2 => 4,
            Grade::B | Grade::C1 => 5,
            Grade::A | Grade::B2 => 6,
            Grade::APlus | Grade::B1 => 7,
            Grade::A2 => 8,
            Grade::A1 => 9,
        }
    }

    /// Returns true for the failing grades `E1` and `E2`.
    pub fn is_failing(&self) -> bool {
        matches!(self, Grade::E1 | Grade::E2)
    }

    /// Returns true for the absence sentinel.
    pub fn is_absent(&self) -> bool {
        matches!(self, Grade::Absent)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Grade::ALL
            .iter()
            .find(|g| g.symbol() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown grade symbol: {}", s.trim()))
    }
}

/// The category of assessment, which selects mark limits and grading scales.
///
/// Serialized with the display names stored by the upstream document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamType {
    /// Theory-only test marked out of 20.
    #[serde(rename = "Monthly Test")]
    MonthlyTest,
    /// Quarterly term exam.
    #[serde(rename = "Quarterly Exam")]
    QuarterlyExam,
    /// Half-term exam.
    #[serde(rename = "Half Monthly Exam")]
    HalfMonthlyExam,
    /// End-of-year exam.
    #[serde(rename = "Annual Exam")]
    AnnualExam,
}

impl ExamType {
    /// Every exam type.
    pub const ALL: [ExamType; 4] = [
        ExamType::MonthlyTest,
        ExamType::QuarterlyExam,
        ExamType::HalfMonthlyExam,
        ExamType::AnnualExam,
    ];

    /// Returns the display name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::MonthlyTest => "Monthly Test",
            ExamType::QuarterlyExam => "Quarterly Exam",
            ExamType::HalfMonthlyExam => "Half Monthly Exam",
            ExamType::AnnualExam => "Annual Exam",
        }
    }

    /// Returns true for the theory-only monthly test.
    pub fn is_monthly(&self) -> bool {
        matches!(self, ExamType::MonthlyTest)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let trimmed = s.trim();
        ExamType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| EngineError::UnknownExamType {
                value: trimmed.to_string(),
            })
    }
}
