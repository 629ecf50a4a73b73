//! Roster of enrolled students.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{ExamType, MarkRecord};

/// Enrolled students of a class, keyed by roll number.
///
/// The roster only supplies display names and placeholder rows (see
/// [`fill_roster`]); it plays no part in grade computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    students: BTreeMap<String, String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or renames a student.
    pub fn insert(&mut self, roll_no: impl Into<String>, name: impl Into<String>) {
        let roll_no: String = roll_no.into();
        self.students.insert(roll_no.trim().to_string(), name.into());
    }

    /// Returns a student's name.
    pub fn name_of(&self, roll_no: &str) -> Option<&str> {
        self.students.get(roll_no.trim()).map(String::as_str)
    }

    /// Returns the number of enrolled students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Returns true when no student is enrolled.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl FromIterator<(String, String)> for Roster {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (roll_no, name) in iter {
            roster.insert(roll_no, name);
        }
        roster
    }
}

/// Returns the input records plus absent placeholders for unrecorded students.
///
/// Every enrolled student with no record at all gets one placeholder per
/// subject that appears in `records`. Placeholders are marked absent and
/// carry no marks or grade, so [`grade_record`](crate::calculation::grade_record)
/// grades them `AB`. Plain aggregation leaves them out because they have no
/// total. The caller's records are not modified.
///
/// # Example
///
/// ```
/// use result_engine::models::{ExamType, MarkRecord, Roster, fill_roster};
///
/// let mut roster = Roster::new();
/// roster.insert("1", "Asha");
/// roster.insert("2", "Ravi");
///
/// let records = vec![MarkRecord {
///     roll_no: "1".to_string(),
///     subject: "Math".to_string(),
///     exam_type: "Annual Exam".to_string(),
///     ..Default::default()
/// }];
///
/// let filled = fill_roster(&records, &roster, ExamType::AnnualExam, "2024-25");
/// assert_eq!(filled.len(), 2);
/// assert_eq!(filled[1].roll_no, "2");
/// assert!(filled[1].is_absent);
/// assert!(filled[1].total.is_none());
/// ```
pub fn fill_roster(
    records: &[MarkRecord],
    roster: &Roster,
    exam_type: ExamType,
    session: &str,
) -> Vec<MarkRecord> {
    let subjects: BTreeSet<&str> = records
        .iter()
        .map(|r| r.subject.trim())
        .filter(|s| !s.is_empty())
        .collect();
    let recorded: BTreeSet<&str> = records.iter().map(|r| r.roll_no.trim()).collect();

    let mut filled = records.to_vec();
    for roll_no in roster.students.keys() {
        if recorded.contains(roll_no.as_str()) {
            continue;
        }
        for subject in &subjects {
            filled.push(MarkRecord {
                roll_no: roll_no.clone(),
                subject: subject.to_string(),
                exam_type: exam_type.to_string(),
                is_absent: true,
                session: session.to_string(),
                ..Default::default()
            });
        }
    }
    filled
}
