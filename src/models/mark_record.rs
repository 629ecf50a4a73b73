//! Mark record model.
//!
//! A [`MarkRecord`] is one student's marks for one subject under one exam
//! sitting, in the shape the upstream document store hands it over.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineResult;

use super::ExamType;

/// One student's marks for one subject under one exam sitting.
///
/// Fields are optional or defaulted because records arrive from an external
/// store and may be incomplete. Grading validates them; aggregation skips
/// the ones it cannot use.
///
/// # Example
///
/// ```
/// use result_engine::models::MarkRecord;
/// use rust_decimal::Decimal;
///
/// let json = r#"{
///     "rollNo": "7",
///     "subject": "Mathematics",
///     "examType": "Annual Exam",
///     "theory": 62,
///     "practical": 20,
///     "session": "2024-25"
/// }"#;
/// let record: MarkRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.theory, Some(Decimal::new(62, 0)));
/// assert!(record.total.is_none());
/// assert!(!record.is_absent);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkRecord {
    /// Student identifier. Not validated for format.
    #[serde(default)]
    pub roll_no: String,
    /// Subject name.
    #[serde(default)]
    pub subject: String,
    /// Raw exam type string as stored upstream.
    #[serde(default)]
    pub exam_type: String,
    /// Theory component marks.
    #[serde(default)]
    pub theory: Option<Decimal>,
    /// Practical component marks; not applicable for monthly tests.
    #[serde(default)]
    pub practical: Option<Decimal>,
    /// Combined marks.
    #[serde(default)]
    pub total: Option<Decimal>,
    /// Whether the student was absent for this subject.
    #[serde(default)]
    pub is_absent: bool,
    /// Letter grade, supplied or computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Month of a monthly test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Academic session, e.g. "2024-25".
    #[serde(default)]
    pub session: String,
}

impl MarkRecord {
    /// Builds a record from loosely-typed JSON.
    ///
    /// Unlike plain deserialization, a single bad field never rejects the
    /// whole record: numbers given as strings are parsed, and anything that
    /// is not a number (e.g. `"N/A"`) becomes `None`. Returns `None` only
    /// when `value` is not a JSON object.
    ///
    /// ```
    /// use result_engine::models::MarkRecord;
    /// use serde_json::json;
    ///
    /// let record = MarkRecord::from_json_lenient(&json!({
    ///     "rollNo": 12,
    ///     "subject": "English",
    ///     "examType": "Monthly Test",
    ///     "theory": "14",
    ///     "practical": "N/A",
    ///     "total": "14"
    /// }))
    /// .unwrap();
    /// assert_eq!(record.roll_no, "12");
    /// assert!(record.practical.is_none());
    /// ```
    pub fn from_json_lenient(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        Some(Self {
            roll_no: lenient_string(object.get("rollNo")).unwrap_or_default(),
            subject: lenient_string(object.get("subject")).unwrap_or_default(),
            exam_type: lenient_string(object.get("examType")).unwrap_or_default(),
            theory: lenient_decimal(object.get("theory")),
            practical: lenient_decimal(object.get("practical")),
            total: lenient_decimal(object.get("total")),
            is_absent: lenient_bool(object.get("isAbsent")),
            grade: lenient_string(object.get("grade")),
            month: lenient_string(object.get("month")),
            session: lenient_string(object.get("session")).unwrap_or_default(),
        })
    }

    /// Parses every object in a JSON array, skipping non-object elements.
    pub fn from_json_array_lenient(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Self::from_json_lenient).collect())
            .unwrap_or_default()
    }

    /// Returns true when roll number, subject and exam type are all non-blank.
    pub fn has_identity(&self) -> bool {
        !self.roll_no.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.exam_type.trim().is_empty()
    }

    /// Parses the record's exam type.
    pub fn parsed_exam_type(&self) -> EngineResult<ExamType> {
        ExamType::from_str(&self.exam_type)
    }

    /// Returns the trimmed, upper-cased grade, or `None` if missing or blank.
    pub fn normalized_grade(&self) -> Option<String> {
        self.grade
            .as_deref()
            .map(|g| g.trim().to_uppercase())
            .filter(|g| !g.is_empty())
    }
}

fn lenient_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_decimal(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn lenient_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "rollNo": "101",
            "subject": "Science",
            "examType": "Quarterly Exam",
            "theory": "50.5",
            "practical": 20,
            "total": 70.5,
            "isAbsent": false,
            "grade": "B",
            "session": "2024-25"
        }"#;

        let record: MarkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.roll_no, "101");
        assert_eq!(record.theory, Some(dec("50.5")));
        assert_eq!(record.practical, Some(dec("20")));
        assert_eq!(record.total, Some(dec("70.5")));
        assert_eq!(record.grade.as_deref(), Some("B"));
        assert!(record.month.is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let record: MarkRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, MarkRecord::default());
        assert!(!record.has_identity());
    }

    #[test]
    fn test_serialization_skips_missing_grade_and_month() {
        let record = MarkRecord {
            roll_no: "1".to_string(),
            subject: "Hindi".to_string(),
            exam_type: "Annual Exam".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"rollNo\":\"1\""));
        assert!(!json.contains("grade"));
        assert!(!json.contains("month"));
    }

    #[test]
    fn test_lenient_parse_tolerates_bad_numbers() {
        let record = MarkRecord::from_json_lenient(&json!({
            "rollNo": "5",
            "subject": "Math",
            "examType": "Annual Exam",
            "theory": "abc",
            "total": null,
            "isAbsent": "TRUE"
        }))
        .unwrap();

        assert!(record.theory.is_none());
        assert!(record.total.is_none());
        assert!(record.is_absent);
    }

    #[test]
    fn test_lenient_parse_rejects_non_objects() {
        assert!(MarkRecord::from_json_lenient(&json!(42)).is_none());
        assert!(MarkRecord::from_json_lenient(&json!("record")).is_none());
    }

    #[test]
    fn test_lenient_array_skips_non_objects() {
        let records = MarkRecord::from_json_array_lenient(&json!([
            {"rollNo": "1", "total": 40},
            "garbage",
            {"rollNo": "2", "total": "55"}
        ]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].total, Some(dec("55")));
    }

    #[test]
    fn test_has_identity_requires_non_blank_fields() {
        let mut record = MarkRecord {
            roll_no: "1".to_string(),
            subject: "Math".to_string(),
            exam_type: "Annual Exam".to_string(),
            ..Default::default()
        };
        assert!(record.has_identity());

        record.subject = "   ".to_string();
        assert!(!record.has_identity());
    }

    #[test]
    fn test_normalized_grade() {
        let mut record = MarkRecord {
            grade: Some(" a+ ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.normalized_grade().as_deref(), Some("A+"));

        record.grade = Some("  ".to_string());
        assert!(record.normalized_grade().is_none());
    }
}
