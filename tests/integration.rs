//! Integration tests for the Result Engine.
//!
//! These tests run whole flows against the shipped configuration:
//! - Loosely-typed JSON records graded and stored
//! - Term exam results with percentage-based overall grades
//! - Monthly test results with average-based overall grades
//! - Absence handling under both absence policies and roster placeholders
//! - Class statistics and per-subject reports
//! - Error cases

use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use result_engine::calculation::{build_class_results, build_student_result, grade_record};
use result_engine::config::{AbsencePolicy, ConfigLoader, GradingConfig};
use result_engine::error::EngineError;
use result_engine::models::{ExamType, Grade, MarkRecord, Roster, fill_roster};
use result_engine::statistics::{aggregate, aggregate_graded, aggregate_with, class_report};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> GradingConfig {
    ConfigLoader::load("./config/standard")
        .expect("Failed to load config")
        .into_config()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn term_json(roll_no: &str, subject: &str, theory: &str, practical: &str) -> Value {
    json!({
        "rollNo": roll_no,
        "subject": subject,
        "examType": "Annual Exam",
        "theory": theory,
        "practical": practical,
        "session": "2024-25"
    })
}

fn absent_json(roll_no: &str, subject: &str) -> Value {
    json!({
        "rollNo": roll_no,
        "subject": subject,
        "examType": "Annual Exam",
        "isAbsent": "true",
        "session": "2024-25"
    })
}

fn monthly_json(roll_no: &str, subject: &str, theory: &str) -> Value {
    json!({
        "rollNo": roll_no,
        "subject": subject,
        "examType": "Monthly Test",
        "theory": theory,
        "practical": "N/A",
        "month": "July",
        "session": "2024-25"
    })
}

/// Three students sitting the annual exam in Math and Science.
fn annual_records() -> Vec<MarkRecord> {
    let payload = json!([
        term_json("1", "Math", "70", "22"),
        term_json("1", "Science", "60", "20"),
        term_json("2", "Math", "20", "10"),
        term_json("2", "Science", "50", "20"),
        absent_json("3", "Math"),
        term_json("3", "Science", "40", "15"),
    ]);
    MarkRecord::from_json_array_lenient(&payload)
}

fn roster() -> Roster {
    let mut roster = Roster::new();
    roster.insert("1", "Asha");
    roster.insert("2", "Ravi");
    roster.insert("3", "Meera");
    roster.insert("4", "Kabir");
    roster
}

/// Grades every record the way they are graded before being stored.
fn stored_records(records: &[MarkRecord], config: &GradingConfig) -> Vec<MarkRecord> {
    records
        .iter()
        .map(|r| grade_record(r, config, 1).unwrap().record)
        .collect()
}

// =============================================================================
// SECTION 1: Record Grading
// =============================================================================

#[test]
fn test_lenient_records_are_graded_for_storage() {
    let config = load_config();
    let stored = stored_records(&annual_records(), &config);

    let grades: Vec<&str> = stored.iter().map(|r| r.grade.as_deref().unwrap()).collect();
    assert_eq!(grades, vec!["A+", "A", "E1", "B", "AB", "C"]);

    let totals: Vec<Decimal> = stored.iter().map(|r| r.total.unwrap()).collect();
    assert_eq!(
        totals,
        vec![
            decimal("92"),
            decimal("80"),
            decimal("30"),
            decimal("70"),
            decimal("0"),
            decimal("55")
        ]
    );
}

#[test]
fn test_theory_failure_caps_subject_grade() {
    let config = load_config();
    // 24 + 25 = 49 would be a C, but theory is below the pass mark of 25.
    let record = MarkRecord::from_json_lenient(&term_json("8", "Math", "24", "25")).unwrap();

    let graded = grade_record(&record, &config, 1).unwrap();

    assert_eq!(graded.grade, Grade::E1);
    assert_eq!(graded.audit_step.rule_id, "subject_grade");
}

#[test]
fn test_monthly_practical_na_is_dropped() {
    let config = load_config();
    let record = MarkRecord::from_json_lenient(&monthly_json("5", "Math", "18")).unwrap();

    let graded = grade_record(&record, &config, 1).unwrap();

    assert_eq!(graded.grade, Grade::APlus);
    assert_eq!(graded.record.total, Some(decimal("18")));
    assert!(graded.record.practical.is_none());
    assert!(graded.warnings.is_empty());
}

// =============================================================================
// SECTION 2: Term Exam Results
// =============================================================================

#[test]
fn test_annual_class_results() {
    let config = load_config();
    let roster = roster();

    let results = build_class_results(&annual_records(), Some(&roster), &config).unwrap();

    assert_eq!(results.len(), 3);

    let asha = &results[0];
    assert_eq!(asha.name.as_deref(), Some("Asha"));
    assert_eq!(asha.grand_total, decimal("172"));
    assert_eq!(asha.max_marks, decimal("200"));
    assert_eq!(asha.percentage, decimal("86"));
    assert_eq!(asha.overall_grade, Grade::A2);
    assert!(asha.is_passing());

    // 50% alone is C2, but a failed subject caps the overall grade.
    let ravi = &results[1];
    assert_eq!(ravi.percentage, decimal("50"));
    assert_eq!(ravi.overall_grade, Grade::E1);
    assert_eq!(ravi.failed_subjects().count(), 1);

    // A missed subject forces the lowest grade.
    let meera = &results[2];
    assert_eq!(meera.percentage, decimal("27.5"));
    assert_eq!(meera.overall_grade, Grade::E2);
}

#[test]
fn test_student_result_audit_trace() {
    let config = load_config();
    let records: Vec<MarkRecord> = annual_records()
        .into_iter()
        .filter(|r| r.roll_no == "2")
        .collect();

    let result = build_student_result("2", &records, &config).unwrap();

    let steps = &result.audit_trace.steps;
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].step_number, 1);
    assert_eq!(steps[2].step_number, 3);
    assert_eq!(steps[2].rule_id, "overall_grade");
}

// =============================================================================
// SECTION 3: Monthly Test Results
// =============================================================================

#[test]
fn test_monthly_result_uses_average() {
    let config = load_config();
    let payload = json!([
        monthly_json("5", "Math", "18"),
        monthly_json("5", "English", "12"),
        monthly_json("5", "Hindi", "3"),
        monthly_json("6", "Math", "15"),
        monthly_json("6", "English", "16"),
        monthly_json("6", "Hindi", "14"),
    ]);
    let records = MarkRecord::from_json_array_lenient(&payload);

    let results = build_class_results(&records, None, &config).unwrap();

    let first = &results[0];
    assert_eq!(first.exam_type, ExamType::MonthlyTest);
    assert_eq!(first.max_marks, decimal("60"));
    assert_eq!(first.score, decimal("11"));
    assert_eq!(first.percentage, decimal("55"));
    assert_eq!(first.subjects[2].grade, Grade::E2);
    assert_eq!(first.overall_grade, Grade::E1);

    let second = &results[1];
    assert_eq!(second.score, decimal("15"));
    assert_eq!(second.overall_grade, Grade::A);
    assert!(second.name.is_none());
}

// =============================================================================
// SECTION 4: Class Statistics
// =============================================================================

#[test]
fn test_statistics_over_student_results() {
    let config = load_config();
    let results = build_class_results(&annual_records(), None, &config).unwrap();

    let stats = aggregate(&results);

    assert_eq!(stats.class_average, decimal("109"));
    assert_eq!(stats.top_scorer.as_ref().unwrap().roll_no, "1");
    assert_eq!(stats.grade_dist["A2"], 1);
    assert_eq!(stats.grade_dist["E1"], 1);
    assert_eq!(stats.grade_dist["E2"], 1);
    assert_eq!(stats.pass_fail.pass, 1);
    assert_eq!(stats.pass_fail.fail, 2);
}

#[test]
fn test_class_report_over_stored_records() {
    let config = load_config();
    let stored = stored_records(&annual_records(), &config);

    let report = class_report(&stored, config.absence_policy());

    assert_eq!(report.overall.class_average, decimal("54.5"));
    assert_eq!(report.overall.pass_fail.pass, 5);
    assert_eq!(report.overall.pass_fail.fail, 1);
    assert_eq!(report.overall.grade_dist["AB"], 1);

    let math = &report.by_subject["Math"];
    assert_eq!(math.class_average.round_dp(2), decimal("40.67"));
    assert_eq!(math.top_scorer.as_ref().unwrap().roll_no, "1");

    let science = &report.by_subject["Science"];
    assert_eq!(science.class_average.round_dp(2), decimal("68.33"));
    assert_eq!(science.pass_fail.fail, 0);
}

#[test]
fn test_absence_counted_as_fail_when_configured() {
    let config = load_config().with_absence_policy(AbsencePolicy::CountAsFail);
    let stored = stored_records(&annual_records(), &config);

    let stats = aggregate_with(&stored, config.absence_policy());

    assert_eq!(stats.pass_fail.pass, 4);
    assert_eq!(stats.pass_fail.fail, 2);
}

#[test]
fn test_roster_placeholders_count_as_absent_once_graded() {
    let config = load_config();
    let stored = stored_records(&annual_records(), &config);

    let filled = fill_roster(&stored, &roster(), ExamType::AnnualExam, "2024-25");
    assert_eq!(filled.len(), 8);
    assert!(filled[6..].iter().all(|r| r.roll_no == "4" && r.is_absent));

    // Ungraded placeholders have no total yet.
    let raw = aggregate(&filled);
    assert_eq!(raw.valid_count, 6);
    assert_eq!(raw.excluded_count, 2);
    assert_eq!(raw.class_average, decimal("54.5"));

    let graded = aggregate_graded(&filled, &config);
    assert_eq!(graded.valid_count, 8);
    assert_eq!(graded.grade_dist["AB"], 3);
    assert_eq!(graded.class_average, decimal("40.875"));
}

#[test]
fn test_roster_fills_whole_class_results() {
    let config = load_config();
    let roster = roster();
    let filled = fill_roster(&annual_records(), &roster, ExamType::AnnualExam, "2024-25");

    let results = build_class_results(&filled, Some(&roster), &config).unwrap();

    assert_eq!(results.len(), 4);
    let kabir = &results[3];
    assert_eq!(kabir.name.as_deref(), Some("Kabir"));
    assert_eq!(kabir.grand_total, Decimal::ZERO);
    assert_eq!(kabir.overall_grade, Grade::E2);
    assert!(kabir.subjects.iter().all(|s| s.grade == Grade::Absent));
}

#[test]
fn test_invalid_json_fields_are_excluded() {
    let payload = json!([
        {"rollNo": "1", "subject": "Math", "examType": "Annual Exam", "total": "88", "grade": "a+"},
        {"rollNo": "2", "subject": "Math", "examType": "Annual Exam", "total": "N/A", "grade": "E2"},
        {"rollNo": "", "subject": "Math", "examType": "Annual Exam", "total": 99, "grade": "A+"},
        "not a record"
    ]);
    let records = MarkRecord::from_json_array_lenient(&payload);
    assert_eq!(records.len(), 3);

    let stats = aggregate(&records);

    assert_eq!(stats.class_average, decimal("88"));
    assert_eq!(stats.grade_dist.len(), 1);
    assert_eq!(stats.grade_dist["A+"], 1);
    assert_eq!(stats.excluded_count, 2);
}

#[test]
fn test_aggregate_graded_on_raw_records() {
    let config = load_config();

    let stats = aggregate_graded(&annual_records(), &config);

    assert_eq!(stats.valid_count, 6);
    assert_eq!(stats.class_average, decimal("54.5"));
    assert_eq!(stats.grade_dist["A+"], 1);
}

#[test]
fn test_statistics_serialize_camel_case() {
    let config = load_config();
    let results = build_class_results(&annual_records(), None, &config).unwrap();

    let value = serde_json::to_value(aggregate(&results)).unwrap();

    assert_eq!(decimal(value["classAverage"].as_str().unwrap()), decimal("109"));
    assert_eq!(value["passFail"]["fail"], json!(2));
    assert_eq!(value["topScorer"]["rollNo"], json!("1"));
    assert_eq!(value["gradeDist"]["A2"], json!(1));
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[test]
fn test_unknown_exam_type_rejected() {
    let config = load_config();
    let mut record = MarkRecord::from_json_lenient(&term_json("1", "Math", "50", "20")).unwrap();
    record.exam_type = "Unit Test".to_string();

    match grade_record(&record, &config, 1) {
        Err(EngineError::UnknownExamType { value }) => assert_eq!(value, "Unit Test"),
        other => panic!("Expected UnknownExamType, got {:?}", other),
    }
}

#[test]
fn test_theory_above_maximum_rejected() {
    let config = load_config();
    let record = MarkRecord::from_json_lenient(&term_json("1", "Math", "80", "10")).unwrap();

    match grade_record(&record, &config, 1) {
        Err(EngineError::MarkOutOfRange { component, .. }) => assert_eq!(component, "theory"),
        other => panic!("Expected MarkOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_class_results_fail_fast() {
    let config = load_config();
    let mut records = annual_records();
    records.push(MarkRecord::from_json_lenient(&term_json("4", "Math", "76", "0")).unwrap());

    let result = build_class_results(&records, Some(&roster()), &config);

    assert!(matches!(result, Err(EngineError::MarkOutOfRange { .. })));
}
