//! Configuration types for grading.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in
//! standard configuration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ExamType, Grade};

/// Metadata about the examination board whose rules are configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMetadata {
    /// Short code for the board (e.g., "CBSE").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective session of the rules.
    pub version: String,
    /// How an absent (`AB`) grade is classified in pass/fail counts.
    #[serde(default)]
    pub absence_policy: AbsencePolicy,
}

/// How the absence sentinel `AB` is classified when counting passes and fails.
///
/// The literal passing rule only fails `E1` and `E2`, so `AB` counts as a
/// pass unless a school opts into [`AbsencePolicy::CountAsFail`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePolicy {
    /// `AB` is counted as a pass.
    #[default]
    CountAsPass,
    /// `AB` is counted as a fail.
    CountAsFail,
}

/// One row of a threshold table: the minimum score for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeBand {
    /// The grade awarded.
    pub grade: Grade,
    /// The inclusive lower bound.
    pub min: Decimal,
}

/// A threshold table mapping a score to a grade.
///
/// Bands are listed best first with strictly descending minimums; a score
/// below every band gets the `floor` grade.
///
/// # Example
///
/// ```
/// use result_engine::config::GradingConfig;
/// use result_engine::models::Grade;
/// use rust_decimal::Decimal;
///
/// let config = GradingConfig::standard();
/// let general = config.scale("general").unwrap();
/// assert_eq!(general.grade_for(Decimal::new(85, 0)), Grade::APlus);
/// assert_eq!(general.grade_for(Decimal::new(19, 0)), Grade::E2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingScale {
    /// The highest score the scale accepts.
    pub max_score: Decimal,
    /// Grade bands, best first.
    pub bands: Vec<GradeBand>,
    /// The grade for scores below every band.
    pub floor: Grade,
}

impl GradingScale {
    /// Returns the grade for a score by threshold lookup.
    pub fn grade_for(&self, score: Decimal) -> Grade {
        self.bands
            .iter()
            .find(|band| score >= band.min)
            .map(|band| band.grade)
            .unwrap_or(self.floor)
    }

    /// Returns the lowest grade of the scale.
    pub fn lowest(&self) -> Grade {
        self.floor
    }

    fn validate(&self, name: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidConfig {
            message: format!("scale '{}': {}", name, message),
        };

        if self.bands.is_empty() {
            return Err(invalid("has no grade bands".to_string()));
        }
        if self.max_score <= Decimal::ZERO {
            return Err(invalid("max_score must be positive".to_string()));
        }
        for pair in self.bands.windows(2) {
            if pair[0].min <= pair[1].min {
                return Err(invalid(format!(
                    "band {} (min {}) must be above band {} (min {})",
                    pair[0].grade, pair[0].min, pair[1].grade, pair[1].min
                )));
            }
        }
        if let Some(lowest_band) = self.bands.last() {
            if lowest_band.min <= Decimal::ZERO {
                return Err(invalid(format!(
                    "lowest band {} must have a positive minimum so the floor is reachable",
                    lowest_band.grade
                )));
            }
        }
        if self.bands.iter().any(|b| b.grade == self.floor) {
            return Err(invalid(format!("floor {} also appears as a band", self.floor)));
        }
        let ends_with_e1 = self.bands.last().is_some_and(|b| b.grade == Grade::E1);
        if !ends_with_e1 || self.floor != Grade::E2 {
            return Err(invalid("must end with an E1 band and an E2 floor".to_string()));
        }
        Ok(())
    }
}

/// Grading rules for one exam type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamTypeRule {
    /// Name of the scale used for per-subject grades.
    pub subject_scale: String,
    /// Name of the scale used for the overall grade.
    pub overall_scale: String,
    /// Maximum theory marks.
    pub max_theory: Decimal,
    /// Maximum practical marks; `None` when the exam has no practical.
    #[serde(default)]
    pub max_practical: Option<Decimal>,
    /// Theory marks below this cap the subject grade at `E1`.
    pub theory_pass_mark: Decimal,
}

impl ExamTypeRule {
    /// Returns the maximum combined marks for one subject.
    pub fn max_total(&self) -> Decimal {
        self.max_theory + self.max_practical.unwrap_or(Decimal::ZERO)
    }

    /// Returns true when the exam has a practical component.
    pub fn has_practical(&self) -> bool {
        self.max_practical.is_some()
    }
}

/// Scales configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalesConfig {
    /// Map of scale name to threshold table.
    pub scales: BTreeMap<String, GradingScale>,
}

/// Exam types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamTypesConfig {
    /// Map of exam type to its rules.
    pub exam_types: BTreeMap<ExamType, ExamTypeRule>,
}

/// The complete grading configuration.
///
/// One strategy table keyed by exam type; every grading function looks its
/// rules up here rather than branching on the exam type itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingConfig {
    /// Board metadata.
    metadata: BoardMetadata,
    /// Named threshold tables.
    scales: BTreeMap<String, GradingScale>,
    /// Rules per exam type.
    exam_types: BTreeMap<ExamType, ExamTypeRule>,
}

impl GradingConfig {
    /// Creates a GradingConfig from its component parts, validating it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a scale is malformed, an exam type is
    /// missing, a rule references an unknown scale, or mark limits are
    /// inconsistent.
    pub fn new(
        metadata: BoardMetadata,
        scales: BTreeMap<String, GradingScale>,
        exam_types: BTreeMap<ExamType, ExamTypeRule>,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            scales,
            exam_types,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the built-in configuration.
    ///
    /// - `general` (max 100): `A+` ≥85, `A` ≥75, `B` ≥60, `C` ≥45, `D` ≥33, `E1` ≥20, else `E2`.
    /// - `monthly` (max 20): `A+` ≥17, `A` ≥15, `B` ≥12, `C` ≥9, `D` ≥7, `E1` ≥4, else `E2`.
    /// - `cbse` (max 100): `A1` ≥91, `A2` ≥81, `B1` ≥71, `B2` ≥61, `C1` ≥51, `C2` ≥41,
    ///   `D` ≥33, `E1` ≥21, else `E2`.
    ///
    /// Monthly tests are theory-only out of 20 with a theory pass mark of 4;
    /// every other exam is 75 theory + 25 practical with a theory pass mark of 25.
    pub fn standard() -> Self {
        let mut scales = BTreeMap::new();
        scales.insert(
            "general".to_string(),
            scale(
                100,
                &[
                    (Grade::APlus, 85),
                    (Grade::A, 75),
                    (Grade::B, 60),
                    (Grade::C, 45),
                    (Grade::D, 33),
                    (Grade::E1, 20),
                ],
            ),
        );
        scales.insert(
            "monthly".to_string(),
            scale(
                20,
                &[
                    (Grade::APlus, 17),
                    (Grade::A, 15),
                    (Grade::B, 12),
                    (Grade::C, 9),
                    (Grade::D, 7),
                    (Grade::E1, 4),
                ],
            ),
        );
        scales.insert(
            "cbse".to_string(),
            scale(
                100,
                &[
                    (Grade::A1, 91),
                    (Grade::A2, 81),
                    (Grade::B1, 71),
                    (Grade::B2, 61),
                    (Grade::C1, 51),
                    (Grade::C2, 41),
                    (Grade::D, 33),
                    (Grade::E1, 21),
                ],
            ),
        );

        let mut exam_types = BTreeMap::new();
        exam_types.insert(
            ExamType::MonthlyTest,
            ExamTypeRule {
                subject_scale: "monthly".to_string(),
                overall_scale: "monthly".to_string(),
                max_theory: Decimal::from(20),
                max_practical: None,
                theory_pass_mark: Decimal::from(4),
            },
        );
        for exam_type in [
            ExamType::QuarterlyExam,
            ExamType::HalfMonthlyExam,
            ExamType::AnnualExam,
        ] {
            exam_types.insert(
                exam_type,
                ExamTypeRule {
                    subject_scale: "general".to_string(),
                    overall_scale: "cbse".to_string(),
                    max_theory: Decimal::from(75),
                    max_practical: Some(Decimal::from(25)),
                    theory_pass_mark: Decimal::from(25),
                },
            );
        }

        Self {
            metadata: BoardMetadata {
                code: "CBSE".to_string(),
                name: "Standard school grading".to_string(),
                version: "built-in".to_string(),
                absence_policy: AbsencePolicy::default(),
            },
            scales,
            exam_types,
        }
    }

    /// Returns a copy of this configuration with a different absence policy.
    pub fn with_absence_policy(mut self, policy: AbsencePolicy) -> Self {
        self.metadata.absence_policy = policy;
        self
    }

    /// Returns the board metadata.
    pub fn board(&self) -> &BoardMetadata {
        &self.metadata
    }

    /// Returns the configured absence policy.
    pub fn absence_policy(&self) -> AbsencePolicy {
        self.metadata.absence_policy
    }

    /// Returns all named scales.
    pub fn scales(&self) -> &BTreeMap<String, GradingScale> {
        &self.scales
    }

    /// Gets a scale by name.
    pub fn scale(&self, name: &str) -> EngineResult<&GradingScale> {
        self.scales
            .get(name)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("unknown scale '{}'", name),
            })
    }

    /// Gets the rules for an exam type.
    pub fn rule(&self, exam_type: ExamType) -> EngineResult<&ExamTypeRule> {
        self.exam_types
            .get(&exam_type)
            .ok_or_else(|| EngineError::UnknownExamType {
                value: exam_type.to_string(),
            })
    }

    /// Gets the per-subject scale for an exam type.
    pub fn subject_scale(&self, exam_type: ExamType) -> EngineResult<&GradingScale> {
        self.scale(&self.rule(exam_type)?.subject_scale)
    }

    /// Gets the overall-grade scale for an exam type.
    pub fn overall_scale(&self, exam_type: ExamType) -> EngineResult<&GradingScale> {
        self.scale(&self.rule(exam_type)?.overall_scale)
    }

    /// Checks that the configuration is internally consistent.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, scale) in &self.scales {
            scale.validate(name)?;
        }

        for exam_type in ExamType::ALL {
            let rule = self
                .exam_types
                .get(&exam_type)
                .ok_or_else(|| EngineError::InvalidConfig {
                    message: format!("exam type '{}' is not configured", exam_type),
                })?;

            let subject_scale = self.scale(&rule.subject_scale)?;
            self.scale(&rule.overall_scale)?;

            if rule.max_theory <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!("'{}': max_theory must be positive", exam_type),
                });
            }
            if rule.max_practical.is_some_and(|p| p < Decimal::ZERO) {
                return Err(EngineError::InvalidConfig {
                    message: format!("'{}': max_practical must not be negative", exam_type),
                });
            }
            if rule.theory_pass_mark < Decimal::ZERO || rule.theory_pass_mark > rule.max_theory {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "'{}': theory_pass_mark {} must be within 0-{}",
                        exam_type, rule.theory_pass_mark, rule.max_theory
                    ),
                });
            }
            if rule.max_total() != subject_scale.max_score {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "'{}': maximum marks {} do not match scale '{}' maximum {}",
                        exam_type,
                        rule.max_total(),
                        rule.subject_scale,
                        subject_scale.max_score
                    ),
                });
            }
        }

        Ok(())
    }
}

fn scale(max_score: i64, bands: &[(Grade, i64)]) -> GradingScale {
    GradingScale {
        max_score: Decimal::from(max_score),
        bands: bands
            .iter()
            .map(|&(grade, min)| GradeBand {
                grade,
                min: Decimal::from(min),
            })
            .collect(),
        floor: Grade::E2,
    }
}
