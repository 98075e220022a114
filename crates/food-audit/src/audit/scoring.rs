use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::catalog::{ItemCatalog, DEFAULT_ITEM_WEIGHT};
use super::domain::{AnswerValue, AuditAnswer};
use super::severity::{severity_from_score, SeverityLevel};

/// Data-integrity faults in a set of answers or its item metadata.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidAuditData {
    #[error("numeric question {question_id} has no maximum in the item catalog")]
    MissingMaximum { question_id: String },
    #[error("numeric question {question_id} was recorded without a value")]
    MissingNumericValue { question_id: String },
    #[error("numeric question {question_id} scored {value} outside 0..={max}")]
    NumericOutOfRange {
        question_id: String,
        value: f64,
        max: f64,
    },
    #[error("question {question_id} has unusable maximum {max}")]
    InvalidMaximum { question_id: String, max: f64 },
}

/// A percentage that is undefined when nothing was scorable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum ScorePercentage {
    Scored(f64),
    NotApplicable,
}

impl ScorePercentage {
    fn from_points(earned: f64, possible: f64) -> Self {
        if possible > 0.0 {
            Self::Scored(round_one_decimal(earned / possible * 100.0))
        } else {
            Self::NotApplicable
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Scored(value) => Some(value),
            Self::NotApplicable => None,
        }
    }

    pub fn is_applicable(self) -> bool {
        matches!(self, Self::Scored(_))
    }

    pub fn severity(self) -> Option<SeverityLevel> {
        self.value().map(severity_from_score)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScorePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scored(value) => write!(f, "{value:.1}%"),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: String,
    pub earned_points: f64,
    pub possible_points: f64,
    pub percentage: ScorePercentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_id: String,
    pub earned_points: f64,
    pub possible_points: f64,
    pub percentage: ScorePercentage,
}

/// Every score derived from one audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub category_scores: Vec<CategoryScore>,
    pub section_scores: Vec<SectionScore>,
    pub overall: ScorePercentage,
}

impl ScoreCard {
    pub fn overall_severity(&self) -> Option<SeverityLevel> {
        self.overall.severity()
    }

    pub fn category(&self, category_id: &str) -> Option<&CategoryScore> {
        self.category_scores
            .iter()
            .find(|score| score.category_id == category_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionScore> {
        self.section_scores
            .iter()
            .find(|score| score.section_id == section_id)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    earned: f64,
    possible: f64,
}

impl Tally {
    fn add(&mut self, points: Points) {
        self.earned += points.earned;
        self.possible += points.possible;
    }
}

#[derive(Debug, Clone, Copy)]
struct Points {
    earned: f64,
    possible: f64,
}

/// Score a set of answers against its item catalog.
pub fn compute_scores(
    answers: &[AuditAnswer],
    catalog: &ItemCatalog,
) -> Result<ScoreCard, InvalidAuditData> {
    let mut categories: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut sections: BTreeMap<&str, Tally> = BTreeMap::new();

    for answer in answers {
        let points = answer_points(answer, catalog)?;
        let category = categories.entry(answer.category_id.as_str()).or_default();
        let section = sections.entry(answer.section_id.as_str()).or_default();
        if let Some(points) = points {
            category.add(points);
            section.add(points);
        }
    }

    let overall = categories
        .values()
        .filter(|tally| tally.possible > 0.0)
        .fold(Tally::default(), |mut total, tally| {
            total.earned += tally.earned;
            total.possible += tally.possible;
            total
        });

    let category_scores = categories
        .into_iter()
        .map(|(category_id, tally)| CategoryScore {
            category_id: category_id.to_string(),
            earned_points: tally.earned,
            possible_points: tally.possible,
            percentage: ScorePercentage::from_points(tally.earned, tally.possible),
        })
        .collect();

    let section_scores = sections
        .into_iter()
        .map(|(section_id, tally)| SectionScore {
            section_id: section_id.to_string(),
            earned_points: tally.earned,
            possible_points: tally.possible,
            percentage: ScorePercentage::from_points(tally.earned, tally.possible),
        })
        .collect();

    Ok(ScoreCard {
        category_scores,
        section_scores,
        overall: ScorePercentage::from_points(overall.earned, overall.possible),
    })
}

/// `None` means the answer is excluded from both earned and possible.
fn answer_points(
    answer: &AuditAnswer,
    catalog: &ItemCatalog,
) -> Result<Option<Points>, InvalidAuditData> {
    match answer.value {
        AnswerValue::NotApplicable => Ok(None),
        AnswerValue::Yes => {
            let weight = item_weight(answer, catalog)?;
            Ok(Some(Points {
                earned: weight,
                possible: weight,
            }))
        }
        AnswerValue::No => {
            let weight = item_weight(answer, catalog)?;
            Ok(Some(Points {
                earned: 0.0,
                possible: weight,
            }))
        }
        AnswerValue::Numeric => {
            let max = catalog.max_points(&answer.question_id).ok_or_else(|| {
                InvalidAuditData::MissingMaximum {
                    question_id: answer.question_id.clone(),
                }
            })?;
            let max = validate_maximum(&answer.question_id, max)?;
            let value =
                answer
                    .numeric_value
                    .ok_or_else(|| InvalidAuditData::MissingNumericValue {
                        question_id: answer.question_id.clone(),
                    })?;
            if !value.is_finite() || value < 0.0 || value > max {
                return Err(InvalidAuditData::NumericOutOfRange {
                    question_id: answer.question_id.clone(),
                    value,
                    max,
                });
            }
            Ok(Some(Points {
                earned: value,
                possible: max,
            }))
        }
    }
}

fn item_weight(answer: &AuditAnswer, catalog: &ItemCatalog) -> Result<f64, InvalidAuditData> {
    match catalog.max_points(&answer.question_id) {
        Some(max) => validate_maximum(&answer.question_id, max),
        None => Ok(DEFAULT_ITEM_WEIGHT),
    }
}

fn validate_maximum(question_id: &str, max: f64) -> Result<f64, InvalidAuditData> {
    if max.is_finite() && max > 0.0 {
        Ok(max)
    } else {
        Err(InvalidAuditData::InvalidMaximum {
            question_id: question_id.to_string(),
            max,
        })
    }
}
