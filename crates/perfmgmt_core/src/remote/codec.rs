//! JSON wire mapping for employees and reviews.
//!
//! # Responsibility
//! - Encode/decode `Employee` and `PerformanceReview` as camelCase objects.
//! - Decode batches with per-element tolerance.
//!
//! # Invariants
//! - `reportsTo`, `overallRating` and `comments` are omitted when unset;
//!   a missing key (or a `null`) decodes to `None`.
//! - An unknown `role` fails the decode of that object; no default is applied.
//! - Decoding also reads the short `id` key; `employeeId`/`reviewId` win when
//!   both are present.
//! - Decoded values pass model validation before they are returned.
//! - A batch element that fails to decode is skipped and logged; a body that
//!   is not an array fails the whole batch.

use crate::model::employee::{Employee, EmployeeId, Role};
use crate::model::review::{PerformanceReview, Ratings, ReviewId};
use crate::remote::error::CodecError;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    employee_id: Option<EmployeeId>,
    /// Short key some servers send instead of `employeeId`; read only.
    #[serde(default, skip_serializing)]
    id: Option<EmployeeId>,
    name: String,
    #[serde(default)]
    hire_date: String,
    #[serde(default)]
    personnel_code: i64,
    #[serde(default = "default_active")]
    is_active: bool,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reports_to: Option<EmployeeId>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review_id: Option<ReviewId>,
    #[serde(default, skip_serializing)]
    id: Option<ReviewId>,
    employee_id: EmployeeId,
    reviewer_id: EmployeeId,
    #[serde(default)]
    review_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overall_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
    punctuality_rating: f64,
    quality_of_work_rating: f64,
    communication_rating: f64,
    teamwork_rating: f64,
    technical_skills_rating: f64,
    problem_solving_rating: f64,
    creativity_rating: f64,
    adaptability_rating: f64,
    leadership_rating: f64,
    initiative_rating: f64,
}

fn default_active() -> bool {
    true
}

impl From<&Employee> for EmployeeWire {
    fn from(value: &Employee) -> Self {
        Self {
            employee_id: Some(value.employee_id),
            id: None,
            name: value.name.clone(),
            hire_date: value.hire_date.clone(),
            personnel_code: value.personnel_code,
            is_active: value.is_active,
            role: value.role.as_str().to_string(),
            reports_to: value.reports_to,
        }
    }
}

impl TryFrom<EmployeeWire> for Employee {
    type Error = CodecError;

    fn try_from(value: EmployeeWire) -> Result<Self, Self::Error> {
        let employee_id = value
            .employee_id
            .or(value.id)
            .ok_or(CodecError::MissingId("employeeId"))?;
        let employee = Employee {
            employee_id,
            personnel_code: value.personnel_code,
            name: value.name,
            hire_date: value.hire_date,
            role: value.role.parse::<Role>()?,
            is_active: value.is_active,
            reports_to: value.reports_to,
        };
        employee.validate()?;
        Ok(employee)
    }
}

impl From<&PerformanceReview> for ReviewWire {
    fn from(value: &PerformanceReview) -> Self {
        let r = &value.ratings;
        Self {
            review_id: Some(value.review_id).filter(|id| *id > 0),
            id: None,
            employee_id: value.employee_id,
            reviewer_id: value.reviewer_id,
            review_date: value.review_date.clone(),
            overall_rating: value.overall_rating,
            comments: value.comments.clone(),
            punctuality_rating: r.punctuality,
            quality_of_work_rating: r.quality_of_work,
            communication_rating: r.communication,
            teamwork_rating: r.teamwork,
            technical_skills_rating: r.technical_skills,
            problem_solving_rating: r.problem_solving,
            creativity_rating: r.creativity,
            adaptability_rating: r.adaptability,
            leadership_rating: r.leadership,
            initiative_rating: r.initiative,
        }
    }
}

impl TryFrom<ReviewWire> for PerformanceReview {
    type Error = CodecError;

    fn try_from(value: ReviewWire) -> Result<Self, Self::Error> {
        let review = PerformanceReview {
            review_id: value.review_id.or(value.id).unwrap_or(0),
            employee_id: value.employee_id,
            reviewer_id: value.reviewer_id,
            review_date: value.review_date,
            overall_rating: value.overall_rating,
            ratings: Ratings {
                punctuality: value.punctuality_rating,
                quality_of_work: value.quality_of_work_rating,
                communication: value.communication_rating,
                teamwork: value.teamwork_rating,
                technical_skills: value.technical_skills_rating,
                problem_solving: value.problem_solving_rating,
                creativity: value.creativity_rating,
                adaptability: value.adaptability_rating,
                leadership: value.leadership_rating,
                initiative: value.initiative_rating,
            },
            comments: value.comments,
        };
        review.validate()?;
        Ok(review)
    }
}

/// Encodes one employee as a JSON object.
pub fn encode_employee(employee: &Employee) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(EmployeeWire::from(employee))?)
}

/// Decodes one employee object.
pub fn decode_employee(value: &Value) -> Result<Employee, CodecError> {
    let wire = EmployeeWire::deserialize(value)?;
    Employee::try_from(wire)
}

/// Decodes an employee array, skipping elements that fail to decode.
pub fn decode_employee_list(value: &Value) -> Result<Vec<Employee>, CodecError> {
    decode_list(value, "employee", decode_employee)
}

/// Encodes one review as a JSON object. Unassigned ids are omitted.
pub fn encode_review(review: &PerformanceReview) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(ReviewWire::from(review))?)
}

/// Decodes one review object.
pub fn decode_review(value: &Value) -> Result<PerformanceReview, CodecError> {
    let wire = ReviewWire::deserialize(value)?;
    PerformanceReview::try_from(wire)
}

/// Decodes a review array, skipping elements that fail to decode.
pub fn decode_review_list(value: &Value) -> Result<Vec<PerformanceReview>, CodecError> {
    decode_list(value, "review", decode_review)
}

/// Reads a server-assigned id from a create response, trying `key` then `id`.
pub fn decode_created_id(value: &Value, key: &'static str) -> Result<i64, CodecError> {
    [key, "id"]
        .iter()
        .filter_map(|candidate| value.get(candidate).and_then(Value::as_i64))
        .find(|id| *id > 0)
        .ok_or(CodecError::MissingId(key))
}

fn decode_list<T>(
    value: &Value,
    kind: &'static str,
    decode: impl Fn(&Value) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let items = value.as_array().ok_or(CodecError::NotAnArray)?;
    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match decode(item) {
            Ok(value) => decoded.push(value),
            Err(err) => warn!(
                "event=codec_decode module=remote status=skipped kind={kind} index={index} error={err}"
            ),
        }
    }
    Ok(decoded)
}
