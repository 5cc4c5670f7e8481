//! Performance review domain model.
//!
//! # Responsibility
//! - Define the review record and its ten rating dimensions.
//! - Validate rating ranges and review dates before any I/O.
//!
//! # Invariants
//! - Every dimension rating lies in the closed range `[1, 10]`.
//! - `overall_rating` is stored as supplied and never recomputed.
//! - An empty `review_date` means "let the store assign the current date".

use crate::model::employee::EmployeeId;
use crate::model::validation::{ensure_positive_id, ModelValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier of one review row.
pub type ReviewId = i64;

/// Lowest accepted dimension rating.
pub const MIN_RATING: f64 = 1.0;
/// Highest accepted dimension rating.
pub const MAX_RATING: f64 = 10.0;

static REVIEW_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid review date regex"));

/// Per-dimension ratings of one review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratings {
    pub punctuality: f64,
    pub quality_of_work: f64,
    pub communication: f64,
    pub teamwork: f64,
    pub technical_skills: f64,
    pub problem_solving: f64,
    pub creativity: f64,
    pub adaptability: f64,
    pub leadership: f64,
    pub initiative: f64,
}

impl Ratings {
    /// Sets every dimension to the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            punctuality: value,
            quality_of_work: value,
            communication: value,
            teamwork: value,
            technical_skills: value,
            problem_solving: value,
            creativity: value,
            adaptability: value,
            leadership: value,
            initiative: value,
        }
    }

    /// Returns `(column name, value)` pairs in storage column order.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("punctuality_rating", self.punctuality),
            ("quality_of_work_rating", self.quality_of_work),
            ("communication_rating", self.communication),
            ("teamwork_rating", self.teamwork),
            ("technical_skills_rating", self.technical_skills),
            ("problem_solving_rating", self.problem_solving),
            ("creativity_rating", self.creativity),
            ("adaptability_rating", self.adaptability),
            ("leadership_rating", self.leadership),
            ("initiative_rating", self.initiative),
        ]
    }

    /// Arithmetic mean of the ten dimensions.
    pub fn average(&self) -> f64 {
        let entries = self.entries();
        entries.iter().map(|(_, value)| value).sum::<f64>() / entries.len() as f64
    }

    /// Rejects NaN and values outside `[MIN_RATING, MAX_RATING]`.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        for (field, value) in self.entries() {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(ModelValidationError::RatingOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Canonical performance review record.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReview {
    /// Store-assigned id. Ignored on insert.
    pub review_id: ReviewId,
    /// Reviewed employee.
    pub employee_id: EmployeeId,
    /// Authoring employee. May equal `employee_id`.
    pub reviewer_id: EmployeeId,
    /// `YYYY-MM-DD` prefixed text, or empty to use the store default.
    pub review_date: String,
    pub overall_rating: Option<f64>,
    pub ratings: Ratings,
    pub comments: Option<String>,
}

impl PerformanceReview {
    /// Creates an unsaved review with the given ratings and no optional fields.
    pub fn new(employee_id: EmployeeId, reviewer_id: EmployeeId, ratings: Ratings) -> Self {
        Self {
            review_id: 0,
            employee_id,
            reviewer_id,
            review_date: String::new(),
            overall_rating: None,
            ratings,
            comments: None,
        }
    }

    /// Builder-style review date setter.
    pub fn on(mut self, review_date: impl Into<String>) -> Self {
        self.review_date = review_date.into();
        self
    }

    /// Builder-style comments setter.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Builder-style overall rating setter.
    pub fn with_overall_rating(mut self, overall_rating: f64) -> Self {
        self.overall_rating = Some(overall_rating);
        self
    }

    /// Mean of the dimension ratings, independent of `overall_rating`.
    pub fn average_rating(&self) -> f64 {
        self.ratings.average()
    }

    /// Checks invariants required before persistence or publishing.
    ///
    /// `review_id` is not checked here; insert paths ignore it and update
    /// paths validate it separately.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_positive_id("employee_id", self.employee_id)?;
        ensure_positive_id("reviewer_id", self.reviewer_id)?;
        if !self.review_date.is_empty() && !REVIEW_DATE_RE.is_match(&self.review_date) {
            return Err(ModelValidationError::InvalidDate {
                field: "review_date",
                value: self.review_date.clone(),
            });
        }
        if let Some(overall) = self.overall_rating {
            if overall.is_nan() {
                return Err(ModelValidationError::RatingOutOfRange {
                    field: "overall_rating",
                    value: overall,
                });
            }
        }
        self.ratings.validate()
    }
}
