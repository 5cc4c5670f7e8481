//! Performance review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete APIs over `performance_reviews`.
//! - Bind the ten rating dimensions by column name in both directions.
//!
//! # Invariants
//! - `review_id` is assigned by the store; the value on insert input is ignored.
//! - Ratings outside `[1, 10]` are rejected before SQL and by CHECK constraints.
//! - History queries are ordered newest first: `review_date DESC, review_id DESC`.
//! - Relationship queries fail with `NotFound` when the anchor employee is
//!   missing, and return an empty list when it simply has no reviews.

use crate::db::ensure_connection_ready;
use crate::model::employee::EmployeeId;
use crate::model::review::{PerformanceReview, Ratings, ReviewId};
use crate::model::validation::ensure_positive_id;
use crate::repo::employee_repo::{employee_exists, ensure_reference_exists};
use crate::repo::error::{Entity, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const REVIEW_SELECT_SQL: &str = "SELECT
    review_id,
    employee_id,
    reviewer_id,
    review_date,
    overall_rating,
    comments,
    punctuality_rating,
    quality_of_work_rating,
    communication_rating,
    teamwork_rating,
    technical_skills_rating,
    problem_solving_rating,
    creativity_rating,
    adaptability_rating,
    leadership_rating,
    initiative_rating
FROM performance_reviews";

const REVIEW_HISTORY_ORDER: &str = "ORDER BY review_date DESC, review_id DESC";

const REVIEW_COLUMNS: &[&str] = &[
    "review_id",
    "employee_id",
    "reviewer_id",
    "review_date",
    "overall_rating",
    "comments",
    "punctuality_rating",
    "quality_of_work_rating",
    "communication_rating",
    "teamwork_rating",
    "technical_skills_rating",
    "problem_solving_rating",
    "creativity_rating",
    "adaptability_rating",
    "leadership_rating",
    "initiative_rating",
];

/// Repository interface for performance review persistence.
pub trait ReviewRepository {
    /// Inserts one review and returns its store-assigned id.
    fn add_performance_review(&self, review: &PerformanceReview) -> RepoResult<ReviewId>;
    /// Loads one review by id.
    fn get_performance_review(&self, id: ReviewId) -> RepoResult<Option<PerformanceReview>>;
    /// Lists the full review history of one employee, newest first.
    fn get_performance_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> RepoResult<Vec<PerformanceReview>>;
    /// Loads the most recent review of one employee.
    fn get_latest_review_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> RepoResult<Option<PerformanceReview>>;
    /// Lists every review authored by one reviewer, newest first.
    fn get_reviews_by_reviewer(&self, reviewer_id: EmployeeId)
        -> RepoResult<Vec<PerformanceReview>>;
    /// Overwrites all mutable columns of an existing review.
    fn update_performance_review(&self, review: &PerformanceReview) -> RepoResult<()>;
    /// Removes one review row.
    fn delete_performance_review(&self, id: ReviewId) -> RepoResult<()>;
}

/// SQLite-backed performance review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "performance_reviews", REVIEW_COLUMNS)?;
        Ok(Self { conn })
    }

    fn list_where(&self, column: &str, id: EmployeeId) -> RepoResult<Vec<PerformanceReview>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE {column} = ?1 {REVIEW_HISTORY_ORDER};"
        ))?;
        let mut rows = stmt.query([id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }
        Ok(reviews)
    }

    fn ensure_employee_found(&self, id: EmployeeId) -> RepoResult<()> {
        if employee_exists(self.conn, id)? {
            Ok(())
        } else {
            Err(RepoError::NotFound {
                entity: Entity::Employee,
                id,
            })
        }
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn add_performance_review(&self, review: &PerformanceReview) -> RepoResult<ReviewId> {
        review.validate()?;
        ensure_reference_exists(self.conn, "employee_id", review.employee_id)?;
        ensure_reference_exists(self.conn, "reviewer_id", review.reviewer_id)?;

        let r = &review.ratings;
        self.conn.execute(
            "INSERT INTO performance_reviews (
                employee_id,
                reviewer_id,
                review_date,
                overall_rating,
                comments,
                punctuality_rating,
                quality_of_work_rating,
                communication_rating,
                teamwork_rating,
                technical_skills_rating,
                problem_solving_rating,
                creativity_rating,
                adaptability_rating,
                leadership_rating,
                initiative_rating
            ) VALUES (
                ?1, ?2, COALESCE(NULLIF(?3, ''), CURRENT_DATE), ?4, ?5,
                ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15
            );",
            params![
                review.employee_id,
                review.reviewer_id,
                review.review_date.as_str(),
                review.overall_rating,
                review.comments.as_deref(),
                r.punctuality,
                r.quality_of_work,
                r.communication,
                r.teamwork,
                r.technical_skills,
                r.problem_solving,
                r.creativity,
                r.adaptability,
                r.leadership,
                r.initiative,
            ],
        )?;

        let review_id = self.conn.last_insert_rowid();
        debug!(
            "event=review_add module=repo status=ok review_id={} employee_id={}",
            review_id, review.employee_id
        );
        Ok(review_id)
    }

    fn get_performance_review(&self, id: ReviewId) -> RepoResult<Option<PerformanceReview>> {
        ensure_positive_id("review_id", id)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE review_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }

        Ok(None)
    }

    fn get_performance_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> RepoResult<Vec<PerformanceReview>> {
        ensure_positive_id("employee_id", employee_id)?;
        self.ensure_employee_found(employee_id)?;
        self.list_where("employee_id", employee_id)
    }

    fn get_latest_review_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> RepoResult<Option<PerformanceReview>> {
        ensure_positive_id("employee_id", employee_id)?;
        self.ensure_employee_found(employee_id)?;

        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE employee_id = ?1 {REVIEW_HISTORY_ORDER} LIMIT 1;"
        ))?;
        let mut rows = stmt.query([employee_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }

        Ok(None)
    }

    fn get_reviews_by_reviewer(
        &self,
        reviewer_id: EmployeeId,
    ) -> RepoResult<Vec<PerformanceReview>> {
        ensure_positive_id("reviewer_id", reviewer_id)?;
        self.ensure_employee_found(reviewer_id)?;
        self.list_where("reviewer_id", reviewer_id)
    }

    fn update_performance_review(&self, review: &PerformanceReview) -> RepoResult<()> {
        ensure_positive_id("review_id", review.review_id)?;
        review.validate()?;
        ensure_reference_exists(self.conn, "employee_id", review.employee_id)?;
        ensure_reference_exists(self.conn, "reviewer_id", review.reviewer_id)?;

        let r = &review.ratings;
        let changed = self.conn.execute(
            "UPDATE performance_reviews
             SET
                employee_id = ?2,
                reviewer_id = ?3,
                review_date = COALESCE(NULLIF(?4, ''), review_date),
                overall_rating = ?5,
                comments = ?6,
                punctuality_rating = ?7,
                quality_of_work_rating = ?8,
                communication_rating = ?9,
                teamwork_rating = ?10,
                technical_skills_rating = ?11,
                problem_solving_rating = ?12,
                creativity_rating = ?13,
                adaptability_rating = ?14,
                leadership_rating = ?15,
                initiative_rating = ?16
             WHERE review_id = ?1;",
            params![
                review.review_id,
                review.employee_id,
                review.reviewer_id,
                review.review_date.as_str(),
                review.overall_rating,
                review.comments.as_deref(),
                r.punctuality,
                r.quality_of_work,
                r.communication,
                r.teamwork,
                r.technical_skills,
                r.problem_solving,
                r.creativity,
                r.adaptability,
                r.leadership,
                r.initiative,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Review,
                id: review.review_id,
            });
        }

        debug!(
            "event=review_update module=repo status=ok review_id={}",
            review.review_id
        );
        Ok(())
    }

    fn delete_performance_review(&self, id: ReviewId) -> RepoResult<()> {
        ensure_positive_id("review_id", id)?;

        let changed = self
            .conn
            .execute("DELETE FROM performance_reviews WHERE review_id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Review,
                id,
            });
        }

        debug!("event=review_delete module=repo status=ok review_id={id}");
        Ok(())
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<PerformanceReview> {
    let ratings = Ratings {
        punctuality: row.get("punctuality_rating")?,
        quality_of_work: row.get("quality_of_work_rating")?,
        communication: row.get("communication_rating")?,
        teamwork: row.get("teamwork_rating")?,
        technical_skills: row.get("technical_skills_rating")?,
        problem_solving: row.get("problem_solving_rating")?,
        creativity: row.get("creativity_rating")?,
        adaptability: row.get("adaptability_rating")?,
        leadership: row.get("leadership_rating")?,
        initiative: row.get("initiative_rating")?,
    };
    ratings.validate().map_err(|err| {
        RepoError::InvalidData(format!("performance_reviews row holds {err}"))
    })?;

    Ok(PerformanceReview {
        review_id: row.get("review_id")?,
        employee_id: row.get("employee_id")?,
        reviewer_id: row.get("reviewer_id")?,
        review_date: row.get("review_date")?,
        overall_rating: row.get("overall_rating")?,
        ratings,
        comments: row.get("comments")?,
    })
}
