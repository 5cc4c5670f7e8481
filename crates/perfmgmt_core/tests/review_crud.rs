use perfmgmt_core::{
    Employee, EmployeeRepository, Entity, LocalStore, ModelValidationError, PerformanceReview,
    Ratings, RepoError, ReviewRepository, Role,
};

fn setup() -> LocalStore {
    let store = LocalStore::open_in_memory().unwrap();
    {
        let employees = store.employees().unwrap();
        employees
            .add_employee(&Employee::new(1, "Reviewer").with_role(Role::Manager))
            .unwrap();
        employees
            .add_employee(&Employee::new(2, "Subject").reporting_to(1))
            .unwrap();
        employees
            .add_employee(&Employee::new(3, "Newcomer").reporting_to(1))
            .unwrap();
    }
    store
}

fn review(date: &str) -> PerformanceReview {
    PerformanceReview::new(2, 1, Ratings::uniform(6.0)).on(date)
}

#[test]
fn add_then_get_roundtrips_every_field() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let mut ratings = Ratings::uniform(7.5);
    ratings.punctuality = 1.0;
    ratings.initiative = 10.0;
    let mut original = PerformanceReview::new(2, 1, ratings)
        .on("2024-05-01")
        .with_overall_rating(8.25)
        .with_comments("Consistent delivery");

    let id = repo.add_performance_review(&original).unwrap();
    assert!(id > 0);
    original.review_id = id;

    assert_eq!(repo.get_performance_review(id).unwrap(), Some(original));
}

#[test]
fn optional_fields_stay_absent() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo.add_performance_review(&review("2024-01-10")).unwrap();
    let loaded = repo.get_performance_review(id).unwrap().unwrap();
    assert_eq!(loaded.overall_rating, None);
    assert_eq!(loaded.comments, None);
}

#[test]
fn empty_review_date_uses_store_default() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo
        .add_performance_review(&PerformanceReview::new(2, 1, Ratings::uniform(5.0)))
        .unwrap();
    let loaded = repo.get_performance_review(id).unwrap().unwrap();
    let today: String = store
        .connection()
        .query_row("SELECT CURRENT_DATE;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(loaded.review_date, today);
}

#[test]
fn boundary_ratings_succeed_and_values_just_outside_fail() {
    let store = setup();
    let repo = store.reviews().unwrap();

    for value in [1.0, 10.0] {
        repo.add_performance_review(&PerformanceReview::new(2, 1, Ratings::uniform(value)))
            .unwrap();
    }

    for value in [0.5, 10.5] {
        let mut ratings = Ratings::uniform(5.0);
        ratings.teamwork = value;
        let err = repo
            .add_performance_review(&PerformanceReview::new(2, 1, ratings))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ModelValidationError::RatingOutOfRange {
                field: "teamwork_rating",
                ..
            })
        ));
    }

    assert_eq!(repo.get_performance_for_employee(2).unwrap().len(), 2);
}

#[test]
fn rating_check_constraint_backs_up_validation() {
    let store = setup();
    let result = store.connection().execute(
        "INSERT INTO performance_reviews (
            employee_id, reviewer_id, punctuality_rating, quality_of_work_rating,
            communication_rating, teamwork_rating, technical_skills_rating,
            problem_solving_rating, creativity_rating, adaptability_rating,
            leadership_rating, initiative_rating
        ) VALUES (2, 1, 0.5, 5, 5, 5, 5, 5, 5, 5, 5, 5);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn review_references_must_exist() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let err = repo
        .add_performance_review(&PerformanceReview::new(77, 1, Ratings::uniform(5.0)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            field: "employee_id",
            id: 77
        }
    ));

    let err = repo
        .add_performance_review(&PerformanceReview::new(2, 88, Ratings::uniform(5.0)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            field: "reviewer_id",
            id: 88
        }
    ));
}

#[test]
fn self_review_is_allowed() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo
        .add_performance_review(&PerformanceReview::new(1, 1, Ratings::uniform(9.0)))
        .unwrap();
    let loaded = repo.get_performance_review(id).unwrap().unwrap();
    assert_eq!(loaded.employee_id, loaded.reviewer_id);
}

#[test]
fn history_for_employee_is_newest_first() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let older = repo.add_performance_review(&review("2023-06-30")).unwrap();
    let newest = repo.add_performance_review(&review("2024-06-30")).unwrap();
    let same_day = repo.add_performance_review(&review("2023-06-30")).unwrap();

    let history: Vec<i64> = repo
        .get_performance_for_employee(2)
        .unwrap()
        .into_iter()
        .map(|review| review.review_id)
        .collect();
    assert_eq!(history, vec![newest, same_day, older]);

    let latest = repo.get_latest_review_for_employee(2).unwrap().unwrap();
    assert_eq!(latest.review_id, newest);
}

#[test]
fn employee_without_reviews_is_empty_not_missing() {
    let store = setup();
    let repo = store.reviews().unwrap();

    assert!(repo.get_performance_for_employee(3).unwrap().is_empty());
    assert_eq!(repo.get_latest_review_for_employee(3).unwrap(), None);

    let err = repo.get_performance_for_employee(404).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: Entity::Employee,
            id: 404
        }
    ));
    assert!(repo.get_latest_review_for_employee(404).unwrap_err().is_not_found());
}

#[test]
fn reviews_by_reviewer_lists_authored_reviews() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let first = repo.add_performance_review(&review("2024-02-01")).unwrap();
    let second = repo
        .add_performance_review(&PerformanceReview::new(3, 1, Ratings::uniform(4.0)).on("2024-03-01"))
        .unwrap();
    repo.add_performance_review(&PerformanceReview::new(1, 2, Ratings::uniform(8.0)).on("2024-04-01"))
        .unwrap();

    let authored: Vec<i64> = repo
        .get_reviews_by_reviewer(1)
        .unwrap()
        .into_iter()
        .map(|review| review.review_id)
        .collect();
    assert_eq!(authored, vec![second, first]);

    assert!(repo.get_reviews_by_reviewer(3).unwrap().is_empty());
    assert!(repo.get_reviews_by_reviewer(500).unwrap_err().is_not_found());
}

#[test]
fn get_missing_review_is_none() {
    let store = setup();
    let repo = store.reviews().unwrap();

    assert_eq!(repo.get_performance_review(12345).unwrap(), None);
    assert!(matches!(
        repo.get_performance_review(0).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn update_overwrites_review_and_keeps_date_when_blank() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo.add_performance_review(&review("2024-05-01")).unwrap();
    let mut changed = repo.get_performance_review(id).unwrap().unwrap();
    changed.ratings.communication = 9.0;
    changed.overall_rating = Some(7.0);
    changed.comments = Some("Revised after calibration".to_string());
    changed.review_date = String::new();
    repo.update_performance_review(&changed).unwrap();

    let loaded = repo.get_performance_review(id).unwrap().unwrap();
    assert_eq!(loaded.review_date, "2024-05-01");
    assert_eq!(loaded.ratings.communication, 9.0);
    assert_eq!(loaded.overall_rating, Some(7.0));
    assert_eq!(loaded.comments.as_deref(), Some("Revised after calibration"));
}

#[test]
fn update_rejects_out_of_range_and_missing_rows() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo.add_performance_review(&review("2024-05-01")).unwrap();
    let mut invalid = repo.get_performance_review(id).unwrap().unwrap();
    invalid.ratings.creativity = 0.0;
    assert!(matches!(
        repo.update_performance_review(&invalid).unwrap_err(),
        RepoError::Validation(_)
    ));

    let mut missing = review("2024-05-01");
    missing.review_id = 999;
    assert!(matches!(
        repo.update_performance_review(&missing).unwrap_err(),
        RepoError::NotFound {
            entity: Entity::Review,
            id: 999
        }
    ));

    let unsaved = review("2024-05-01");
    assert!(matches!(
        repo.update_performance_review(&unsaved).unwrap_err(),
        RepoError::Validation(ModelValidationError::NonPositiveId { field: "review_id", .. })
    ));
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let store = setup();
    let repo = store.reviews().unwrap();

    let id = repo.add_performance_review(&review("2024-05-01")).unwrap();
    repo.delete_performance_review(id).unwrap();
    assert_eq!(repo.get_performance_review(id).unwrap(), None);

    assert!(repo.delete_performance_review(id).unwrap_err().is_not_found());
}

#[test]
fn deactivated_employee_keeps_review_history() {
    let store = setup();
    let reviews = store.reviews().unwrap();
    let employees = store.employees().unwrap();

    reviews.add_performance_review(&review("2024-05-01")).unwrap();
    employees.deactivate_employee(2).unwrap();

    assert_eq!(reviews.get_performance_for_employee(2).unwrap().len(), 1);
}
