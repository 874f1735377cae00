/// Storage layer behaviour against an in-memory SQLite database.

mod common;

use common::{memory_store, seeded_store, single_connection_store};
use gradebook::store::{
    database, Entity, GradebookStore, Project, ProjectGrade, ProjectSummary, StoreError, Student,
    StudentGrade,
};
use std::time::Duration;

#[tokio::test]
async fn created_student_is_found_by_github() {
    let store = memory_store().await;

    let created = store.create_student("Grace", "Hopper", "ghopper").await.unwrap();
    let found = store.get_student_by_github("ghopper").await.unwrap();

    assert_eq!(created, found);
    assert_eq!(
        found,
        Student {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            github: "ghopper".into(),
        }
    );
}

#[tokio::test]
async fn unknown_github_is_not_found() {
    let store = seeded_store().await;

    let err = store.get_student_by_github("alice99").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { entity: Entity::Student, ref key } if key == "alice99"
    ));
}

#[tokio::test]
async fn duplicate_github_is_rejected_and_first_row_kept() {
    let store = seeded_store().await;

    let err = store.create_student("Augusta", "King", "ada").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateKey { entity: Entity::Student, ref key } if key == "ada"
    ));

    let kept = store.get_student_by_github("ada").await.unwrap();
    assert_eq!(kept.first_name, "Ada");
    assert_eq!(kept.last_name, "Lovelace");
    assert_eq!(store.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_project_title_is_rejected() {
    let store = seeded_store().await;

    let err = store.create_project("Tracker", "Again", 10).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateKey { entity: Entity::Project, .. }
    ));

    let kept = store.get_project_by_title("Tracker").await.unwrap();
    assert_eq!(kept.max_grade, 100);
}

#[tokio::test]
async fn project_round_trips_through_storage() {
    let store = memory_store().await;

    store
        .create_project("Tracker", "Build a tracker", 100)
        .await
        .unwrap();

    assert_eq!(
        store.get_project_by_title("Tracker").await.unwrap(),
        Project {
            title: "Tracker".into(),
            description: "Build a tracker".into(),
            max_grade: 100,
        }
    );

    let err = store.get_project_by_title("Nope").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: Entity::Project, .. }));
}

#[tokio::test]
async fn listings_are_ordered_by_key() {
    let store = memory_store().await;
    store.create_student("Zed", "Z", "zed").await.unwrap();
    store.create_student("Amy", "A", "amy").await.unwrap();
    store.create_project("Blog", "Write a blog", 50).await.unwrap();
    store.create_project("Adder", "Add numbers", 10).await.unwrap();

    let githubs: Vec<_> = store
        .list_students()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.github)
        .collect();
    assert_eq!(githubs, ["amy", "zed"]);

    assert_eq!(
        store.list_projects().await.unwrap(),
        vec![
            ProjectSummary { title: "Adder".into() },
            ProjectSummary { title: "Blog".into() },
        ]
    );
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let store = memory_store().await;
    assert!(store.list_students().await.unwrap().is_empty());
    assert!(store.list_projects().await.unwrap().is_empty());
    assert!(store.list_grades_for_student("ada").await.unwrap().is_empty());
    assert!(store.list_grades_for_project("Tracker").await.unwrap().is_empty());
}

#[tokio::test]
async fn assigned_grade_is_read_back() {
    let store = seeded_store().await;

    store.assign_grade("ada", "Tracker", 88).await.unwrap();

    assert_eq!(store.get_grade("ada", "Tracker").await.unwrap(), 88);
}

#[tokio::test]
async fn missing_grade_is_not_found() {
    let store = seeded_store().await;

    let err = store.get_grade("ada", "Tracker").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: Entity::Grade, .. }));
}

#[tokio::test]
async fn regrading_replaces_instead_of_duplicating() {
    let store = seeded_store().await;

    store.assign_grade("ada", "Tracker", 60).await.unwrap();
    store.assign_grade("ada", "Tracker", 95).await.unwrap();

    assert_eq!(store.get_grade("ada", "Tracker").await.unwrap(), 95);
    assert_eq!(
        store.list_grades_for_student("ada").await.unwrap(),
        vec![StudentGrade {
            project_title: "Tracker".into(),
            grade: 95,
        }]
    );
}

#[tokio::test]
async fn grade_listings_match_what_was_assigned() {
    let store = seeded_store().await;
    store.create_student("Alan", "Turing", "aturing").await.unwrap();
    store.create_project("Blog", "Write a blog", 50).await.unwrap();

    store.assign_grade("ada", "Tracker", 90).await.unwrap();
    store.assign_grade("ada", "Blog", 45).await.unwrap();
    store.assign_grade("aturing", "Tracker", 70).await.unwrap();

    let mut for_ada = store.list_grades_for_student("ada").await.unwrap();
    for_ada.sort_by(|a, b| a.project_title.cmp(&b.project_title));
    assert_eq!(
        for_ada,
        vec![
            StudentGrade { project_title: "Blog".into(), grade: 45 },
            StudentGrade { project_title: "Tracker".into(), grade: 90 },
        ]
    );

    let mut for_tracker = store.list_grades_for_project("Tracker").await.unwrap();
    for_tracker.sort_by(|a, b| a.student_github.cmp(&b.student_github));
    assert_eq!(
        for_tracker,
        vec![
            ProjectGrade { student_github: "ada".into(), grade: 90 },
            ProjectGrade { student_github: "aturing".into(), grade: 70 },
        ]
    );
}

#[tokio::test]
async fn grade_for_unknown_student_or_project_is_rejected() {
    let store = seeded_store().await;

    let err = store.assign_grade("nobody", "Tracker", 50).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidReference { entity: Entity::Student, ref key } if key == "nobody"
    ));

    let err = store.assign_grade("ada", "Nope", 50).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidReference { entity: Entity::Project, ref key } if key == "Nope"
    ));

    assert!(store.list_grades_for_student("ada").await.unwrap().is_empty());
    assert!(store.list_grades_for_student("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn grade_outside_project_bounds_is_rejected() {
    let store = seeded_store().await;

    for grade in [-1, 101] {
        let err = store.assign_grade("ada", "Tracker", grade).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::GradeOutOfRange { max_grade: 100, .. }
        ));
    }

    store.assign_grade("ada", "Tracker", 0).await.unwrap();
    store.assign_grade("ada", "Tracker", 100).await.unwrap();
    assert_eq!(store.get_grade("ada", "Tracker").await.unwrap(), 100);
}

#[tokio::test]
async fn slow_statement_times_out_as_its_own_kind() {
    let pool = database::connect_in_memory().await.unwrap();
    let store = GradebookStore::new(pool.clone(), Duration::from_millis(50));

    // The in-memory pool has a single connection; holding it starves the store
    let _held = pool.acquire().await.unwrap();

    let err = store.list_students().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Timeout { operation: "list_students", .. }
    ));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn schema_init_is_idempotent() {
    let store = seeded_store().await;

    database::init_schema(store.pool()).await.unwrap();

    assert_eq!(store.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn exhausted_pool_is_a_timeout_not_a_fault() {
    let (store, _dir) = single_connection_store().await;

    let _held = store.pool().acquire().await.unwrap();

    let err = store.list_students().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Timeout { operation: "list_students", after } if after == Duration::from_millis(50)
    ));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn blank_keys_are_rejected_before_insert() {
    let store = memory_store().await;

    let err = store.create_student("Ada", "Lovelace", "  ").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidKey { entity: Entity::Student, field: "github" }
    ));

    let err = store.create_project("", "desc", 10).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidKey { entity: Entity::Project, field: "title" }
    ));

    assert!(store.list_students().await.unwrap().is_empty());
    assert!(store.list_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn negative_max_grade_is_rejected() {
    let store = memory_store().await;

    let err = store.create_project("Neg", "desc", -5).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidMaxGrade { max_grade: -5, .. }
    ));
    assert!(store.list_projects().await.unwrap().is_empty());

    // a zero bound still admits a grade of zero
    store.create_project("Zero", "desc", 0).await.unwrap();
    store.create_student("Ada", "Lovelace", "ada").await.unwrap();
    store.assign_grade("ada", "Zero", 0).await.unwrap();
    assert_eq!(store.get_grade("ada", "Zero").await.unwrap(), 0);
}
