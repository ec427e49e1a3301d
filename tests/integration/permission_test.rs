//! Authorization behavior across the services: acting roles, reviewer
//! assignment, department boundaries, and the review queues.

use coursevault_core::types::{DepartmentId, PrincipalId};
use coursevault_core::ErrorKind;
use coursevault_entity::approval::ApprovalAction;
use coursevault_entity::principal::{Principal, Role};
use coursevault_service::course_file::CreateCourseFileRequest;

use super::helpers::TestApp;

#[tokio::test]
async fn teachers_cannot_review_their_own_files() {
    let app = TestApp::new().await;
    let cf = app.submitted_course_file().await;

    let err = app
        .approvals
        .transition(&app.teacher, cf.id, ApprovalAction::Forward, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn unassigned_subject_head_is_rejected() {
    let app = TestApp::new().await;
    let cf = app.submitted_course_file().await;

    let unassigned = Principal::new(PrincipalId::new(), "Kiran Shah", Role::SubjectHead)
        .in_department(app.department_id);
    let err = app
        .approvals
        .transition(&unassigned, cf.id, ApprovalAction::Forward, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn hod_from_another_department_is_rejected() {
    let app = TestApp::new().await;
    let cf = app.under_hod_review().await;

    let foreign = Principal::new(PrincipalId::new(), "Vikram Joshi", Role::Hod)
        .in_department(DepartmentId::new());
    let err = app
        .approvals
        .transition(&foreign, cf.id, ApprovalAction::Approve, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn admin_wildcard_does_not_bypass_assignment() {
    let app = TestApp::new().await;
    let cf = app.submitted_course_file().await;

    let admin = Principal::new(PrincipalId::new(), "Root", Role::Admin);
    let err = app
        .approvals
        .transition(&admin, cf.id, ApprovalAction::Forward, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn acting_role_switch_enables_review() {
    let app = TestApp::new().await;
    let cf = app.submitted_course_file().await;

    // A teacher who also serves as Subject Head for this course.
    let dual = Principal::new(PrincipalId::new(), "Farah Ali", Role::Teacher)
        .with_alternate_role(Role::SubjectHead)
        .in_department(app.department_id)
        .with_assigned_courses(vec![app.course_id]);

    // Acting as a teacher the forward is denied.
    let err = app
        .approvals
        .transition(&dual, cf.id, ApprovalAction::Forward, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    // After switching, the same principal may forward.
    let as_reviewer = dual.acting_as(Role::SubjectHead).unwrap();
    app.approvals
        .transition(&as_reviewer, cf.id, ApprovalAction::Forward, None)
        .await
        .unwrap();

    // Switching to a role outside the allowed set fails.
    assert!(dual.acting_as(Role::Hod).is_err());
}

#[tokio::test]
async fn only_teachers_create_course_files() {
    let app = TestApp::new().await;
    let req = CreateCourseFileRequest {
        course_id: app.course_id,
        academic_year: None,
        section: "A".to_string(),
    };

    let err = app
        .course_files
        .create(&app.subject_head, req.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = app.course_files.create(&app.hod, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn review_queues_are_scoped_to_the_reviewer() {
    let app = TestApp::new().await;
    let submitted = app.submitted_course_file().await;

    let queue = app
        .course_files
        .pending_for_subject_head(&app.subject_head)
        .await
        .unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, submitted.id);

    // An unassigned Subject Head sees an empty queue.
    let unassigned = Principal::new(PrincipalId::new(), "Kiran Shah", Role::SubjectHead);
    assert!(
        app.course_files
            .pending_for_subject_head(&unassigned)
            .await
            .unwrap()
            .is_empty()
    );

    // Nothing is with the HOD yet.
    assert!(
        app.course_files
            .pending_for_hod(&app.hod)
            .await
            .unwrap()
            .is_empty()
    );

    app.approvals
        .transition(&app.subject_head, submitted.id, ApprovalAction::Forward, None)
        .await
        .unwrap();

    let hod_queue = app.course_files.pending_for_hod(&app.hod).await.unwrap();
    assert_eq!(hod_queue.len(), 1);

    // And it left the Subject Head queue.
    assert!(
        app.course_files
            .pending_for_subject_head(&app.subject_head)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn queue_endpoints_check_the_acting_role() {
    let app = TestApp::new().await;

    let err = app
        .course_files
        .pending_for_subject_head(&app.teacher)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = app.course_files.pending_for_hod(&app.teacher).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn department_listing_requires_membership_or_admin() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let listed = app
        .course_files
        .list_for_department(&app.hod, app.department_id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, cf.id);

    let foreign = Principal::new(PrincipalId::new(), "Vikram Joshi", Role::Hod)
        .in_department(DepartmentId::new());
    let err = app
        .course_files
        .list_for_department(&foreign, app.department_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    // Admin may list any department.
    let admin = Principal::new(PrincipalId::new(), "Root", Role::Admin);
    let listed = app
        .course_files
        .list_for_department(&admin, app.department_id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn owner_listing_shows_all_their_files() {
    let app = TestApp::new().await;
    let first = app.create_course_file().await;
    app.course_files
        .create(
            &app.teacher,
            CreateCourseFileRequest {
                course_id: app.course_id,
                academic_year: None,
                section: "B".to_string(),
            },
        )
        .await
        .unwrap();

    let mine = app.course_files.list_mine(&app.teacher).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().any(|f| f.id == first.id));
}
