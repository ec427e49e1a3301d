//! Comment threads: scoping, replies, views, and read-access gating.

use coursevault_core::types::PrincipalId;
use coursevault_core::ErrorKind;
use coursevault_entity::principal::{Principal, Role};
use coursevault_service::comment::PostCommentRequest;
use coursevault_service::structure::UploadDocumentRequest;

use super::helpers::TestApp;

fn file_scoped(cf: coursevault_core::types::CourseFileId, text: &str) -> PostCommentRequest {
    PostCommentRequest {
        course_file_id: cf,
        heading_id: None,
        document_id: None,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn comments_scope_to_file_heading_and_document() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = tree.roots[0].id;
    let document = app
        .structure
        .upload_document(
            &app.teacher,
            UploadDocumentRequest {
                heading_id: syllabus,
                file_name: "syllabus.pdf".to_string(),
                content_type: None,
                size_bytes: 100,
            },
        )
        .await
        .unwrap();

    let file_thread = app
        .comments
        .post(&app.teacher, file_scoped(cf.id, "Overall plan attached"))
        .await
        .unwrap();
    assert!(file_thread.heading_id.is_none());

    let heading_thread = app
        .comments
        .post(
            &app.subject_head,
            PostCommentRequest {
                course_file_id: cf.id,
                heading_id: Some(syllabus),
                document_id: None,
                text: "Please add office hours".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(heading_thread.heading_id, Some(syllabus));
    assert_eq!(heading_thread.author_role, Role::SubjectHead);

    // A document-scoped comment picks up its heading implicitly.
    let doc_thread = app
        .comments
        .post(
            &app.subject_head,
            PostCommentRequest {
                course_file_id: cf.id,
                heading_id: None,
                document_id: Some(document.id),
                text: "Page 3 has a typo".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(doc_thread.heading_id, Some(syllabus));

    let on_file = app
        .comments
        .list_for_course_file(&app.teacher, cf.id)
        .await
        .unwrap();
    assert_eq!(on_file.len(), 3);

    // The heading view holds heading-scoped threads only; the
    // document-scoped one stays in the document view.
    let on_heading = app
        .comments
        .list_for_heading(&app.teacher, syllabus)
        .await
        .unwrap();
    assert_eq!(on_heading.len(), 1);
    assert_eq!(on_heading[0].text, "Please add office hours");

    let on_document = app
        .comments
        .list_for_document(&app.teacher, document.id)
        .await
        .unwrap();
    assert_eq!(on_document.len(), 1);
    assert_eq!(on_document[0].text, "Page 3 has a typo");
}

#[tokio::test]
async fn heading_view_excludes_document_scoped_threads() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let heading = tree.roots[0].id;
    let document = app
        .structure
        .upload_document(
            &app.teacher,
            UploadDocumentRequest {
                heading_id: heading,
                file_name: "outline.pdf".to_string(),
                content_type: None,
                size_bytes: 64,
            },
        )
        .await
        .unwrap();

    app.comments
        .post(
            &app.teacher,
            PostCommentRequest {
                course_file_id: cf.id,
                heading_id: Some(heading),
                document_id: None,
                text: "On the heading itself".to_string(),
            },
        )
        .await
        .unwrap();
    app.comments
        .post(
            &app.teacher,
            PostCommentRequest {
                course_file_id: cf.id,
                heading_id: None,
                document_id: Some(document.id),
                text: "On version 1 only".to_string(),
            },
        )
        .await
        .unwrap();

    let on_heading = app
        .comments
        .list_for_heading(&app.teacher, heading)
        .await
        .unwrap();
    assert_eq!(on_heading.len(), 1);
    assert_eq!(on_heading[0].text, "On the heading itself");

    // Both still appear in the course-file view, and the document view
    // holds exactly the document-scoped one.
    let on_file = app
        .comments
        .list_for_course_file(&app.teacher, cf.id)
        .await
        .unwrap();
    assert_eq!(on_file.len(), 2);
    let on_document = app
        .comments
        .list_for_document(&app.teacher, document.id)
        .await
        .unwrap();
    assert_eq!(on_document.len(), 1);
    assert_eq!(on_document[0].text, "On version 1 only");
}

#[tokio::test]
async fn mismatched_scopes_are_rejected() {
    let app = TestApp::new().await;
    let first = app.create_course_file().await;
    let second = app
        .course_files
        .create(
            &app.teacher,
            coursevault_service::course_file::CreateCourseFileRequest {
                course_id: app.course_id,
                academic_year: None,
                section: "B".to_string(),
            },
        )
        .await
        .unwrap();

    let first_tree = app.structure.get_tree(&app.teacher, first.id).await.unwrap();
    let foreign_heading = first_tree.roots[0].id;

    // Heading from a different course file.
    let err = app
        .comments
        .post(
            &app.teacher,
            PostCommentRequest {
                course_file_id: second.id,
                heading_id: Some(foreign_heading),
                document_id: None,
                text: "Lost".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidScope);

    // Document paired with a heading it does not belong to.
    let second_tree = app.structure.get_tree(&app.teacher, second.id).await.unwrap();
    let other_heading = second_tree.roots[1].id;
    let document = app
        .structure
        .upload_document(
            &app.teacher,
            UploadDocumentRequest {
                heading_id: second_tree.roots[0].id,
                file_name: "notes.pdf".to_string(),
                content_type: None,
                size_bytes: 10,
            },
        )
        .await
        .unwrap();
    let err = app
        .comments
        .post(
            &app.teacher,
            PostCommentRequest {
                course_file_id: second.id,
                heading_id: Some(other_heading),
                document_id: Some(document.id),
                text: "Wrong shelf".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidScope);
}

#[tokio::test]
async fn replies_append_flat() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let thread = app
        .comments
        .post(&app.subject_head, file_scoped(cf.id, "Where is the rubric?"))
        .await
        .unwrap();
    app.comments
        .reply(&app.teacher, thread.id, "Uploading it today")
        .await
        .unwrap();
    app.comments
        .reply(&app.subject_head, thread.id, "Thanks")
        .await
        .unwrap();

    let threads = app
        .comments
        .list_for_course_file(&app.teacher, cf.id)
        .await
        .unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].replies.len(), 2);
    assert_eq!(threads[0].replies[0].text, "Uploading it today");
    assert_eq!(threads[0].replies[1].author_id, app.subject_head.id);
}

#[tokio::test]
async fn empty_and_oversized_text_rejected() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let err = app
        .comments
        .post(&app.teacher, file_scoped(cf.id, "   "))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let long = "x".repeat(4001);
    let err = app
        .comments
        .post(&app.teacher, file_scoped(cf.id, &long))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn read_access_gates_threads() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    app.comments
        .post(&app.teacher, file_scoped(cf.id, "Draft notes"))
        .await
        .unwrap();

    let outsider = Principal::new(PrincipalId::new(), "Dev Kumar", Role::Teacher);
    let err = app
        .comments
        .list_for_course_file(&outsider, cf.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = app
        .comments
        .post(&outsider, file_scoped(cf.id, "Let me in"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    // The department HOD can read and post.
    app.comments
        .post(&app.hod, file_scoped(cf.id, "Looks on track"))
        .await
        .unwrap();
}

#[tokio::test]
async fn author_and_department_views() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    app.comments
        .post(&app.teacher, file_scoped(cf.id, "First"))
        .await
        .unwrap();
    app.comments
        .post(&app.subject_head, file_scoped(cf.id, "Second"))
        .await
        .unwrap();

    let mine = app.comments.list_mine(&app.subject_head).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].text, "Second");

    let department = app
        .comments
        .list_for_department(&app.hod, app.department_id)
        .await
        .unwrap();
    assert_eq!(department.len(), 2);

    // Teachers hold no report capability.
    let err = app
        .comments
        .list_for_department(&app.teacher, app.department_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}
