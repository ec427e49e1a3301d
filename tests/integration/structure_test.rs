//! Heading-tree and document-version behavior: template seeding,
//! immutability, cascade deletes, versioning, and completion scoring.

use coursevault_core::types::HeadingId;
use coursevault_core::ErrorKind;
use coursevault_entity::approval::ApprovalAction;
use coursevault_entity::document::Document;
use coursevault_entity::heading::HeadingTreeNode;
use coursevault_service::course_file::CreateCourseFileRequest;
use coursevault_service::structure::{CreateHeadingRequest, UploadDocumentRequest};

use super::helpers::TestApp;

fn find_node<'a>(nodes: &'a [HeadingTreeNode], title: &str) -> Option<&'a HeadingTreeNode> {
    for node in nodes {
        if node.title == title {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, title) {
            return Some(found);
        }
    }
    None
}

fn upload(heading_id: HeadingId, file_name: &str) -> UploadDocumentRequest {
    UploadDocumentRequest {
        heading_id,
        file_name: file_name.to_string(),
        content_type: Some("application/pdf".to_string()),
        size_bytes: 1024,
    }
}

#[tokio::test]
async fn template_seeds_the_structure() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    assert_eq!(tree.total_headings, 4);
    assert_eq!(tree.roots.len(), 2);
    assert_eq!(tree.roots[0].title, "Syllabus");
    assert_eq!(tree.roots[1].title, "Assessments");
    assert_eq!(tree.roots[1].children.len(), 2);
    assert!(tree.roots.iter().all(|n| n.is_template_origin));
}

#[tokio::test]
async fn missing_template_leaves_structure_empty() {
    let app = TestApp::new().await;
    let cf = app
        .course_files
        .create(
            &app.teacher_without_template,
            CreateCourseFileRequest {
                course_id: coursevault_core::types::CourseId::new(),
                academic_year: None,
                section: "A".to_string(),
            },
        )
        .await
        .unwrap();

    let tree = app
        .structure
        .get_tree(&app.teacher_without_template, cf.id)
        .await
        .unwrap();
    assert_eq!(tree.total_headings, 0);
    assert_eq!(
        app.structure
            .completion(&app.teacher_without_template, cf.id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn template_headings_are_immutable() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap();

    let err = app
        .structure
        .rename_heading(&app.teacher, syllabus.id, "Course outline")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TemplateNodeImmutable);

    let err = app
        .structure
        .delete_heading(&app.teacher, syllabus.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TemplateNodeImmutable);
}

#[tokio::test]
async fn custom_headings_can_grow_under_template_nodes() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let assessments = find_node(&tree.roots, "Assessments").unwrap();

    let custom = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: Some(assessments.id),
                title: "Surprise quiz".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();
    assert!(!custom.is_template_origin);
    assert_eq!(custom.order_index, 3);

    app.structure
        .rename_heading(&app.teacher, custom.id, "Pop quiz")
        .await
        .unwrap();

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    assert!(find_node(&tree.roots, "Pop quiz").is_some());
    assert_eq!(tree.total_headings, 5);
}

#[tokio::test]
async fn deleting_a_heading_cascades() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let parent = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Extras".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();
    let child = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: Some(parent.id),
                title: "Field trips".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();
    app.structure
        .upload_document(&app.teacher, upload(child.id, "itinerary.pdf"))
        .await
        .unwrap();

    let removed = app
        .structure
        .delete_heading(&app.teacher, parent.id)
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    assert_eq!(tree.total_headings, 4);
    assert!(find_node(&tree.roots, "Field trips").is_none());
}

#[tokio::test]
async fn uploads_assign_increasing_versions_per_identity() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap().id;

    let v1 = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();
    let v2 = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();
    let other = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "reading-list.pdf"))
        .await
        .unwrap();
    assert_eq!(v1.version, 1);
    assert_eq!(v2.version, 2);
    assert_eq!(other.version, 1);

    // Earlier versions stay retained in the tree.
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let node = find_node(&tree.roots, "Syllabus").unwrap();
    assert_eq!(node.documents.len(), 3);

    // Deleting one version leaves the others alone.
    app.structure
        .delete_document(&app.teacher, v1.id)
        .await
        .unwrap();
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let node = find_node(&tree.roots, "Syllabus").unwrap();
    assert_eq!(node.documents.len(), 2);
}

#[tokio::test]
async fn oversized_uploads_are_rejected() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap().id;

    let err = app
        .structure
        .upload_document(
            &app.teacher,
            UploadDocumentRequest {
                heading_id: syllabus,
                file_name: "video.mp4".to_string(),
                content_type: None,
                size_bytes: 51 * 1024 * 1024,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn structure_freezes_outside_editable_statuses() {
    let app = TestApp::new().await;
    let cf = app.submitted_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap().id;

    let err = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Late addition".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotEditable);

    let err = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "late.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotEditable);

    // A return reopens editing.
    app.approvals
        .transition(
            &app.subject_head,
            cf.id,
            ApprovalAction::Return,
            Some("Needs the lab schedule"),
        )
        .await
        .unwrap();
    app.structure
        .upload_document(&app.teacher, upload(syllabus, "lab-schedule.pdf"))
        .await
        .unwrap();
}

#[tokio::test]
async fn foreign_parent_is_rejected() {
    let app = TestApp::new().await;
    let first = app.create_course_file().await;
    let second = app
        .course_files
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

    let tree = app.structure.get_tree(&app.teacher, first.id).await.unwrap();
    let foreign_parent = tree.roots[0].id;

    let err = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: second.id,
                parent_id: Some(foreign_parent),
                title: "Misfiled".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParent);
}

#[tokio::test]
async fn depth_limit_is_enforced() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let mut parent_id = None;
    for level in 1..=5 {
        let heading = app
            .structure
            .create_heading(
                &app.teacher,
                CreateHeadingRequest {
                    course_file_id: cf.id,
                    parent_id,
                    title: format!("Level {level}"),
                    order_index: None,
                },
            )
            .await
            .unwrap();
        parent_id = Some(heading.id);
    }

    let err = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id,
                title: "Level 6".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn completion_counts_documents_and_explicit_flags() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    assert_eq!(app.structure.completion(&app.teacher, cf.id).await.unwrap(), 0);

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap().id;
    let quizzes = find_node(&tree.roots, "Quizzes").unwrap().id;

    // 1 of 4 headings.
    app.structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();
    assert_eq!(app.structure.completion(&app.teacher, cf.id).await.unwrap(), 25);

    // The explicit flag counts the same as a document.
    app.structure
        .set_completed(&app.teacher, quizzes, true)
        .await
        .unwrap();
    assert_eq!(app.structure.completion(&app.teacher, cf.id).await.unwrap(), 50);

    app.structure
        .set_completed(&app.teacher, quizzes, false)
        .await
        .unwrap();
    assert_eq!(app.structure.completion(&app.teacher, cf.id).await.unwrap(), 25);
}

#[tokio::test]
async fn explicit_index_inserts_before_existing_siblings() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    // Template roots are Syllabus (1) and Assessments (2).
    let first = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Vision".to_string(),
                order_index: Some(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(first.order_index, 1);

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let titles: Vec<&str> = tree.roots.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Vision", "Syllabus", "Assessments"]);
    let indexes: Vec<i32> = tree.roots.iter().map(|n| n.order_index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);

    // An index past the end clamps to last; zero is rejected.
    let last = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Appendix".to_string(),
                order_index: Some(99),
            },
        )
        .await
        .unwrap();
    assert_eq!(last.order_index, 4);
    let err = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Nowhere".to_string(),
                order_index: Some(0),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn indexes_stay_unique_after_a_sibling_delete() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let parent = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Units".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();
    let mut children = Vec::new();
    for title in ["Unit 1", "Unit 2", "Unit 3"] {
        children.push(
            app.structure
                .create_heading(
                    &app.teacher,
                    CreateHeadingRequest {
                        course_file_id: cf.id,
                        parent_id: Some(parent.id),
                        title: title.to_string(),
                        order_index: None,
                    },
                )
                .await
                .unwrap(),
        );
    }

    app.structure
        .delete_heading(&app.teacher, children[0].id)
        .await
        .unwrap();
    app.structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: Some(parent.id),
                title: "Unit 4".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let units = find_node(&tree.roots, "Units").unwrap();
    let titles: Vec<&str> = units.children.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Unit 2", "Unit 3", "Unit 4"]);
    let indexes: Vec<i32> = units.children.iter().map(|n| n.order_index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[tokio::test]
async fn reordering_moves_a_heading_among_its_siblings() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let parent = app
        .structure
        .create_heading(
            &app.teacher,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Labs".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap();
    let mut labs = Vec::new();
    for title in ["Lab A", "Lab B", "Lab C"] {
        labs.push(
            app.structure
                .create_heading(
                    &app.teacher,
                    CreateHeadingRequest {
                        course_file_id: cf.id,
                        parent_id: Some(parent.id),
                        title: title.to_string(),
                        order_index: None,
                    },
                )
                .await
                .unwrap(),
        );
    }

    app.structure
        .reorder_heading(&app.teacher, labs[2].id, 1)
        .await
        .unwrap();

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let node = find_node(&tree.roots, "Labs").unwrap();
    let titles: Vec<&str> = node.children.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Lab C", "Lab A", "Lab B"]);
    let indexes: Vec<i32> = node.children.iter().map(|n| n.order_index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);

    // Template-seeded headings keep their template position.
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap();
    let err = app
        .structure
        .reorder_heading(&app.teacher, syllabus.id, 2)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TemplateNodeImmutable);
}

#[tokio::test]
async fn deleting_the_newest_version_restores_the_previous() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;
    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let syllabus = find_node(&tree.roots, "Syllabus").unwrap().id;

    let v1 = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();
    let v2 = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();

    app.structure
        .delete_document(&app.teacher, v2.id)
        .await
        .unwrap();

    let tree = app.structure.get_tree(&app.teacher, cf.id).await.unwrap();
    let node = find_node(&tree.roots, "Syllabus").unwrap();
    let current = Document::current_versions(&node.documents);
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, v1.id);
    assert_eq!(current[0].version, 1);

    // The next upload does not reuse the freed number.
    let v3 = app
        .structure
        .upload_document(&app.teacher, upload(syllabus, "syllabus.pdf"))
        .await
        .unwrap();
    assert_eq!(v3.version, 2);
}

#[tokio::test]
async fn only_the_owner_edits_structure() {
    let app = TestApp::new().await;
    let cf = app.create_course_file().await;

    let err = app
        .structure
        .create_heading(
            &app.hod,
            CreateHeadingRequest {
                course_file_id: cf.id,
                parent_id: None,
                title: "Not yours".to_string(),
                order_index: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}
