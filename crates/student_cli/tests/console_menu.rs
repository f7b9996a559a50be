use std::io::Cursor;
use student_cli::{run_menu, MenuError};
use student_core::{open_student_service, JsonStudentService, StudentId};
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> JsonStudentService {
    open_student_service(dir.path().join("students.json")).unwrap()
}

fn run(service: &JsonStudentService, script: &str) -> (Result<(), MenuError>, String) {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = run_menu(service, &mut input, &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn add_update_delete_session_persists_changes() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let script = "1\nAnn\n20\n3.5\n1\nBo\n21\n3.0\n3\n1\nage\n22\n4\n2\n6\n";
    let (result, output) = run(&service, script);

    result.unwrap();
    assert!(output.contains("Student added successfully!"));
    assert!(output.contains("Student updated."));
    assert!(output.contains("Student deleted if existed."));
    assert!(output.trim_end().ends_with("Exiting."));

    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("students.json")).unwrap())
            .unwrap();
    assert_eq!(
        stored,
        serde_json::json!([{ "id": 1, "name": "Ann", "age": 22, "marks": 3.5 }])
    );
}

#[test]
fn view_prints_each_record_in_stored_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(&service, "1\nCy\n30\n2.0\n1\nAnn\n20\n3.0\n2\n6\n");
    result.unwrap();

    let cy = output.find("name: \"Cy\"").unwrap();
    let ann = output.find("name: \"Ann\"").unwrap();
    assert!(cy < ann);
}

#[test]
fn sort_prints_ascending_and_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(
        &service,
        "1\nCy\n30\n2.0\n1\nAnn\n20\n3.0\n5\nage\n5\nheight\n6\n",
    );
    result.unwrap();

    let sorted = output.split("Sort by").nth(1).unwrap();
    let ann = sorted.find("Ann").unwrap();
    let cy = sorted.find("Cy").unwrap();
    assert!(ann < cy);
    assert!(output.contains("invalid field `height`"));

    let ids: Vec<i64> = service
        .list_students()
        .unwrap()
        .iter()
        .map(|s| s.id.0)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn update_of_missing_student_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(&service, "3\n7\nname\nZed\n6\n");
    result.unwrap();
    assert!(output.contains("Student not found!"));
    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn bad_numbers_and_choices_keep_the_menu_running() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(&service, "9\n1\nAnn\ntwenty\n4\nabc\n3\n1\nage\n2.5\n6\n");
    result.unwrap();

    assert!(output.contains("Invalid choice!"));
    assert!(output.contains("Invalid number: `twenty`"));
    assert!(output.contains("Invalid number: `abc`"));
    assert!(output.contains("invalid value `2.5` for `age`"));
    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(&service, "1\nAnn\n");
    result.unwrap();
    assert!(output.trim_end().ends_with("Exiting."));
    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn corrupt_store_ends_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    std::fs::write(dir.path().join("students.json"), "][").unwrap();

    let (result, _) = run(&service, "2\n6\n");
    assert!(matches!(result, Err(MenuError::Store(_))));
}

#[test]
fn ids_keep_growing_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let (first, _) = run(&service_in(&dir), "1\nAnn\n20\n3.5\n6\n");
    first.unwrap();
    let service = service_in(&dir);
    let (second, _) = run(&service, "1\nBo\n21\n3.0\n6\n");
    second.unwrap();

    let last = service.list_students().unwrap().pop().unwrap();
    assert_eq!(last.id, StudentId(2));
}

#[test]
fn update_with_unknown_field_reports_invalid_field_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let (result, output) = run(&service, "1\nAnn\n20\n3.5\n3\n1\ngrade\nx\n6\n");
    result.unwrap();

    assert!(output.contains("invalid field `grade`"));
    assert!(!output.contains("Student updated."));
    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("students.json")).unwrap())
            .unwrap();
    assert_eq!(
        stored,
        serde_json::json!([{ "id": 1, "name": "Ann", "age": 20, "marks": 3.5 }])
    );
}
