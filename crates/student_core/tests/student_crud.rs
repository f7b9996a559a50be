use student_core::{
    FieldValue, JsonFileStore, JsonStudentRepository, NewStudent, RepoError, Student,
    StudentField, StudentId, StudentRepository, StudentService, StudentServiceError,
};
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> StudentService<JsonStudentRepository> {
    let store = JsonFileStore::initialize(dir.path().join("students.json")).unwrap();
    StudentService::without_hooks(JsonStudentRepository::new(store))
}

fn raw_store(dir: &TempDir) -> serde_json::Value {
    let bytes = std::fs::read(dir.path().join("students.json")).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn end_to_end_create_update_delete_list() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let ann = service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    assert_eq!(ann.id, StudentId(1));
    let bo = service.create_student(NewStudent::new("Bo", 21, 3.0)).unwrap();
    assert_eq!(bo.id, StudentId(2));

    let updated = service
        .update_student(StudentId(1), FieldValue::Age(22))
        .unwrap()
        .unwrap();
    assert_eq!(updated.age, 22);

    assert_eq!(service.delete_student(StudentId(2)).unwrap(), 1);

    let expected = vec![Student {
        id: StudentId(1),
        name: "Ann".to_string(),
        age: 22,
        marks: 3.5,
    }];
    assert_eq!(service.list_students().unwrap(), expected);
    assert_eq!(
        raw_store(&dir),
        serde_json::json!([{ "id": 1, "name": "Ann", "age": 22, "marks": 3.5 }])
    );
}

#[test]
fn ids_follow_max_and_are_not_reused_while_higher_ids_exist() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    for name in ["a", "b", "c"] {
        service.create_student(NewStudent::new(name, 20, 1.0)).unwrap();
    }
    service.delete_student(StudentId(2)).unwrap();

    let next = service.create_student(NewStudent::new("d", 20, 1.0)).unwrap();
    assert_eq!(next.id, StudentId(4));

    let ids: Vec<i64> = service
        .list_students()
        .unwrap()
        .iter()
        .map(|s| s.id.0)
        .collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn deleting_the_sole_record_resets_ids_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let first = service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    service.delete_student(first.id).unwrap();

    let again = service.create_student(NewStudent::new("Bo", 21, 3.0)).unwrap();
    assert_eq!(again.id, StudentId(1));
}

#[test]
fn update_unknown_id_returns_none_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    let before = raw_store(&dir);

    let result = service
        .update_student(StudentId(99), FieldValue::Name("Zed".to_string()))
        .unwrap();
    assert!(result.is_none());

    let replaced = service
        .replace_student(StudentId(99), NewStudent::new("Zed", 30, 1.0))
        .unwrap();
    assert!(replaced.is_none());

    assert_eq!(raw_store(&dir), before);
}

#[test]
fn update_overwrites_each_field_type() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let ann = service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();

    service
        .update_student(ann.id, FieldValue::Name("Anna".to_string()))
        .unwrap();
    service
        .update_student(ann.id, FieldValue::Marks(3.9))
        .unwrap();

    let stored = &service.list_students().unwrap()[0];
    assert_eq!(stored.name, "Anna");
    assert_eq!(stored.age, 20);
    assert_eq!(stored.marks, 3.9);
}

#[test]
fn replace_overwrites_all_fields_and_keeps_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    service.create_student(NewStudent::new("Bo", 21, 3.0)).unwrap();

    let replaced = service
        .replace_student(StudentId(2), NewStudent::new("Bob", 25, 2.5))
        .unwrap()
        .unwrap();
    assert_eq!(
        replaced,
        NewStudent::new("Bob", 25, 2.5).into_student(StudentId(2))
    );
    assert_eq!(service.list_students().unwrap()[1], replaced);
}

#[test]
fn delete_unknown_id_succeeds_and_keeps_collection() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    let before = service.list_students().unwrap();

    assert_eq!(service.delete_student(StudentId(42)).unwrap(), 0);
    assert_eq!(service.list_students().unwrap(), before);
}

#[test]
fn sorted_view_orders_ascending_without_persisting() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.create_student(NewStudent::new("Cy", 30, 2.0)).unwrap();
    service.create_student(NewStudent::new("Ann", 20, 3.0)).unwrap();
    service.create_student(NewStudent::new("Bo", 25, 1.0)).unwrap();
    let stored_before = raw_store(&dir);

    let by_age: Vec<i64> = service
        .sorted_view("age")
        .unwrap()
        .iter()
        .map(|s| s.age)
        .collect();
    assert_eq!(by_age, vec![20, 25, 30]);

    let by_name: Vec<String> = service
        .sorted_by(StudentField::Name)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(by_name, vec!["Ann", "Bo", "Cy"]);

    let by_marks: Vec<f64> = service
        .sorted_view("marks")
        .unwrap()
        .iter()
        .map(|s| s.marks)
        .collect();
    assert_eq!(by_marks, vec![1.0, 2.0, 3.0]);

    assert_eq!(raw_store(&dir), stored_before);
}

#[test]
fn sorted_view_is_stable_for_equal_keys() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.create_student(NewStudent::new("x", 20, 1.0)).unwrap();
    service.create_student(NewStudent::new("y", 18, 1.0)).unwrap();
    service.create_student(NewStudent::new("z", 20, 1.0)).unwrap();

    let ids: Vec<i64> = service
        .sorted_view("age")
        .unwrap()
        .iter()
        .map(|s| s.id.0)
        .collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn sorted_view_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let err = service.sorted_view("grade").unwrap_err();
    assert!(matches!(err, StudentServiceError::InvalidField(ref f) if f.0 == "grade"));
}

#[test]
fn non_finite_marks_are_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let ann = service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    let before = raw_store(&dir);

    let create_err = service
        .create_student(NewStudent::new("Bad", 20, f64::NAN))
        .unwrap_err();
    assert!(matches!(
        create_err,
        StudentServiceError::Repo(RepoError::Validation(_))
    ));

    let update_err = service
        .update_student(ann.id, FieldValue::Marks(f64::INFINITY))
        .unwrap_err();
    assert!(matches!(
        update_err,
        StudentServiceError::Repo(RepoError::Validation(_))
    ));

    assert_eq!(raw_store(&dir), before);
}

#[test]
fn corrupt_store_surfaces_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    std::fs::write(dir.path().join("students.json"), "not json").unwrap();

    let err = service.list_students().unwrap_err();
    assert!(matches!(
        err,
        StudentServiceError::Repo(RepoError::Store(student_core::StoreError::Corrupt { .. }))
    ));
}

#[test]
fn stale_snapshots_lose_updates() {
    // No isolation between callers: the later save wins.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    let store = JsonFileStore::initialize(&path).unwrap();
    let repo = JsonStudentRepository::new(store.clone());
    repo.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();

    let stale = store.load().unwrap();
    repo.create_student(NewStudent::new("Bo", 21, 3.0)).unwrap();
    store.save(&stale).unwrap();

    let names: Vec<String> = repo
        .list_students()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Ann"]);
}

#[test]
fn create_after_max_id_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    std::fs::write(
        dir.path().join("students.json"),
        format!(
            r#"[{{"id": {}, "name": "Max", "age": 40, "marks": 1.0}}]"#,
            i64::MAX
        ),
    )
    .unwrap();
    let before = raw_store(&dir);

    let err = service
        .create_student(NewStudent::new("Ann", 20, 3.5))
        .unwrap_err();
    assert!(matches!(
        err,
        StudentServiceError::Repo(RepoError::IdsExhausted(StudentId(i64::MAX)))
    ));
    assert_eq!(raw_store(&dir), before);
}

#[test]
fn update_by_field_name_coerces_and_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let ann = service.create_student(NewStudent::new("Ann", 20, 3.5)).unwrap();
    let before = raw_store(&dir);

    let field_err = service
        .update_student_field(ann.id, "grade", "A")
        .unwrap_err();
    assert!(matches!(field_err, StudentServiceError::InvalidField(ref f) if f.0 == "grade"));

    let value_err = service
        .update_student_field(ann.id, "age", "old")
        .unwrap_err();
    assert!(matches!(value_err, StudentServiceError::InvalidValue(_)));
    assert_eq!(raw_store(&dir), before);

    let updated = service
        .update_student_field(ann.id, "marks", "3.9")
        .unwrap()
        .unwrap();
    assert_eq!(updated.marks, 3.9);
}
