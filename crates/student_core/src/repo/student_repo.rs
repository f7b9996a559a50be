//! Student repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Provide create/list/update/delete/sort over the stored collection.
//! - Assign ids as `max(existing) + 1`, or `1` for an empty collection.
//!
//! # Invariants
//! - Update on an unknown id returns `Ok(None)` and leaves the store untouched.
//! - Delete always saves and never reports absence as an error.
//! - Sorted views are projections; stored order never changes.

use crate::model::student::{
    FieldValue, NewStudent, Student, StudentField, StudentId, StudentValidationError,
};
use crate::store::{JsonFileStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Store(StoreError),
    /// The highest stored id is `i64::MAX`; no larger id exists.
    IdsExhausted(StudentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::IdsExhausted(max) => write!(f, "no student id left after `{max}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IdsExhausted(_) => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for student record operations.
pub trait StudentRepository {
    /// Appends a new record and returns it with its assigned id.
    fn create_student(&self, input: NewStudent) -> RepoResult<Student>;
    /// Returns the full collection in stored order.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Overwrites one field of the record with `id`.
    fn update_student_field(&self, id: StudentId, value: FieldValue)
        -> RepoResult<Option<Student>>;
    /// Overwrites name, age and marks of the record with `id`.
    fn replace_student(&self, id: StudentId, input: NewStudent) -> RepoResult<Option<Student>>;
    /// Removes any record with `id` and returns how many were removed.
    fn delete_student(&self, id: StudentId) -> RepoResult<usize>;
    /// Returns the collection ordered ascending by `field`.
    fn sorted_students(&self, field: StudentField) -> RepoResult<Vec<Student>>;
}

/// Student repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonStudentRepository {
    store: JsonFileStore,
}

impl JsonStudentRepository {
    pub fn new(store: JsonFileStore) -> Self {
        Self { store }
    }

    /// Loads, lets `mutate` edit the matching record, and saves on a match.
    fn modify_student(
        &self,
        id: StudentId,
        mutate: impl FnOnce(&mut Student),
    ) -> RepoResult<Option<Student>> {
        let mut records = self.store.load()?;
        let Some(index) = records.iter().position(|record| record.id == id) else {
            return Ok(None);
        };

        let mut updated = records[index].clone();
        mutate(&mut updated);
        updated.validate()?;
        records[index] = updated.clone();

        self.store.save(&records)?;
        Ok(Some(updated))
    }
}

impl StudentRepository for JsonStudentRepository {
    fn create_student(&self, input: NewStudent) -> RepoResult<Student> {
        input.validate()?;

        let mut records = self.store.load()?;
        let student = input.into_student(next_student_id(&records)?);
        records.push(student.clone());
        self.store.save(&records)?;

        Ok(student)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        Ok(self.store.load()?)
    }

    fn update_student_field(
        &self,
        id: StudentId,
        value: FieldValue,
    ) -> RepoResult<Option<Student>> {
        self.modify_student(id, |student| student.apply(value))
    }

    fn replace_student(&self, id: StudentId, input: NewStudent) -> RepoResult<Option<Student>> {
        input.validate()?;
        self.modify_student(id, |student| student.overwrite(input))
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<usize> {
        let mut records = self.store.load()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        let removed = before - records.len();

        // Saved even when nothing matched.
        self.store.save(&records)?;
        Ok(removed)
    }

    fn sorted_students(&self, field: StudentField) -> RepoResult<Vec<Student>> {
        let mut records = self.store.load()?;
        records.sort_by(|left, right| field.compare(left, right));
        Ok(records)
    }
}

/// Returns `max(existing ids) + 1`, or the first id for an empty collection.
///
/// Fails with `IdsExhausted` instead of wrapping past `i64::MAX`.
pub fn next_student_id(records: &[Student]) -> RepoResult<StudentId> {
    match records.iter().map(|record| record.id).max() {
        None => Ok(StudentId::FIRST),
        Some(max) => max.next().ok_or(RepoError::IdsExhausted(max)),
    }
}
