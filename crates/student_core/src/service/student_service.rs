//! Student use-case service.
//!
//! # Responsibility
//! - Provide the single CRUD/sort entry point shared by all front ends.
//! - Run registered `OperationHook`s before each call.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Unknown field names fail with `InvalidField` before any store access.
//! - Hooks run exactly once per call, before the repository, in
//!   registration order.

use crate::model::student::{
    FieldValue, FieldValueError, InvalidField, NewStudent, Student, StudentField, StudentId,
};
use crate::repo::student_repo::{RepoError, StudentRepository};
use crate::service::hooks::{LogOperationHook, OperationHook, StudentOperation};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for student use-cases.
#[derive(Debug)]
pub enum StudentServiceError {
    /// Caller named a field outside `name|age|marks`.
    InvalidField(InvalidField),
    /// Raw text does not parse as the named field's type.
    InvalidValue(FieldValueError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::InvalidValue(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StudentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::InvalidValue(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StudentServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<InvalidField> for StudentServiceError {
    fn from(value: InvalidField) -> Self {
        Self::InvalidField(value)
    }
}

impl From<FieldValueError> for StudentServiceError {
    fn from(value: FieldValueError) -> Self {
        Self::InvalidValue(value)
    }
}

pub type ServiceResult<T> = Result<T, StudentServiceError>;

/// Student service facade over repository implementations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
    hooks: Vec<Box<dyn OperationHook>>,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service with the default logging hook installed.
    pub fn new(repo: R) -> Self {
        Self::without_hooks(repo).with_hook(LogOperationHook)
    }

    /// Creates a service with an empty hook list.
    pub fn without_hooks(repo: R) -> Self {
        Self {
            repo,
            hooks: Vec::new(),
        }
    }

    /// Appends a hook; hooks run in registration order.
    pub fn with_hook(mut self, hook: impl OperationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Creates a record; the id is assigned by the repository.
    pub fn create_student(&self, input: NewStudent) -> ServiceResult<Student> {
        self.observe(StudentOperation::CreateStudent);
        Ok(self.repo.create_student(input)?)
    }

    /// Returns all records in stored order.
    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        self.observe(StudentOperation::ListStudents);
        Ok(self.repo.list_students()?)
    }

    /// Overwrites one field with an already-coerced value.
    ///
    /// Returns `Ok(None)` when no record has `id`.
    pub fn update_student(
        &self,
        id: StudentId,
        value: FieldValue,
    ) -> ServiceResult<Option<Student>> {
        self.observe(StudentOperation::UpdateStudent);
        Ok(self.repo.update_student_field(id, value)?)
    }

    /// Overwrites the named field from raw text, as typed at a prompt.
    ///
    /// Hooks fire before the field name or value is checked, matching
    /// `sorted_view`. Returns `Ok(None)` when no record has `id`.
    pub fn update_student_field(
        &self,
        id: StudentId,
        field: &str,
        raw_value: &str,
    ) -> ServiceResult<Option<Student>> {
        self.observe(StudentOperation::UpdateStudent);
        let value = field.parse::<StudentField>()?.coerce(raw_value)?;
        Ok(self.repo.update_student_field(id, value)?)
    }

    /// Overwrites name, age and marks of one record.
    ///
    /// Returns `Ok(None)` when no record has `id`.
    pub fn replace_student(
        &self,
        id: StudentId,
        input: NewStudent,
    ) -> ServiceResult<Option<Student>> {
        self.observe(StudentOperation::ReplaceStudent);
        Ok(self.repo.replace_student(id, input)?)
    }

    /// Removes the record with `id` if present. Absence is not an error.
    pub fn delete_student(&self, id: StudentId) -> ServiceResult<usize> {
        self.observe(StudentOperation::DeleteStudent);
        Ok(self.repo.delete_student(id)?)
    }

    /// Returns records sorted ascending by the named field.
    pub fn sorted_view(&self, field: &str) -> ServiceResult<Vec<Student>> {
        self.observe(StudentOperation::SortStudents);
        let field = field.parse::<StudentField>()?;
        Ok(self.repo.sorted_students(field)?)
    }

    /// Typed variant of `sorted_view`.
    pub fn sorted_by(&self, field: StudentField) -> ServiceResult<Vec<Student>> {
        self.observe(StudentOperation::SortStudents);
        Ok(self.repo.sorted_students(field)?)
    }

    fn observe(&self, operation: StudentOperation) {
        for hook in &self.hooks {
            hook.before(operation);
        }
    }
}
