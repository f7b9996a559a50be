//! Operation hooks run before each service call.
//!
//! # Invariants
//! - Hooks observe only; they get the operation name and cannot change the
//!   outcome of the call.
//! - Hooks run before the repository is touched, whether or not the call
//!   later fails.

use log::info;
use std::fmt::{Display, Formatter};

/// Use-case operations exposed by `StudentService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentOperation {
    CreateStudent,
    ListStudents,
    UpdateStudent,
    ReplaceStudent,
    DeleteStudent,
    SortStudents,
}

impl StudentOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateStudent => "create_student",
            Self::ListStudents => "list_students",
            Self::UpdateStudent => "update_student",
            Self::ReplaceStudent => "replace_student",
            Self::DeleteStudent => "delete_student",
            Self::SortStudents => "sort_students",
        }
    }
}

impl Display for StudentOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interceptor invoked with the operation name before each service call.
pub trait OperationHook: Send + Sync {
    fn before(&self, operation: StudentOperation);
}

impl<F> OperationHook for F
where
    F: Fn(StudentOperation) + Send + Sync,
{
    fn before(&self, operation: StudentOperation) {
        self(operation)
    }
}

/// Default hook: one `info` event per operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOperationHook;

impl OperationHook for LogOperationHook {
    fn before(&self, operation: StudentOperation) {
        info!("event=student_op module=service op={}", operation);
    }
}
