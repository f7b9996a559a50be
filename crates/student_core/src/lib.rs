//! Core record store for the student manager.
//! Both the console menu and the HTTP API call into this crate; it owns
//! every storage and mutation rule.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{
    FieldValue, FieldValueError, InvalidField, NewStudent, Student, StudentField, StudentId,
    StudentValidationError,
};
pub use repo::student_repo::{
    next_student_id, JsonStudentRepository, RepoError, RepoResult, StudentRepository,
};
pub use service::hooks::{LogOperationHook, OperationHook, StudentOperation};
pub use service::student_service::{ServiceResult, StudentService, StudentServiceError};
pub use store::{JsonFileStore, StoreError, StoreResult};

/// Service type used by the front ends.
pub type JsonStudentService = StudentService<JsonStudentRepository>;

/// Initializes the store at `path` and wraps it in a logging service.
pub fn open_student_service(path: impl AsRef<std::path::Path>) -> StoreResult<JsonStudentService> {
    let store = JsonFileStore::initialize(path)?;
    Ok(StudentService::new(JsonStudentRepository::new(store)))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
