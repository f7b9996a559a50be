//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for student records.
//! - Isolate JSON file details from service orchestration.
//!
//! # Invariants
//! - Every call is a full load -> mutate -> save cycle; nothing is cached.
//! - Writes must pass model validation before persistence.

pub mod student_repo;
