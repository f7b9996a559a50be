//! Domain model for student records.
//!
//! # Responsibility
//! - Define the record shape persisted by the store and returned to callers.
//! - Name the updatable/sortable fields and their semantic value types.
//!
//! # Invariants
//! - Every record is identified by a positive, collection-unique `StudentId`.
//! - Deletion removes the record; there are no tombstones.

pub mod student;
