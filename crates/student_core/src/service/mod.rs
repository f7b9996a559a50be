//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Run operation hooks at the entry of every use-case call.
//! - Keep console/HTTP front ends decoupled from storage details.

pub mod hooks;
pub mod student_service;
