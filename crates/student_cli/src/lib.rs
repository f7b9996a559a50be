//! Interactive console front end for the student store.
//!
//! # Responsibility
//! - Present the numbered menu and prompt for typed input.
//! - Coerce raw text to field types before calling the core service.
//!
//! # Invariants
//! - Bad user input is reported and the menu continues.
//! - Store failures end the session; they are never retried.
//! - End of input exits like the `Exit` choice.

pub mod menu;

pub use menu::{run_menu, MenuError};
