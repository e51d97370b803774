//! Domain types and pure logic shared by the TaskFlow backend crates.
//!
//! This crate carries no I/O dependencies: the database and HTTP layers
//! build on the error taxonomy, validation rules, and subtask semantics
//! defined here.

pub mod error;
pub mod subtask;
pub mod types;
pub mod validation;
