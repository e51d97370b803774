//! Request handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod panel;
pub mod points;
pub mod task;
