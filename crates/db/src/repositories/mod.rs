//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod panel_repo;
pub mod task_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use panel_repo::PanelRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
