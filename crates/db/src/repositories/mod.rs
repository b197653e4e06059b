//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod master_repo;
pub mod report_repo;
pub mod trash_master_repo;
pub mod user_repo;

pub use account_repo::AccountRepo;
pub use master_repo::MasterRepo;
pub use report_repo::ReportRepo;
pub use trash_master_repo::TrashMasterRepo;
pub use user_repo::UserRepo;
