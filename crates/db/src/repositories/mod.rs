//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod cat_repo;
pub mod mission_repo;
pub mod target_repo;

pub use cat_repo::CatRepo;
pub use mission_repo::MissionRepo;
pub use target_repo::TargetRepo;
