//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod challenge_repo;
pub mod entry_repo;

pub use challenge_repo::ChallengeRepo;
pub use entry_repo::EntryRepo;
