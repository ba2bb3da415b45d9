//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Branch repositories (SeaORM and in-process)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{BranchRepository, BranchStore, MemoryBranchStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockBranchRepository;
