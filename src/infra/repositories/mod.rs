//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over the branch document store,
//! following the Repository pattern for clean separation of concerns.

mod branch_repository;
pub(crate) mod entities;
mod memory;

pub use branch_repository::{BranchRepository, BranchStore};
pub use memory::MemoryBranchStore;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use branch_repository::MockBranchRepository;
