//! Domain layer - Core business entities and logic
//!
//! This module contains the branch aggregate and the rules that guard
//! its holiday calendar, independent of storage and transport.

pub mod branch;

pub use branch::{Branch, BranchPatch, BranchResponse, BranchState, Holiday, NewBranch};
