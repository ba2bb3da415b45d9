//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod branch;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use branch::{
    ActiveModel as BranchActiveModel, Entity as BranchEntity, HolidayDocuments,
    Model as BranchModel,
};
