//! Branch Registry - bank branch records and holiday calendars.
//!
//! An axum + SeaORM service that keeps one document per branch, with the
//! branch's holiday calendar embedded in it.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Branch aggregate and holiday rules
//! - **services**: Branch use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, extractors, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start without a database
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```
//!
//! # Testing
//!
//! Repository and container mocks are only exported with the `test-utils`
//! feature, and the service suite in `tests/branch_service_test.rs` needs
//! them. A plain `cargo test` skips that suite:
//!
//! ```bash
//! cargo test --features test-utils
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Branch, BranchState, Holiday};
pub use errors::{AppError, AppResult};
