//! HTTP request handlers.

pub mod branch_handler;

pub use branch_handler::branch_routes;
