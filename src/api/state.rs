//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::BranchRepository;
use crate::services::{BranchService, ServiceContainer};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Branch service
    pub branch_service: Arc<dyn BranchService>,
    /// Store backing the services, probed by the health endpoint
    pub repository: Arc<dyn BranchRepository>,
}

impl AppState {
    /// Create application state from a service container.
    pub fn from_container(container: &dyn ServiceContainer) -> Self {
        Self {
            branch_service: container.branches(),
            repository: container.repository(),
        }
    }
}
