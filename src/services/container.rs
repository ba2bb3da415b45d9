//! Service Container - Centralized service access.
//!
//! Wires the branch service onto whichever repository the process was
//! started with and hands out shared handles to the HTTP layer.

use std::sync::Arc;

use super::{BranchManager, BranchService};
use crate::infra::{BranchRepository, BranchStore, MemoryBranchStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get branch service
    fn branches(&self) -> Arc<dyn BranchService>;

    /// Get the repository backing the services
    fn repository(&self) -> Arc<dyn BranchRepository>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    branch_service: Arc<dyn BranchService>,
    repository: Arc<dyn BranchRepository>,
}

impl Services {
    /// Create a container around an already-built repository
    pub fn from_repository(repository: Arc<dyn BranchRepository>) -> Self {
        let branch_service = Arc::new(BranchManager::new(repository.clone()));
        Self {
            branch_service,
            repository,
        }
    }

    /// Create service container backed by the SeaORM store
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        Self::from_repository(Arc::new(BranchStore::new(db)))
    }

    /// Create service container backed by the in-process store
    pub fn in_memory() -> Self {
        Self::from_repository(Arc::new(MemoryBranchStore::new()))
    }
}

impl ServiceContainer for Services {
    fn branches(&self) -> Arc<dyn BranchService> {
        self.branch_service.clone()
    }

    fn repository(&self) -> Arc<dyn BranchRepository> {
        self.repository.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBranch;

    #[tokio::test]
    async fn in_memory_container_shares_one_store() {
        let services = Services::in_memory();

        services
            .branches()
            .create_branch(NewBranch {
                email_address: "a@b.com".to_string(),
                name: "Centro".to_string(),
                phone_number: "022555666".to_string(),
            })
            .await
            .unwrap();

        assert!(services.repository().exists_by_email("a@b.com").await.unwrap());
        assert_eq!(services.branches().list_branches().await.unwrap().len(), 1);
    }
}
