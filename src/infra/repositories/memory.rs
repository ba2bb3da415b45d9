//! In-process branch store.
//!
//! Keeps documents in insertion order behind a tokio `RwLock` and enforces
//! the same rules as the database: unique email on insert, version
//! compare-and-swap on save.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BranchRepository;
use crate::domain::Branch;
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryBranchStore {
    branches: RwLock<Vec<Branch>>,
}

impl MemoryBranchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BranchRepository for MemoryBranchStore {
    async fn find_all(&self) -> AppResult<Vec<Branch>> {
        Ok(self.branches.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        let branches = self.branches.read().await;
        Ok(branches.iter().find(|b| b.id == id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let branches = self.branches.read().await;
        Ok(branches.iter().any(|b| b.email_address == email))
    }

    async fn insert(&self, record: Branch) -> AppResult<Branch> {
        let mut branches = self.branches.write().await;
        if branches.iter().any(|b| b.email_address == record.email_address) {
            return Err(AppError::DuplicateEmail(record.email_address));
        }
        if branches.iter().any(|b| b.id == record.id) {
            return Err(AppError::internal(format!("duplicate branch id {}", record.id)));
        }

        branches.push(record.clone());
        Ok(record)
    }

    async fn save(&self, record: Branch) -> AppResult<Branch> {
        let mut branches = self.branches.write().await;
        let stored = branches
            .iter_mut()
            .find(|b| b.id == record.id)
            .ok_or_else(|| AppError::BranchNotFound(record.id.to_string()))?;

        if stored.version != record.version {
            return Err(AppError::VersionConflict(record.id));
        }

        let mut next = record;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio_test::{assert_err, assert_ok};

    use crate::domain::NewBranch;

    fn branch(email: &str) -> Branch {
        Branch::open(
            NewBranch {
                email_address: email.to_string(),
                name: "Agencia".to_string(),
                phone_number: "022555666".to_string(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_rejects_taken_email() {
        let store = MemoryBranchStore::new();
        assert_ok!(store.insert(branch("a@b.com")).await);

        let result = store.insert(branch("a@b.com")).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail(ref e)) if e == "a@b.com"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryBranchStore::new();
        for email in ["one@b.com", "two@b.com", "three@b.com"] {
            store.insert(branch(email)).await.unwrap();
        }

        let emails: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.email_address)
            .collect();
        assert_eq!(emails, vec!["one@b.com", "two@b.com", "three@b.com"]);
    }

    #[tokio::test]
    async fn save_bumps_version_and_rejects_stale_copies() {
        let store = MemoryBranchStore::new();
        let original = store.insert(branch("a@b.com")).await.unwrap();

        let mut first = original.clone();
        first.phone_number = "111".to_string();
        let saved = store.save(first).await.unwrap();
        assert_eq!(saved.version, original.version + 1);

        let mut stale = original.clone();
        stale.phone_number = "222".to_string();
        let result = store.save(stale).await;
        assert!(matches!(result, Err(AppError::VersionConflict(id)) if id == original.id));

        let current = store.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(current.phone_number, "111");
    }

    #[tokio::test]
    async fn save_unknown_branch_is_not_found() {
        let store = MemoryBranchStore::new();
        assert_err!(store.save(branch("ghost@b.com")).await);
    }
}
