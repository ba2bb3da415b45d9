//! Branch service - Branch lifecycle and holiday calendar use cases.
//!
//! Each operation is one load, an in-memory rule check on the aggregate,
//! and at most one save. Nothing is retried.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Branch, BranchPatch, Holiday, NewBranch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::BranchRepository;

/// Branch service trait for dependency injection.
#[async_trait]
pub trait BranchService: Send + Sync {
    /// List every branch, unfiltered
    async fn list_branches(&self) -> AppResult<Vec<Branch>>;

    /// Open a new ACTIVE branch; the email must be unused
    async fn create_branch(&self, new: NewBranch) -> AppResult<Branch>;

    /// Get branch by ID including its holidays
    async fn get_branch(&self, id: Uuid) -> AppResult<Branch>;

    /// Apply a patch (phone number only)
    async fn update_branch(&self, id: Uuid, patch: BranchPatch) -> AppResult<Branch>;

    /// Add a holiday on a date not yet taken
    async fn add_holiday(&self, id: Uuid, holiday: Holiday) -> AppResult<()>;

    /// Remove the holiday on `date`
    async fn remove_holiday(&self, id: Uuid, date: NaiveDate) -> AppResult<()>;

    /// Holidays in stored order
    async fn list_holidays(&self, id: Uuid) -> AppResult<Vec<Holiday>>;

    /// Whether `date` is a holiday for the branch
    async fn is_holiday(&self, id: Uuid, date: NaiveDate) -> AppResult<bool>;
}

/// Concrete implementation of BranchService using a repository.
pub struct BranchManager {
    repo: Arc<dyn BranchRepository>,
}

impl BranchManager {
    /// Create new branch service instance with repository
    pub fn new(repo: Arc<dyn BranchRepository>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: Uuid) -> AppResult<Branch> {
        self.repo.find_by_id(id).await?.ok_or_branch_not_found(id).map_err(|e| {
            tracing::error!(branch_id = %id, "Branch not found");
            e
        })
    }
}

#[async_trait]
impl BranchService for BranchManager {
    async fn list_branches(&self) -> AppResult<Vec<Branch>> {
        tracing::info!("Retrieving all branches");
        self.repo.find_all().await
    }

    async fn create_branch(&self, new: NewBranch) -> AppResult<Branch> {
        tracing::info!(email = %new.email_address, "Creating new branch");

        if self.repo.exists_by_email(&new.email_address).await? {
            tracing::error!(email = %new.email_address, "Branch creation failed, email already exists");
            return Err(AppError::DuplicateEmail(new.email_address));
        }

        let branch = self.repo.insert(Branch::open(new, Utc::now())).await?;
        tracing::info!(branch_id = %branch.id, "Branch created successfully");
        Ok(branch)
    }

    async fn get_branch(&self, id: Uuid) -> AppResult<Branch> {
        tracing::info!(branch_id = %id, "Retrieving branch");
        self.load(id).await
    }

    async fn update_branch(&self, id: Uuid, patch: BranchPatch) -> AppResult<Branch> {
        tracing::info!(branch_id = %id, "Updating branch");

        let mut branch = self.load(id).await?;
        branch.apply(patch, Utc::now());

        let updated = self.repo.save(branch).await?;
        tracing::info!(branch_id = %id, "Branch updated successfully");
        Ok(updated)
    }

    async fn add_holiday(&self, id: Uuid, holiday: Holiday) -> AppResult<()> {
        tracing::info!(branch_id = %id, date = %holiday.date, "Adding holiday");

        let mut branch = self.load(id).await?;
        let date = holiday.date;
        if let Err(e) = branch.add_holiday(holiday, Utc::now()) {
            tracing::warn!(branch_id = %id, date = %date, "Holiday already exists for date");
            return Err(e);
        }

        self.repo.save(branch).await?;
        tracing::info!(branch_id = %id, date = %date, "Holiday added successfully");
        Ok(())
    }

    async fn remove_holiday(&self, id: Uuid, date: NaiveDate) -> AppResult<()> {
        tracing::info!(branch_id = %id, date = %date, "Removing holiday");

        let mut branch = self.load(id).await?;
        if let Err(e) = branch.remove_holiday(date, Utc::now()) {
            tracing::warn!(branch_id = %id, date = %date, "No holiday found for date");
            return Err(e);
        }

        self.repo.save(branch).await?;
        tracing::info!(branch_id = %id, date = %date, "Holiday removed successfully");
        Ok(())
    }

    async fn list_holidays(&self, id: Uuid) -> AppResult<Vec<Holiday>> {
        tracing::info!(branch_id = %id, "Retrieving holidays");
        Ok(self.load(id).await?.branch_holidays)
    }

    async fn is_holiday(&self, id: Uuid, date: NaiveDate) -> AppResult<bool> {
        tracing::info!(branch_id = %id, date = %date, "Checking holiday");

        let is_holiday = self.load(id).await?.is_holiday(date);
        tracing::info!(branch_id = %id, date = %date, is_holiday, "Holiday check result");
        Ok(is_holiday)
    }
}
