//! Branch repository: the store-access interface and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::branch::{self, ActiveModel, Entity as BranchEntity};
use crate::domain::Branch;
use crate::errors::{AppError, AppResult};
use crate::infra::db;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Branch repository trait for dependency injection.
///
/// `save` is a compare-and-swap on `version`: it succeeds only if the
/// stored document still carries the version the caller loaded, and the
/// returned branch carries the incremented version.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// All branches, oldest first
    async fn find_all(&self) -> AppResult<Vec<Branch>>;

    /// Find branch by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>>;

    /// Check whether any branch uses this email address
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Insert a new branch document
    async fn insert(&self, branch: Branch) -> AppResult<Branch>;

    /// Replace an existing branch document if its version is unchanged
    async fn save(&self, branch: Branch) -> AppResult<Branch>;

    /// Connectivity probe
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM-backed branch repository
pub struct BranchStore {
    db: DatabaseConnection,
}

impl BranchStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-index violation on insert to the duplicate email error
fn map_insert_error(err: DbErr, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail(email.to_string()),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl BranchRepository for BranchStore {
    async fn find_all(&self) -> AppResult<Vec<Branch>> {
        let models = BranchEntity::find()
            .order_by_asc(branch::Column::CreationDate)
            .all(&self.db)
            .await?;

        models.into_iter().map(Branch::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        let result = BranchEntity::find_by_id(id).one(&self.db).await?;
        result.map(Branch::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = BranchEntity::find()
            .filter(branch::Column::EmailAddress.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn insert(&self, record: Branch) -> AppResult<Branch> {
        let email = record.email_address.clone();
        let model = ActiveModel::from(record)
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &email))?;

        Branch::try_from(model)
    }

    async fn save(&self, record: Branch) -> AppResult<Branch> {
        let id = record.id;
        let expected = record.version;

        let mut next = record;
        next.version = expected + 1;

        let result = BranchEntity::update(ActiveModel::from(next))
            .filter(branch::Column::Version.eq(expected))
            .exec(&self.db)
            .await;

        match result {
            Ok(model) => Branch::try_from(model),
            Err(DbErr::RecordNotUpdated) => {
                // Either the document is gone or someone saved first
                match self.find_by_id(id).await? {
                    Some(_) => Err(AppError::VersionConflict(id)),
                    None => Err(AppError::BranchNotFound(id.to_string())),
                }
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.db).await?;
        Ok(())
    }
}
