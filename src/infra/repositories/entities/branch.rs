//! Branch document entity for SeaORM.
//!
//! The holiday calendar is embedded in the branch row as a JSON array so
//! that every mutation of a branch is a single row write.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use crate::domain::{Branch, BranchState, Holiday};
use crate::errors::AppError;

/// Embedded, insertion-ordered holiday array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct HolidayDocuments(pub Vec<Holiday>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
    pub state: String,
    pub creation_date: DateTimeUtc,
    pub last_modified_date: DateTimeUtc,
    #[sea_orm(column_type = "JsonBinary")]
    pub branch_holidays: HolidayDocuments,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity; an unknown state is rejected
impl TryFrom<Model> for Branch {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Branch {
            id: model.id,
            email_address: model.email_address,
            name: model.name,
            phone_number: model.phone_number,
            state: model.state.parse::<BranchState>()?,
            creation_date: model.creation_date,
            last_modified_date: model.last_modified_date,
            branch_holidays: model.branch_holidays.0,
            version: model.version,
        })
    }
}

/// Full-document active model, every column set
impl From<Branch> for ActiveModel {
    fn from(branch: Branch) -> Self {
        ActiveModel {
            id: Set(branch.id),
            email_address: Set(branch.email_address),
            name: Set(branch.name),
            phone_number: Set(branch.phone_number),
            state: Set(branch.state.to_string()),
            creation_date: Set(branch.creation_date),
            last_modified_date: Set(branch.last_modified_date),
            branch_holidays: Set(HolidayDocuments(branch.branch_holidays)),
            version: Set(branch.version),
        }
    }
}
