//! Branch aggregate and its embedded holiday calendar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{BRANCH_STATE_ACTIVE, INITIAL_VERSION};
use crate::errors::{AppError, AppResult};

/// Branch lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BranchState {
    Active,
}

impl std::str::FromStr for BranchState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BRANCH_STATE_ACTIVE => Ok(BranchState::Active),
            other => Err(AppError::internal(format!("unknown branch state: {}", other))),
        }
    }
}

impl std::fmt::Display for BranchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchState::Active => write!(f, "{}", BRANCH_STATE_ACTIVE),
        }
    }
}

/// One non-business day of a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    /// Calendar date, unique within a branch
    #[schema(value_type = String, format = Date, example = "2025-12-25")]
    pub date: NaiveDate,
    /// Free-text label
    #[schema(example = "Navidad")]
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Branch domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: Uuid,
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
    pub state: BranchState,
    pub creation_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    /// Insertion-ordered, no two entries share a date
    pub branch_holidays: Vec<Holiday>,
    /// Optimistic concurrency counter, owned by the store
    pub version: i64,
}

/// Fields required to open a branch
#[derive(Debug, Clone)]
pub struct NewBranch {
    pub email_address: String,
    pub name: String,
    pub phone_number: String,
}

/// The fields a branch update may change. Anything not named here is
/// left as loaded.
#[derive(Debug, Clone, Default)]
pub struct BranchPatch {
    pub phone_number: Option<String>,
}

impl Branch {
    /// Open a new ACTIVE branch with an empty calendar.
    pub fn open(new: NewBranch, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email_address: new.email_address,
            name: new.name,
            phone_number: new.phone_number,
            state: BranchState::Active,
            creation_date: now,
            last_modified_date: now,
            branch_holidays: Vec::new(),
            version: INITIAL_VERSION,
        }
    }

    /// Merge a patch onto the loaded record and stamp the modification time.
    pub fn apply(&mut self, patch: BranchPatch, now: DateTime<Utc>) {
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        self.last_modified_date = now;
    }

    /// Check whether `date` is one of this branch's holidays
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.branch_holidays.iter().any(|h| h.date == date)
    }

    /// Append a holiday, rejecting a date that is already taken.
    pub fn add_holiday(&mut self, holiday: Holiday, now: DateTime<Utc>) -> AppResult<()> {
        if self.is_holiday(holiday.date) {
            return Err(AppError::DuplicateHoliday(holiday.date));
        }
        self.branch_holidays.push(holiday);
        self.last_modified_date = now;
        Ok(())
    }

    /// Remove the holiday on `date`, failing if there is none.
    pub fn remove_holiday(&mut self, date: NaiveDate, now: DateTime<Utc>) -> AppResult<Holiday> {
        let position = self
            .branch_holidays
            .iter()
            .position(|h| h.date == date)
            .ok_or(AppError::HolidayNotFound(date))?;

        let removed = self.branch_holidays.remove(position);
        self.last_modified_date = now;
        Ok(removed)
    }
}

/// Branch view returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    /// Unique branch identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "centro@banquito.com")]
    pub email_address: String,
    #[schema(example = "Agencia Centro")]
    pub name: String,
    #[schema(example = "022555666")]
    pub phone_number: String,
    pub state: BranchState,
    pub creation_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub branch_holidays: Vec<Holiday>,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            email_address: branch.email_address,
            name: branch.name,
            phone_number: branch.phone_number,
            state: branch.state,
            creation_date: branch.creation_date,
            last_modified_date: branch.last_modified_date,
            branch_holidays: branch.branch_holidays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn centro() -> Branch {
        Branch::open(
            NewBranch {
                email_address: "a@b.com".to_string(),
                name: "Centro".to_string(),
                phone_number: "022555666".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn open_branch_is_active_and_empty() {
        let branch = centro();
        assert_eq!(branch.state, BranchState::Active);
        assert!(branch.branch_holidays.is_empty());
        assert_eq!(branch.creation_date, branch.last_modified_date);
        assert_eq!(branch.version, INITIAL_VERSION);
    }

    #[test]
    fn state_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&BranchState::Active).unwrap(), "\"ACTIVE\"");
        assert_eq!(BranchState::Active.to_string(), "ACTIVE");
    }

    #[test]
    fn state_parses_only_known_values() {
        assert_eq!("ACTIVE".parse::<BranchState>().unwrap(), BranchState::Active);
        assert!(matches!("active".parse::<BranchState>(), Err(AppError::Internal(_))));
        assert!(matches!("CLOSED".parse::<BranchState>(), Err(AppError::Internal(_))));
    }

    #[test]
    fn add_holiday_keeps_insertion_order() {
        let mut branch = centro();
        let now = Utc::now();
        branch.add_holiday(Holiday::new(date(2025, 12, 25), "Navidad"), now).unwrap();
        branch.add_holiday(Holiday::new(date(2025, 1, 1), "Año Nuevo"), now).unwrap();

        let dates: Vec<_> = branch.branch_holidays.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![date(2025, 12, 25), date(2025, 1, 1)]);
    }

    #[test]
    fn duplicate_date_is_rejected_without_change() {
        let mut branch = centro();
        let first = Utc::now();
        branch.add_holiday(Holiday::new(date(2025, 12, 25), "Navidad"), first).unwrap();
        let before = branch.clone();

        let later = first + Duration::seconds(5);
        let result = branch.add_holiday(Holiday::new(date(2025, 12, 25), "Otra"), later);

        assert!(matches!(result, Err(AppError::DuplicateHoliday(d)) if d == date(2025, 12, 25)));
        assert_eq!(branch, before);
    }

    #[test]
    fn remove_missing_date_is_rejected_without_change() {
        let mut branch = centro();
        branch.add_holiday(Holiday::new(date(2025, 12, 25), "Navidad"), Utc::now()).unwrap();
        let before = branch.clone();

        let result = branch.remove_holiday(date(2025, 12, 24), Utc::now());

        assert!(matches!(result, Err(AppError::HolidayNotFound(_))));
        assert_eq!(branch, before);
    }

    #[test]
    fn add_then_remove_toggles_membership() {
        let mut branch = centro();
        let christmas = date(2025, 12, 25);

        branch.add_holiday(Holiday::new(christmas, "Navidad"), Utc::now()).unwrap();
        assert!(branch.is_holiday(christmas));
        assert!(!branch.is_holiday(date(2025, 12, 24)));

        let removed = branch.remove_holiday(christmas, Utc::now()).unwrap();
        assert_eq!(removed.name, "Navidad");
        assert!(!branch.is_holiday(christmas));
        assert!(branch.branch_holidays.is_empty());
    }

    #[test]
    fn mutations_refresh_last_modified_only() {
        let mut branch = centro();
        let created = branch.creation_date;
        let later = created + Duration::minutes(1);

        branch.add_holiday(Holiday::new(date(2025, 5, 1), "Trabajo"), later).unwrap();
        assert_eq!(branch.last_modified_date, later);
        assert_eq!(branch.creation_date, created);

        let latest = later + Duration::minutes(1);
        branch.remove_holiday(date(2025, 5, 1), latest).unwrap();
        assert_eq!(branch.last_modified_date, latest);
    }

    #[test]
    fn patch_changes_phone_and_nothing_else() {
        let mut branch = centro();
        branch.add_holiday(Holiday::new(date(2025, 12, 25), "Navidad"), Utc::now()).unwrap();
        let before = branch.clone();
        let now = before.last_modified_date + Duration::seconds(30);

        branch.apply(
            BranchPatch {
                phone_number: Some("0991234567".to_string()),
            },
            now,
        );

        assert_eq!(branch.phone_number, "0991234567");
        assert_eq!(branch.last_modified_date, now);
        assert_eq!(branch.email_address, before.email_address);
        assert_eq!(branch.name, before.name);
        assert_eq!(branch.state, before.state);
        assert_eq!(branch.creation_date, before.creation_date);
        assert_eq!(branch.branch_holidays, before.branch_holidays);
        assert_eq!(branch.version, before.version);
    }

    #[test]
    fn response_uses_camel_case_fields() {
        let json = serde_json::to_value(BranchResponse::from(centro())).unwrap();
        assert_eq!(json["emailAddress"], "a@b.com");
        assert_eq!(json["phoneNumber"], "022555666");
        assert_eq!(json["state"], "ACTIVE");
        assert_eq!(json["branchHolidays"], serde_json::json!([]));
        assert!(json.get("creationDate").is_some());
        assert!(json.get("lastModifiedDate").is_some());
        assert!(json.get("version").is_none());
    }
}
