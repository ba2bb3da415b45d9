//! Branch and holiday calendar handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{not_blank, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::config::MSG_NOT_NULL;
use crate::domain::{BranchPatch, BranchResponse, Holiday, NewBranch};
use crate::errors::{AppError, AppResult};

/// Branch creation request.
///
/// Text fields default to empty so an omitted field is reported by the
/// blank check rather than by the JSON parser.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    /// Branch email address, unique across branches
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        email(message = "must be a well-formed email address")
    )]
    #[schema(example = "centro@banquito.com")]
    pub email_address: String,
    /// Commercial name
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Agencia Centro")]
    pub name: String,
    /// Contact phone
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "022555666")]
    pub phone_number: String,
}

/// Branch update request. Only the phone number can change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchRequest {
    /// New contact phone
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "0991234567")]
    pub phone_number: String,
}

/// Holiday creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HolidayRequest {
    /// Holiday date
    #[validate(required(message = "must not be null"))]
    #[schema(value_type = String, format = Date, example = "2025-12-25")]
    pub date: Option<NaiveDate>,
    /// Holiday name
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Navidad")]
    pub name: String,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HolidayDateQuery {
    /// Calendar date, `YYYY-MM-DD`
    #[param(value_type = String, format = Date, example = "2025-12-25")]
    pub date: NaiveDate,
}

impl From<CreateBranchRequest> for NewBranch {
    fn from(req: CreateBranchRequest) -> Self {
        NewBranch {
            email_address: req.email_address,
            name: req.name,
            phone_number: req.phone_number,
        }
    }
}

impl From<UpdateBranchRequest> for BranchPatch {
    fn from(req: UpdateBranchRequest) -> Self {
        BranchPatch {
            phone_number: Some(req.phone_number),
        }
    }
}

impl TryFrom<HolidayRequest> for Holiday {
    type Error = AppError;

    fn try_from(req: HolidayRequest) -> AppResult<Self> {
        let date = req
            .date
            .ok_or_else(|| AppError::field("date", MSG_NOT_NULL))?;
        Ok(Holiday::new(date, req.name))
    }
}

/// A path segment that is not a UUID cannot name a stored branch
fn branch_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BranchNotFound(raw.to_string()))
}

/// Create branch routes
pub fn branch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_branches).post(create_branch))
        .route("/:id", get(get_branch).put(update_branch))
        .route(
            "/:id/holidays",
            get(list_holidays).post(add_holiday).delete(remove_holiday),
        )
        .route("/:id/isHoliday", get(is_holiday))
}

/// List all branches
#[utoipa::path(
    get,
    path = "/api/v1/branches",
    tag = "Branches",
    responses(
        (status = 200, description = "All registered branches", body = Vec<BranchResponse>)
    )
)]
pub async fn list_branches(State(state): State<AppState>) -> AppResult<Json<Vec<BranchResponse>>> {
    let branches = state.branch_service.list_branches().await?;
    Ok(Json(branches.into_iter().map(BranchResponse::from).collect()))
}

/// Create a branch, ACTIVE with no holidays
#[utoipa::path(
    post,
    path = "/api/v1/branches",
    tag = "Branches",
    request_body = CreateBranchRequest,
    responses(
        (status = 200, description = "Branch created", body = BranchResponse),
        (status = 400, description = "Invalid data or duplicate email")
    )
)]
pub async fn create_branch(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBranchRequest>,
) -> AppResult<Json<BranchResponse>> {
    let branch = state.branch_service.create_branch(payload.into()).await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Get branch by ID
#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}",
    tag = "Branches",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch found", body = BranchResponse),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BranchResponse>> {
    let branch = state.branch_service.get_branch(branch_id(&id)?).await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Update the branch phone number
#[utoipa::path(
    put,
    path = "/api/v1/branches/{id}",
    tag = "Branches",
    params(("id" = Uuid, Path, description = "Branch ID")),
    request_body = UpdateBranchRequest,
    responses(
        (status = 200, description = "Branch updated", body = BranchResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBranchRequest>,
) -> AppResult<Json<BranchResponse>> {
    let branch = state
        .branch_service
        .update_branch(branch_id(&id)?, payload.into())
        .await?;
    Ok(Json(BranchResponse::from(branch)))
}

/// Add a holiday to the branch calendar
#[utoipa::path(
    post,
    path = "/api/v1/branches/{id}/holidays",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Branch ID")),
    request_body = HolidayRequest,
    responses(
        (status = 200, description = "Holiday added"),
        (status = 400, description = "Holiday already exists for that date"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn add_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<HolidayRequest>,
) -> AppResult<StatusCode> {
    state
        .branch_service
        .add_holiday(branch_id(&id)?, Holiday::try_from(payload)?)
        .await?;
    Ok(StatusCode::OK)
}

/// Remove the holiday on a date
#[utoipa::path(
    delete,
    path = "/api/v1/branches/{id}/holidays",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Branch ID"), HolidayDateQuery),
    responses(
        (status = 200, description = "Holiday removed"),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Branch or holiday not found")
    )
)]
pub async fn remove_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<HolidayDateQuery>,
) -> AppResult<StatusCode> {
    state
        .branch_service
        .remove_holiday(branch_id(&id)?, query.date)
        .await?;
    Ok(StatusCode::OK)
}

/// List the branch holidays in stored order
#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}/holidays",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch holidays", body = Vec<Holiday>),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn list_holidays(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Holiday>>> {
    let holidays = state.branch_service.list_holidays(branch_id(&id)?).await?;
    Ok(Json(holidays))
}

/// Check whether a date is a holiday for the branch
#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}/isHoliday",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Branch ID"), HolidayDateQuery),
    responses(
        (status = 200, description = "True when the date is a holiday", body = bool),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn is_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<HolidayDateQuery>,
) -> AppResult<Json<bool>> {
    let result = state
        .branch_service
        .is_holiday(branch_id(&id)?, query.date)
        .await?;
    Ok(Json(result))
}
