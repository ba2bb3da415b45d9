//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::branch_handler;
use crate::domain::{BranchResponse, BranchState, Holiday};

/// OpenAPI documentation for the branch registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Branch Registry",
        version = "0.1.0",
        description = "Bank branch records and their holiday calendars",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Branch endpoints
        branch_handler::list_branches,
        branch_handler::create_branch,
        branch_handler::get_branch,
        branch_handler::update_branch,
        // Holiday endpoints
        branch_handler::add_holiday,
        branch_handler::remove_holiday,
        branch_handler::list_holidays,
        branch_handler::is_holiday,
    ),
    components(
        schemas(
            // Domain types
            BranchState,
            BranchResponse,
            Holiday,
            // Request types
            branch_handler::CreateBranchRequest,
            branch_handler::UpdateBranchRequest,
            branch_handler::HolidayRequest,
        )
    ),
    tags(
        (name = "Branches", description = "Branch management"),
        (name = "Holidays", description = "Per-branch holiday calendar")
    )
)]
pub struct ApiDoc;
