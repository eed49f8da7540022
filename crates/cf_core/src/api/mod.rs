pub mod plan_json;

pub use plan_json::{
    error_codes, plan_cycle_json, ApiError, ApiResponse, PlanRequest, PlanResponse,
    API_SCHEMA_VERSION,
};
