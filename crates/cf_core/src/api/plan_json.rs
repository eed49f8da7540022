// 사이클 계획 JSON API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info, warn};

use crate::config::{AssignStrategy, PlannerConfig, DEFAULT_ENERGY_CAP};
use crate::error::{ConfigError, PlanError};
use crate::export::plan_to_csv_string;
use crate::planner::{plan_cycle, CyclePlan, PlanRow, PlanSummary, Quota};
use crate::roles::RoleCounts;
use crate::roster::{validate_roster, RawRoster, RosterCapability, SanitizeReport};

pub const API_SCHEMA_VERSION: &str = "v1";

pub mod error_codes {
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const ASSIGNMENT_FAILED: &str = "ASSIGNMENT_FAILED";
}

/// Standard response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.get_or_insert_with(HashMap::new).insert(key.to_string(), value);
        self
    }

    fn from_plan_error(err: &PlanError) -> Self {
        Self::new(err.code(), &err.to_string())
            .with_detail("recoverable", Value::Bool(err.is_recoverable()))
    }
}

/// Plan request from the roster editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub schema_version: Option<String>,
    /// "13", "13-opt2", "19", "25"
    pub bracket: String,
    pub energy_cap: Option<u32>,
    pub strategy: Option<String>,
    /// Editable roster rows; missing keys/nulls are allowed
    pub roster: Vec<Map<String, Value>>,
    #[serde(default)]
    pub include_csv: bool,
}

impl PlanRequest {
    pub fn to_config(&self) -> Result<PlannerConfig, PlanError> {
        if let Some(version) = self.schema_version.as_deref() {
            if version != API_SCHEMA_VERSION {
                return Err(ConfigError::UnsupportedSchemaVersion(version.to_string()).into());
            }
        }

        let mut config = PlannerConfig::new(
            self.bracket.parse()?,
            self.energy_cap.unwrap_or(DEFAULT_ENERGY_CAP),
        );
        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.parse::<AssignStrategy>()?;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub config: PlannerConfig,
    pub capability: RosterCapability,
    pub sanitize: SanitizeReport,
    pub quota: Quota,
    pub role_counts: RoleCounts,
    pub summary: PlanSummary,
    pub rows: Vec<PlanRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
}

impl PlanResponse {
    fn new(plan: CyclePlan, sanitize: SanitizeReport, csv: Option<String>) -> Self {
        Self {
            config: plan.config,
            capability: plan.capability,
            sanitize,
            quota: plan.quota,
            role_counts: plan.assignment.role_counts,
            summary: plan.summary,
            rows: plan.assignment.rows,
            csv,
        }
    }
}

fn run_plan(request: &PlanRequest) -> Result<PlanResponse, PlanError> {
    let config = request.to_config()?;
    let validated = validate_roster(&RawRoster::from_json_rows(&request.roster))?;
    let plan = plan_cycle(&validated.players, &config)?;

    let csv = if request.include_csv { Some(plan_to_csv_string(plan.rows())?) } else { None };
    Ok(PlanResponse::new(plan, validated.report, csv))
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string())
}

/// Plan a cycle from a JSON request string
///
/// # Arguments
/// * `request_json` - JSON string containing PlanRequest
///
/// # Returns
/// JSON string containing ApiResponse<PlanResponse>. Never panics: an
/// unexpected failure inside the run is reported as `ASSIGNMENT_FAILED`.
pub fn plan_cycle_json(request_json: &str) -> String {
    info!("Processing cycle plan request");

    let request: PlanRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse PlanRequest: {}", e);
            let error = ApiError::new(error_codes::INVALID_JSON, &format!("Invalid JSON format: {}", e));
            return to_json(&ApiResponse::<PlanResponse>::error(error));
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_plan(&request)));

    match outcome {
        Ok(Ok(response)) => {
            info!(
                "Planned {} players for bracket {}",
                response.rows.len(),
                response.config.bracket
            );
            to_json(&ApiResponse::success(response))
        }
        Ok(Err(err)) => {
            warn!("Cycle plan request rejected: {}", err);
            to_json(&ApiResponse::<PlanResponse>::error(ApiError::from_plan_error(&err)))
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown error".to_string());
            error!("Cycle plan panicked: {}", reason);
            let error = ApiError::new(
                error_codes::ASSIGNMENT_FAILED,
                &format!("Assignment failed: {}", reason),
            );
            to_json(&ApiResponse::<PlanResponse>::error(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(request: Value) -> Value {
        serde_json::from_str(&plan_cycle_json(&request.to_string())).unwrap()
    }

    #[test]
    fn test_plan_success() {
        let response = call(json!({
            "bracket": "19",
            "energy_cap": 21,
            "roster": [
                {"name": "A", "sb_level": 10, "mag_level": 10},
                {"name": "B", "sb_level": 0, "mag_level": 10},
                {"name": "C", "sb_level": 0, "mag_level": 0}
            ],
            "include_csv": true
        }));

        assert_eq!(response["success"], true);
        assert_eq!(response["schema_version"], API_SCHEMA_VERSION);
        let data = &response["data"];
        assert_eq!(data["rows"].as_array().unwrap().len(), 3);
        assert_eq!(data["rows"][2]["role"], "Idle");
        assert_eq!(data["config"]["bracket"], "19");
        assert_eq!(data["capability"]["sb_capable"], 1);
        assert!(data["csv"].as_str().unwrap().starts_with("name,sb_level,mag_level,role"));
    }

    #[test]
    fn test_invalid_json() {
        let response: Value = serde_json::from_str(&plan_cycle_json("{not json")).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], error_codes::INVALID_JSON);
    }

    #[test]
    fn test_missing_column() {
        let response = call(json!({
            "bracket": "13",
            "roster": [{"name": "A", "sb_level": 3}]
        }));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], error_codes::MISSING_COLUMN);
        assert!(response["error"]["message"].as_str().unwrap().contains("mag_level"));
    }

    #[test]
    fn test_invalid_config() {
        let response = call(json!({"bracket": "99", "roster": []}));
        assert_eq!(response["error"]["code"], error_codes::INVALID_CONFIG);

        let response = call(json!({"bracket": "25", "energy_cap": 80, "roster": []}));
        assert_eq!(response["error"]["code"], error_codes::INVALID_CONFIG);
    }

    #[test]
    fn test_schema_version_checked() {
        let response = call(json!({"schema_version": "v2", "bracket": "19", "roster": []}));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], error_codes::INVALID_CONFIG);
        assert!(response["error"]["message"].as_str().unwrap().contains("v2"));

        let response = call(json!({"schema_version": "v1", "bracket": "19", "roster": []}));
        assert_eq!(response["success"], true);
    }

    #[test]
    fn test_empty_roster_plans_zero_quota() {
        let response = call(json!({"bracket": "19", "energy_cap": 21, "roster": []}));

        assert_eq!(response["success"], true);
        let data = &response["data"];
        assert!(data["rows"].as_array().unwrap().is_empty());
        for field in ["sb_capacity", "mag_capacity", "max_cycles", "sb_required", "mag_required"] {
            assert_eq!(data["quota"][field], 0, "quota.{}", field);
        }
        assert_eq!(data["summary"]["totals"]["total_points"], 0);
        assert_eq!(data["summary"]["shortfall_sb"], 29);
    }

    #[test]
    fn test_bad_levels_are_coerced_not_rejected() {
        let response = call(json!({
            "bracket": "13",
            "roster": [{"name": "A", "sb_level": "x", "mag_level": null}]
        }));
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["sanitize"]["invalid_cells"], 1);
        assert_eq!(response["data"]["sanitize"]["blank_cells"], 1);
        assert_eq!(response["data"]["rows"][0]["role"], "Idle");
    }
}
