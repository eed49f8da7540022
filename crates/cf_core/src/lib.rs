//! # cf_core - Round Cycle Role Planner
//!
//! Plans role assignments for a cycle event: given a roster of players with
//! SB and Mag attack levels, computes the roster-capped cast quota for a
//! bracket and greedily assigns each player one role.
//!
//! ## Features
//! - Deterministic (same roster = same plan)
//! - Quota never exceeded by the greedy assignor
//! - CSV export in a fixed column order
//! - JSON API for easy integration with a roster editor

pub mod api;
pub mod bracket;
pub mod config;
pub mod error;
pub mod export;
pub mod planner;
pub mod roles;
pub mod roster;
pub mod scoring;

// Re-export main entry points
pub use api::{plan_cycle_json, PlanRequest, PlanResponse};
pub use bracket::{Bracket, BracketKey, BracketRecipe};
pub use config::{AssignStrategy, PlannerConfig};
pub use error::{ConfigError, ExportError, PlanError, Result, RosterError};
pub use export::{plan_to_csv_string, read_plan_csv, write_plan_csv};
pub use planner::{
    assign_by_layout, assign_roles, compute_quotas, plan_cycle, summarize, Assignment, CyclePlan,
    PlanRow, PlanSummary, Quota, TeamTotals,
};
pub use roles::{is_feasible, role_value, Role, RoleCounts};
pub use roster::{
    default_roster, read_roster_csv, validate_roster, Player, RawRoster, RosterCapability,
    ValidatedRoster,
};
pub use scoring::{points, AttackType};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
