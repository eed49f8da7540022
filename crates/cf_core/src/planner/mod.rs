//! Cycle planner pipeline
//!
//! roster + bracket + energy cap → quota → assignment → summary.
//! Every run is recomputed from scratch; nothing is cached between runs.

pub mod assign;
pub mod layout;
pub mod quota;
pub mod summary;

pub use assign::{assign_roles, Assignment};
pub use layout::assign_by_layout;
pub use quota::{compute_quotas, Quota};
pub use summary::{summarize, PlanRow, PlanSummary, TeamTotals, PLAN_COLUMNS};

use serde::Serialize;
use tracing::info;

use crate::config::{AssignStrategy, PlannerConfig};
use crate::error::ConfigError;
use crate::roster::{Player, RosterCapability};

/// Complete, immutable result of one planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclePlan {
    pub config: PlannerConfig,
    pub capability: RosterCapability,
    pub quota: Quota,
    pub assignment: Assignment,
    pub summary: PlanSummary,
}

impl CyclePlan {
    pub fn rows(&self) -> &[PlanRow] {
        &self.assignment.rows
    }
}

/// Run the whole pipeline for an already validated roster.
pub fn plan_cycle(roster: &[Player], config: &PlannerConfig) -> Result<CyclePlan, ConfigError> {
    config.validate()?;

    let bracket = config.bracket.bracket();
    let capability = RosterCapability::of(roster);
    let quota = compute_quotas(roster, config.energy_cap, &bracket.recipe);

    let assignment = match config.strategy {
        AssignStrategy::Quota => assign_roles(roster, &quota, config.energy_cap),
        AssignStrategy::Layout => assign_by_layout(roster, bracket, &quota, config.energy_cap),
    };
    let summary = summarize(&assignment, &quota, &bracket.recipe);

    info!(
        "Planned bracket {} (cap {}, {}): {} pts, shortfall sb={} mag={}",
        config.bracket,
        config.energy_cap,
        config.strategy,
        summary.totals.total_points,
        summary.shortfall_sb,
        summary.shortfall_mag
    );

    Ok(CyclePlan { config: *config, capability, quota, assignment, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::BracketKey;
    use crate::roles::Role;

    #[test]
    fn test_plan_cycle_rejects_bad_cap() {
        let config = PlannerConfig::new(BracketKey::B19, 0);
        assert!(plan_cycle(&[], &config).is_err());
    }

    #[test]
    fn test_plan_cycle_default_roster_all_idle() {
        let roster = crate::roster::default_roster();
        let plan = plan_cycle(&roster, &PlannerConfig::default()).unwrap();
        assert_eq!(plan.rows().len(), 10);
        assert_eq!(plan.assignment.count(Role::Idle), 10);
        assert_eq!(plan.summary.totals.total_points, 0);
        assert_eq!(plan.capability.idle_only, 10);
    }

    #[test]
    fn test_strategies_differ_only_in_assignment() {
        let roster: Vec<Player> = (0..19).map(|i| Player::new(format!("P{}", i), 12, 12)).collect();
        let quota_plan = plan_cycle(&roster, &PlannerConfig::new(BracketKey::B19, 21)).unwrap();
        let layout_plan = plan_cycle(
            &roster,
            &PlannerConfig::new(BracketKey::B19, 21).with_strategy(AssignStrategy::Layout),
        )
        .unwrap();

        assert_eq!(quota_plan.quota, layout_plan.quota);
        assert_eq!(layout_plan.assignment.count(Role::SbOnly), 5);
        assert!(quota_plan.assignment.totals.sb_casts <= quota_plan.quota.sb_required);
    }
}
