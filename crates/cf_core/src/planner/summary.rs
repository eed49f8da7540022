//! Plan summarizer
//!
//! Per-player rows in roster order + team totals. Pure aggregation.

use serde::{Deserialize, Serialize};

use super::assign::Assignment;
use super::quota::Quota;
use crate::bracket::BracketRecipe;
use crate::roles::{role_points, Role, RoleCounts};
use crate::roster::Player;
use crate::scoring::{points, AttackType};

/// Plan table column order (CSV header)
pub const PLAN_COLUMNS: [&str; 12] = [
    "name",
    "sb_level",
    "mag_level",
    "role",
    "pts_per_sb",
    "pts_per_mag",
    "sb_casts",
    "mag_casts",
    "sb_points",
    "mag_points",
    "player_points",
    "energy_used",
];

/// One output row. Field order matches `PLAN_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    pub name: String,
    pub sb_level: u8,
    pub mag_level: u8,
    pub role: Role,
    pub pts_per_sb: u32,
    pub pts_per_mag: u32,
    pub sb_casts: u32,
    pub mag_casts: u32,
    pub sb_points: u64,
    pub mag_points: u64,
    pub player_points: u64,
    pub energy_used: u32,
}

impl PlanRow {
    pub fn new(player: &Player, role: Role) -> Self {
        let spec = role.spec();
        let (sb_points, mag_points) = role_points(player, role);
        Self {
            name: player.name.clone(),
            sb_level: player.sb_level,
            mag_level: player.mag_level,
            role,
            pts_per_sb: points(AttackType::Sb, player.sb_level),
            pts_per_mag: points(AttackType::Mag, player.mag_level),
            sb_casts: spec.sb_casts,
            mag_casts: spec.mag_casts,
            sb_points,
            mag_points,
            player_points: sb_points + mag_points,
            energy_used: spec.energy_cost,
        }
    }
}

/// Team totals over all rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub sb_casts: u32,
    pub mag_casts: u32,
    pub energy: u32,
    pub sb_points: u64,
    pub mag_points: u64,
    pub total_points: u64,
}

impl TeamTotals {
    pub fn add_row(&mut self, row: &PlanRow) {
        self.sb_casts += row.sb_casts;
        self.mag_casts += row.mag_casts;
        self.energy += row.energy_used;
        self.sb_points += row.sb_points;
        self.mag_points += row.mag_points;
        self.total_points += row.player_points;
    }

    pub fn of_rows(rows: &[PlanRow]) -> Self {
        rows.iter().fold(Self::default(), |mut totals, row| {
            totals.add_row(row);
            totals
        })
    }
}

/// Display-ready summary of one planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub recipe: BracketRecipe,
    pub quota: Quota,
    pub role_counts: RoleCounts,
    pub totals: TeamTotals,
    /// Effective quota left unassigned
    pub unmet_sb: u32,
    pub unmet_mag: u32,
    /// Missing casts versus the nominal (uncapped) recipe
    pub shortfall_sb: u32,
    pub shortfall_mag: u32,
}

impl PlanSummary {
    pub fn meets_recipe(&self) -> bool {
        self.shortfall_sb == 0 && self.shortfall_mag == 0
    }
}

pub fn summarize(assignment: &Assignment, quota: &Quota, recipe: &BracketRecipe) -> PlanSummary {
    let totals = TeamTotals::of_rows(&assignment.rows);

    PlanSummary {
        recipe: *recipe,
        quota: *quota,
        role_counts: assignment.role_counts.clone(),
        totals,
        unmet_sb: assignment.remaining_sb,
        unmet_mag: assignment.remaining_mag,
        shortfall_sb: recipe.sb_required.saturating_sub(totals.sb_casts),
        shortfall_mag: recipe.mag_required.saturating_sub(totals.mag_casts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::BracketKey;
    use crate::planner::assign::assign_roles;
    use crate::planner::quota::compute_quotas;

    #[test]
    fn test_row_for_idle_player_is_zero() {
        let row = PlanRow::new(&Player::new("Nobody", 0, 0), Role::Idle);
        assert_eq!(row.pts_per_sb, 0);
        assert_eq!(row.pts_per_mag, 0);
        assert_eq!(row.player_points, 0);
        assert_eq!(row.energy_used, 0);
    }

    #[test]
    fn test_row_rates_reported_even_when_unused() {
        // Mag-only 역할이어도 SB 단가는 표시
        let row = PlanRow::new(&Player::new("P", 4, 2), Role::MagOnly);
        assert_eq!(row.pts_per_sb, 1150);
        assert_eq!(row.pts_per_mag, 330);
        assert_eq!(row.sb_points, 0);
        assert_eq!(row.mag_points, 3300);
        assert_eq!(row.energy_used, 20);
    }

    #[test]
    fn test_summary_shortfall_vs_nominal_recipe() {
        let roster: Vec<Player> = (0..3).map(|i| Player::new(format!("P{}", i), 10, 10)).collect();
        let recipe = BracketKey::B19.recipe();
        let quota = compute_quotas(&roster, 21, recipe);
        let assignment = assign_roles(&roster, &quota, 21);
        let summary = summarize(&assignment, &quota, recipe);

        assert_eq!(summary.totals, TeamTotals::of_rows(&assignment.rows));
        assert_eq!(
            summary.totals.total_points,
            summary.totals.sb_points + summary.totals.mag_points
        );
        assert_eq!(summary.shortfall_sb, recipe.sb_required - summary.totals.sb_casts);
        assert_eq!(summary.shortfall_mag, recipe.mag_required - summary.totals.mag_casts);
        assert!(!summary.meets_recipe());
    }
}
