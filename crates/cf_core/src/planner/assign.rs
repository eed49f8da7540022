//! Role assignor (single-pass greedy)
//!
//! 모든 (선수, 역할) 후보를 점수 내림차순으로 정렬한 뒤 쿼터를 넘지 않는
//! 후보만 순서대로 배정한다. Not globally optimal; deterministic because the
//! sort is stable over (roster index, catalog order).

use serde::Serialize;
use tracing::{debug, info};

use super::quota::Quota;
use super::summary::{PlanRow, TeamTotals};
use crate::roles::{empty_role_counts, is_feasible, role_value, Role, RoleCounts};
use crate::roster::Player;

/// Result of one assignment pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// One row per roster player, roster order
    pub rows: Vec<PlanRow>,
    pub role_counts: RoleCounts,
    pub totals: TeamTotals,
    /// Effective SB quota left unassigned
    pub remaining_sb: u32,
    /// Effective Mag quota left unassigned
    pub remaining_mag: u32,
}

impl Assignment {
    /// Build rows, counts and totals from a per-player role list
    /// (`roles[i]` belongs to `roster[i]`).
    pub fn from_roles(roster: &[Player], roles: &[Role], quota: &Quota) -> Self {
        let mut role_counts = empty_role_counts();
        let mut totals = TeamTotals::default();
        let mut rows = Vec::with_capacity(roster.len());

        for (player, role) in roster.iter().zip(roles) {
            let row = PlanRow::new(player, *role);
            totals.add_row(&row);
            *role_counts.entry(*role).or_insert(0) += 1;
            rows.push(row);
        }

        Self {
            rows,
            role_counts,
            totals,
            remaining_sb: quota.sb_required.saturating_sub(totals.sb_casts),
            remaining_mag: quota.mag_required.saturating_sub(totals.mag_casts),
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.rows.iter().map(|row| row.role)
    }

    pub fn count(&self, role: Role) -> u32 {
        self.role_counts.get(&role).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    player: usize,
    role: Role,
    value: u64,
}

/// Feasible (player, role) pairs, roster order then catalog order
fn collect_candidates(roster: &[Player], energy_cap: u32) -> Vec<Candidate> {
    roster
        .iter()
        .enumerate()
        .flat_map(|(player, p)| {
            Role::ASSIGNABLE
                .into_iter()
                .filter(move |role| is_feasible(p, *role, energy_cap))
                .map(move |role| Candidate { player, role, value: role_value(p, role) })
        })
        .collect()
}

pub fn assign_roles(roster: &[Player], quota: &Quota, energy_cap: u32) -> Assignment {
    let mut candidates = collect_candidates(roster, energy_cap);
    // sort_by 는 stable: 동점이면 열거 순서 유지
    candidates.sort_by(|a, b| b.value.cmp(&a.value));

    let mut assigned: Vec<Option<Role>> = vec![None; roster.len()];
    let mut remaining_sb = quota.sb_required;
    let mut remaining_mag = quota.mag_required;

    for candidate in &candidates {
        if remaining_sb == 0 && remaining_mag == 0 {
            break;
        }
        if assigned[candidate.player].is_some() {
            continue;
        }

        let spec = candidate.role.spec();
        if spec.sb_casts > remaining_sb || spec.mag_casts > remaining_mag {
            continue;
        }

        assigned[candidate.player] = Some(candidate.role);
        remaining_sb -= spec.sb_casts;
        remaining_mag -= spec.mag_casts;

        debug!(
            "Assigned {} -> {} ({} pts), remaining sb={} mag={}",
            roster[candidate.player].name,
            candidate.role,
            candidate.value,
            remaining_sb,
            remaining_mag
        );
    }

    let roles: Vec<Role> = assigned.into_iter().map(|r| r.unwrap_or(Role::Idle)).collect();
    let assignment = Assignment::from_roles(roster, &roles, quota);

    info!(
        "Greedy assignment: {} players, {} candidates, {} sb / {} mag casts, {} pts",
        roster.len(),
        candidates.len(),
        assignment.totals.sb_casts,
        assignment.totals.mag_casts,
        assignment.totals.total_points
    );

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::BracketKey;
    use crate::planner::quota::compute_quotas;

    fn quota(sb: u32, mag: u32) -> Quota {
        Quota { sb_required: sb, mag_required: mag, ..Quota::default() }
    }

    #[test]
    fn test_empty_roster() {
        let assignment = assign_roles(&[], &quota(10, 10), 21);
        assert!(assignment.rows.is_empty());
        assert_eq!(assignment.remaining_sb, 10);
        assert_eq!(assignment.remaining_mag, 10);
        assert_eq!(assignment.role_counts.len(), Role::ALL.len());
    }

    #[test]
    fn test_zero_capability_player_is_idle() {
        let roster = vec![Player::new("Zero", 0, 0), Player::new("Strong", 20, 20)];
        let assignment = assign_roles(&roster, &quota(30, 100), 50);

        let row = &assignment.rows[0];
        assert_eq!(row.role, Role::Idle);
        assert_eq!((row.sb_casts, row.mag_casts, row.energy_used), (0, 0, 0));
        assert_eq!(row.player_points, 0);
        assert_ne!(assignment.rows[1].role, Role::Idle);
    }

    #[test]
    fn test_picks_highest_value_role() {
        // SB 20 = 3550, Mag 1 = 300: SB-only (10650) beats 2 SB + 3 Mag (8000)
        let roster = vec![Player::new("Hitter", 20, 1)];
        let assignment = assign_roles(&roster, &quota(3, 10), 21);
        assert_eq!(assignment.rows[0].role, Role::SbOnly);
        assert_eq!(assignment.rows[0].player_points, 10650);
        assert_eq!(assignment.remaining_sb, 0);
        assert_eq!(assignment.remaining_mag, 10);
    }

    #[test]
    fn test_falls_back_when_quota_would_overflow() {
        // SB-only 은 sb 3 필요 -> sb 쿼터 2 이면 2 SB + 3 Mag 로 배정
        let roster = vec![Player::new("Hitter", 20, 1)];
        let assignment = assign_roles(&roster, &quota(2, 10), 21);
        assert_eq!(assignment.rows[0].role, Role::TwoSbThreeMag);
        assert_eq!(assignment.remaining_sb, 0);
        assert_eq!(assignment.remaining_mag, 7);
    }

    #[test]
    fn test_energy_cap_20_excludes_21_cost_roles() {
        let roster: Vec<Player> = (0..8).map(|i| Player::new(format!("P{}", i), 15, 15)).collect();
        let assignment = assign_roles(&roster, &quota(100, 100), 20);
        assert_eq!(assignment.count(Role::SbOnly), 0);
        assert_eq!(assignment.count(Role::OneSbSevenMag), 0);
        assert!(assignment.roles().all(|r| r.spec().energy_cost <= 20));
    }

    #[test]
    fn test_tie_break_is_roster_order() {
        let roster = vec![Player::new("First", 0, 5), Player::new("Second", 0, 5)];
        // 쿼터는 Mag-only 1명분
        let assignment = assign_roles(&roster, &quota(0, 10), 21);
        assert_eq!(assignment.rows[0].role, Role::MagOnly);
        assert_eq!(assignment.rows[1].role, Role::Idle);
    }

    #[test]
    fn test_bracket_19_scenario_respects_quota() {
        let mut roster: Vec<Player> =
            (0..5).map(|i| Player::new(format!("Hybrid {}", i), 10, 10)).collect();
        roster.extend((0..5).map(|i| Player::new(format!("Caster {}", i), 0, 10)));

        let q = compute_quotas(&roster, 21, BracketKey::B19.recipe());
        let assignment = assign_roles(&roster, &q, 21);

        assert_eq!(assignment.rows.len(), roster.len());
        assert!(assignment.totals.sb_casts <= q.sb_required);
        assert!(assignment.totals.mag_casts <= q.mag_required);
        assert_eq!(assignment.remaining_sb, q.sb_required - assignment.totals.sb_casts);
        assert_eq!(assignment.remaining_mag, q.mag_required - assignment.totals.mag_casts);
        let counted: u32 = assignment.role_counts.values().sum();
        assert_eq!(counted as usize, roster.len());
    }

    #[test]
    fn test_deterministic() {
        let roster: Vec<Player> = (0..12)
            .map(|i| Player::new(format!("P{}", i), (i % 4) as u8 * 5, (i % 3) as u8 * 7))
            .collect();
        let q = compute_quotas(&roster, 21, BracketKey::B25.recipe());
        assert_eq!(assign_roles(&roster, &q, 21), assign_roles(&roster, &q, 21));
    }
}
