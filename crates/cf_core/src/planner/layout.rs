//! Layout-driven assignment
//!
//! 브래킷 기본 배치(role split)를 역할 순서대로 채운다: 각 역할마다 남은 선수 중
//! 점수가 높은 순으로 `count`명 선택, 나머지는 가능하면 Mag-only, 아니면 Idle.
//! Follows the nominal layout, so the quota bound is NOT guaranteed here.

use tracing::info;

use super::assign::Assignment;
use super::quota::Quota;
use crate::bracket::Bracket;
use crate::roles::{is_feasible, role_value, Role};
use crate::roster::Player;

pub fn assign_by_layout(
    roster: &[Player],
    bracket: &Bracket,
    quota: &Quota,
    energy_cap: u32,
) -> Assignment {
    let mut assigned: Vec<Option<Role>> = vec![None; roster.len()];

    for &(role, count) in bracket.layout {
        let mut picks: Vec<(usize, u64)> = roster
            .iter()
            .enumerate()
            .filter(|(idx, p)| assigned[*idx].is_none() && is_feasible(p, role, energy_cap))
            .map(|(idx, p)| (idx, role_value(p, role)))
            .collect();
        picks.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in picks.into_iter().take(count as usize) {
            assigned[idx] = Some(role);
        }
    }

    let roles: Vec<Role> = roster
        .iter()
        .zip(assigned)
        .map(|(player, role)| match role {
            Some(role) => role,
            None if is_feasible(player, Role::MagOnly, energy_cap) => Role::MagOnly,
            None => Role::Idle,
        })
        .collect();

    let assignment = Assignment::from_roles(roster, &roles, quota);
    info!(
        "Layout assignment ({}): {} sb / {} mag casts, {} pts",
        bracket.key,
        assignment.totals.sb_casts,
        assignment.totals.mag_casts,
        assignment.totals.total_points
    );
    assignment
}
