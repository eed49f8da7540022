//! Property-based tests for the quota + greedy assignment pipeline

use cf_core::{
    assign_roles, compute_quotas, plan_to_csv_string, points, read_plan_csv, AttackType,
    BracketKey, Player, Role,
};
use proptest::prelude::*;

fn player_strategy() -> impl Strategy<Value = Player> {
    ("[A-Za-z ]{0,12}", 0u8..=20, 0u8..=20)
        .prop_map(|(name, sb_level, mag_level)| Player { name, sb_level, mag_level })
}

fn roster_strategy() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(player_strategy(), 0..40)
}

fn bracket_strategy() -> impl Strategy<Value = BracketKey> {
    prop::sample::select(BracketKey::ALL.to_vec())
}

proptest! {
    /// Property: every player appears exactly once, in roster order
    #[test]
    fn prop_every_player_exactly_once(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let quota = compute_quotas(&roster, cap, bracket.recipe());
        let assignment = assign_roles(&roster, &quota, cap);

        prop_assert_eq!(assignment.rows.len(), roster.len());
        for (row, player) in assignment.rows.iter().zip(&roster) {
            prop_assert_eq!(&row.name, &player.name);
            prop_assert!(Role::ALL.contains(&row.role));
        }
        let counted: u32 = assignment.role_counts.values().sum();
        prop_assert_eq!(counted as usize, roster.len());
    }

    /// Property: assigned casts never exceed the effective quota
    #[test]
    fn prop_quota_never_exceeded(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let quota = compute_quotas(&roster, cap, bracket.recipe());
        let assignment = assign_roles(&roster, &quota, cap);

        let sb: u32 = assignment.rows.iter().map(|r| r.sb_casts).sum();
        let mag: u32 = assignment.rows.iter().map(|r| r.mag_casts).sum();
        prop_assert!(sb <= quota.sb_required);
        prop_assert!(mag <= quota.mag_required);
        prop_assert_eq!(assignment.remaining_sb, quota.sb_required - sb);
        prop_assert_eq!(assignment.remaining_mag, quota.mag_required - mag);
    }

    /// Property: effective quota never exceeds the nominal recipe
    #[test]
    fn prop_quota_capped_by_recipe(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let recipe = bracket.recipe();
        let quota = compute_quotas(&roster, cap, recipe);
        prop_assert!(quota.sb_required <= recipe.sb_required);
        prop_assert!(quota.mag_required <= recipe.mag_required);
        prop_assert!(quota.max_cycles <= quota.sb_capacity);
        prop_assert!(quota.mag_required <= quota.mag_capacity);
    }

    /// Property: roles over the energy cap or needing an unusable attack are never assigned
    #[test]
    fn prop_only_feasible_roles(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let quota = compute_quotas(&roster, cap, bracket.recipe());
        let assignment = assign_roles(&roster, &quota, cap);

        for (row, player) in assignment.rows.iter().zip(&roster) {
            let spec = row.role.spec();
            prop_assert!(spec.energy_cost <= cap);
            prop_assert!(spec.sb_casts == 0 || player.sb_level > 0);
            prop_assert!(spec.mag_casts == 0 || player.mag_level > 0);
            if player.sb_level == 0 && player.mag_level == 0 {
                prop_assert_eq!(row.role, Role::Idle);
                prop_assert_eq!(row.player_points, 0);
                prop_assert_eq!(row.energy_used, 0);
            }
        }
    }

    /// Property: same input, same plan
    #[test]
    fn prop_assignment_idempotent(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let quota = compute_quotas(&roster, cap, bracket.recipe());
        prop_assert_eq!(assign_roles(&roster, &quota, cap), assign_roles(&roster, &quota, cap));
    }

    /// Property: CSV export re-parses to the same rows
    #[test]
    fn prop_csv_roundtrip(
        roster in roster_strategy(),
        bracket in bracket_strategy(),
        cap in 1u32..=50
    ) {
        let quota = compute_quotas(&roster, cap, bracket.recipe());
        let assignment = assign_roles(&roster, &quota, cap);
        let csv = plan_to_csv_string(&assignment.rows).unwrap();
        let restored = read_plan_csv(csv.as_bytes()).unwrap();
        prop_assert_eq!(restored, assignment.rows);
    }
}

#[test]
fn test_points_table_exact() {
    let mag = [
        300, 330, 365, 400, 440, 485, 535, 590, 650, 715, 785, 865, 950, 1045, 1150, 1265, 1390,
        1530, 1685, 1855,
    ];
    let sb = [
        700, 850, 1000, 1150, 1300, 1450, 1600, 1750, 1900, 2050, 2200, 2300, 2500, 2650, 2800,
        2950, 3100, 3250, 3400, 3550,
    ];
    assert_eq!(points(AttackType::Mag, 0), 0);
    assert_eq!(points(AttackType::Sb, 0), 0);
    for level in 1..=20u8 {
        assert_eq!(points(AttackType::Mag, level), mag[level as usize - 1]);
        assert_eq!(points(AttackType::Sb, level), sb[level as usize - 1]);
    }
}

#[test]
fn test_energy_cap_20_blocks_21_cost_roles() {
    let roster: Vec<Player> = (0..25)
        .map(|i| Player::new(format!("P{}", i), 1 + (i % 20) as u8, 1 + (i % 7) as u8))
        .collect();
    let quota = compute_quotas(&roster, 20, BracketKey::B25.recipe());
    let assignment = assign_roles(&roster, &quota, 20);

    assert!(assignment
        .rows
        .iter()
        .all(|r| r.role != Role::SbOnly && r.role != Role::OneSbSevenMag));
}
