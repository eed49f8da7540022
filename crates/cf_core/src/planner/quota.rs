//! Quota calculator
//!
//! 로스터 역량 기준으로 브래킷 레시피를 상한 처리한다.
//! Capacity is a linear estimate: every capable player contributes
//! `energy_cap / 7` SB slots and `energy_cap / 2` Mag slots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bracket::BracketRecipe;
use crate::roster::Player;

/// Energy per SB-heavy cast slot (approximation)
pub const SB_SLOT_ENERGY: u32 = 7;
/// Energy per Mag cast slot
pub const MAG_SLOT_ENERGY: u32 = 2;
/// Mag casts reserved per cycle before the marginal rate applies
pub const MAG_BASELINE_CASTS: u32 = 6;
/// Marginal Mag casts per additional cycle
pub const MAG_CASTS_PER_CYCLE: u32 = 3;

/// Recipe capped at what the roster can sustain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub sb_capacity: u32,
    pub mag_capacity: u32,
    pub max_cycles: u32,
    /// Effective SB casts to assign
    pub sb_required: u32,
    /// Effective Mag casts to assign
    pub mag_required: u32,
}

impl Quota {
    /// True when the roster can cover the whole nominal recipe
    pub fn covers(&self, recipe: &BracketRecipe) -> bool {
        self.sb_required >= recipe.sb_required && self.mag_required >= recipe.mag_required
    }
}

pub fn compute_quotas(roster: &[Player], energy_cap: u32, recipe: &BracketRecipe) -> Quota {
    let sb_players = roster.iter().filter(|p| p.can_sb()).count() as u32;
    let mag_players = roster.iter().filter(|p| p.can_mag()).count() as u32;

    let sb_capacity = sb_players.saturating_mul(energy_cap / SB_SLOT_ENERGY);
    let mag_capacity = mag_players.saturating_mul(energy_cap / MAG_SLOT_ENERGY);

    // (mag_capacity - 6) / 3, 음수면 0
    let mag_cycles = mag_capacity.saturating_sub(MAG_BASELINE_CASTS) / MAG_CASTS_PER_CYCLE;
    let max_cycles = sb_capacity.min(mag_cycles);

    let sb_required = recipe.sb_required.min(max_cycles);
    let mag_ceiling = MAG_BASELINE_CASTS
        .saturating_add(MAG_CASTS_PER_CYCLE.saturating_mul(max_cycles))
        .min(mag_capacity);
    let mag_required = recipe.mag_required.min(mag_ceiling);

    debug!(
        "Quota: sb_capacity={} mag_capacity={} max_cycles={} sb_required={}/{} mag_required={}/{}",
        sb_capacity,
        mag_capacity,
        max_cycles,
        sb_required,
        recipe.sb_required,
        mag_required,
        recipe.mag_required
    );

    Quota { sb_capacity, mag_capacity, max_cycles, sb_required, mag_required }
}
