//! Role catalog
//!
//! 5개 고정 역할 (캐스트 수, 에너지 비용). 선언 순서 = 카탈로그 순서 = 동점 처리 순서.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::roster::Player;
use crate::scoring::{points, AttackType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SB-only")]
    SbOnly,
    #[serde(rename = "1 SB + 7 Mag")]
    OneSbSevenMag,
    #[serde(rename = "2 SB + 3 Mag")]
    TwoSbThreeMag,
    #[serde(rename = "Mag-only")]
    MagOnly,
    #[serde(rename = "Idle")]
    Idle,
}

/// Cast counts and energy cost of one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub sb_casts: u32,
    pub mag_casts: u32,
    pub energy_cost: u32,
}

impl Role {
    /// Full catalog in catalog order
    pub const ALL: [Role; 5] =
        [Role::SbOnly, Role::OneSbSevenMag, Role::TwoSbThreeMag, Role::MagOnly, Role::Idle];

    /// Everything except Idle
    pub const ASSIGNABLE: [Role; 4] =
        [Role::SbOnly, Role::OneSbSevenMag, Role::TwoSbThreeMag, Role::MagOnly];

    pub fn spec(&self) -> RoleSpec {
        let (sb_casts, mag_casts, energy_cost) = match self {
            Role::SbOnly => (3, 0, 21),
            Role::OneSbSevenMag => (1, 7, 21),
            Role::TwoSbThreeMag => (2, 3, 20),
            Role::MagOnly => (0, 10, 20),
            Role::Idle => (0, 0, 0),
        };
        RoleSpec { sb_casts, mag_casts, energy_cost }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::SbOnly => "SB-only",
            Role::OneSbSevenMag => "1 SB + 7 Mag",
            Role::TwoSbThreeMag => "2 SB + 3 Mag",
            Role::MagOnly => "Mag-only",
            Role::Idle => "Idle",
        }
    }

    /// Label used in role-count listings
    pub fn display_label(&self) -> &'static str {
        match self {
            Role::SbOnly => "SB-only players",
            Role::OneSbSevenMag => "1 SB / 7 Mag players",
            Role::TwoSbThreeMag => "2 SB / 3 Mag players",
            Role::MagOnly => "Mag-only players",
            Role::Idle => "Idle players",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownRole(s.to_string()))
    }
}

/// Whether `player` may take `role` under `energy_cap`.
pub fn is_feasible(player: &Player, role: Role, energy_cap: u32) -> bool {
    let spec = role.spec();
    if spec.energy_cost > energy_cap {
        return false;
    }
    if spec.sb_casts > 0 && !player.can_sb() {
        return false;
    }
    if spec.mag_casts > 0 && !player.can_mag() {
        return false;
    }
    true
}

/// Points earned by `player` in `role`, split as (sb_points, mag_points).
pub fn role_points(player: &Player, role: Role) -> (u64, u64) {
    let spec = role.spec();
    let sb = u64::from(points(AttackType::Sb, player.sb_level)) * u64::from(spec.sb_casts);
    let mag = u64::from(points(AttackType::Mag, player.mag_level)) * u64::from(spec.mag_casts);
    (sb, mag)
}

pub fn role_value(player: &Player, role: Role) -> u64 {
    let (sb, mag) = role_points(player, role);
    sb + mag
}

/// Role → player count. Every catalog role is present (possibly 0).
pub type RoleCounts = BTreeMap<Role, u32>;

pub fn empty_role_counts() -> RoleCounts {
    Role::ALL.into_iter().map(|role| (role, 0)).collect()
}
