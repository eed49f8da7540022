//! Attack scoring tables (levels 1-20)
//!
//! 레벨 0 = 사용 불가 (0점)

use serde::{Deserialize, Serialize};

/// 최대 공격 레벨
pub const MAX_LEVEL: u8 = 20;

const MAG_POINTS: [u32; MAX_LEVEL as usize] = [
    300, 330, 365, 400, 440, 485, 535, 590, 650, 715, //
    785, 865, 950, 1045, 1150, 1265, 1390, 1530, 1685, 1855,
];

const SB_POINTS: [u32; MAX_LEVEL as usize] = [
    700, 850, 1000, 1150, 1300, 1450, 1600, 1750, 1900, 2050, //
    2200, 2300, 2500, 2650, 2800, 2950, 3100, 3250, 3400, 3550,
];

/// 공격 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    #[serde(rename = "sb")]
    Sb,
    #[serde(rename = "mag")]
    Mag,
}

impl AttackType {
    pub fn label(&self) -> &'static str {
        match self {
            AttackType::Sb => "SB",
            AttackType::Mag => "Mag",
        }
    }

    fn table(&self) -> &'static [u32; MAX_LEVEL as usize] {
        match self {
            AttackType::Sb => &SB_POINTS,
            AttackType::Mag => &MAG_POINTS,
        }
    }
}

/// Points for a single cast of `attack` at `level`.
///
/// Returns 0 for level 0 or any level outside the table.
pub fn points(attack: AttackType, level: u8) -> u32 {
    if level == 0 {
        return 0;
    }
    attack
        .table()
        .get(usize::from(level) - 1)
        .copied()
        .unwrap_or(0)
}
