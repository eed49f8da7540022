//! Bracket recipes
//!
//! 브래킷별 요구 캐스트 수 + 기본 역할 배치 (정적 데이터, 변경 불가)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BracketKey {
    #[default]
    #[serde(rename = "13-opt1", alias = "13")]
    B13Opt1,
    #[serde(rename = "13-opt2")]
    B13Opt2,
    #[serde(rename = "19")]
    B19,
    #[serde(rename = "25")]
    B25,
}

/// Nominal (perfect-round) cast requirements of a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketRecipe {
    pub sb_required: u32,
    pub mag_required: u32,
    pub expected_kills: u32,
    /// Display only, e.g. "389 / 399"
    pub nominal_team_energy: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub key: BracketKey,
    pub recipe: BracketRecipe,
    /// Nominal role split in layout order
    pub layout: &'static [(Role, u32)],
}

const BRACKET_13_OPT1: Bracket = Bracket {
    key: BracketKey::B13Opt1,
    recipe: BracketRecipe {
        sb_required: 20,
        mag_required: 66,
        expected_kills: 21,
        nominal_team_energy: "272 / 273",
    },
    layout: &[(Role::SbOnly, 4), (Role::OneSbSevenMag, 8), (Role::MagOnly, 1)],
};

const BRACKET_13_OPT2: Bracket = Bracket {
    key: BracketKey::B13Opt2,
    recipe: BracketRecipe {
        sb_required: 20,
        mag_required: 66,
        expected_kills: 21,
        nominal_team_energy: "272 / 273",
    },
    layout: &[(Role::SbOnly, 3), (Role::OneSbSevenMag, 9), (Role::TwoSbThreeMag, 1)],
};

const BRACKET_19: Bracket = Bracket {
    key: BracketKey::B19,
    recipe: BracketRecipe {
        sb_required: 29,
        mag_required: 93,
        expected_kills: 30,
        nominal_team_energy: "389 / 399",
    },
    layout: &[
        (Role::SbOnly, 5),
        (Role::OneSbSevenMag, 4),
        (Role::MagOnly, 5),
        (Role::TwoSbThreeMag, 5),
    ],
};

const BRACKET_25: Bracket = Bracket {
    key: BracketKey::B25,
    recipe: BracketRecipe {
        sb_required: 39,
        mag_required: 123,
        expected_kills: 40,
        nominal_team_energy: "519 / 525",
    },
    layout: &[(Role::SbOnly, 10), (Role::OneSbSevenMag, 9), (Role::MagOnly, 6)],
};

impl BracketKey {
    pub const ALL: [BracketKey; 4] =
        [BracketKey::B13Opt1, BracketKey::B13Opt2, BracketKey::B19, BracketKey::B25];

    pub fn bracket(&self) -> &'static Bracket {
        match self {
            BracketKey::B13Opt1 => &BRACKET_13_OPT1,
            BracketKey::B13Opt2 => &BRACKET_13_OPT2,
            BracketKey::B19 => &BRACKET_19,
            BracketKey::B25 => &BRACKET_25,
        }
    }

    pub fn recipe(&self) -> &'static BracketRecipe {
        &self.bracket().recipe
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BracketKey::B13Opt1 => "13-opt1",
            BracketKey::B13Opt2 => "13-opt2",
            BracketKey::B19 => "19",
            BracketKey::B25 => "25",
        }
    }

    /// Bracket tier shown to the user ("13", "19", "25")
    pub fn tier(&self) -> &'static str {
        match self {
            BracketKey::B13Opt1 | BracketKey::B13Opt2 => "13",
            BracketKey::B19 => "19",
            BracketKey::B25 => "25",
        }
    }
}

impl fmt::Display for BracketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BracketKey {
    type Err = ConfigError;

    /// "13" 은 Opt 1 로 해석
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "13" | "13-opt1" | "13-opt 1" | "13-1" => Ok(BracketKey::B13Opt1),
            "13-opt2" | "13-opt 2" | "13-2" => Ok(BracketKey::B13Opt2),
            "19" => Ok(BracketKey::B19),
            "25" => Ok(BracketKey::B25),
            other => Err(ConfigError::UnknownBracket(other.to_string())),
        }
    }
}

impl Bracket {
    /// Total players the nominal layout expects
    pub fn layout_players(&self) -> u32 {
        self.layout.iter().map(|(_, count)| count).sum()
    }

    /// Cast totals implied by the nominal layout as (sb, mag)
    pub fn layout_casts(&self) -> (u32, u32) {
        self.layout.iter().fold((0, 0), |(sb, mag), (role, count)| {
            let spec = role.spec();
            (sb + spec.sb_casts * count, mag + spec.mag_casts * count)
        })
    }

    /// Energy spent by the nominal layout
    pub fn layout_energy(&self) -> u32 {
        self.layout.iter().map(|(role, count)| role.spec().energy_cost * count).sum()
    }
}
