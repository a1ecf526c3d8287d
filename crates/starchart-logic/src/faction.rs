//! Factions that control galaxy regions.
//!
//! A star inherits the faction of the region it sits in. Classification only
//! ever asks one question of a faction: is the star in neutral space or not.
//! The richer metadata is for map display and host-side flavor.

use serde::{Deserialize, Serialize};

/// Region-controlling power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Faction {
    /// Unclaimed space. The sentinel for every unoccupied region.
    Neutral = 0,
    /// The Concord - the settled core worlds.
    Concord = 1,
    /// The Syndicate - smuggler clans of the outer lanes.
    Syndicate = 2,
    /// The Vanguard - militarized frontier expansion fleets.
    Vanguard = 3,
    /// The Reavers - raider bands in the deep rim.
    Reavers = 4,
    /// The Custodians - machine caretakers of the dead worlds.
    Custodians = 5,
}

/// Faction display metadata.
#[derive(Debug, Clone)]
pub struct FactionInfo {
    pub name: &'static str,
    /// Map tint as RGB.
    pub color: (u8, u8, u8),
}

impl Faction {
    /// True for unclaimed space. Several classification rules only apply to
    /// neutral stars, and several others only to occupied ones.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }

    pub fn info(&self) -> FactionInfo {
        match self {
            Self::Neutral => FactionInfo {
                name: "Neutral",
                color: (140, 140, 140),
            },
            Self::Concord => FactionInfo {
                name: "Concord",
                color: (80, 140, 220),
            },
            Self::Syndicate => FactionInfo {
                name: "Syndicate",
                color: (190, 120, 40),
            },
            Self::Vanguard => FactionInfo {
                name: "Vanguard",
                color: (70, 170, 90),
            },
            Self::Reavers => FactionInfo {
                name: "Reavers",
                color: (200, 60, 60),
            },
            Self::Custodians => FactionInfo {
                name: "Custodians",
                color: (150, 90, 200),
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Neutral),
            1 => Some(Self::Concord),
            2 => Some(Self::Syndicate),
            3 => Some(Self::Vanguard),
            4 => Some(Self::Reavers),
            5 => Some(Self::Custodians),
            _ => None,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_roundtrips() {
        for v in 0..6u8 {
            let faction = Faction::from_u8(v).unwrap();
            assert_eq!(faction as u8, v);
        }
        assert_eq!(Faction::from_u8(6), None);
    }

    #[test]
    fn only_the_sentinel_is_neutral() {
        assert!(Faction::Neutral.is_neutral());
        for v in 1..6u8 {
            assert!(!Faction::from_u8(v).unwrap().is_neutral());
        }
    }

    #[test]
    fn display_uses_info_name() {
        assert_eq!(Faction::Syndicate.to_string(), "Syndicate");
    }
}
