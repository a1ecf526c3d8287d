//! Collaborator seams and the boundary data they exchange.
//!
//! The galaxy service does not own regions, planets, quests, inventories,
//! event schedules, or the calendar. It asks for them through these traits,
//! which hosts implement over whatever state they keep. Everything is
//! synchronous and answers are expected to be cheap; the only fallible seams
//! are the ones backed by loadable data.

use serde::{Deserialize, Serialize};
use starchart_logic::faction::Faction;
use starchart_logic::StarId;

use crate::error::GalaxyError;

// ============================================================================
// BOUNDARY DATA
// ============================================================================

/// A contiguous patch of the galaxy grid under one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region id. [`Region::UNOCCUPIED_ID`] marks unclaimed space.
    pub id: u32,
    pub faction: Faction,
}

impl Region {
    /// Sentinel id for unclaimed space.
    pub const UNOCCUPIED_ID: u32 = 0;

    pub fn unoccupied() -> Self {
        Self {
            id: Self::UNOCCUPIED_ID,
            faction: Faction::Neutral,
        }
    }

    /// True when some faction holds this region. Only occupied home
    /// positions grow star bases.
    pub fn is_occupied(&self) -> bool {
        self.id != Self::UNOCCUPIED_ID
    }
}

/// Broad planet classification, as much as filtering needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlanetType {
    Barren = 0,
    Desert = 1,
    Ocean = 2,
    Terran = 3,
    Ice = 4,
    Volcanic = 5,
    GasGiant = 6,
}

/// A planet orbiting a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub kind: PlanetType,
}

/// A tradeable good, described by a stable identifier and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// Region ownership queries, backed by loadable map data.
pub trait RegionLookup {
    /// The region covering this star. Unclaimed space answers
    /// [`Region::unoccupied`], never an error.
    fn region_of(&self, star_id: StarId) -> Result<Region, GalaxyError>;

    /// True if this grid cell is a region's designated home cell, where an
    /// occupying faction builds its star base.
    fn is_home_position(&self, x: i32, y: i32) -> bool;
}

/// Seasonal calendar.
pub trait HolidayCalendar {
    fn is_christmas_now(&self) -> bool;
}

/// Active quest objectives keyed by star.
pub trait QuestLog {
    fn is_quest_objective(&self, star_id: StarId) -> bool;
}

/// Planets orbiting a star.
pub trait PlanetSource {
    fn planets_at(&self, star_id: StarId) -> Vec<Planet>;
}

/// Goods offered at tradeable locations.
pub trait InventorySource {
    /// Stock of the black market at this star, if one exists there.
    fn black_market_inventory(&self, star_id: StarId) -> Vec<Product>;

    /// Stock sold at a faction's star bases.
    fn faction_inventory(&self, region: &Region) -> Vec<Product>;
}

/// Live event scheduling. Event sites only matter while their event runs.
pub trait EventStatus {
    fn is_event_active(&self, star_id: StarId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unoccupied_region_is_the_neutral_sentinel() {
        let region = Region::unoccupied();
        assert!(!region.is_occupied());
        assert_eq!(region.id, Region::UNOCCUPIED_ID);
        assert!(region.faction.is_neutral());
    }

    #[test]
    fn claimed_regions_are_occupied() {
        let region = Region {
            id: 3,
            faction: Faction::Vanguard,
        };
        assert!(region.is_occupied());
    }

    #[test]
    fn products_build_from_any_string_pair() {
        let product = Product::new("ion_cells", "Ion Cells");
        assert_eq!(product.id, "ion_cells");
        assert_eq!(product.name, "Ion Cells");
    }
}
