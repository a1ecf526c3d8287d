//! Point-of-interest tags and the compact tag set.
//!
//! A star's content is described as a set of tags. The set is usually empty,
//! occasionally a single tag, and by construction never holds [`StarBase`]
//! together with anything else. [`PoiSet`] packs the tags into a `u16` so
//! hosts can copy, compare, and serialize star content as one small value.
//!
//! [`StarBase`]: PointOfInterest::StarBase

use serde::{Deserialize, Serialize};

/// A kind of content a star can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PointOfInterest {
    /// Long-range travel gate.
    Wormhole = 0,
    /// Timed activity, only meaningful while the live event runs.
    Event = 1,
    /// Endurance combat encounter.
    Survival = 2,
    /// Dueling arena, hosted on occupied stars.
    Arena = 3,
    /// Flagship encounter.
    Boss = 4,
    /// Explorable derelict site.
    Ruins = 5,
    /// Faction military depot, gated on premium currency support.
    Military = 6,
    /// Fixed-loadout challenge fight.
    Challenge = 7,
    /// Alien hive infestation.
    Hive = 8,
    /// Unlicensed trader.
    BlackMarket = 9,
    /// Seasonal celebration site.
    Xmas = 10,
    /// Faction star base. Exclusive: a base star carries nothing else.
    StarBase = 11,
}

impl PointOfInterest {
    /// Every tag, in discriminant order.
    pub const ALL: [PointOfInterest; 12] = [
        Self::Wormhole,
        Self::Event,
        Self::Survival,
        Self::Arena,
        Self::Boss,
        Self::Ruins,
        Self::Military,
        Self::Challenge,
        Self::Hive,
        Self::BlackMarket,
        Self::Xmas,
        Self::StarBase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wormhole => "Wormhole",
            Self::Event => "Event",
            Self::Survival => "Survival",
            Self::Arena => "Arena",
            Self::Boss => "Boss",
            Self::Ruins => "Ruins",
            Self::Military => "Military",
            Self::Challenge => "Challenge",
            Self::Hive => "Hive",
            Self::BlackMarket => "BlackMarket",
            Self::Xmas => "Xmas",
            Self::StarBase => "StarBase",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`PointOfInterest`] tags packed into one `u16`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiSet(u16);

impl PoiSet {
    pub const EMPTY: PoiSet = PoiSet(0);

    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// The set holding exactly one tag.
    pub fn only(poi: PointOfInterest) -> Self {
        Self(poi.bit())
    }

    pub fn insert(&mut self, poi: PointOfInterest) {
        self.0 |= poi.bit();
    }

    pub fn contains(&self, poi: PointOfInterest) -> bool {
        self.0 & poi.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Tags in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = PointOfInterest> {
        PointOfInterest::ALL
            .into_iter()
            .filter(move |poi| self.0 & poi.bit() != 0)
    }
}

impl FromIterator<PointOfInterest> for PoiSet {
    fn from_iter<I: IntoIterator<Item = PointOfInterest>>(iter: I) -> Self {
        let mut set = Self::empty();
        for poi in iter {
            set.insert(poi);
        }
        set
    }
}

impl std::fmt::Debug for PoiSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
