//! The random point-of-interest rule table.
//!
//! Stars with no base and no session override get their content from a single
//! draw in `[0, DRAW_BOUND)` pushed through this table. Each rule claims a
//! half-open band of draw values and a gate; every rule whose band holds the
//! draw and whose gate is open adds its tag to the result. The bands here do
//! not overlap, so random content is at most one tag wide, but the evaluator
//! makes no such assumption.
//!
//! The band edges and gate cuts are frozen tuning data. In particular the
//! Boss band keeps its lopsided shape: occupied stars qualify across all of
//! `[400, 450)` while neutral stars only qualify in the `[400, 420)` slice.

use crate::faction::Faction;
use crate::poi::{PointOfInterest, PoiSet};

/// Session facts the gates read alongside the star's faction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleContext {
    /// Seasonal calendar says the Christmas window is open.
    pub christmas: bool,
    /// The host build supports premium currency purchases.
    pub premium: bool,
}

/// Eligibility gate for one rule.
#[derive(Debug, Clone, Copy)]
enum Gate {
    /// Any star.
    Always,
    /// Only stars in neutral space.
    NeutralOnly,
    /// Only stars in occupied space.
    OccupiedOnly,
    /// Occupied stars across the whole band, neutral stars below the cut.
    OccupiedOrBelow(u32),
    /// Only when premium currency is supported.
    Premium,
    /// Only inside the seasonal window.
    Christmas,
}

struct PoiRule {
    /// Half-open draw band `[lo, hi)`.
    lo: u32,
    hi: u32,
    gate: Gate,
    grants: PointOfInterest,
}

/// Frozen tuning table. Reordering or renumbering reshuffles every galaxy.
const RULES: &[PoiRule] = &[
    PoiRule { lo: 100, hi: 125, gate: Gate::Always, grants: PointOfInterest::Wormhole },
    PoiRule { lo: 200, hi: 300, gate: Gate::NeutralOnly, grants: PointOfInterest::Event },
    PoiRule { lo: 300, hi: 325, gate: Gate::NeutralOnly, grants: PointOfInterest::Survival },
    PoiRule { lo: 350, hi: 375, gate: Gate::OccupiedOnly, grants: PointOfInterest::Arena },
    PoiRule { lo: 400, hi: 450, gate: Gate::OccupiedOrBelow(420), grants: PointOfInterest::Boss },
    PoiRule { lo: 450, hi: 475, gate: Gate::NeutralOnly, grants: PointOfInterest::Ruins },
    PoiRule { lo: 500, hi: 510, gate: Gate::Premium, grants: PointOfInterest::Military },
    PoiRule { lo: 550, hi: 570, gate: Gate::Always, grants: PointOfInterest::Challenge },
    PoiRule { lo: 600, hi: 650, gate: Gate::OccupiedOnly, grants: PointOfInterest::Hive },
    PoiRule { lo: 700, hi: 720, gate: Gate::NeutralOnly, grants: PointOfInterest::BlackMarket },
    PoiRule { lo: 800, hi: 810, gate: Gate::Christmas, grants: PointOfInterest::Xmas },
];

/// Evaluate the rule table for one draw.
pub fn apply_rules(value: u32, faction: Faction, ctx: RuleContext) -> PoiSet {
    let mut set = PoiSet::empty();
    for rule in RULES {
        if value < rule.lo || value >= rule.hi {
            continue;
        }
        let open = match rule.gate {
            Gate::Always => true,
            Gate::NeutralOnly => faction.is_neutral(),
            Gate::OccupiedOnly => !faction.is_neutral(),
            Gate::OccupiedOrBelow(cut) => !faction.is_neutral() || value < cut,
            Gate::Premium => ctx.premium,
            Gate::Christmas => ctx.christmas,
        };
        if open {
            set.insert(rule.grants);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointOfInterest::*;

    fn neutral(value: u32) -> PoiSet {
        apply_rules(value, Faction::Neutral, RuleContext::default())
    }

    fn occupied(value: u32) -> PoiSet {
        apply_rules(value, Faction::Concord, RuleContext::default())
    }

    #[test]
    fn most_draws_are_empty() {
        assert!(neutral(0).is_empty());
        assert!(neutral(99).is_empty());
        assert!(neutral(130).is_empty());
        assert!(neutral(999).is_empty());
        assert!(occupied(250).is_empty());
    }

    #[test]
    fn wormholes_ignore_faction() {
        assert_eq!(neutral(100), PoiSet::only(Wormhole));
        assert_eq!(neutral(124), PoiSet::only(Wormhole));
        assert_eq!(occupied(110), PoiSet::only(Wormhole));
        assert!(neutral(125).is_empty());
    }

    #[test]
    fn events_only_in_neutral_space() {
        assert_eq!(neutral(200), PoiSet::only(Event));
        assert_eq!(neutral(250), PoiSet::only(Event));
        assert_eq!(neutral(299), PoiSet::only(Event));
        assert!(occupied(250).is_empty());
    }

    #[test]
    fn survival_band_starts_where_events_end() {
        assert_eq!(neutral(299), PoiSet::only(Event));
        assert_eq!(neutral(300), PoiSet::only(Survival));
        assert_eq!(neutral(324), PoiSet::only(Survival));
        assert!(neutral(325).is_empty());
    }

    #[test]
    fn arenas_only_on_occupied_stars() {
        assert_eq!(occupied(350), PoiSet::only(Arena));
        assert_eq!(occupied(374), PoiSet::only(Arena));
        assert!(neutral(360).is_empty());
    }

    #[test]
    fn boss_band_is_wider_for_occupied_stars() {
        assert_eq!(neutral(400), PoiSet::only(Boss));
        assert_eq!(neutral(419), PoiSet::only(Boss));
        assert!(neutral(420).is_empty());
        assert!(neutral(449).is_empty());
        assert_eq!(occupied(400), PoiSet::only(Boss));
        assert_eq!(occupied(420), PoiSet::only(Boss));
        assert_eq!(occupied(449), PoiSet::only(Boss));
        assert!(occupied(450).is_empty());
    }

    #[test]
    fn ruins_only_in_neutral_space() {
        assert_eq!(neutral(450), PoiSet::only(Ruins));
        assert_eq!(neutral(474), PoiSet::only(Ruins));
        assert!(occupied(460).is_empty());
    }

    #[test]
    fn military_depots_need_premium_support() {
        let premium = RuleContext { premium: true, ..Default::default() };
        assert_eq!(apply_rules(500, Faction::Neutral, premium), PoiSet::only(Military));
        assert_eq!(apply_rules(509, Faction::Vanguard, premium), PoiSet::only(Military));
        assert!(neutral(505).is_empty());
    }

    #[test]
    fn challenges_ignore_faction() {
        assert_eq!(neutral(550), PoiSet::only(Challenge));
        assert_eq!(occupied(569), PoiSet::only(Challenge));
        assert!(neutral(570).is_empty());
    }

    #[test]
    fn hives_only_on_occupied_stars() {
        assert_eq!(occupied(600), PoiSet::only(Hive));
        assert_eq!(occupied(649), PoiSet::only(Hive));
        assert!(neutral(625).is_empty());
    }

    #[test]
    fn black_markets_only_in_neutral_space() {
        assert_eq!(neutral(700), PoiSet::only(BlackMarket));
        assert_eq!(neutral(719), PoiSet::only(BlackMarket));
        assert!(occupied(710).is_empty());
    }

    #[test]
    fn xmas_band_needs_the_seasonal_window() {
        let season = RuleContext { christmas: true, ..Default::default() };
        assert_eq!(apply_rules(800, Faction::Neutral, season), PoiSet::only(Xmas));
        assert_eq!(apply_rules(809, Faction::Reavers, season), PoiSet::only(Xmas));
        assert!(neutral(805).is_empty());
        assert!(occupied(805).is_empty());
    }

    #[test]
    fn random_content_is_never_a_star_base() {
        let everything = RuleContext { christmas: true, premium: true };
        for value in 0..1000 {
            for faction in [Faction::Neutral, Faction::Syndicate] {
                let set = apply_rules(value, faction, everything);
                assert!(!set.contains(StarBase), "draw {value}");
                assert!(set.len() <= 1, "draw {value} produced {set:?}");
            }
        }
    }
}
