//! The galaxy content facade.
//!
//! [`GalaxyContent`] is the one entry point hosts talk to. It owns the star
//! map state for a session (seed, override bindings, filter cache, bookmark
//! and visited flags behind the session store) and answers every per-star
//! question by deriving from the seed plus collaborator answers, never by
//! storing per-star content.
//!
//! Classification runs the same short pipeline on every query, in this
//! order: range check, star base, session override, rule table over the
//! per-star draw. A star base claims the star outright; an override binding
//! (even an empty one) claims it before any random content; the rule table
//! only speaks for stars nobody else claimed. Nothing along the way is
//! memoized, so repeated queries go through collaborators again; the one
//! exception is the filter cache, which is explicit, keyed to the filter
//! string, and deliberately stale against collaborator flips.

use serde::{Deserialize, Serialize};

use starchart_logic::constants::{DRAW_BOUND, HOME_STAR};
use starchart_logic::poi::{PointOfInterest, PoiSet};
use starchart_logic::rng::StarRng;
use starchart_logic::rules::{apply_rules, RuleContext};
use starchart_logic::{layout, names, StarId};

use crate::collaborators::{
    EventStatus, HolidayCalendar, InventorySource, PlanetSource, PlanetType, QuestLog, Region,
    RegionLookup,
};
use crate::error::GalaxyError;
use crate::filter::{self, FilterCache};
use crate::overrides::OverrideTable;
use crate::session::SessionStore;
use crate::signal::StarChangedSignal;

/// Host-build facts that tune classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GalaxyConfig {
    /// Whether this build supports premium currency purchases. Gates the
    /// military depot band of the rule table.
    pub premium_currency_enabled: bool,
}

/// The services a galaxy needs answers from, injected at construction.
pub struct Collaborators {
    pub regions: Box<dyn RegionLookup>,
    pub session: Box<dyn SessionStore>,
    pub holidays: Box<dyn HolidayCalendar>,
    pub quests: Box<dyn QuestLog>,
    pub planets: Box<dyn PlanetSource>,
    pub inventories: Box<dyn InventorySource>,
    pub events: Box<dyn EventStatus>,
}

/// Galaxy star-map content service.
pub struct GalaxyContent {
    config: GalaxyConfig,
    /// Per-star random source for the current session seed.
    rng: StarRng,
    /// Session override bindings for the reserved pool stars.
    overrides: OverrideTable,
    /// Per-star filter results for the current filter string.
    filter: FilterCache,
    /// Subscribers notified when a star's displayed content changes.
    changed: StarChangedSignal,

    regions: Box<dyn RegionLookup>,
    session: Box<dyn SessionStore>,
    holidays: Box<dyn HolidayCalendar>,
    quests: Box<dyn QuestLog>,
    planets: Box<dyn PlanetSource>,
    inventories: Box<dyn InventorySource>,
    events: Box<dyn EventStatus>,
}

impl GalaxyContent {
    /// Create a service with no session loaded yet. Star queries work (seed
    /// zero) but override bindings stay empty until [`load_session`].
    ///
    /// [`load_session`]: GalaxyContent::load_session
    pub fn new(config: GalaxyConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            regions,
            session,
            holidays,
            quests,
            planets,
            inventories,
            events,
        } = collaborators;
        Self {
            config,
            rng: StarRng::new(0),
            overrides: OverrideTable::new(),
            filter: FilterCache::new(),
            changed: StarChangedSignal::new(),
            regions,
            session,
            holidays,
            quests,
            planets,
            inventories,
            events,
        }
    }

    // ========================================================================
    // SESSION LIFECYCLE
    // ========================================================================

    /// Begin a session: reseed every derived stream, deal fresh override
    /// bindings, drop the filter wholesale, and mark the home star visited.
    /// Loading again with the same seed reproduces the same galaxy; loading
    /// with a new seed leaves nothing of the old one behind.
    pub fn load_session(&mut self, seed: u64) {
        let christmas = self.holidays.is_christmas_now();
        self.rng = StarRng::new(seed);
        self.overrides.rebuild(seed, christmas);
        self.filter.reset();
        self.session.set_visited(HOME_STAR);
        log::info!(
            "galaxy session loaded: seed={}, {} override bindings, christmas={}",
            seed,
            self.overrides.len(),
            christmas
        );
    }

    /// The seed of the loaded session (zero before the first load).
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // ========================================================================
    // GEOMETRY AND IDENTITY
    // ========================================================================

    /// Number of addressable stars.
    pub fn star_count(&self) -> u32 {
        starchart_logic::constants::star_count()
    }

    /// Jittered display position of a star.
    pub fn position(&self, star_id: StarId) -> Result<(f32, f32), GalaxyError> {
        self.check_range(star_id)?;
        Ok(layout::position(star_id, &self.rng))
    }

    /// Difficulty level of a star.
    pub fn level(&self, star_id: StarId) -> Result<u32, GalaxyError> {
        self.check_range(star_id)?;
        Ok(layout::level(star_id, &self.rng))
    }

    /// Display name of a star. Names depend only on the star id, not on
    /// the session.
    pub fn star_name(&self, star_id: StarId) -> Result<String, GalaxyError> {
        self.check_range(star_id)?;
        Ok(names::star_name(star_id))
    }

    /// The region covering a star.
    pub fn region_of(&self, star_id: StarId) -> Result<Region, GalaxyError> {
        self.check_range(star_id)?;
        self.regions.region_of(star_id)
    }

    // ========================================================================
    // CLASSIFICATION
    // ========================================================================

    /// Whether a faction star base sits at this star: the star's grid cell
    /// is a region home cell and the region is occupied.
    pub fn has_star_base(&self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        let (x, y) = layout::grid_position(star_id);
        if !self.regions.is_home_position(x, y) {
            return Ok(false);
        }
        Ok(self.regions.region_of(star_id)?.is_occupied())
    }

    /// Everything at this star, as a tag set. Most stars answer empty.
    pub fn points_of_interest(&self, star_id: StarId) -> Result<PoiSet, GalaxyError> {
        self.check_range(star_id)?;
        if self.has_star_base(star_id)? {
            return Ok(PoiSet::only(PointOfInterest::StarBase));
        }
        if let Some(bound) = self.overrides.lookup(star_id) {
            return Ok(bound);
        }
        let value = self.rng.value(star_id, DRAW_BOUND);
        let faction = self.regions.region_of(star_id)?.faction;
        let ctx = RuleContext {
            christmas: self.holidays.is_christmas_now(),
            premium: self.config.premium_currency_enabled,
        };
        Ok(apply_rules(value, faction, ctx))
    }

    // ========================================================================
    // SESSION STATE
    // ========================================================================

    pub fn is_visited(&self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        Ok(self.session.is_visited(star_id))
    }

    pub fn set_visited(&mut self, star_id: StarId) -> Result<(), GalaxyError> {
        self.check_range(star_id)?;
        self.session.set_visited(star_id);
        Ok(())
    }

    pub fn bookmark(&self, star_id: StarId) -> Result<Option<&str>, GalaxyError> {
        self.check_range(star_id)?;
        Ok(self.session.bookmark(star_id))
    }

    pub fn has_bookmark(&self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        Ok(self.session.has_bookmark(star_id))
    }

    /// Set or clear (empty text) a bookmark, then notify subscribers that
    /// the star changed.
    pub fn set_bookmark(&mut self, star_id: StarId, text: &str) -> Result<(), GalaxyError> {
        self.check_range(star_id)?;
        self.session.set_bookmark(star_id, text);
        self.changed.fire(star_id);
        Ok(())
    }

    pub fn is_quest_objective(&self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        Ok(self.quests.is_quest_objective(star_id))
    }

    /// Subscribe to star content changes. Fired on bookmark writes.
    pub fn on_star_changed(&mut self, subscriber: impl FnMut(StarId) + 'static) {
        self.changed.subscribe(subscriber);
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    /// The current filter string (empty when inactive).
    pub fn filter(&self) -> &str {
        self.filter.text()
    }

    /// Install a filter string. Re-setting the current string keeps every
    /// cached result; any other string drops them all.
    pub fn set_filter(&mut self, text: &str) {
        if self.filter.set_text(text) {
            log::debug!("star filter set to {:?}", text);
        }
    }

    /// Whether a star matches the current filter string, cached per star.
    /// The cached answer is already false everywhere while no filter is
    /// active, and stays as computed even if collaborator answers drift;
    /// it refreshes when the text changes or [`refresh_filter`] is called.
    ///
    /// [`refresh_filter`]: GalaxyContent::refresh_filter
    pub fn is_filtered(&mut self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        if let Some(cached) = self.filter.get(star_id) {
            return Ok(cached);
        }
        let matched = self.should_filter(star_id)? && self.filter.is_active();
        self.filter.put(star_id, matched);
        Ok(matched)
    }

    /// Recompute one star's filter result and overwrite its cache entry.
    /// For hosts that changed something they know affects the star.
    pub fn refresh_filter(&mut self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        let matched = self.should_filter(star_id)? && self.filter.is_active();
        self.filter.put(star_id, matched);
        Ok(matched)
    }

    /// Uncached filter predicate: does this star match the current filter
    /// string right now? Matches on bookmark text verbatim, terran planets,
    /// running events, and goods sold at the star.
    pub fn should_filter(&self, star_id: StarId) -> Result<bool, GalaxyError> {
        self.check_range(star_id)?;
        let text = self.filter.text();

        if let Some(mark) = self.session.bookmark(star_id) {
            if mark == text {
                return Ok(true);
            }
        }

        let pois = self.points_of_interest(star_id)?;

        if filter::mentions_terran(text) {
            let terran = self
                .planets
                .planets_at(star_id)
                .iter()
                .any(|planet| planet.kind == PlanetType::Terran);
            if terran {
                return Ok(true);
            }
        }

        if filter::mentions_event(text)
            && pois.contains(PointOfInterest::Event)
            && self.events.is_event_active(star_id)
        {
            return Ok(true);
        }

        if pois.contains(PointOfInterest::BlackMarket) {
            for product in self.inventories.black_market_inventory(star_id) {
                if filter::product_matches(text, &product.name, &product.id) {
                    return Ok(true);
                }
            }
        }

        if pois.contains(PointOfInterest::StarBase) {
            let region = self.regions.region_of(star_id)?;
            for product in self.inventories.faction_inventory(&region) {
                if filter::product_matches(text, &product.name, &product.id) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    fn check_range(&self, star_id: StarId) -> Result<(), GalaxyError> {
        if layout::in_range(star_id) {
            Ok(())
        } else {
            Err(GalaxyError::StarOutOfRange {
                star_id,
                star_count: self.star_count(),
            })
        }
    }
}
