//! Session override bindings for the reserved narrative stars.
//!
//! Each session, the fixed pool of eligible stars is shuffled with a stream
//! RNG seeded from the session seed, and content slots are dealt to the
//! shuffled order: one slot per star until the slots run out. Pool stars left
//! without a slot are bound to the explicit empty set, which silences their
//! random content. That distinction matters: an unbound star falls through to
//! the rule table, an empty-bound star does not.
//!
//! The shuffle is the one place sequence-style randomness is correct: it runs
//! once per session load over a short list, and the result is held in a map
//! keyed by star id, so query order never touches it.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starchart_logic::constants::OVERRIDE_POOL;
use starchart_logic::poi::{PointOfInterest, PoiSet};
use starchart_logic::StarId;

/// Content slots dealt to the shuffled pool, in deal order. The Christmas
/// slot is appended behind these only inside the seasonal window.
const SLOTS: &[PointOfInterest] = &[
    PointOfInterest::Ruins,
    PointOfInterest::BlackMarket,
    PointOfInterest::Challenge,
    PointOfInterest::Boss,
    PointOfInterest::Event,
    PointOfInterest::Event,
    PointOfInterest::Event,
    PointOfInterest::Survival,
    PointOfInterest::Wormhole,
];

/// Per-session star content bindings.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    bindings: HashMap<StarId, PoiSet>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all bindings and deal fresh ones for a session. Every pool
    /// star ends up bound: first to the slots in deal order, the rest to
    /// the empty set.
    pub fn rebuild(&mut self, session_seed: u64, christmas: bool) {
        self.bindings.clear();

        let mut pool = OVERRIDE_POOL.to_vec();
        let mut rng = ChaCha8Rng::seed_from_u64(session_seed);
        pool.shuffle(&mut rng);

        let mut order = pool.into_iter();
        for &slot in SLOTS {
            if let Some(star) = order.next() {
                self.bindings.insert(star, PoiSet::only(slot));
            }
        }
        if christmas {
            if let Some(star) = order.next() {
                self.bindings.insert(star, PoiSet::only(PointOfInterest::Xmas));
            }
        }
        for star in order {
            self.bindings.insert(star, PoiSet::empty());
        }
    }

    /// The binding for a star, or `None` if the star is not in the pool
    /// (or no session has been dealt yet).
    pub fn lookup(&self, star_id: StarId) -> Option<PoiSet> {
        self.bindings.get(&star_id).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (StarId, PoiSet)> + '_ {
        self.bindings.iter().map(|(&star, &set)| (star, set))
    }
}
