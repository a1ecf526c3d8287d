//! Frozen tuning values for the galaxy map.
//!
//! Star content is derived from these numbers at query time, so changing any
//! of them silently reshuffles every existing galaxy. Treat the whole module
//! as save-format data.

use crate::StarId;

/// Per-star random draws fall in `[0, DRAW_BOUND)`.
pub const DRAW_BOUND: u32 = 1000;

/// The galaxy is a square spiral of this many full rings around the home
/// star. Ids at and beyond the last ring's end are out of range.
pub const MAX_RING: u32 = 64;

/// Star id 0, the center of the spiral. Always level 0, always visited.
pub const HOME_STAR: StarId = 0;

/// Grid cell pitch in map units.
pub const STAR_SPACING: f32 = 1.0;

/// Maximum per-axis jitter applied to a star's display position.
pub const STAR_JITTER: f32 = 0.3;

/// Difficulty levels gained per spiral ring.
pub const LEVEL_PER_RING: u32 = 2;

/// Upper bound (inclusive) of the per-star level jitter.
pub const LEVEL_JITTER: u32 = 2;

/// Stars eligible for session override bindings, all within the first two
/// rings. Order matters only as shuffle input.
pub const OVERRIDE_POOL: [StarId; 18] = [
    1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 14, 16, 17, 18, 21, 22, 23,
];

/// Total number of addressable stars: a `(2*MAX_RING+1)` sided square.
pub const fn star_count() -> u32 {
    let side = 2 * MAX_RING + 1;
    side * side
}
