//! Square-spiral galaxy layout.
//!
//! Star ids wind counter-clockwise around the home star in concentric square
//! rings. Ring `r` holds `8r` stars and spans ids `(2r-1)^2 .. (2r+1)^2`, so
//! the first few ids land like this:
//!
//! ```text
//!      y
//!      ^   4  3  2
//!      |   5  0  1
//!      |   6  7  8     (ring 1; id 9 starts ring 2 at x=2, y=-1)
//!      +--------> x
//! ```
//!
//! The mapping is pure arithmetic in both directions of use: id to grid cell
//! for rendering and region lookups, id to ring for difficulty. Display
//! positions add a small seeded jitter so the grid does not read as a grid.
//!
//! # Usage
//!
//! ```
//! use starchart_logic::layout;
//! use starchart_logic::rng::StarRng;
//!
//! let rng = StarRng::new(42);
//! assert_eq!(layout::grid_position(3), (0, 1));
//! assert_eq!(layout::ring_of(9), 2);
//! let (x, y) = layout::position(3, &rng);
//! assert!((x - 0.0).abs() <= 0.3 && (y - 1.0).abs() <= 0.3);
//! ```

use crate::constants::{
    star_count, HOME_STAR, LEVEL_JITTER, LEVEL_PER_RING, MAX_RING, STAR_JITTER, STAR_SPACING,
};
use crate::rng::StarRng;
use crate::StarId;

// Salts for the independent per-star jitter streams. Frozen.
const SALT_POSITION_X: u64 = 0x5354_4152_5f50_5831;
const SALT_POSITION_Y: u64 = 0x5354_4152_5f50_5932;
const SALT_LEVEL: u64 = 0x5354_4152_5f4c_5633;

/// True if `star_id` addresses a star inside the spiral's last full ring.
pub fn in_range(star_id: StarId) -> bool {
    star_id < star_count()
}

/// Ring index of a star: 0 for the home star, 1 for its eight neighbors,
/// and so on out to [`MAX_RING`].
pub fn ring_of(star_id: StarId) -> u32 {
    if star_id == HOME_STAR {
        0
    } else {
        (star_id.isqrt() + 1) / 2
    }
}

/// Grid cell of a star. The home star sits at the origin; ring `r` occupies
/// the square border where `max(|x|, |y|) == r`.
pub fn grid_position(star_id: StarId) -> (i32, i32) {
    if star_id == HOME_STAR {
        return (0, 0);
    }
    let r = ring_of(star_id) as i32;
    let side = 2 * r;
    let k = (star_id - (2 * r as u32 - 1).pow(2)) as i32;
    // Walk the ring border counter-clockwise from (r, -r+1).
    match k / side {
        0 => (r, -r + 1 + k),
        1 => (r - 1 - (k - side), r),
        2 => (-r, r - 1 - (k - 2 * side)),
        _ => (-r + 1 + (k - 3 * side), -r),
    }
}

/// Display position: grid cell scaled by [`STAR_SPACING`] plus a seeded
/// jitter of at most [`STAR_JITTER`] per axis. Stable for a given seed.
pub fn position(star_id: StarId, rng: &StarRng) -> (f32, f32) {
    let (gx, gy) = grid_position(star_id);
    let dx = (rng.unit(star_id, SALT_POSITION_X) - 0.5) * 2.0 * STAR_JITTER;
    let dy = (rng.unit(star_id, SALT_POSITION_Y) - 0.5) * 2.0 * STAR_JITTER;
    (gx as f32 * STAR_SPACING + dx, gy as f32 * STAR_SPACING + dy)
}

/// Difficulty level: [`LEVEL_PER_RING`] per ring plus a seeded jitter in
/// `0..=LEVEL_JITTER`. The home star is always level 0.
pub fn level(star_id: StarId, rng: &StarRng) -> u32 {
    if star_id == HOME_STAR {
        return 0;
    }
    ring_of(star_id) * LEVEL_PER_RING + rng.value_salted(star_id, SALT_LEVEL, LEVEL_JITTER + 1)
}
