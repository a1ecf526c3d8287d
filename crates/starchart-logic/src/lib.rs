//! Pure star-map logic for Starchart.
//!
//! This crate contains all galaxy-map logic that is independent of any host
//! application, storage, or UI. Functions take plain data and return results,
//! making them unit-testable and portable between the game client, headless
//! tools, and the simtest harness.
//!
//! Everything here is deterministic: the same seed and star id always produce
//! the same position, level, name, and random draw, no matter how many times
//! or in what order the host asks.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Frozen tuning values (grid extent, draw bound, override pool) |
//! | [`faction`] | Region-controlling factions (u8 IDs, neutral sentinel) |
//! | [`layout`] | Square-spiral id-to-grid mapping, positions, levels |
//! | [`names`] | Deterministic syllable-built star names |
//! | [`poi`] | Point-of-interest tags and the compact tag set |
//! | [`rng`] | Keyed per-star random draws (call-order independent) |
//! | [`rules`] | The ordered random point-of-interest rule table |

pub mod constants;
pub mod faction;
pub mod layout;
pub mod names;
pub mod poi;
pub mod rng;
pub mod rules;

/// Stars are addressed by a dense id starting at 0 (the home star) and
/// spiralling outward. See [`layout`] for the id-to-grid mapping.
pub type StarId = u32;
