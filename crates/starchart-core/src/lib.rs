//! Galaxy star-map content service for Starchart.
//!
//! This crate assembles the pure logic of `starchart-logic` into the service
//! hosts embed: session lifecycle, star classification, override bindings,
//! free-text filtering, bookmarks, and change notification. All state a host
//! must supply (regions, planets, quests, inventories, events, the calendar,
//! and session persistence) comes in through the collaborator traits.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`collaborators`] | Collaborator traits and the boundary data they exchange |
//! | [`error`] | [`GalaxyError`] |
//! | [`filter`] | Word-boundary text matching and the per-star result cache |
//! | [`overrides`] | Session-seeded override bindings for the reserved stars |
//! | [`service`] | [`GalaxyContent`], the facade hosts talk to |
//! | [`session`] | Visited flags and bookmarks behind [`SessionStore`] |
//! | [`signal`] | Star-changed fan-out |

pub mod collaborators;
pub mod error;
pub mod filter;
pub mod overrides;
pub mod service;
pub mod session;
pub mod signal;

pub use collaborators::{
    EventStatus, HolidayCalendar, InventorySource, Planet, PlanetSource, PlanetType, Product,
    QuestLog, Region, RegionLookup,
};
pub use error::GalaxyError;
pub use service::{Collaborators, GalaxyConfig, GalaxyContent};
pub use session::{SessionStore, StarMapStore};
pub use signal::StarChangedSignal;

pub use starchart_logic::faction::Faction;
pub use starchart_logic::poi::{PointOfInterest, PoiSet};
pub use starchart_logic::StarId;
