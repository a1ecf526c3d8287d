//! Session-scoped star map state: visited flags and bookmarks.
//!
//! This is the only mutable per-star state the service touches. Hosts that
//! persist progress implement [`SessionStore`] over their own save data;
//! [`StarMapStore`] is the ready-made in-memory version used by tests, the
//! simtest harness, and hosts without their own persistence.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use starchart_logic::StarId;

/// Mutable per-star session state.
pub trait SessionStore {
    fn is_visited(&self, star_id: StarId) -> bool;

    /// Mark a star visited. Visits never un-happen within a session.
    fn set_visited(&mut self, star_id: StarId);

    /// The bookmark text on a star, if any. Stored bookmarks are never empty.
    fn bookmark(&self, star_id: StarId) -> Option<&str>;

    /// Set or clear a bookmark. Empty text clears.
    fn set_bookmark(&mut self, star_id: StarId, text: &str);

    fn has_bookmark(&self, star_id: StarId) -> bool {
        self.bookmark(star_id).is_some()
    }
}

/// In-memory [`SessionStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarMapStore {
    visited: HashSet<StarId>,
    bookmarks: HashMap<StarId, String>,
}

impl StarMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl SessionStore for StarMapStore {
    fn is_visited(&self, star_id: StarId) -> bool {
        self.visited.contains(&star_id)
    }

    fn set_visited(&mut self, star_id: StarId) {
        self.visited.insert(star_id);
    }

    fn bookmark(&self, star_id: StarId) -> Option<&str> {
        self.bookmarks.get(&star_id).map(String::as_str)
    }

    fn set_bookmark(&mut self, star_id: StarId, text: &str) {
        if text.is_empty() {
            self.bookmarks.remove(&star_id);
        } else {
            self.bookmarks.insert(star_id, text.to_owned());
        }
    }
}
