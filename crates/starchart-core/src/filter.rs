//! Free-text star filtering: word matching and the per-star result cache.
//!
//! The filter string is matched on whitespace-delimited words, never on
//! substrings, so "terra" does not light up terran-planet stars. Two fixed
//! keyword probes ("terran", "event") are compiled once; product probes are
//! built per product from escaped names, since inventories are host data.
//!
//! Results are cached per star for the current filter string only. Setting
//! the same string again keeps the cache; any new string drops all of it.
//! Cached entries deliberately survive changes in collaborator answers (a
//! live event ending, inventory restocks) until the text changes or a host
//! refreshes the star it touched.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use starchart_logic::StarId;

lazy_static! {
    // The two fixed keyword probes, compiled once. Lowercase only.
    static ref TERRAN_WORD: Regex = Regex::new(r"(^|\s)terran(\s|$)").unwrap();
    static ref EVENT_WORD: Regex = Regex::new(r"(^|\s)event(\s|$)").unwrap();
}

/// True if the filter text contains "terran" as a whole word.
pub fn mentions_terran(filter: &str) -> bool {
    TERRAN_WORD.is_match(filter)
}

/// True if the filter text contains "event" as a whole word.
pub fn mentions_event(filter: &str) -> bool {
    EVENT_WORD.is_match(filter)
}

/// True if the product's display name or identifier appears in the filter
/// text as a whole word. Case-insensitive; the probe is escaped, so product
/// names cannot smuggle in pattern syntax.
pub fn product_matches(filter: &str, name: &str, id: &str) -> bool {
    if filter.is_empty() {
        return false;
    }
    let pattern = format!(
        r"(?i)(^|\s)({}|{})(\s|$)",
        regex::escape(name),
        regex::escape(id)
    );
    match Regex::new(&pattern) {
        Ok(probe) => probe.is_match(filter),
        Err(_) => false,
    }
}

/// Per-star filter results for one filter string.
#[derive(Debug, Clone, Default)]
pub struct FilterCache {
    text: String,
    results: HashMap<StarId, bool>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True while a non-empty filter string is set. With no filter active
    /// every star's cached answer is false.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }

    /// Install a filter string. Re-setting the current string is a no-op
    /// that keeps every cached result; any other string drops them all.
    /// Returns whether the text actually changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text.to_owned();
        self.results.clear();
        true
    }

    pub fn get(&self, star_id: StarId) -> Option<bool> {
        self.results.get(&star_id).copied()
    }

    pub fn put(&mut self, star_id: StarId, matched: bool) {
        self.results.insert(star_id, matched);
    }

    pub fn cached_count(&self) -> usize {
        self.results.len()
    }

    /// Drop the filter string and every cached result. Used at session
    /// boundaries; a fresh galaxy starts unfiltered.
    pub fn reset(&mut self) {
        self.text.clear();
        self.results.clear();
    }
}
