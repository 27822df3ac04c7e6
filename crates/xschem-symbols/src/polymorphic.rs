//! Polymorphic symbol expansion (spec §4.2).
//!
//! A symbol whose pin count depends on the net it's wired to (a bus-width
//! generic, say) is expanded into a transient clone sized for the
//! instance that needs it. The clone lives only for the duration of one
//! netlisting/rendering pass: [`PolymorphicExpander::start`] opens the
//! pass, [`PolymorphicExpander::get_or_create_clone`] is called once per
//! instance that needs a sized variant (deduplicated so two instances
//! asking for the same base symbol and suffix share one clone), and
//! [`PolymorphicExpander::end`] closes the pass and reports which clone
//! indices were *not* touched this time, so the caller can garbage
//! collect stale ones via [`crate::cache::SymbolCache::remove_symbol`].

use std::collections::{HashMap, HashSet};

use crate::attr::{self, GetMode};
use crate::cache::SymbolCache;
use crate::symbol::{Symbol, SymbolKind};

#[derive(Default)]
pub struct PolymorphicExpander {
    /// Maps (base symbol index, suffix) to the clone's index in the cache,
    /// for clones created during the in-progress pass.
    created_this_pass: HashMap<(usize, String), usize>,
    /// All clone indices known to exist before this pass started.
    known_before_pass: HashSet<usize>,
    active: bool,
}

impl PolymorphicExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new expansion pass. `existing_clone_indices` should list
    /// every clone index currently in the cache so `end` can report which
    /// ones this pass left untouched.
    pub fn start(&mut self, existing_clone_indices: impl IntoIterator<Item = usize>) {
        self.created_this_pass.clear();
        self.known_before_pass = existing_clone_indices.into_iter().collect();
        self.active = true;
    }

    /// Returns clone indices that existed before this pass but were never
    /// requested during it, i.e. stale clones safe to remove. Closes the
    /// pass.
    pub fn end(&mut self) -> Vec<usize> {
        self.active = false;
        let touched: HashSet<usize> = self.created_this_pass.values().copied().collect();
        let mut stale: Vec<usize> = self
            .known_before_pass
            .difference(&touched)
            .copied()
            .collect();
        stale.sort_unstable();
        stale
    }

    /// Returns the cache index of a clone of `base_index` suffixed with
    /// `suffix` (typically a bus width or pin count descriptor), applying
    /// `overrides` as `key=value` pairs substituted into the clone's
    /// attribute string. Creates the clone the first time it's asked for
    /// in this pass; subsequent requests for the same `(base_index,
    /// suffix)` within the pass return the same index.
    pub fn get_or_create_clone(
        &mut self,
        cache: &mut SymbolCache,
        base_index: usize,
        suffix: &str,
        overrides: &[(&str, &str)],
    ) -> Option<usize> {
        debug_assert!(self.active, "get_or_create_clone called outside start/end");
        let key = (base_index, suffix.to_string());
        if let Some(&idx) = self.created_this_pass.get(&key) {
            return Some(idx);
        }
        let base = cache.get(base_index)?;
        let mut clone = base.clone();
        clone.kind = SymbolKind::Clone { base_index };
        clone.name = format!("{}@{}", base.name, suffix);
        for (k, v) in overrides {
            clone.attr = attr::set(&clone.attr, k, v);
        }
        clone.recompute_flags();
        let idx = cache.push(clone);
        self.created_this_pass.insert(key, idx);
        Some(idx)
    }
}

/// Reads a clone's `base_index`, following through [`SymbolKind::Clone`].
/// Returns `None` for a primary symbol.
pub fn base_index_of(symbol: &Symbol) -> Option<usize> {
    match symbol.kind {
        SymbolKind::Clone { base_index } => Some(base_index),
        SymbolKind::Primary => None,
    }
}

/// Convenience used when applying a clone's overrides to an instance's
/// own attribute string rather than the symbol's (e.g. to stamp the
/// resolved pin count onto the instance for display).
pub fn instance_override_value<'a>(overrides: &'a str, key: &str) -> Option<&'a str> {
    attr::get(overrides, key, GetMode::Unquoted)
}
