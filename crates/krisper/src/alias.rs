//! Alias table
//!
//! Tracks which output names are defined within one compilation and hands out
//! generated names that never collide with them.
//!
//! # Naming
//!
//! Generated names come from a base (`r`, `cmp`, `att`, ...). The first use of
//! a base yields the bare base, then `base2`, `base3`, and so on. A candidate
//! that is already defined (for example an explicit `as r`) is skipped.
//!
//! # Lifetime
//!
//! A table belongs to exactly one compile call. Nothing in it survives the
//! call, so two compilations never observe each other's names.

use indexmap::IndexSet;
use std::collections::HashMap;

/// Defined aliases plus per-base generation counters.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    /// Defined aliases in definition order.
    defined: IndexSet<String>,

    /// Most recently defined alias (redefinition moves it here too).
    last_defined: Option<String>,

    /// Number of names generated so far per base.
    counters: HashMap<String, u32>,
}

impl AliasTable {
    /// Create an empty alias table
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh alias from `base`.
    ///
    /// The returned name is not marked as defined; call [`AliasTable::define`]
    /// once the plan entry producing it has been emitted.
    pub fn fresh(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = if *counter == 1 {
                base.to_string()
            } else {
                format!("{base}{counter}")
            };
            if !self.defined.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Mark `alias` as defined.
    pub fn define(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        self.defined.insert(alias.clone());
        self.last_defined = Some(alias);
    }

    /// Check whether `alias` is defined
    pub fn is_defined(&self, alias: &str) -> bool {
        self.defined.contains(alias)
    }

    /// Most recently defined alias, if any.
    pub fn last_defined(&self) -> Option<&str> {
        self.last_defined.as_deref()
    }

    /// Defined aliases in definition order.
    pub fn defined(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }

    /// Number of defined aliases
    pub fn len(&self) -> usize {
        self.defined.len()
    }

    /// Whether no alias is defined yet
    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }
}
