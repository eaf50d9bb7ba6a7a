//! Plan IR
//!
//! The flat, ordered operation list handed to an external executor. Entries
//! execute in array order; an input value is either a literal (prefixed with
//! [`LITERAL_PREFIX`]) or a reference to the `out` of an earlier entry.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan IR version emitted by this compiler.
pub const IR_VERSION: &str = "0.1";

/// Prefix marking an input value as an inline UTF-8 literal.
pub const LITERAL_PREFIX: &str = "utf8:";

/// Operation tag of a plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Compress,
    Compare,
    Attest,
    Explain,
}

impl Op {
    /// Wire name of the operation
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Compress => "compress",
            Op::Compare => "compare",
            Op::Attest => "attest",
            Op::Explain => "explain",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub op: Op,

    /// Named inputs: literals or references to earlier outputs.
    #[serde(rename = "in")]
    pub inputs: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, serde_json::Value>>,

    /// Alias bound to this entry's result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}

impl PlanEntry {
    /// Create an entry with no inputs, params or output
    pub fn new(op: Op) -> Self {
        Self {
            op,
            inputs: IndexMap::new(),
            params: None,
            out: None,
        }
    }

    /// Add a named input
    pub fn input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Add a named parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Bind the entry's output alias
    pub fn out(mut self, alias: impl Into<String>) -> Self {
        self.out = Some(alias.into());
        self
    }

    /// Inputs that are references rather than literals.
    pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .filter(|(_, value)| !is_literal(value))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Whether an input value is an inline literal
pub fn is_literal(value: &str) -> bool {
    value.starts_with(LITERAL_PREFIX)
}

/// Compiled plan: `{version, plan: [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub version: String,
    pub plan: Vec<PlanEntry>,
}

/// A reference that does not resolve to an earlier output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    /// Index of the entry holding the reference
    pub entry: usize,
    /// Input name on that entry
    pub input: String,
    /// The unresolved alias
    pub reference: String,
}

impl Plan {
    /// Create an empty plan with the given IR version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            plan: Vec::new(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.plan.len()
    }

    /// Whether the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Operation tags in execution order
    pub fn ops(&self) -> Vec<Op> {
        self.plan.iter().map(|entry| entry.op).collect()
    }

    /// References that do not name the output of an earlier entry.
    ///
    /// Literals are never reported. An empty result means every reference
    /// can be resolved by executing the plan in order.
    pub fn dangling_refs(&self) -> Vec<DanglingRef> {
        let mut produced: IndexSet<&str> = IndexSet::new();
        let mut dangling = Vec::new();

        for (index, entry) in self.plan.iter().enumerate() {
            for (input, reference) in entry.references() {
                if !produced.contains(reference) {
                    dangling.push(DanglingRef {
                        entry: index,
                        input: input.to_string(),
                        reference: reference.to_string(),
                    });
                }
            }
            if let Some(out) = entry.out.as_deref() {
                produced.insert(out);
            }
        }

        dangling
    }
}
