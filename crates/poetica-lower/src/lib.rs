// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lowering from Bio_Poetica statement trees to KRSP gene documents.
//!
//! # Design
//!
//! - `gene`: `Gene`, its `x-` extension fields and the `KrspDocument`
//! - `summary`: flat statement summaries for `x-statements` and `x-body`
//! - `hash`: short SHA-256 names for trigger genes
//! - `lower`: the single pass that bundles statements into genes

pub mod gene;
pub mod hash;
pub mod lower;
pub mod summary;

pub use gene::{Gene, GeneExtensions, KrspDocument, Meta};
pub use lower::{DEFAULT_GENE_NAME, LowerOptions, lower, lower_with_options};
pub use summary::StatementSummary;
