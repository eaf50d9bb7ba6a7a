// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Indentation-sensitive parser for Bio_Poetica poems.
//!
//! Turns free-form text into a [`poetica_ast::Program`]. Every non-blank
//! line outside a `gene` directive block becomes exactly one statement, either
//! at top level or as a child of a `when` block.

pub mod parser;
pub mod score;

pub use parser::{ParseOptions, parse, parse_with_options};
pub use score::{DEFAULT_SCORE_CAP, IntronProfile, intron_profile, line_score};
