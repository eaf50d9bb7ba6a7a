// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for Bio_Poetica
//!
//! This crate contains the statement tree produced by `poetica-parser` and
//! consumed by `poetica-lower`.
//!
//! # Design
//!
//! - `Statement`: a source line number plus a closed `StatementKind`
//! - `Program`: top-level statements, declared name, original source
//! - `walk`: pre-order traversal over nested statements

pub mod program;
pub mod statement;
pub mod walk;

pub use program::Program;
pub use statement::{GeneDecl, Statement, StatementKind, ToolPath};
pub use walk::walk_statements;
