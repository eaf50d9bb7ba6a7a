// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! KRISPER command compiler.
//!
//! Compiles constrained natural-language command strings into a flat,
//! ordered operation plan (KRISPER plan IR, version `0.1`).
//!
//! # Design
//!
//! - `alias`: per-compilation alias table (defined names, generated names)
//! - `verbs`: one independent extraction pass per verb family
//! - `compiler`: drives the passes in family order and validates references
//! - `plan`: serializable plan IR plus dangling-reference verification
//! - `plain`: line-anchored plain-speak compiler with comment fallback
//!
//! # Examples
//!
//! ```
//! let plan = krisper::compile("compress payload 'a' as x compare x with x").unwrap();
//! assert_eq!(plan.plan.len(), 2);
//! assert_eq!(plan.plan[1].out.as_deref(), Some("cmp"));
//! ```

pub mod alias;
pub mod compiler;
pub mod error;
pub mod plain;
pub mod plan;
pub mod verbs;

pub use alias::AliasTable;
pub use compiler::{CompilerOptions, KrisperCompiler};
pub use error::{Result, ValidationError};
pub use plan::{LITERAL_PREFIX, Op, Plan, PlanEntry};

use serde::Serialize;

/// Error envelope emitted by [`compile_text`] instead of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    /// Stable kind string, e.g. `UNDEFINED_REF:x`.
    pub error: String,
}

/// Compile `text` with default options.
pub fn compile(text: &str) -> Result<Plan> {
    KrisperCompiler::default().compile(text)
}

/// Compile `text` and render the outcome as pretty JSON.
///
/// Validation failures do not cross this boundary as errors; they are
/// rendered as `{"error": "<KIND>[:<detail>]"}`.
pub fn compile_text(text: &str) -> serde_json::Result<String> {
    match compile(text) {
        Ok(plan) => serde_json::to_string_pretty(&plan),
        Err(err) => serde_json::to_string_pretty(&ErrorEnvelope {
            error: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_text_renders_plan() {
        let json = compile_text("compress payload 'hi' as h").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "0.1");
        assert_eq!(value["plan"][0]["out"], "h");
    }

    #[test]
    fn test_compile_text_renders_error_envelope() {
        let json = compile_text("   ").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "EMPTY_PAYLOAD" }));
    }
}
