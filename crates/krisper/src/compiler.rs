//! Command compiler
//!
//! Turns a command string into a [`Plan`].
//!
//! # Pipeline
//!
//! ```text
//! normalize → compress pass → compare pass → attest pass → explain pass
//! ```
//!
//! Each pass searches the whole normalized text on its own. Passes append to
//! the plan in the fixed order above, which is observable in the output and
//! lets compare/attest/explain default to results produced by the compress
//! pass.
//!
//! # State
//!
//! All mutable state (alias table, most recent compress result) lives in a
//! [`CompileContext`] created at the start of every call. A
//! [`KrisperCompiler`] only holds immutable options and can be shared freely.

use tracing::{debug, instrument, warn};

use crate::alias::AliasTable;
use crate::error::{Result, ValidationError};
use crate::plan::{IR_VERSION, LITERAL_PREFIX, Op, Plan, PlanEntry};
use crate::verbs::{self, VerbFamily};

/// Artifact referenced by an attest when no compress result exists.
pub const FALLBACK_ARTIFACT: &str = "r1";

/// Explain target used when nothing has been defined.
pub const UNKNOWN_TARGET: &str = "unknown";

/// Output name of explain entries.
pub const EXPLANATION_OUT: &str = "_explanation";

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Version string written into every plan
    pub ir_version: String,
    /// Codec named in the `use` param of compress entries
    pub codec: String,
    /// Seed used when a compress has no `using seed=<n>`
    pub default_seed: u64,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            ir_version: IR_VERSION.to_string(),
            codec: "fibpi3d".to_string(),
            default_seed: 42,
        }
    }
}

/// Per-call compilation state.
#[derive(Debug, Default)]
pub struct CompileContext {
    pub aliases: AliasTable,
    /// Output of the most recent compress entry
    pub last_compress: Option<String>,
    pub entries: Vec<PlanEntry>,
}

impl CompileContext {
    fn emit(&mut self, entry: PlanEntry) {
        debug!(op = %entry.op, out = ?entry.out, "plan entry");
        self.entries.push(entry);
    }
}

/// Compiles command strings into plan IR.
#[derive(Debug, Clone, Default)]
pub struct KrisperCompiler {
    options: CompilerOptions,
}

impl KrisperCompiler {
    /// Create a compiler with the given options
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    /// Compiler options
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile one command string.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyPayload`] when the text is blank or a
    ///   compress payload is empty
    /// - [`ValidationError::UndefinedRef`] when compare/explain name an alias
    ///   that is not defined
    /// - [`ValidationError::InvalidSeed`] when a seed overflows `u64`
    ///
    /// On error no partial plan is returned.
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn compile(&self, text: &str) -> Result<Plan> {
        let text = normalize(text);
        if text.is_empty() {
            return Err(ValidationError::EmptyPayload);
        }

        let mut ctx = CompileContext::default();
        for family in VerbFamily::ORDER {
            match family {
                VerbFamily::Compress => self.compress_pass(&mut ctx, &text)?,
                VerbFamily::Compare => compare_pass(&mut ctx, &text)?,
                VerbFamily::Attest => attest_pass(&mut ctx, &text),
                VerbFamily::Explain => explain_pass(&mut ctx, &text)?,
            }
        }

        debug!(entries = ctx.entries.len(), "compiled");
        Ok(Plan {
            version: self.options.ir_version.clone(),
            plan: ctx.entries,
        })
    }

    fn compress_pass(&self, ctx: &mut CompileContext, text: &str) -> Result<()> {
        for found in verbs::compress_matches(text) {
            if found.payload.is_empty() {
                return Err(ValidationError::EmptyPayload);
            }

            let seed = match found.seed {
                Some(digits) => digits
                    .parse::<u64>()
                    .map_err(|_| ValidationError::InvalidSeed(digits.to_string()))?,
                None => self.options.default_seed,
            };
            let alias = match found.alias {
                Some(alias) => alias.to_string(),
                None => ctx.aliases.fresh("r"),
            };

            ctx.emit(
                PlanEntry::new(Op::Compress)
                    .input("payload", format!("{LITERAL_PREFIX}{}", found.payload))
                    .param("use", self.options.codec.as_str())
                    .param("seed", seed)
                    .out(alias.clone()),
            );
            ctx.aliases.define(alias.clone());
            ctx.last_compress = Some(alias);
        }
        Ok(())
    }
}

fn compare_pass(ctx: &mut CompileContext, text: &str) -> Result<()> {
    if !VerbFamily::Compare.is_present(text) {
        return Ok(());
    }

    let (a, b) = match verbs::compare_pair(text) {
        Some((a, b)) => {
            for name in [a, b] {
                if !ctx.aliases.is_defined(name) {
                    return Err(ValidationError::UndefinedRef(name.to_string()));
                }
            }
            (a.to_string(), b.to_string())
        }
        None => {
            let last = ctx.last_compress.clone().ok_or_else(|| {
                ValidationError::UndefinedRef(ValidationError::NO_COMPRESS_FOUND.to_string())
            })?;
            (last.clone(), last)
        }
    };

    let out = ctx.aliases.fresh("cmp");
    ctx.emit(
        PlanEntry::new(Op::Compare)
            .input("a", a)
            .input("b", b)
            .out(out.clone()),
    );
    ctx.aliases.define(out);
    Ok(())
}

fn attest_pass(ctx: &mut CompileContext, text: &str) {
    if !VerbFamily::Attest.is_present(text) {
        return;
    }

    let artifact = match &ctx.last_compress {
        Some(last) => last.clone(),
        None => {
            warn!(artifact = FALLBACK_ARTIFACT, "attest without a compress result");
            FALLBACK_ARTIFACT.to_string()
        }
    };

    // Attest outputs are not referenceable; only compress and compare define names.
    let out = ctx.aliases.fresh("att");
    ctx.emit(PlanEntry::new(Op::Attest).input("artifact", artifact).out(out));
}

fn explain_pass(ctx: &mut CompileContext, text: &str) -> Result<()> {
    if !VerbFamily::Explain.is_present(text) {
        return Ok(());
    }

    let target = match verbs::explain_target(text) {
        Some(name) if ctx.aliases.is_defined(name) => name.to_string(),
        Some(name) => return Err(ValidationError::UndefinedRef(name.to_string())),
        None => match ctx.aliases.last_defined() {
            Some(last) => last.to_string(),
            None => {
                warn!(fallback = UNKNOWN_TARGET, "explain without any defined alias");
                UNKNOWN_TARGET.to_string()
            }
        },
    };

    ctx.emit(
        PlanEntry::new(Op::Explain)
            .input("ref", target)
            .out(EXPLANATION_OUT),
    );
    Ok(())
}

/// Trim and case-fold the input.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
