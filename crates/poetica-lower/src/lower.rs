//! Statement tree to gene lowering.
//!
//! # Design
//!
//! Lowering walks the top-level statements once, keeping a cursor on the
//! most recently declared gene and a buffer of statements waiting to be
//! attached to it.
//!
//! - `gene` flushes the buffer onto the previous declared gene, if there is
//!   one, then opens a new gene. With no previous gene the buffer carries
//!   over to the new one.
//! - `emit` and `use` add an op to the open gene and a summary to the buffer.
//!   Without an open gene they become standalone genes.
//! - `when` always becomes its own trigger gene and never touches the buffer.
//! - Everything else is buffered.
//!
//! At the end the buffer lands on the open gene. If no gene was ever
//! declared and statements are still buffered, or if there are no genes at
//! all, a default gene absorbs the buffer.

use poetica_ast::{Program, Statement, StatementKind};
use tracing::{debug, instrument};

use crate::gene::{Gene, KRSP_VERSION, KrspDocument, Meta, PHEROMONE_EMIT, SOURCE, tool_op};
use crate::summary::StatementSummary;

/// Name of the default gene.
pub const DEFAULT_GENE_NAME: &str = "bio:main";
/// `meta.program_name` when the program declares no name.
pub const UNNAMED: &str = "unnamed";

/// Lowering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerOptions {
    /// Name of the synthesized default gene
    pub default_gene_name: String,
    /// `cmd` of the synthesized default gene
    pub default_gene_cmd: Option<String>,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            default_gene_name: DEFAULT_GENE_NAME.to_string(),
            default_gene_cmd: None,
        }
    }
}

/// Lower `program` with default options.
pub fn lower(program: &Program) -> KrspDocument {
    lower_with_options(program, &LowerOptions::default())
}

/// Lower `program` into a KRSP document. Total and deterministic.
#[instrument(skip_all, fields(statements = program.statements.len()))]
pub fn lower_with_options(program: &Program, options: &LowerOptions) -> KrspDocument {
    let mut lowering = Lowering::default();
    for stmt in &program.statements {
        lowering.statement(stmt);
    }
    let genes = lowering.finish(options);

    debug!(genes = genes.len(), "lowered program");
    KrspDocument {
        krsp_version: KRSP_VERSION.to_string(),
        source: SOURCE.to_string(),
        genes,
        meta: Meta {
            program_name: program.name.clone().unwrap_or_else(|| UNNAMED.to_string()),
            consciousness_level: program.total_score(),
            dna_mutations: Vec::new(),
        },
    }
}

#[derive(Default)]
struct Lowering {
    genes: Vec<Gene>,
    /// Index of the open declared gene
    current: Option<usize>,
    pending: Vec<StatementSummary>,
}

impl Lowering {
    fn statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::GeneDecl(decl) => {
                self.flush();
                debug!(gene = %decl.name, line = stmt.line, "open gene");
                self.genes.push(Gene::declared(decl));
                self.current = Some(self.genes.len() - 1);
            }
            StatementKind::When {
                condition,
                children,
            } => {
                let gene = Gene::trigger(condition, children);
                debug!(gene = %gene.name, line = stmt.line, "trigger gene");
                self.genes.push(gene);
            }
            StatementKind::Emit { topic, payload } => match self.current {
                Some(index) => self.attach(index, PHEROMONE_EMIT.to_string(), stmt),
                None => self.genes.push(Gene::emit(topic, payload.as_deref())),
            },
            StatementKind::Use { tool, kwargs } => match self.current {
                Some(index) => self.attach(index, tool_op(tool), stmt),
                None => self.genes.push(Gene::tool(tool, kwargs)),
            },
            StatementKind::Name { .. }
            | StatementKind::Remember { .. }
            | StatementKind::TextLine { .. } => self.pending.push(StatementSummary::of(stmt)),
        }
    }

    fn attach(&mut self, index: usize, op: String, stmt: &Statement) {
        self.genes[index].push_op(op);
        self.pending.push(StatementSummary::of(stmt));
    }

    /// Move the buffer onto the open gene, if any.
    fn flush(&mut self) {
        if let Some(index) = self.current {
            self.genes[index].statements.append(&mut self.pending);
        }
    }

    fn finish(mut self, options: &LowerOptions) -> Vec<Gene> {
        self.flush();
        let never_declared = self.current.is_none() && !self.pending.is_empty();
        if never_declared || self.genes.is_empty() {
            debug!(statements = self.pending.len(), "default gene");
            self.genes.push(Gene::default_main(
                &options.default_gene_name,
                options.default_gene_cmd.clone(),
                self.pending,
            ));
        }
        self.genes
    }
}
