//! Gene units and the KRSP document that carries them.

use indexmap::IndexMap;
use poetica_ast::{GeneDecl, Statement, ToolPath};
use serde::Serialize;
use serde_json::Value;

use crate::hash::short_hash;
use crate::summary::{StatementSummary, payload_value};

/// Document format version.
pub const KRSP_VERSION: &str = "1";
/// Value of the document `source` field.
pub const SOURCE: &str = "bio_poetica";
/// Op tag for signal emission.
pub const PHEROMONE_EMIT: &str = "pheromone.emit";
/// Op tag for event subscription.
pub const EVENT_LISTEN: &str = "event.listen";
/// Tag carried by every gene.
pub const TAG: &str = "bio_poetica";

/// Op tag for a tool invocation.
pub fn tool_op(tool: &ToolPath) -> String {
    format!("tool:{tool}")
}

/// Kind-specific `x-` fields. At most one group is set per gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneExtensions {
    #[serde(rename = "x-condition", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(rename = "x-body", skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<StatementSummary>>,
    #[serde(rename = "x-topic", skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "x-payload", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(rename = "x-tool", skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(rename = "x-args", skip_serializing_if = "Option::is_none")]
    pub args: Option<IndexMap<String, String>>,
}

/// A named, bundled execution unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gene {
    pub name: String,
    pub desc: String,
    pub cmd: Option<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub ops: Vec<String>,
    /// Op tag to number of occurrences in `ops`
    pub estimate: IndexMap<String, u32>,
    pub tags: Vec<String>,
    #[serde(rename = "x-statements", skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<StatementSummary>,
    #[serde(flatten)]
    pub extensions: GeneExtensions,
}

impl Gene {
    fn new(name: String, desc: String) -> Self {
        Self {
            name,
            desc,
            cmd: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            ops: Vec::new(),
            estimate: IndexMap::new(),
            tags: Vec::new(),
            statements: Vec::new(),
            extensions: GeneExtensions::default(),
        }
    }

    fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Append an op and bump its estimate.
    pub fn push_op(&mut self, op: impl Into<String>) {
        let op = op.into();
        *self.estimate.entry(op.clone()).or_insert(0) += 1;
        self.ops.push(op);
    }

    /// Gene opened by a `gene` declaration.
    pub fn declared(decl: &GeneDecl) -> Self {
        let desc = decl
            .desc
            .clone()
            .unwrap_or_else(|| format!("Bio_Poetica gene: {}", decl.name));
        let mut gene = Self::new(decl.name.clone(), desc).with_tags(&[TAG]);
        gene.cmd = decl.cmd.clone();
        gene.inputs = decl.inputs.clone();
        gene.outputs = decl.outputs.clone();
        gene.push_op(PHEROMONE_EMIT);
        gene
    }

    /// Trigger gene for a `when` block, named after a hash of its condition.
    pub fn trigger(condition: &str, children: &[Statement]) -> Self {
        let mut gene = Self::new(
            format!("trigger:when_{}", short_hash(condition)),
            format!("Trigger when {condition}"),
        )
        .with_tags(&["trigger", TAG]);
        gene.inputs = vec!["event".into()];
        gene.outputs = vec!["triggered".into()];
        gene.push_op(EVENT_LISTEN);
        gene.push_op(PHEROMONE_EMIT);
        gene.extensions.condition = Some(condition.to_string());
        gene.extensions.body = Some(children.iter().map(StatementSummary::of).collect());
        gene
    }

    /// Standalone gene for an `emit` outside any declared gene.
    pub fn emit(topic: &str, payload: Option<&str>) -> Self {
        let mut gene = Self::new(format!("emit:{topic}"), format!("Emit {topic} signal"))
            .with_tags(&["signal", TAG]);
        gene.outputs = vec!["signal".into()];
        gene.push_op(PHEROMONE_EMIT);
        gene.extensions.topic = Some(topic.to_string());
        gene.extensions.payload = Some(payload_value(payload));
        gene
    }

    /// Standalone gene for a `use` outside any declared gene.
    pub fn tool(tool: &ToolPath, kwargs: &IndexMap<String, String>) -> Self {
        let mut gene = Self::new(format!("tool:{}", tool.join("_")), format!("Use {tool} tool"))
            .with_tags(&["tool", TAG]);
        gene.inputs = kwargs.keys().cloned().collect();
        gene.outputs = vec!["result".into()];
        gene.push_op(tool_op(tool));
        gene.extensions.tool = Some(tool.to_string());
        gene.extensions.args = Some(kwargs.clone());
        gene
    }

    /// Synthesized gene absorbing otherwise unattached statements.
    pub fn default_main(name: &str, cmd: Option<String>, statements: Vec<StatementSummary>) -> Self {
        let mut gene = Self::new(name.to_string(), "Main Bio_Poetica flow".into())
            .with_tags(&[TAG, "auto_generated"]);
        gene.cmd = cmd;
        gene.outputs = vec!["result".into()];
        gene.push_op(PHEROMONE_EMIT);
        gene.statements = statements;
        gene
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub program_name: String,
    /// Sum of top-level statement scores
    pub consciousness_level: u32,
    pub dna_mutations: Vec<String>,
}

/// Lowered program: `{krsp_version, source, genes, meta}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KrspDocument {
    pub krsp_version: String,
    pub source: String,
    pub genes: Vec<Gene>,
    pub meta: Meta,
}

impl KrspDocument {
    pub fn gene(&self, name: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.name == name)
    }
}
