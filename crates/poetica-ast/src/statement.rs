//! Statement nodes
//!
//! Every statement kind is an explicit variant of [`StatementKind`]; fields
//! that only some kinds carry live on those variants alone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dot-separated tool path like `fibonacci.spiral`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ToolPath {
    pub segments: Vec<String>,
}

impl ToolPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Split a dotted string into a path.
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').map(str::to_string).collect())
    }

    pub fn join(&self, sep: &str) -> String {
        self.segments.join(sep)
    }
}

impl fmt::Display for ToolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<String> for ToolPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<ToolPath> for String {
    fn from(path: ToolPath) -> Self {
        path.to_string()
    }
}

/// gene <name>: with its directive lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl GeneDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Kind-specific payload of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementKind {
    /// name <program name>
    Name { name: String },

    /// emit "<topic>" [payload]
    Emit {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },

    /// when <condition>: followed by an indented body
    When {
        condition: String,
        children: Vec<Statement>,
    },

    /// use <tool.path>[(key: value, ...)]
    Use {
        tool: ToolPath,
        #[serde(default)]
        kwargs: IndexMap<String, String>,
    },

    /// remember <key>: <value>
    Remember { key: String, value: String },

    /// gene <name>: followed by directive lines
    #[serde(rename = "gene")]
    GeneDecl(GeneDecl),

    /// Any line no other rule recognizes
    #[serde(rename = "text")]
    TextLine { text: String, score: u8 },
}

/// A statement and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub line: usize,
    #[serde(flatten)]
    pub kind: StatementKind,
}

impl Statement {
    pub fn new(line: usize, kind: StatementKind) -> Self {
        Self { line, kind }
    }

    /// Wire name of the statement kind (`name`, `emit`, `when`, ...)
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::Name { .. } => "name",
            StatementKind::Emit { .. } => "emit",
            StatementKind::When { .. } => "when",
            StatementKind::Use { .. } => "use",
            StatementKind::Remember { .. } => "remember",
            StatementKind::GeneDecl(_) => "gene",
            StatementKind::TextLine { .. } => "text",
        }
    }

    /// Indentation score; zero for kinds that carry none.
    pub fn score(&self) -> u32 {
        match &self.kind {
            StatementKind::TextLine { score, .. } => u32::from(*score),
            _ => 0,
        }
    }

    /// Nested statements (only `when` has any)
    pub fn children(&self) -> &[Statement] {
        match &self.kind {
            StatementKind::When { children, .. } => children,
            _ => &[],
        }
    }
}
