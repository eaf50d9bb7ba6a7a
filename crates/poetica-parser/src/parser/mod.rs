//! Line-oriented parser for Bio_Poetica.
//!
//! ## Architecture
//!
//! - `stream`: LineStream wrapper with lookahead
//! - `stmt`: single-line recognizers (keyword-dispatched)
//! - `blocks`: `when` body capture and `gene` directive blocks
//!
//! Parsing never fails. A line that no recognizer accepts becomes a
//! [`StatementKind::TextLine`] carrying its indentation score.
//!
//! # Dispatch
//!
//! Top-level lines are tried against `name`, `emit`, `when`, `use`,
//! `remember` and `gene`, in that order. Lines inside a `when` body only
//! recognize `emit` and `use`; anything else there is text.

mod blocks;
mod stmt;
mod stream;

use poetica_ast::{Program, Statement, StatementKind};
use tracing::{debug, instrument, trace};

use crate::score::{DEFAULT_SCORE_CAP, line_score};
use stream::{Line, LineStream};

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Upper bound for [`line_score`]
    pub score_cap: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            score_cap: DEFAULT_SCORE_CAP,
        }
    }
}

/// Parse Bio_Poetica source with default options.
pub fn parse(source: &str) -> Program {
    parse_with_options(source, ParseOptions::default())
}

/// Parse Bio_Poetica source.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn parse_with_options(source: &str, options: ParseOptions) -> Program {
    let mut parser = Parser {
        stream: LineStream::new(source),
        options,
    };

    let mut statements = Vec::new();
    let mut name = None;
    while let Some(line) = parser.stream.peek_non_blank() {
        parser.stream.advance();
        let stmt = parser.statement(line);
        if let StatementKind::Name { name: declared } = &stmt.kind {
            name.get_or_insert_with(|| declared.clone());
        }
        statements.push(stmt);
    }

    let program = Program {
        statements,
        name,
        source: source.to_string(),
    };
    debug!(
        statements = program.statements.len(),
        nodes = program.node_count(),
        name = program.name.as_deref().unwrap_or("-"),
        "parsed program"
    );
    program
}

pub(crate) struct Parser<'src> {
    stream: LineStream<'src>,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    /// Top-level dispatch for a line already taken from the stream.
    fn statement(&mut self, line: Line<'src>) -> Statement {
        trace!(line = line.number, text = line.text, "scan");
        let text = line.text;

        let kind = if let Some(kind) = stmt::name(text) {
            kind
        } else if let Some(kind) = stmt::emit(text) {
            kind
        } else if let Some(condition) = stmt::when_header(text) {
            let children = self.when_children(line);
            StatementKind::When {
                condition,
                children,
            }
        } else if let Some(kind) = stmt::use_tool(text) {
            kind
        } else if let Some(kind) = stmt::remember(text) {
            kind
        } else if let Some(gene) = stmt::gene_header(text) {
            StatementKind::GeneDecl(self.gene_block(gene))
        } else {
            self.text_kind(line)
        };
        Statement::new(line.number, kind)
    }

    /// Restricted dispatch for lines inside a `when` body.
    fn child(&self, line: Line<'src>) -> Statement {
        trace!(line = line.number, text = line.text, "scan child");
        let kind = stmt::emit(line.text)
            .or_else(|| stmt::use_tool(line.text))
            .unwrap_or_else(|| self.text_kind(line));
        Statement::new(line.number, kind)
    }

    fn text_kind(&self, line: Line<'src>) -> StatementKind {
        StatementKind::TextLine {
            text: line.text.to_string(),
            score: line_score(line.raw, self.options.score_cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_when_block_nests_deeper_lines() {
        let program = parse("when a:\n    emit \"b\"");
        assert_eq!(program.statements.len(), 1);
        let stmt = &program.statements[0];
        assert_eq!(stmt.line, 1);
        let children = stmt.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].line, 2);
        assert!(matches!(&children[0].kind, StatementKind::Emit { topic, .. } if topic == "b"));
    }

    #[test]
    fn test_when_block_ends_at_same_indent() {
        let program = parse("when a:\n  emit \"b\"\nemit \"c\"");
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[0].children().len(), 1);
        assert_eq!(program.statements[1].kind_name(), "emit");
    }

    #[test]
    fn test_when_block_ends_below_first_body_indent() {
        let program = parse("when a:\n      emit \"b\"\n  emit \"c\"");
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[0].children().len(), 1);
        assert_eq!(program.statements[1].line, 3);
        assert!(matches!(&program.statements[1].kind, StatementKind::Emit { topic, .. } if topic == "c"));
    }

    #[test]
    fn test_when_block_keeps_lines_deeper_than_base() {
        let program = parse("when a:\n  emit \"b\"\n    emit \"c\"\n  emit \"d\"");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0].children().len(), 3);
    }

    #[test]
    fn test_when_without_deeper_body_has_no_children() {
        let program = parse("when a:\nemit \"b\"");
        assert_eq!(program.statements.len(), 2);
        assert!(program.statements[0].children().is_empty());
    }

    #[test]
    fn test_when_children_use_restricted_dispatch() {
        let program = parse("when a:\n  remember k: v\n  use t.x(a: 1)");
        let children = program.statements[0].children();
        assert_eq!(children[0].kind_name(), "text");
        assert_eq!(children[1].kind_name(), "use");
    }

    #[test]
    fn test_gene_block_stops_at_blank_line() {
        let program = parse("gene g:\n  desc: d\n  noise\n\nemit \"x\"");
        assert_eq!(program.statements.len(), 2);
        let StatementKind::GeneDecl(gene) = &program.statements[0].kind else {
            panic!("expected gene");
        };
        assert_eq!(gene.desc.as_deref(), Some("d"));
        assert_eq!(program.statements[1].line, 5);
    }

    #[test]
    fn test_score_cap_option() {
        let program = parse_with_options(
            "          deep prose",
            ParseOptions { score_cap: 2 },
        );
        assert_eq!(program.statements[0].score(), 2);
    }
}
