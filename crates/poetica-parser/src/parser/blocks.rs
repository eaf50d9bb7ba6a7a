//! Block capture: `when` bodies and `gene` directive blocks.
//!
//! The two block kinds use different line-dispatch modes. A `when` body is
//! prose: every captured line becomes a child node. A `gene` block is a
//! directive micro-format: lines are fields of the declaration and never
//! become nodes of their own.

use poetica_ast::{GeneDecl, Statement};
use tracing::trace;

use super::Parser;
use super::stmt;
use super::stream::Line;

impl<'src> Parser<'src> {
    /// Capture the children of a `when` header.
    ///
    /// The first body line must be indented strictly deeper than the header
    /// and fixes the base indent. Later lines belong to the block while they
    /// stay at or beyond that base. The first line that does not is left in
    /// the stream for the outer loop.
    pub(super) fn when_children(&mut self, header: Line<'src>) -> Vec<Statement> {
        let mut children = Vec::new();
        let mut base = None;
        while let Some(line) = self.stream.peek_non_blank() {
            if line.indent < base.unwrap_or(header.indent + 1) {
                break;
            }
            base.get_or_insert(line.indent);
            self.stream.advance();
            children.push(self.child(line));
        }
        trace!(line = header.number, children = children.len(), "when block");
        children
    }

    /// Read directive lines after a `gene` header until a blank line or end
    /// of input.
    pub(super) fn gene_block(&mut self, name: String) -> GeneDecl {
        let mut gene = GeneDecl::new(name);
        while let Some(line) = self.stream.peek() {
            if line.is_blank() {
                break;
            }
            self.stream.advance();
            if !apply_directive(&mut gene, line.text) {
                trace!(line = line.number, text = line.text, "dropped gene directive");
            }
        }
        gene
    }
}

/// Apply one `key: value` directive; returns false for unknown lines.
fn apply_directive(gene: &mut GeneDecl, text: &str) -> bool {
    let Some((key, value)) = text.split_once(':') else {
        return false;
    };
    match key.trim() {
        "desc" => gene.desc = Some(stmt::directive_value(value)),
        "cmd" => gene.cmd = Some(stmt::directive_value(value)),
        "inputs" => gene.inputs = stmt::list(value),
        "outputs" => gene.outputs = stmt::list(value),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_directive() {
        let mut gene = GeneDecl::new("breathe");
        assert!(apply_directive(&mut gene, r#"desc: "Slow breathing""#));
        assert!(apply_directive(&mut gene, "cmd: breathe --slow"));
        assert!(apply_directive(&mut gene, "inputs: [rhythm, depth]"));
        assert!(apply_directive(&mut gene, "outputs: [calm]"));
        assert!(!apply_directive(&mut gene, "colour: green"));
        assert!(!apply_directive(&mut gene, "just prose"));

        assert_eq!(gene.desc.as_deref(), Some("Slow breathing"));
        assert_eq!(gene.cmd.as_deref(), Some("breathe --slow"));
        assert_eq!(gene.inputs, vec!["rhythm", "depth"]);
        assert_eq!(gene.outputs, vec!["calm"]);
    }
}
