//! Parsed program

use serde::{Deserialize, Serialize};

use crate::statement::Statement;
use crate::walk::walk_statements;

/// A parsed Bio_Poetica program.
///
/// `name` is the first `name ...` statement found anywhere at top level;
/// later Name statements stay in `statements` but do not override it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Original source text
    #[serde(default)]
    pub source: String,
}

impl Program {
    /// Sum of the top-level statement scores.
    pub fn total_score(&self) -> u32 {
        self.statements.iter().map(Statement::score).sum()
    }

    /// Number of statements including nested `when` children.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        walk_statements(&self.statements, &mut |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::StatementKind;

    fn text(line: usize, score: u8) -> Statement {
        Statement::new(
            line,
            StatementKind::TextLine {
                text: format!("line {line}"),
                score,
            },
        )
    }

    #[test]
    fn test_total_score_counts_top_level_only() {
        let when = Statement::new(
            1,
            StatementKind::When {
                condition: "dawn".into(),
                children: vec![text(2, 5)],
            },
        );
        let program = Program {
            statements: vec![when, text(3, 2), text(4, 1)],
            name: None,
            source: String::new(),
        };
        assert_eq!(program.total_score(), 3);
        assert_eq!(program.node_count(), 4);
    }
}
