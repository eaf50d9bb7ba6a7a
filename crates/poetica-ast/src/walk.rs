//! Statement tree walking.
//!
//! A single pre-order traversal shared by every pass that needs to look at
//! nested `when` bodies.

use crate::statement::Statement;

/// Walk `statements` in pre-order, calling `visitor` for each node.
///
/// A `when` statement is visited before its children, children left to
/// right.
pub fn walk_statements<V>(statements: &[Statement], visitor: &mut V)
where
    V: FnMut(&Statement),
{
    for stmt in statements {
        visitor(stmt);
        walk_statements(stmt.children(), visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::StatementKind;

    #[test]
    fn test_walk_is_pre_order() {
        let child = Statement::new(
            2,
            StatementKind::Emit {
                topic: "b".into(),
                payload: None,
            },
        );
        let when = Statement::new(
            1,
            StatementKind::When {
                condition: "a".into(),
                children: vec![child],
            },
        );
        let name = Statement::new(3, StatementKind::Name { name: "n".into() });

        let mut lines = Vec::new();
        walk_statements(&[when, name], &mut |stmt| lines.push(stmt.line));
        assert_eq!(lines, vec![1, 2, 3]);
    }
}
