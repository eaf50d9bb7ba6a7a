//! Single-line statement recognizers.
//!
//! Each recognizer looks at one trimmed line and either returns the statement
//! it describes or `None`. A line whose keyword matches but whose full form
//! does not (for example `emit wake` without quotes) is left for the caller
//! to turn into text.

use indexmap::IndexMap;
use poetica_ast::{StatementKind, ToolPath};
use regex::Regex;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^name\s+(.+)").expect("name pattern is valid"));
static EMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^emit\s+"([^"]+)"(?:\s+(.+))?"#).expect("emit pattern is valid")
});
static WHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^when\s+([^:]+):").expect("when pattern is valid"));
static USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^use\s+([^\s(]+)(?:\s*\(([^)]+)\))?").expect("use pattern is valid")
});
static REMEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^remember\s+(\w+):\s*(.+)").expect("remember pattern is valid")
});
static GENE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gene\s+(\w+):").expect("gene pattern is valid"));

/// `name <program name>`
pub fn name(text: &str) -> Option<StatementKind> {
    let caps = NAME.captures(text)?;
    Some(StatementKind::Name {
        name: caps[1].trim().to_string(),
    })
}

/// `emit "<topic>" [payload]`
pub fn emit(text: &str) -> Option<StatementKind> {
    let caps = EMIT.captures(text)?;
    Some(StatementKind::Emit {
        topic: caps[1].to_string(),
        payload: caps.get(2).map(|m| m.as_str().trim().to_string()),
    })
}

/// `when <condition>:`, returning the trimmed condition.
pub fn when_header(text: &str) -> Option<String> {
    let caps = WHEN.captures(text)?;
    let condition = caps[1].trim();
    (!condition.is_empty()).then(|| condition.to_string())
}

/// `use <tool.path>[(key: value, ...)]`
pub fn use_tool(text: &str) -> Option<StatementKind> {
    let caps = USE.captures(text)?;
    Some(StatementKind::Use {
        tool: ToolPath::parse(&caps[1]),
        kwargs: caps.get(2).map(|m| kwargs(m.as_str())).unwrap_or_default(),
    })
}

/// `remember <key>: <value>`
pub fn remember(text: &str) -> Option<StatementKind> {
    let caps = REMEMBER.captures(text)?;
    Some(StatementKind::Remember {
        key: caps[1].to_string(),
        value: caps[2].trim().to_string(),
    })
}

/// `gene <name>:`, returning the gene name.
pub fn gene_header(text: &str) -> Option<String> {
    GENE.captures(text).map(|caps| caps[1].to_string())
}

/// Parse `key: value, key: "value"` argument lists.
///
/// Entries without a colon are ignored. Values lose surrounding quotes.
pub fn kwargs(args: &str) -> IndexMap<String, String> {
    args.split(',')
        .filter_map(|arg| arg.split_once(':'))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                value.trim().trim_matches(['"', '\'']).to_string(),
            )
        })
        .collect()
}

/// Parse `[a, b]` or `a, b` into a list, dropping empty entries.
pub fn list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip whitespace and surrounding double quotes from a directive value.
pub fn directive_value(value: &str) -> String {
    value.trim().trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_with_and_without_payload() {
        assert_eq!(
            emit(r#"emit "wake""#),
            Some(StatementKind::Emit {
                topic: "wake".into(),
                payload: None
            })
        );
        assert_eq!(
            emit(r#"emit "hello" {"msg": "world"}"#),
            Some(StatementKind::Emit {
                topic: "hello".into(),
                payload: Some(r#"{"msg": "world"}"#.into())
            })
        );
        assert_eq!(emit("emit wake"), None);
        assert_eq!(emit(r#"emit """#), None);
    }

    #[test]
    fn test_when_header_requires_colon() {
        assert_eq!(when_header("when morning.light arrives:"), Some("morning.light arrives".into()));
        assert_eq!(when_header("when morning arrives"), None);
    }

    #[test]
    fn test_use_with_kwargs() {
        let Some(StatementKind::Use { tool, kwargs }) =
            use_tool(r#"use compression.fibpi3d(data: request.payload, mode: "fast")"#)
        else {
            panic!("expected use statement");
        };
        assert_eq!(tool.to_string(), "compression.fibpi3d");
        assert_eq!(kwargs["data"], "request.payload");
        assert_eq!(kwargs["mode"], "fast");
    }

    #[test]
    fn test_use_without_args() {
        let Some(StatementKind::Use { tool, kwargs }) = use_tool("use tool.process") else {
            panic!("expected use statement");
        };
        assert_eq!(tool.segments, vec!["tool", "process"]);
        assert!(kwargs.is_empty());
    }

    #[test]
    fn test_remember_and_name() {
        assert_eq!(
            remember("remember peace: the space between breaths"),
            Some(StatementKind::Remember {
                key: "peace".into(),
                value: "the space between breaths".into()
            })
        );
        assert_eq!(remember("remember everything"), None);
        assert_eq!(
            name("name garden:meditation"),
            Some(StatementKind::Name {
                name: "garden:meditation".into()
            })
        );
    }

    #[test]
    fn test_list_handles_brackets_and_spacing() {
        assert_eq!(list(" [rhythm, depth]"), vec!["rhythm", "depth"]);
        assert_eq!(list("data"), vec!["data"]);
        assert!(list("[]").is_empty());
    }

    #[test]
    fn test_gene_header() {
        assert_eq!(gene_header("gene breathe:"), Some("breathe".into()));
        assert_eq!(gene_header("gene breathe"), None);
    }
}
