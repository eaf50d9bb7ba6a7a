//! Verb families
//!
//! Each family is recognized by its own search over the whole normalized
//! text. Families are processed in [`VerbFamily::ORDER`], independent of where
//! their verbs appear in the input: a compare written before the compress it
//! refers to still sees the compress result.

use regex::Regex;
use std::sync::LazyLock;

static COMPRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"compress\s+payload\s+["']([^"']*)["'](?:\s+using\s+seed=(\d+))?(?:\s+as\s+(\w+))?"#,
    )
    .expect("compress pattern is valid")
});

static COMPARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"compare\s+(\w+)\s+with\s+(\w+)").expect("compare pattern is valid")
});

static EXPLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"explain\s+(\w+)").expect("explain pattern is valid"));

/// A recognized verb family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbFamily {
    Compress,
    Compare,
    Attest,
    Explain,
}

impl VerbFamily {
    /// Processing order. Plan entries appear in this order.
    pub const ORDER: [VerbFamily; 4] = [
        VerbFamily::Compress,
        VerbFamily::Compare,
        VerbFamily::Attest,
        VerbFamily::Explain,
    ];

    /// Keyword whose presence triggers the family
    pub fn keyword(self) -> &'static str {
        match self {
            VerbFamily::Compress => "compress",
            VerbFamily::Compare => "compare",
            VerbFamily::Attest => "attest",
            VerbFamily::Explain => "explain",
        }
    }

    /// Whether the (normalized) text mentions this family at all.
    pub fn is_present(self, text: &str) -> bool {
        text.contains(self.keyword())
    }
}

/// One `compress payload '...'` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressMatch<'a> {
    pub payload: &'a str,
    /// Raw digits of `using seed=<n>`
    pub seed: Option<&'a str>,
    /// Explicit `as <alias>`
    pub alias: Option<&'a str>,
}

/// Every compress occurrence, left to right.
pub fn compress_matches(text: &str) -> Vec<CompressMatch<'_>> {
    COMPRESS
        .captures_iter(text)
        .map(|caps| CompressMatch {
            payload: caps.get(1).map_or("", |m| m.as_str()),
            seed: caps.get(2).map(|m| m.as_str()),
            alias: caps.get(3).map(|m| m.as_str()),
        })
        .collect()
}

/// First explicit `compare <a> with <b>` pair.
pub fn compare_pair(text: &str) -> Option<(&str, &str)> {
    let caps = COMPARE.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// First explicit `explain <name>` target.
pub fn explain_target(text: &str) -> Option<&str> {
    EXPLAIN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_captures_all_groups() {
        let matches = compress_matches("compress payload 'abc' using seed=7 as data");
        assert_eq!(
            matches,
            vec![CompressMatch {
                payload: "abc",
                seed: Some("7"),
                alias: Some("data"),
            }]
        );
    }

    #[test]
    fn test_compress_accepts_double_quotes_and_empty_payload() {
        let matches = compress_matches(r#"compress payload "" compress payload "x""#);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].payload, "");
        assert_eq!(matches[1].payload, "x");
        assert_eq!(matches[1].alias, None);
    }

    #[test]
    fn test_compare_pair_takes_first_occurrence() {
        assert_eq!(
            compare_pair("compare a with b then compare c with d"),
            Some(("a", "b"))
        );
        assert_eq!(compare_pair("compare it"), None);
    }

    #[test]
    fn test_explain_target() {
        assert_eq!(explain_target("explain info"), Some("info"));
        assert_eq!(explain_target("please explain"), None);
    }

    #[test]
    fn test_presence_is_substring_based() {
        assert!(VerbFamily::Attest.is_present("then attest it"));
        assert!(!VerbFamily::Compare.is_present("compress payload 'a'"));
    }
}
