//! Indentation score and whitespace statistics.
//!
//! # Score formula
//!
//! For one line:
//!
//! ```text
//! score = min(cap, ⌊indent / 2⌋ + runs(" {2,}") + count("\t ") + trailing(" +$") + runs("\n\n+"))
//! ```
//!
//! where `indent` is the number of leading whitespace characters. The last
//! term is always zero for a single line; it only contributes to the
//! whole-source [`IntronProfile`]. Leading indentation of four or more spaces
//! is also a double-space run, so indentation is counted twice. The score is
//! diagnostic metadata and never drives parsing.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Default upper bound for a line score.
pub const DEFAULT_SCORE_CAP: u8 = 7;

static DOUBLE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("double-space pattern is valid"));
static TAB_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t ").expect("tab-space pattern is valid"));
static TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +$").expect("trailing pattern is valid"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("blank-run pattern is valid"));

/// Number of leading whitespace characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Whitespace-pattern matches in `text`.
fn pattern_hits(text: &str) -> usize {
    [&DOUBLE_SPACE, &TAB_SPACE, &TRAILING, &BLANK_RUN]
        .iter()
        .map(|pattern| pattern.find_iter(text).count())
        .sum()
}

/// Score one raw (untrimmed) line, capped at `cap`.
pub fn line_score(line: &str, cap: u8) -> u8 {
    let raw = indent_width(line) / 2 + pattern_hits(line);
    u8::try_from(raw).map_or(cap, |score| score.min(cap))
}

/// Whitespace statistics over a whole source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntronProfile {
    /// Whitespace characters of any kind
    pub total_whitespace: usize,
    /// Runs of two or more spaces
    pub double_spaces: usize,
    /// Runs of consecutive newlines (one or more blank lines)
    pub empty_lines: usize,
    /// Leading whitespace width of every non-blank line
    pub indentation_levels: Vec<usize>,
}

/// Compute the [`IntronProfile`] of `source`.
pub fn intron_profile(source: &str) -> IntronProfile {
    IntronProfile {
        total_whitespace: source.chars().filter(|c| c.is_whitespace()).count(),
        double_spaces: DOUBLE_SPACE.find_iter(source).count(),
        empty_lines: BLANK_RUN.find_iter(source).count(),
        indentation_levels: source
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(indent_width)
            .collect(),
    }
}
