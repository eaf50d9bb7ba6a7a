//! Plain-speak line compiler
//!
//! A second command front end: one command per line, each matched as a whole
//! against a fixed rule table (case-insensitive). Lines that match no rule are
//! carried through as `comment` steps, so compilation never fails.
//!
//! | line | steps |
//! |------|-------|
//! | `download <url> to <path>` | `http_get{url}`, `write_file{path, from_last}` |
//! | `run "<cmd>"` / `run <cmd>` | `run{cmd}` |
//! | `every <n>s: <cmd>` | `loop{interval, body: [run]}` |
//! | `sleep <n>` | `sleep{seconds}` |
//! | `write '<data>' to <path>` | `write_file{path, data}` |

use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// One step of a plain-speak program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: String,
    pub args: IndexMap<String, Value>,
}

impl Step {
    /// Create a step with no arguments
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: IndexMap::new(),
        }
    }

    /// Add an argument
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Whether this step is a carried-through comment
    pub fn is_comment(&self) -> bool {
        self.kind == "comment"
    }
}

/// Ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepProgram {
    pub steps: Vec<Step>,
}

type Build = fn(&Captures<'_>) -> Option<Vec<Step>>;

struct Rule {
    pattern: Regex,
    build: Build,
}

impl Rule {
    fn new(pattern: &str, build: Build) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("plain-speak rule is valid"),
            build,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?i)^download (?P<url>\S+) to (?P<path>\S+)$", |caps| {
            Some(vec![
                Step::new("http_get").arg("url", &caps["url"]),
                Step::new("write_file")
                    .arg("path", &caps["path"])
                    .arg("from_last", true),
            ])
        }),
        Rule::new(r#"(?i)^run "(?P<cmd>.+)"$"#, |caps| {
            Some(vec![Step::new("run").arg("cmd", &caps["cmd"])])
        }),
        Rule::new(r"(?i)^run (?P<cmd>.+)$", |caps| {
            Some(vec![Step::new("run").arg("cmd", &caps["cmd"])])
        }),
        Rule::new(
            r"(?i)^every (?P<secs>\d+)(s| sec| seconds): (?P<cmd>.+)$",
            |caps| {
                let interval: u64 = caps["secs"].parse().ok()?;
                let cmd = &caps["cmd"];
                let body = json!([{ "kind": "run", "args": { "cmd": cmd } }]);
                Some(vec![
                    Step::new("loop").arg("interval", interval).arg("body", body),
                ])
            },
        ),
        Rule::new(r"(?i)^sleep (?P<secs>\d+)$", |caps| {
            let seconds: u64 = caps["secs"].parse().ok()?;
            Some(vec![Step::new("sleep").arg("seconds", seconds)])
        }),
        Rule::new(r"(?i)^write '(?P<data>.*)' to (?P<path>\S+)$", |caps| {
            Some(vec![
                Step::new("write_file")
                    .arg("path", &caps["path"])
                    .arg("data", &caps["data"]),
            ])
        }),
    ]
});

/// Compile one already-trimmed line.
fn compile_line(line: &str) -> Vec<Step> {
    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(line) {
            if let Some(steps) = (rule.build)(&caps) {
                return steps;
            }
        }
    }
    vec![Step::new("comment").arg("text", line)]
}

/// Compile every non-blank line of `text` into a step program.
#[instrument(skip_all, fields(len = text.len()))]
pub fn compile_lines(text: &str) -> StepProgram {
    let mut program = StepProgram::default();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let steps = compile_line(line);
        debug!(line, steps = steps.len(), "plain-speak line");
        program.steps.extend(steps);
    }
    program
}
