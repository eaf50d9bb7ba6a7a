//! Flat JSON summaries of statements, used for `x-statements` and `x-body`.

use indexmap::IndexMap;
use poetica_ast::{Statement, StatementKind};
use serde::Serialize;
use serde_json::Value;

/// A statement flattened to its kind, line and the fields that kind carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSummary {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Emit payload; `null` when the emit had none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl StatementSummary {
    fn bare(stmt: &Statement) -> Self {
        Self {
            kind: stmt.kind_name(),
            line: stmt.line,
            name: None,
            text: None,
            key: None,
            value: None,
            topic: None,
            payload: None,
            tool: None,
            args: None,
            score: None,
        }
    }

    /// Summarize one statement. `when` bodies are not descended into.
    pub fn of(stmt: &Statement) -> Self {
        let mut summary = Self::bare(stmt);
        match &stmt.kind {
            StatementKind::Name { name } => summary.name = Some(name.clone()),
            StatementKind::Emit { topic, payload } => {
                summary.topic = Some(topic.clone());
                summary.payload = Some(payload_value(payload.as_deref()));
            }
            StatementKind::When { condition, .. } => summary.text = Some(condition.clone()),
            StatementKind::Use { tool, kwargs } => {
                summary.tool = Some(tool.to_string());
                summary.args = Some(kwargs.clone());
            }
            StatementKind::Remember { key, value } => {
                summary.key = Some(key.clone());
                summary.value = Some(value.clone());
            }
            StatementKind::GeneDecl(decl) => summary.name = Some(decl.name.clone()),
            StatementKind::TextLine { text, score } => {
                summary.text = Some(text.clone());
                summary.score = Some(*score);
            }
        }
        summary
    }
}

/// Payload text as JSON: parsed when it is valid JSON, a string otherwise,
/// `null` when absent.
pub fn payload_value(payload: Option<&str>) -> Value {
    match payload {
        None => Value::Null,
        Some(text) => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_value() {
        assert_eq!(payload_value(None), Value::Null);
        assert_eq!(payload_value(Some(r#"{"a": 1}"#)), json!({ "a": 1 }));
        assert_eq!(payload_value(Some("softly now")), json!("softly now"));
    }

    #[test]
    fn test_summary_json_shape() {
        let stmt = Statement::new(
            4,
            StatementKind::Remember {
                key: "peace".into(),
                value: "stillness".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(StatementSummary::of(&stmt)).unwrap(),
            json!({ "type": "remember", "line": 4, "key": "peace", "value": "stillness" })
        );
    }

    #[test]
    fn test_emit_summary_keeps_null_payload() {
        let stmt = Statement::new(
            1,
            StatementKind::Emit {
                topic: "wake".into(),
                payload: None,
            },
        );
        assert_eq!(
            serde_json::to_value(StatementSummary::of(&stmt)).unwrap(),
            json!({ "type": "emit", "line": 1, "topic": "wake", "payload": null })
        );
    }
}
