//! Parse-then-lower tests over whole poems.

use poetica_lower::hash::short_hash;
use poetica_lower::{DEFAULT_GENE_NAME, lower};
use poetica_parser::parse;
use serde_json::json;

// =============================================================================
// Gene synthesis
// =============================================================================

#[test]
fn test_single_emit_without_genes_yields_one_gene() {
    let doc = lower(&parse("emit \"wake\""));
    assert_eq!(doc.genes.len(), 1);
    let gene = &doc.genes[0];
    assert_eq!(gene.name, "emit:wake");
    assert_eq!(gene.desc, "Emit wake signal");
    assert_eq!(gene.extensions.topic.as_deref(), Some("wake"));
}

#[test]
fn test_standalone_use_gene() {
    let doc = lower(&parse("use fibonacci.spiral(depth: 7)"));
    let gene = doc.gene("tool:fibonacci_spiral").unwrap();
    assert_eq!(gene.inputs, vec!["depth"]);
    assert_eq!(gene.ops, vec!["tool:fibonacci.spiral"]);
}

#[test]
fn test_emit_and_use_attach_to_declared_gene() {
    let source = "gene breathe:\n  cmd: breathe\n\nemit \"inhale\"\nuse lung.fill\nthe chest rises";
    let doc = lower(&parse(source));
    assert_eq!(doc.genes.len(), 1);
    let gene = &doc.genes[0];
    assert_eq!(gene.cmd.as_deref(), Some("breathe"));
    assert_eq!(
        gene.ops,
        vec!["pheromone.emit", "pheromone.emit", "tool:lung.fill"]
    );
    assert_eq!(gene.estimate["pheromone.emit"], 2);
    let kinds: Vec<_> = gene.statements.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec!["emit", "use", "text"]);
}

#[test]
fn test_prose_only_lands_in_default_gene() {
    let doc = lower(&parse("name quiet\nthe pond is still\nremember calm: yes"));
    assert_eq!(doc.genes.len(), 1);
    let gene = &doc.genes[0];
    assert_eq!(gene.name, DEFAULT_GENE_NAME);
    assert_eq!(gene.statements.len(), 3);
    assert_eq!(gene.tags, vec!["bio_poetica", "auto_generated"]);
    assert_eq!(doc.meta.program_name, "quiet");
}

// =============================================================================
// Trigger isolation
// =============================================================================

#[test]
fn test_when_yields_trigger_gene() {
    let doc = lower(&parse("when dawn:\n  emit \"light\""));
    assert_eq!(doc.genes.len(), 1);
    let gene = &doc.genes[0];
    assert_eq!(gene.name, format!("trigger:when_{}", short_hash("dawn")));
    assert_eq!(gene.desc, "Trigger when dawn");
    assert_eq!(gene.ops, vec!["event.listen", "pheromone.emit"]);
    let body = gene.extensions.body.as_ref().unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].topic.as_deref(), Some("light"));
}

#[test]
fn test_trigger_does_not_touch_pending_buffer() {
    let source = "gene a:\n\nfirst thought\nwhen dusk:\n  emit \"dark\"\nsecond thought";
    let doc = lower(&parse(source));
    assert_eq!(doc.genes.len(), 2);
    let declared = doc.gene("a").unwrap();
    let texts: Vec<_> = declared
        .statements
        .iter()
        .filter_map(|s| s.text.as_deref())
        .collect();
    assert_eq!(texts, vec!["first thought", "second thought"]);
    assert_eq!(declared.ops, vec!["pheromone.emit"]);
}

// =============================================================================
// Document
// =============================================================================

#[test]
fn test_document_json_shape() {
    let doc = lower(&parse("name garden\nemit \"hello\" {\"msg\": \"world\"}"));
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["krsp_version"], "1");
    assert_eq!(value["source"], "bio_poetica");
    assert_eq!(
        value["meta"],
        json!({ "program_name": "garden", "consciousness_level": 0, "dna_mutations": [] })
    );
    let genes = value["genes"].as_array().unwrap();
    assert_eq!(genes.len(), 2);
    assert_eq!(genes[0]["name"], "emit:hello");
    assert_eq!(genes[0]["x-payload"], json!({ "msg": "world" }));
    assert_eq!(genes[1]["name"], "bio:main");
    assert_eq!(genes[1]["x-statements"][0]["type"], "name");
}

#[test]
fn test_consciousness_level_sums_top_level_scores() {
    let doc = lower(&parse("    deep\n  mid\nflat"));
    // 4 spaces: 2 + 1, 2 spaces: 1 + 1, none: 0
    assert_eq!(doc.meta.consciousness_level, 5);
}

#[test]
fn test_lowering_is_deterministic() {
    let program = parse("when a:\n  emit \"b\"\ngene g:\n\nuse t.x\nprose");
    assert_eq!(lower(&program), lower(&program));
}
