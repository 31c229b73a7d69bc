use dao_types::{ConceptGraph, GraphEdge, GraphNode};

use crate::concept::{concept_tier, ConceptExtractor};

/// Graph construction policy. The defaults are inherited corpus-scale
/// choices, not invariants, so they stay adjustable.
#[derive(Debug, Clone)]
pub struct GraphParams {
    /// Pairs below this chapter-co-occurrence weight are dropped as noise
    pub min_edge_weight: u32,
}

impl Default for GraphParams {
    fn default() -> Self {
        GraphParams { min_edge_weight: 2 }
    }
}

/// Known semantic relations between specific concept pairs. This table is
/// curated scholarship, not inference; extending coverage means editing it.
/// Lookup is order-insensitive.
pub const KNOWN_RELATIONS: &[(&str, &str, &str)] = &[
    ("无", "有", "对立统一"),
    ("道", "无", "包含关系"),
    ("道", "有", "包含关系"),
    ("无为", "自然", "方法关系"),
    ("天", "地", "并列关系"),
    ("阴", "阳", "对立统一"),
    ("水", "善", "比喻关系"),
    ("婴儿", "朴", "比喻关系"),
];

/// Relation label for a concept pair; unmapped pairs are generically
/// associative.
pub fn infer_relation(a: &str, b: &str) -> &'static str {
    for &(x, y, label) in KNOWN_RELATIONS {
        if (a == x && b == y) || (a == y && b == x) {
            return label;
        }
    }
    "关联关系"
}

/// Materialize the node/edge graph from accumulated extractor state.
pub fn build(extractor: &ConceptExtractor, params: &GraphParams) -> ConceptGraph {
    let nodes: Vec<GraphNode> = extractor
        .concept_chapters()
        .iter()
        .map(|(concept, chapters)| GraphNode {
            id: concept.clone(),
            tier: concept_tier(concept),
            size: 10 + 2 * chapters.len() as u32,
            chapters: chapters.iter().copied().collect(),
        })
        .collect();

    let edges: Vec<GraphEdge> = extractor
        .cooccurrence()
        .iter()
        .filter(|&(_, &weight)| weight >= params.min_edge_weight)
        .map(|((a, b), &weight)| GraphEdge {
            source: a.clone(),
            target: b.clone(),
            weight,
            relation: infer_relation(a, b).to_string(),
        })
        .collect();

    ConceptGraph {
        concept_count: nodes.len(),
        edge_count: edges.len(),
        nodes,
        edges,
    }
}
