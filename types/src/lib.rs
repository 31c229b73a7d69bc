use serde::{Deserialize, Serialize};

// ── Concept graph ────────────────────────────────────────────────────────

/// One concept observed in the corpus. `size` is a rendering weight only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Static importance ranking, 1 = most central
    pub tier: u8,
    pub size: u32,
    pub chapters: Vec<u32>,
}

/// Co-occurrence edge between two concepts. `source < target` always holds;
/// the weight is the number of distinct chapters where both appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
    pub relation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub concept_count: usize,
    pub edge_count: usize,
}

/// An entry in the corpus-wide concept index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptIndexEntry {
    pub concept: String,
    pub chapter_count: usize,
    pub chapters: Vec<u32>,
}

// ── Commentary spectrum ──────────────────────────────────────────────────

/// Coarse interpretive orientation of one commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    /// 修炼向 – inner cultivation / alchemy
    #[serde(rename = "修炼向")]
    Cultivation,
    /// 治世向 – statecraft / governance
    #[serde(rename = "治世向")]
    Statecraft,
    /// 义理向 – doctrinal / ontological
    #[serde(rename = "义理向")]
    Doctrinal,
    /// 中性 – no clear leaning
    #[serde(rename = "中性")]
    Neutral,
}

impl Stance {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Cultivation => "修炼向",
            Self::Statecraft => "治世向",
            Self::Doctrinal => "义理向",
            Self::Neutral => "中性",
        }
    }
}

/// One commentator's analyzed commentary for a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentaryRecord {
    pub chapter: u32,
    pub commentator: String,
    pub name: String,
    pub era: String,
    pub school: String,
    /// Leading excerpt of the commentary (capped, not the full text)
    pub text: String,
    pub text_length: usize,
    pub key_terms: Vec<String>,
    pub stance: Stance,
    pub focus: String,
    pub style: String,
}

/// How close two commentary texts are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityBand {
    /// 观点相近 – similarity > 0.5
    #[serde(rename = "观点相近")]
    Close,
    /// 部分相关 – similarity > 0.3
    #[serde(rename = "部分相关")]
    Partial,
    /// 有差异 – similarity > 0.1
    #[serde(rename = "有差异")]
    Divergent,
    /// 角度不同 – similarity ≤ 0.1
    #[serde(rename = "角度不同")]
    Distinct,
}

impl SimilarityBand {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Close => "观点相近",
            Self::Partial => "部分相关",
            Self::Divergent => "有差异",
            Self::Distinct => "角度不同",
        }
    }
}

/// Pairwise character-set Jaccard similarity between two commentators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub commentator_a: String,
    pub commentator_b: String,
    pub score: f64,
    pub band: SimilarityBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterMember {
    pub commentator: String,
    pub name: String,
    pub key_terms: Vec<String>,
}

/// Commentators grouped by stance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StanceCluster {
    pub stance: Stance,
    pub members: Vec<ClusterMember>,
}

/// Full commentary-stance comparison for one chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSpectrum {
    pub chapter: u32,
    pub commentaries: Vec<CommentaryRecord>,
    /// Top pairs by descending similarity
    pub comparisons: Vec<SimilarityPair>,
    pub clusters: Vec<StanceCluster>,
    pub summary: String,
}

// ── Archaeology report ───────────────────────────────────────────────────

/// One manuscript version's text for a chapter. `text == None` means the
/// witness has no surviving text for the chapter – distinct from "".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionText {
    pub version: String,
    pub name: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub note: String,
}

/// A detected difference between a manuscript witness and the received text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VariantRecord {
    /// A curated, historically explained character substitution
    KnownSubstitution {
        ancient: String,
        received: String,
        reason: String,
        significance: String,
    },
    /// An undocumented structural difference found by token diff
    StructuralDiff {
        version: String,
        description: String,
        diff_sample: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticShift {
    pub period: String,
    pub description: String,
    pub significance: String,
}

/// Cross-manuscript comparison for one chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterArchaeology {
    pub chapter: u32,
    pub versions: Vec<VersionText>,
    pub variants: Vec<VariantRecord>,
    pub semantic_shifts: Vec<SemanticShift>,
}

// ── Composed query shapes ────────────────────────────────────────────────

/// The "chapter knowledge graph" query: corpus-wide concept graph plus the
/// requested chapter's commentary spectrum (absent for unknown chapters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterKnowledgeGraph {
    pub concept_graph: ConceptGraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary_spectrum: Option<ChapterSpectrum>,
}

/// A chapter's received text with difficult-term markup applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedChapter {
    pub chapter: u32,
    pub original: String,
    pub annotated: String,
}
