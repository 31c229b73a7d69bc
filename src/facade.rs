use dao_types::{
    AnnotatedChapter, ChapterKnowledgeGraph, ChapterSpectrum, ClusterMember, ConceptGraph,
    ConceptIndexEntry, StanceCluster, Stance,
};

use crate::annotate::TextAnnotator;
use crate::commentary::{self, SimilarityBands};
use crate::concept::ConceptExtractor;
use crate::corpus::CorpusStore;
use crate::dictionary::DIFFICULT_TERMS;
use crate::graph::{self, GraphParams};

/// Analysis policy knobs, with the inherited defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsParams {
    pub graph: GraphParams,
    pub bands: SimilarityBands,
}

const MAX_COMPARISONS: usize = 10;

/// Fixed reporting order for stance clusters.
const CLUSTER_ORDER: &[Stance] = &[
    Stance::Cultivation,
    Stance::Statecraft,
    Stance::Doctrinal,
    Stance::Neutral,
];

/// Composes the analysis components into the query shapes the web layer
/// consumes. All derived results are recomputed on demand from the cached
/// corpus snapshot; components only ever meet here.
pub struct Analytics {
    store: CorpusStore,
    params: AnalyticsParams,
    annotator: TextAnnotator,
}

impl Analytics {
    pub fn new(store: CorpusStore) -> Self {
        Self::with_params(store, AnalyticsParams::default())
    }

    pub fn with_params(store: CorpusStore, params: AnalyticsParams) -> Self {
        Analytics {
            store,
            params,
            annotator: TextAnnotator::new(),
        }
    }

    /// Drop the cached corpus; the next query re-reads the data file.
    pub fn invalidate(&mut self) {
        self.store.invalidate();
    }

    /// Scan every chapter exactly once into a fresh extractor.
    fn scan_concepts(&mut self) -> ConceptExtractor {
        let corpus = self.store.get();
        let mut extractor = ConceptExtractor::new();
        for chapter in &corpus.chapters {
            extractor.scan(chapter.chapter, &chapter.original);
        }
        extractor
    }

    /// The corpus-wide concept co-occurrence graph.
    pub fn concept_graph(&mut self) -> ConceptGraph {
        let extractor = self.scan_concepts();
        graph::build(&extractor, &self.params.graph)
    }

    /// Concept graph plus the requested chapter's commentary spectrum.
    pub fn chapter_graph(&mut self, chapter_id: u32) -> ChapterKnowledgeGraph {
        ChapterKnowledgeGraph {
            concept_graph: self.concept_graph(),
            commentary_spectrum: self.chapter_spectrum(chapter_id),
        }
    }

    /// Commentary-stance comparison for one chapter; `None` for unknown ids.
    pub fn chapter_spectrum(&mut self, chapter_id: u32) -> Option<ChapterSpectrum> {
        let bands = self.params.bands.clone();
        let chapter = self.store.chapter(chapter_id)?;
        let (records, mut pairs) = commentary::analyze(chapter, &bands);
        pairs.truncate(MAX_COMPARISONS);

        let clusters: Vec<StanceCluster> = CLUSTER_ORDER
            .iter()
            .map(|&stance| StanceCluster {
                stance,
                members: records
                    .iter()
                    .filter(|r| r.stance == stance)
                    .map(|r| ClusterMember {
                        commentator: r.commentator.clone(),
                        name: r.name.clone(),
                        key_terms: r.key_terms.clone(),
                    })
                    .collect(),
            })
            .collect();

        let summary = summarize(&records.iter().map(|r| r.stance).collect::<Vec<_>>());

        Some(ChapterSpectrum {
            chapter: chapter_id,
            commentaries: records,
            comparisons: pairs,
            clusters,
            summary,
        })
    }

    /// Cross-manuscript comparison for one chapter; `None` for unknown ids.
    pub fn chapter_archaeology(&mut self, chapter_id: u32) -> Option<dao_types::ChapterArchaeology> {
        let chapter = self.store.chapter(chapter_id)?;
        Some(crate::variants::compare(chapter))
    }

    /// Every observed concept with its chapter index, most widespread first.
    pub fn concept_index(&mut self) -> Vec<ConceptIndexEntry> {
        let extractor = self.scan_concepts();
        let mut entries: Vec<ConceptIndexEntry> = extractor
            .concept_chapters()
            .iter()
            .map(|(concept, chapters)| ConceptIndexEntry {
                concept: concept.clone(),
                chapter_count: chapters.len(),
                chapters: chapters.iter().copied().collect(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.chapter_count
                .cmp(&a.chapter_count)
                .then_with(|| a.concept.cmp(&b.concept))
        });
        entries
    }

    /// A chapter's received text with difficult-term markup applied.
    pub fn annotated_chapter(&mut self, chapter_id: u32) -> Option<AnnotatedChapter> {
        let chapter = self.store.chapter(chapter_id)?;
        let original = chapter.original.clone();
        let chapter_no = chapter.chapter;
        let annotated = self.annotator.annotate(&original, DIFFICULT_TERMS);
        Some(AnnotatedChapter {
            chapter: chapter_no,
            original,
            annotated,
        })
    }

    pub fn chapter_ids(&mut self) -> Vec<u32> {
        self.store.get().chapters.iter().map(|c| c.chapter).collect()
    }
}

/// One-line chapter summary: commentary count, then per-stance counts in
/// descending order, neutral omitted.
fn summarize(stances: &[Stance]) -> String {
    if stances.is_empty() {
        return "本章暂无注释".to_string();
    }
    let mut parts = vec![format!("本章共有{}家注释", stances.len())];

    let mut counts: Vec<(Stance, usize)> = CLUSTER_ORDER
        .iter()
        .map(|&s| (s, stances.iter().filter(|&&x| x == s).count()))
        .collect();
    counts.sort_by_key(|&(_, n)| std::cmp::Reverse(n));

    for (stance, n) in counts {
        if n > 0 && stance != Stance::Neutral {
            parts.push(format!("{}注释{}家", stance.as_label(), n));
        }
    }
    parts.join("，")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Chapter, Corpus};

    fn chapter(json: &str) -> Chapter {
        serde_json::from_str(json).expect("chapter json")
    }

    fn two_chapter_analytics() -> Analytics {
        let corpus = Corpus {
            title: "道德经".to_string(),
            chapters: vec![
                chapter(r#"{"chapter": 1, "original": "道可道非常道"}"#),
                chapter(r#"{"chapter": 2, "original": "圣人处无为之事"}"#),
            ],
        };
        Analytics::new(CorpusStore::from_corpus(corpus))
    }

    #[test]
    fn test_two_chapter_corpus_has_no_edges() {
        let mut analytics = two_chapter_analytics();
        let graph = analytics.concept_graph();
        // 道 and 无为 never share a chapter; within-chapter pairs are weight 1
        assert!(graph.edges.is_empty());
        assert!(graph.nodes.iter().any(|n| n.id == "道"));
        assert!(graph.nodes.iter().any(|n| n.id == "无为"));
    }

    #[test]
    fn test_concept_index_sorted_by_spread() {
        let mut analytics = two_chapter_analytics();
        let index = analytics.concept_index();
        assert!(!index.is_empty());
        for pair in index.windows(2) {
            assert!(pair[0].chapter_count >= pair[1].chapter_count);
        }
    }

    #[test]
    fn test_spectrum_for_unknown_chapter_is_none() {
        let mut analytics = two_chapter_analytics();
        assert!(analytics.chapter_spectrum(99).is_none());
        assert!(analytics.chapter_archaeology(99).is_none());
        assert!(analytics.annotated_chapter(99).is_none());
    }

    #[test]
    fn test_invalidate_drops_snapshot() {
        let mut analytics = two_chapter_analytics();
        assert_eq!(analytics.chapter_ids(), vec![1, 2]);
        analytics.invalidate();
        // The test store has no backing file, so re-load is the skeleton
        assert!(analytics.chapter_ids().is_empty());
    }

    #[test]
    fn test_spectrum_clusters_and_summary() {
        let corpus = Corpus {
            title: "道德经".to_string(),
            chapters: vec![chapter(
                r#"{
                    "chapter": 10,
                    "original": "载营魄抱一",
                    "heshanggong_note": "气神虚静，天地万物",
                    "weiyuan_note": "治国帝王政治天下"
                }"#,
            )],
        };
        let mut analytics = Analytics::new(CorpusStore::from_corpus(corpus));
        let spectrum = analytics.chapter_spectrum(10).expect("spectrum");

        assert_eq!(spectrum.commentaries.len(), 2);
        assert_eq!(spectrum.comparisons.len(), 1);

        let cultivation = spectrum
            .clusters
            .iter()
            .find(|c| c.stance == Stance::Cultivation)
            .expect("cultivation cluster");
        assert_eq!(cultivation.members.len(), 1);
        assert_eq!(cultivation.members[0].commentator, "heshanggong");

        assert!(spectrum.summary.starts_with("本章共有2家注释"));
        assert!(spectrum.summary.contains("修炼向注释1家"));
        assert!(spectrum.summary.contains("治世向注释1家"));
    }

    #[test]
    fn test_empty_chapter_summary() {
        let corpus = Corpus {
            title: "道德经".to_string(),
            chapters: vec![chapter(r#"{"chapter": 5, "original": "天地不仁"}"#)],
        };
        let mut analytics = Analytics::new(CorpusStore::from_corpus(corpus));
        let spectrum = analytics.chapter_spectrum(5).expect("spectrum");
        assert_eq!(spectrum.summary, "本章暂无注释");
        assert!(spectrum.commentaries.is_empty());
    }

    #[test]
    fn test_annotated_chapter_wraps_difficult_terms() {
        let corpus = Corpus {
            title: "道德经".to_string(),
            chapters: vec![chapter(r#"{"chapter": 6, "original": "谷神不死，是谓玄牝"}"#)],
        };
        let mut analytics = Analytics::new(CorpusStore::from_corpus(corpus));
        let annotated = analytics.annotated_chapter(6).expect("annotated");
        assert!(annotated.annotated.contains(">谷神</span>"));
        assert!(annotated.annotated.contains(">玄牝</span>"));
        assert_eq!(annotated.original, "谷神不死，是谓玄牝");
    }
}
