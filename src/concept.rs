use std::collections::{BTreeMap, BTreeSet};

// ── Vocabulary ───────────────────────────────────────────────────────────

/// Single-character core concepts. Each character is a concept of its own;
/// matching is plain containment, not tokenization.
pub const CORE_CHARS: &[char] = &[
    '道', '德', '无', '为', '有', '朴', '虚', '静', '自', '然', '治', '身', '观', '守', '抱',
    '持', '养',
];

/// Curated multi-character concept terms tracked across the corpus.
pub const COMPOUND_TERMS: &[&str] = &[
    "无为", "自然", "虚静", "守中", "抱一", "归根", "复命", "玄同", "玄牝", "谷神", "朴器",
    "圣人", "百姓", "天地", "万物", "天下", "上善", "若水", "不争", "柔弱", "知足", "清静",
    "无事", "无味", "无欲", "绝圣", "弃智", "见素", "抱朴", "少私", "寡欲", "玄德", "微妙",
    "玄通", "玄览",
];

/// Static importance ranking of a concept, 1 = most central.
pub fn concept_tier(concept: &str) -> u8 {
    match concept {
        "道" | "德" => 1,
        "无" | "有" | "无为" | "自然" | "朴" => 2,
        "天" | "地" | "万物" | "圣人" => 3,
        _ => 4,
    }
}

// ── Extractor ────────────────────────────────────────────────────────────

/// Scans chapter text against the concept vocabulary and accumulates a
/// per-concept chapter index plus a pairwise co-occurrence counter.
///
/// Co-occurrence is chapter-level: two concepts co-occur when both appear
/// anywhere in the same chapter. Pair keys are kept with `a < b`, so the
/// counter is symmetric by construction.
#[derive(Debug, Default)]
pub struct ConceptExtractor {
    concept_chapters: BTreeMap<String, BTreeSet<u32>>,
    cooccurrence: BTreeMap<(String, String), u32>,
    seen_chapters: BTreeSet<u32>,
}

impl ConceptExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the concept set of one chapter's text.
    pub fn extract(text: &str) -> BTreeSet<String> {
        let mut concepts = BTreeSet::new();
        for ch in text.chars() {
            if CORE_CHARS.contains(&ch) {
                concepts.insert(ch.to_string());
            }
        }
        for term in COMPOUND_TERMS {
            if text.contains(term) {
                concepts.insert((*term).to_string());
            }
        }
        concepts
    }

    /// Record one chapter's concept set. A chapter id that was already
    /// accumulated is ignored, so repeat calls can never double-count.
    pub fn accumulate(&mut self, chapter_id: u32, concepts: &BTreeSet<String>) {
        if !self.seen_chapters.insert(chapter_id) {
            return;
        }
        for c in concepts {
            self.concept_chapters
                .entry(c.clone())
                .or_default()
                .insert(chapter_id);
        }
        let list: Vec<&String> = concepts.iter().collect();
        for i in 0..list.len() {
            for j in (i + 1)..list.len() {
                // BTreeSet iteration is sorted, so list[i] < list[j]
                *self
                    .cooccurrence
                    .entry((list[i].clone(), list[j].clone()))
                    .or_insert(0) += 1;
            }
        }
    }

    /// Extract and accumulate in one step.
    pub fn scan(&mut self, chapter_id: u32, text: &str) -> BTreeSet<String> {
        let concepts = Self::extract(text);
        self.accumulate(chapter_id, &concepts);
        concepts
    }

    pub fn concept_chapters(&self) -> &BTreeMap<String, BTreeSet<u32>> {
        &self.concept_chapters
    }

    pub fn cooccurrence(&self) -> &BTreeMap<(String, String), u32> {
        &self.cooccurrence
    }

    /// Co-occurrence weight of a concept pair, in either argument order.
    pub fn weight(&self, a: &str, b: &str) -> u32 {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        self.cooccurrence.get(&key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_concept_chapter() {
        let concepts = ConceptExtractor::extract("道可道非常道");
        assert!(concepts.contains("道"));
        assert_eq!(concepts.len(), 1);
    }

    #[test]
    fn test_extract_compound_terms() {
        let concepts = ConceptExtractor::extract("圣人处无为之事");
        assert!(concepts.contains("无为"));
        assert!(concepts.contains("圣人"));
        // The characters of 无为 are concepts in their own right
        assert!(concepts.contains("无"));
        assert!(concepts.contains("为"));
    }

    #[test]
    fn test_accumulate_builds_chapter_index() {
        let mut ex = ConceptExtractor::new();
        ex.scan(1, "道可道非常道");
        ex.scan(2, "道法自然");
        let chapters = &ex.concept_chapters()["道"];
        assert_eq!(chapters.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_cooccurrence_weight_is_symmetric() {
        let mut ex = ConceptExtractor::new();
        ex.scan(1, "道法自然");
        ex.scan(2, "道常自然");
        assert_eq!(ex.weight("道", "自然"), ex.weight("自然", "道"));
        assert_eq!(ex.weight("道", "自然"), 2);
    }

    #[test]
    fn test_repeat_accumulate_does_not_double_count() {
        let mut ex = ConceptExtractor::new();
        let concepts = ConceptExtractor::extract("道法自然");
        ex.accumulate(5, &concepts);
        ex.accumulate(5, &concepts);
        assert_eq!(ex.weight("道", "自然"), 1);
        assert_eq!(ex.concept_chapters()["道"].len(), 1);
    }

    #[test]
    fn test_concept_tiers() {
        assert_eq!(concept_tier("道"), 1);
        assert_eq!(concept_tier("无为"), 2);
        assert_eq!(concept_tier("圣人"), 3);
        assert_eq!(concept_tier("谷神"), 4);
    }
}
