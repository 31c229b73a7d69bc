use dao_types::{CommentaryRecord, SimilarityBand, SimilarityPair, Stance};

use crate::corpus::Chapter;
use std::collections::BTreeSet;

// ── Commentator profiles ─────────────────────────────────────────────────

/// Static scholarly profile of one historical commentator.
#[derive(Debug, Clone, Copy)]
pub struct CommentatorProfile {
    /// Field prefix in the data file (`{id}_note`)
    pub id: &'static str,
    pub name: &'static str,
    pub era: &'static str,
    pub school: &'static str,
    pub style: &'static str,
    pub focus: &'static str,
}

const fn profile(
    id: &'static str,
    name: &'static str,
    era: &'static str,
    school: &'static str,
    style: &'static str,
    focus: &'static str,
) -> CommentatorProfile {
    CommentatorProfile {
        id,
        name,
        era,
        school,
        style,
        focus,
    }
}

/// All commentators whose texts the corpus may carry, in canonical order.
pub const COMMENTATORS: &[CommentatorProfile] = &[
    profile("wangbi", "王弼", "魏晋（226-249）", "贵无派", "思辨哲学", "本体论"),
    profile("heshanggong", "河上公", "西汉（公元前2-1世纪）", "黄老道家", "养生修炼", "修身治国"),
    profile("hanshandeqing", "憨山德清", "明（1546-1623）", "佛道融合", "禅意融合", "心性修养"),
    profile("wangfuzhi", "王夫之", "明末清初（1619-1692）", "唯物主义", "辩证思维", "变动哲学"),
    profile("suzhe", "苏辙", "北宋（1039-1112）", "理学影响", "平实通达", "处世哲学"),
    profile("lihanxu", "李涵虚", "清（1806-1856）", "西派丹法", "内丹修炼", "丹道修炼"),
    profile("huangyuanji", "黄元吉", "清（？）", "中派丹法", "性命双修", "内丹实修"),
    profile("weiyuan", "魏源", "清（1794-1857）", "经世致用", "务实改革", "社会改革"),
    profile("xianger", "想尔注", "东汉（张陵/张道陵）", "早期道教", "宗教教诫", "宗教修行"),
    profile("yanzun", "严遵", "西汉（公元前53-18）", "黄老学派", "宇宙生成", "天道自然"),
    profile("wanganshi", "王安石", "北宋（1021-1086）", "荆公新学", "经世致用", "政治改革"),
];

// ── Stance classification ────────────────────────────────────────────────

/// Ordered keyword buckets for stance classification. The first bucket
/// whose keyword set intersects the text wins, so the order here IS the
/// precedence policy: cultivation before statecraft before doctrinal.
pub const STANCE_BUCKETS: &[(Stance, &[&str])] = &[
    (Stance::Cultivation, &["气", "丹", "修炼", "精气神", "玄关"]),
    (Stance::Statecraft, &["治国", "帝王", "政治", "天下", "百姓"]),
    (Stance::Doctrinal, &["理", "性", "心", "本体", "玄妙"]),
];

pub fn classify_stance(text: &str) -> Stance {
    if text.is_empty() {
        return Stance::Neutral;
    }
    for &(stance, keywords) in STANCE_BUCKETS {
        if keywords.iter().any(|k| text.contains(k)) {
            return stance;
        }
    }
    Stance::Neutral
}

// ── Key terms ────────────────────────────────────────────────────────────

/// Salient terms looked for in commentary texts, in fixed reporting order.
pub const KEY_TERMS: &[&str] = &[
    "气", "神", "虚", "静", "动", "阴阳", "太极", "心", "性", "命", "精", "意", "念", "治国",
    "修身", "养生", "炼丹", "性命", "本体", "功用", "工夫", "境界", "自然", "无为", "有为",
    "玄妙", "天地", "万物", "圣人", "百姓",
];

const MAX_KEY_TERMS: usize = 5;

/// Intersect the text against the fixed term list; list order, capped.
pub fn key_terms(text: &str) -> Vec<String> {
    KEY_TERMS
        .iter()
        .filter(|t| text.contains(*t))
        .take(MAX_KEY_TERMS)
        .map(|t| (*t).to_string())
        .collect()
}

// ── Similarity ───────────────────────────────────────────────────────────

/// Jaccard similarity over the character sets of two texts. Zero when
/// either text is empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: BTreeSet<char> = a.chars().collect();
    let set_b: BTreeSet<char> = b.chars().collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Banding thresholds for similarity scores. Inherited policy values, kept
/// adjustable rather than hard-coded.
#[derive(Debug, Clone)]
pub struct SimilarityBands {
    pub close: f64,
    pub partial: f64,
    pub divergent: f64,
}

impl Default for SimilarityBands {
    fn default() -> Self {
        SimilarityBands {
            close: 0.5,
            partial: 0.3,
            divergent: 0.1,
        }
    }
}

impl SimilarityBands {
    pub fn band(&self, score: f64) -> SimilarityBand {
        if score > self.close {
            SimilarityBand::Close
        } else if score > self.partial {
            SimilarityBand::Partial
        } else if score > self.divergent {
            SimilarityBand::Divergent
        } else {
            SimilarityBand::Distinct
        }
    }
}

// ── Per-chapter analysis ─────────────────────────────────────────────────

/// Number of characters of commentary kept as the record excerpt.
const EXCERPT_CHARS: usize = 500;

/// Analyze one chapter: classify each collected commentary and compute all
/// pairwise similarities, sorted by descending score.
pub fn analyze(
    chapter: &Chapter,
    bands: &SimilarityBands,
) -> (Vec<CommentaryRecord>, Vec<SimilarityPair>) {
    // (id, full text) for every commentator with collected text
    let collected: Vec<(&'static str, &str)> = COMMENTATORS
        .iter()
        .filter_map(|p| chapter.commentary(p.id).map(|t| (p.id, t)))
        .collect();

    let records: Vec<CommentaryRecord> = COMMENTATORS
        .iter()
        .filter_map(|p| {
            let text = chapter.commentary(p.id)?;
            Some(CommentaryRecord {
                chapter: chapter.chapter,
                commentator: p.id.to_string(),
                name: p.name.to_string(),
                era: p.era.to_string(),
                school: p.school.to_string(),
                text: text.chars().take(EXCERPT_CHARS).collect(),
                text_length: text.chars().count(),
                key_terms: key_terms(text),
                stance: classify_stance(text),
                focus: p.focus.to_string(),
                style: p.style.to_string(),
            })
        })
        .collect();

    let mut pairs = Vec::new();
    for i in 0..collected.len() {
        for j in (i + 1)..collected.len() {
            let (id_a, text_a) = collected[i];
            let (id_b, text_b) = collected[j];
            let score = jaccard(text_a, text_b);
            pairs.push(SimilarityPair {
                commentator_a: id_a.to_string(),
                commentator_b: id_b.to_string(),
                score,
                band: bands.band(score),
            });
        }
    }
    pairs.sort_by(|a, b| b.score.total_cmp(&a.score));

    (records, pairs)
}
