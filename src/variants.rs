use dao_types::{ChapterArchaeology, SemanticShift, VariantRecord, VersionText};

use crate::corpus::Chapter;

// ── Version profiles ─────────────────────────────────────────────────────

/// Static profile of one manuscript version of the text.
#[derive(Debug, Clone, Copy)]
pub struct VersionProfile {
    /// Field prefix in the data file (`{id}_text`, `{id}_diff`)
    pub id: &'static str,
    pub name: &'static str,
    pub period: &'static str,
    /// Shift label used when the witness carries a curated diff note
    pub shift_period: &'static str,
    pub shift_significance: &'static str,
}

/// Excavated manuscript witnesses, oldest first.
pub const WITNESSES: &[VersionProfile] = &[
    VersionProfile {
        id: "guodian",
        name: "郭店楚简",
        period: "战国中期（约公元前4世纪）",
        shift_period: "战国→现代",
        shift_significance: "早期版本的原始语义",
    },
    VersionProfile {
        id: "postsilk",
        name: "马王堆帛书",
        period: "西汉早期（约公元前2世纪）",
        shift_period: "西汉→现代",
        shift_significance: "汉代文本的过渡形态",
    },
];

/// The received text is the Wang Bi recension.
pub const RECEIVED: VersionProfile = VersionProfile {
    id: "received",
    name: "王弼本（通行本）",
    period: "魏晋（3世纪）",
    shift_period: "",
    shift_significance: "",
};

// ── Known substitutions ──────────────────────────────────────────────────

/// A lexical substitution the transmission history is known to have made.
#[derive(Debug, Clone, Copy)]
pub struct Substitution {
    pub ancient: &'static str,
    pub received: &'static str,
    pub reason: &'static str,
    pub significance: &'static str,
}

/// Curated substitution knowledge (e.g. Han imperial-name taboos). When the
/// received form appears in a chapter, the record explains the history.
/// Extending coverage means editing this table.
pub const KNOWN_SUBSTITUTIONS: &[Substitution] = &[
    Substitution {
        ancient: "恒",
        received: "常",
        reason: "避汉文帝刘恒讳改为常",
        significance: "恒意为长久、永恒，比常更贴切老子原意",
    },
    Substitution {
        ancient: "已",
        received: "矣",
        reason: "字形演变",
        significance: "虚词用法的变化",
    },
    Substitution {
        ancient: "邦",
        received: "国",
        reason: "避汉高祖刘邦讳改为国",
        significance: "邦更强调政治实体",
    },
    Substitution {
        ancient: "光",
        received: "旷",
        reason: "文字演变",
        significance: "词义从光明变为宽广",
    },
];

// ── Comparison ───────────────────────────────────────────────────────────

const DIFF_SAMPLE_CHARS: usize = 50;

/// Align the received text against the manuscript witnesses: version texts,
/// substitution records, a generic fallback diff, and semantic-shift notes.
///
/// A witness with no surviving text for the chapter contributes nothing –
/// absence is meaningful and distinct from an empty string.
pub fn compare(chapter: &Chapter) -> ChapterArchaeology {
    let received_text = chapter.original.as_str();

    let mut versions = Vec::new();
    let mut variants = Vec::new();
    let mut semantic_shifts = Vec::new();

    for w in WITNESSES {
        let Some(text) = chapter.witness_text(w.id) else {
            continue;
        };
        let note = chapter.witness_note(w.id).unwrap_or("").to_string();
        versions.push(VersionText {
            version: w.id.to_string(),
            name: w.name.to_string(),
            period: w.period.to_string(),
            text: Some(text.to_string()),
            note,
        });

        // Undocumented structural differences: generic token diff
        let diff = token_diff(received_text, text);
        if !diff.is_empty() {
            variants.push(VariantRecord::StructuralDiff {
                version: w.id.to_string(),
                description: format!("{}与通行本在句式上存在差异", w.name),
                diff_sample: diff.join(" ").chars().take(DIFF_SAMPLE_CHARS).collect(),
            });
        }

        if let Some(diff_note) = chapter.witness_note(w.id) {
            semantic_shifts.push(SemanticShift {
                period: w.shift_period.to_string(),
                description: diff_note.to_string(),
                significance: w.shift_significance.to_string(),
            });
        }
    }

    // The received text always closes the version sequence
    versions.push(VersionText {
        version: RECEIVED.id.to_string(),
        name: RECEIVED.name.to_string(),
        period: RECEIVED.period.to_string(),
        text: Some(received_text.to_string()),
        note: "原文".to_string(),
    });

    // Curated substitutions, keyed on the received form
    for s in KNOWN_SUBSTITUTIONS {
        if received_text.contains(s.received) {
            variants.push(VariantRecord::KnownSubstitution {
                ancient: s.ancient.to_string(),
                received: s.received.to_string(),
                reason: s.reason.to_string(),
                significance: s.significance.to_string(),
            });
        }
    }

    ChapterArchaeology {
        chapter: chapter.chapter,
        versions,
        variants,
        semantic_shifts,
    }
}

/// Word-level diff between the received text and a witness, over
/// whitespace-delimited tokens. Returns "-tok"/"+tok" lines for tokens
/// unique to one side; an empty result means the token streams agree.
pub fn token_diff(received: &str, witness: &str) -> Vec<String> {
    let a: Vec<&str> = received.split_whitespace().collect();
    let b: Vec<&str> = witness.split_whitespace().collect();

    // LCS table; inputs are chapter-sized, so quadratic cost is fine
    let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push(format!("-{}", a[i]));
            i += 1;
        } else {
            out.push(format!("+{}", b[j]));
            j += 1;
        }
    }
    for tok in &a[i..] {
        out.push(format!("-{tok}"));
    }
    for tok in &b[j..] {
        out.push(format!("+{tok}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_from_json(json: &str) -> Chapter {
        serde_json::from_str(json).expect("chapter json")
    }

    #[test]
    fn test_absent_witness_emits_no_record() {
        let ch = chapter_from_json(r#"{"chapter": 9, "original": "持而盈之"}"#);
        let report = compare(&ch);
        // Only the received text itself; no fabricated witness entries
        assert_eq!(report.versions.len(), 1);
        assert_eq!(report.versions[0].version, "received");
        assert!(report.semantic_shifts.is_empty());
    }

    #[test]
    fn test_empty_witness_string_is_absence() {
        let ch = chapter_from_json(
            r#"{"chapter": 9, "original": "持而盈之", "guodian_text": ""}"#,
        );
        let report = compare(&ch);
        assert_eq!(report.versions.len(), 1);
    }

    #[test]
    fn test_known_substitution_detected_in_received_text() {
        let ch = chapter_from_json(r#"{"chapter": 1, "original": "道可道，非常道"}"#);
        let report = compare(&ch);
        let found = report.variants.iter().any(|v| {
            matches!(v, VariantRecord::KnownSubstitution { received, .. } if received == "常")
        });
        assert!(found, "常 should surface the 恒→常 taboo substitution");
    }

    #[test]
    fn test_witness_with_text_gets_version_and_shift() {
        let ch = chapter_from_json(
            r#"{
                "chapter": 19,
                "original": "绝圣弃智 民利百倍",
                "guodian_text": "绝智弃辩 民利百倍",
                "guodian_diff": "简本作绝智弃辩，无绝圣之说"
            }"#,
        );
        let report = compare(&ch);
        assert_eq!(report.versions.len(), 2);
        assert_eq!(report.versions[0].version, "guodian");
        assert_eq!(report.versions[1].version, "received");
        assert_eq!(report.semantic_shifts.len(), 1);
        assert_eq!(report.semantic_shifts[0].period, "战国→现代");

        // The first tokens differ, so a structural diff is reported
        let has_diff = report
            .variants
            .iter()
            .any(|v| matches!(v, VariantRecord::StructuralDiff { version, .. } if version == "guodian"));
        assert!(has_diff);
    }

    #[test]
    fn test_token_diff_identical_streams() {
        assert!(token_diff("道 可 道", "道 可 道").is_empty());
    }

    #[test]
    fn test_token_diff_substitution() {
        let diff = token_diff("非 常 道", "非 恒 道");
        assert_eq!(diff, vec!["-常", "+恒"]);
    }
}
