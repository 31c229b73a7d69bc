use regex::Regex;

use crate::dictionary::GlossEntry;

/// Rewrites chapter text, wrapping dictionary terms in inline markup.
///
/// Matching is overlap-safe: terms are processed longest-first and every
/// claimed span is masked by an opaque placeholder, so a shorter term can
/// never match inside a span a longer term already owns. Existing markup in
/// the input is masked the same way, which makes annotation idempotent.
pub struct TextAnnotator {
    /// Matches a complete annotation span produced by a previous run
    span_re: Regex,
}

impl Default for TextAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnnotator {
    pub fn new() -> Self {
        let span_re = Regex::new(r#"<span class="difficult"[^>]*>[^<]*</span>"#)
            .expect("annotation span regex");
        TextAnnotator { span_re }
    }

    /// Annotate `text` against `entries`. Pure function of its inputs.
    /// Entries with an empty term are invalid and skipped.
    pub fn annotate(&self, text: &str, entries: &[GlossEntry]) -> String {
        if text.is_empty() || entries.is_empty() {
            return text.to_string();
        }

        // placeholder id → final markup fragment
        let mut fragments: Vec<String> = Vec::new();
        let mut working = self.mask_existing_spans(text, &mut fragments);

        // Longest term first, so 谷神 claims its span before 谷 is tried
        let mut sorted: Vec<&GlossEntry> =
            entries.iter().filter(|e| !e.term.is_empty()).collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.term.chars().count()));

        for e in sorted {
            if !working.contains(e.term) {
                continue;
            }
            let token = placeholder(fragments.len());
            fragments.push(format!(
                "<span class=\"difficult\" data-pinyin=\"{}\" data-meaning=\"{}\">{}</span>",
                e.pinyin, e.meaning, e.term
            ));

            // Replace every occurrence; the scan advances past each
            // inserted token, never into it.
            let mut out = String::with_capacity(working.len());
            let mut rest = working.as_str();
            while let Some(pos) = rest.find(e.term) {
                out.push_str(&rest[..pos]);
                out.push_str(&token);
                rest = &rest[pos + e.term.len()..];
            }
            out.push_str(rest);
            working = out;
        }

        // Resolve all placeholders back to markup in a single pass
        for (id, fragment) in fragments.iter().enumerate() {
            working = working.replace(&placeholder(id), fragment);
        }
        working
    }

    /// Replace pre-existing annotation spans with placeholders so a second
    /// annotation pass treats them as opaque.
    fn mask_existing_spans(&self, text: &str, fragments: &mut Vec<String>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.span_re.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            out.push_str(&placeholder(fragments.len()));
            fragments.push(m.as_str().to_string());
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

/// Opaque token for a claimed span. ASCII only, so it can never be matched
/// by a CJK dictionary term.
fn placeholder(id: usize) -> String {
    format!("___PH_{id}___")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DIFFICULT_TERMS, GlossEntry};

    const GU_SHEN: GlossEntry = GlossEntry {
        term: "谷神",
        pinyin: "gǔ shén",
        meaning: "形容虚空而神奇的存在",
    };
    const GU: GlossEntry = GlossEntry {
        term: "谷",
        pinyin: "gǔ",
        meaning: "川谷，虚怀",
    };

    #[test]
    fn test_longest_match_wins() {
        let annotator = TextAnnotator::new();
        let out = annotator.annotate("谷神不死", &[GU, GU_SHEN]);
        // Exactly one span, covering 谷神; 谷 must not be re-annotated inside
        assert_eq!(
            out,
            "<span class=\"difficult\" data-pinyin=\"gǔ shén\" \
             data-meaning=\"形容虚空而神奇的存在\">谷神</span>不死"
        );
        assert_eq!(out.matches("<span").count(), 1);
    }

    #[test]
    fn test_shorter_term_still_matches_elsewhere() {
        let annotator = TextAnnotator::new();
        let out = annotator.annotate("谷神不死，旷兮其若谷", &[GU, GU_SHEN]);
        assert_eq!(out.matches("<span").count(), 2);
        assert!(out.contains(">谷神</span>"));
        assert!(out.contains(">谷</span>"));
    }

    #[test]
    fn test_idempotent_on_annotated_output() {
        let annotator = TextAnnotator::new();
        let once = annotator.annotate("谷神不死，是谓玄牝", DIFFICULT_TERMS);
        let twice = annotator.annotate(&once, DIFFICULT_TERMS);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_dictionary_is_identity() {
        let annotator = TextAnnotator::new();
        assert_eq!(annotator.annotate("道可道非常道", &[]), "道可道非常道");
    }

    #[test]
    fn test_empty_term_entries_are_skipped() {
        let annotator = TextAnnotator::new();
        let bad = GlossEntry {
            term: "",
            pinyin: "",
            meaning: "",
        };
        assert_eq!(annotator.annotate("道可道", &[bad]), "道可道");
    }

    #[test]
    fn test_text_without_matches_unchanged() {
        let annotator = TextAnnotator::new();
        assert_eq!(
            annotator.annotate("上善若水", &[GU, GU_SHEN]),
            "上善若水"
        );
    }
}
