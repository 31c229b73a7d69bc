use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Placeholder the data files use where a commentary or witness text has not
/// been collected yet. Treated exactly like an absent field.
pub const NOT_COLLECTED: &str = "此版本暂未收录";

// ── Corpus records ───────────────────────────────────────────────────────

/// One chapter of the received text plus all its named side texts.
///
/// The data file keeps commentaries and manuscript witnesses as flat
/// optional fields: `{commentator}_note` for commentary texts,
/// `{version}_text` for witness texts and `{version}_diff` for curated
/// difference notes. Everything beyond `chapter`/`original` lands in
/// `fields` and is reached through the accessors below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter: u32,
    #[serde(default)]
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Chapter {
    /// Look up a named text field. Absent field, JSON null, non-string
    /// values and the "not yet collected" placeholder are all `None`.
    /// An empty string is also `None`: a field that exists but carries no
    /// characters holds no analyzable content.
    fn text_field(&self, key: &str) -> Option<&str> {
        let value = self.fields.get(key)?.as_str()?;
        if value.is_empty() || value == NOT_COLLECTED {
            return None;
        }
        Some(value)
    }

    /// A commentator's commentary text for this chapter, if collected.
    pub fn commentary(&self, commentator: &str) -> Option<&str> {
        self.text_field(&format!("{commentator}_note"))
    }

    /// A manuscript witness's surviving text for this chapter. `None`
    /// means the witness has no text here – a real historical fact.
    pub fn witness_text(&self, version: &str) -> Option<&str> {
        self.text_field(&format!("{version}_text"))
    }

    /// The curated note describing how a witness differs here.
    pub fn witness_note(&self, version: &str) -> Option<&str> {
        self.text_field(&format!("{version}_diff"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Corpus {
    /// Empty-but-valid fallback used when the data file is missing or
    /// unparsable. Callers always get a corpus, never an error.
    pub fn skeleton() -> Self {
        Corpus {
            title: "道德经".to_string(),
            chapters: Vec::new(),
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────────

/// Loads the corpus once and caches it. The cache is an explicit object so
/// tests can construct isolated instances; `invalidate` is the only way to
/// drop the cached snapshot.
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    cache: Option<Corpus>,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CorpusStore {
            path: path.into(),
            cache: None,
        }
    }

    /// Build a store over an already-constructed corpus (used by tests and
    /// by callers that load corpora themselves).
    pub fn from_corpus(corpus: Corpus) -> Self {
        CorpusStore {
            path: PathBuf::new(),
            cache: Some(corpus),
        }
    }

    /// The cached corpus, loading it on first access.
    pub fn get(&mut self) -> &Corpus {
        let path = self.path.clone();
        self.cache.get_or_insert_with(|| load_corpus(&path))
    }

    /// Drop the cached snapshot; the next `get` re-reads the data file.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn chapter(&mut self, chapter_id: u32) -> Option<&Chapter> {
        self.get().chapters.iter().find(|c| c.chapter == chapter_id)
    }
}

/// Parse the corpus JSON. Missing file or malformed JSON both degrade to
/// the skeleton corpus.
fn load_corpus(path: &Path) -> Corpus {
    let json = match std::fs::read_to_string(path) {
        Ok(j) => j,
        Err(_) => return Corpus::skeleton(),
    };
    serde_json::from_str(&json).unwrap_or_else(|_| Corpus::skeleton())
}

/// Discover corpus data files under a directory (one JSON file per
/// classic). Returns sorted paths so the first entry is deterministic.
pub fn discover_corpora(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_from_json(json: &str) -> Chapter {
        serde_json::from_str(json).expect("chapter json")
    }

    #[test]
    fn test_missing_file_yields_skeleton() {
        let mut store = CorpusStore::new("no/such/file.json");
        let corpus = store.get();
        assert_eq!(corpus.title, "道德经");
        assert!(corpus.chapters.is_empty());
    }

    #[test]
    fn test_commentary_field_lookup() {
        let ch = chapter_from_json(
            r#"{"chapter": 1, "original": "道可道", "wangbi_note": "可道之道"}"#,
        );
        assert_eq!(ch.commentary("wangbi"), Some("可道之道"));
        assert_eq!(ch.commentary("heshanggong"), None);
    }

    #[test]
    fn test_not_collected_sentinel_is_absent() {
        let ch = chapter_from_json(
            r#"{"chapter": 1, "original": "道可道", "suzhe_note": "此版本暂未收录"}"#,
        );
        assert_eq!(ch.commentary("suzhe"), None);
    }

    #[test]
    fn test_witness_absent_vs_null_vs_empty() {
        let ch = chapter_from_json(
            r#"{"chapter": 2, "original": "天下皆知", "guodian_text": null, "postsilk_text": ""}"#,
        );
        // Explicit null, empty string and missing field are all "no data"
        assert_eq!(ch.witness_text("guodian"), None);
        assert_eq!(ch.witness_text("postsilk"), None);
        assert_eq!(ch.witness_text("mystery"), None);
    }

    #[test]
    fn test_invalidate_clears_cache() {
        let mut store = CorpusStore::from_corpus(Corpus {
            title: "test".to_string(),
            chapters: Vec::new(),
        });
        assert_eq!(store.get().title, "test");
        store.invalidate();
        // Re-load falls back to the skeleton (empty path does not exist)
        assert_eq!(store.get().title, "道德经");
    }

    #[test]
    fn test_chapter_lookup() {
        let ch = chapter_from_json(r#"{"chapter": 7, "original": "天长地久"}"#);
        let mut store = CorpusStore::from_corpus(Corpus {
            title: "道德经".to_string(),
            chapters: vec![ch],
        });
        assert!(store.chapter(7).is_some());
        assert!(store.chapter(99).is_none());
    }
}
