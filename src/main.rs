mod annotate;
mod commentary;
mod concept;
mod corpus;
mod dictionary;
mod facade;
mod graph;
mod variants;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use corpus::CorpusStore;
use facade::Analytics;

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(name = "dao_analytics", about = "Daodejing corpus analytics engine")]
struct Cli {
    /// Corpus data file, or a directory holding one JSON file per classic
    #[arg(long, default_value = "data/daodejing.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Corpus-wide concept co-occurrence graph (optionally with a chapter's spectrum)
    Graph {
        /// Chapter whose commentary spectrum to attach
        chapter: Option<u32>,
    },
    /// Commentary-stance comparison for one chapter
    Spectrum { chapter: u32 },
    /// Cross-manuscript variant report for one chapter
    Archaeology { chapter: u32 },
    /// Full concept index, most widespread concepts first
    Concepts,
    /// Chapter text with difficult-term annotation markup
    Annotate { chapter: u32 },
    /// Write all analytics to output/*.json
    Export,
}

fn main() {
    let cli = Cli::parse();

    let mut analytics = Analytics::new(open_store(&cli.data));

    match cli.command {
        Command::Graph { chapter } => match chapter {
            Some(id) => print_json(&analytics.chapter_graph(id)),
            None => print_json(&analytics.concept_graph()),
        },
        Command::Spectrum { chapter } => match analytics.chapter_spectrum(chapter) {
            Some(spectrum) => print_json(&spectrum),
            None => not_found(chapter),
        },
        Command::Archaeology { chapter } => match analytics.chapter_archaeology(chapter) {
            Some(report) => print_json(&report),
            None => not_found(chapter),
        },
        Command::Concepts => print_json(&analytics.concept_index()),
        Command::Annotate { chapter } => match analytics.annotated_chapter(chapter) {
            Some(annotated) => println!("{}", annotated.annotated),
            None => not_found(chapter),
        },
        Command::Export => run_export(&mut analytics),
    }
}

/// Resolve the data argument: a directory means "pick the first discovered
/// corpus file", a path means "use exactly this file".
fn open_store(data: &Path) -> CorpusStore {
    if data.is_dir() {
        let corpora = corpus::discover_corpora(data);
        match corpora.first() {
            Some(path) => {
                eprintln!(
                    "Found {} corpus file(s) in {}; using {}",
                    corpora.len(),
                    data.display(),
                    path.display()
                );
                CorpusStore::new(path.clone())
            }
            None => {
                eprintln!("No corpus files in {}; starting empty", data.display());
                CorpusStore::new(data.join("daodejing.json"))
            }
        }
    } else {
        CorpusStore::new(data)
    }
}

fn not_found(chapter: u32) {
    eprintln!("Chapter {chapter} not found in the corpus");
    std::process::exit(1);
}

fn print_json<T: serde::Serialize>(data: &T) {
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    println!("{json}");
}

// ═══════════════════════════════════════════════════════════════════════
//  EXPORT MODE: full analytics → output/*.json
// ═══════════════════════════════════════════════════════════════════════

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = Path::new(OUTPUT_DIR).join(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

fn run_export(analytics: &mut Analytics) {
    let chapter_ids = analytics.chapter_ids();
    eprintln!("Corpus loaded: {} chapters", chapter_ids.len());

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");

    write_json("graph.json", &analytics.concept_graph());
    write_json("concepts.json", &analytics.concept_index());

    let mut spectra = Vec::new();
    let mut reports = Vec::new();
    for &id in &chapter_ids {
        if let Some(spectrum) = analytics.chapter_spectrum(id) {
            spectra.push(spectrum);
        }
        if let Some(report) = analytics.chapter_archaeology(id) {
            reports.push(report);
        }
    }
    write_json("spectra.json", &spectra);
    write_json("archaeology.json", &reports);

    eprintln!("\nDone. Query with:");
    eprintln!("  cargo run -- spectrum 1");
    eprintln!("  cargo run -- archaeology 1");
    eprintln!("  cargo run -- graph");
}
