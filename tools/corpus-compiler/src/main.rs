use anyhow::Context;
use clap::Parser;
use gloss_parser::GlossCorpus;
use gloss_protocol::Corpus;
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON gloss corpus to an rkyv archive")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Analyze and report without writing the archive.
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    entries: usize,
    sentences: usize,
    unlinked: usize,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let summary = compile(&cli.input, (!cli.check).then_some(cli.output.as_path()))?;
    info!(
        entries = summary.entries,
        sentences = summary.sentences,
        unlinked = summary.unlinked,
        check = cli.check,
        "done"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Reads and analyzes `input`; writes the archive to `output` when given.
fn compile(input: &Path, output: Option<&Path>) -> anyhow::Result<Summary> {
    info!(path = %input.display(), "reading corpus");
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let corpus: Corpus = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid corpus", input.display()))?;

    // Full analysis rejects duplicate source forms and sentence ids.
    let analyzed = GlossCorpus::build(corpus.clone()).context("corpus failed analysis")?;
    let summary = Summary {
        entries: analyzed.dictionary().len(),
        sentences: analyzed.sentences().len(),
        unlinked: analyzed.unlinked_english_count(),
    };

    if let Some(output) = output {
        let mut serializer = AllocSerializer::<4096>::default();
        serializer
            .serialize_value(&corpus)
            .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {e}"))?;
        let bytes = serializer.into_serializer().into_inner();

        fs::write(output, &bytes)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!(path = %output.display(), bytes = bytes.len(), "archive written");
    }

    Ok(summary)
}
