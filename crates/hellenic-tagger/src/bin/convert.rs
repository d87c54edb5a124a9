use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use hellenic_corpora::{CorpusFile, LoadMode, sentences_from_file};
use hellenic_morph::Source;
use hellenic_tagger::{init_tracing, write_sentences};
use hellenic_types::GrammarModel;
use tracing::info;

#[derive(Parser)]
#[command(name = "hellenic-convert")]
#[command(about = "Convert an annotated Greek corpus into JSON lines of tagged sentences")]
struct Cli {
    /// Corpus format: lxx, perseus or tischendorf.
    #[arg(long)]
    source: Source,
    /// Corpus file to read.
    #[arg(long)]
    input: PathBuf,
    /// Output file; standard output when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    /// How the corpus file is loaded: mmap or owned.
    #[arg(long, default_value = "mmap", value_parser = parse_load_mode)]
    load_mode: LoadMode,
    /// JSON grammar registry; the built-in Greek registry when omitted.
    #[arg(long)]
    grammar: Option<PathBuf>,
    /// Stop after this many sentences.
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing(io::stderr);
    let cli = Cli::parse();

    let grammar = match &cli.grammar {
        Some(path) => GrammarModel::load(path)
            .with_context(|| format!("loading grammar registry from {}", path.display()))?,
        None => GrammarModel::greek(),
    };

    let start = Instant::now();
    let file = CorpusFile::open(&cli.input, cli.load_mode)?;
    info!(
        "reading {} ({} bytes, {:?})",
        cli.input.display(),
        file.len(),
        cli.load_mode
    );

    let sentences = sentences_from_file(cli.source, &grammar, &file)
        .with_context(|| format!("reading {} as {}", cli.input.display(), cli.source))?;
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let written = write_sentences(sentences, BufWriter::new(out), cli.limit)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    info!(
        "wrote {} sentences in {} ms ({} distinct tags)",
        written,
        start.elapsed().as_millis(),
        grammar.tag_count()
    );
    Ok(())
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode '{other}' (expected mmap or owned)")),
    }
}
