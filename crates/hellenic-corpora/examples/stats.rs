use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use hellenic_corpora::{CorpusFile, LoadMode, sentences_from_file};
use hellenic_morph::Source;
use hellenic_types::GrammarModel;

fn main() -> Result<()> {
    let usage = "usage: cargo run -p hellenic-corpora --example stats -- <lxx|perseus|tischendorf> <file>";
    let mut args = env::args().skip(1);
    let source: Source = args.next().context(usage)?.parse()?;
    let path = args.next().map(PathBuf::from).context(usage)?;

    let file = CorpusFile::open(&path, LoadMode::Mmap)?;
    let grammar = GrammarModel::greek();

    let mut sentence_count = 0usize;
    let mut word_count = 0usize;
    let mut classes: BTreeMap<&'static str, usize> = BTreeMap::new();

    for sentence in sentences_from_file(source, &grammar, &file)? {
        let sentence = sentence.with_context(|| format!("reading {}", path.display()))?;
        sentence_count += 1;
        word_count += sentence.len();
        for word in &sentence {
            *classes.entry(word.tag.class.key()).or_default() += 1;
        }
    }

    println!("Corpus: {} ({source})", path.display());
    println!("Bytes       : {}", file.len());
    println!("Sentences   : {sentence_count}");
    println!("Tagged words: {word_count}");
    println!("Distinct tags: {}", grammar.tag_count());
    for (class, count) in &classes {
        println!("  {class:<14} {count}");
    }

    Ok(())
}
