//! Sentence readers for annotated Greek corpora.
//!
//! Each reader pulls raw records from its source, normalizes forms and
//! lemmas, decodes the morphological code with the matching
//! [`hellenic_morph`] decoder and feeds the result through a
//! [`SentenceAccumulator`]. A sentence is emitted only when every token in it
//! decoded; a rejected sentence is dropped whole and the next one starts
//! clean.
//!
//! # Sources
//! - [`LxxSentences`]: the CCAT morphological LXX, tab-separated verses.
//! - [`TischendorfSentences`]: Tischendorf's New Testament, one word per line.
//! - [`PerseusSentences`]: treebank sentences, one JSON record per sentence.
//! - [`PerseusTaggedWords`] and [`untagged_forms`]: the Perseus morphological
//!   analyses as standalone words.
//!
//! Readers are lazy iterators of `Result<Sentence, DecodeError>`. Only a
//! registry mismatch surfaces as an `Err`, and it ends the stream.
//!
//! # Example
//! ```
//! use hellenic_corpora::TischendorfSentences;
//! use hellenic_types::GrammarModel;
//!
//! let grammar = GrammarModel::greek();
//! let text = "JN 1:1.1 P Ἐν ἐν PREP 1722 ! ἐν ἐν\n\
//!             JN 1:1.2 P ἀρχῇ ἀρχή N-DSF 746 ! ἀρχή ἀρχή\n\
//!             JN 1:1.3 P ἦν. εἰμί V-IAI-3S 1510 ! εἰμί εἰμί";
//!
//! let sentences: Vec<_> = TischendorfSentences::new(&grammar, text.lines())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(sentences[0].text(), "Ἐν ἀρχῇ ἦν .");
//! ```
//!
//! For a runnable demo, see `cargo run -p hellenic-corpora --example stats -- <source> <file>`.

mod accumulator;
mod file;
mod lxx;
mod perseus;
mod tischendorf;

use anyhow::Result;
use hellenic_morph::{DecodeError, Source};
use hellenic_types::{GrammarModel, Sentence};

pub use accumulator::{
    EndOfStream, SENTENCE_TERMINATORS, SentenceAccumulator, Step, is_terminator,
    split_punctuation,
};
pub use file::{CorpusFile, LoadMode};
pub use lxx::LxxSentences;
pub use perseus::{
    BetaConverter, GreekEncoding, MorphAnalysis, PerseusSentences, PerseusTaggedWords,
    TreebankSentence, TreebankWord, parse_analysis_lines, parse_treebank_lines, untagged_forms,
};
pub use tischendorf::TischendorfSentences;

/// Boxed sentence stream over any of the sources.
pub type SentenceStream<'a> = Box<dyn Iterator<Item = Result<Sentence, DecodeError>> + 'a>;

/// Read `text` as a corpus of `source`.
///
/// LXX and Tischendorf text is read line by line. Perseus text holds one
/// Unicode [`TreebankSentence`] per line and is parsed up front, so a
/// malformed record fails here rather than mid-stream.
pub fn sentences_from_text<'a>(
    source: Source,
    grammar: &'a GrammarModel,
    text: &'a str,
) -> Result<SentenceStream<'a>> {
    Ok(match source {
        Source::Lxx => Box::new(LxxSentences::new(grammar, text.lines())),
        Source::Tischendorf => Box::new(TischendorfSentences::new(grammar, text.lines())),
        Source::Perseus => {
            let sentences = parse_treebank_lines(text)?;
            Box::new(PerseusSentences::new(
                grammar,
                GreekEncoding::Unicode,
                sentences.into_iter(),
            ))
        }
    })
}

/// Read a loaded corpus file as `source`.
pub fn sentences_from_file<'a>(
    source: Source,
    grammar: &'a GrammarModel,
    file: &'a CorpusFile,
) -> Result<SentenceStream<'a>> {
    sentences_from_text(source, grammar, file.text()?)
}
