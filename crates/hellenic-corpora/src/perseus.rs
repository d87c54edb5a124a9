//! Readers over the Perseus Ancient Greek Dependency Treebank and the Perseus
//! morphological analyses.
//!
//! Treebank sentences arrive as [`TreebankSentence`] records, one JSON object
//! per line, each holding the `form`, `postag` and `lemma` attributes of its
//! `<word>` elements. Morphological analyses arrive as [`MorphAnalysis`]
//! records with their feature elements in document order.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::mem;

use anyhow::{Context, Result};
use hellenic_morph::normalize::{
    canonical_mark, fold_accents, normalize_beta, strip_numerics, trim_form_decorations,
};
use hellenic_morph::{DecodeError, InflectionResolver, PerseusDecoder};
use hellenic_types::{
    Degree, GrammarModel, InflectionCategory, Sentence, TaggedWordForm, WordClass,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accumulator::{EndOfStream, SentenceAccumulator};

/// Converts Beta code to Unicode Greek.
pub trait BetaConverter: Send + Sync {
    fn convert(&self, beta: &str) -> String;
}

/// Notation of the Greek text in a Perseus source.
#[derive(Clone, Copy)]
pub enum GreekEncoding<'c> {
    BetaCode(&'c dyn BetaConverter),
    Unicode,
}

impl GreekEncoding<'_> {
    /// Canonical raw spelling, used for comparing and joining forms.
    fn canonical<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self {
            GreekEncoding::BetaCode(_) => Cow::Owned(normalize_beta(raw)),
            GreekEncoding::Unicode => Cow::Borrowed(raw),
        }
    }

    fn to_unicode<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        match self {
            GreekEncoding::BetaCode(converter) => Cow::Owned(converter.convert(canonical)),
            GreekEncoding::Unicode => Cow::Borrowed(canonical),
        }
    }
}

/// One `<word>` of a treebank sentence.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TreebankWord {
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub postag: Option<String>,
    #[serde(default)]
    pub lemma: Option<String>,
}

/// One `<sentence>` of the treebank.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TreebankSentence {
    #[serde(default)]
    pub id: Option<String>,
    pub words: Vec<TreebankWord>,
}

/// Parse treebank sentences, one JSON object per non-blank line.
pub fn parse_treebank_lines(text: &str) -> Result<Vec<TreebankSentence>> {
    parse_json_lines(text)
}

/// Parse morphological analyses, one JSON object per non-blank line.
pub fn parse_analysis_lines(text: &str) -> Result<Vec<MorphAnalysis>> {
    parse_json_lines(text)
}

fn parse_json_lines<T: for<'de> Deserialize<'de>>(text: &str) -> Result<Vec<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", idx + 1))
        })
        .collect()
}

/// Treebank sentences turned into tagged sentences, one per element.
///
/// A sentence with an undecodable word is skipped, as is one that ends up
/// empty.
pub struct PerseusSentences<'g, 'c, I> {
    sentences: I,
    decoder: PerseusDecoder<'g>,
    encoding: GreekEncoding<'c>,
    done: bool,
}

impl<'g, 'c, I> PerseusSentences<'g, 'c, I>
where
    I: Iterator<Item = TreebankSentence>,
{
    pub fn new(grammar: &'g GrammarModel, encoding: GreekEncoding<'c>, sentences: I) -> Self {
        Self {
            sentences,
            decoder: PerseusDecoder::new(grammar),
            encoding,
            done: false,
        }
    }
}

fn read_sentence(
    decoder: &PerseusDecoder<'_>,
    encoding: GreekEncoding<'_>,
    sentence: &TreebankSentence,
) -> Result<Option<Sentence>, DecodeError> {
    let mut acc = SentenceAccumulator::new(EndOfStream::EmitValid);
    let mut previous_raw = String::new();
    let mut before_hyphen = String::new();

    for word in &sentence.words {
        let Some(raw) = word.form.as_deref() else {
            continue;
        };
        let raw = encoding.canonical(raw);
        if raw.as_ref() == previous_raw.as_str() {
            continue;
        }
        let raw = if before_hyphen.is_empty() {
            raw.into_owned()
        } else {
            let mut joined = mem::take(&mut before_hyphen);
            joined.push_str(&raw);
            joined
        };

        let unicode = encoding.to_unicode(&raw);
        let folded = fold_accents(&unicode);
        let form = canonical_mark(trim_form_decorations(&folded));

        let (Some(postag), Some(raw_lemma)) = (word.postag.as_deref(), word.lemma.as_deref())
        else {
            continue;
        };
        let lemma = match postag.chars().next() {
            Some('u' | '-') => form.to_string(),
            _ => {
                let canonical = encoding.canonical(raw_lemma);
                strip_numerics(&encoding.to_unicode(&canonical)).into_owned()
            }
        };

        match decoder.decode_word(postag, form, &lemma) {
            Ok(None) if form == "-" => {
                before_hyphen = previous_raw.clone();
                continue;
            }
            Ok(None) => {}
            // A postag of the wrong width loses only its word.
            Err(err @ DecodeError::Malformed { .. }) => {
                debug!(id = sentence.id.as_deref(), error = %err, "skipping treebank word");
            }
            decoded => {
                if let Some(tag) = acc.admit(postag, decoded)? {
                    acc.push(form, lemma, tag);
                }
            }
        }
        if !acc.is_valid() {
            break;
        }
        previous_raw = raw;
    }

    let emitted = acc.finish();
    if emitted.is_none() {
        debug!(id = sentence.id.as_deref(), "skipping treebank sentence");
    }
    Ok(emitted)
}

impl<I> Iterator for PerseusSentences<'_, '_, I>
where
    I: Iterator<Item = TreebankSentence>,
{
    type Item = Result<Sentence, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for sentence in self.sentences.by_ref() {
            match read_sentence(&self.decoder, self.encoding, &sentence) {
                Ok(Some(found)) => return Some(Ok(found)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        self.done = true;
        None
    }
}

/// One `<analysis>` of the Perseus morphology database.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct MorphAnalysis {
    pub form: String,
    pub lemma: String,
    pub pos: String,
    /// Feature elements as `(element name, text)` in document order.
    #[serde(default)]
    pub features: Vec<(String, String)>,
}

/// Whether a raw form or lemma is split at a compound junction.
fn is_hyphenated(raw: &str) -> bool {
    raw.chars().nth(1).is_some() && raw.contains('-')
}

/// Tagged word forms from the Perseus morphological analyses.
///
/// Analyses whose tag type or combined case/person key the registry does not
/// know are skipped, as are hyphenated compounds and words outside the
/// allowed dialects.
pub struct PerseusTaggedWords<'g, 'c, I> {
    analyses: I,
    analyser: Analyser<'g, 'c>,
    done: bool,
}

impl<'g, 'c, I> PerseusTaggedWords<'g, 'c, I>
where
    I: Iterator<Item = MorphAnalysis>,
{
    pub fn new(grammar: &'g GrammarModel, encoding: GreekEncoding<'c>, analyses: I) -> Self {
        Self {
            analyses,
            analyser: Analyser {
                grammar,
                resolver: InflectionResolver::new(grammar),
                encoding,
                dialects: BTreeSet::new(),
            },
            done: false,
        }
    }

    /// Admit only words marked with one of `dialects`. Words without a
    /// dialect always pass; an empty set admits everything.
    pub fn with_dialects<D, S>(mut self, dialects: D) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.analyser.dialects = dialects.into_iter().map(Into::into).collect();
        self
    }
}

struct Analyser<'g, 'c> {
    grammar: &'g GrammarModel,
    resolver: InflectionResolver<'g>,
    encoding: GreekEncoding<'c>,
    dialects: BTreeSet<String>,
}

impl Analyser<'_, '_> {
    fn text(&self, canonical: &str) -> String {
        strip_numerics(&self.encoding.to_unicode(canonical)).to_lowercase()
    }

    fn analyse(&self, analysis: &MorphAnalysis) -> Result<Option<TaggedWordForm>, DecodeError> {
        let raw_form = self.encoding.canonical(&analysis.form);
        if is_hyphenated(&raw_form) {
            return Ok(None);
        }
        let raw_lemma = self.encoding.canonical(&analysis.lemma);
        if is_hyphenated(&raw_lemma) {
            return Ok(None);
        }
        let form = self.text(&raw_form);
        let lemma = self.text(&raw_lemma);

        let Ok(class) = self.grammar.tag_type(&analysis.pos) else {
            return Ok(None);
        };

        let mut inflections = Vec::new();
        let (mut number, mut case, mut person) = (None, None, None);
        let mut dialects: Option<Vec<&str>> = None;
        for (key, value) in &analysis.features {
            match key.as_str() {
                "number" => number = Some(value.as_str()),
                "case" => case = Some(value.as_str()),
                "person" => person = Some(value.as_str()),
                "dialect" if !self.dialects.is_empty() => {
                    dialects = Some(value.split_whitespace().collect());
                }
                _ => {
                    let inflection = InflectionCategory::from_key(key)
                        .and_then(|category| self.grammar.inflection(category, value).ok());
                    if let Some(inflection) = inflection {
                        inflections.push(inflection);
                    }
                }
            }
        }

        if let Some(dialects) = dialects {
            if !dialects.iter().any(|d| self.dialects.contains(*d)) {
                return Ok(None);
            }
        }

        if let Some(number) = number {
            let (category, key) = match (case, person) {
                (Some(case), _) => (InflectionCategory::Case, case),
                (None, Some(person)) => (InflectionCategory::Person, person),
                (None, None) => return Ok(None),
            };
            match self.grammar.inflection(category, &format!("{key} {number}")) {
                Ok(inflection) => inflections.push(inflection),
                Err(_) => return Ok(None),
            }
        }

        let tag = if class.is_closed() {
            self.resolver.literal(class, &lemma)?
        } else {
            let graded = matches!(class, WordClass::Adjective | WordClass::Adverb);
            if graded && !inflections.iter().any(|i| i.category == InflectionCategory::Degree) {
                inflections.push(self.resolver.degree(Degree::Positive)?);
            }
            self.resolver.tag(class, inflections, None)?
        };
        Ok(Some(TaggedWordForm::new(form, lemma, tag)))
    }
}

impl<I> Iterator for PerseusTaggedWords<'_, '_, I>
where
    I: Iterator<Item = MorphAnalysis>,
{
    type Item = Result<TaggedWordForm, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for analysis in self.analyses.by_ref() {
            match self.analyser.analyse(&analysis) {
                Ok(Some(word)) => return Some(Ok(word)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        self.done = true;
        None
    }
}

/// Normalized surface forms of the analyses, without tags.
pub fn untagged_forms<'c, I>(
    encoding: GreekEncoding<'c>,
    analyses: I,
) -> impl Iterator<Item = String> + 'c
where
    I: IntoIterator<Item = MorphAnalysis>,
    I::IntoIter: 'c,
{
    analyses.into_iter().map(move |analysis| {
        let canonical = encoding.canonical(&analysis.form);
        let unicode = encoding.to_unicode(&canonical);
        strip_numerics(&fold_accents(&unicode)).into_owned()
    })
}
