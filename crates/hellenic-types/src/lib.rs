//! Shared grammatical model for the Greek corpus decoders.
//!
//! Every source format (CCAT/LXX, Perseus treebank, Tischendorf) is decoded
//! into the same vocabulary: a [`WordClass`], an ordered list of
//! [`Inflection`]s handed out by a [`GrammarModel`], and for closed classes the
//! literal lemma text. Decoded tokens become [`TaggedWordForm`]s and are
//! grouped into [`Sentence`]s.
//!
//! The feature enums ([`Case`], [`Number`], [`Tense`], ...) are the canonical,
//! source-independent spelling of an inflection. The registry maps them to its
//! own interned [`Inflection`] values by symbolic key, so a registry that lacks
//! a key fails loudly instead of silently producing a different tag.
//!
//! ```rust
//! use hellenic_types::{Case, GrammarModel, InflectionCategory, Number, WordClass};
//!
//! let grammar = GrammarModel::greek();
//! let acc_sg = grammar
//!     .inflection(InflectionCategory::Case, &Case::Accusative.key_with(Number::Singular))
//!     .unwrap();
//! let tag = grammar.get_tag(WordClass::Noun, vec![acc_sg], None).unwrap();
//! assert_eq!(tag.to_string(), "noun[acc sg]");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

mod registry;

pub use registry::{GrammarModel, GrammarSpec, InflectionType, RegistryError};

/// Part-of-speech class of a decoded token, keyed as in the grammar registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum WordClass {
    Noun,
    Verb,
    Participle,
    Adjective,
    Pronoun,
    Article,
    Adverb,
    Conjunction,
    Particle,
    Preposition,
    Exclamation,
    Numeral,
    Punctuation,
}

impl WordClass {
    pub const ALL: [WordClass; 13] = [
        WordClass::Noun,
        WordClass::Verb,
        WordClass::Participle,
        WordClass::Adjective,
        WordClass::Pronoun,
        WordClass::Article,
        WordClass::Adverb,
        WordClass::Conjunction,
        WordClass::Particle,
        WordClass::Preposition,
        WordClass::Exclamation,
        WordClass::Numeral,
        WordClass::Punctuation,
    ];

    /// Parse a registry tag-type key (`noun`, `part`, `[PUNCTUATION]`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "noun" => Some(WordClass::Noun),
            "verb" => Some(WordClass::Verb),
            "part" => Some(WordClass::Participle),
            "adj" => Some(WordClass::Adjective),
            "pron" => Some(WordClass::Pronoun),
            "article" => Some(WordClass::Article),
            "adv" => Some(WordClass::Adverb),
            "conj" => Some(WordClass::Conjunction),
            "partic" => Some(WordClass::Particle),
            "prep" => Some(WordClass::Preposition),
            "exclam" => Some(WordClass::Exclamation),
            "numeral" => Some(WordClass::Numeral),
            "[PUNCTUATION]" => Some(WordClass::Punctuation),
            _ => None,
        }
    }

    /// Emit the registry key for this class.
    pub fn key(self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Verb => "verb",
            WordClass::Participle => "part",
            WordClass::Adjective => "adj",
            WordClass::Pronoun => "pron",
            WordClass::Article => "article",
            WordClass::Adverb => "adv",
            WordClass::Conjunction => "conj",
            WordClass::Particle => "partic",
            WordClass::Preposition => "prep",
            WordClass::Exclamation => "exclam",
            WordClass::Numeral => "numeral",
            WordClass::Punctuation => "[PUNCTUATION]",
        }
    }

    /// Closed classes are identified by their literal lemma rather than by inflections.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            WordClass::Conjunction
                | WordClass::Particle
                | WordClass::Preposition
                | WordClass::Exclamation
                | WordClass::Punctuation
        )
    }
}

impl From<WordClass> for &'static str {
    fn from(class: WordClass) -> Self {
        class.key()
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inflection categories known to the registry. Number has no category of its
/// own: it is folded into case (`acc sg`) and person (`3rd pl`) values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum InflectionCategory {
    Case,
    Gender,
    Person,
    Tense,
    Mood,
    Voice,
    Degree,
}

impl InflectionCategory {
    pub const ALL: [InflectionCategory; 7] = [
        InflectionCategory::Case,
        InflectionCategory::Gender,
        InflectionCategory::Person,
        InflectionCategory::Tense,
        InflectionCategory::Mood,
        InflectionCategory::Voice,
        InflectionCategory::Degree,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "case" => Some(InflectionCategory::Case),
            "gender" => Some(InflectionCategory::Gender),
            "person" => Some(InflectionCategory::Person),
            "tense" => Some(InflectionCategory::Tense),
            "mood" => Some(InflectionCategory::Mood),
            "voice" => Some(InflectionCategory::Voice),
            "degree" => Some(InflectionCategory::Degree),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InflectionCategory::Case => "case",
            InflectionCategory::Gender => "gender",
            InflectionCategory::Person => "person",
            InflectionCategory::Tense => "tense",
            InflectionCategory::Mood => "mood",
            InflectionCategory::Voice => "voice",
            InflectionCategory::Degree => "degree",
        }
    }
}

impl From<InflectionCategory> for &'static str {
    fn from(category: InflectionCategory) -> Self {
        category.key()
    }
}

impl fmt::Display for InflectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Number {
    Singular,
    Plural,
    Dual,
}

impl Number {
    pub fn key(self) -> &'static str {
        match self {
            Number::Singular => "sg",
            Number::Plural => "pl",
            Number::Dual => "dual",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Case {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Vocative,
}

impl Case {
    pub fn key(self) -> &'static str {
        match self {
            Case::Nominative => "nom",
            Case::Genitive => "gen",
            Case::Dative => "dat",
            Case::Accusative => "acc",
            Case::Vocative => "voc",
        }
    }

    /// Registry key of the case/number pair, e.g. `gen pl`.
    pub fn key_with(self, number: Number) -> String {
        format!("{} {}", self.key(), number.key())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    pub fn key(self) -> &'static str {
        match self {
            Person::First => "1st",
            Person::Second => "2nd",
            Person::Third => "3rd",
        }
    }

    /// Registry key of the person/number pair, e.g. `3rd sg`.
    pub fn key_with(self, number: Number) -> String {
        format!("{} {}", self.key(), number.key())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn key(self) -> &'static str {
        match self {
            Gender::Masculine => "masc",
            Gender::Feminine => "fem",
            Gender::Neuter => "neut",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tense {
    Present,
    Imperfect,
    Future,
    Aorist,
    Perfect,
    Pluperfect,
    FuturePerfect,
}

impl Tense {
    pub fn key(self) -> &'static str {
        match self {
            Tense::Present => "pres",
            Tense::Imperfect => "imperf",
            Tense::Future => "fut",
            Tense::Aorist => "aor",
            Tense::Perfect => "perf",
            Tense::Pluperfect => "plup",
            Tense::FuturePerfect => "futperf",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mood {
    Indicative,
    Subjunctive,
    Optative,
    Imperative,
    Infinitive,
}

impl Mood {
    pub fn key(self) -> &'static str {
        match self {
            Mood::Indicative => "ind",
            Mood::Subjunctive => "subj",
            Mood::Optative => "opt",
            Mood::Imperative => "imperat",
            Mood::Infinitive => "inf",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Voice {
    Active,
    Middle,
    Passive,
    /// Middle or passive, not distinguished by the form.
    MiddlePassive,
}

impl Voice {
    pub fn key(self) -> &'static str {
        match self {
            Voice::Active => "act",
            Voice::Middle => "mid",
            Voice::Passive => "pass",
            Voice::MiddlePassive => "mp",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Degree {
    Positive,
    Comparative,
    Superlative,
}

impl Degree {
    pub fn key(self) -> &'static str {
        match self {
            Degree::Positive => "pos",
            Degree::Comparative => "comp",
            Degree::Superlative => "superl",
        }
    }
}

/// A named inflection value as registered in a [`GrammarModel`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct Inflection {
    pub category: InflectionCategory,
    pub name: Arc<str>,
}

impl fmt::Display for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Decoded tag of a token. Instances are interned by [`GrammarModel::get_tag`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Tag {
    pub class: WordClass,
    pub inflections: Vec<Inflection>,
    pub text: Option<String>,
}

impl Tag {
    pub fn has_inflection(&self, category: InflectionCategory, name: &str) -> bool {
        self.inflections
            .iter()
            .any(|i| i.category == category && &*i.name == name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class.key())?;
        if let Some(text) = &self.text {
            write!(f, "({text})")?;
        }
        if !self.inflections.is_empty() {
            f.write_str("[")?;
            for (idx, inflection) in self.inflections.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&inflection.name)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A surface form paired with its lemma and decoded tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TaggedWordForm {
    pub form: String,
    pub lemma: String,
    pub tag: Arc<Tag>,
}

impl TaggedWordForm {
    pub fn new(form: impl Into<String>, lemma: impl Into<String>, tag: Arc<Tag>) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            tag,
        }
    }
}

/// Ordered, non-empty run of tagged word forms.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sentence {
    words: Vec<TaggedWordForm>,
}

impl Sentence {
    /// Wrap a word list, returning `None` when it is empty.
    pub fn new(words: Vec<TaggedWordForm>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn words(&self) -> &[TaggedWordForm] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedWordForm> {
        self.words.iter()
    }

    pub fn into_words(self) -> Vec<TaggedWordForm> {
        self.words
    }

    /// Surface forms joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.form.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a TaggedWordForm;
    type IntoIter = std::slice::Iter<'a, TaggedWordForm>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
