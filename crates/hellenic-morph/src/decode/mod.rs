//! Per-source morphological code decoders.
//!
//! Each corpus spells word class and inflection differently, but all three
//! decoders share one contract ([`MorphDecoder`]) and one resolver, so the
//! sentence readers never care which grammar they are driving.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hellenic_types::{Case, Degree, Gender, GrammarModel, Number, Person, Tag, WordClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DecodeError, InflectionResolver};

mod ccat;
mod perseus;
mod tischendorf;

pub use ccat::CcatDecoder;
pub use perseus::{PerseusDecoder, Postag};
pub use tischendorf::TischendorfDecoder;

/// Turns one source's POS code into a registry tag.
///
/// `Ok(None)` means the source itself marks the token as out of domain
/// (foreign names, Aramaic, ambiguity placeholders). Errors are per token
/// unless [`DecodeError::is_fatal`] says otherwise.
pub trait MorphDecoder: Send + Sync {
    fn source(&self) -> Source;

    fn resolver(&self) -> InflectionResolver<'_>;

    fn decode(&self, code: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError>;

    /// Punctuation tag carrying the mark itself as text.
    fn punctuation(&self, mark: &str) -> Result<Arc<Tag>, DecodeError> {
        self.resolver().literal(WordClass::Punctuation, mark)
    }
}

/// The annotated corpora this crate knows how to decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// CCAT morphology of the Septuagint.
    Lxx,
    /// Perseus Ancient Greek treebank.
    Perseus,
    /// Tischendorf's New Testament.
    Tischendorf,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Lxx, Source::Perseus, Source::Tischendorf];

    pub fn key(self) -> &'static str {
        match self {
            Source::Lxx => "lxx",
            Source::Perseus => "perseus",
            Source::Tischendorf => "tischendorf",
        }
    }

    /// Build the decoder for this source over a shared registry.
    pub fn decoder<'g>(self, grammar: &'g GrammarModel) -> Box<dyn MorphDecoder + 'g> {
        match self {
            Source::Lxx => Box::new(CcatDecoder::new(grammar)),
            Source::Perseus => Box::new(PerseusDecoder::new(grammar)),
            Source::Tischendorf => Box::new(TischendorfDecoder::new(grammar)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
#[error("unknown source '{0}' (expected lxx, perseus or tischendorf)")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lxx" | "ccat" => Ok(Source::Lxx),
            "perseus" => Ok(Source::Perseus),
            "tischendorf" => Ok(Source::Tischendorf),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}

/// Degree sub-code shared by the dash-separated grammars; absent or unknown is positive.
pub(crate) fn degree_code(code: Option<&str>) -> Degree {
    match code {
        Some("C") => Degree::Comparative,
        Some("S") => Degree::Superlative,
        _ => Degree::Positive,
    }
}

pub(crate) fn case_letter(code: &str, c: char) -> Result<Case, DecodeError> {
    match c {
        'N' => Ok(Case::Nominative),
        'G' => Ok(Case::Genitive),
        'D' => Ok(Case::Dative),
        'A' => Ok(Case::Accusative),
        'V' => Ok(Case::Vocative),
        other => Err(DecodeError::unsupported(code, "case", other)),
    }
}

pub(crate) fn gender_letter(c: char) -> Option<Gender> {
    match c {
        'M' => Some(Gender::Masculine),
        'F' => Some(Gender::Feminine),
        'N' => Some(Gender::Neuter),
        _ => None,
    }
}

/// Person/number pair such as `3S`; dual is only legal where the grammar has it.
pub(crate) fn person_code(
    code: &str,
    value: &str,
    allow_dual: bool,
) -> Result<(Person, Number), DecodeError> {
    let pair = match value {
        "1S" => (Person::First, Number::Singular),
        "2S" => (Person::Second, Number::Singular),
        "3S" => (Person::Third, Number::Singular),
        "1P" => (Person::First, Number::Plural),
        "2P" => (Person::Second, Number::Plural),
        "3P" => (Person::Third, Number::Plural),
        "2D" if allow_dual => (Person::Second, Number::Dual),
        "3D" if allow_dual => (Person::Third, Number::Dual),
        other => return Err(DecodeError::unsupported(code, "person", other)),
    };
    Ok(pair)
}

/// Split the first three characters off a verb block.
pub(crate) fn verb_letters<'a>(code: &str, block: &'a str) -> Result<(char, char, char, &'a str), DecodeError> {
    let mut chars = block.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(tense), Some(voice), Some(mood)) => Ok((tense, voice, mood, chars.as_str())),
        _ => Err(DecodeError::malformed(
            code,
            "verb block needs tense, voice and mood letters",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_keys_parse() {
        for source in Source::ALL {
            assert_eq!(source.key().parse::<Source>().unwrap(), source);
        }
        assert_eq!("CCAT".parse::<Source>().unwrap(), Source::Lxx);
        assert!("vulgate".parse::<Source>().is_err());
    }

    #[test]
    fn every_source_builds_a_decoder() {
        let grammar = GrammarModel::greek();
        for source in Source::ALL {
            let decoder = source.decoder(&grammar);
            assert_eq!(decoder.source(), source);
            let tag = decoder.punctuation(";").unwrap();
            assert_eq!(tag.class, WordClass::Punctuation);
            assert_eq!(tag.text.as_deref(), Some(";"));
        }
    }

    #[test]
    fn person_codes_respect_dual() {
        assert_eq!(
            person_code("x", "3D", true).unwrap(),
            (Person::Third, Number::Dual)
        );
        assert!(person_code("x", "3D", false).is_err());
        assert!(person_code("x", "4S", true).is_err());
    }

    #[test]
    fn verb_block_needs_three_letters() {
        assert_eq!(verb_letters("V-PAI3S", "PAI3S").unwrap(), ('P', 'A', 'I', "3S"));
        assert!(matches!(
            verb_letters("V-PA", "PA"),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
