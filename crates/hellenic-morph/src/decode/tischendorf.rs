//! Robinson-style codes of Tischendorf's New Testament: `V-PAI-3S`,
//! `V-2AAP-NSM`, `N-GSF`, `P-1NS`, `S-1SNSM`, `ADV-C`, `PRT`, `HEB`.

use std::sync::Arc;

use hellenic_types::{
    GrammarModel, Inflection, Mood, Number, Tag, Tense, Voice, WordClass,
};

use super::{
    MorphDecoder, Source, case_letter, degree_code, gender_letter, person_code, verb_letters,
};
use crate::{DecodeError, InflectionResolver};

/// Hebrew words kept as exclamations, mapped to the spelling they are tagged with.
const HEBREW_EXCLAMATIONS: &[(&str, &str)] = &[
    ("ἀμήν", "ἀμήν"),
    ("ὡσαννά", "ὡσαννά"),
    ("ἁλληλουϊά", "ἁλληλούϊα"),
    ("ἁλληλούια", "ἁλληλούϊα"),
    ("ἁλληλούϊα", "ἁλληλούϊα"),
];

#[derive(Clone, Copy, Debug)]
pub struct TischendorfDecoder<'g> {
    resolver: InflectionResolver<'g>,
}

impl<'g> TischendorfDecoder<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        Self {
            resolver: InflectionResolver::new(grammar),
        }
    }

    fn verb(&self, code: &str, components: &[&str]) -> Result<Option<Arc<Tag>>, DecodeError> {
        let block = components.get(1).ok_or_else(|| {
            DecodeError::malformed(code, "verb code has no tense/voice/mood block")
        })?;
        // Second aorist/perfect forms are prefixed with `2`.
        let block = block.trim_start_matches('2');
        let (tense, voice, mood, rest) = verb_letters(code, block)?;
        if !rest.is_empty() {
            return Err(DecodeError::malformed(
                code,
                "verb block has letters after the mood",
            ));
        }

        let voice = self.resolver.voice(voice_letter(code, voice, tense)?)?;
        let tense = self.resolver.tense(tense_letter(code, tense)?)?;

        match mood {
            'I' | 'S' | 'O' | 'M' => {
                let mood = self.resolver.mood(finite_mood(mood))?;
                let tail = components.get(2).ok_or_else(|| {
                    DecodeError::malformed(code, "finite verb needs person and number")
                })?;
                let (person, number) = person_code(code, tail, false)?;
                let person = self.resolver.person(person, number)?;
                let tag = self
                    .resolver
                    .tag(WordClass::Verb, vec![tense, voice, mood, person], None)?;
                Ok(Some(tag))
            }
            'N' => {
                let mood = self.resolver.mood(Mood::Infinitive)?;
                let tag = self
                    .resolver
                    .tag(WordClass::Verb, vec![tense, voice, mood], None)?;
                Ok(Some(tag))
            }
            'P' | 'R' => {
                let tail = components.get(2).ok_or_else(|| {
                    DecodeError::malformed(code, "participle needs case, number and gender")
                })?;
                let Some(nominal) = self.name_inflections(code, tail)? else {
                    return Ok(None);
                };
                let mut inflections = Vec::with_capacity(2 + nominal.len());
                inflections.push(tense);
                inflections.push(voice);
                inflections.extend(nominal);
                Ok(Some(self.resolver.tag(WordClass::Participle, inflections, None)?))
            }
            other => Err(DecodeError::unsupported(code, "mood", other)),
        }
    }

    fn nominal(
        &self,
        code: &str,
        class: &str,
        components: &[&str],
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        let block = components
            .get(1)
            .ok_or_else(|| DecodeError::malformed(code, "missing case/number/gender block"))?;
        let Some(mut inflections) = self.name_inflections(code, block)? else {
            return Ok(None);
        };

        let class = match class {
            "N" => WordClass::Noun,
            // Indeclinable adjectives are numerals.
            "A" if inflections.is_empty() => WordClass::Numeral,
            "A" => {
                let degree = degree_code(components.get(2).copied());
                inflections.push(self.resolver.degree(degree)?);
                WordClass::Adjective
            }
            "T" => WordClass::Article,
            _ => WordClass::Pronoun,
        };
        Ok(Some(self.resolver.tag(class, inflections, None)?))
    }

    /// Possessive (`S-1SNSM`) and reflexive (`F-3ASM`) pronouns: the last three letters
    /// hold case, number and gender.
    fn possessive(
        &self,
        code: &str,
        components: &[&str],
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        let block = components
            .get(1)
            .ok_or_else(|| DecodeError::malformed(code, "missing case/number/gender block"))?;
        let start = block
            .char_indices()
            .rev()
            .nth(2)
            .map(|(idx, _)| idx)
            .ok_or_else(|| {
                DecodeError::malformed(code, "pronoun block shorter than three letters")
            })?;
        let Some(inflections) = self.name_inflections(code, &block[start..])? else {
            return Ok(None);
        };
        Ok(Some(self.resolver.tag(WordClass::Pronoun, inflections, None)?))
    }

    /// Case/number/(gender) block; a leading person digit means no gender is given.
    fn name_inflections(
        &self,
        code: &str,
        block: &str,
    ) -> Result<Option<Vec<Inflection>>, DecodeError> {
        match block {
            // Hebrew or other foreign name.
            "PRI" => return Ok(None),
            "NUI" | "LI" | "OI" => return Ok(Some(Vec::new())),
            _ => {}
        }

        let letters: Vec<char> = block.chars().collect();
        let [first, second, third] = letters[..] else {
            return Err(DecodeError::malformed(
                code,
                "case/number/gender block must have three letters",
            ));
        };
        let (case, number, gender) = match first {
            '1' | '2' | '3' => (second, third, None),
            _ => (first, second, Some(third)),
        };

        let case = case_letter(code, case)?;
        let number = match number {
            'S' => Number::Singular,
            'P' => Number::Plural,
            other => return Err(DecodeError::unsupported(code, "number", other)),
        };

        let mut inflections = vec![self.resolver.case(case, number)?];
        // Letters other than M/F/N carry no gender.
        if let Some(gender) = gender.and_then(gender_letter) {
            inflections.push(self.resolver.gender(gender)?);
        }
        Ok(Some(inflections))
    }
}

fn tense_letter(code: &str, c: char) -> Result<Tense, DecodeError> {
    match c {
        'P' | 'X' => Ok(Tense::Present),
        'I' => Ok(Tense::Imperfect),
        'F' => Ok(Tense::Future),
        'A' => Ok(Tense::Aorist),
        'R' => Ok(Tense::Perfect),
        'L' => Ok(Tense::Pluperfect),
        other => Err(DecodeError::unsupported(code, "tense", other)),
    }
}

/// Middle and passive are not told apart in the present, imperfect and perfect.
fn voice_letter(code: &str, c: char, tense: char) -> Result<Voice, DecodeError> {
    let merged = matches!(tense, 'P' | 'I' | 'R');
    match c {
        'A' | 'Q' | 'X' => Ok(Voice::Active),
        'M' | 'D' if merged => Ok(Voice::MiddlePassive),
        'M' | 'D' => Ok(Voice::Middle),
        'P' | 'O' if merged => Ok(Voice::MiddlePassive),
        'P' | 'O' => Ok(Voice::Passive),
        'E' | 'N' => Ok(Voice::MiddlePassive),
        other => Err(DecodeError::unsupported(code, "voice", other)),
    }
}

fn finite_mood(c: char) -> Mood {
    match c {
        'S' => Mood::Subjunctive,
        'O' => Mood::Optative,
        'M' => Mood::Imperative,
        _ => Mood::Indicative,
    }
}

fn hebrew_exclamation(lemma: &str) -> Option<&'static str> {
    HEBREW_EXCLAMATIONS
        .iter()
        .find(|(spelling, _)| *spelling == lemma)
        .map(|(_, canonical)| *canonical)
}

impl MorphDecoder for TischendorfDecoder<'_> {
    fn source(&self) -> Source {
        Source::Tischendorf
    }

    fn resolver(&self) -> InflectionResolver<'_> {
        self.resolver
    }

    fn decode(&self, code: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError> {
        if code.is_empty() {
            return Err(DecodeError::malformed(code, "empty code"));
        }
        let components: Vec<&str> = code.split('-').collect();

        match components[0] {
            "V" => self.verb(code, &components),
            class @ ("N" | "A" | "T" | "P" | "R" | "C" | "D" | "K" | "I" | "X" | "Q") => {
                self.nominal(code, class, &components)
            }
            "S" | "F" => self.possessive(code, &components),
            "ADV" => {
                let degree = degree_code(components.get(1).copied());
                let degree = self.resolver.degree(degree)?;
                Ok(Some(self.resolver.tag(WordClass::Adverb, vec![degree], None)?))
            }
            "CONJ" | "COND" => Ok(Some(self.resolver.literal(WordClass::Conjunction, lemma)?)),
            // The negations are tagged as particles in this edition.
            "PRT" => match lemma {
                "οὐ" => Ok(Some(self.resolver.literal(WordClass::Adverb, lemma)?)),
                "μή" => Ok(Some(self.resolver.literal(WordClass::Conjunction, lemma)?)),
                _ => Ok(Some(self.resolver.literal(WordClass::Particle, lemma)?)),
            },
            "PREP" => Ok(Some(self.resolver.literal(WordClass::Preposition, lemma)?)),
            "INJ" => Ok(Some(self.resolver.literal(WordClass::Exclamation, lemma)?)),
            "HEB" => match hebrew_exclamation(lemma) {
                Some(text) => Ok(Some(self.resolver.literal(WordClass::Exclamation, text)?)),
                None => Ok(None),
            },
            "ARAM" => Ok(None),
            other => Err(DecodeError::unsupported(code, "class", other)),
        }
    }
}
