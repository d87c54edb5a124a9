//! CCAT (Packard) codes used by the LXX morphology files.
//!
//! A code is a dash-separated sequence such as `N1-ASF`, `V1-PAI3S`, `A1A-NPN-C`
//! or `D`. The leading letter selects the class; a declension digit may follow
//! it. Persons can be glued to the verb block (`PAI3S`) or split off (`PAI-3S`).

use std::sync::Arc;

use hellenic_types::{
    Gender, GrammarModel, Inflection, Mood, Number, Tag, Tense, Voice, WordClass,
};

use super::{
    MorphDecoder, Source, case_letter, degree_code, gender_letter, person_code, verb_letters,
};
use crate::{DecodeError, InflectionResolver};

/// Fixed sub-codes marking an indeclinable word with no inflections given.
const INDECLINABLE: &[&str] = &["PRI", "NUI", "LI", "OI"];

/// Gender of the few names whose block carries only case and number.
const GENDER_BY_LEMMA: &[(&str, Gender)] = &[
    ("φισων", Gender::Masculine),
    ("γηων", Gender::Masculine),
    ("τίγρις", Gender::Masculine),
    ("γομορρα", Gender::Feminine),
    ("σιδῶν", Gender::Feminine),
    ("καππαδοκία", Gender::Feminine),
    ("σοδομα", Gender::Neuter),
];

const PLACEHOLDER: char = '/';

#[derive(Clone, Copy, Debug)]
pub struct CcatDecoder<'g> {
    resolver: InflectionResolver<'g>,
}

impl<'g> CcatDecoder<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        Self {
            resolver: InflectionResolver::new(grammar),
        }
    }

    fn verb(
        &self,
        code: &str,
        components: &[&str],
        lemma: &str,
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        let block = components.get(1).ok_or_else(|| {
            DecodeError::malformed(code, "verb code has no tense/voice/mood block")
        })?;
        let (tense, voice, mood, rest) = verb_letters(code, block)?;
        // Glued (`PAI3S`) or split (`PAI-3S`) tail.
        let tail = if rest.is_empty() {
            components.get(2).copied()
        } else {
            Some(rest)
        };

        let tense = self.resolver.tense(tense_letter(code, tense)?)?;
        let voice = self.resolver.voice(voice_letter(code, voice)?)?;

        match mood {
            'I' | 'S' | 'O' | 'D' => {
                let mood = self.resolver.mood(finite_mood(mood))?;
                let tail = tail.ok_or_else(|| {
                    DecodeError::malformed(code, "finite verb needs person and number")
                })?;
                let (person, number) = person_code(code, tail, true)?;
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
            'P' => {
                let tail = tail.ok_or_else(|| {
                    DecodeError::malformed(code, "participle needs case, number and gender")
                })?;
                let Some(nominal) = self.name_inflections(code, tail, lemma)? else {
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
        class_block: &str,
        components: &[&str],
        lemma: &str,
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        let Some(&block) = components.get(1) else {
            // Possibly Hebrew.
            return Ok(None);
        };
        // Without a declension digit only a full case/number/gender block is trusted.
        let bare_class = class_block.chars().nth(1).is_none();
        if bare_class && (block.chars().count() < 3 || INDECLINABLE.contains(&block)) {
            return Ok(None);
        }
        let Some(mut inflections) = self.name_inflections(code, block, lemma)? else {
            return Ok(None);
        };

        let class = match class_block.chars().next() {
            Some('N') => WordClass::Noun,
            Some('A') => {
                let degree = degree_code(components.get(2).copied());
                inflections.push(self.resolver.degree(degree)?);
                WordClass::Adjective
            }
            _ if class_block.chars().nth(1) == Some('A') => WordClass::Article,
            _ => WordClass::Pronoun,
        };
        Ok(Some(self.resolver.tag(class, inflections, None)?))
    }

    /// Case/number/gender block. `None` marks ambiguity in the source data.
    fn name_inflections(
        &self,
        code: &str,
        block: &str,
        lemma: &str,
    ) -> Result<Option<Vec<Inflection>>, DecodeError> {
        if INDECLINABLE.contains(&block) {
            return Ok(Some(Vec::new()));
        }

        let letters: Vec<char> = block.chars().collect();
        let gender = match letters.len() {
            0 | 1 => return Ok(None),
            2 => match lemma_gender(lemma) {
                Some(gender) => GenderSlot::Known(gender),
                None => return Ok(None),
            },
            _ => GenderSlot::Letter(letters[2]),
        };
        let (case, number) = (letters[0], letters[1]);
        if case == PLACEHOLDER || number == PLACEHOLDER {
            return Ok(None);
        }

        let case = case_letter(code, case)?;
        let number = number_letter(code, number)?;
        let gender = match gender {
            GenderSlot::Known(gender) => gender,
            GenderSlot::Letter(PLACEHOLDER) => return Ok(None),
            GenderSlot::Letter(other) => gender_letter(other)
                .ok_or_else(|| DecodeError::unsupported(code, "gender", other))?,
        };

        Ok(Some(vec![
            self.resolver.case(case, number)?,
            self.resolver.gender(gender)?,
        ]))
    }
}

enum GenderSlot {
    Known(Gender),
    Letter(char),
}

fn lemma_gender(lemma: &str) -> Option<Gender> {
    GENDER_BY_LEMMA
        .iter()
        .find(|(name, _)| *name == lemma)
        .map(|(_, gender)| *gender)
}

fn tense_letter(code: &str, c: char) -> Result<Tense, DecodeError> {
    match c {
        'P' => Ok(Tense::Present),
        'I' => Ok(Tense::Imperfect),
        'F' => Ok(Tense::Future),
        'A' => Ok(Tense::Aorist),
        'X' => Ok(Tense::Perfect),
        'Y' => Ok(Tense::Pluperfect),
        other => Err(DecodeError::unsupported(code, "tense", other)),
    }
}

fn voice_letter(code: &str, c: char) -> Result<Voice, DecodeError> {
    match c {
        // Q impersonal active, X no voice.
        'A' | 'Q' | 'X' => Ok(Voice::Active),
        // D middle deponent.
        'M' | 'D' => Ok(Voice::Middle),
        // O passive deponent.
        'P' | 'O' => Ok(Voice::Passive),
        // N middle or passive deponent.
        'E' | 'N' => Ok(Voice::MiddlePassive),
        other => Err(DecodeError::unsupported(code, "voice", other)),
    }
}

fn finite_mood(c: char) -> Mood {
    match c {
        'S' => Mood::Subjunctive,
        'O' => Mood::Optative,
        'D' => Mood::Imperative,
        _ => Mood::Indicative,
    }
}

fn number_letter(code: &str, c: char) -> Result<Number, DecodeError> {
    match c {
        'S' => Ok(Number::Singular),
        'P' => Ok(Number::Plural),
        'D' => Ok(Number::Dual),
        other => Err(DecodeError::unsupported(code, "number", other)),
    }
}

impl MorphDecoder for CcatDecoder<'_> {
    fn source(&self) -> Source {
        Source::Lxx
    }

    fn resolver(&self) -> InflectionResolver<'_> {
        self.resolver
    }

    fn decode(&self, code: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError> {
        let components: Vec<&str> = code.split('-').filter(|c| !c.is_empty()).collect();
        let Some(&class_block) = components.first() else {
            return Err(DecodeError::malformed(code, "empty code"));
        };
        let Some(class) = class_block.chars().next() else {
            return Err(DecodeError::malformed(code, "empty class block"));
        };

        match class {
            'V' => self.verb(code, &components, lemma),
            'N' | 'A' | 'R' => self.nominal(code, class_block, &components, lemma),
            'D' => {
                let degree = degree_code(components.get(1).copied());
                let degree = self.resolver.degree(degree)?;
                Ok(Some(self.resolver.tag(WordClass::Adverb, vec![degree], None)?))
            }
            'C' => Ok(Some(self.resolver.literal(WordClass::Conjunction, lemma)?)),
            'X' => Ok(Some(self.resolver.literal(WordClass::Particle, lemma)?)),
            'P' => Ok(Some(self.resolver.literal(WordClass::Preposition, lemma)?)),
            'I' => Ok(Some(self.resolver.literal(WordClass::Exclamation, lemma)?)),
            'M' => Ok(Some(self.resolver.tag(WordClass::Numeral, Vec::new(), None)?)),
            other => Err(DecodeError::unsupported(code, "class", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use hellenic_types::InflectionCategory;

    use super::*;

    fn decode(code: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError> {
        let grammar = GrammarModel::greek();
        CcatDecoder::new(&grammar).decode(code, lemma)
    }

    fn tag(code: &str, lemma: &str) -> Arc<Tag> {
        decode(code, lemma).unwrap().unwrap()
    }

    #[test]
    fn noun_with_declension() {
        let tag = tag("N1-ASF", "ἀρχή");
        assert_eq!(tag.to_string(), "noun[acc sg, fem]");
    }

    #[test]
    fn bare_noun_with_full_block() {
        assert_eq!(tag("N-ASF", "γῆ").to_string(), "noun[acc sg, fem]");
        // A bare class with an indeclinable marker is an untransliterated name.
        assert!(decode("N-PRI", "αβρααμ").unwrap().is_none());
        assert!(decode("N", "αβρααμ").unwrap().is_none());
    }

    #[test]
    fn finite_verb_glued_and_split() {
        let glued = tag("V1-PAI3S", "λέγω");
        let split = tag("V-PAI-3S", "λέγω");
        assert_eq!(glued, split);
        assert_eq!(glued.to_string(), "verb[pres, act, ind, 3rd sg]");
    }

    #[test]
    fn infinitive_and_participle() {
        assert_eq!(tag("V1-AAN", "λύω").to_string(), "verb[aor, act, inf]");
        assert_eq!(
            tag("V1-XMPNPM", "λύω").to_string(),
            "part[perf, mid, nom pl, masc]"
        );
        assert_eq!(
            tag("V2-YPD2D", "λύω").to_string(),
            "verb[plup, pass, imperat, 2nd dual]"
        );
    }

    #[test]
    fn unknown_mood_is_unsupported() {
        let err = decode("V1-PAZ3S", "λύω").unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported { field: "mood", .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn short_verb_block_is_malformed() {
        assert!(matches!(
            decode("V1-PA", "λύω"),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            decode("V1-PAI", "λύω"),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_code_is_malformed() {
        assert!(matches!(decode("", "x"), Err(DecodeError::Malformed { .. })));
        assert!(matches!(decode("--", "x"), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn adjective_degree_defaults_to_positive() {
        let tag = tag("A--APN", "καλός");
        assert_eq!(tag.class, WordClass::Adjective);
        assert!(tag.has_inflection(InflectionCategory::Degree, "pos"));
        let tag = self::tag("A1A-NPN-C", "καλός");
        assert!(tag.has_inflection(InflectionCategory::Degree, "comp"));
        assert_eq!(self::tag("A3-GSM-S", "μέγας").to_string(), "adj[gen sg, masc, superl]");
    }

    #[test]
    fn article_and_pronoun() {
        assert_eq!(tag("RA-NSM", "ὁ").class, WordClass::Article);
        assert_eq!(tag("RP-GPM", "ἐγώ").class, WordClass::Pronoun);
    }

    #[test]
    fn placeholder_is_soft_skip() {
        assert!(decode("N2-/SM", "x").unwrap().is_none());
        assert!(decode("N2-AS/", "x").unwrap().is_none());
    }

    #[test]
    fn bad_letters_are_unsupported() {
        assert!(matches!(
            decode("N2-QSM", "x"),
            Err(DecodeError::Unsupported { field: "case", .. })
        ));
        assert!(matches!(
            decode("N2-AXM", "x"),
            Err(DecodeError::Unsupported { field: "number", .. })
        ));
        assert!(matches!(
            decode("N2-ASZ", "x"),
            Err(DecodeError::Unsupported { field: "gender", .. })
        ));
        assert!(matches!(
            decode("Z", "x"),
            Err(DecodeError::Unsupported { field: "class", .. })
        ));
    }

    #[test]
    fn two_letter_block_uses_lemma_table() {
        assert_eq!(tag("N2-DS", "σιδῶν").to_string(), "noun[dat sg, fem]");
        assert_eq!(tag("N2-NS", "σοδομα").to_string(), "noun[nom sg, neut]");
        assert!(decode("N2-NS", "λόγος").unwrap().is_none());
    }

    #[test]
    fn indeclinables_have_no_inflections() {
        let tag = tag("N1-NUI", "δέκα");
        assert_eq!(tag.class, WordClass::Noun);
        assert!(tag.inflections.is_empty());
    }

    #[test]
    fn closed_classes_carry_lemma() {
        for (code, class) in [
            ("C", WordClass::Conjunction),
            ("X", WordClass::Particle),
            ("P", WordClass::Preposition),
            ("I", WordClass::Exclamation),
        ] {
            let tag = tag(code, "καί");
            assert_eq!(tag.class, class);
            assert_eq!(tag.text.as_deref(), Some("καί"));
        }
        let numeral = tag("M", "δύο");
        assert_eq!(numeral.class, WordClass::Numeral);
        assert!(numeral.text.is_none() && numeral.inflections.is_empty());
    }

    #[test]
    fn adverb_degree() {
        assert_eq!(tag("D", "καλῶς").to_string(), "adv[pos]");
        assert_eq!(tag("D-C", "μᾶλλον").to_string(), "adv[comp]");
    }
}
