//! Fixed-width treebank postags (`n-s---fa-`, `v3spia---`, `u--------`).

use std::sync::Arc;

use hellenic_types::{
    Case, Degree, Gender, GrammarModel, Inflection, Mood, Number, Person, Tag, Tense, Voice,
    WordClass,
};

use super::{MorphDecoder, Source};
use crate::normalize::{ANO_TELEIA, canonical_mark};
use crate::{DecodeError, InflectionResolver};

/// Forms recognised as punctuation when the class letter is missing.
const PUNCTUATION_FORMS: &[&str] = &[";", ".", ":", ANO_TELEIA];

/// A postag split into its nine positions. Unused positions hold `-`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Postag {
    pub class: char,
    pub person: char,
    pub number: char,
    pub tense: char,
    pub mood: char,
    pub voice: char,
    pub gender: char,
    pub case: char,
    pub degree: char,
}

impl Postag {
    pub fn parse(code: &str) -> Result<Self, DecodeError> {
        let letters: Vec<char> = code.chars().collect();
        let [class, person, number, tense, mood, voice, gender, case, degree] = letters[..]
        else {
            return Err(DecodeError::malformed(code, "postag must have nine positions"));
        };
        Ok(Self {
            class,
            person,
            number,
            tense,
            mood,
            voice,
            gender,
            case,
            degree,
        })
    }

    fn number(&self) -> Number {
        match self.number {
            'p' => Number::Plural,
            'd' => Number::Dual,
            _ => Number::Singular,
        }
    }

    fn person(&self) -> (Person, Number) {
        let number = self.number();
        let person = match (number, self.person) {
            (Number::Dual, '2') => Person::Second,
            (Number::Dual, _) => Person::Third,
            (_, '1') => Person::First,
            (_, '2') => Person::Second,
            _ => Person::Third,
        };
        (person, number)
    }

    fn case(&self) -> Case {
        match self.case {
            'v' => Case::Vocative,
            'g' => Case::Genitive,
            'd' => Case::Dative,
            'a' => Case::Accusative,
            _ => Case::Nominative,
        }
    }

    fn tense(&self) -> Tense {
        match self.tense {
            'i' => Tense::Imperfect,
            'r' => Tense::Perfect,
            'l' => Tense::Pluperfect,
            't' => Tense::FuturePerfect,
            'f' => Tense::Future,
            'a' => Tense::Aorist,
            _ => Tense::Present,
        }
    }

    fn mood(&self) -> Mood {
        match self.mood {
            'i' => Mood::Indicative,
            's' => Mood::Subjunctive,
            'o' => Mood::Optative,
            'm' => Mood::Imperative,
            _ => Mood::Infinitive,
        }
    }

    fn voice(&self) -> Voice {
        match self.voice {
            'p' => Voice::Passive,
            'm' => Voice::Middle,
            'e' => Voice::MiddlePassive,
            _ => Voice::Active,
        }
    }

    fn gender(&self) -> Gender {
        match self.gender {
            'f' => Gender::Feminine,
            'n' => Gender::Neuter,
            _ => Gender::Masculine,
        }
    }

    fn degree(&self) -> Degree {
        match self.degree {
            'c' => Degree::Comparative,
            's' => Degree::Superlative,
            _ => Degree::Positive,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PerseusDecoder<'g> {
    resolver: InflectionResolver<'g>,
}

impl<'g> PerseusDecoder<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        Self {
            resolver: InflectionResolver::new(grammar),
        }
    }

    /// Decode a treebank word. Punctuation and untagged records are recognised
    /// by their surface `form`; closed classes carry `lemma`.
    pub fn decode_word(
        &self,
        code: &str,
        form: &str,
        lemma: &str,
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        let tag = Postag::parse(code)?;
        let r = &self.resolver;

        let decoded = match tag.class {
            'n' => r.tag(WordClass::Noun, self.nominal(&tag)?, None)?,
            'v' => {
                let (person, number) = tag.person();
                let inflections = vec![
                    r.person(person, number)?,
                    r.tense(tag.tense())?,
                    r.mood(tag.mood())?,
                    r.voice(tag.voice())?,
                ];
                r.tag(WordClass::Verb, inflections, None)?
            }
            't' => {
                let mut inflections = self.nominal(&tag)?;
                inflections.push(r.tense(tag.tense())?);
                inflections.push(r.voice(tag.voice())?);
                r.tag(WordClass::Participle, inflections, None)?
            }
            'a' => {
                let mut inflections = self.nominal(&tag)?;
                inflections.push(r.degree(tag.degree())?);
                r.tag(WordClass::Adjective, inflections, None)?
            }
            'd' => r.tag(WordClass::Adverb, vec![r.degree(tag.degree())?], None)?,
            'l' => r.tag(WordClass::Article, self.nominal(&tag)?, None)?,
            'p' => r.tag(WordClass::Pronoun, self.nominal(&tag)?, None)?,
            'g' if lemma == "μή" => r.literal(WordClass::Conjunction, lemma)?,
            'g' => r.literal(WordClass::Particle, lemma)?,
            'c' => r.literal(WordClass::Conjunction, lemma)?,
            'r' => r.literal(WordClass::Preposition, lemma)?,
            'e' | 'i' => r.literal(WordClass::Exclamation, lemma)?,
            'u' => self.punctuation(canonical_mark(form))?,
            'm' => r.tag(WordClass::Numeral, Vec::new(), None)?,
            _ => {
                let mark = canonical_mark(form);
                if !PUNCTUATION_FORMS.contains(&mark) {
                    return Ok(None);
                }
                self.punctuation(mark)?
            }
        };
        Ok(Some(decoded))
    }

    fn nominal(&self, tag: &Postag) -> Result<Vec<Inflection>, DecodeError> {
        Ok(vec![
            self.resolver.case(tag.case(), tag.number())?,
            self.resolver.gender(tag.gender())?,
        ])
    }
}

impl MorphDecoder for PerseusDecoder<'_> {
    fn source(&self) -> Source {
        Source::Perseus
    }

    fn resolver(&self) -> InflectionResolver<'_> {
        self.resolver
    }

    /// Without a separate surface form the lemma stands in for it.
    fn decode(&self, code: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError> {
        self.decode_word(code, lemma, lemma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(code: &str, form: &str, lemma: &str) -> Result<Option<Arc<Tag>>, DecodeError> {
        let grammar = GrammarModel::greek();
        PerseusDecoder::new(&grammar).decode_word(code, form, lemma)
    }

    fn tag(code: &str, lemma: &str) -> String {
        decode(code, lemma, lemma).unwrap().unwrap().to_string()
    }

    #[test]
    fn nominal_positions() {
        assert_eq!(tag("n-s---fa-", "ἀρχή"), "noun[acc sg, fem]");
        assert_eq!(tag("n-p---nd-", "ἔργον"), "noun[dat pl, neut]");
        assert_eq!(tag("l-s---mn-", "ὁ"), "article[nom sg, masc]");
        assert_eq!(tag("p-d---mg-", "ὅς"), "pron[gen dual, masc]");
        assert_eq!(tag("a-p---nac", "καλός"), "adj[acc pl, neut, comp]");
        assert_eq!(tag("a-s---fn-", "καλός"), "adj[nom sg, fem, pos]");
    }

    #[test]
    fn verb_positions() {
        assert_eq!(tag("v3spia---", "λέγω"), "verb[3rd sg, pres, ind, act]");
        assert_eq!(tag("v1paim---", "λύω"), "verb[1st pl, aor, ind, mid]");
        assert_eq!(tag("v2dtse---", "λύω"), "verb[2nd dual, futperf, subj, mp]");
        assert_eq!(tag("v1drop---", "λύω"), "verb[3rd dual, perf, opt, pass]");
        assert_eq!(tag("v--pna---", "λύω"), "verb[3rd sg, pres, inf, act]");
        assert_eq!(
            tag("t-sapamn-", "λύω"),
            "part[nom sg, masc, aor, act]"
        );
    }

    #[test]
    fn closed_classes() {
        assert_eq!(tag("g--------", "γάρ"), "partic(γάρ)");
        assert_eq!(tag("g--------", "μή"), "conj(μή)");
        assert_eq!(tag("c--------", "καί"), "conj(καί)");
        assert_eq!(tag("r--------", "ἐν"), "prep(ἐν)");
        assert_eq!(tag("i--------", "ὦ"), "exclam(ὦ)");
        assert_eq!(tag("e--------", "φεῦ"), "exclam(φεῦ)");
        assert_eq!(tag("m--------", "δύο"), "numeral");
        assert_eq!(tag("d-------s", "μάλιστα"), "adv[superl]");
    }

    #[test]
    fn punctuation_by_class_or_form() {
        assert_eq!(
            decode("u--------", "\u{00B7}", "\u{00B7}").unwrap().unwrap().text.as_deref(),
            Some("\u{0387}")
        );
        assert_eq!(
            decode("---------", ".", "x").unwrap().unwrap().to_string(),
            "[PUNCTUATION](.)"
        );
        assert!(decode("---------", "ἄρα", "ἄρα").unwrap().is_none());
        assert!(decode("x--------", "λόγος", "λόγος").unwrap().is_none());
    }

    #[test]
    fn wrong_width_is_malformed() {
        assert!(matches!(
            decode("n-s---fa", "x", "x"),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(decode("", "x", "x"), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn parse_splits_positions() {
        let tag = Postag::parse("v3spia---").unwrap();
        assert_eq!(tag.class, 'v');
        assert_eq!(tag.person, '3');
        assert_eq!(tag.voice, 'a');
        assert_eq!(tag.degree, '-');
    }
}
