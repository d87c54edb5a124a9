use std::sync::Arc;

use hellenic_types::{
    Case, Degree, Gender, GrammarModel, Inflection, InflectionCategory, Mood, Number, Person,
    Tag, Tense, Voice, WordClass,
};

use crate::DecodeError;

/// Maps canonical feature values onto the registry's interned inflections.
///
/// Holds nothing but a shared reference to the registry, so it is `Copy` and
/// can be used from any number of decoders at once.
#[derive(Clone, Copy, Debug)]
pub struct InflectionResolver<'g> {
    grammar: &'g GrammarModel,
}

impl<'g> InflectionResolver<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g GrammarModel {
        self.grammar
    }

    /// Fetch an inflection by symbolic key, failing when the registry lacks it.
    pub fn resolve(
        &self,
        category: InflectionCategory,
        key: &str,
    ) -> Result<Inflection, DecodeError> {
        Ok(self.grammar.inflection(category, key)?)
    }

    pub fn case(&self, case: Case, number: Number) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Case, &case.key_with(number))
    }

    pub fn person(&self, person: Person, number: Number) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Person, &person.key_with(number))
    }

    pub fn gender(&self, gender: Gender) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Gender, gender.key())
    }

    pub fn tense(&self, tense: Tense) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Tense, tense.key())
    }

    pub fn mood(&self, mood: Mood) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Mood, mood.key())
    }

    pub fn voice(&self, voice: Voice) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Voice, voice.key())
    }

    pub fn degree(&self, degree: Degree) -> Result<Inflection, DecodeError> {
        self.resolve(InflectionCategory::Degree, degree.key())
    }

    /// Intern a tag through the registry.
    pub fn tag(
        &self,
        class: WordClass,
        inflections: Vec<Inflection>,
        text: Option<&str>,
    ) -> Result<Arc<Tag>, DecodeError> {
        Ok(self.grammar.get_tag(class, inflections, text)?)
    }

    /// Closed-class tag carrying `text` as its literal.
    pub fn literal(&self, class: WordClass, text: &str) -> Result<Arc<Tag>, DecodeError> {
        self.tag(class, Vec::new(), Some(text))
    }
}
