use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Case, Degree, Gender, Inflection, InflectionCategory, Mood, Number, Person, Tag, Tense, Voice,
    WordClass,
};

/// Mismatch between what a caller asks for and what the registry holds.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown tag type '{0}'")]
    UnknownTagType(String),
    #[error("unknown inflection type '{0}'")]
    UnknownInflectionType(String),
    #[error("unknown inflection key '{key}' for {category}")]
    UnknownInflection {
        category: InflectionCategory,
        key: String,
    },
    #[error("failed to read grammar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid grammar file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable description of a registry: which tag types exist and the legal
/// value names of each inflection category.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GrammarSpec {
    pub tag_types: Vec<String>,
    pub inflection_types: BTreeMap<String, Vec<String>>,
}

impl GrammarSpec {
    /// The full Ancient Greek inventory used by all three corpus decoders.
    pub fn greek() -> Self {
        let numbers = [Number::Singular, Number::Plural, Number::Dual];
        let cases = [
            Case::Nominative,
            Case::Genitive,
            Case::Dative,
            Case::Accusative,
            Case::Vocative,
        ];
        let persons = [Person::First, Person::Second, Person::Third];

        let mut inflection_types = BTreeMap::new();
        inflection_types.insert(
            "case".to_string(),
            cases
                .iter()
                .flat_map(|c| numbers.iter().map(move |n| c.key_with(*n)))
                .collect(),
        );
        inflection_types.insert(
            "person".to_string(),
            persons
                .iter()
                .flat_map(|p| numbers.iter().map(move |n| p.key_with(*n)))
                .collect(),
        );
        inflection_types.insert(
            "gender".to_string(),
            keys(&[Gender::Masculine, Gender::Feminine, Gender::Neuter], |g| {
                g.key()
            }),
        );
        inflection_types.insert(
            "tense".to_string(),
            keys(
                &[
                    Tense::Present,
                    Tense::Imperfect,
                    Tense::Future,
                    Tense::Aorist,
                    Tense::Perfect,
                    Tense::Pluperfect,
                    Tense::FuturePerfect,
                ],
                |t| t.key(),
            ),
        );
        inflection_types.insert(
            "mood".to_string(),
            keys(
                &[
                    Mood::Indicative,
                    Mood::Subjunctive,
                    Mood::Optative,
                    Mood::Imperative,
                    Mood::Infinitive,
                ],
                |m| m.key(),
            ),
        );
        inflection_types.insert(
            "voice".to_string(),
            keys(
                &[
                    Voice::Active,
                    Voice::Middle,
                    Voice::Passive,
                    Voice::MiddlePassive,
                ],
                |v| v.key(),
            ),
        );
        inflection_types.insert(
            "degree".to_string(),
            keys(
                &[Degree::Positive, Degree::Comparative, Degree::Superlative],
                |d| d.key(),
            ),
        );

        Self {
            tag_types: WordClass::ALL.iter().map(|c| c.key().to_string()).collect(),
            inflection_types,
        }
    }
}

fn keys<T>(values: &[T], key: impl Fn(&T) -> &'static str) -> Vec<String> {
    values.iter().map(|v| key(v).to_string()).collect()
}

/// One inflection category together with its registered values.
#[derive(Clone, Debug)]
pub struct InflectionType {
    pub category: InflectionCategory,
    pub inflections: HashMap<String, Inflection>,
}

/// Read-only grammar registry plus a thread-safe tag interner.
///
/// Tag types and inflections are fixed at construction. [`GrammarModel::get_tag`]
/// deduplicates tags so that equal tags share one allocation across every
/// decoder and stream using the same model.
#[derive(Debug)]
pub struct GrammarModel {
    tag_types: HashMap<String, WordClass>,
    inflection_types: HashMap<String, InflectionType>,
    tags: DashMap<Tag, Arc<Tag>>,
}

impl GrammarModel {
    /// Registry populated with [`GrammarSpec::greek`].
    pub fn greek() -> Self {
        // The built-in registry only uses keys this crate defines.
        match Self::from_spec(GrammarSpec::greek()) {
            Ok(model) => model,
            Err(err) => unreachable!("built-in grammar is inconsistent: {err}"),
        }
    }

    /// Build a registry, rejecting tag-type or category keys this crate cannot decode into.
    pub fn from_spec(spec: GrammarSpec) -> Result<Self, RegistryError> {
        let mut tag_types = HashMap::with_capacity(spec.tag_types.len());
        for key in spec.tag_types {
            let class = WordClass::from_key(&key)
                .ok_or_else(|| RegistryError::UnknownTagType(key.clone()))?;
            tag_types.insert(key, class);
        }

        let mut inflection_types = HashMap::with_capacity(spec.inflection_types.len());
        for (key, names) in spec.inflection_types {
            let category = InflectionCategory::from_key(&key)
                .ok_or_else(|| RegistryError::UnknownInflectionType(key.clone()))?;
            let inflections = names
                .into_iter()
                .map(|name| {
                    let inflection = Inflection {
                        category,
                        name: Arc::from(name.as_str()),
                    };
                    (name, inflection)
                })
                .collect();
            inflection_types.insert(
                key,
                InflectionType {
                    category,
                    inflections,
                },
            );
        }

        Ok(Self {
            tag_types,
            inflection_types,
            tags: DashMap::new(),
        })
    }

    /// Parse a registry from the JSON form of a [`GrammarSpec`].
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        Self::from_spec(serde_json::from_str(json)?)
    }

    /// Load a registry from a JSON [`GrammarSpec`] file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path.as_ref())?;
        let spec: GrammarSpec = serde_json::from_reader(BufReader::new(file))?;
        Self::from_spec(spec)
    }

    /// Registered tag-type keys and the word class each decodes to.
    pub fn tag_types(&self) -> &HashMap<String, WordClass> {
        &self.tag_types
    }

    /// Registered inflection categories, keyed by category name.
    pub fn inflection_types(&self) -> &HashMap<String, InflectionType> {
        &self.inflection_types
    }

    /// Look up a tag type by its registry key.
    pub fn tag_type(&self, key: &str) -> Result<WordClass, RegistryError> {
        self.tag_types
            .get(key)
            .copied()
            .ok_or_else(|| RegistryError::UnknownTagType(key.to_string()))
    }

    /// Whether the registry carries a tag type for `class`.
    pub fn has_class(&self, class: WordClass) -> bool {
        self.tag_types.contains_key(class.key())
    }

    /// Fetch a registered inflection value by category and name.
    pub fn inflection(
        &self,
        category: InflectionCategory,
        key: &str,
    ) -> Result<Inflection, RegistryError> {
        let inflection_type = self
            .inflection_types
            .get(category.key())
            .ok_or_else(|| RegistryError::UnknownInflectionType(category.key().to_string()))?;
        inflection_type
            .inflections
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownInflection {
                category,
                key: key.to_string(),
            })
    }

    /// Return the interned tag for the given class, inflections and literal text.
    pub fn get_tag(
        &self,
        class: WordClass,
        inflections: Vec<Inflection>,
        text: Option<&str>,
    ) -> Result<Arc<Tag>, RegistryError> {
        if !self.has_class(class) {
            return Err(RegistryError::UnknownTagType(class.key().to_string()));
        }
        let tag = Tag {
            class,
            inflections,
            text: text.map(str::to_string),
        };
        if let Some(existing) = self.tags.get(&tag) {
            return Ok(Arc::clone(existing.value()));
        }
        let interned = self
            .tags
            .entry(tag.clone())
            .or_insert_with(|| Arc::new(tag))
            .value()
            .clone();
        Ok(interned)
    }

    /// Number of distinct tags handed out so far.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}
