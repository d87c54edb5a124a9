//! Morphological code decoding for annotated Greek corpora.
//!
//! Three source grammars are supported, each behind the [`MorphDecoder`]
//! trait:
//!
//! - [`CcatDecoder`]: CCAT/Packard codes of the LXX (`N1-ASF`, `V1-PAI3S`).
//! - [`TischendorfDecoder`]: Robinson-style codes of Tischendorf's New
//!   Testament (`V-2AAP-NSM`, `PRT`, `HEB`).
//! - [`PerseusDecoder`]: fixed-width treebank postags (`v3spia---`).
//!
//! All of them ask an [`InflectionResolver`] for registry inflections, so a
//! registry that lacks a key fails with a fatal [`DecodeError::Registry`]
//! rather than silently yielding a different tag. Per-token problems come
//! back as [`DecodeError::Malformed`] or [`DecodeError::Unsupported`], and
//! tokens the source itself marks as out of domain decode to `Ok(None)`.
//!
//! The [`normalize`] module holds the string transforms applied around
//! decoding.
//!
//! # Example
//! ```
//! use hellenic_morph::{MorphDecoder, Source};
//! use hellenic_types::GrammarModel;
//!
//! let grammar = GrammarModel::greek();
//! let decoder = Source::Tischendorf.decoder(&grammar);
//!
//! let tag = decoder.decode("V-PAI-3S", "λέγω").unwrap().unwrap();
//! assert_eq!(tag.to_string(), "verb[pres, act, ind, 3rd sg]");
//!
//! // Aramaic words are skipped, not rejected.
//! assert!(decoder.decode("ARAM", "ἀββα").unwrap().is_none());
//! ```
//!
//! For a runnable demo, see `cargo run -p hellenic-morph --example decode -- <source> <code> [lemma]`.

mod decode;
mod error;
pub mod normalize;
mod resolver;

pub use decode::{
    CcatDecoder, MorphDecoder, PerseusDecoder, Postag, Source, TischendorfDecoder, UnknownSource,
};
pub use error::DecodeError;
pub use resolver::InflectionResolver;
