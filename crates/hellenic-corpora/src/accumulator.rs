//! Sentence segmentation over a stream of decoded tokens.
//!
//! The accumulator owns a single buffer of tagged word forms and a validity
//! flag. A token that fails to decode poisons the sentence in progress: the
//! rest of it is consumed, and the next terminator discards it and starts a
//! fresh, valid buffer.

use std::mem;
use std::sync::Arc;

use hellenic_morph::normalize::ANO_TELEIA;
use hellenic_morph::{DecodeError, MorphDecoder};
use hellenic_types::{Sentence, Tag, TaggedWordForm};
use tracing::debug;

/// Marks that end a sentence.
pub const SENTENCE_TERMINATORS: [&str; 5] = [".", ";", ANO_TELEIA, "!", "…"];

const MIDDLE_DOT: char = '\u{00B7}';
const GREEK_QUESTION_MARK: char = '\u{037E}';

pub fn is_terminator(mark: &str) -> bool {
    SENTENCE_TERMINATORS.contains(&mark)
}

/// Split one trailing punctuation mark off a raw token, mapping the middle
/// dot and the Greek question mark onto their canonical marks.
pub fn split_punctuation(token: &str) -> (&str, Option<&'static str>) {
    let Some(last) = token.chars().next_back() else {
        return (token, None);
    };
    let mark = match last {
        '.' => ".",
        ';' | GREEK_QUESTION_MARK => ";",
        ',' => ",",
        '\u{0387}' | MIDDLE_DOT => ANO_TELEIA,
        '!' => "!",
        '…' => "…",
        _ => return (token, None),
    };
    (&token[..token.len() - last.len_utf8()], Some(mark))
}

/// Outcome of feeding a punctuation mark.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Still inside a sentence.
    Continue,
    /// A terminator closed a fully decoded sentence.
    Emit(Sentence),
    /// A terminator closed a sentence that contained an undecodable token.
    Discard,
}

/// What happens to a buffered sentence when the input runs out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndOfStream {
    /// Drop whatever has not been terminated.
    Drop,
    /// Emit the buffer if it is valid and non-empty.
    EmitValid,
}

#[derive(Debug)]
pub struct SentenceAccumulator {
    words: Vec<TaggedWordForm>,
    valid: bool,
    end: EndOfStream,
}

impl SentenceAccumulator {
    pub fn new(end: EndOfStream) -> Self {
        Self {
            words: Vec::new(),
            valid: true,
            end,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Turn a decode result into a tag to append. Soft skips and per-token
    /// errors invalidate the sentence and yield `None`; registry mismatches
    /// are returned to the caller.
    pub fn admit(
        &mut self,
        code: &str,
        decoded: Result<Option<Arc<Tag>>, DecodeError>,
    ) -> Result<Option<Arc<Tag>>, DecodeError> {
        match decoded {
            Ok(Some(tag)) => Ok(Some(tag)),
            Ok(None) => {
                debug!(code, "token outside the grammar, rejecting sentence");
                self.invalidate();
                Ok(None)
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                debug!(code, error = %err, "undecodable token, rejecting sentence");
                self.invalidate();
                Ok(None)
            }
        }
    }

    /// Append a word while the sentence is valid.
    pub fn push(&mut self, form: impl Into<String>, lemma: impl Into<String>, tag: Arc<Tag>) {
        if self.valid {
            self.words.push(TaggedWordForm::new(form, lemma, tag));
        }
    }

    /// Append a punctuation mark as its own word without closing the sentence.
    pub fn push_mark(&mut self, mark: &str, decoder: &dyn MorphDecoder) -> Result<(), DecodeError> {
        if self.valid {
            let tag = decoder.punctuation(mark)?;
            self.words.push(TaggedWordForm::new(mark, mark, tag));
        }
        Ok(())
    }

    /// Feed a punctuation mark; terminators close the sentence.
    pub fn punctuation(
        &mut self,
        mark: &str,
        decoder: &dyn MorphDecoder,
    ) -> Result<Step, DecodeError> {
        self.push_mark(mark, decoder)?;
        if is_terminator(mark) {
            Ok(self.close())
        } else {
            Ok(Step::Continue)
        }
    }

    /// Close the sentence in progress and reset to an empty, valid buffer.
    pub fn close(&mut self) -> Step {
        let words = mem::take(&mut self.words);
        if !mem::replace(&mut self.valid, true) {
            debug!(dropped = words.len(), "discarding rejected sentence");
            return Step::Discard;
        }
        match Sentence::new(words) {
            Some(sentence) => Step::Emit(sentence),
            None => Step::Continue,
        }
    }

    /// Apply the end-of-stream policy to whatever is still buffered.
    pub fn finish(&mut self) -> Option<Sentence> {
        match (self.end, self.close()) {
            (EndOfStream::EmitValid, Step::Emit(sentence)) => Some(sentence),
            (EndOfStream::Drop, Step::Emit(sentence)) => {
                debug!(dropped = sentence.len(), "dropping unterminated sentence");
                None
            }
            _ => None,
        }
    }
}
