use std::collections::VecDeque;

use hellenic_morph::normalize::{remove_chars, repair_apostrophe, repair_junctions};
use hellenic_morph::{DecodeError, MorphDecoder, TischendorfDecoder};
use hellenic_types::{GrammarModel, Sentence};
use tracing::warn;

use crate::accumulator::{EndOfStream, SentenceAccumulator, Step, split_punctuation};

const MIN_FIELDS: usize = 10;
const FORM_FIELD: usize = 3;
const CODE_FIELD: usize = 5;
const LEMMA_FIELD: usize = 9;

/// Sentences of the morphologically tagged Tischendorf New Testament.
///
/// One word per space-separated line. A valid sentence still open when the
/// input ends is emitted. Reading stops at the first empty line.
pub struct TischendorfSentences<'g, I> {
    lines: I,
    decoder: TischendorfDecoder<'g>,
    sentence: SentenceAccumulator,
    ready: VecDeque<Sentence>,
    line_no: usize,
    failed: Option<DecodeError>,
    done: bool,
}

impl<'g, I> TischendorfSentences<'g, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(grammar: &'g GrammarModel, lines: I) -> Self {
        Self {
            lines,
            decoder: TischendorfDecoder::new(grammar),
            sentence: SentenceAccumulator::new(EndOfStream::EmitValid),
            ready: VecDeque::new(),
            line_no: 0,
            failed: None,
            done: false,
        }
    }

    /// Decode one record into the current sentence.
    ///
    /// Once the sentence is invalid its remaining words are not decoded, so a
    /// registry mismatch on one of them only surfaces when a valid sentence
    /// reaches the same code.
    fn read_line(&mut self, line: &str) -> Result<(), DecodeError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < MIN_FIELDS {
            warn!(
                line = self.line_no,
                fields = fields.len(),
                "skipping Tischendorf record with too few fields"
            );
            return Ok(());
        }

        // Square brackets mark editorial insertions, not parentheses.
        let raw = remove_chars(fields[FORM_FIELD], |c| matches!(c, '[' | ']'));
        let (form, mark) = split_punctuation(&raw);
        let form = repair_apostrophe(form);

        if self.sentence.is_valid() && !form.is_empty() {
            let code = fields[CODE_FIELD];
            let lemma = remove_chars(fields[LEMMA_FIELD], |c| matches!(c, '(' | ')'));
            let decoded = self.decoder.decode(code, &lemma);
            if let Some(tag) = self.sentence.admit(code, decoded)? {
                self.sentence
                    .push(repair_junctions(&form).into_owned(), lemma.into_owned(), tag);
            }
        }

        if let Some(mark) = mark {
            if let Step::Emit(sentence) = self.sentence.punctuation(mark, &self.decoder)? {
                self.ready.push_back(sentence);
            }
        }
        Ok(())
    }

    fn end(&mut self) {
        self.done = true;
        if let Some(sentence) = self.sentence.finish() {
            self.ready.push_back(sentence);
        }
    }
}

impl<I> Iterator for TischendorfSentences<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Sentence, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sentence) = self.ready.pop_front() {
                return Some(Ok(sentence));
            }
            if let Some(err) = self.failed.take() {
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            let Some(line) = self.lines.next() else {
                self.end();
                continue;
            };
            self.line_no += 1;
            let line = line.as_ref();
            if line.is_empty() {
                self.end();
                continue;
            }
            // Sentences completed before a registry mismatch are still delivered.
            if let Err(err) = self.read_line(line) {
                self.done = true;
                self.failed = Some(err);
            }
        }
    }
}
