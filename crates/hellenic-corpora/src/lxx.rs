use std::collections::VecDeque;

use hellenic_morph::normalize::{fold_accents, lxx_spelling, remove_chars};
use hellenic_morph::{CcatDecoder, DecodeError, MorphDecoder};
use hellenic_types::{GrammarModel, Sentence};
use tracing::warn;

use crate::accumulator::{EndOfStream, SentenceAccumulator, Step, split_punctuation};

/// Tab-separated field holding the `form lemma… lemma-CODE` token run.
const TOKEN_FIELD: usize = 3;

/// A surface form waiting for its lemma and code.
struct PendingWord {
    form: String,
    mark: Option<&'static str>,
    lemma: String,
}

impl PendingWord {
    fn parse(token: &str) -> Self {
        let token = fold_accents(token);
        let (form, mark) = split_punctuation(&token);
        Self {
            form: lxx_spelling(form).into_owned(),
            mark,
            lemma: String::new(),
        }
    }
}

/// Sentences of the CCAT morphological LXX.
///
/// Each line carries a verse whose fourth tab-separated field is a run of
/// `form lemma… lemma-CODE` groups. Sentences may span verses; a sentence
/// still open when the input ends is dropped. Reading stops at the first
/// empty line.
pub struct LxxSentences<'g, I> {
    lines: I,
    decoder: CcatDecoder<'g>,
    sentence: SentenceAccumulator,
    ready: VecDeque<Sentence>,
    line_no: usize,
    failed: Option<DecodeError>,
    done: bool,
}

impl<'g, I> LxxSentences<'g, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(grammar: &'g GrammarModel, lines: I) -> Self {
        Self {
            lines,
            decoder: CcatDecoder::new(grammar),
            sentence: SentenceAccumulator::new(EndOfStream::Drop),
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
        let Some(tokens) = line.split('\t').nth(TOKEN_FIELD) else {
            warn!(line = self.line_no, "skipping LXX record with fewer than 4 fields");
            return Ok(());
        };

        let mut pending: Option<PendingWord> = None;
        for token in tokens.split_whitespace() {
            let Some(word) = pending.as_mut() else {
                pending = Some(PendingWord::parse(token));
                continue;
            };
            match token.split_once('-') {
                Some((lemma_tail, code)) => {
                    word.lemma.push_str(lemma_tail);
                    if let Some(word) = pending.take() {
                        self.complete(word, code)?;
                    }
                }
                None => word.lemma.push_str(token),
            }
        }
        if pending.is_some() {
            warn!(line = self.line_no, "LXX record ends inside a word group");
        }
        Ok(())
    }

    fn complete(&mut self, word: PendingWord, code: &str) -> Result<(), DecodeError> {
        if self.sentence.is_valid() && !word.form.is_empty() {
            let lemma = remove_chars(&word.lemma, |c| c == '*');
            let lemma = fold_accents(&lemma).into_owned();
            let decoded = self.decoder.decode(code, &lemma);
            if let Some(tag) = self.sentence.admit(code, decoded)? {
                let (form, opens) = match word.form.strip_prefix('[') {
                    Some(rest) => (rest, true),
                    None => (word.form.as_str(), false),
                };
                let (form, closes) = match form.strip_suffix(']') {
                    Some(rest) => (rest, true),
                    None => (form, false),
                };
                if opens {
                    self.sentence.push_mark("(", &self.decoder)?;
                }
                self.sentence.push(form, lemma, tag);
                if closes {
                    self.sentence.push_mark(")", &self.decoder)?;
                }
            }
        }

        if let Some(mark) = word.mark {
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

impl<I> Iterator for LxxSentences<'_, I>
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

#[cfg(test)]
mod tests {
    use hellenic_types::WordClass;

    use super::*;

    fn sentences(grammar: &GrammarModel, text: &str) -> Vec<Sentence> {
        LxxSentences::new(grammar, text.lines())
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn sentence_spans_verses() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tἐν ἐν-P ἀρχῇ ἀρχή-N1-DSF\n\
                    Gen 1:1\t\t\tἐποίησεν ποιέω-V1-AAI3S ὁ ὁ-RA-NSM θεός. θεός-N2-NSM";

        let found = sentences(&grammar, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "ἐν ἀρχῇ ἐποίησεν ὁ θεός .");
        assert_eq!(found[0].words()[3].tag.class, WordClass::Article);
        assert_eq!(found[0].words()[0].tag.text.as_deref(), Some("ἐν"));
    }

    #[test]
    fn lemma_pieces_are_joined_without_stars() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tἀρχῇ. *ἀρ χή-N1-DSF";
        let found = sentences(&grammar, text);
        assert_eq!(found[0].words()[0].lemma, "ἀρχή");
    }

    #[test]
    fn rejected_sentence_does_not_leak() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tλόγος λόγος-N2-NSM λύει. λύω-V1-PAQ3S\n\
                    Gen 1:2\t\t\tγῆ. γῆ-N1-NSF";
        let found = sentences(&grammar, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "γῆ .");
    }

    #[test]
    fn brackets_become_parentheses() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\t[λόγος λόγος-N2-NSM γῆ] γῆ-N1-NSF καί. καί-C";
        let found = sentences(&grammar, text);
        assert_eq!(found[0].text(), "( λόγος γῆ ) καί .");
        assert_eq!(found[0].words()[0].tag.text.as_deref(), Some("("));
    }

    #[test]
    fn unterminated_tail_is_dropped() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tλόγος. λόγος-N2-NSM\nGen 1:2\t\t\tγῆ γῆ-N1-NSF";
        let found = sentences(&grammar, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "λόγος .");
    }

    #[test]
    fn stops_at_first_empty_line() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tλόγος. λόγος-N2-NSM\n\nGen 1:2\t\t\tγῆ. γῆ-N1-NSF";
        assert_eq!(sentences(&grammar, text).len(), 1);
    }

    #[test]
    fn spelling_table_applies_to_forms() {
        let grammar = GrammarModel::greek();
        let text = "Gen 1:1\t\t\tἀντ ἀντί-P καί. καί-C";
        let found = sentences(&grammar, text);
        assert_eq!(found[0].words()[0].form, "ἀντ᾿");
    }
}
