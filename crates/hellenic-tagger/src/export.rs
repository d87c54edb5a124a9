use std::io::Write;

use anyhow::{Context, Result};
use hellenic_morph::DecodeError;
use hellenic_types::Sentence;

/// Write sentences as JSON lines, one array of tagged words per line.
/// Stops after `limit` sentences when given. Returns the number written.
pub fn write_sentences<I, W>(sentences: I, mut out: W, limit: Option<usize>) -> Result<usize>
where
    I: IntoIterator<Item = Result<Sentence, DecodeError>>,
    W: Write,
{
    let mut written = 0usize;
    for sentence in sentences {
        if limit.is_some_and(|limit| written >= limit) {
            break;
        }
        let sentence = sentence.with_context(|| format!("after {written} sentences"))?;
        serde_json::to_writer(&mut out, &sentence).context("serialize sentence")?;
        out.write_all(b"\n").context("write sentence")?;
        written += 1;
    }
    out.flush().context("flush output")?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use hellenic_corpora::TischendorfSentences;
    use hellenic_types::GrammarModel;

    use super::*;

    const TEXT: &str = "JN 1:1.1 P Ἐν ἐν PREP 1722 ! ἐν ἐν\n\
                        JN 1:1.2 P ἀρχῇ. ἀρχή N-DSF 746 ! ἀρχή ἀρχή\n\
                        JN 1:1.3 P ἦν. εἰμί V-IAI-3S 1510 ! εἰμί εἰμί";

    #[test]
    fn writes_one_line_per_sentence() {
        let grammar = GrammarModel::greek();
        let mut out = Vec::new();
        let count =
            write_sentences(TischendorfSentences::new(&grammar, TEXT.lines()), &mut out, None)
                .unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0]["form"], "Ἐν");
        assert_eq!(lines[0][0]["tag"]["class"], "prep");
        assert_eq!(lines[0][0]["tag"]["text"], "ἐν");
        assert_eq!(lines[0][1]["tag"]["inflections"][0]["name"], "dat sg");
        assert_eq!(lines[1][0]["lemma"], "εἰμί");
    }

    #[test]
    fn honours_limit() {
        let grammar = GrammarModel::greek();
        let mut out = Vec::new();
        let count =
            write_sentences(TischendorfSentences::new(&grammar, TEXT.lines()), &mut out, Some(1))
                .unwrap();
        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn registry_mismatch_fails_the_export() {
        let grammar = GrammarModel::from_json_str(
            r#"{"tag_types": ["prep"], "inflection_types": {}}"#,
        )
        .unwrap();
        let mut out = Vec::new();
        let err = write_sentences(TischendorfSentences::new(&grammar, TEXT.lines()), &mut out, None)
            .unwrap_err();
        assert!(err.to_string().starts_with("after 0 sentences"));
    }
}
