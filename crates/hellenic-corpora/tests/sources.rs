use std::path::PathBuf;

use hellenic_corpora::{
    CorpusFile, LoadMode, LxxSentences, TischendorfSentences, sentences_from_file,
    sentences_from_text,
};
use hellenic_morph::Source;
use hellenic_types::{GrammarModel, InflectionCategory, Mood, Sentence, Voice, WordClass};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read(source: Source, name: &str, mode: LoadMode) -> Vec<Sentence> {
    let grammar = GrammarModel::greek();
    let file = CorpusFile::open(fixture(name), mode).expect("open fixture");
    sentences_from_file(source, &grammar, &file)
        .expect("stream")
        .collect::<Result<_, _>>()
        .expect("no registry mismatch")
}

#[test]
fn lxx_fixture() {
    let sentences = read(Source::Lxx, "lxx.txt", LoadMode::Mmap);
    // Gen 1:4 has an unknown mood and Gen 1:5 is unterminated.
    assert_eq!(sentences.len(), 3);

    assert_eq!(
        sentences[0].text(),
        "ἐν ἀρχῇ ἐποίησεν ὁ θεὸς τὸν οὐρανὸν καὶ τὴν γῆν ."
    );
    let second = &sentences[1];
    assert_eq!(second.len(), 14);
    assert_eq!(second.words()[6].form, "ἀκατασκεύαστος");
    assert_eq!(second.words()[7].form, ",");
    let last = second.words().last().unwrap();
    assert_eq!(last.form, "\u{0387}");
    assert_eq!(last.tag.class, WordClass::Punctuation);

    let imperative = &sentences[2].words()[4];
    assert_eq!(imperative.lemma, "γίνομαι");
    assert!(imperative.tag.has_inflection(InflectionCategory::Mood, Mood::Imperative.key()));
    assert!(imperative.tag.has_inflection(InflectionCategory::Voice, Voice::Passive.key()));
}

#[test]
fn tischendorf_fixture() {
    let sentences = read(Source::Tischendorf, "tischendorf.txt", LoadMode::Owned);
    // John 1:2 contains an Aramaic word; John 1:3 runs to the end of input.
    assert_eq!(sentences.len(), 2);

    let first = &sentences[0];
    assert_eq!(first.len(), 14);
    assert_eq!(first.words()[4].form, "λόγος");
    assert_eq!(first.words()[5].form, ",");
    assert_eq!(first.words()[13].form, "\u{0387}");

    let tail: Vec<_> = sentences[1].iter().map(|w| w.form.as_str()).collect();
    assert_eq!(tail, vec!["πάντα", "δι᾿", "αὐτοῦ", "ἐγένετο"]);
    let aorist = &sentences[1].words()[3].tag;
    assert!(aorist.has_inflection(InflectionCategory::Voice, Voice::Middle.key()));
}

#[test]
fn perseus_fixture() {
    let sentences = read(Source::Perseus, "perseus.jsonl", LoadMode::Mmap);
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].text(), "μῆνιν ἄειδε θεὰ ,");
    assert_eq!(sentences[0].words()[1].lemma, "ἀείδω");
    assert_eq!(sentences[1].words()[0].tag.class, WordClass::Participle);
    assert_eq!(sentences[1].words()[2].form, "\u{0387}");
}

#[test]
fn load_modes_agree() {
    for (source, name) in [
        (Source::Lxx, "lxx.txt"),
        (Source::Perseus, "perseus.jsonl"),
        (Source::Tischendorf, "tischendorf.txt"),
    ] {
        assert_eq!(
            read(source, name, LoadMode::Mmap),
            read(source, name, LoadMode::Owned),
            "{source}"
        );
    }
}

#[test]
fn corpus_from_tempfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mt.txt");
    std::fs::write(
        &path,
        "MT 1:1.1 P Βίβλος βίβλος N-NSF 976 ! βίβλος βίβλος\n\
         MT 1:1.2 P γενέσεως γένεσις N-GSF 1078 ! γένεσις γένεσις\n",
    )
    .unwrap();

    let grammar = GrammarModel::greek();
    let file = CorpusFile::open(&path, LoadMode::Mmap).unwrap();
    assert_eq!(file.path(), path.as_path());
    let sentences: Vec<_> = TischendorfSentences::new(&grammar, file.lines().unwrap())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].text(), "Βίβλος γενέσεως");
}

#[test]
fn registry_mismatch_ends_the_stream() {
    let grammar = GrammarModel::from_json_str(
        r#"{
            "tag_types": ["noun", "[PUNCTUATION]"],
            "inflection_types": {"case": ["nom sg"], "gender": ["masc"]}
        }"#,
    )
    .unwrap();
    let text = "Gen\t1\t1\tλόγος. λόγος-N2-NSM θεοῦ. θεός-N2-GSM\n\
                Gen\t1\t2\tλόγος. λόγος-N2-NSM";
    let mut stream = LxxSentences::new(&grammar, text.lines());

    assert_eq!(stream.next().unwrap().unwrap().text(), "λόγος .");
    let err = stream.next().unwrap().unwrap_err();
    assert!(err.is_fatal(), "{err}");
    assert!(stream.next().is_none());
}

#[test]
fn malformed_treebank_line_fails_up_front() {
    let grammar = GrammarModel::greek();
    let err = sentences_from_text(Source::Perseus, &grammar, "{\"words\": [}")
        .err()
        .unwrap();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn sentences_never_leak_across_rejection() {
    let grammar = GrammarModel::greek();
    let text = "Gen\t1\t1\tλόγος λόγος-N2-NSM εἶδεν. ὁράω-V1-AAQ3S\n\
                Gen\t1\t2\tγῆ. γῆ-N1-NSF";
    let sentences: Vec<_> = sentences_from_text(Source::Lxx, &grammar, text)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(sentences.len(), 1);
    assert!(sentences[0].iter().all(|w| w.form != "λόγος"));
}
