//! Small, stateless text transforms applied to forms and lemmas before and
//! after decoding. Every function is idempotent and borrows its input when
//! there is nothing to change.

use std::borrow::Cow;

/// Precomposed vowels with oxia (U+1F71..U+1F7D) folded to the tonos forms.
const OXIA_TO_TONOS: &[(char, char)] = &[
    ('\u{1F71}', '\u{03AC}'),
    ('\u{1F73}', '\u{03AD}'),
    ('\u{1F75}', '\u{03AE}'),
    ('\u{1F77}', '\u{03AF}'),
    ('\u{1F79}', '\u{03CC}'),
    ('\u{1F7B}', '\u{03CD}'),
    ('\u{1F7D}', '\u{03CE}'),
];

/// Vowels with a breathing mark, folded to the plain vowel after an in-word hyphen.
const BREATHING_TO_PLAIN: &[(char, char)] = &[
    ('ἀ', 'α'),
    ('ἁ', 'α'),
    ('ἐ', 'ε'),
    ('ἑ', 'ε'),
    ('ἠ', 'η'),
    ('ἡ', 'η'),
    ('ἰ', 'ι'),
    ('ἱ', 'ι'),
    ('ὀ', 'ο'),
    ('ὁ', 'ο'),
    ('ὑ', 'υ'),
    ('ὠ', 'ω'),
    ('ὡ', 'ω'),
];

/// Whole-word spelling fixes for the LXX text.
const LXX_SPELLINGS: &[(&str, &str)] = &[("ἀντ", "ἀντ᾿")];

/// Missing assimilation at compound junctions in the Tischendorf text.
const JUNCTION_REPAIRS: &[(&str, &str)] = &[
    ("νμ", "μμ"),
    ("νκ", "γκ"),
    ("συνπ", "συμπ"),
    ("συνσ", "συσ"),
    ("ἐνπ", "ἐμπ"),
    ("ἔνπ", "ἔμπ"),
    ("νλ", "λλ"),
];

/// Characters trimmed from both ends of a treebank form.
const FORM_DECORATIONS: &[char] = &[' ', '[', ']', '"', '“', '”', '«', '»', '\r', '\n'];

/// Greek ano teleia, the canonical raised dot.
pub const ANO_TELEIA: &str = "\u{0387}";
/// Middle dot used in place of the ano teleia by some sources.
const MIDDLE_DOT: &str = "\u{00B7}";

const SINGLE_QUOTE: char = '’';
const GREEK_APOSTROPHE: char = '᾿';

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

/// Replace oxia vowels with their tonos equivalents.
pub fn fold_accents(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| lookup(OXIA_TO_TONOS, c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| lookup(OXIA_TO_TONOS, c).unwrap_or(c))
            .collect(),
    )
}

/// Bring Perseus Beta code into canonical shape: uppercase, without the `^`
/// and `_` quantity markers.
pub fn normalize_beta(beta: &str) -> String {
    beta.chars()
        .filter(|c| !matches!(c, '^' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn strip_numerics(text: &str) -> Cow<'_, str> {
    remove_chars(text, |c| c.is_ascii_digit())
}

/// Remove in-word hyphens, folding a breathing-marked vowel right after a
/// hyphen to its plain vowel. A lone character is returned as is.
pub fn strip_hyphens(text: &str) -> Cow<'_, str> {
    if !text.contains('-') || text.chars().nth(1).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut after_hyphen = false;
    for c in text.chars() {
        if c == '-' {
            after_hyphen = true;
            continue;
        }
        if after_hyphen {
            out.push(lookup(BREATHING_TO_PLAIN, c).unwrap_or(c));
            after_hyphen = false;
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Drop every character matching `pred`.
pub fn remove_chars(text: &str, pred: impl Fn(char) -> bool) -> Cow<'_, str> {
    if !text.chars().any(&pred) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !pred(*c)).collect())
}

pub fn lxx_spelling(word: &str) -> Cow<'_, str> {
    match LXX_SPELLINGS.iter().find(|(from, _)| *from == word) {
        Some((_, to)) => Cow::Borrowed(*to),
        None => Cow::Borrowed(word),
    }
}

/// Apply the junction repairs until none matches.
pub fn repair_junctions(word: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(word);
    // Each rewrite removes a ν, so this terminates.
    while let Some((from, to)) = JUNCTION_REPAIRS
        .iter()
        .find(|(from, _)| current.contains(from))
    {
        current = Cow::Owned(current.replace(from, to));
    }
    current
}

/// Replace a trailing typographic single quote with the Greek apostrophe.
pub fn repair_apostrophe(form: &str) -> Cow<'_, str> {
    match form.strip_suffix(SINGLE_QUOTE) {
        Some(stem) => {
            let mut out = String::with_capacity(form.len());
            out.push_str(stem);
            out.push(GREEK_APOSTROPHE);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(form),
    }
}

/// Map the middle dot onto the ano teleia.
pub fn canonical_mark(mark: &str) -> &str {
    if mark == MIDDLE_DOT { ANO_TELEIA } else { mark }
}

/// Trim quotes, brackets and whitespace around a treebank form.
pub fn trim_form_decorations(form: &str) -> &str {
    form.trim_matches(FORM_DECORATIONS)
}
