//! Answer normalization.
//!
//! A raw answer is folded into a comparison key by running it through
//! [`PIPELINE`], an ordered list of pure string steps. Later steps assume the
//! cleanup done by earlier ones, so the order is fixed. The key is only ever
//! compared, tokenized or scored; it is never shown to the player.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A single normalization step.
pub type Step = fn(&str) -> String;

/// The normalization steps, in the order they are applied.
pub const PIPELINE: &[(&str, Step)] = &[
    ("lowercase_trim", lowercase_trim),
    ("unify_symbols", unify_symbols),
    ("strip_thousands_separators", strip_thousands_separators),
    ("expand_abbreviations", expand_abbreviations),
    ("collapse_initialisms", collapse_initialisms),
    ("strip_punctuation", strip_punctuation),
    ("join_digit_groups", join_digit_groups),
    ("strip_leading_article", strip_leading_article),
    ("number_words_to_digits", number_words_to_digits),
];

// A single pass can expose new work for an earlier step ("mt-everest" only
// becomes "mt everest" once punctuation is gone), so passes repeat until the
// key is stable.
const MAX_PASSES: usize = 16;

static MOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bmt\.?\s+").expect("mount pattern is valid"));
static SAINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bst\.?\s+").expect("saint pattern is valid"));
static INITIALISM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z]\b(?:[.\s]+[a-z]\b)+").expect("initialism pattern is valid")
});
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const NUMBER_WORDS: &[(&str, u128)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
    ("hundred", 100),
    ("thousand", 1_000),
    ("million", 1_000_000),
    ("billion", 1_000_000_000),
];

/// A maximal run of number words separated by spaces or hyphens, together
/// with digit runs directly before, between or after the words.
static NUMBER_RUN: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&str> = NUMBER_WORDS.iter().map(|(word, _)| *word).collect();
    words.sort_by_key(|word| std::cmp::Reverse(word.len()));
    let alternation = words.join("|");
    Regex::new(&format!(
        r"(?:[0-9]+[\s-]+)?\b(?:{alternation})\b(?:[\s-]+(?:(?:{alternation})\b|[0-9]+))*"
    ))
    .expect("number word pattern is valid")
});

/// Fold a raw answer into its comparison key.
///
/// Total: empty input yields an empty key. Idempotent:
/// `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut current = run_pipeline(raw);
    for _ in 1..MAX_PASSES {
        let next = run_pipeline(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Like [`normalize`], treating a missing answer as empty.
pub fn normalize_opt(raw: Option<&str>) -> String {
    normalize(raw.unwrap_or_default())
}

fn run_pipeline(raw: &str) -> String {
    PIPELINE
        .iter()
        .fold(raw.to_string(), |acc, (_, step)| step(&acc))
}

pub fn lowercase_trim(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

/// Typographic ampersands become `and`, apostrophe look-alikes become `'`.
pub fn unify_symbols(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' | '\u{FF06}' | '\u{FE60}' => out.push_str("and"),
            '\u{2019}' | '\u{2018}' | '\u{00B4}' | '`' | '\u{02BC}' => out.push('\''),
            _ => out.push(ch),
        }
    }
    out
}

/// `1,250` -> `1250`. Commas used as list separators are left alone.
pub fn strip_thousands_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &ch)| !(ch == ',' && is_thousands_comma(&chars, i)))
        .map(|(_, &ch)| ch)
        .collect()
}

fn is_thousands_comma(chars: &[char], i: usize) -> bool {
    let after_digit = i > 0 && chars[i - 1].is_ascii_digit();
    let three_digits = chars
        .get(i + 1..i + 4)
        .is_some_and(|group| group.iter().all(char::is_ascii_digit));
    let group_ends = chars.get(i + 4).map_or(true, |&c| !is_word_char(c));
    after_digit && three_digits && group_ends
}

/// `mt.`/`mt ` -> `mount `, `st.`/`st ` -> `saint `.
pub fn expand_abbreviations(s: &str) -> String {
    let s = MOUNT.replace_all(s, "mount ");
    SAINT.replace_all(&s, "saint ").into_owned()
}

/// Runs of single letters joined by dots or spaces merge into one word:
/// `u.s.` -> `us.`, `n y c` -> `nyc`.
pub fn collapse_initialisms(s: &str) -> String {
    INITIALISM
        .replace_all(s, |caps: &Captures<'_>| {
            caps[0]
                .chars()
                .filter(|c| c.is_ascii_lowercase())
                .collect::<String>()
        })
        .into_owned()
}

/// Punctuation becomes whitespace; whitespace collapses to single spaces.
pub fn strip_punctuation(s: &str) -> String {
    let s = PUNCTUATION.replace_all(s, " ");
    WHITESPACE.replace_all(&s, " ").trim().to_string()
}

/// `1 250` -> `1250`.
pub fn join_digit_groups(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let end = chars[i..]
            .iter()
            .position(|c| !c.is_whitespace())
            .map_or(chars.len(), |offset| i + offset);
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(end).is_some_and(char::is_ascii_digit);
        if !between_digits {
            out.extend(&chars[i..end]);
        }
        i = end;
    }
    out
}

pub fn strip_leading_article(s: &str) -> String {
    let mut rest = s;
    while let Some(stripped) = rest.strip_prefix("the ") {
        rest = stripped;
    }
    rest.to_string()
}

/// `six` -> `6`, `twenty one` -> `21`, `one hundred` -> `100`,
/// `5 million` -> `5000000`.
///
/// A run is converted only if it holds at least one number word and every
/// other token in it is a digit run. Digit runs count like the word of the
/// same value, so the result never sits next to a bare number that a later
/// pass could glue onto it. The whitespace around a run is kept.
pub fn number_words_to_digits(s: &str) -> String {
    NUMBER_RUN
        .replace_all(s, |caps: &Captures<'_>| match words_to_number(&caps[0]) {
            Some(n) => n.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Short-scale combination: values below 100 add into `current`, `hundred`
/// multiplies it, larger magnitudes move `current` into `total`.
fn words_to_number(phrase: &str) -> Option<u128> {
    let mut total: u128 = 0;
    let mut current: u128 = 0;
    let words = phrase
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty());
    for word in words {
        if word.bytes().all(|b| b.is_ascii_digit()) {
            current = current.checked_add(word.parse().ok()?)?;
            continue;
        }
        let value = number_word_value(word)?;
        if value < 100 {
            current = current.checked_add(value)?;
        } else if value == 100 {
            current = current.max(1).checked_mul(100)?;
        } else {
            total = total.checked_add(current.max(1).checked_mul(value)?)?;
            current = 0;
        }
    }
    total.checked_add(current)
}

fn number_word_value(word: &str) -> Option<u128> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, value)| value)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
