//! Trailing punctuation rules for extracted text.
//!
//! Cataloging practice leaves ISBD punctuation at the end of subfield values
//! ("Title /", "Smith, John,", "Part one :"). Display, search, and facet
//! values each keep or drop a different subset of it, so the rules are a
//! small closed set of [`Punctuation`] classes that callers trim or append
//! independently.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::punctuation::{append_trailing, trim_trailing, Punctuation};
//!
//! assert_eq!(trim_trailing(Punctuation::Slash, "The title /"), "The title");
//! assert_eq!(trim_trailing(Punctuation::Period, "Music."), "Music");
//! assert_eq!(trim_trailing(Punctuation::Period, "2nd ed."), "2nd ed.");
//! assert_eq!(append_trailing(Punctuation::Period, "Author"), "Author.");
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::record::Field;
use crate::subfield_predicate::SubfieldPredicate;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
    static ref TRAILING_SEMICOLON: Regex = Regex::new(r"(?:\s*;)+\s*$").expect("valid pattern");
    static ref TRAILING_COLON: Regex = Regex::new(r"(?:\s*:)+\s*$").expect("valid pattern");
    static ref TRAILING_EQUAL: Regex = Regex::new(r"(?:\s*=)+\s*$").expect("valid pattern");
    static ref TRAILING_SLASH: Regex = Regex::new(r"(?:\s*/)+\s*$").expect("valid pattern");
    static ref TRAILING_COMMA: Regex = Regex::new(r"(?:\s*,)+\s*$").expect("valid pattern");
    // Requiring three word characters before the period keeps initials and short abbreviations ("J.", "ed.").
    static ref TRAILING_PERIOD: Regex = Regex::new(r"(\w{3})\.\s*$").expect("valid pattern");
}

/// A trailing punctuation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `/`
    Slash,
    /// `,`
    Comma,
    /// `.`
    Period,
}

impl Punctuation {
    /// Every punctuation class, in declaration order.
    pub const ALL: [Punctuation; 6] = [
        Self::Semicolon,
        Self::Colon,
        Self::Equal,
        Self::Slash,
        Self::Comma,
        Self::Period,
    ];

    /// The character this class appends.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Semicolon => ';',
            Self::Colon => ':',
            Self::Equal => '=',
            Self::Slash => '/',
            Self::Comma => ',',
            Self::Period => '.',
        }
    }

    fn trailing_pattern(self) -> &'static Regex {
        match self {
            Self::Semicolon => &*TRAILING_SEMICOLON,
            Self::Colon => &*TRAILING_COLON,
            Self::Equal => &*TRAILING_EQUAL,
            Self::Slash => &*TRAILING_SLASH,
            Self::Comma => &*TRAILING_COMMA,
            Self::Period => &*TRAILING_PERIOD,
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Remove a trailing punctuation class from `value`.
///
/// For every class except [`Punctuation::Period`], the whole trailing run of
/// that character is removed together with surrounding whitespace. A period
/// and any whitespace after it are removed only when at least three word
/// characters immediately precede it. That is a heuristic for abbreviations,
/// not a guarantee.
#[must_use]
pub fn trim_trailing(kind: Punctuation, value: &str) -> String {
    match kind {
        Punctuation::Period => TRAILING_PERIOD.replace(value, "$1").into_owned(),
        other => other.trailing_pattern().replace(value, "").into_owned(),
    }
}

/// Append the class character unless `value` already ends in `.` or `-`.
#[must_use]
pub fn append_trailing(kind: Punctuation, value: &str) -> String {
    if value.ends_with('.') || value.ends_with('-') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 1);
    out.push_str(value);
    out.push(kind.as_char());
    out
}

/// Trim leading and trailing whitespace and collapse internal runs to one space.
#[must_use]
pub fn squish(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

/// Join the values of the subfields selected by `predicate`.
///
/// Values are visited in field order and trimmed. Blank values are skipped,
/// so they never leave a stray space. Survivors are joined with one space
/// and internal whitespace is collapsed. Returns an empty string when
/// nothing is selected.
///
/// # Examples
///
/// ```
/// use marc_discovery::{Field, SubfieldPredicate};
/// use marc_discovery::punctuation::join_subfields;
///
/// let field = Field::builder("100".to_string(), '1', ' ')
///     .subfield_str('a', " Smith,   John, ")
///     .subfield_str('d', "")
///     .subfield_str('6', "880-01")
///     .build();
///
/// let joined = join_subfields(&field, &SubfieldPredicate::not_in_set(&['6']));
/// assert_eq!(joined, "Smith, John,");
/// ```
#[must_use]
pub fn join_subfields(field: &Field, predicate: &SubfieldPredicate) -> String {
    let parts: Vec<&str> = field
        .subfields()
        .filter(|sf| predicate.matches(sf))
        .map(|sf| sf.value.trim())
        .filter(|value| !value.is_empty())
        .collect();
    squish(&parts.join(" "))
}

/// Join already-extracted parts with one space, skipping blank parts.
#[must_use]
pub fn join_nonblank<S: AsRef<str>>(parts: &[S]) -> String {
    let kept: Vec<&str> = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.trim().is_empty())
        .collect();
    squish(&kept.join(" "))
}
