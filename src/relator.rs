//! Contributor role (relator) resolution.
//!
//! A name field records the contributor's role either as coded values in
//! subfield 4 (`aut`, `trl`) or as literal terms in a field-specific
//! subfield (`e` for most names, `j` for meeting names). Translated codes
//! take priority: when any code translates, literal terms on that field are
//! ignored.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{CodeMap, Field};
//! use marc_discovery::relator::append_relator;
//!
//! let relators = CodeMap::from_pairs([("aut", "Author")]);
//! let field = Field::builder("100".to_string(), '1', ' ')
//!     .subfield_str('a', "Smith, John,")
//!     .subfield_str('d', "1900-")
//!     .subfield_str('4', "aut")
//!     .build();
//!
//! assert_eq!(
//!     append_relator(&field, "Smith, John, 1900-", 'e', &relators),
//!     "Smith, John, 1900- Author."
//! );
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::code_map::CodeMap;
use crate::field_linkage::field_or_its_linked_alternate_matches_tag;
use crate::punctuation::{append_trailing, trim_trailing, Punctuation};
use crate::record::Field;
use crate::subfield_predicate::subfield_values;

lazy_static! {
    // An open date range such as "1900-" reads better followed by a space than a comma.
    static ref OPEN_DATE_RANGE: Regex = Regex::new(r"\d-$").expect("valid pattern");
}

/// Subfield holding relator codes.
pub const RELATOR_CODE_SUBFIELD: char = '4';

/// Meeting name tags, whose literal relator term lives in subfield `j`.
pub const MEETING_NAME_TAGS: [&str; 5] = ["111", "411", "611", "711", "811"];

/// Translate one relator code.
///
/// Returns `None` for blank input or a code with no mapping. A trailing
/// period on the code (`aut.`) is ignored.
#[must_use]
pub fn translate_code<'m>(code: &str, relators: &'m CodeMap) -> Option<&'m str> {
    let code = code.trim();
    let code = code.strip_suffix('.').unwrap_or(code);
    relators.get(code)
}

/// Resolve the role term of a name field.
///
/// Codes in subfield 4 that translate are used. Only when none translate
/// does the function fall back to the literal values of `literal_subfield`.
/// Each term has its trailing comma trimmed and the terms are joined with
/// `", "`. Returns an empty string when neither source yields anything.
#[must_use]
pub fn resolve_relator(field: &Field, literal_subfield: char, relators: &CodeMap) -> String {
    let translated: Vec<String> = subfield_values(field, RELATOR_CODE_SUBFIELD)
        .into_iter()
        .filter_map(|code| translate_code(code, relators))
        .map(|term| trim_trailing(Punctuation::Comma, term))
        .filter(|term| !term.is_empty())
        .collect();

    let terms = if translated.is_empty() {
        subfield_values(field, literal_subfield)
            .into_iter()
            .map(|term| trim_trailing(Punctuation::Comma, term.trim()))
            .filter(|term| !term.is_empty())
            .collect()
    } else {
        translated
    };

    terms.join(", ")
}

/// Append the resolved role term to an already joined name.
///
/// The trailing comma of `joined` is dropped first. The separator is a single
/// space when `joined` ends in an open date range (`"1900-"`) and `", "`
/// otherwise, and the term gets a closing period. When no role resolves,
/// `joined` is returned without its trailing comma.
#[must_use]
pub fn append_relator(
    field: &Field,
    joined: &str,
    literal_subfield: char,
    relators: &CodeMap,
) -> String {
    let joined = trim_trailing(Punctuation::Comma, joined);
    let relator = resolve_relator(field, literal_subfield, relators);
    if relator.is_empty() {
        return joined;
    }

    let separator = if OPEN_DATE_RANGE.is_match(&joined) {
        " "
    } else {
        ", "
    };
    let relator = append_trailing(Punctuation::Period, &relator);
    if joined.is_empty() {
        return relator;
    }
    format!("{joined}{separator}{relator}")
}

/// Subfield holding the literal role term for `field`.
///
/// Meeting names (x11) and their 880 alternates use `j`; every other field uses `e`.
#[must_use]
pub fn relator_term_subfield_for(field: &Field) -> char {
    if field_or_its_linked_alternate_matches_tag(field, &MEETING_NAME_TAGS) {
        'j'
    } else {
        'e'
    }
}
