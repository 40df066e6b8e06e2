//! General, summary, and contents notes.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::{unique, ExtractionContext};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_subfields, trim_trailing, Punctuation};
use crate::subfield_predicate::SubfieldPredicate;

lazy_static! {
    static ref CONTENTS_SEPARATOR: Regex = Regex::new(r"\s*--\s*").expect("valid pattern");
}

const NOTE_TAGS: [&str; 12] = [
    "500", "502", "504", "515", "518", "525", "533", "540", "550", "580", "586", "588",
];
const SUMMARY_TAG: [&str; 1] = ["520"];
const CONTENTS_TAG: [&str; 1] = ["505"];

/// General notes, plus alternates.
pub fn notes_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['5', '6', '8']);
    unique(
        FieldQuery::tags(&NOTE_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    )
}

/// Summary and abstract text, plus alternates.
pub fn summary_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::in_set(&['a', 'b']);
    unique(
        FieldQuery::tags(&SUMMARY_TAG)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    )
}

/// Formatted contents notes, plus alternates.
///
/// Every `--` separator gets exactly one space on each side and the
/// trailing period is dropped.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::note;
///
/// let record = Record::builder()
///     .field(Field::builder("505".to_string(), '0', ' ')
///         .subfield_str('a', "Introduction--Methods -- Results.")
///         .build())
///     .build();
///
/// assert_eq!(
///     note::contents_show(&record, &ExtractionContext::default()),
///     vec!["Introduction -- Methods -- Results"]
/// );
/// ```
pub fn contents_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['6', '8']);
    unique(
        FieldQuery::tags(&CONTENTS_TAG)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate))
            .map(|value| CONTENTS_SEPARATOR.replace_all(&value, " -- ").into_owned())
            .map(|value| trim_trailing(Punctuation::Period, value.trim())),
    )
}
