//! Series statements and series added entries.
//!
//! A traced series (8xx) supersedes the transcribed 490 statement: the 490
//! is shown only when the record has no 8xx at all.

use crate::extract::creator::name_with_relator;
use crate::extract::{unique, ExtractionContext, FieldKind};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_subfields, trim_trailing, Punctuation};
use crate::record::Field;
use crate::subfield_predicate::SubfieldPredicate;

const SERIES_ADDED_ENTRY_TAGS: [&str; 4] = ["800", "810", "811", "830"];
const SERIES_STATEMENT_TAGS: [&str; 4] = ["400", "410", "411", "440"];
const UNTRACED_SERIES_TAG: &str = "490";
const SEARCH_TAGS: [&str; 9] = [
    "400", "410", "411", "440", "490", "800", "810", "811", "830",
];

const NAME_EXCLUDED: [char; 8] = ['0', '1', '4', '5', '6', '7', '8', 'w'];
const TITLE_EXCLUDED: [char; 7] = ['0', '1', '5', '6', '7', '8', 'w'];
const STATEMENT_EXCLUDED: [char; 4] = ['0', '6', '8', 'w'];

fn series_added_entry(field: &Field, ctx: &ExtractionContext) -> String {
    match FieldKind::of(field).name_type() {
        Some(name) if name.is_name() => name_with_relator(field, &NAME_EXCLUDED, ctx),
        _ => join_subfields(field, &SubfieldPredicate::not_in_set(&TITLE_EXCLUDED)),
    }
}

/// Series display values, plus alternates.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::series;
///
/// let record = Record::builder()
///     .field(Field::builder("490".to_string(), '1', ' ')
///         .subfield_str('a', "Lecture notes in mathematics ;")
///         .subfield_str('v', "1234")
///         .build())
///     .field(Field::builder("830".to_string(), ' ', '0')
///         .subfield_str('a', "Lecture notes in mathematics (Springer) ;")
///         .subfield_str('v', "1234.")
///         .build())
///     .build();
///
/// assert_eq!(
///     series::show(&record, &ExtractionContext::default()),
///     vec!["Lecture notes in mathematics (Springer) ; 1234."]
/// );
/// ```
pub fn show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let tracings = FieldQuery::tags(&SERIES_ADDED_ENTRY_TAGS)
        .alternates(ctx.include_alternates())
        .select(record);
    let traced = tracings
        .iter()
        .any(|field| SERIES_ADDED_ENTRY_TAGS.contains(&field.tag.as_str()));

    let mut values: Vec<String> = tracings
        .into_iter()
        .map(|field| series_added_entry(field, ctx))
        .collect();

    let mut statement_tags = SERIES_STATEMENT_TAGS.to_vec();
    if !traced {
        statement_tags.push(UNTRACED_SERIES_TAG);
    }
    let predicate = SubfieldPredicate::not_in_set(&STATEMENT_EXCLUDED);
    values.extend(
        FieldQuery::tags(&statement_tags)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    );

    unique(
        values
            .into_iter()
            .map(|value| trim_trailing(Punctuation::Semicolon, &value)),
    )
}

/// Series titles for keyword search, plus alternates.
pub fn search(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::in_set(&['a']);
    unique(
        FieldQuery::tags(&SEARCH_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate))
            .map(|value| trim_trailing(Punctuation::Comma, &trim_trailing(Punctuation::Semicolon, &value))),
    )
}
