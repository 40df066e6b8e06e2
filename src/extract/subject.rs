//! Subject headings for search and faceting.
//!
//! Only headings from a controlled vocabulary the catalog trusts become
//! facet values: LCSH, MeSH, and locally assigned headings (`$2 local`).
//! Every subject heading is searchable.

use crate::extract::{unique, ExtractionContext, FieldKind, Thesaurus};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_subfields, squish, trim_trailing, Punctuation};
use crate::record::Field;
use crate::relator::relator_term_subfield_for;
use crate::subfield_predicate::{value_in_list, SubfieldPredicate};

const SUBJECT_TAGS: [&str; 6] = ["600", "610", "611", "630", "650", "651"];

/// Subdivision subfields: form, general, chronological, geographic.
const SUBDIVISIONS: [char; 4] = ['v', 'x', 'y', 'z'];

/// Subfields that never appear in a facet heading.
const FACET_EXCLUDED: [char; 8] = ['0', '1', '2', '3', '4', '5', '6', '8'];

const LOCAL_SOURCES: [&str; 1] = ["local"];

/// Subject keyword search values, plus alternates.
pub fn search(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['0', '2', '5', '6', '8']);
    unique(
        FieldQuery::tags(&SUBJECT_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    )
}

fn faceted(field: &Field) -> bool {
    match FieldKind::of(field) {
        FieldKind::Subject { thesaurus, .. } => match thesaurus {
            Thesaurus::Lcsh | Thesaurus::Mesh => true,
            Thesaurus::SourceSpecified => value_in_list(field, '2', &LOCAL_SOURCES),
            _ => false,
        },
        _ => false,
    }
}

/// Heading text with ` -- ` before each subdivision.
///
/// The relator term subfield is left out: `e` for most headings, `j` for
/// meetings, where `e` is the subordinate unit.
fn facet_heading(field: &Field) -> String {
    let term = relator_term_subfield_for(field);
    let mut heading = String::new();
    for subfield in field.subfields() {
        if FACET_EXCLUDED.contains(&subfield.code) || subfield.code == term {
            continue;
        }
        let value = subfield.value.trim();
        if value.is_empty() {
            continue;
        }
        if heading.is_empty() {
            heading.push_str(value);
        } else if SUBDIVISIONS.contains(&subfield.code) {
            heading = trim_trailing(Punctuation::Period, heading.trim_end());
            heading.push_str(" -- ");
            heading.push_str(value);
        } else {
            heading.push(' ');
            heading.push_str(value);
        }
    }
    trim_trailing(Punctuation::Period, &squish(&heading))
}

/// Subject facet values from LCSH, MeSH, and local headings.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::subject;
///
/// let record = Record::builder()
///     .field(Field::builder("651".to_string(), ' ', '0')
///         .subfield_str('a', "United States.")
///         .subfield_str('x', "History")
///         .subfield_str('y', "Civil War, 1861-1865.")
///         .build())
///     .build();
///
/// assert_eq!(
///     subject::facet(&record, &ExtractionContext::default()),
///     vec!["United States -- History -- Civil War, 1861-1865"]
/// );
/// ```
pub fn facet(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Vec<String> {
    unique(
        record
            .fields_by_tags(&SUBJECT_TAGS)
            .filter(|field| faceted(field))
            .map(facet_heading),
    )
}
