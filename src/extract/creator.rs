//! Creator and contributor names.

use crate::extract::{unique, ExtractionContext, FieldKind};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_subfields, trim_trailing, Punctuation};
use crate::record::Field;
use crate::relator::{append_relator, relator_term_subfield_for, RELATOR_CODE_SUBFIELD};
use crate::subfield_predicate::SubfieldPredicate;

const CREATOR_TAGS: [&str; 3] = ["100", "110", "111"];
const CONTRIBUTOR_TAGS: [&str; 3] = ["700", "710", "711"];
const FACET_TAGS: [&str; 6] = ["100", "110", "111", "700", "710", "711"];

/// Subfields never shown with a name, besides its role term subfield.
const NAME_SHOW_EXCLUDED: [char; 6] = ['0', '1', RELATOR_CODE_SUBFIELD, '6', '8', 'w'];

/// Joined name with its role appended.
///
/// The role term subfield (`e`, or `j` for meetings) is left out of the
/// joined name so the term is not repeated.
pub(crate) fn name_with_relator(field: &Field, excluded: &[char], ctx: &ExtractionContext) -> String {
    let term_subfield = relator_term_subfield_for(field);
    let mut codes: Vec<char> = excluded.to_vec();
    codes.push(term_subfield);
    let joined = join_subfields(field, &SubfieldPredicate::not_in_set(&codes));
    append_relator(field, &joined, term_subfield, ctx.relator_map())
}

/// Main entry names with roles, plus alternates.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::creator;
///
/// let record = Record::builder()
///     .field(Field::builder("111".to_string(), '2', ' ')
///         .subfield_str('a', "Symposium on Things")
///         .subfield_str('d', "(1999 :")
///         .subfield_str('c', "Oslo)")
///         .subfield_str('j', "host institution.")
///         .build())
///     .build();
///
/// assert_eq!(
///     creator::show(&record, &ExtractionContext::default()),
///     vec!["Symposium on Things (1999 : Oslo), host institution."]
/// );
/// ```
pub fn show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    unique(
        FieldQuery::tags(&CREATOR_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| name_with_relator(field, &NAME_SHOW_EXCLUDED, ctx)),
    )
}

/// Main entry names for keyword search, without roles.
pub fn search(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::in_set(&['a', 'b', 'c', 'd', 'j', 'q', 'u']);
    unique(
        FieldQuery::tags(&CREATOR_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| trim_trailing(Punctuation::Comma, &join_subfields(field, &predicate))),
    )
}

/// Normalized main and added entry names for faceting.
///
/// Alternates are not included: facet values stay in one script.
pub fn facet(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::in_set(&['a', 'b', 'c', 'd', 'q']);
    unique(
        record
            .fields_by_tags(&FACET_TAGS)
            .map(|field| join_subfields(field, &predicate))
            .map(|value| trim_trailing(Punctuation::Period, &trim_trailing(Punctuation::Comma, &value)))
            .map(|value| trim_trailing(Punctuation::Comma, &value)),
    )
}

/// Added entry names with roles, plus alternates.
///
/// Analytical entries and name/title entries (those with `$t`) describe
/// related works rather than contributors and are skipped.
pub fn contributor_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    unique(
        FieldQuery::tags(&CONTRIBUTOR_TAGS)
            .alternates(ctx.include_alternates())
            .lacks_subfield('t')
            .select(record)
            .into_iter()
            .filter(|field| !FieldKind::of(field).is_analytical())
            .map(|field| name_with_relator(field, &NAME_SHOW_EXCLUDED, ctx)),
    )
}
