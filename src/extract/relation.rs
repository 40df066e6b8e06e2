//! Related, containing, and contained works.

use crate::extract::{unique, ExtractionContext, FieldKind};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_subfields, trim_trailing, Punctuation};
use crate::record::Field;
use crate::relator::{append_relator, relator_term_subfield_for, RELATOR_CODE_SUBFIELD};
use crate::subfield_predicate::{subfield_values, SubfieldPredicate};

const HOST_ITEM_TAG: [&str; 1] = ["773"];
const NAME_TITLE_TAGS: [&str; 4] = ["700", "710", "711", "730"];
const RELATED_COLLECTIONS_TAG: [&str; 1] = ["544"];
const PUBLICATIONS_ABOUT_TAG: [&str; 1] = ["581"];

const NAME_TITLE_EXCLUDED: [char; 7] = ['0', '1', RELATOR_CODE_SUBFIELD, '5', '6', '8', 'i'];

fn linked_work(field: &Field, ctx: &ExtractionContext) -> String {
    let term_subfield = relator_term_subfield_for(field);
    let mut codes = NAME_TITLE_EXCLUDED.to_vec();
    codes.push(term_subfield);
    let joined = join_subfields(field, &SubfieldPredicate::not_in_set(&codes));
    let value = append_relator(field, &joined, term_subfield, ctx.relator_map());

    match subfield_values(field, 'i').first() {
        Some(label) => {
            let label = trim_trailing(Punctuation::Colon, label);
            format!("{label}: {value}")
        }
        None => value,
    }
}

fn name_title_entries<'r>(
    record: &'r dyn MarcRecord,
    ctx: &ExtractionContext,
    analytical: bool,
) -> Vec<&'r Field> {
    FieldQuery::tags(&NAME_TITLE_TAGS)
        .alternates(ctx.include_alternates())
        .has_subfield('t')
        .select(record)
        .into_iter()
        .filter(|field| FieldKind::of(field).is_analytical() == analytical)
        .collect()
}

fn joined_excluding(
    record: &dyn MarcRecord,
    ctx: &ExtractionContext,
    tags: &[&'static str],
    excluded: &[char],
) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(excluded);
    unique(
        FieldQuery::tags(tags)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    )
}

/// Host item entries (773), plus alternates.
pub fn contained_in_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    joined_excluding(record, ctx, &HOST_ITEM_TAG, &['6', '7', '8', 'w'])
}

/// Name/title added entries for related works, plus alternates.
///
/// Relationship information in `$i` becomes a label in front of the entry.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::relation;
///
/// let record = Record::builder()
///     .field(Field::builder("700".to_string(), '1', ' ')
///         .subfield_str('i', "Adaptation of (work):")
///         .subfield_str('a', "Shakespeare, William,")
///         .subfield_str('d', "1564-1616.")
///         .subfield_str('t', "Hamlet.")
///         .build())
///     .build();
///
/// assert_eq!(
///     relation::related_work_show(&record, &ExtractionContext::default()),
///     vec!["Adaptation of (work): Shakespeare, William, 1564-1616. Hamlet."]
/// );
/// ```
pub fn related_work_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    unique(
        name_title_entries(record, ctx, false)
            .into_iter()
            .map(|field| linked_work(field, ctx)),
    )
}

/// Analytical name/title entries for works contained in the item, plus alternates.
pub fn contains_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    unique(
        name_title_entries(record, ctx, true)
            .into_iter()
            .map(|field| linked_work(field, ctx)),
    )
}

/// Related collections (544), plus alternates.
pub fn related_collections_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    joined_excluding(record, ctx, &RELATED_COLLECTIONS_TAG, &['6', '8'])
}

/// Publications about the described material (581), plus alternates.
pub fn publications_about_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    joined_excluding(record, ctx, &PUBLICATIONS_ABOUT_TAG, &['6', '8'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn field(tag: &str, ind2: char, subfields: &[(char, &str)]) -> Field {
        let mut field = Field::new(tag.to_string(), '1', ind2);
        for &(code, value) in subfields {
            field.add_subfield_str(code, value);
        }
        field
    }

    fn record(fields: Vec<Field>) -> Record {
        Record {
            fields,
            ..Record::default()
        }
    }

    #[test]
    fn test_contained_in_show() {
        let rec = record(vec![field(
            "773",
            ' ',
            &[('7', "p1am"), ('t', "Journal of Things."), ('g', "Vol. 3, no. 2"), ('w', "(OCoLC)123")],
        )]);
        assert_eq!(
            contained_in_show(&rec, &ExtractionContext::default()),
            vec!["Journal of Things. Vol. 3, no. 2"]
        );
    }

    #[test]
    fn test_related_vs_contained_works() {
        let rec = record(vec![
            field("700", ' ', &[('a', "Author, One."), ('t', "Related.")]),
            field("700", '2', &[('a', "Author, Two."), ('t', "Contained.")]),
            field("730", '2', &[('a', "Anonymous classic.")]),
            field("700", ' ', &[('a', "Plain, Contributor.")]),
        ]);
        let ctx = ExtractionContext::default();
        assert_eq!(related_work_show(&rec, &ctx), vec!["Author, One. Related."]);
        assert_eq!(contains_show(&rec, &ctx), vec!["Author, Two. Contained."]);
    }

    #[test]
    fn test_related_work_relator() {
        let rec = record(vec![field(
            "700",
            ' ',
            &[('a', "Verdi, Giuseppe,"), ('d', "1813-1901."), ('t', "Aida."), ('4', "cmp")],
        )]);
        assert_eq!(
            related_work_show(&rec, &ExtractionContext::default()),
            vec!["Verdi, Giuseppe, 1813-1901. Aida., Composer."]
        );
    }

    #[test]
    fn test_related_collections_and_publications_about() {
        let rec = record(vec![
            field("544", ' ', &[('d', "Papers of J. Doe"), ('a', "State Archives.")]),
            field("581", ' ', &[('a', "Smith, A. A study of the papers. 1990.")]),
        ]);
        let ctx = ExtractionContext::default();
        assert_eq!(
            related_collections_show(&rec, &ctx),
            vec!["Papers of J. Doe State Archives."]
        );
        assert_eq!(
            publications_about_show(&rec, &ctx),
            vec!["Smith, A. A study of the papers. 1990."]
        );
    }
}
