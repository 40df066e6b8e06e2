//! Title display, search, and sort values.
//!
//! The title statement (245) drives display and sort. Uniform titles
//! (130/240/730) and variant titles (246/740) have their own display lists.

use crate::extract::{unique, ExtractionContext, FieldKind};
use crate::field_linkage::{field_or_its_linked_alternate_matches_tag, linked_alternate_fields};
use crate::field_query::FieldQuery;
use crate::marc_record::MarcRecord;
use crate::punctuation::{join_nonblank, join_subfields, trim_trailing, Punctuation};
use crate::record::Field;
use crate::subfield_predicate::{subfield_values, SubfieldPredicate};

const TITLE_TAG: &str = "245";
const TITLE_TAGS: [&str; 1] = [TITLE_TAG];
const STANDARDIZED_TAGS: [&str; 3] = ["130", "240", "730"];
const OTHER_TITLE_TAGS: [&str; 2] = ["246", "740"];

/// Characters of a medium designator (`$h`) that may separate title parts.
const MEDIUM_SEPARATORS: [char; 6] = [':', ';', '=', '/', ',', '.'];

fn title_field(record: &dyn MarcRecord) -> Option<&Field> {
    record.fields_by_tags(&TITLE_TAGS).next()
}

/// First non-blank value of `code` with its trailing slash and comma removed.
fn first_trimmed(field: &Field, code: char) -> Option<String> {
    subfield_values(field, code)
        .into_iter()
        .map(|value| trim_trailing(Punctuation::Comma, &trim_trailing(Punctuation::Slash, value)))
        .find(|value| !value.is_empty())
}

/// Display form of one title statement field.
///
/// `a` wins over `k`; either has its trailing slash and comma removed. The
/// `b n p` parts follow, separated by the final punctuation of `h` when the
/// field has one.
fn title_statement(field: &Field) -> String {
    let title_or_form = first_trimmed(field, 'a')
        .or_else(|| first_trimmed(field, 'k'))
        .unwrap_or_default();

    let other_info = trim_trailing(
        Punctuation::Slash,
        &join_subfields(field, &SubfieldPredicate::in_set(&['b', 'n', 'p'])),
    );

    if title_or_form.is_empty() || other_info.is_empty() {
        return join_nonblank(&[title_or_form, other_info]);
    }

    let separator = field
        .get_subfield('h')
        .and_then(|medium| medium.trim_end().chars().last())
        .filter(|c| MEDIUM_SEPARATORS.contains(c))
        .map(String::from)
        .unwrap_or_default();
    join_nonblank(&[title_or_form, separator, other_info])
}

/// Display title from the first 245.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::title;
///
/// let record = Record::builder()
///     .field(Field::builder("245".to_string(), '1', '0')
///         .subfield_str('a', "Five Decades of MARC usage")
///         .subfield_str('k', "journals")
///         .subfield_str('n', "Part One")
///         .build())
///     .build();
///
/// assert_eq!(
///     title::show(&record, &ExtractionContext::default()).as_deref(),
///     Some("Five Decades of MARC usage Part One")
/// );
/// ```
pub fn show(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Option<String> {
    let value = title_statement(title_field(record)?);
    (!value.is_empty()).then_some(value)
}

/// Display titles of the 880 alternates linked to 245.
pub fn alternate_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    if !ctx.include_alternates() {
        return Vec::new();
    }
    unique(
        linked_alternate_fields(record, &TITLE_TAGS)
            .into_iter()
            .map(title_statement),
    )
}

/// Keyword search values: 245 and its alternates without `c 6 8 h`.
pub fn search(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['c', '6', '8', 'h']);
    unique(
        FieldQuery::tags(&TITLE_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .map(|field| join_subfields(field, &predicate)),
    )
}

/// Split a title at `offset` non-filing characters.
fn split_nonfiling(title: &str, offset: usize) -> (String, String) {
    let split = title
        .char_indices()
        .nth(offset)
        .map_or(title.len(), |(index, _)| index);
    (title[..split].trim().to_string(), title[split..].trim().to_string())
}

/// A leading `[` is a non-filing prefix.
fn split_bracket(title: &str) -> (String, String) {
    match title.strip_prefix('[') {
        Some(rest) => ("[".to_string(), rest.trim().to_string()),
        None => (String::new(), title.trim().to_string()),
    }
}

/// Sort value from the first 245.
///
/// The title is `a`, or the form subfield `k` when `a` is missing. The
/// non-filing prefix is moved to the end: the first N characters when
/// indicator 2 is a digit 1-9, otherwise a leading `[`. The `b n p` parts,
/// without their trailing slash, are appended to the filing part before the
/// prefix.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::title;
///
/// let ctx = ExtractionContext::default();
/// let record = Record::builder()
///     .field(Field::builder("245".to_string(), '1', '4')
///         .subfield_str('a', "The Great Gatsby")
///         .build())
///     .build();
/// assert_eq!(title::sort(&record, &ctx).as_deref(), Some("Great Gatsby The"));
///
/// let bracketed = Record::builder()
///     .field(Field::builder("245".to_string(), '1', '0')
///         .subfield_str('a', "[The Record Title]")
///         .build())
///     .build();
/// assert_eq!(title::sort(&bracketed, &ctx).as_deref(), Some("The Record Title] ["));
/// ```
pub fn sort(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Option<String> {
    let field = title_field(record)?;
    let title = Some(trim_trailing(
        Punctuation::Slash,
        &join_subfields(field, &SubfieldPredicate::in_set(&['a'])),
    ))
    .filter(|title| !title.is_empty())
    .or_else(|| first_trimmed(field, 'k'))
    .unwrap_or_default();
    let (prefix, filing) = match field.indicator2.to_digit(10) {
        Some(offset @ 1..=9) => split_nonfiling(&title, offset as usize),
        _ => split_bracket(&title),
    };

    let rest = trim_trailing(
        Punctuation::Slash,
        &join_subfields(field, &SubfieldPredicate::in_set(&['b', 'n', 'p'])),
    );
    let value = join_nonblank(&[join_nonblank(&[filing, rest]), prefix]);
    (!value.is_empty()).then_some(value)
}

/// Uniform titles: 130, 240, and non-analytical 730 without `$i`, plus alternates.
pub fn standardized_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['0', '1', '5', '6', '8', 'e', 'w']);
    unique(
        FieldQuery::tags(&STANDARDIZED_TAGS)
            .alternates(ctx.include_alternates())
            .lacks_subfield('i')
            .select(record)
            .into_iter()
            .filter(|field| !FieldKind::of(field).is_analytical())
            .map(|field| trim_trailing(Punctuation::Comma, &join_subfields(field, &predicate))),
    )
}

/// Variant titles: 246 and non-analytical 740, plus alternates.
pub fn other_show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let predicate = SubfieldPredicate::not_in_set(&['5', '6', '8']);
    unique(
        FieldQuery::tags(&OTHER_TITLE_TAGS)
            .alternates(ctx.include_alternates())
            .select(record)
            .into_iter()
            .filter(|field| {
                !(field_or_its_linked_alternate_matches_tag(field, &["740"]) && field.indicator2 == '2')
            })
            .map(|field| join_subfields(field, &predicate)),
    )
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
        let mut record = Record::new();
        for f in fields {
            record.add_field(f);
        }
        record
    }

    #[test]
    fn test_show_prefers_a_over_k() {
        let rec = record(vec![field(
            "245",
            '0',
            &[('a', "Five Decades of MARC usage"), ('k', "journals"), ('n', "Part One")],
        )]);
        assert_eq!(
            show(&rec, &ExtractionContext::default()).as_deref(),
            Some("Five Decades of MARC usage Part One")
        );
    }

    #[test]
    fn test_show_falls_back_to_k() {
        let rec = record(vec![field("245", '0', &[('k', "Papers,"), ('f', "1900-1950.")])]);
        assert_eq!(show(&rec, &ExtractionContext::default()).as_deref(), Some("Papers"));
    }

    #[test]
    fn test_show_uses_medium_punctuation() {
        let rec = record(vec![field(
            "245",
            '0',
            &[('a', "Hamlet"), ('h', "[videorecording] :"), ('b', "a tragedy /"), ('c', "Shakespeare.")],
        )]);
        assert_eq!(show(&rec, &ExtractionContext::default()).as_deref(), Some("Hamlet : a tragedy"));
    }

    #[test]
    fn test_show_trims_statement_of_responsibility_slash() {
        let rec = record(vec![field("245", '0', &[('a', "Title /"), ('c', "by Someone.")])]);
        assert_eq!(show(&rec, &ExtractionContext::default()).as_deref(), Some("Title"));
    }

    #[test]
    fn test_show_absent() {
        assert!(show(&Record::new(), &ExtractionContext::default()).is_none());
        let rec = record(vec![field("245", '0', &[('c', "Nobody")])]);
        assert!(show(&rec, &ExtractionContext::default()).is_none());
    }

    #[test]
    fn test_alternate_show() {
        let rec = record(vec![
            field("245", '0', &[('6', "880-01"), ('a', "Sanzi jing")]),
            field("880", '0', &[('6', "245-01/$1"), ('a', "三字經")]),
        ]);
        let ctx = ExtractionContext::default();
        assert_eq!(alternate_show(&rec, &ctx), vec!["三字經"]);

        let no_alts = ExtractionContext::new(
            std::sync::Arc::new(crate::code_map::CodeMaps::builtin()),
            crate::config::ExtractionConfig::new().with_alternates(false),
        );
        assert!(alternate_show(&rec, &no_alts).is_empty());
    }

    #[test]
    fn test_search_excludes_responsibility_and_linkage() {
        let rec = record(vec![
            field("245", '0', &[('6', "880-01"), ('a', "Title :"), ('b', "sub /"), ('c', "Author.")]),
            field("880", '0', &[('6', "245-01"), ('a', "Титул")]),
        ]);
        assert_eq!(
            search(&rec, &ExtractionContext::default()),
            vec!["Title : sub /", "Титул"]
        );
    }

    #[test]
    fn test_sort_nonfiling_offset() {
        let rec = record(vec![field("245", '4', &[('a', "The Great Gatsby")])]);
        assert_eq!(sort(&rec, &ExtractionContext::default()).as_deref(), Some("Great Gatsby The"));
    }

    #[test]
    fn test_sort_bracket_rule() {
        let rec = record(vec![field("245", '0', &[('a', "[The Record Title]")])]);
        let value = sort(&rec, &ExtractionContext::default()).unwrap();
        assert!(value.starts_with("The Record Title]"));
        assert!(value.ends_with('['));
        assert_eq!(value, "The Record Title] [");
    }

    #[test]
    fn test_sort_appends_parts_before_prefix() {
        let rec = record(vec![field("245", '2', &[('a', "A history"), ('n', "Part 2."), ('p', "Rome.")])]);
        assert_eq!(
            sort(&rec, &ExtractionContext::default()).as_deref(),
            Some("history Part 2. Rome. A")
        );
    }

    #[test]
    fn test_sort_falls_back_to_k() {
        let rec = record(vec![field("245", '0', &[('k', "Papers,"), ('f', "1900-1950.")])]);
        let ctx = ExtractionContext::default();
        assert_eq!(show(&rec, &ctx).as_deref(), Some("Papers"));
        assert_eq!(sort(&rec, &ctx).as_deref(), Some("Papers"));
    }

    #[test]
    fn test_sort_trims_slash_before_responsibility() {
        let rec = record(vec![field(
            "245",
            '4',
            &[('a', "The book of life :"), ('b', "a novel /"), ('c', "Najib Mahfuz.")],
        )]);
        assert_eq!(
            sort(&rec, &ExtractionContext::default()).as_deref(),
            Some("book of life : a novel The")
        );
    }

    #[test]
    fn test_sort_offset_longer_than_title() {
        let rec = record(vec![field("245", '9', &[('a', "Le")])]);
        assert_eq!(sort(&rec, &ExtractionContext::default()).as_deref(), Some("Le"));
    }

    #[test]
    fn test_standardized_show() {
        let rec = record(vec![
            field("240", '0', &[('a', "Works."), ('l', "English,"), ('0', "http://id")]),
            field("730", ' ', &[('a', "Bible.")]),
            field("730", '2', &[('a', "Contained work.")]),
            field("730", ' ', &[('i', "Based on:"), ('a', "Related work.")]),
        ]);
        assert_eq!(
            standardized_show(&rec, &ExtractionContext::default()),
            vec!["Works. English", "Bible."]
        );
    }

    #[test]
    fn test_other_show() {
        let rec = record(vec![
            field("246", '3', &[('a', "Alt title"), ('6', "880-02")]),
            field("740", '0', &[('a', "Related title.")]),
            field("740", '2', &[('a', "Analytic title.")]),
            field("880", '3', &[('6', "246-02"), ('a', "別題")]),
        ]);
        assert_eq!(
            other_show(&rec, &ExtractionContext::default()),
            vec!["Alt title", "Related title.", "別題"]
        );
    }
}
