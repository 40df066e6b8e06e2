//! Language of the described material.

use crate::extract::{unique, ExtractionContext};
use crate::marc_record::MarcRecord;
use crate::subfield_predicate::subfield_values;

const FIXED_FIELD_TAG: &str = "008";
const LANGUAGE_OFFSET: usize = 35;
const CODE_LEN: usize = 3;
const LANGUAGE_CODE_TAGS: [&str; 1] = ["041"];

/// Split a possibly run-together 041 value ("engfre") into three-letter codes.
fn split_codes(value: &str) -> Vec<&str> {
    let value = value.trim();
    if value.len() > CODE_LEN && value.len() % CODE_LEN == 0 && value.is_ascii() {
        (0..value.len())
            .step_by(CODE_LEN)
            .map(|start| &value[start..start + CODE_LEN])
            .collect()
    } else {
        vec![value]
    }
}

/// Display names of the record's languages.
///
/// Codes come from 008/35-37 first, then the 041 `a` and `d` subfields.
/// Codes configured as undetermined are skipped and codes without a
/// language table entry are dropped.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::language;
///
/// let record = Record::builder()
///     .control_field_str("008", "970616s1997    enka          000 0 eng d")
///     .field(Field::builder("041".to_string(), '1', ' ')
///         .subfield_str('a', "eng")
///         .subfield_str('h', "rus")
///         .subfield_str('d', "fre")
///         .build())
///     .build();
///
/// assert_eq!(
///     language::show(&record, &ExtractionContext::default()),
///     vec!["English", "French"]
/// );
/// ```
pub fn show(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let mut codes: Vec<&str> = record
        .control_value_at(FIXED_FIELD_TAG, LANGUAGE_OFFSET, CODE_LEN)
        .into_iter()
        .collect();
    for field in record.fields_by_tags(&LANGUAGE_CODE_TAGS) {
        for code in ['a', 'd'] {
            codes.extend(
                subfield_values(field, code)
                    .into_iter()
                    .flat_map(split_codes),
            );
        }
    }

    let languages = ctx.code_maps().language();
    unique(
        codes
            .into_iter()
            .map(str::trim)
            .filter(|code| !ctx.config().is_undetermined_language(code))
            .filter_map(|code| languages.get(code))
            .map(str::to_string),
    )
}
