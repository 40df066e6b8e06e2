//! Classification facet from LC call numbers.

use crate::extract::{unique, ExtractionContext};
use crate::marc_record::MarcRecord;
use crate::subfield_predicate::subfield_values;

/// LC call number (050) and local LC call number (090).
const CALL_NUMBER_TAGS: [&str; 2] = ["050", "090"];

/// Top-level LC classes, formatted `"Q - Science"`.
///
/// The class is the first letter of each call number's `a` subfield. Letters
/// missing from the classification table are dropped.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Field, Record};
/// use marc_discovery::extract::classification;
///
/// let record = Record::builder()
///     .field(Field::builder("050".to_string(), '0', '0')
///         .subfield_str('a', "QA76.73.R87")
///         .subfield_str('b', "K53 2019")
///         .build())
///     .build();
///
/// assert_eq!(
///     classification::facet(&record, &ExtractionContext::default()),
///     vec!["Q - Science"]
/// );
/// ```
pub fn facet(record: &dyn MarcRecord, ctx: &ExtractionContext) -> Vec<String> {
    let classes = ctx.code_maps().classification();
    unique(
        record
            .fields_by_tags(&CALL_NUMBER_TAGS)
            .flat_map(|field| subfield_values(field, 'a'))
            .filter_map(|call_number| call_number.trim_start().chars().next())
            .map(|letter| letter.to_ascii_uppercase().to_string())
            .filter_map(|letter| {
                classes
                    .get(&letter)
                    .map(|label| format!("{letter} - {label}"))
            }),
    )
}
