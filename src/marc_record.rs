//! Read-only record interface consumed by the extractors.
//!
//! This module defines the `MarcRecord` trait: the narrow view of a parsed
//! record that field extraction needs. Parsing and encoding belong to whatever
//! produced the record; extraction only asks for fields by tag, control field
//! values, and fixed positions within a control field.

use crate::record::Field;

/// Read-only view of a MARC bibliographic record.
///
/// Implementors supply control field lookup and document-order iteration over
/// data fields; tag filtering and positional access are derived from those.
///
/// # Examples
///
/// ```
/// use marc_discovery::{Field, MarcRecord, Record};
///
/// let record = Record::builder()
///     .control_field_str("008", "970616s1997    enka   j      000 0 eng d")
///     .field(Field::builder("650".to_string(), ' ', '0').subfield_str('a', "Whales").build())
///     .build();
///
/// assert_eq!(record.control_value_at("008", 35, 3), Some("eng"));
/// assert_eq!(record.fields_by_tags(&["600", "650"]).count(), 1);
/// ```
pub trait MarcRecord {
    /// Get the value of a control field (000-009).
    ///
    /// Returns `None` if the field does not exist.
    fn control_field(&self, tag: &str) -> Option<&str>;

    /// Iterate over all data fields in document order.
    fn data_fields(&self) -> Box<dyn Iterator<Item = &Field> + '_>;

    /// Iterate over data fields whose tag is one of `tags`, in document order.
    fn fields_by_tags<'r, 't>(
        &'r self,
        tags: &'t [&'t str],
    ) -> Box<dyn Iterator<Item = &'r Field> + 't>
    where
        'r: 't,
    {
        Box::new(
            self.data_fields()
                .filter(move |f| tags.contains(&f.tag.as_str())),
        )
    }

    /// Slice `len` characters of a control field starting at `offset`.
    ///
    /// Returns `None` when the field is missing or too short to hold the
    /// requested window. Offsets count characters, not bytes.
    fn control_value_at(&self, tag: &str, offset: usize, len: usize) -> Option<&str> {
        let value = self.control_field(tag)?;
        let mut indices = value.char_indices().map(|(i, _)| i).chain(std::iter::once(value.len()));
        let start = indices.nth(offset)?;
        let end = if len == 0 {
            start
        } else {
            indices.nth(len - 1)?
        };
        value.get(start..end)
    }
}
