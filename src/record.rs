//! MARC bibliographic record structures.
//!
//! This module provides the concrete record model consumed by the extractors:
//! - [`Record`]: Control fields plus data fields in document order
//! - [`Field`]: Variable data fields (010+) with two indicators
//! - [`Subfield`]: Coded data elements within fields
//!
//! Records are read-only once built. Every extraction operation borrows the
//! record and produces new strings.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{Field, Record};
//!
//! let record = Record::builder()
//!     .control_field_str("001", "12345")
//!     .field(
//!         Field::builder("245".to_string(), '1', '0')
//!             .subfield_str('a', "Title")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.get_field("245").and_then(|f| f.get_subfield('a')), Some("Title"));
//! ```

use crate::marc_record::MarcRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A MARC bibliographic record
///
/// Data fields are kept in a single vector so that fields with different tags
/// retain their original interleaving. Several fields may share a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Control fields (000-009) - tag -> value, preserves insertion order
    pub control_fields: IndexMap<String, String>,
    /// Data fields (010+) in document order
    pub fields: Vec<Field>,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 characters)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character or digit)
    pub code: char,
    /// Subfield value, possibly blank
    pub value: String,
}

impl Subfield {
    /// Create a subfield from a code and value
    #[must_use]
    pub fn new(code: char, value: impl Into<String>) -> Self {
        Subfield {
            code,
            value: value.into(),
        }
    }

    /// True when the value holds nothing but whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Record {
    /// Create a new empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for fluently constructing records
    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder {
            record: Record::new(),
        }
    }

    /// Add a control field (000-009)
    pub fn add_control_field(&mut self, tag: String, value: String) {
        self.control_fields.insert(tag, value);
    }

    /// Add a control field using string slices
    pub fn add_control_field_str(&mut self, tag: &str, value: &str) {
        self.add_control_field(tag.to_string(), value.to_string());
    }

    /// Get a control field value
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields
            .get(tag)
            .map(std::string::String::as_str)
    }

    /// Append a data field after every field already present
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Get first field with a given tag
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Iterate over fields matching a specific tag, in document order
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |f| f.tag == tag)
    }
}

impl MarcRecord for Record {
    fn control_field(&self, tag: &str) -> Option<&str> {
        self.get_control_field(tag)
    }

    fn data_fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        Box::new(self.fields.iter())
    }
}

/// Builder for fluently constructing records
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a control field
    #[must_use]
    pub fn control_field(mut self, tag: String, value: String) -> Self {
        self.record.add_control_field(tag, value);
        self
    }

    /// Add a control field using string slices
    #[must_use]
    pub fn control_field_str(mut self, tag: &str, value: &str) -> Self {
        self.record.add_control_field_str(tag, value);
        self
    }

    /// Add a data field
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            tag,
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for constructing fields fluently
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_discovery::Field;
    ///
    /// let field = Field::builder("100".to_string(), '1', ' ')
    ///     .subfield_str('a', "Fitzgerald, F. Scott,")
    ///     .subfield_str('d', "1896-1940")
    ///     .build();
    /// assert_eq!(field.subfields().count(), 2);
    /// ```
    #[must_use]
    pub fn builder(tag: String, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: String) {
        self.subfields.push(Subfield { code, value });
    }

    /// Add a subfield using a string slice
    pub fn add_subfield_str(&mut self, code: char, value: &str) {
        self.add_subfield(code, value.to_string());
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Get all values for a subfield code
    #[must_use]
    pub fn get_subfield_values(&self, code: char) -> Vec<&str> {
        self.subfields_by_code(code).collect()
    }

    /// Iterate over all subfields in field order
    pub fn subfields(&self) -> impl Iterator<Item = &Subfield> {
        self.subfields.iter()
    }

    /// Iterate over subfield values with a specific code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// True when the field carries no subfields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subfields.is_empty()
    }
}

/// Builder for fluently constructing MARC fields
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield to the field being built
    #[must_use]
    pub fn subfield(mut self, code: char, value: String) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Add a subfield using a string slice
    #[must_use]
    pub fn subfield_str(mut self, code: char, value: &str) -> Self {
        self.field.add_subfield_str(code, value);
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = Record::new();
        assert!(record.control_fields.is_empty());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_add_control_field() {
        let mut record = Record::new();
        record.add_control_field("001".to_string(), "12345".to_string());
        assert_eq!(record.get_control_field("001"), Some("12345"));
        assert_eq!(record.control_field("001"), Some("12345"));
    }

    #[test]
    fn test_document_order_across_tags() {
        let record = Record::builder()
            .field(Field::builder("700".to_string(), '1', ' ').subfield_str('a', "B").build())
            .field(Field::builder("100".to_string(), '1', ' ').subfield_str('a', "A").build())
            .field(Field::builder("700".to_string(), '1', ' ').subfield_str('a', "C").build())
            .build();

        let values: Vec<&str> = record
            .fields_by_tags(&["100", "700"])
            .filter_map(|f| f.get_subfield('a'))
            .collect();
        assert_eq!(values, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_field_subfields() {
        let mut field = Field::new("245".to_string(), '1', '0');
        field.add_subfield('a', "Title".to_string());
        field.add_subfield('c', "Author".to_string());
        field.add_subfield('a', "Title continued".to_string());

        assert_eq!(field.get_subfield('a'), Some("Title"));
        assert_eq!(field.get_subfield_values('a').len(), 2);
        assert_eq!(field.get_subfield('z'), None);
    }

    #[test]
    fn test_multiple_fields_same_tag() {
        let mut record = Record::new();
        for i in 0..3 {
            let mut field = Field::new("650".to_string(), ' ', '0');
            field.add_subfield('a', format!("Subject {i}"));
            record.add_field(field);
        }

        assert_eq!(record.fields_by_tag("650").count(), 3);
        assert_eq!(
            record.get_field("650").and_then(|f| f.get_subfield('a')),
            Some("Subject 0")
        );
    }

    #[test]
    fn test_blank_subfield() {
        assert!(Subfield::new('a', "   ").is_blank());
        assert!(!Subfield::new('a', " x ").is_blank());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = Record::builder()
            .control_field_str("008", "970616s1997    enka   j      000 0 eng d")
            .field(Field::builder("245".to_string(), '1', '0').subfield_str('a', "Title").build())
            .build();

        let json = serde_json::to_string(&record).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
