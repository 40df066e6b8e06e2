//! Candidate field selection for extractors.
//!
//! A [`FieldQuery`] captures the first two steps every extractor takes:
//! pick fields by tag, optionally including the 880 alternates linked to
//! those tags, then drop fields whose indicators or subfields rule them out.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{Field, FieldQuery, Record};
//!
//! let record = Record::builder()
//!     .field(Field::builder("700".to_string(), '1', ' ').subfield_str('a', "Added").build())
//!     .field(Field::builder("700".to_string(), '1', '2').subfield_str('a', "Analytic").build())
//!     .build();
//!
//! let query = FieldQuery::tags(&["700", "710", "711"]).indicator2_not(&['2']);
//! let names: Vec<&str> = query
//!     .select(&record)
//!     .into_iter()
//!     .filter_map(|f| f.get_subfield('a'))
//!     .collect();
//! assert_eq!(names, vec!["Added"]);
//! ```

use smallvec::SmallVec;

use crate::field_linkage::{is_alternate_of, ALTERNATE_TAG};
use crate::marc_record::MarcRecord;
use crate::record::Field;

/// A query builder for finding candidate fields.
#[derive(Debug, Clone)]
pub struct FieldQuery {
    /// Source tags to match
    pub tags: SmallVec<[&'static str; 4]>,
    /// Also match 880 fields linked to one of the tags
    pub with_alternates: bool,
    /// Optional first indicator filter. None = wildcard (match any)
    pub indicator1: Option<char>,
    /// Optional second indicator filter. None = wildcard (match any)
    pub indicator2: Option<char>,
    /// Second indicator values that exclude a field
    pub excluded_indicator2: SmallVec<[char; 4]>,
    /// Required subfield codes (AND logic)
    pub required_subfields: SmallVec<[char; 4]>,
    /// Subfield codes whose presence excludes a field
    pub forbidden_subfields: SmallVec<[char; 4]>,
}

impl FieldQuery {
    /// Query for fields carrying any of `tags`.
    #[must_use]
    pub fn tags(tags: &[&'static str]) -> Self {
        FieldQuery {
            tags: tags.iter().copied().collect(),
            with_alternates: false,
            indicator1: None,
            indicator2: None,
            excluded_indicator2: SmallVec::new(),
            required_subfields: SmallVec::new(),
            forbidden_subfields: SmallVec::new(),
        }
    }

    /// Also match linked 880 alternates when `enabled`.
    #[must_use]
    pub fn alternates(mut self, enabled: bool) -> Self {
        self.with_alternates = enabled;
        self
    }

    /// Restrict query to fields with a specific first indicator.
    #[must_use]
    pub fn indicator1(mut self, indicator: Option<char>) -> Self {
        self.indicator1 = indicator;
        self
    }

    /// Restrict query to fields with a specific second indicator.
    #[must_use]
    pub fn indicator2(mut self, indicator: Option<char>) -> Self {
        self.indicator2 = indicator;
        self
    }

    /// Skip fields whose second indicator is one of `values`.
    #[must_use]
    pub fn indicator2_not(mut self, values: &[char]) -> Self {
        self.excluded_indicator2.extend_from_slice(values);
        self
    }

    /// Require the field to have a subfield with the given code.
    #[must_use]
    pub fn has_subfield(mut self, code: char) -> Self {
        if !self.required_subfields.contains(&code) {
            self.required_subfields.push(code);
        }
        self
    }

    /// Skip fields that have a subfield with the given code.
    #[must_use]
    pub fn lacks_subfield(mut self, code: char) -> Self {
        if !self.forbidden_subfields.contains(&code) {
            self.forbidden_subfields.push(code);
        }
        self
    }

    fn tag_matches(&self, field: &Field) -> bool {
        self.tags.contains(&field.tag.as_str())
            || (self.with_alternates && is_alternate_of(field, &self.tags))
    }

    /// Check if a field matches all criteria in this query.
    #[must_use]
    pub fn matches(&self, field: &Field) -> bool {
        if !self.tag_matches(field) {
            return false;
        }

        if self.indicator1.is_some_and(|ind1| field.indicator1 != ind1) {
            return false;
        }

        if self.indicator2.is_some_and(|ind2| field.indicator2 != ind2) {
            return false;
        }

        if self.excluded_indicator2.contains(&field.indicator2) {
            return false;
        }

        for &code in &self.required_subfields {
            if field.get_subfield(code).is_none() {
                return false;
            }
        }

        !self
            .forbidden_subfields
            .iter()
            .any(|&code| field.get_subfield(code).is_some())
    }

    /// Matching source fields in document order, followed by matching
    /// alternates in document order.
    pub fn select<'r, R>(&self, record: &'r R) -> Vec<&'r Field>
    where
        R: MarcRecord + ?Sized,
    {
        let mut sources = Vec::new();
        let mut alternates = Vec::new();
        for field in record.data_fields() {
            if !self.matches(field) {
                continue;
            }
            if field.tag == ALTERNATE_TAG && !self.tags.contains(&ALTERNATE_TAG) {
                alternates.push(field);
            } else {
                sources.push(field);
            }
        }
        sources.extend(alternates);
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn create_test_field(tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) -> Field {
        let mut field = Field::new(tag.to_string(), ind1, ind2);
        for &(code, value) in subfields {
            field.add_subfield_str(code, value);
        }
        field
    }

    #[test]
    fn test_query_matches_tag() {
        let field = create_test_field("650", ' ', '0', &[('a', "Subject")]);
        assert!(FieldQuery::tags(&["650"]).matches(&field));
        assert!(!FieldQuery::tags(&["651"]).matches(&field));
    }

    #[test]
    fn test_query_matches_indicators() {
        let field = create_test_field("245", '1', '0', &[('a', "Title")]);

        assert!(FieldQuery::tags(&["245"]).indicator1(Some('1')).matches(&field));
        assert!(!FieldQuery::tags(&["245"]).indicator1(Some('0')).matches(&field));
        assert!(FieldQuery::tags(&["245"]).indicator2(None).matches(&field));
        assert!(!FieldQuery::tags(&["245"]).indicator2_not(&['0']).matches(&field));
    }

    #[test]
    fn test_query_subfield_presence() {
        let field = create_test_field("700", '1', ' ', &[('a', "Name"), ('t', "Work")]);
        assert!(FieldQuery::tags(&["700"]).has_subfield('t').matches(&field));
        assert!(!FieldQuery::tags(&["700"]).has_subfield('i').matches(&field));
        assert!(!FieldQuery::tags(&["700"]).lacks_subfield('t').matches(&field));
    }

    #[test]
    fn test_alternates_follow_sources() {
        let record = Record::builder()
            .field(create_test_field("880", '1', ' ', &[('6', "100-01"), ('a', "alt")]))
            .field(create_test_field("100", '1', ' ', &[('6', "880-01"), ('a', "src")]))
            .build();

        let values: Vec<&str> = FieldQuery::tags(&["100"])
            .alternates(true)
            .select(&record)
            .into_iter()
            .filter_map(|f| f.get_subfield('a'))
            .collect();
        assert_eq!(values, vec!["src", "alt"]);

        assert_eq!(FieldQuery::tags(&["100"]).select(&record).len(), 1);
    }

    #[test]
    fn test_indicator_filter_applies_to_alternates() {
        let record = Record::builder()
            .field(create_test_field("880", '1', '2', &[('6', "700-01"), ('a', "analytic")]))
            .build();
        let query = FieldQuery::tags(&["700"]).alternates(true).indicator2_not(&['2']);
        assert!(query.select(&record).is_empty());
    }
}
