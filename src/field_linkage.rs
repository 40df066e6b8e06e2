//! Alternate graphic representation (880) linkage.
//!
//! MARC carries non-Latin script forms of a field in a separate 880 field.
//! The 880 points back to the field it represents through **subfield 6**,
//! whose value begins with the source tag:
//!
//! - `245: $6 880-01 $a Kitab ʻan al-hayah`
//! - `880: $6 245-01/(3/r $a كتاب عن الحياة`
//!
//! Extraction only needs the source tag prefix (the [`LinkageKey`]) to decide
//! that an 880 belongs with a given tag. Occurrence numbers and script codes
//! are not consulted. An 880 whose subfield 6 is missing or malformed never
//! matches anything.

use std::fmt;

use crate::marc_record::MarcRecord;
use crate::punctuation::join_subfields;
use crate::record::Field;
use crate::subfield_predicate::SubfieldPredicate;

/// Tag of the alternate graphic representation field.
pub const ALTERNATE_TAG: &str = "880";

const ALTERNATE_TAGS: &[&str] = &[ALTERNATE_TAG];

/// Subfield codes that carry linkage bookkeeping rather than display text.
pub const LINKAGE_SUBFIELDS: [char; 2] = ['6', '8'];

/// Source tag prefix taken from a subfield 6 value (`"700"` from `"700-01"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkageKey([u8; 3]);

impl LinkageKey {
    /// Parse the tag prefix of a subfield 6 value.
    ///
    /// Returns `None` unless the value starts with three ASCII alphanumeric
    /// characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_discovery::LinkageKey;
    ///
    /// assert_eq!(LinkageKey::parse("700-01").unwrap().as_str(), "700");
    /// assert_eq!(LinkageKey::parse("245-02/(3/r").unwrap().as_str(), "245");
    /// assert!(LinkageKey::parse("7-").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.trim_start().as_bytes();
        let prefix = bytes.get(..3)?;
        if !prefix.iter().all(u8::is_ascii_alphanumeric) {
            return None;
        }
        Some(LinkageKey([prefix[0], prefix[1], prefix[2]]))
    }

    /// Linkage key of a field, from its first subfield 6.
    #[must_use]
    pub fn of(field: &Field) -> Option<Self> {
        field.get_subfield('6').and_then(Self::parse)
    }

    /// The source tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // The constructor only admits ASCII alphanumerics.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// True if the key names one of `tags`.
    #[must_use]
    pub fn is_one_of(&self, tags: &[&str]) -> bool {
        tags.contains(&self.as_str())
    }
}

impl fmt::Display for LinkageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if `field` is an 880 whose linkage key is one of `tags`.
#[must_use]
pub fn is_alternate_of(field: &Field, tags: &[&str]) -> bool {
    field.tag == ALTERNATE_TAG && LinkageKey::of(field).is_some_and(|key| key.is_one_of(tags))
}

/// True if the field's own tag is in `tags`, or it is an 880 linked to one of them.
///
/// Lets an extractor treat a source field and its script alternate the same
/// way, for example when choosing the relator term subfield.
#[must_use]
pub fn field_or_its_linked_alternate_matches_tag(field: &Field, tags: &[&str]) -> bool {
    tags.contains(&field.tag.as_str()) || is_alternate_of(field, tags)
}

/// Every 880 field in `record` linked to one of `source_tags`, in document order.
pub fn linked_alternate_fields<'r, R>(record: &'r R, source_tags: &[&str]) -> Vec<&'r Field>
where
    R: MarcRecord + ?Sized,
{
    record
        .fields_by_tags(ALTERNATE_TAGS)
        .filter(|field| is_alternate_of(field, source_tags))
        .collect()
}

/// Joined text of every 880 linked to one of `source_tags`.
///
/// Each linked alternate is joined with `predicate` the same way a source
/// field would be. Empty joins are dropped and document order is kept. All
/// alternates are returned, not only the first.
///
/// # Examples
///
/// ```
/// use marc_discovery::{Field, Record, SubfieldPredicate};
/// use marc_discovery::field_linkage::linked_alternate;
///
/// let record = Record::builder()
///     .field(Field::builder("880".to_string(), '1', ' ')
///         .subfield_str('6', "700-01")
///         .subfield_str('a', "Толстой, Лев")
///         .build())
///     .build();
///
/// let values = linked_alternate(&record, &["700"], &SubfieldPredicate::in_set(&['a']));
/// assert_eq!(values, vec!["Толстой, Лев".to_string()]);
/// ```
pub fn linked_alternate<R>(
    record: &R,
    source_tags: &[&str],
    predicate: &SubfieldPredicate,
) -> Vec<String>
where
    R: MarcRecord + ?Sized,
{
    linked_alternate_fields(record, source_tags)
        .into_iter()
        .map(|field| join_subfields(field, predicate))
        .filter(|value| !value.is_empty())
        .collect()
}

/// [`linked_alternate`] with every subfield except 6 and 8.
pub fn linked_alternate_excluding_linkage_fields<R>(record: &R, source_tags: &[&str]) -> Vec<String>
where
    R: MarcRecord + ?Sized,
{
    linked_alternate(
        record,
        source_tags,
        &SubfieldPredicate::not_in_set(&LINKAGE_SUBFIELDS),
    )
}

/// Joined text of every `tag` field followed by its linked alternates,
/// excluding subfields 6 and 8.
pub fn datafield_and_linked_alternate<R>(record: &R, tag: &str) -> Vec<String>
where
    R: MarcRecord + ?Sized,
{
    let predicate = SubfieldPredicate::not_in_set(&LINKAGE_SUBFIELDS);
    let tags = [tag];
    let mut values: Vec<String> = record
        .fields_by_tags(&tags)
        .map(|field| join_subfields(field, &predicate))
        .filter(|value| !value.is_empty())
        .collect();
    values.extend(linked_alternate(record, &tags, &predicate));
    values
}
