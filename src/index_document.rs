//! Turning records into index documents.
//!
//! An [`IndexMapping`] names the output fields of a search index and the
//! extractor that fills each one. Resolving it against an
//! [`ExtractorRegistry`] checks every key up front, so a typo fails at
//! startup instead of silently producing empty fields per record.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{ExtractionContext, Field, IndexMapping, Record};
//! use marc_discovery::extract::registry::ExtractorRegistry;
//!
//! let mapping = IndexMapping::from_json_str(r#"{
//!     "title_display": "title.show",
//!     "author_facet": "creator.facet"
//! }"#).unwrap();
//! let resolved = mapping.resolve(ExtractorRegistry::default_registry()).unwrap();
//!
//! let record = Record::builder()
//!     .field(Field::builder("245".to_string(), '1', '0').subfield_str('a', "Walden /").build())
//!     .build();
//!
//! let doc = resolved.index(&record, &ExtractionContext::default());
//! assert_eq!(doc.to_json().unwrap(), r#"{"title_display":["Walden"]}"#);
//! ```

use std::fmt;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::extract::registry::{ExtractorFn, ExtractorKey, ExtractorRegistry};
use crate::extract::ExtractionContext;
use crate::marc_record::MarcRecord;

/// Ordered mapping of output field name to extractor key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexMapping {
    fields: IndexMap<String, ExtractorKey>,
}

impl IndexMapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `"field": "domain.operation"` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Json`] for malformed JSON or keys that do not
    /// name a known domain and operation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an output field.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidArgument`] if `name` is already mapped.
    pub fn insert(&mut self, name: impl Into<String>, key: ExtractorKey) -> Result<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(ExtractError::InvalidArgument(format!(
                "index field '{name}' is mapped twice"
            )));
        }
        self.fields.insert(name, key);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidArgument`] if `name` is already mapped.
    pub fn with_field(mut self, name: impl Into<String>, key: ExtractorKey) -> Result<Self> {
        self.insert(name, key)?;
        Ok(self)
    }

    /// Output fields in mapping order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, ExtractorKey)> {
        self.fields.iter().map(|(name, key)| (name.as_str(), *key))
    }

    /// Number of output fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bind every field to its extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnknownExtractor`] for the first key with no
    /// registered extractor.
    pub fn resolve(&self, registry: &ExtractorRegistry) -> Result<ResolvedMapping> {
        let fields = self
            .fields
            .iter()
            .map(|(name, key)| Ok((name.clone(), *key, registry.resolve(*key)?)))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(fields = fields.len(), "resolved index mapping");
        Ok(ResolvedMapping { fields })
    }
}

/// An [`IndexMapping`] with every extractor looked up.
#[derive(Clone)]
pub struct ResolvedMapping {
    fields: Vec<(String, ExtractorKey, ExtractorFn)>,
}

impl fmt::Debug for ResolvedMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, key, _)| (name, key)))
            .finish()
    }
}

impl ResolvedMapping {
    /// Build the index document of one record.
    ///
    /// Fields whose extractor yields nothing are left out.
    pub fn index(&self, record: &dyn MarcRecord, ctx: &ExtractionContext) -> IndexDocument {
        let mut doc = IndexDocument::default();
        for (name, _, extract) in &self.fields {
            let values = extract(record, ctx);
            if !values.is_empty() {
                doc.fields.insert(name.clone(), values);
            }
        }
        doc
    }

    /// Index many records in parallel. Output order matches input order.
    pub fn index_batch<R>(&self, records: &[R], ctx: &ExtractionContext) -> Vec<IndexDocument>
    where
        R: MarcRecord + Sync,
    {
        records
            .par_iter()
            .map(|record| self.index(record, ctx))
            .collect()
    }
}

/// Extracted values keyed by output field name, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexDocument {
    fields: IndexMap<String, Vec<String>>,
}

impl IndexDocument {
    /// Values of one output field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Populated fields in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize as a compact JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::registry::{Domain, Operation};
    use crate::record::{Field, Record};

    fn titled(title: &str) -> Record {
        Record::builder()
            .field(
                Field::builder("245".to_string(), '1', '0')
                    .subfield_str('a', title)
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_mapping_from_json_keeps_order() {
        let mapping = IndexMapping::from_json_str(
            r#"{"z_sort": "title.sort", "a_show": "title.show"}"#,
        )
        .unwrap();
        let names: Vec<&str> = mapping.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z_sort", "a_show"]);
    }

    #[test]
    fn test_mapping_rejects_bad_keys() {
        assert!(matches!(
            IndexMapping::from_json_str(r#"{"x": "title.nope"}"#),
            Err(ExtractError::Json(_))
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let key = ExtractorKey::new(Domain::Title, Operation::Show);
        let mapping = IndexMapping::new().with_field("title", key).unwrap();
        assert!(matches!(
            mapping.with_field("title", key),
            Err(ExtractError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_extractor() {
        let mapping = IndexMapping::new()
            .with_field("x", ExtractorKey::new(Domain::Date, Operation::Facet))
            .unwrap();
        assert!(matches!(
            mapping.resolve(ExtractorRegistry::default_registry()),
            Err(ExtractError::UnknownExtractor(_))
        ));
    }

    #[test]
    fn test_index_omits_empty_fields() {
        let mapping = IndexMapping::new()
            .with_field("title", ExtractorKey::new(Domain::Title, Operation::Show))
            .unwrap()
            .with_field("subjects", ExtractorKey::new(Domain::Subject, Operation::Facet))
            .unwrap();
        let resolved = mapping.resolve(ExtractorRegistry::default_registry()).unwrap();

        let doc = resolved.index(&titled("Walden"), &ExtractionContext::default());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("title"), Some(&["Walden".to_string()][..]));
        assert!(doc.get("subjects").is_none());
    }

    #[test]
    fn test_index_batch_preserves_order() {
        let mapping = IndexMapping::new()
            .with_field("title", ExtractorKey::new(Domain::Title, Operation::Show))
            .unwrap();
        let resolved = mapping.resolve(ExtractorRegistry::default_registry()).unwrap();

        let records: Vec<Record> = (0..64).map(|i| titled(&format!("Title {i}"))).collect();
        let docs = resolved.index_batch(&records, &ExtractionContext::default());

        assert_eq!(docs.len(), 64);
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.get("title").unwrap()[0], format!("Title {i}"));
        }
    }
}
