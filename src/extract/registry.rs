//! Extractor registry keyed by domain and operation.
//!
//! Every extractor is registered under a stable [`ExtractorKey`] such as
//! `title.show` or `subject.facet`. Callers resolve keys once, at startup,
//! and then call plain function pointers per record.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{ExtractionContext, Field, Record};
//! use marc_discovery::extract::registry::{ExtractorKey, ExtractorRegistry};
//!
//! let record = Record::builder()
//!     .field(Field::builder("245".to_string(), '0', '0').subfield_str('a', "Title").build())
//!     .build();
//!
//! let key: ExtractorKey = "title.show".parse().unwrap();
//! let values = ExtractorRegistry::default_registry()
//!     .extract(key, &record, &ExtractionContext::default())
//!     .unwrap();
//! assert_eq!(values, vec!["Title"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::extract::{
    classification, creator, date, language, note, relation, series, subject, title,
    ExtractionContext,
};
use crate::marc_record::MarcRecord;

/// Signature shared by every registered extractor.
pub type ExtractorFn = fn(&dyn MarcRecord, &ExtractionContext) -> Vec<String>;

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                #[doc = $text]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Stable name used in extractor keys.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ExtractError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ExtractError::InvalidArgument(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

string_enum! {
    /// Metadata area an extractor reads.
    Domain {
        Title => "title",
        Creator => "creator",
        Series => "series",
        Note => "note",
        Relation => "relation",
        Subject => "subject",
        Language => "language",
        Date => "date",
        Classification => "classification",
    }
}

string_enum! {
    /// What an extractor produces within its domain.
    Operation {
        Show => "show",
        AlternateShow => "alternate_show",
        Search => "search",
        Sort => "sort",
        Facet => "facet",
        StandardizedShow => "standardized_show",
        OtherShow => "other_show",
        ContributorShow => "contributor_show",
        SummaryShow => "summary_show",
        ContentsShow => "contents_show",
        ContainedInShow => "contained_in_show",
        RelatedWorkShow => "related_work_show",
        ContainsShow => "contains_show",
        RelatedCollectionsShow => "related_collections_show",
        PublicationsAboutShow => "publications_about_show",
        PublicationYear => "publication_year",
        PublicationRange => "publication_range",
        LastUpdated => "last_updated",
    }
}

/// A `(domain, operation)` pair, written `"domain.operation"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtractorKey {
    /// Metadata area
    pub domain: Domain,
    /// Output kind
    pub operation: Operation,
}

impl ExtractorKey {
    /// Create a key.
    #[must_use]
    pub const fn new(domain: Domain, operation: Operation) -> Self {
        ExtractorKey { domain, operation }
    }
}

impl fmt::Display for ExtractorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.operation)
    }
}

impl FromStr for ExtractorKey {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        let (domain, operation) = s.trim().split_once('.').ok_or_else(|| {
            ExtractError::InvalidArgument(format!("extractor key '{s}' is not 'domain.operation'"))
        })?;
        Ok(ExtractorKey {
            domain: domain.parse()?,
            operation: operation.parse()?,
        })
    }
}

impl Serialize for ExtractorKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExtractorKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Extractors indexed by [`ExtractorKey`].
///
/// The registry is immutable once shared. [`ExtractorRegistry::default_registry`]
/// holds every built-in extractor and is built once per process.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<ExtractorKey, ExtractorFn>,
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl ExtractorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor.
    #[must_use]
    pub fn builtin() -> Self {
        use Domain as D;
        use Operation as O;

        let mut registry = Self::new();
        registry.register(ExtractorKey::new(D::Title, O::Show), |r, c| {
            title::show(r, c).into_iter().collect()
        });
        registry.register(ExtractorKey::new(D::Title, O::AlternateShow), title::alternate_show);
        registry.register(ExtractorKey::new(D::Title, O::Search), title::search);
        registry.register(ExtractorKey::new(D::Title, O::Sort), |r, c| {
            title::sort(r, c).into_iter().collect()
        });
        registry.register(ExtractorKey::new(D::Title, O::StandardizedShow), title::standardized_show);
        registry.register(ExtractorKey::new(D::Title, O::OtherShow), title::other_show);

        registry.register(ExtractorKey::new(D::Creator, O::Show), creator::show);
        registry.register(ExtractorKey::new(D::Creator, O::Search), creator::search);
        registry.register(ExtractorKey::new(D::Creator, O::Facet), creator::facet);
        registry.register(ExtractorKey::new(D::Creator, O::ContributorShow), creator::contributor_show);

        registry.register(ExtractorKey::new(D::Series, O::Show), series::show);
        registry.register(ExtractorKey::new(D::Series, O::Search), series::search);

        registry.register(ExtractorKey::new(D::Note, O::Show), note::notes_show);
        registry.register(ExtractorKey::new(D::Note, O::SummaryShow), note::summary_show);
        registry.register(ExtractorKey::new(D::Note, O::ContentsShow), note::contents_show);

        registry.register(ExtractorKey::new(D::Relation, O::ContainedInShow), relation::contained_in_show);
        registry.register(ExtractorKey::new(D::Relation, O::RelatedWorkShow), relation::related_work_show);
        registry.register(ExtractorKey::new(D::Relation, O::ContainsShow), relation::contains_show);
        registry.register(
            ExtractorKey::new(D::Relation, O::RelatedCollectionsShow),
            relation::related_collections_show,
        );
        registry.register(
            ExtractorKey::new(D::Relation, O::PublicationsAboutShow),
            relation::publications_about_show,
        );

        registry.register(ExtractorKey::new(D::Subject, O::Search), subject::search);
        registry.register(ExtractorKey::new(D::Subject, O::Facet), subject::facet);

        registry.register(ExtractorKey::new(D::Language, O::Show), language::show);

        registry.register(ExtractorKey::new(D::Date, O::PublicationYear), |r, c| {
            date::publication_year(r, c).map(|year| year.to_string()).into_iter().collect()
        });
        registry.register(ExtractorKey::new(D::Date, O::PublicationRange), |r, c| {
            date::publication_range(r, c).map(|range| range.to_string()).into_iter().collect()
        });
        registry.register(ExtractorKey::new(D::Date, O::LastUpdated), |r, c| {
            date::last_updated(r, c)
                .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string())
                .into_iter()
                .collect()
        });

        registry.register(ExtractorKey::new(D::Classification, O::Facet), classification::facet);

        tracing::debug!(extractors = registry.len(), "built extractor registry");
        registry
    }

    /// The process-wide registry of built-in extractors.
    pub fn default_registry() -> &'static ExtractorRegistry {
        static REGISTRY: OnceLock<ExtractorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::builtin)
    }

    /// Register `extractor` under `key`, replacing any previous entry.
    pub fn register(&mut self, key: ExtractorKey, extractor: ExtractorFn) {
        self.extractors.insert(key, extractor);
    }

    /// The extractor registered under `key`.
    #[must_use]
    pub fn get(&self, key: ExtractorKey) -> Option<ExtractorFn> {
        self.extractors.get(&key).copied()
    }

    /// Like [`get`](Self::get), failing for unregistered keys.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnknownExtractor`] when nothing is registered under `key`.
    pub fn resolve(&self, key: ExtractorKey) -> Result<ExtractorFn> {
        self.get(key)
            .ok_or_else(|| ExtractError::UnknownExtractor(key.to_string()))
    }

    /// Run the extractor registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnknownExtractor`] when nothing is registered
    /// under `key`. The extractor itself never fails.
    pub fn extract(
        &self,
        key: ExtractorKey,
        record: &dyn MarcRecord,
        ctx: &ExtractionContext,
    ) -> Result<Vec<String>> {
        Ok(self.resolve(key)?(record, ctx))
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<ExtractorKey> {
        let mut keys: Vec<ExtractorKey> = self.extractors.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Number of registered extractors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, Record};

    #[test]
    fn test_key_parse_and_display() {
        let key: ExtractorKey = "subject.facet".parse().unwrap();
        assert_eq!(key, ExtractorKey::new(Domain::Subject, Operation::Facet));
        assert_eq!(key.to_string(), "subject.facet");
        assert_eq!(
            " relation.contained_in_show ".parse::<ExtractorKey>().unwrap().operation,
            Operation::ContainedInShow
        );
    }

    #[test]
    fn test_key_parse_errors() {
        assert!(matches!("title".parse::<ExtractorKey>(), Err(ExtractError::InvalidArgument(_))));
        assert!(matches!("bogus.show".parse::<ExtractorKey>(), Err(ExtractError::InvalidArgument(_))));
        assert!(matches!("title.bogus".parse::<ExtractorKey>(), Err(ExtractError::InvalidArgument(_))));
    }

    #[test]
    fn test_key_serde() {
        let key = ExtractorKey::new(Domain::Date, Operation::PublicationYear);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"date.publication_year\"");
        let back: ExtractorKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<ExtractorKey>("\"date.nope\"").is_err());
    }

    #[test]
    fn test_default_registry_is_shared() {
        let first = ExtractorRegistry::default_registry();
        let second = ExtractorRegistry::default_registry();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 27);
    }

    #[test]
    fn test_unregistered_key() {
        let registry = ExtractorRegistry::new();
        let key = ExtractorKey::new(Domain::Title, Operation::Show);
        let record = Record::new();
        assert!(matches!(
            registry.extract(key, &record, &ExtractionContext::default()),
            Err(ExtractError::UnknownExtractor(ref k)) if k == "title.show"
        ));
        assert!(ExtractorRegistry::default_registry()
            .resolve(ExtractorKey::new(Domain::Language, Operation::Sort))
            .is_err());
    }

    #[test]
    fn test_custom_registration() {
        fn shout(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Vec<String> {
            record
                .fields_by_tags(&["245"])
                .filter_map(|f| f.get_subfield('a'))
                .map(str::to_uppercase)
                .collect()
        }

        let mut registry = ExtractorRegistry::new();
        let key = ExtractorKey::new(Domain::Title, Operation::Show);
        registry.register(key, shout);

        let record = Record::builder()
            .field(Field::builder("245".to_string(), '0', '0').subfield_str('a', "quiet").build())
            .build();
        assert_eq!(
            registry.extract(key, &record, &ExtractionContext::default()).unwrap(),
            vec!["QUIET"]
        );
    }

    #[test]
    fn test_date_extractors_stringify() {
        let record = Record::builder()
            .control_field_str("005", "20230115103045.0")
            .control_field_str("008", "850101m19001950xx            000 0 eng d")
            .build();
        let registry = ExtractorRegistry::default_registry();
        let ctx = ExtractionContext::default();
        let run = |key: &str| registry.extract(key.parse().unwrap(), &record, &ctx).unwrap();

        assert_eq!(run("date.publication_year"), vec!["1900"]);
        assert_eq!(run("date.publication_range"), vec!["1900-1950"]);
        assert_eq!(run("date.last_updated"), vec!["2023-01-15T10:30:45"]);
    }
}
