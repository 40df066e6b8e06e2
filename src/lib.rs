#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Modules
//!
//! - [`record`] : Concrete record structures (`Record`, `Field`, `Subfield`)
//! - [`marc_record`] : The read-only `MarcRecord` trait extractors consume
//! - [`subfield_predicate`] : Subfield selection rules
//! - [`punctuation`] : Subfield joining and trailing punctuation rules
//! - [`field_linkage`] : 880 alternate graphic representation linkage
//! - [`relator`] : Contributor role resolution
//! - [`field_query`] : Candidate field selection by tag, indicator, and subfield
//! - [`code_map`] : Code-to-term lookup tables and their shared cache
//! - [`config`] : Extraction switches
//! - [`extract`] : Concrete extractors and the extractor registry
//! - [`index_document`] : Index field mappings and batch indexing
//! - [`error`] : Error types

pub mod code_map;
pub mod config;
pub mod error;
pub mod extract;
pub mod field_linkage;
pub mod field_query;
pub mod index_document;
pub mod marc_record;
pub mod punctuation;
pub mod record;
pub mod relator;
pub mod subfield_predicate;

pub use code_map::{CodeMap, CodeMaps, CodeMapsBuilder, CodeSource, CodeTable};
pub use config::ExtractionConfig;
pub use error::{ExtractError, Result};
pub use extract::registry::{Domain, ExtractorFn, ExtractorKey, ExtractorRegistry, Operation};
pub use extract::{ExtractionContext, FieldKind, NameType, Thesaurus};
pub use field_linkage::LinkageKey;
pub use field_query::FieldQuery;
pub use index_document::{IndexDocument, IndexMapping, ResolvedMapping};
pub use marc_record::MarcRecord;
pub use punctuation::Punctuation;
pub use record::{Field, FieldBuilder, Record, RecordBuilder, Subfield};
pub use subfield_predicate::SubfieldPredicate;
