//! Code-to-term lookup tables.
//!
//! A [`CodeMap`] is an immutable mapping from a short code (`aut`, `eng`,
//! `Q`) to its display term. [`CodeMaps`] holds one map per [`CodeTable`]
//! and initializes each at most once, either eagerly through
//! [`CodeMaps::preload`] or lazily on first lookup. After that it is
//! read-only and can be shared across threads.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{CodeMap, CodeMaps, CodeTable};
//!
//! let maps = CodeMaps::builtin();
//! assert_eq!(maps.get(CodeTable::Relator).get("aut"), Some("Author"));
//!
//! let custom = CodeMaps::builder()
//!     .table(CodeTable::Relator, CodeMap::from_pairs([("aut", "Writer")]))
//!     .build();
//! assert_eq!(custom.relator().get("aut"), Some("Writer"));
//! assert!(custom.language().is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

const BUILTIN_RELATORS: &str = include_str!("../data/relators.json");
const BUILTIN_LANGUAGES: &str = include_str!("../data/languages.json");
const BUILTIN_LC_CLASSIFICATION: &str = include_str!("../data/lc_classification.json");

/// Immutable code → display term mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeMap {
    entries: HashMap<String, String>,
}

impl CodeMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(code, term)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CodeMap {
            entries: pairs
                .into_iter()
                .map(|(code, term)| (code.into(), term.into()))
                .collect(),
        }
    }

    /// Parse a flat JSON object of code → term.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Json`] if the text is not a flat string object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up the term for `code`.
    ///
    /// Surrounding whitespace on the code is ignored. Blank codes and codes
    /// with no entry yield `None`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.entries.get(code).map(String::as_str)
    }

    /// True if the map has an entry for `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The lookup tables consumed by extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTable {
    /// MARC relator codes (subfield 4)
    Relator,
    /// ISO 639-2 language codes
    Language,
    /// LC classification top-level letters
    Classification,
}

impl CodeTable {
    /// Every table, in slot order.
    pub const ALL: [CodeTable; 3] = [Self::Relator, Self::Language, Self::Classification];

    const fn slot(self) -> usize {
        match self {
            Self::Relator => 0,
            Self::Language => 1,
            Self::Classification => 2,
        }
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relator => write!(f, "relator"),
            Self::Language => write!(f, "language"),
            Self::Classification => write!(f, "classification"),
        }
    }
}

/// Where a table's entries come from.
#[derive(Debug, Clone)]
pub enum CodeSource {
    /// No entries
    Empty,
    /// JSON text compiled into the binary
    Embedded(&'static str),
    /// An already built map
    Map(CodeMap),
    /// A JSON file read on first use
    File(PathBuf),
}

impl CodeSource {
    fn load(&self, table: CodeTable) -> Result<CodeMap> {
        let wrap = |reason: String| ExtractError::CodeMapLoad {
            table: table.to_string(),
            reason,
        };
        match self {
            Self::Empty => Ok(CodeMap::new()),
            Self::Embedded(json) => CodeMap::from_json_str(json).map_err(|e| wrap(e.to_string())),
            Self::Map(map) => Ok(map.clone()),
            Self::File(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| wrap(format!("{}: {e}", path.display())))?;
                CodeMap::from_json_str(&text).map_err(|e| wrap(format!("{}: {e}", path.display())))
            }
        }
    }
}

#[derive(Debug)]
struct TableSlot {
    source: CodeSource,
    cell: OnceLock<CodeMap>,
}

impl TableSlot {
    fn new(source: CodeSource) -> Self {
        TableSlot {
            source,
            cell: OnceLock::new(),
        }
    }
}

/// Single-initialization cache of every [`CodeTable`].
///
/// Each table is loaded at most once. A table that fails to load lazily is
/// logged and treated as empty so that lookups degrade to absence; call
/// [`CodeMaps::preload`] at startup to surface load errors instead.
#[derive(Debug)]
pub struct CodeMaps {
    slots: [TableSlot; 3],
}

impl Default for CodeMaps {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CodeMaps {
    /// Tables backed by the embedded relator, language, and classification data.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder()
            .source(CodeTable::Relator, CodeSource::Embedded(BUILTIN_RELATORS))
            .source(CodeTable::Language, CodeSource::Embedded(BUILTIN_LANGUAGES))
            .source(
                CodeTable::Classification,
                CodeSource::Embedded(BUILTIN_LC_CLASSIFICATION),
            )
            .build()
    }

    /// Start from all-empty tables.
    #[must_use]
    pub fn builder() -> CodeMapsBuilder {
        CodeMapsBuilder {
            sources: [CodeSource::Empty, CodeSource::Empty, CodeSource::Empty],
        }
    }

    /// The map for `table`, loading it on first use.
    pub fn get(&self, table: CodeTable) -> &CodeMap {
        let slot = &self.slots[table.slot()];
        slot.cell.get_or_init(|| match slot.source.load(table) {
            Ok(map) => {
                tracing::debug!(table = %table, entries = map.len(), "loaded code table");
                map
            }
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "code table unavailable, using empty map");
                CodeMap::new()
            }
        })
    }

    /// Relator code table.
    pub fn relator(&self) -> &CodeMap {
        self.get(CodeTable::Relator)
    }

    /// Language code table.
    pub fn language(&self) -> &CodeMap {
        self.get(CodeTable::Language)
    }

    /// Classification code table.
    pub fn classification(&self) -> &CodeMap {
        self.get(CodeTable::Classification)
    }

    /// Load every table now.
    ///
    /// Tables already initialized are left alone.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExtractError::CodeMapLoad`] encountered; tables
    /// loaded before the failure stay loaded.
    pub fn preload(&self) -> Result<()> {
        for table in CodeTable::ALL {
            let slot = &self.slots[table.slot()];
            if slot.cell.get().is_some() {
                continue;
            }
            let map = slot.source.load(table)?;
            tracing::debug!(table = %table, entries = map.len(), "preloaded code table");
            // A concurrent lazy load may have won; both came from the same source.
            let _ = slot.cell.set(map);
        }
        Ok(())
    }
}

/// Builder for [`CodeMaps`].
#[derive(Debug)]
pub struct CodeMapsBuilder {
    sources: [CodeSource; 3],
}

impl CodeMapsBuilder {
    /// Set the source of one table.
    #[must_use]
    pub fn source(mut self, table: CodeTable, source: CodeSource) -> Self {
        self.sources[table.slot()] = source;
        self
    }

    /// Use an in-memory map for one table.
    #[must_use]
    pub fn table(self, table: CodeTable, map: CodeMap) -> Self {
        self.source(table, CodeSource::Map(map))
    }

    /// Read one table from a JSON file on first use.
    #[must_use]
    pub fn json_file(self, table: CodeTable, path: impl Into<PathBuf>) -> Self {
        self.source(table, CodeSource::File(path.into()))
    }

    /// Build the cache. Nothing is loaded yet.
    #[must_use]
    pub fn build(self) -> CodeMaps {
        let [relator, language, classification] = self.sources;
        CodeMaps {
            slots: [
                TableSlot::new(relator),
                TableSlot::new(language),
                TableSlot::new(classification),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_code_map_lookup() {
        let map = CodeMap::from_pairs([("aut", "Author"), ("edt", "Editor")]);
        assert_eq!(map.get("aut"), Some("Author"));
        assert_eq!(map.get(" edt "), Some("Editor"));
        assert_eq!(map.get("xyz"), None);
        assert_eq!(map.get(""), None);
        assert_eq!(map.get("   "), None);
        assert_eq!(map.len(), 2);
        assert!(map.contains("aut"));
    }

    #[test]
    fn test_code_map_from_json() {
        let map = CodeMap::from_json_str(r#"{"eng": "English"}"#).unwrap();
        assert_eq!(map.get("eng"), Some("English"));
        assert!(CodeMap::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_builtin_tables() {
        let maps = CodeMaps::builtin();
        maps.preload().unwrap();
        assert_eq!(maps.relator().get("trl"), Some("Translator"));
        assert_eq!(maps.language().get("eng"), Some("English"));
        assert_eq!(maps.classification().get("Q"), Some("Science"));
    }

    #[test]
    fn test_lazy_file_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ita": "Italiano"}}"#).unwrap();

        let maps = CodeMaps::builder()
            .json_file(CodeTable::Language, file.path())
            .build();
        assert_eq!(maps.language().get("ita"), Some("Italiano"));
        // Later reads are served from the cache.
        assert!(std::ptr::eq(maps.language(), maps.language()));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let maps = CodeMaps::builder()
            .json_file(CodeTable::Relator, "/nonexistent/relators.json")
            .build();
        assert!(maps.relator().is_empty());
    }

    #[test]
    fn test_preload_reports_errors() {
        let maps = CodeMaps::builder()
            .source(CodeTable::Language, CodeSource::Embedded("not json"))
            .build();
        let err = maps.preload().unwrap_err();
        assert!(matches!(err, ExtractError::CodeMapLoad { ref table, .. } if table == "language"));
    }

    #[test]
    fn test_code_maps_shared_across_threads() {
        let maps = std::sync::Arc::new(CodeMaps::builtin());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let maps = std::sync::Arc::clone(&maps);
                std::thread::spawn(move || maps.relator().get("aut").map(str::to_string))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("Author"));
        }
    }
}
