//! Concrete field extractors.
//!
//! Each submodule groups the extractors of one domain (titles, creators,
//! subjects, ...). Every extractor is a plain function over a
//! [`MarcRecord`](crate::MarcRecord) and an [`ExtractionContext`] and follows
//! the same shape:
//!
//! 1. select candidate fields by tag, with linked 880 alternates when enabled
//! 2. filter on indicators, usually through [`FieldKind`]
//! 3. join the wanted subfields and fix trailing punctuation
//! 4. append relator terms where roles matter
//! 5. de-duplicate with [`unique`], keeping first-seen order
//!
//! A missing tag or subfield never fails: the result is simply empty.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{ExtractionContext, Field, Record};
//! use marc_discovery::extract::creator;
//!
//! let record = Record::builder()
//!     .field(Field::builder("100".to_string(), '1', ' ')
//!         .subfield_str('a', "Smith, John,")
//!         .subfield_str('d', "1900-")
//!         .subfield_str('4', "aut")
//!         .build())
//!     .build();
//!
//! let ctx = ExtractionContext::default();
//! assert_eq!(creator::show(&record, &ctx), vec!["Smith, John, 1900- Author."]);
//! ```

pub mod classification;
pub mod creator;
pub mod date;
pub mod language;
pub mod note;
pub mod registry;
pub mod relation;
pub mod series;
pub mod subject;
pub mod title;

use std::sync::Arc;

use indexmap::IndexSet;

use crate::code_map::{CodeMap, CodeMaps};
use crate::config::ExtractionConfig;
use crate::field_linkage::{LinkageKey, ALTERNATE_TAG};
use crate::record::Field;

/// Shared, read-only inputs of every extractor.
///
/// Cloning is cheap: the code tables sit behind an [`Arc`] and are loaded at
/// most once no matter how many contexts share them.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    code_maps: Arc<CodeMaps>,
    config: ExtractionConfig,
    untranslated: CodeMap,
}

impl Default for ExtractionContext {
    fn default() -> Self {
        Self::new(Arc::new(CodeMaps::builtin()), ExtractionConfig::default())
    }
}

impl ExtractionContext {
    /// Create a context from shared code tables and a configuration.
    #[must_use]
    pub fn new(code_maps: Arc<CodeMaps>, config: ExtractionConfig) -> Self {
        ExtractionContext {
            code_maps,
            config,
            untranslated: CodeMap::new(),
        }
    }

    /// Code tables.
    #[must_use]
    pub fn code_maps(&self) -> &CodeMaps {
        &self.code_maps
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// True if linked 880 alternates are merged into results.
    #[must_use]
    pub fn include_alternates(&self) -> bool {
        self.config.include_alternates
    }

    /// Relator table to translate subfield 4 with.
    ///
    /// Empty when relator translation is turned off, which leaves only the
    /// literal role terms.
    #[must_use]
    pub fn relator_map(&self) -> &CodeMap {
        if self.config.translate_relators {
            self.code_maps.relator()
        } else {
            &self.untranslated
        }
    }
}

/// De-duplicate `values`, keeping the first occurrence of each.
///
/// Blank values are dropped.
pub fn unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// What a name or title heading names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameType {
    /// x00
    Personal,
    /// x10
    Corporate,
    /// x11
    Meeting,
    /// x30
    UniformTitle,
}

impl NameType {
    /// Decode the last two digits of a 1xx/6xx/7xx/8xx tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.get(1..3)? {
            "00" => Some(Self::Personal),
            "10" => Some(Self::Corporate),
            "11" => Some(Self::Meeting),
            "30" => Some(Self::UniformTitle),
            _ => None,
        }
    }

    /// True for personal, corporate, and meeting names.
    #[must_use]
    pub fn is_name(self) -> bool {
        !matches!(self, Self::UniformTitle)
    }
}

/// Subject heading system, from the 6xx second indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thesaurus {
    /// `0`: Library of Congress Subject Headings
    Lcsh,
    /// `1`: LC children's subject headings
    LcChildrens,
    /// `2`: Medical Subject Headings
    Mesh,
    /// `3`: National Agricultural Library subject authority file
    Nal,
    /// `4`: source not specified
    Unspecified,
    /// `5`: Canadian Subject Headings
    Canadian,
    /// `6`: Répertoire de vedettes-matière
    Rvm,
    /// `7`: source given in subfield 2
    SourceSpecified,
    /// Blank or unknown indicator
    Unknown,
}

impl Thesaurus {
    /// Decode a 6xx second indicator.
    #[must_use]
    pub fn from_indicator(indicator: char) -> Self {
        match indicator {
            '0' => Self::Lcsh,
            '1' => Self::LcChildrens,
            '2' => Self::Mesh,
            '3' => Self::Nal,
            '4' => Self::Unspecified,
            '5' => Self::Canadian,
            '6' => Self::Rvm,
            '7' => Self::SourceSpecified,
            _ => Self::Unknown,
        }
    }
}

/// Cataloging role of a data field, decoded from its tag and indicators.
///
/// An 880 is classified by the tag in its linkage key, so a vernacular
/// alternate has the same kind as the field it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 100/110/111/130
    MainEntry(NameType),
    /// 240/243
    UniformTitle,
    /// 245
    Title,
    /// 246/247/740
    VariantTitle,
    /// 4xx
    SeriesStatement,
    /// 5xx
    Note,
    /// 6xx
    Subject {
        /// Name or title heading type, when the subject is one
        name: Option<NameType>,
        /// Heading system
        thesaurus: Thesaurus,
    },
    /// 700/710/711/730
    AddedEntry {
        /// Heading type
        name: NameType,
        /// Indicator 2 is `2`: the work is contained in the item
        analytical: bool,
    },
    /// 760-787
    LinkingEntry,
    /// 800/810/811/830
    SeriesAddedEntry(NameType),
    /// Anything else, including an 880 without a usable linkage
    Other,
}

impl FieldKind {
    /// Classify `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_discovery::Field;
    /// use marc_discovery::extract::{FieldKind, NameType};
    ///
    /// let field = Field::builder("880".to_string(), '1', '2')
    ///     .subfield_str('6', "700-02")
    ///     .build();
    /// assert_eq!(
    ///     FieldKind::of(&field),
    ///     FieldKind::AddedEntry { name: NameType::Personal, analytical: true }
    /// );
    /// ```
    #[must_use]
    pub fn of(field: &Field) -> Self {
        let key;
        let tag = if field.tag == ALTERNATE_TAG {
            match LinkageKey::of(field) {
                Some(k) => {
                    key = k;
                    key.as_str()
                }
                None => return Self::Other,
            }
        } else {
            field.tag.as_str()
        };
        Self::classify(tag, field.indicator2)
    }

    fn classify(tag: &str, indicator2: char) -> Self {
        let name = NameType::from_tag(tag);
        match tag.as_bytes() {
            [b'1', ..] => name.map_or(Self::Other, Self::MainEntry),
            b"240" | b"243" => Self::UniformTitle,
            b"245" => Self::Title,
            b"246" | b"247" | b"740" => Self::VariantTitle,
            [b'4', ..] => Self::SeriesStatement,
            [b'5', ..] => Self::Note,
            [b'6', ..] => Self::Subject {
                name,
                thesaurus: Thesaurus::from_indicator(indicator2),
            },
            [b'7', b'6'..=b'8', _] => Self::LinkingEntry,
            [b'7', ..] => name.map_or(Self::Other, |name| Self::AddedEntry {
                name,
                analytical: indicator2 == '2',
            }),
            [b'8', ..] => name.map_or(Self::Other, Self::SeriesAddedEntry),
            _ => Self::Other,
        }
    }

    /// True for an added entry describing a work contained in the item.
    #[must_use]
    pub fn is_analytical(self) -> bool {
        matches!(self, Self::AddedEntry { analytical: true, .. })
    }

    /// Heading type of a main, added, subject, or series entry.
    #[must_use]
    pub fn name_type(self) -> Option<NameType> {
        match self {
            Self::MainEntry(name)
            | Self::AddedEntry { name, .. }
            | Self::SeriesAddedEntry(name) => Some(name),
            Self::Subject { name, .. } => name,
            _ => None,
        }
    }
}
