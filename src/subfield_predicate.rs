//! Reusable boolean tests over subfields.
//!
//! A [`SubfieldPredicate`] decides whether a single subfield takes part in a
//! join. Extractors build one per target tag, usually from an inclusion or an
//! exclusion set of codes, and hand it to
//! [`join_subfields`](crate::punctuation::join_subfields) or the alternate
//! script linker.
//!
//! The free functions in this module ask questions about a whole field
//! (is a code present, does a value match) and never fail: a field with no
//! subfields answers `false`.
//!
//! # Examples
//!
//! ```
//! use marc_discovery::{Field, SubfieldPredicate};
//! use marc_discovery::subfield_predicate::is_defined;
//!
//! let field = Field::builder("245".to_string(), '1', '0')
//!     .subfield_str('a', "Title /")
//!     .subfield_str('c', "Author.")
//!     .build();
//!
//! let wanted = SubfieldPredicate::not_in_set(&['c', '6', '8', 'h']);
//! let kept: Vec<char> = field.subfields().filter(|sf| wanted.matches(sf)).map(|sf| sf.code).collect();
//! assert_eq!(kept, vec!['a']);
//! assert!(is_defined(&field, 'c'));
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

use crate::error::{ExtractError, Result};
use crate::record::{Field, Subfield};

/// Set of subfield codes held inline for the common case of a handful of codes.
pub type CodeSet = SmallVec<[char; 8]>;

/// A pure, shareable test over one subfield.
#[derive(Clone)]
pub enum SubfieldPredicate {
    /// Accepts every subfield
    Any,
    /// Accepts subfields whose code is in the set
    InSet(CodeSet),
    /// Accepts subfields whose code is not in the set
    NotInSet(CodeSet),
    /// Accepts when every inner predicate accepts
    All(Vec<SubfieldPredicate>),
    /// Accepts when at least one inner predicate accepts
    AnyOf(Vec<SubfieldPredicate>),
    /// Inverts the inner predicate
    Not(Box<SubfieldPredicate>),
    /// Caller-supplied test
    Custom(Arc<dyn Fn(&Subfield) -> bool + Send + Sync>),
}

impl fmt::Debug for SubfieldPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::InSet(codes) => f.debug_tuple("InSet").field(codes).finish(),
            Self::NotInSet(codes) => f.debug_tuple("NotInSet").field(codes).finish(),
            Self::All(preds) => f.debug_tuple("All").field(preds).finish(),
            Self::AnyOf(preds) => f.debug_tuple("AnyOf").field(preds).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl SubfieldPredicate {
    /// True if the subfield code is one of `codes`.
    #[must_use]
    pub fn in_set(codes: &[char]) -> Self {
        Self::InSet(codes.iter().copied().collect())
    }

    /// True if the subfield code is not one of `codes`.
    #[must_use]
    pub fn not_in_set(codes: &[char]) -> Self {
        Self::NotInSet(codes.iter().copied().collect())
    }

    /// Build a predicate from exactly one of an inclusion or exclusion set.
    ///
    /// Passing neither selects every subfield.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidArgument`] when both sets are given,
    /// since that is a construction bug at the call site.
    pub fn select(include: Option<&[char]>, exclude: Option<&[char]>) -> Result<Self> {
        match (include, exclude) {
            (Some(inc), Some(exc)) => Err(ExtractError::InvalidArgument(format!(
                "expected an inclusion or an exclusion set, got both ({inc:?} and {exc:?})"
            ))),
            (Some(inc), None) => Ok(Self::in_set(inc)),
            (None, Some(exc)) => Ok(Self::not_in_set(exc)),
            (None, None) => Ok(Self::Any),
        }
    }

    /// Wrap an arbitrary closure.
    pub fn from_fn<F>(test: F) -> Self
    where
        F: Fn(&Subfield) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(test))
    }

    /// Combine with another predicate using logical AND.
    #[must_use]
    pub fn and(self, other: SubfieldPredicate) -> Self {
        match self {
            Self::All(mut preds) => {
                preds.push(other);
                Self::All(preds)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Combine with another predicate using logical OR.
    #[must_use]
    pub fn or(self, other: SubfieldPredicate) -> Self {
        match self {
            Self::AnyOf(mut preds) => {
                preds.push(other);
                Self::AnyOf(preds)
            }
            first => Self::AnyOf(vec![first, other]),
        }
    }

    /// Logical complement.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::InSet(codes) => Self::NotInSet(codes),
            Self::NotInSet(codes) => Self::InSet(codes),
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Evaluate the predicate against a subfield.
    #[must_use]
    pub fn matches(&self, subfield: &Subfield) -> bool {
        match self {
            Self::Any => true,
            Self::InSet(codes) => codes.contains(&subfield.code),
            Self::NotInSet(codes) => !codes.contains(&subfield.code),
            Self::All(preds) => preds.iter().all(|p| p.matches(subfield)),
            Self::AnyOf(preds) => preds.iter().any(|p| p.matches(subfield)),
            Self::Not(inner) => !inner.matches(subfield),
            Self::Custom(test) => test(subfield),
        }
    }
}

/// True if any subfield in `field` has the given code.
#[must_use]
pub fn is_defined(field: &Field, code: char) -> bool {
    field.subfields().any(|sf| sf.code == code)
}

/// True if no subfield in `field` has the given code.
#[must_use]
pub fn is_undefined(field: &Field, code: char) -> bool {
    !is_defined(field, code)
}

/// True if any subfield with `code` has a value matching `pattern`.
///
/// Case sensitivity follows how `pattern` was built; use
/// [`regex::RegexBuilder::case_insensitive`] at the call site to relax it.
#[must_use]
pub fn value_matches(field: &Field, code: char, pattern: &Regex) -> bool {
    field.subfields_by_code(code).any(|value| pattern.is_match(value))
}

/// True if any subfield with `code` has a value within `candidates`.
#[must_use]
pub fn value_in_list(field: &Field, code: char, candidates: &[&str]) -> bool {
    field
        .subfields_by_code(code)
        .any(|value| candidates.contains(&value))
}

/// True if the field has subfields with `code` and none of their values are
/// within `candidates`.
#[must_use]
pub fn value_not_in_list(field: &Field, code: char, candidates: &[&str]) -> bool {
    is_defined(field, code) && !value_in_list(field, code, candidates)
}

/// Non-blank values of every subfield with `code`, in field order.
#[must_use]
pub fn subfield_values(field: &Field, code: char) -> Vec<&str> {
    field
        .subfields_by_code(code)
        .filter(|value| !value.trim().is_empty())
        .collect()
}
