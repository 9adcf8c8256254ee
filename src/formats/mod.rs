//! The two row sources feeding the shared CSV table.
//!
//! This module re-exports the main types for each source and provides the
//! [`Context`] tag identifying which source a CSV row belongs to.

pub mod cards;
pub mod csv;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use cards::{CardEntry, CardField, Format as CardSourceFormat};
pub use csv::LocaleRow;

use crate::{error::Error, types::Namespace};

/// The CSV `Context` column: which namespace or card field a row targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Backend locale tree row; `ID` is a dot-path key.
    Backend,
    /// Frontend locale tree row; `ID` is a dot-path key.
    Frontend,
    /// Card title row; `ID` is `<cardId>_TITLE`.
    CardTitle,
    /// Card description row; `ID` is `<cardId>_DESC`.
    CardDesc,
}

/// Implements [`std::fmt::Display`] for [`Context`] with the exact tags used
/// in the CSV table.
///
/// # Example
/// ```rust
/// use moneo_l10n::formats::Context;
/// assert_eq!(Context::Backend.to_string(), "Backend");
/// assert_eq!(Context::CardTitle.to_string(), "Card Title");
/// assert_eq!(Context::CardDesc.to_string(), "Card Desc");
/// ```
impl Display for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Backend => write!(f, "Backend"),
            Context::Frontend => write!(f, "Frontend"),
            Context::CardTitle => write!(f, "Card Title"),
            Context::CardDesc => write!(f, "Card Desc"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`Context`].
///
/// Accepts the exact CSV tags, ignoring surrounding whitespace. Returns
/// [`crate::Error::UnknownContext`] for anything else.
///
/// # Example
/// ```rust
/// use moneo_l10n::formats::Context;
/// use std::str::FromStr;
/// assert_eq!(Context::from_str("Backend").unwrap(), Context::Backend);
/// assert_eq!(Context::from_str("Card Desc").unwrap(), Context::CardDesc);
/// assert!(Context::from_str("Sidecar").is_err());
/// ```
impl FromStr for Context {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Backend" => Ok(Context::Backend),
            "Frontend" => Ok(Context::Frontend),
            "Card Title" => Ok(Context::CardTitle),
            "Card Desc" => Ok(Context::CardDesc),
            other => Err(Error::UnknownContext(other.to_string())),
        }
    }
}

impl Context {
    /// The namespace this context stores into, if it is tree-backed.
    /// Card contexts return `None`; they patch source text instead.
    pub fn namespace(self) -> Option<Namespace> {
        match self {
            Context::Backend => Some(Namespace::Backend),
            Context::Frontend => Some(Namespace::Frontend),
            Context::CardTitle | Context::CardDesc => None,
        }
    }

    /// The card field this context patches, if it is card-backed.
    pub fn card_field(self) -> Option<CardField> {
        match self {
            Context::CardTitle => Some(CardField::Title),
            Context::CardDesc => Some(CardField::Description),
            Context::Backend | Context::Frontend => None,
        }
    }
}

impl From<Namespace> for Context {
    fn from(namespace: Namespace) -> Self {
        match namespace {
            Namespace::Backend => Context::Backend,
            Namespace::Frontend => Context::Frontend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_from_str_round_trip() {
        for context in [
            Context::Backend,
            Context::Frontend,
            Context::CardTitle,
            Context::CardDesc,
        ] {
            assert_eq!(context.to_string().parse::<Context>().unwrap(), context);
        }
    }

    #[test]
    fn test_context_classification() {
        assert_eq!(Context::Backend.namespace(), Some(Namespace::Backend));
        assert_eq!(Context::Backend.card_field(), None);
        assert_eq!(Context::CardTitle.namespace(), None);
        assert_eq!(Context::CardTitle.card_field(), Some(CardField::Title));
    }
}
