//! Core, format-agnostic types for moneo-l10n.
//!
//! The sync pipeline moves values between two locale namespaces (backend and
//! frontend message trees) in four languages. Russian is the source language:
//! it is authoritative for key enumeration, and the card source file only ever
//! carries Russian text.

use std::{fmt::Display, str::FromStr};

use crate::error::Error;

/// One of the four translation languages carried by the CSV table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Russian, the source language. Keys absent from `ru` are never exported.
    Ru,
    /// English.
    En,
    /// Turkish.
    Tr,
    /// Arabic.
    Ar,
}

impl Language {
    /// All languages, in CSV column order.
    pub const ALL: [Language; 4] = [Language::Ru, Language::En, Language::Tr, Language::Ar];

    /// Returns the lowercase language code used for locale file names.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Tr => "tr",
            Language::Ar => "ar",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "tr" => Ok(Language::Tr),
            "ar" => Ok(Language::Ar),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

/// One of the two independent translation domains stored as JSON trees.
///
/// The card source file is not a namespace: its entries live in source text
/// and are addressed through [`crate::formats::cards`] instead of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Server-side messages (errors, notifications, bot replies).
    Backend,
    /// Client-side UI strings.
    Frontend,
}

impl Namespace {
    /// Both namespaces, in CSV export order.
    pub const ALL: [Namespace; 2] = [Namespace::Backend, Namespace::Frontend];

    /// Returns the lowercase directory-friendly name.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Backend => "backend",
            Namespace::Frontend => "frontend",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_match_column_order() {
        let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["ru", "en", "tr", "ar"]);
    }

    #[test]
    fn test_language_from_str_is_case_insensitive() {
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!(" ar ".parse::<Language>().unwrap(), Language::Ar);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_namespace_round_trip_display() {
        assert_eq!(Namespace::Backend.to_string(), "backend");
        assert_eq!(Namespace::Frontend.to_string(), "frontend");
    }
}
