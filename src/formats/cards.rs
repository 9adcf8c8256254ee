//! The card-definition source file as a translation source.
//!
//! Moneo's deal/market cards live as object literals directly in game source
//! text, `{ id: 'c1', title: '…', description: '…' }`, Russian only. This
//! module treats that file as a black-box key-value store reached through two
//! operations: [`Format::cards`] (extract) and [`Format::patch`] (targeted
//! in-place edit). Everything outside the patched value is preserved
//! byte-for-byte, so the file stays diffable.
//!
//! Matching is regex-based and intentionally narrow: fields must appear in
//! `id`, `title`, `description` order as single-quoted strings. A value
//! containing an escaped single quote or a literal `}` shifts the match
//! boundaries and corrupts extraction or blocks a patch. That fragility is a
//! known limitation of editing source text with patterns; the interface is
//! kept narrow so a real parser can replace it without touching the CSV or
//! merge logic.

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{error::Error, traits::Parser};

lazy_static! {
    static ref CARD_REGEX: Regex = Regex::new(
        r"\{[^}]*?id:\s*'([^']*)'[^}]*?title:\s*'([^']*)'[^}]*?description:\s*'([^']*)'"
    )
    .unwrap();
}

/// A card's translatable texts, extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Which of a card's two translatable fields an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Title,
    Description,
}

impl CardField {
    /// The field name as written in the source object literals.
    pub fn source_key(self) -> &'static str {
        match self {
            CardField::Title => "title",
            CardField::Description => "description",
        }
    }

    /// The suffix appended to the card id in CSV row ids.
    pub fn id_suffix(self) -> &'static str {
        match self {
            CardField::Title => "_TITLE",
            CardField::Description => "_DESC",
        }
    }
}

impl Display for CardField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_key())
    }
}

/// The card source file, held verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Raw source text. Patches edit this in place.
    pub text: String,
}

impl Format {
    /// Wraps already-loaded source text.
    pub fn new(text: impl Into<String>) -> Self {
        Format { text: text.into() }
    }

    /// Reads the file, or returns an empty format if it does not exist.
    /// Deployments without card data simply have no file; that is not an
    /// error, extraction just yields nothing.
    pub fn read_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        if !path.as_ref().exists() {
            return Ok(Format::default());
        }
        Self::read_from(path)
    }

    /// Extracts every card entry in source order.
    ///
    /// Matches never overlap: each one starts after the end of the previous
    /// match, so nested-looking literals are not double-counted.
    pub fn cards(&self) -> Vec<CardEntry> {
        CARD_REGEX
            .captures_iter(&self.text)
            .map(|caps| CardEntry {
                id: caps[1].to_string(),
                title: caps[2].to_string(),
                description: caps[3].to_string(),
            })
            .collect()
    }

    /// Replaces one field's value for the card with `id`, leaving every other
    /// byte untouched. Returns `Ok(false)` when no card matches; absent ids
    /// are expected when the CSV is newer than the source file.
    pub fn patch(&mut self, id: &str, field: CardField, value: &str) -> Result<bool, Error> {
        let pattern = format!(
            r"(id:\s*'{}'[^}}]*?{}:\s*')[^']*(')",
            regex::escape(id),
            field.source_key()
        );
        let re = Regex::new(&pattern)?;
        let replaced = re.replace(&self.text, |caps: &Captures| {
            format!("{}{}{}", &caps[1], value, &caps[2])
        });
        match replaced {
            std::borrow::Cow::Borrowed(_) => Ok(false),
            std::borrow::Cow::Owned(patched) => {
                self.text = patched;
                Ok(true)
            }
        }
    }
}

impl Parser for Format {
    /// Parse from any reader. The whole file is the format; no structure is
    /// validated up front.
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Format { text })
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.text.as_bytes()).map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding; editors
    /// and spreadsheet round-trips sometimes leave a UTF-8 BOM behind.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Ok(Format { text: decoded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SOURCE: &str = indoc! {"
        export const smallDeals = [
            {
                id: 'c1',
                kind: 'stock',
                title: 'Акции МонеоБанка',
                cost: 1000,
                description: 'Цена колеблется от 5 до 40',
            },
            { id: 'c2', title: 'Квартира 2к', description: 'Сдаётся в аренду' },
        ];
    "};

    #[test]
    fn test_extracts_cards_in_source_order() {
        let format = Format::new(SOURCE);
        let cards = format.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "c1");
        assert_eq!(cards[0].title, "Акции МонеоБанка");
        assert_eq!(cards[0].description, "Цена колеблется от 5 до 40");
        assert_eq!(cards[1].id, "c2");
        assert_eq!(cards[1].title, "Квартира 2к");
    }

    #[test]
    fn test_extracts_nothing_from_empty_source() {
        assert!(Format::default().cards().is_empty());
    }

    #[test]
    fn test_patch_title_leaves_everything_else_byte_identical() {
        let mut format = Format::new(SOURCE);
        assert!(format.patch("c1", CardField::Title, "Новые акции").unwrap());
        let expected = SOURCE.replace("Акции МонеоБанка", "Новые акции");
        assert_eq!(format.text, expected);
    }

    #[test]
    fn test_patch_description_does_not_touch_title() {
        let mut format = Format::new(SOURCE);
        assert!(format.patch("c2", CardField::Description, "Продана").unwrap());
        let cards = format.cards();
        assert_eq!(cards[1].title, "Квартира 2к");
        assert_eq!(cards[1].description, "Продана");
    }

    #[test]
    fn test_patch_does_not_bleed_into_prefixed_ids() {
        let source = "{ id: 'X', title: 'a', description: 'b' }\n\
                      { id: 'X2', title: 'c', description: 'd' }";
        let mut format = Format::new(source);
        assert!(format.patch("X", CardField::Title, "patched").unwrap());
        let cards = format.cards();
        assert_eq!(cards[0].title, "patched");
        assert_eq!(cards[1].title, "c");
        assert_eq!(cards[1].description, "d");
    }

    #[test]
    fn test_patch_missing_id_is_a_silent_no_op() {
        let mut format = Format::new(SOURCE);
        assert!(!format.patch("ghost", CardField::Title, "x").unwrap());
        assert_eq!(format.text, SOURCE);
    }

    #[test]
    fn test_sequential_patches_compose() {
        let mut format = Format::new(SOURCE);
        assert!(format.patch("c1", CardField::Title, "T1").unwrap());
        assert!(format.patch("c1", CardField::Description, "D1").unwrap());
        assert!(format.patch("c2", CardField::Title, "T2").unwrap());
        let cards = format.cards();
        assert_eq!((cards[0].title.as_str(), cards[0].description.as_str()), ("T1", "D1"));
        assert_eq!(cards[1].title, "T2");
    }

    // Known limitation: an escaped single quote inside a value shifts the
    // match boundary, so the extracted fields come back mangled.
    #[test]
    fn test_escaped_quote_in_value_corrupts_extraction() {
        let source = r"{ id: 'c1', title: 'it\'s fine', description: 'D' }";
        let cards = Format::new(source).cards();
        assert_eq!(cards.len(), 1);
        assert_ne!(cards[0].title, r"it\'s fine");
    }

    // Known limitation: a literal `}` inside an earlier field stops the
    // same-object scan, so later fields of that card cannot be patched.
    #[test]
    fn test_brace_in_value_blocks_patching_later_fields() {
        let source = "{ id: 'c1', title: 'uses {curly} }', description: 'D' }";
        let mut format = Format::new(source);
        assert!(!format.patch("c1", CardField::Description, "new").unwrap());
        assert_eq!(format.text, source);
    }
}
