//! The shared CSV translation table.
//!
//! One flat table carries every translatable string: header
//! `Context,ID,RU (Original),EN,TR,AR`, one row per key or card field.
//! Quoting is RFC-4180-style (quote when a field contains a comma, quote, or
//! newline; double embedded quotes) but deliberately lenient on input, since
//! the table round-trips through spreadsheet tools: stray quotes mid-field are
//! taken literally, rows with fewer than six fields are dropped without
//! comment, and extra trailing fields are ignored.
use std::io::BufRead;

use crate::{error::Error, formats::Context, traits::Parser, types::Language};

/// Column header of the translation table.
pub const HEADER: &str = "Context,ID,RU (Original),EN,TR,AR";

/// One row of the translation table. `(context, id)` is the table key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRow {
    pub context: Context,
    pub id: String,
    pub ru: String,
    pub en: String,
    pub tr: String,
    pub ar: String,
}

impl LocaleRow {
    /// Returns the cell for `language`.
    pub fn value(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
            Language::Tr => &self.tr,
            Language::Ar => &self.ar,
        }
    }
}

/// Quotes `value` only when it needs quoting; empty input stays an empty,
/// unquoted cell.
pub fn escape(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serializes rows under [`HEADER`], newline-joined, no trailing newline.
pub fn serialize_rows(rows: &[LocaleRow]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        let fields = [
            escape(&row.context.to_string()),
            escape(&row.id),
            escape(&row.ru),
            escape(&row.en),
            escape(&row.tr),
            escape(&row.ar),
        ];
        out.push('\n');
        out.push_str(&fields.join(","));
    }
    out
}

/// Splits one record into raw field strings.
///
/// Character scanner, exact inverse of [`escape`]: a quote opening a field
/// starts a quoted run in which `""` decodes to `"` and commas/newlines are
/// literal; outside quotes a field ends at the next comma. A quote appearing
/// mid-field does not open a quoted run.
pub fn parse_line(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

/// Splits CSV text into records on newlines that fall outside quoted fields,
/// so multi-line values stay within one record.
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (idx, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                records.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    records.push(&text[start..]);
    records
}

/// Parses CSV text into rows.
///
/// Blank records are skipped; the first non-blank record starting with
/// `Context` is the header and is discarded. Records with fewer than six
/// fields, or with an unrecognized context tag, are silently dropped; the
/// table may come back trimmed or rearranged by a spreadsheet tool.
pub fn parse_csv(text: &str) -> Vec<LocaleRow> {
    let mut rows = Vec::new();
    let mut header_seen = false;
    for record in split_records(text) {
        let record = record.strip_suffix('\r').unwrap_or(record);
        if record.trim().is_empty() {
            continue;
        }
        if !header_seen && record.trim_start().starts_with("Context") {
            header_seen = true;
            continue;
        }
        let mut fields = parse_line(record);
        if fields.len() < 6 {
            continue;
        }
        fields.truncate(6);
        let Ok(context) = fields[0].parse::<Context>() else {
            continue;
        };
        let Ok([_, id, ru, en, tr, ar]) = <[String; 6]>::try_from(fields) else {
            continue;
        };
        rows.push(LocaleRow {
            context,
            id,
            ru,
            en,
            tr,
            ar,
        });
    }
    rows
}

impl Parser for Vec<LocaleRow> {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(parse_csv(&text))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(serialize_rows(self).as_bytes())
            .map_err(Error::Io)
    }
}
