//! On-disk locale stores.
//!
//! Each namespace is a directory of per-language JSON trees (`ru.json`,
//! `en.json`, `tr.json`, `ar.json`). Trees are read fresh on every call and
//! written back with stable 4-space indentation so the files diff cleanly in
//! review. There is no caching and no locking; the sync operations are
//! admin-triggered batch actions, not a concurrent request path.

use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{error::Error, tree::LocaleTree, types::Language};

/// Reader/writer for one namespace's locale directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleStore {
    dir: PathBuf,
}

impl LocaleStore {
    /// Creates a store rooted at `dir`. The directory does not have to exist
    /// yet; it is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocaleStore { dir: dir.into() }
    }

    /// Path of the JSON file holding `language`'s tree.
    pub fn file_path(&self, language: Language) -> PathBuf {
        self.dir.join(format!("{}.json", language.code()))
    }

    /// Reads one language tree. A missing file is an empty tree; languages
    /// are translated incrementally and most start with no file at all.
    /// A file that exists but is not valid JSON is an error naming the file.
    pub fn read(&self, language: Language) -> Result<LocaleTree, Error> {
        let path = self.file_path(language);
        if !path.exists() {
            return Ok(LocaleTree::new());
        }
        let file = File::open(&path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut text = String::new();
        decoder.read_to_string(&mut text).map_err(Error::Io)?;

        serde_json::from_str(&text).map_err(|source| Error::parse_error(path, source))
    }

    /// Overwrites one language tree, 4-space indented, trailing newline.
    pub fn write(&self, language: Language, tree: &LocaleTree) -> Result<(), Error> {
        let path = self.file_path(language);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        tree.serialize(&mut serializer)
            .map_err(|source| Error::parse_error(&path, source))?;
        buf.push(b'\n');

        fs::write(&path, buf).map_err(Error::Io)
    }
}

impl AsRef<Path> for LocaleStore {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}
