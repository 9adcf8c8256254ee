//! Export/import orchestration over the locale stores and the card source.
//!
//! Both operations read everything fresh from disk and are single-shot batch
//! actions. Import performs up to eight JSON writes plus one source-file write
//! with no transactionality across them; a crash mid-import leaves whatever
//! was already flushed. Callers must not run two imports over the same files
//! at once.

use std::{
    collections::BTreeSet,
    fmt::Display,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    formats::{CardField, Context, LocaleRow, cards, csv},
    store::LocaleStore,
    traits::Parser,
    tree::{LocaleTree, MergePolicy, deep_merge, flatten_keys, get_value, set_value},
    types::{Language, Namespace},
};

/// Where the three translation sources live. Passed in explicitly; the crate
/// holds no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    /// Directory with the backend namespace trees (`ru.json`, `en.json`, …).
    pub backend_locales: PathBuf,
    /// Directory with the frontend namespace trees.
    pub frontend_locales: PathBuf,
    /// The card-definition source file. May not exist.
    pub card_source: PathBuf,
}

impl SyncPaths {
    pub fn new(
        backend_locales: impl Into<PathBuf>,
        frontend_locales: impl Into<PathBuf>,
        card_source: impl Into<PathBuf>,
    ) -> Self {
        SyncPaths {
            backend_locales: backend_locales.into(),
            frontend_locales: frontend_locales.into(),
            card_source: card_source.into(),
        }
    }

    fn locales_dir(&self, namespace: Namespace) -> &Path {
        match namespace {
            Namespace::Backend => &self.backend_locales,
            Namespace::Frontend => &self.frontend_locales,
        }
    }
}

/// Counters describing what one import changed, one field per stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Non-empty cells merged into the backend namespace.
    pub backend_translations: usize,
    /// Non-empty cells merged into the frontend namespace.
    pub frontend_translations: usize,
    /// Card title/description values actually rewritten in source.
    pub card_fields_patched: usize,
    /// Distinct card ids among those rewrites.
    pub cards_patched: usize,
}

impl ImportReport {
    /// One human-readable log line per import stage. Counts only; callers
    /// wanting diffs can compare exports.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "Backend locales: merged {} translations",
                self.backend_translations
            ),
            format!(
                "Frontend locales: merged {} translations",
                self.frontend_translations
            ),
            format!(
                "Card source: patched {} fields across {} cards",
                self.card_fields_patched, self.cards_patched
            ),
        ]
    }
}

impl Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Per-language trees staged from CSV rows before merging to disk.
#[derive(Debug, Default)]
struct StagedTrees {
    ru: LocaleTree,
    en: LocaleTree,
    tr: LocaleTree,
    ar: LocaleTree,
}

impl StagedTrees {
    fn get(&self, language: Language) -> &LocaleTree {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
            Language::Tr => &self.tr,
            Language::Ar => &self.ar,
        }
    }

    fn get_mut(&mut self, language: Language) -> &mut LocaleTree {
        match language {
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
            Language::Tr => &mut self.tr,
            Language::Ar => &mut self.ar,
        }
    }

    fn is_empty(&self) -> bool {
        Language::ALL.iter().all(|lang| self.get(*lang).is_empty())
    }
}

/// The export/import engine. Construct once with [`SyncPaths`]; every call
/// re-reads the filesystem, so one instance can outlive many sync cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSync {
    paths: SyncPaths,
    policy: MergePolicy,
}

impl LocaleSync {
    pub fn new(paths: SyncPaths) -> Self {
        LocaleSync {
            paths,
            policy: MergePolicy::default(),
        }
    }

    /// Sets the disk-vs-imported precedence for leaf conflicts.
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn store(&self, namespace: Namespace) -> LocaleStore {
        LocaleStore::new(self.paths.locales_dir(namespace))
    }

    /// Renders the whole translation table as CSV text.
    ///
    /// Key enumeration follows each namespace's `ru` tree; a key missing from
    /// `ru` is not exported even if other languages carry it. Missing
    /// translations become empty cells. Card rows carry Russian only.
    /// Export mutates nothing, and repeated exports are byte-identical.
    pub fn export_to_csv(&self) -> Result<String, Error> {
        let mut rows = Vec::new();

        for namespace in Namespace::ALL {
            let store = self.store(namespace);
            let ru = store.read(Language::Ru)?;
            let en = store.read(Language::En)?;
            let tr = store.read(Language::Tr)?;
            let ar = store.read(Language::Ar)?;

            for key in flatten_keys(&ru) {
                rows.push(LocaleRow {
                    context: Context::from(namespace),
                    ru: get_value(&ru, &key).unwrap_or_default().to_string(),
                    en: get_value(&en, &key).unwrap_or_default().to_string(),
                    tr: get_value(&tr, &key).unwrap_or_default().to_string(),
                    ar: get_value(&ar, &key).unwrap_or_default().to_string(),
                    id: key,
                });
            }
        }

        let source = cards::Format::read_or_default(&self.paths.card_source)?;
        for card in source.cards() {
            rows.push(card_row(Context::CardTitle, &card.id, CardField::Title, card.title));
            rows.push(card_row(
                Context::CardDesc,
                &card.id,
                CardField::Description,
                card.description,
            ));
        }

        Ok(csv::serialize_rows(&rows))
    }

    /// Parses CSV text and folds it back into the stores and the card source.
    ///
    /// Tree-backed rows stage values per (namespace, language); empty cells
    /// stage nothing, so an import can never blank an existing translation.
    /// Each namespace with at least one staged row has all four language
    /// files re-merged and rewritten; an untouched namespace is not rewritten
    /// at all. Card rows patch the source file sequentially in row order (RU
    /// value only; multi-language cards are unsupported); the file is only
    /// rewritten when at least one patch matched, and is never created.
    pub fn import_from_csv(&self, csv_text: &str) -> Result<ImportReport, Error> {
        let rows = csv::parse_csv(csv_text);

        let mut backend = StagedTrees::default();
        let mut frontend = StagedTrees::default();
        let mut card_updates: Vec<(String, CardField, String)> = Vec::new();
        let mut report = ImportReport::default();

        for row in &rows {
            if let Some(namespace) = row.context.namespace() {
                let (staged, counter) = match namespace {
                    Namespace::Backend => (&mut backend, &mut report.backend_translations),
                    Namespace::Frontend => (&mut frontend, &mut report.frontend_translations),
                };
                for language in Language::ALL {
                    if set_value(staged.get_mut(language), &row.id, row.value(language)) {
                        *counter += 1;
                    }
                }
            } else if let Some(field) = row.context.card_field() {
                let id = row.id.strip_suffix(field.id_suffix()).unwrap_or(&row.id);
                if !row.ru.is_empty() {
                    card_updates.push((id.to_string(), field, row.ru.clone()));
                }
            }
        }

        for (namespace, staged) in [(Namespace::Backend, &backend), (Namespace::Frontend, &frontend)]
        {
            if staged.is_empty() {
                continue;
            }
            let store = self.store(namespace);
            for language in Language::ALL {
                let existing = store.read(language)?;
                let merged = deep_merge(&existing, staged.get(language), self.policy);
                store.write(language, &merged)?;
            }
        }

        if !card_updates.is_empty() {
            let mut source = cards::Format::read_or_default(&self.paths.card_source)?;
            let mut patched_ids = BTreeSet::new();
            for (id, field, value) in &card_updates {
                if source.patch(id, *field, value)? {
                    report.card_fields_patched += 1;
                    patched_ids.insert(id.clone());
                }
            }
            report.cards_patched = patched_ids.len();
            if report.card_fields_patched > 0 {
                source.write_to(&self.paths.card_source)?;
            }
        }

        Ok(report)
    }
}

fn card_row(context: Context, id: &str, field: CardField, ru: String) -> LocaleRow {
    LocaleRow {
        context,
        id: format!("{}{}", id, field.id_suffix()),
        ru,
        en: String::new(),
        tr: String::new(),
        ar: String::new(),
    }
}
