#![forbid(unsafe_code)]
//! Localization sync toolkit for the Moneo board game.
//!
//! Moneo keeps translatable text in three places: a backend message tree, a
//! frontend message tree (per-language JSON files in four languages), and a
//! card-definition source file with inline Russian titles and descriptions.
//! This crate flattens all of it into one CSV table for translators and folds
//! an edited table back in, deep-merging the JSON trees and patching the card
//! source in place.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use moneo_l10n::{LocaleSync, SyncPaths};
//!
//! let sync = LocaleSync::new(SyncPaths::new(
//!     "locales/backend",
//!     "locales/frontend",
//!     "game/cards.ts",
//! ));
//!
//! // Hand the table to translators...
//! let csv_text = sync.export_to_csv()?;
//!
//! // ...and fold the translated table back in.
//! let report = sync.import_from_csv(&csv_text)?;
//! for line in report.lines() {
//!     println!("{line}");
//! }
//! # Ok::<(), moneo_l10n::Error>(())
//! ```
//!
//! # Design
//!
//! - One flat CSV table, `Context,ID,RU (Original),EN,TR,AR`, keyed by
//!   `(context, id)`. Russian is authoritative: keys absent from `ru` are
//!   never exported, and card rows carry Russian only.
//! - Imports never blank a translation: empty cells stage nothing, and
//!   disk-vs-imported precedence is a [`MergePolicy`], not a hard-coded rule.
//! - The card source file is edited through a deliberately narrow
//!   extract/patch interface so the regex machinery behind it can be swapped
//!   for a real parser without touching the CSV or merge logic.
//! - Best-effort batch semantics: no locking, no multi-file transaction.

pub mod error;
pub mod formats;
pub mod operations;
pub mod store;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{CardEntry, CardField, CardSourceFormat, Context, LocaleRow},
    operations::{ImportReport, LocaleSync, SyncPaths},
    store::LocaleStore,
    tree::{LocaleTree, MergePolicy},
    types::{Language, Namespace},
};
