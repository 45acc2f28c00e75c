//! Spoken-language catalogue for profile language selection.

pub mod catalog;
pub mod collate;

pub use catalog::{matches, LanguageCatalog, LanguageEntry};
pub use collate::{collation_key, fold_cmp, locale_cmp, NameOrder};
