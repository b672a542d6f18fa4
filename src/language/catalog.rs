// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use tracing::warn;

use super::table::LANGUAGES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub english_name: &'static str,
    pub native_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageNames {
    pub english: &'static str,
    pub native: &'static str,
}

/// Bidirectional lookup between language codes and their English/native names.
///
/// All accessors accept `Option<&str>` (plain `&str` converts implicitly), and
/// absent or blank input never panics: lookups return `None`, predicates return
/// `false` and [`LanguageCatalog::normalize`] returns an empty string.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<LanguageEntry>,
    /// lowercased code -> index into `entries`
    by_code: HashMap<String, usize>,
    /// normalized english/native name -> index into `entries`
    by_name: HashMap<String, usize>,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageCatalog {
    /// Catalog seeded from the built-in language table.
    pub fn new() -> Self {
        Self::from_entries(LANGUAGES)
    }

    pub fn from_entries(entries: &[LanguageEntry]) -> Self {
        let mut catalog = LanguageCatalog {
            entries: Vec::with_capacity(entries.len()),
            by_code: HashMap::with_capacity(entries.len()),
            by_name: HashMap::with_capacity(entries.len() * 2),
        };
        for entry in entries {
            let code_key = entry.code.trim().to_lowercase();
            if code_key.is_empty() {
                warn!("Skipping language entry with blank code: {entry:?}");
                continue;
            }
            if catalog.by_code.contains_key(&code_key) {
                warn!("Duplicate language code {:?} in language table, keeping the first one", entry.code);
                continue;
            }
            let index = catalog.entries.len();
            catalog.entries.push(*entry);
            catalog.by_code.insert(code_key, index);

            let english = Self::normalize_str(entry.english_name);
            let native = Self::normalize_str(entry.native_name);
            catalog.insert_name(english.clone(), index);
            if native != english {
                catalog.insert_name(native, index);
            }
        }
        catalog
    }

    fn insert_name(&mut self, name: String, index: usize) {
        if name.is_empty() {
            return;
        }
        match self.by_name.get(&name) {
            Some(&existing) if existing != index => {
                warn!(
                    "Language name {name:?} is shared by {:?} and {:?}, keeping {:?}",
                    self.entries[existing].code, self.entries[index].code, self.entries[existing].code,
                );
            },
            Some(_) => {},
            None => {
                self.by_name.insert(name, index);
            },
        }
    }

    fn normalize_str(name: &str) -> String {
        // `to_lowercase` applies the locale-independent Unicode mapping, so
        // results never depend on the host locale (e.g. Turkish dotted I).
        name.trim().to_lowercase()
    }

    pub fn normalize<'a>(name: impl Into<Option<&'a str>>) -> String {
        name.into().map(Self::normalize_str).unwrap_or_default()
    }

    pub fn code_by_name<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&'static str> {
        let key = Self::normalize(name);
        if key.is_empty() {
            return None;
        }
        self.by_name.get(&key).map(|&index| self.entries[index].code)
    }

    pub fn names_by_code<'a>(&self, code: impl Into<Option<&'a str>>) -> Option<LanguageNames> {
        self.entry_by_code(code).map(|entry| LanguageNames {
            english: entry.english_name,
            native: entry.native_name,
        })
    }

    /// Canonical spelling of a code, e.g. `PT-br` -> `pt-BR`.
    pub fn canonical_code<'a>(&self, code: impl Into<Option<&'a str>>) -> Option<&'static str> {
        self.entry_by_code(code).map(|entry| entry.code)
    }

    pub fn has_code<'a>(&self, code: impl Into<Option<&'a str>>) -> bool {
        self.entry_by_code(code).is_some()
    }

    pub fn has_name<'a>(&self, name: impl Into<Option<&'a str>>) -> bool {
        self.code_by_name(name).is_some()
    }

    pub fn all_codes(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.code).collect()
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    fn entry_by_code<'a>(&self, code: impl Into<Option<&'a str>>) -> Option<&LanguageEntry> {
        let key = Self::normalize(code);
        if key.is_empty() {
            return None;
        }
        self.by_code.get(&key).map(|&index| &self.entries[index])
    }
}
