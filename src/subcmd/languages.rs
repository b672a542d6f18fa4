// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use thiserror::Error as TeError;

use crate::language::{LanguageCatalog, LanguageEntry};

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("No language matches {0:?}")]
    UnknownLanguage(String),
}

/// Entries matching `query` as a code or exact name, else by partial name.
pub fn find_languages(catalog: &LanguageCatalog, query: &str) -> Vec<LanguageEntry> {
    let exact = catalog.canonical_code(query).or_else(|| catalog.code_by_name(query));
    if let Some(code) = exact {
        return catalog.entries().iter().filter(|e| e.code == code).copied().collect();
    }
    let needle = LanguageCatalog::normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }
    catalog.entries().iter()
        .filter(|e| {
            LanguageCatalog::normalize(e.english_name).contains(&needle)
                || LanguageCatalog::normalize(e.native_name).contains(&needle)
        })
        .copied()
        .collect()
}

pub fn subcmd_languages(query: Option<&str>) -> Result<(), CmdError> {
    let catalog = LanguageCatalog::new();
    let entries = match query {
        Some(query) => find_languages(&catalog, query),
        None => catalog.entries().to_vec(),
    };
    if entries.is_empty() {
        return Err(CmdError::UnknownLanguage(query.unwrap_or_default().to_string()));
    }
    let code_width = entries.iter().map(|e| e.code.len()).max().unwrap_or(0);
    for entry in entries {
        println!("{:code_width$}  {}  ({})", entry.code, entry.english_name, entry.native_name);
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn tst_find_languages() {
        let catalog = LanguageCatalog::new();
        let by_code: Vec<&str> = find_languages(&catalog, "ES").iter().map(|e| e.code).collect();
        assert_eq!(by_code, vec!["es"]);
        let by_name: Vec<&str> = find_languages(&catalog, "Português").iter().map(|e| e.code).collect();
        assert_eq!(by_name, vec!["pt"]);
        assert!(find_languages(&catalog, "portug").iter().any(|e| e.code == "pt"));
        assert!(find_languages(&catalog, "   ").is_empty());
        assert!(find_languages(&catalog, "klingon").is_empty());
    }

    #[test]
    fn tst_unknown_language_is_an_error() {
        assert!(matches!(subcmd_languages(Some("klingon")), Err(CmdError::UnknownLanguage(_))));
    }
}
