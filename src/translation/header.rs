// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use regex::Regex;

use crate::diagnostics::{Warning, Warnings};
use crate::language::LanguageCatalog;
use super::TranslationError;

/// Free-text `Language Name - iso` headers, e.g. `Português - pt` or `Portuguese (Brazil) - pt_BR`.
pub(super) const NAME_DASH_CODE_PATTERN: &str = r"^(.+?)\s*-\s*([A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,4})?)$";

/// Which translation sheet column holds which language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Detected languages in column order, without duplicates.
    pub target_languages: Vec<String>,
    pub column_to_language: BTreeMap<usize, String>,
    /// First column that may hold a language; 1, or 3 when ISO/Source columns are present.
    pub language_start: usize,
    /// Set when the sheet had no header and everything maps to the primary language.
    pub is_fallback: bool,
}

impl ColumnMap {
    fn fallback(primary_language: &str) -> Self {
        ColumnMap {
            target_languages: vec![primary_language.to_string()],
            column_to_language: BTreeMap::from([(0, primary_language.to_string())]),
            language_start: 0,
            is_fallback: true,
        }
    }

    /// `(column, language)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.column_to_language.iter().map(|(column, language)| (*column, language.as_str()))
    }

    /// Column count a well-formed row of this sheet would have.
    pub fn expected_width(&self) -> usize {
        if self.is_fallback { 1 } else { self.language_start + self.target_languages.len() }
    }
}

fn has_meta_columns(header: &[String]) -> bool {
    let lowered = |column: usize| header.get(column).map(|h| h.to_lowercase()).unwrap_or_default();
    lowered(1).contains("iso") && lowered(2).contains("source")
}

fn resolve_language(header: &str, catalog: &LanguageCatalog, pattern: &Regex) -> Option<String> {
    if let Some(code) = catalog.code_by_name(header) {
        return Some(code.to_string());
    }
    if let Some(code) = catalog.canonical_code(header) {
        return Some(code.to_string());
    }
    let captures = pattern.captures(header)?;
    let code = captures.get(2)?.as_str().replace('_', "-");
    Some(match catalog.canonical_code(code.as_str()) {
        Some(known) => known.to_string(),
        None => code.to_lowercase(),
    })
}

/// Maps the header row of a translation sheet to language codes.
///
/// Column 0 is always the source text. Blank, unrecognized and repeated
/// language headers are skipped with a warning. Without a header row the
/// whole sheet is treated as `primary_language` in column 0.
pub fn build_column_map(
    sheet: &str,
    header: Option<&[String]>,
    catalog: &LanguageCatalog,
    primary_language: &str,
    warnings: &mut Warnings,
) -> Result<ColumnMap, TranslationError> {
    let header = match header {
        Some(header) if !header.is_empty() => header,
        _ => {
            warnings.push(Warning::MissingHeader { sheet: sheet.to_string(), language: primary_language.to_string() });
            return Ok(ColumnMap::fallback(primary_language));
        },
    };

    let pattern = Regex::new(NAME_DASH_CODE_PATTERN)?;
    let language_start = if has_meta_columns(header) { 3 } else { 1 };
    let mut column_map = ColumnMap {
        target_languages: Vec::new(),
        column_to_language: BTreeMap::new(),
        language_start,
        is_fallback: false,
    };

    for (column, cell) in header.iter().enumerate().skip(language_start) {
        let cell = cell.trim();
        if cell.is_empty() {
            warnings.push(Warning::BlankHeader { sheet: sheet.to_string(), column });
            continue;
        }
        let Some(code) = resolve_language(cell, catalog, &pattern) else {
            warnings.push(Warning::UnknownLanguageHeader { sheet: sheet.to_string(), column, header: cell.to_string() });
            continue;
        };
        if column_map.target_languages.iter().any(|known| known.eq_ignore_ascii_case(&code)) {
            warnings.push(Warning::DuplicateLanguage { sheet: sheet.to_string(), column, code });
            continue;
        }
        column_map.column_to_language.insert(column, code.clone());
        column_map.target_languages.push(code);
    }

    if header.len() != column_map.expected_width() {
        warnings.push(Warning::ColumnCountMismatch {
            sheet: sheet.to_string(),
            columns: header.len(),
            expected: column_map.expected_width(),
        });
    }

    Ok(column_map)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn parse(cells: &[&str]) -> (ColumnMap, Vec<Warning>) {
        let mut warnings = Warnings::new();
        let catalog = LanguageCatalog::new();
        let map = build_column_map("Category Translations", Some(&header(cells)), &catalog, "en", &mut warnings).unwrap();
        (map, warnings.into_vec())
    }

    #[test]
    fn tst_names_codes_and_dash_headers() {
        let (map, warnings) = parse(&["English", "Spanish", "Português - pt", "fr", "Français", "xx-unknown", "Klingon - tlh"]);
        assert_eq!(map.target_languages, vec!["es", "pt", "fr", "tlh"]);
        assert_eq!(map.language_start, 1);
        assert!(!map.is_fallback);
        assert_eq!(map.column_to_language.get(&2).map(String::as_str), Some("pt"));
        assert_eq!(map.column_to_language.get(&6).map(String::as_str), Some("tlh"));
        assert!(!map.column_to_language.contains_key(&5));
        assert_eq!(warnings, vec![
            Warning::DuplicateLanguage { sheet: "Category Translations".to_string(), column: 4, code: "fr".to_string() },
            Warning::UnknownLanguageHeader { sheet: "Category Translations".to_string(), column: 5, header: "xx-unknown".to_string() },
            Warning::ColumnCountMismatch { sheet: "Category Translations".to_string(), columns: 7, expected: 5 },
        ]);
    }

    #[test]
    fn tst_dash_header_with_region() {
        let (map, warnings) = parse(&["English", "Portuguese (Brazil) - pt_br", "Shipibo-Conibo - shp"]);
        assert_eq!(map.target_languages, vec!["pt-BR", "shp"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn tst_meta_columns_shift_language_start() {
        let (map, warnings) = parse(&["English", "ISO code", "Source language", "Español", "  "]);
        assert_eq!(map.language_start, 3);
        assert_eq!(map.target_languages, vec!["es"]);
        assert_eq!(map.columns().collect::<Vec<_>>(), vec![(3, "es")]);
        assert_eq!(warnings[0], Warning::BlankHeader { sheet: "Category Translations".to_string(), column: 4 });

        let (map, _) = parse(&["English", "ISO", "Spanish"]);
        assert_eq!(map.language_start, 1);
        assert_eq!(map.target_languages, vec!["es"]);
    }

    #[test]
    fn tst_missing_header_falls_back_to_primary_language() {
        let catalog = LanguageCatalog::new();
        for header in [None, Some(&[][..])] {
            let mut warnings = Warnings::new();
            let map = build_column_map("Detail Label Translations", header, &catalog, "es", &mut warnings).unwrap();
            assert!(map.is_fallback);
            assert_eq!(map.target_languages, vec!["es"]);
            assert_eq!(map.columns().collect::<Vec<_>>(), vec![(0, "es")]);
            assert_eq!(warnings.len(), 1);
        }
    }

    #[test]
    fn tst_redistributed_header_round_trips() {
        let codes = ["es", "fr", "pt-BR", "qu", "zh-TW"];
        let mut cells = vec!["English"];
        cells.extend(codes);
        let (map, warnings) = parse(&cells);
        assert_eq!(map.target_languages, codes);
        assert!(warnings.is_empty());
    }
}
