// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error as TeError;
use tracing::warn;

/// Data-quality problems found while reading sheets or bundles.
///
/// None of these abort an operation. They are logged as soon as they are
/// recorded and also kept so callers can report them at the end.
#[derive(TeError, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("Sheet {sheet:?} has no header row, falling back to primary language {language:?} in column A")]
    MissingHeader { sheet: String, language: String },
    #[error("Sheet {sheet:?} column {column} has a blank header and is skipped")]
    BlankHeader { sheet: String, column: usize },
    #[error("Sheet {sheet:?} column {column} header {header:?} is not a recognized language and is skipped")]
    UnknownLanguageHeader { sheet: String, column: usize, header: String },
    #[error("Sheet {sheet:?} column {column} repeats language {code:?}, only the first column is used")]
    DuplicateLanguage { sheet: String, column: usize, code: String },
    #[error("Sheet {sheet:?} has {columns} columns but {expected} were expected from the detected languages")]
    ColumnCountMismatch { sheet: String, columns: usize, expected: usize },
    #[error("Sheet {sheet:?} has {rows} data rows but its source sheet has {entities}")]
    RowCountMismatch { sheet: String, rows: usize, entities: usize },
    #[error("Sheet {sheet:?} row {row} has no matching source entry and is skipped")]
    UncorrelatedRow { sheet: String, row: usize },
    #[error("Sheet {sheet:?} row {row} reads {found:?} but the source entry at that position is {expected:?}{}", suggestion(.suggested))]
    RowMismatch { sheet: String, row: usize, expected: String, found: String, suggested: Option<String> },
    #[error("Sheet {sheet:?} row {row} has no cell for language {language:?} in column {column}")]
    MissingCell { sheet: String, row: usize, column: usize, language: String },
    #[error("Sheet {sheet:?} row {row} lists {translated} options for {language:?} but field {tag_key:?} only has {available}")]
    ExtraOptions { sheet: String, row: usize, tag_key: String, language: String, translated: usize, available: usize },
    #[error("Sheet {sheet:?} row {row} has option translations for field {tag_key:?}, which is not a select field")]
    OptionsOnNonSelectField { sheet: String, row: usize, tag_key: String },
    #[error("Sheet {sheet:?} is not a known translation sheet and is skipped")]
    UnknownSheet { sheet: String },
    #[error("Language {language:?} is missing {missing} of {total} translations")]
    MissingTranslations { language: String, missing: usize, total: usize },
    #[error("Sheet {sheet:?} is missing")]
    MissingSheet { sheet: String },
    #[error("Details row {row} has unknown type code {code:?}, treated as select one")]
    UnknownFieldType { row: usize, code: String },
    #[error("Details row {row} repeats field key {tag_key:?}")]
    DuplicateTagKey { row: usize, tag_key: String },
    #[error("Categories row {row} repeats category {icon:?}")]
    DuplicateCategory { row: usize, icon: String },
    #[error("Category {category:?} refers to unknown field {field:?}, which is dropped")]
    UnknownFieldReference { category: String, field: String },
    #[error("Category {category:?} has unknown geometry {geometry:?}, which is dropped")]
    UnknownGeometry { category: String, geometry: String },
    #[error("No icon found for category {icon:?}")]
    MissingIcon { icon: String },
    #[error("Language {language:?} cannot be written as a header that parses back")]
    UnwritableLanguage { language: String },
    #[error("Fail to read {path:?} because: {reason}")]
    UnreadableFile { path: PathBuf, reason: String },
    #[error("Icon sprite symbol {symbol:?} is skipped because: {reason}")]
    BadSpriteSymbol { symbol: String, reason: String },
}

fn suggestion(suggested: &Option<String>) -> String {
    match suggested {
        Some(name) => format!(", the row looks like {name:?}"),
        None => String::new(),
    }
}

#[derive(Debug, Default, Clone)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.items.push(warning);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
