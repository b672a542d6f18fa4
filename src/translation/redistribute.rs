// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use regex::Regex;

use crate::comapeo::{Field, Preset};
use crate::diagnostics::{Warning, Warnings};
use crate::language::LanguageCatalog;
use crate::workbook::{SheetGrid, SheetRow};
use super::TranslationError;
use super::builder::TranslationSheetKind;
use super::catalog::{MessageCatalog, keys};
use super::header::NAME_DASH_CODE_PATTERN;

/// The four translation sheets rebuilt from a message catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationGrids {
    pub category_names: SheetGrid,
    pub field_labels: SheetGrid,
    pub field_helper_texts: SheetGrid,
    pub field_options: SheetGrid,
}

impl TranslationGrids {
    pub fn grid(&self, kind: TranslationSheetKind) -> &SheetGrid {
        match kind {
            TranslationSheetKind::CategoryName => &self.category_names,
            TranslationSheetKind::FieldLabel => &self.field_labels,
            TranslationSheetKind::FieldHelperText => &self.field_helper_texts,
            TranslationSheetKind::FieldOption => &self.field_options,
        }
    }

    /// `(sheet name, grid)` pairs ready to be written to a workbook.
    pub fn into_sheets(self) -> Vec<(&'static str, SheetGrid)> {
        vec![
            (TranslationSheetKind::CategoryName.sheet_name(), self.category_names),
            (TranslationSheetKind::FieldLabel.sheet_name(), self.field_labels),
            (TranslationSheetKind::FieldHelperText.sheet_name(), self.field_helper_texts),
            (TranslationSheetKind::FieldOption.sheet_name(), self.field_options),
        ]
    }
}

/// Header cell for `code` that the header parser maps back to the same code.
fn language_header(code: &str, languages: &LanguageCatalog, pattern: &Regex) -> Option<String> {
    if let Some(canonical) = languages.canonical_code(code) {
        return Some(canonical.to_string());
    }
    let header = format!("{code} - {code}");
    pattern.is_match(&header).then_some(header)
}

fn row_with(source: String, cells: impl IntoIterator<Item = String>) -> SheetRow {
    std::iter::once(source).chain(cells).collect()
}

/// Writes a message catalog back out as translation sheets.
///
/// Rows follow the order of `presets` and `fields` so the sheets re-import
/// positionally. An untranslated option leaves an empty piece in its option
/// cell so later labels keep their position on re-import.
pub fn redistribute(
    catalog: &MessageCatalog,
    presets: &[Preset],
    fields: &[Field],
    languages: &LanguageCatalog,
    primary_language: &str,
    warnings: &mut Warnings,
) -> Result<TranslationGrids, TranslationError> {
    let pattern = Regex::new(NAME_DASH_CODE_PATTERN)?;
    let mut codes = Vec::new();
    let mut header = vec![
        languages.names_by_code(primary_language).map(|names| names.english).unwrap_or(primary_language).to_string(),
    ];
    for code in catalog.languages().filter(|code| !code.eq_ignore_ascii_case(primary_language)) {
        match language_header(code, languages, &pattern) {
            Some(cell) => {
                header.push(cell);
                codes.push(code);
            },
            None => warnings.push(Warning::UnwritableLanguage { language: code.to_string() }),
        }
    }

    let mut grids = TranslationGrids::default();
    for kind in TranslationSheetKind::ALL {
        let grid = match kind {
            TranslationSheetKind::CategoryName => &mut grids.category_names,
            TranslationSheetKind::FieldLabel => &mut grids.field_labels,
            TranslationSheetKind::FieldHelperText => &mut grids.field_helper_texts,
            TranslationSheetKind::FieldOption => &mut grids.field_options,
        };
        grid.push(header.clone());
    }

    let text = |code: &str, key: &str| catalog.label(code, key).unwrap_or_default().to_string();

    for preset in presets {
        let key = keys::preset_name(&preset.icon);
        grids.category_names.push(row_with(preset.name.clone(), codes.iter().map(|code| text(code, &key))));
    }

    for field in fields {
        let label_key = keys::field_label(&field.tag_key);
        grids.field_labels.push(row_with(field.label.clone(), codes.iter().map(|code| text(code, &label_key))));

        let helper_key = keys::field_helper_text(&field.tag_key);
        grids.field_helper_texts.push(row_with(
            field.helper_text.clone().unwrap_or_default(),
            codes.iter().map(|code| text(code, &helper_key)),
        ));

        let option_cells = codes.iter().map(|code| {
            if !field.field_type.is_select() {
                return String::new();
            }
            let mut pieces: Vec<&str> = field.options.iter()
                .map(|option| catalog.label(code, &keys::field_option(&field.tag_key, &option.value)).unwrap_or_default())
                .collect();
            while pieces.last().is_some_and(|piece| piece.is_empty()) {
                pieces.pop();
            }
            pieces.join(", ")
        });
        grids.field_options.push(row_with(field.joined_option_labels(), option_cells));
    }

    Ok(grids)
}
