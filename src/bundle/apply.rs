// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;
use tracing::info;

use crate::build_api::icons::ICONS_DIR_NAME;
use crate::comapeo::field::fields_to_grid;
use crate::comapeo::metadata::METADATA_FILE_NAME;
use crate::comapeo::preset::presets_to_grid;
use crate::comapeo::slugify;
use crate::diagnostics::Warnings;
use crate::language::LanguageCatalog;
use crate::translation::redistribute;
use crate::workbook::{CATEGORIES_SHEET, DETAILS_SHEET, Spreadsheet, Workbook};
use super::{ImportError, ImportedConfig};

/// Writes an imported configuration into the entity and translation sheets
/// of `book`, replacing whatever they held.
pub fn apply_import(
    imported: &ImportedConfig,
    book: &mut impl Spreadsheet,
    languages: &LanguageCatalog,
    warnings: &mut Warnings,
) -> Result<(), ImportError> {
    book.set_sheet(CATEGORIES_SHEET, presets_to_grid(&imported.presets));
    book.set_sheet(DETAILS_SHEET, fields_to_grid(&imported.fields));
    let grids = redistribute(
        &imported.messages,
        &imported.presets,
        &imported.fields,
        languages,
        &imported.metadata.primary_language,
        warnings,
    )?;
    for (name, grid) in grids.into_sheets() {
        book.set_sheet(name, grid);
    }
    info!("Wrote {} categories and {} fields into the workbook", imported.presets.len(), imported.fields.len());
    Ok(())
}

/// Creates a workbook directory from an import: the sheets as CSV files,
/// every icon as `icons/<id>.svg` and the project metadata.
pub fn save_import(
    imported: &ImportedConfig,
    workbook_dir: &Path,
    languages: &LanguageCatalog,
    warnings: &mut Warnings,
) -> Result<Workbook, ImportError> {
    let mut book = Workbook::new();
    apply_import(imported, &mut book, languages, warnings)?;
    book.save_dir(workbook_dir)?;

    if !imported.icons.is_empty() {
        let icons_dir = workbook_dir.join(ICONS_DIR_NAME);
        fs::create_dir_all(&icons_dir)?;
        for (id, svg) in &imported.icons {
            fs::write(icons_dir.join(format!("{}.svg", slugify(id))), svg)?;
        }
    }
    fs::write(workbook_dir.join(METADATA_FILE_NAME), imported.metadata.to_yaml()?)?;
    info!("Saved workbook to {workbook_dir:?}");
    Ok(book)
}
