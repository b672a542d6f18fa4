// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::Path;
use thiserror::Error as TeError;
use tracing::info;

use crate::comapeo::metadata::MetadataLoadError;
use crate::comapeo::{BuildContext, Field, Preset, ProjectMetadata, parse_fields, parse_presets};
use crate::diagnostics::{Warning, Warnings};
use crate::language::LanguageCatalog;
use crate::translation::{MessageCatalog, TranslationError, TranslationSheet, build_message_catalog};
use crate::workbook::{CATEGORIES_SHEET, DETAILS_SHEET, Spreadsheet, Workbook, WorkbookError};

#[derive(TeError, Debug)]
pub enum ProjectError {
    #[error("The workbook has no {0:?} sheet")]
    MissingCategories(&'static str),
    #[error("Fail to build translations: {0}")]
    Translation(#[from] TranslationError),
    #[error("Fail to read workbook: {0}")]
    Workbook(#[from] WorkbookError),
    #[error("Fail to read project metadata: {0}")]
    Metadata(#[from] MetadataLoadError),
}

/// Everything read from a workbook: entities in sheet order plus their translations.
#[derive(Debug, Clone)]
pub struct Project {
    pub metadata: ProjectMetadata,
    pub presets: Vec<Preset>,
    pub fields: Vec<Field>,
    pub messages: MessageCatalog,
}

impl Project {
    pub fn load(
        book: &impl Spreadsheet,
        metadata: ProjectMetadata,
        languages: &LanguageCatalog,
        warnings: &mut Warnings,
    ) -> Result<Self, ProjectError> {
        let categories = book.sheet(CATEGORIES_SHEET).ok_or(ProjectError::MissingCategories(CATEGORIES_SHEET))?;
        let fields = match book.sheet(DETAILS_SHEET) {
            Some(details) => parse_fields(details, warnings),
            None => {
                warnings.push(Warning::MissingSheet { sheet: DETAILS_SHEET.to_string() });
                Vec::new()
            },
        };
        let presets = parse_presets(categories, &fields, warnings);

        let sheets = TranslationSheet::collect(book);
        let messages = build_message_catalog(&sheets, &fields, &presets, languages, &metadata.primary_language, warnings)?;
        info!("Loaded {} categories and {} fields for {:?}", presets.len(), fields.len(), metadata.name);

        Ok(Project { metadata, presets, fields, messages })
    }

    /// Loads the CSV sheets and `metadata.yaml` of a workbook directory.
    pub fn load_dir(workbook_dir: &Path, languages: &LanguageCatalog, warnings: &mut Warnings) -> Result<Self, ProjectError> {
        let book = Workbook::load_dir(workbook_dir)?;
        let metadata = ProjectMetadata::load_from_dir_or_default(workbook_dir)?;
        Self::load(&book, metadata, languages, warnings)
    }

    /// Narrows the project to the categories chosen in `context`.
    ///
    /// Translations were already matched against the full sheets, so this only
    /// drops entries and never shifts rows.
    pub fn select(mut self, context: &BuildContext) -> Self {
        let presets = context.select_presets(&self.presets);
        let fields = context.select_fields(&presets, &self.fields);
        context.select_messages(&mut self.messages, &presets, &fields);
        self.presets = presets;
        self.fields = fields;
        self
    }
}
