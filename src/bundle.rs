// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod document;
pub mod sprite;
pub mod reader;
pub mod apply;

use std::path::PathBuf;
use thiserror::Error as TeError;

use crate::comapeo::metadata::MetadataLoadError;
use crate::comapeo::{Field, Preset, ProjectMetadata};
use crate::translation::{MessageCatalog, TranslationError};
use crate::workbook::WorkbookError;

pub use apply::save_import;
pub use document::ConfigDocument;
pub use reader::read_bundle;

#[derive(TeError, Debug)]
pub enum ImportError {
    #[error("Bundle {0:?} does not exist")]
    NotFound(PathBuf),
    #[error("Unknown bundle file extension {0:?}")]
    UnknownExtension(String),
    #[error("Can not read bundle: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("Fail to parse {0:?} as JSON: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    #[error("{0:?} is not a CoMapeo or Mapeo configuration document")]
    UnrecognizedDocument(PathBuf),
    #[error("{0:?} is a TAR archive; TAR extraction is not implemented, extract it and import the directory instead")]
    TarNotImplemented(PathBuf),
    #[error("{0:?} is a ZIP archive; extract it and import the resulting directory instead")]
    ArchiveNotExtracted(PathBuf),
    #[error("No presets or fields found in {0:?}")]
    EmptyBundle(PathBuf),
    #[error("Fail to write translation sheets: {0}")]
    Translation(#[from] TranslationError),
    #[error("Fail to write workbook: {0}")]
    Workbook(#[from] WorkbookError),
    #[error("Fail to write metadata: {0}")]
    Metadata(#[from] MetadataLoadError),
}

/// A configuration bundle normalized to the workbook's entity types.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedConfig {
    pub metadata: ProjectMetadata,
    pub presets: Vec<Preset>,
    pub fields: Vec<Field>,
    pub messages: MessageCatalog,
    /// `(icon id, svg markup)` in preset order where known.
    pub icons: Vec<(String, String)>,
}
