// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};
use thiserror::Error as TeError;
use tracing::debug;

pub const METADATA_FILE_NAME: &str = "metadata.yaml";
pub const DEFAULT_PRIMARY_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Language of column A in every sheet.
    #[serde(default = "default_primary_language", alias = "primaryLanguage")]
    pub primary_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_primary_language() -> String {
    DEFAULT_PRIMARY_LANGUAGE.to_string()
}

impl ProjectMetadata {
    pub fn with_name(name: &str) -> Self {
        ProjectMetadata {
            name: name.to_string(),
            version: default_version(),
            primary_language: default_primary_language(),
            description: None,
        }
    }
}

#[derive(TeError, Debug)]
pub enum MetadataLoadError {
    #[error("Can not read metadata file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("Fail to deserialize metadata file: {0}")]
    ParseError(String),
}

impl ProjectMetadata {
    pub fn from_str(content: &str) -> Result<Self, MetadataLoadError> {
        serde_yaml2::from_str::<ProjectMetadata>(content).map_err(|e| MetadataLoadError::ParseError(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, MetadataLoadError> {
        serde_yaml2::to_string(self).map_err(|e| MetadataLoadError::ParseError(e.to_string()))
    }

    /// Loads `metadata.yaml` from the workbook directory, or falls back to
    /// defaults named after the directory when the file does not exist.
    pub fn load_from_dir_or_default(workbook_dir: &Path) -> Result<Self, MetadataLoadError> {
        let metadata_file = workbook_dir.join(METADATA_FILE_NAME);
        if !metadata_file.is_file() {
            let name = workbook_dir.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            debug!("No {METADATA_FILE_NAME} in {workbook_dir:?}, using defaults");
            return Ok(Self::with_name(&name));
        }
        let content = fs::read_to_string(&metadata_file)?;
        Self::from_str(&content)
    }
}
