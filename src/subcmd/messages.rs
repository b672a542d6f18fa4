// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use serde::Serialize;
use thiserror::Error as TeError;

use crate::diagnostics::Warnings;
use crate::language::LanguageCatalog;
use crate::project::{Project, ProjectError};
use crate::translation::MessageCatalog;

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to load workbook {0:?} because: {1}")]
    LoadProject(PathBuf, #[source] ProjectError),
    #[error("Fail to serialize messages as JSON because: {0}")]
    SerializeJson(#[from] serde_json::Error),
    #[error("Fail to serialize messages as YAML because: {0}")]
    SerializeYaml(String),
}

#[derive(clap::ValueEnum, Clone, Default, Copy, Debug)]
pub enum MessagesFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Serialize)]
struct MessagesReport<'a> {
    messages: &'a MessageCatalog,
    warnings: Vec<String>,
}

pub fn render_messages(messages: &MessageCatalog, warnings: &Warnings, format: MessagesFormat) -> Result<String, CmdError> {
    let report = MessagesReport {
        messages,
        warnings: warnings.iter().map(|w| w.to_string()).collect(),
    };
    match format {
        MessagesFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        MessagesFormat::Yaml => serde_yaml2::to_string(&report).map_err(|e| CmdError::SerializeYaml(e.to_string())),
    }
}

pub fn subcmd_messages(workbook_dir: &Path, format: MessagesFormat) -> Result<(), CmdError> {
    let mut warnings = Warnings::new();
    let project = Project::load_dir(workbook_dir, &LanguageCatalog::new(), &mut warnings)
        .map_err(|e| CmdError::LoadProject(workbook_dir.to_path_buf(), e))?;
    println!("{}", render_messages(&project.messages, &warnings, format)?);
    Ok(())
}
