// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as TeError;
use tracing::info;

use crate::build_api::{BuildApiClient, BuildApiError, BuildApiSettings, BuildPayload, SettingsError, collect_icons};
use crate::comapeo::{BuildContext, ProjectMetadata, slugify};
use crate::diagnostics::Warnings;
use crate::language::LanguageCatalog;
use crate::project::{Project, ProjectError};

pub const PAYLOAD_FILE_NAME: &str = "payload.json";

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to load workbook {0:?} because: {1}")]
    LoadProject(PathBuf, #[source] ProjectError),
    #[error("None of the selected categories {0:?} exist in the workbook")]
    EmptySelection(Vec<String>),
    #[error("Fail to load settings because: {0}")]
    LoadSettings(#[from] SettingsError),
    #[error("Fail to serialize build payload because: {0}")]
    SerializePayload(#[from] serde_json::Error),
    #[error("Fail to build bundle because: {0}")]
    Build(#[from] BuildApiError),
    #[error("Fail to write {0:?} because: {1}")]
    WriteFile(PathBuf, #[source] std::io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Defaults to the workbook directory.
    pub output_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub retries: Option<u32>,
    /// Category slugs; empty keeps every category.
    pub categories: Vec<String>,
    pub dry_run: bool,
}

/// `<slug of name>-<version>.comapeocat`, used when the service names no file.
pub fn bundle_file_name(metadata: &ProjectMetadata) -> String {
    format!("{}-{}.comapeocat", slugify(&metadata.name), metadata.version)
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), CmdError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CmdError::WriteFile(parent.to_path_buf(), e))?;
    }
    fs::write(path, content).map_err(|e| CmdError::WriteFile(path.to_path_buf(), e))
}

/// Reads the workbook and turns the selected categories into a build payload.
pub fn prepare_payload(workbook_dir: &Path, categories: &[String], warnings: &mut Warnings) -> Result<(Project, BuildPayload), CmdError> {
    let languages = LanguageCatalog::new();
    let project = Project::load_dir(workbook_dir, &languages, warnings)
        .map_err(|e| CmdError::LoadProject(workbook_dir.to_path_buf(), e))?;

    let mut context = BuildContext::new(project.metadata.clone());
    if !categories.is_empty() {
        context = context.with_category_selection(categories.to_vec());
    }
    let project = project.select(&context);
    if project.presets.is_empty() && !categories.is_empty() {
        return Err(CmdError::EmptySelection(categories.to_vec()));
    }

    let icons = collect_icons(workbook_dir, &project.presets, warnings);
    let payload = BuildPayload::new(&project, icons);
    Ok((project, payload))
}

pub fn subcmd_build(workbook_dir: &Path, options: &BuildOptions) -> Result<(), CmdError> {
    let mut warnings = Warnings::new();
    let (project, payload) = prepare_payload(workbook_dir, &options.categories, &mut warnings)?;
    let output_dir = options.output_dir.clone().unwrap_or_else(|| workbook_dir.to_path_buf());

    if options.dry_run {
        let payload_path = output_dir.join(PAYLOAD_FILE_NAME);
        write_file(&payload_path, &serde_json::to_vec_pretty(&payload)?)?;
        println!("Wrote build payload to: {}", payload_path.display());
    } else {
        let mut settings = BuildApiSettings::load_default()?;
        if let Some(url) = &options.api_url {
            settings.url = url.clone();
        }
        if let Some(retries) = options.retries {
            settings.max_retries = retries;
        }
        info!("Building {:?} with {}", project.metadata.name, settings.url);
        let client = BuildApiClient::from_settings(&settings);
        let bundle = client.build(&payload, &bundle_file_name(&project.metadata))?;
        let bundle_path = output_dir.join(&bundle.file_name);
        write_file(&bundle_path, &bundle.bytes)?;
        println!("Wrote configuration bundle to: {}", bundle_path.display());
    }

    if !warnings.is_empty() {
        println!("Finished with {} warnings, see the log above.", warnings.len());
    }
    Ok(())
}
