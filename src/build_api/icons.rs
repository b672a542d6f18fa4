// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::comapeo::{Preset, slugify};
use crate::diagnostics::{Warning, Warnings};
use super::payload::PayloadIcon;

pub const ICONS_DIR_NAME: &str = "icons";

fn is_inline_svg(source: &str) -> bool {
    let source = source.trim_start();
    source.starts_with("<svg") || source.starts_with("<?xml")
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// `slug -> path` of every SVG below `icons_dir`.
fn index_svg_files(icons_dir: &Path) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    if !icons_dir.is_dir() {
        return index;
    }
    for entry in WalkDir::new(icons_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_svg = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !entry.file_type().is_file() || !is_svg {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index.entry(slugify(stem)).or_insert_with(|| path.to_path_buf());
        }
    }
    index
}

fn file_icon(id: &str, path: &Path, warnings: &mut Warnings) -> Option<PayloadIcon> {
    match fs::read_to_string(path) {
        Ok(svg) => Some(PayloadIcon { id: id.to_string(), svg_data: Some(svg), svg_url: None }),
        Err(err) => {
            warnings.push(Warning::UnreadableFile { path: path.to_path_buf(), reason: err.to_string() });
            None
        },
    }
}

/// Finds an icon for every preset.
///
/// `icons/<slug>.svg` wins, then whatever the Icon cell holds: a file name
/// under `icons/`, inline SVG markup or an http(s) URL.
pub fn collect_icons(workbook_dir: &Path, presets: &[Preset], warnings: &mut Warnings) -> Vec<PayloadIcon> {
    let svg_files = index_svg_files(&workbook_dir.join(ICONS_DIR_NAME));
    debug!("Found {} SVG icons in {workbook_dir:?}", svg_files.len());

    let mut icons = Vec::new();
    for preset in presets {
        let source = preset.icon_source.as_deref().map(str::trim).unwrap_or("");
        let referenced_file = Path::new(source).file_stem().and_then(|s| s.to_str()).map(slugify);
        let icon = if let Some(path) = svg_files.get(&preset.icon) {
            file_icon(&preset.icon, path, warnings)
        } else if is_inline_svg(source) {
            Some(PayloadIcon { id: preset.icon.clone(), svg_data: Some(source.to_string()), svg_url: None })
        } else if is_url(source) {
            Some(PayloadIcon { id: preset.icon.clone(), svg_data: None, svg_url: Some(source.to_string()) })
        } else if let Some(path) = referenced_file.and_then(|slug| svg_files.get(&slug)) {
            file_icon(&preset.icon, path, warnings)
        } else {
            warnings.push(Warning::MissingIcon { icon: preset.icon.clone() });
            None
        };
        icons.extend(icon);
    }
    icons
}
