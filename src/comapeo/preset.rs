// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Warning, Warnings};
use crate::workbook::SheetGrid;
use super::field::Field;
use super::slug::slugify;

// Categories sheet columns.
const COL_NAME: usize = 0;
const COL_ICON: usize = 1;
const COL_FIELDS: usize = 2;
const COL_COLOR: usize = 3;
const COL_GEOMETRY: usize = 4;
const COL_ID: usize = 5;

pub const CATEGORIES_HEADER: [&str; 6] = ["Name", "Icon", "Fields", "Color", "Geometry", "ID"];
pub const DEFAULT_COLOR: &str = "#0000FF";
const KNOWN_GEOMETRIES: [&str; 5] = ["point", "line", "area", "vertex", "relation"];

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_geometry() -> Vec<String> {
    vec!["point".to_string()]
}

/// A category. `icon` is the slug that identifies it everywhere, including
/// translation keys; `name` may be translated and is never used as a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub icon: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default = "default_geometry")]
    pub geometry: Vec<String>,
    #[serde(default)]
    pub sort: u32,
    /// What the Icon cell held: a file name, a URL or inline SVG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_source: Option<String>,
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|s| s.trim()).unwrap_or("")
}

/// Resolves a Fields cell entry to a tag key: exact key, then slug, then label.
fn resolve_field_reference<'a>(reference: &str, fields: &'a [Field]) -> Option<&'a str> {
    let slug = slugify(reference);
    fields.iter()
        .find(|f| f.tag_key == reference)
        .or_else(|| fields.iter().find(|f| f.tag_key == slug))
        .or_else(|| fields.iter().find(|f| f.label.trim().eq_ignore_ascii_case(reference)))
        .map(|f| f.tag_key.as_str())
}

/// Parses the Categories sheet. Row 1 is the header and is skipped.
pub fn parse_presets(grid: &SheetGrid, fields: &[Field], warnings: &mut Warnings) -> Vec<Preset> {
    let mut presets = Vec::new();
    let mut seen = HashSet::new();
    for (index, row) in grid.iter().enumerate().skip(1) {
        let sheet_row = index + 1;
        let name = cell(row, COL_NAME);
        if name.is_empty() {
            continue;
        }
        let icon = match cell(row, COL_ID) {
            "" => slugify(name),
            id => id.to_string(),
        };
        if !seen.insert(icon.clone()) {
            warnings.push(Warning::DuplicateCategory { row: sheet_row, icon: icon.clone() });
        }

        let mut field_keys: Vec<String> = Vec::new();
        for reference in cell(row, COL_FIELDS).split(',').map(str::trim).filter(|r| !r.is_empty()) {
            match resolve_field_reference(reference, fields) {
                Some(tag_key) if !field_keys.iter().any(|k| k == tag_key) => field_keys.push(tag_key.to_string()),
                Some(_) => {},
                None => warnings.push(Warning::UnknownFieldReference {
                    category: name.to_string(),
                    field: reference.to_string(),
                }),
            }
        }

        let mut geometry = Vec::new();
        for value in cell(row, COL_GEOMETRY).split(',').map(|g| g.trim().to_lowercase()).filter(|g| !g.is_empty()) {
            if KNOWN_GEOMETRIES.contains(&value.as_str()) {
                geometry.push(value);
            } else {
                warnings.push(Warning::UnknownGeometry { category: name.to_string(), geometry: value });
            }
        }
        if geometry.is_empty() {
            geometry = default_geometry();
        }

        let color = match cell(row, COL_COLOR) {
            "" => default_color(),
            color => color.to_string(),
        };

        presets.push(Preset {
            icon,
            name: name.to_string(),
            color,
            fields: field_keys,
            geometry,
            sort: (presets.len() + 1) as u32,
            icon_source: Some(cell(row, COL_ICON)).filter(|s| !s.is_empty()).map(str::to_string),
        });
    }
    presets
}

/// Writes presets back as Categories sheet rows, header included.
pub fn presets_to_grid(presets: &[Preset]) -> SheetGrid {
    let mut grid = vec![CATEGORIES_HEADER.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
    for preset in presets {
        grid.push(vec![
            preset.name.clone(),
            preset.icon_source.clone().unwrap_or_default(),
            preset.fields.join(", "),
            preset.color.clone(),
            preset.geometry.join(", "),
            preset.icon.clone(),
        ]);
    }
    grid
}
