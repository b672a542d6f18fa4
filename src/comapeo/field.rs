// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Warning, Warnings};
use crate::workbook::SheetGrid;
use super::slug::slugify;

// Details sheet columns.
const COL_LABEL: usize = 0;
const COL_HELPER_TEXT: usize = 1;
const COL_TYPE: usize = 2;
const COL_OPTIONS: usize = 3;
const COL_ID: usize = 4;
const COL_UNIVERSAL: usize = 5;
const COL_OPTION_VALUES: usize = 6;

pub const DETAILS_HEADER: [&str; 7] = ["Label", "Helper Text", "Type", "Options", "ID", "Universal", "Option Values"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Number,
    #[serde(alias = "select_one")]
    SelectOne,
    #[serde(alias = "select_multiple")]
    SelectMultiple,
}

impl FieldType {
    /// Parses the single-character Details "Type" cell.
    ///
    /// Only the first character counts, case-insensitively. A blank cell means
    /// select one. Returns `None` for an unknown code.
    pub fn from_type_code(cell: &str) -> Option<Self> {
        match cell.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            None | Some('s') => Some(Self::SelectOne),
            Some('t') => Some(Self::Text),
            Some('n') => Some(Self::Number),
            Some('m') => Some(Self::SelectMultiple),
            Some(_) => None,
        }
    }

    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Text => "t",
            Self::Number => "n",
            Self::SelectOne => "s",
            Self::SelectMultiple => "m",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::SelectOne | Self::SelectMultiple)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn from_label(label: &str) -> Self {
        Self::with_value(label, "")
    }

    /// A blank `value` falls back to the slug of `label`.
    pub fn with_value(label: &str, value: &str) -> Self {
        let label = label.trim();
        let value = match value.trim() {
            "" => slugify(label),
            value => value.to_string(),
        };
        SelectOption { label: label.to_string(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(alias = "key")]
    pub tag_key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub universal: bool,
}

impl Field {
    /// Option labels joined the way the Details sheet writes them.
    pub fn joined_option_labels(&self) -> String {
        self.options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// The Option Values cell: empty while every value is the slug of its label.
    pub fn joined_option_values(&self) -> String {
        if self.options.iter().all(|o| o.value == slugify(&o.label)) {
            return String::new();
        }
        self.options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Splits a comma-separated options cell, dropping empty pieces.
///
/// Values pair with the kept labels by position; a missing or blank value
/// is derived from the label.
pub fn parse_options(labels: &str, values: &str) -> Vec<SelectOption> {
    let mut values = values.split(',').map(str::trim);
    labels.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| SelectOption::with_value(label, values.next().unwrap_or_default()))
        .collect()
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|s| s.trim()).unwrap_or("")
}

fn parse_bool_cell(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "x")
}

/// Parses the Details sheet. Row 1 is the header and is skipped.
pub fn parse_fields(grid: &SheetGrid, warnings: &mut Warnings) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut seen = HashSet::new();
    for (index, row) in grid.iter().enumerate().skip(1) {
        let sheet_row = index + 1;
        let label = cell(row, COL_LABEL);
        if label.is_empty() {
            continue;
        }
        let type_cell = cell(row, COL_TYPE);
        let field_type = FieldType::from_type_code(type_cell).unwrap_or_else(|| {
            warnings.push(Warning::UnknownFieldType { row: sheet_row, code: type_cell.to_string() });
            FieldType::SelectOne
        });
        let tag_key = match cell(row, COL_ID) {
            "" => slugify(label),
            id => id.to_string(),
        };
        if !seen.insert(tag_key.clone()) {
            warnings.push(Warning::DuplicateTagKey { row: sheet_row, tag_key: tag_key.clone() });
        }
        let helper_text = Some(cell(row, COL_HELPER_TEXT)).filter(|s| !s.is_empty()).map(str::to_string);
        let options = if field_type.is_select() { parse_options(cell(row, COL_OPTIONS), cell(row, COL_OPTION_VALUES)) } else { Vec::new() };
        fields.push(Field {
            tag_key,
            field_type,
            label: label.to_string(),
            helper_text,
            options,
            universal: parse_bool_cell(cell(row, COL_UNIVERSAL)),
        });
    }
    fields
}

/// Writes fields back as Details sheet rows, header included.
pub fn fields_to_grid(fields: &[Field]) -> SheetGrid {
    let mut grid = vec![DETAILS_HEADER.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
    for field in fields {
        grid.push(vec![
            field.label.clone(),
            field.helper_text.clone().unwrap_or_default(),
            field.field_type.type_code().to_string(),
            field.joined_option_labels(),
            field.tag_key.clone(),
            if field.universal { "TRUE".to_string() } else { String::new() },
            field.joined_option_values(),
        ]);
    }
    grid
}
