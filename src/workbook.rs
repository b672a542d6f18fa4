// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod csv_dir;

use std::collections::BTreeMap;

pub use csv_dir::WorkbookError;

pub type SheetRow = Vec<String>;
pub type SheetGrid = Vec<SheetRow>;

pub const CATEGORIES_SHEET: &str = "Categories";
pub const DETAILS_SHEET: &str = "Details";
pub const CATEGORY_TRANSLATIONS_SHEET: &str = "Category Translations";
pub const DETAIL_LABEL_TRANSLATIONS_SHEET: &str = "Detail Label Translations";
pub const DETAIL_HELPER_TEXT_TRANSLATIONS_SHEET: &str = "Detail Helper Text Translations";
pub const DETAIL_OPTION_TRANSLATIONS_SHEET: &str = "Detail Option Translations";

/// Named sheets of 2-D cell values.
///
/// Rows may be ragged: a missing cell is different from an empty one.
pub trait Spreadsheet {
    fn sheet(&self, name: &str) -> Option<&SheetGrid>;
    fn set_sheet(&mut self, name: &str, grid: SheetGrid);
    fn sheet_names(&self) -> Vec<String>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workbook {
    sheets: BTreeMap<String, SheetGrid>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, grid: SheetGrid) -> Self {
        self.set_sheet(name, grid);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl Spreadsheet for Workbook {
    fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.get(name)
    }

    fn set_sheet(&mut self, name: &str, grid: SheetGrid) {
        self.sheets.insert(name.to_string(), grid);
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }
}

/// Builds a grid from string literals, handy for fixtures.
pub fn grid<R, C>(rows: R) -> SheetGrid
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}
