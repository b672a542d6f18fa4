// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as TeError;
use tracing::debug;

use super::{SheetGrid, Spreadsheet, Workbook};

#[derive(TeError, Debug)]
pub enum WorkbookError {
    #[error("Workbook directory {0:?} does not exist")]
    DirNotFound(PathBuf),
    #[error("Can not access workbook file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Fail to read or write CSV sheet {0:?} because: {1}")]
    Csv(PathBuf, #[source] csv::Error),
}

impl Workbook {
    /// Loads every `<Sheet Name>.csv` file of `dir` as a sheet.
    pub fn load_dir(dir: &Path) -> Result<Workbook, WorkbookError> {
        if !dir.is_dir() {
            return Err(WorkbookError::DirNotFound(dir.to_path_buf()));
        }
        let mut workbook = Workbook::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_csv = path.extension().map(|e| e.eq_ignore_ascii_case("csv")).unwrap_or(false);
            if !path.is_file() || !is_csv {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let grid = load_csv_sheet(&path)?;
            debug!("Loaded sheet {name:?} with {} rows", grid.len());
            workbook.set_sheet(name, grid);
        }
        Ok(workbook)
    }

    pub fn save_dir(&self, dir: &Path) -> Result<(), WorkbookError> {
        fs::create_dir_all(dir)?;
        for name in self.sheet_names() {
            if let Some(grid) = self.sheet(&name) {
                save_csv_sheet(&dir.join(format!("{name}.csv")), grid)?;
            }
        }
        Ok(())
    }
}

fn load_csv_sheet(path: &Path) -> Result<SheetGrid, WorkbookError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| WorkbookError::Csv(path.to_path_buf(), e))?;
    let mut grid = SheetGrid::new();
    for record in reader.records() {
        let record = record.map_err(|e| WorkbookError::Csv(path.to_path_buf(), e))?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    // Spreadsheet exports often pad the data range with blank rows.
    while grid.last().is_some_and(|row| row.iter().all(|cell| cell.trim().is_empty())) {
        grid.pop();
    }
    Ok(grid)
}

fn save_csv_sheet(path: &Path, grid: &SheetGrid) -> Result<(), WorkbookError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| WorkbookError::Csv(path.to_path_buf(), e))?;
    for row in grid {
        writer.write_record(row).map_err(|e| WorkbookError::Csv(path.to_path_buf(), e))?;
    }
    writer.flush()?;
    Ok(())
}
