// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use thiserror::Error as TeError;

use crate::bundle::{ImportError, read_bundle, save_import};
use crate::diagnostics::Warnings;
use crate::language::LanguageCatalog;
use crate::workbook::CATEGORIES_SHEET;

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Workbook {0:?} already has a Categories sheet, pass --force to overwrite it")]
    WorkbookExists(PathBuf),
    #[error("Fail to read bundle {0:?} because: {1}")]
    ReadBundle(PathBuf, #[source] ImportError),
    #[error("Fail to write workbook {0:?} because: {1}")]
    WriteWorkbook(PathBuf, #[source] ImportError),
}

pub fn subcmd_import(bundle: &Path, workbook_dir: &Path, force: bool) -> Result<(), CmdError> {
    if !force && workbook_dir.join(format!("{CATEGORIES_SHEET}.csv")).exists() {
        return Err(CmdError::WorkbookExists(workbook_dir.to_path_buf()));
    }
    let mut warnings = Warnings::new();
    let imported = read_bundle(bundle, &mut warnings)
        .map_err(|e| CmdError::ReadBundle(bundle.to_path_buf(), e))?;
    save_import(&imported, workbook_dir, &LanguageCatalog::new(), &mut warnings)
        .map_err(|e| CmdError::WriteWorkbook(workbook_dir.to_path_buf(), e))?;

    println!(
        "Imported {} categories, {} fields and {} icons into: {}",
        imported.presets.len(), imported.fields.len(), imported.icons.len(), workbook_dir.display(),
    );
    if !warnings.is_empty() {
        println!("Finished with {} warnings, see the log above.", warnings.len());
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::fs;
    use crate::bundle::document::tests::TEST_COMAPEO_DOCUMENT;

    #[test]
    fn tst_import_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("forest.json");
        fs::write(&bundle, TEST_COMAPEO_DOCUMENT).unwrap();
        let workbook_dir = dir.path().join("workbook");

        subcmd_import(&bundle, &workbook_dir, false).unwrap();
        assert!(workbook_dir.join("Categories.csv").is_file());
        assert!(workbook_dir.join("icons/trees.svg").is_file());
        assert!(workbook_dir.join("metadata.yaml").is_file());

        let result = subcmd_import(&bundle, &workbook_dir, false);
        assert!(matches!(result, Err(CmdError::WorkbookExists(_))));
        subcmd_import(&bundle, &workbook_dir, true).unwrap();
    }

    #[test]
    fn tst_import_reports_bundle_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = subcmd_import(&dir.path().join("forest.comapeocat"), dir.path(), false);
        assert!(matches!(result, Err(CmdError::ReadBundle(_, ImportError::NotFound(_)))));
    }
}
