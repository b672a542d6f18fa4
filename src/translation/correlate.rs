// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::comapeo::{Field, Preset};
use crate::diagnostics::{Warning, Warnings};
use crate::workbook::SheetRow;
use super::builder::TranslationSheetKind;

/// Trims, lowercases and collapses inner whitespace.
pub fn normalize_comparison_key(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Comparison key of a comma-separated option list, insensitive to spacing.
fn normalize_option_list(value: &str) -> String {
    value.split(',')
        .map(normalize_comparison_key)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

fn comparison_key(kind: TranslationSheetKind, value: &str) -> String {
    match kind {
        TranslationSheetKind::FieldOption => normalize_option_list(value),
        _ => normalize_comparison_key(value),
    }
}

/// A source entity that translation rows can be lined up against.
pub trait CorrelationTarget {
    /// Human-readable name used in diagnostics.
    fn display_name(&self) -> &str;
    /// Text column A of a translation sheet of `kind` should hold for this entity.
    fn source_text(&self, kind: TranslationSheetKind) -> String;
    /// Stable slug that a sheet author may also have typed in column A.
    fn stable_key(&self) -> &str;
}

impl CorrelationTarget for Preset {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn source_text(&self, _kind: TranslationSheetKind) -> String {
        self.name.clone()
    }

    fn stable_key(&self) -> &str {
        &self.icon
    }
}

impl CorrelationTarget for Field {
    fn display_name(&self) -> &str {
        &self.label
    }

    fn source_text(&self, kind: TranslationSheetKind) -> String {
        match kind {
            TranslationSheetKind::FieldHelperText => self.helper_text.clone().unwrap_or_default(),
            TranslationSheetKind::FieldOption => self.joined_option_labels(),
            TranslationSheetKind::CategoryName | TranslationSheetKind::FieldLabel => self.label.clone(),
        }
    }

    fn stable_key(&self) -> &str {
        &self.tag_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCorrelation {
    /// Index into the data rows (header excluded).
    pub row: usize,
    /// Index into the entity list; always equal to `row` when present.
    pub entity: Option<usize>,
    /// Entity the content lookup points at, when it disagrees with the position.
    pub suggested: Option<usize>,
    pub mismatch: bool,
}

/// Lines translation rows up with source entities by position.
///
/// Row `i` always belongs to entity `i`. Column A is compared with the
/// entity's source text only to report rows that look out of order; the
/// comparison never changes which entity a row is assigned to.
pub fn correlate_rows<T: CorrelationTarget>(
    sheet: &str,
    kind: TranslationSheetKind,
    rows: &[SheetRow],
    entities: &[T],
    warnings: &mut Warnings,
) -> Vec<RowCorrelation> {
    if rows.len() != entities.len() {
        warnings.push(Warning::RowCountMismatch { sheet: sheet.to_string(), rows: rows.len(), entities: entities.len() });
    }

    let mut lookup = HashMap::<String, usize>::new();
    for (index, entity) in entities.iter().enumerate() {
        for key in [comparison_key(kind, &entity.source_text(kind)), normalize_comparison_key(entity.stable_key())] {
            if !key.is_empty() {
                lookup.entry(key).or_insert(index);
            }
        }
    }

    let mut correlations = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        let Some(entity) = entities.get(row_index) else {
            warnings.push(Warning::UncorrelatedRow { sheet: sheet.to_string(), row: row_index + 2 });
            correlations.push(RowCorrelation { row: row_index, entity: None, suggested: None, mismatch: false });
            continue;
        };

        let found = row.first().map(|s| s.trim()).unwrap_or("");
        let found_key = comparison_key(kind, found);
        let expected = entity.source_text(kind);
        let matches_position = found_key.is_empty()
            || found_key == comparison_key(kind, &expected)
            || found_key == normalize_comparison_key(entity.stable_key());

        let mut correlation = RowCorrelation { row: row_index, entity: Some(row_index), suggested: None, mismatch: false };
        if !matches_position {
            correlation.mismatch = true;
            correlation.suggested = lookup.get(&found_key).copied().filter(|&index| index != row_index);
            warnings.push(Warning::RowMismatch {
                sheet: sheet.to_string(),
                row: row_index + 2,
                expected: format!("{} ({expected})", entity.display_name()),
                found: found.to_string(),
                suggested: correlation.suggested.map(|index| entities[index].display_name().to_string()),
            });
        }
        correlations.push(correlation);
    }
    correlations
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::comapeo::field::{parse_fields, tests::details_fixture};
    use crate::workbook::grid;

    fn preset(name: &str, icon: &str) -> Preset {
        Preset {
            icon: icon.to_string(),
            name: name.to_string(),
            color: "#000000".to_string(),
            fields: vec![],
            geometry: vec!["point".to_string()],
            sort: 0,
            icon_source: None,
        }
    }

    #[test]
    fn tst_position_wins_over_content() {
        let presets = vec![preset("Trees", "trees"), preset("River", "river"), preset("Camp", "camp")];
        let rows = grid([vec!["River", "Río"], vec!["Trees", "Árboles"], vec!["camp", "Campamento"]]);
        let mut warnings = Warnings::new();
        let correlations = correlate_rows("Category Translations", TranslationSheetKind::CategoryName, &rows, &presets, &mut warnings);

        let entities: Vec<Option<usize>> = correlations.iter().map(|c| c.entity).collect();
        assert_eq!(entities, vec![Some(0), Some(1), Some(2)]);
        assert!(correlations[0].mismatch);
        assert_eq!(correlations[0].suggested, Some(1));
        assert_eq!(correlations[1].suggested, Some(0));
        assert!(!correlations[2].mismatch);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(&warnings.iter().next(), Some(Warning::RowMismatch { row: 2, suggested: Some(name), .. }) if name == "River"));
    }

    #[test]
    fn tst_stable_key_in_column_a_is_accepted() {
        let presets = vec![preset("Water source", "water-source")];
        let rows = grid([vec!["water-source", "Fuente"]]);
        let mut warnings = Warnings::new();
        let correlations = correlate_rows("Category Translations", TranslationSheetKind::CategoryName, &rows, &presets, &mut warnings);
        assert!(!correlations[0].mismatch);
        assert!(warnings.is_empty());
    }

    #[test]
    fn tst_row_count_mismatch_is_reported() {
        let presets: Vec<Preset> = (0..6).map(|i| preset(&format!("Place {i}"), &format!("place-{i}"))).collect();
        let rows: Vec<SheetRow> = (0..5).map(|i| vec![format!("Place {i}"), format!("Lugar {i}")]).collect();
        let mut warnings = Warnings::new();
        let correlations = correlate_rows("Category Translations", TranslationSheetKind::CategoryName, &rows, &presets, &mut warnings);
        assert_eq!(correlations.len(), 5);
        assert!(correlations.iter().enumerate().all(|(i, c)| c.entity == Some(i) && !c.mismatch));
        assert_eq!(warnings.into_vec(), vec![
            Warning::RowCountMismatch { sheet: "Category Translations".to_string(), rows: 5, entities: 6 },
        ]);

        let rows: Vec<SheetRow> = (0..7).map(|i| vec![format!("Place {i}")]).collect();
        let mut warnings = Warnings::new();
        let correlations = correlate_rows("Category Translations", TranslationSheetKind::CategoryName, &rows, &presets, &mut warnings);
        assert_eq!(correlations[6].entity, None);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn tst_option_rows_compare_lists() {
        let mut warnings = Warnings::new();
        let fields = parse_fields(&details_fixture(), &mut warnings);
        let rows = grid([vec!["oak ,  PINE"], vec![""], vec![""], vec!["Food,Medicine,Building material"]]);
        let correlations = correlate_rows("Detail Option Translations", TranslationSheetKind::FieldOption, &rows, &fields, &mut warnings);
        assert!(correlations.iter().all(|c| !c.mismatch));
        assert!(warnings.is_empty());
    }
}
