// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::comapeo::{Field, Preset};
use crate::diagnostics::{Warning, Warnings};
use crate::language::LanguageCatalog;
use crate::workbook::{self, SheetGrid, SheetRow, Spreadsheet};
use super::TranslationError;
use super::catalog::{MessageCatalog, MessageEntry, descriptions, keys, source_keys};
use super::correlate::{RowCorrelation, correlate_rows};
use super::header::{ColumnMap, build_column_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TranslationSheetKind {
    CategoryName,
    FieldLabel,
    FieldHelperText,
    FieldOption,
}

impl TranslationSheetKind {
    pub const ALL: [TranslationSheetKind; 4] = [
        TranslationSheetKind::CategoryName,
        TranslationSheetKind::FieldLabel,
        TranslationSheetKind::FieldHelperText,
        TranslationSheetKind::FieldOption,
    ];

    pub fn from_sheet_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.sheet_name().eq_ignore_ascii_case(name))
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            TranslationSheetKind::CategoryName => workbook::CATEGORY_TRANSLATIONS_SHEET,
            TranslationSheetKind::FieldLabel => workbook::DETAIL_LABEL_TRANSLATIONS_SHEET,
            TranslationSheetKind::FieldHelperText => workbook::DETAIL_HELPER_TEXT_TRANSLATIONS_SHEET,
            TranslationSheetKind::FieldOption => workbook::DETAIL_OPTION_TRANSLATIONS_SHEET,
        }
    }

    fn handler(&self) -> CellHandler {
        match self {
            TranslationSheetKind::CategoryName => add_category_name,
            TranslationSheetKind::FieldLabel => add_field_label,
            TranslationSheetKind::FieldHelperText => add_field_helper_text,
            TranslationSheetKind::FieldOption => add_field_options,
        }
    }
}

/// A translation sheet as found in the workbook.
#[derive(Debug, Clone)]
pub struct TranslationSheet<'a> {
    pub name: String,
    pub grid: &'a SheetGrid,
}

impl<'a> TranslationSheet<'a> {
    pub fn new(name: &str, grid: &'a SheetGrid) -> Self {
        TranslationSheet { name: name.to_string(), grid }
    }

    /// Every sheet whose name mentions "Translation", known or not.
    pub fn collect(book: &'a impl Spreadsheet) -> Vec<Self> {
        book.sheet_names()
            .into_iter()
            .filter(|name| name.contains("Translation"))
            .filter_map(|name| book.sheet(&name).map(|grid| TranslationSheet { name, grid }))
            .collect()
    }
}

struct CellContext<'a> {
    sheet: &'a str,
    /// 1-based sheet row
    row: usize,
    language: &'a str,
    presets: &'a [Preset],
    fields: &'a [Field],
    entity: usize,
}

type CellHandler = fn(&CellContext<'_>, &str, &mut MessageCatalog, &mut Warnings);

fn add_category_name(ctx: &CellContext<'_>, text: &str, catalog: &mut MessageCatalog, _warnings: &mut Warnings) {
    let icon = &ctx.presets[ctx.entity].icon;
    catalog.insert(ctx.language, &keys::preset_name(icon), MessageEntry::text(text, &descriptions::preset_name(icon)));
}

fn add_field_label(ctx: &CellContext<'_>, text: &str, catalog: &mut MessageCatalog, _warnings: &mut Warnings) {
    let tag_key = &ctx.fields[ctx.entity].tag_key;
    catalog.insert(ctx.language, &keys::field_label(tag_key), MessageEntry::text(text, &descriptions::field_label(tag_key)));
}

fn add_field_helper_text(ctx: &CellContext<'_>, text: &str, catalog: &mut MessageCatalog, _warnings: &mut Warnings) {
    let tag_key = &ctx.fields[ctx.entity].tag_key;
    catalog.insert(
        ctx.language,
        &keys::field_helper_text(tag_key),
        MessageEntry::text(text, &descriptions::field_helper_text(tag_key)),
    );
}

/// Translated option N belongs to source option N, whatever its text says.
fn add_field_options(ctx: &CellContext<'_>, text: &str, catalog: &mut MessageCatalog, warnings: &mut Warnings) {
    let field = &ctx.fields[ctx.entity];
    // empty pieces keep their slot so later labels stay on their own option
    let labels: Vec<&str> = text.split(',').map(str::trim).collect();
    let extra = labels.iter().skip(field.options.len()).filter(|label| !label.is_empty()).count();
    if extra > 0 {
        warnings.push(Warning::ExtraOptions {
            sheet: ctx.sheet.to_string(),
            row: ctx.row,
            tag_key: field.tag_key.clone(),
            language: ctx.language.to_string(),
            translated: field.options.len() + extra,
            available: field.options.len(),
        });
    }
    for (label, option) in labels.into_iter().zip(&field.options).filter(|(label, _)| !label.is_empty()) {
        catalog.insert(
            ctx.language,
            &keys::field_option(&field.tag_key, &option.value),
            MessageEntry::option(label, &option.value, &descriptions::field_option(&field.tag_key, &option.value)),
        );
    }
}

fn correlate(
    sheet: &str,
    kind: TranslationSheetKind,
    rows: &[SheetRow],
    presets: &[Preset],
    fields: &[Field],
    warnings: &mut Warnings,
) -> Vec<RowCorrelation> {
    match kind {
        TranslationSheetKind::CategoryName => correlate_rows(sheet, kind, rows, presets, warnings),
        TranslationSheetKind::FieldLabel
        | TranslationSheetKind::FieldHelperText
        | TranslationSheetKind::FieldOption => correlate_rows(sheet, kind, rows, fields, warnings),
    }
}

fn translated_cells<'r>(row: &'r SheetRow, column_map: &ColumnMap) -> impl Iterator<Item = &'r str> {
    column_map.columns().filter_map(|(column, _)| row.get(column)).map(|cell| cell.trim())
}

fn fold_sheet(
    sheet: &TranslationSheet<'_>,
    kind: TranslationSheetKind,
    column_map: &ColumnMap,
    presets: &[Preset],
    fields: &[Field],
    catalog: &mut MessageCatalog,
    warnings: &mut Warnings,
) {
    let rows = sheet.grid.get(1..).unwrap_or_default();
    let header_width = sheet.grid.first().map(Vec::len).unwrap_or_default();
    let expected_width = column_map.expected_width();
    if !column_map.is_fallback && header_width == expected_width {
        if let Some(row) = rows.iter().find(|row| row.len() > expected_width) {
            warnings.push(Warning::ColumnCountMismatch { sheet: sheet.name.clone(), columns: row.len(), expected: expected_width });
        }
    }

    let handler = kind.handler();
    for correlation in correlate(&sheet.name, kind, rows, presets, fields, warnings) {
        let Some(entity) = correlation.entity else {
            continue;
        };
        let row = &rows[correlation.row];
        let sheet_row = correlation.row + 2;

        if kind == TranslationSheetKind::FieldOption && !fields[entity].field_type.is_select() {
            if translated_cells(row, column_map).any(|cell| !cell.is_empty()) {
                warnings.push(Warning::OptionsOnNonSelectField {
                    sheet: sheet.name.clone(),
                    row: sheet_row,
                    tag_key: fields[entity].tag_key.clone(),
                });
            }
            continue;
        }

        for (column, language) in column_map.columns() {
            let Some(cell) = row.get(column) else {
                warnings.push(Warning::MissingCell {
                    sheet: sheet.name.clone(),
                    row: sheet_row,
                    column,
                    language: language.to_string(),
                });
                continue;
            };
            let text = cell.trim();
            if text.is_empty() {
                continue;
            }
            let ctx = CellContext { sheet: &sheet.name, row: sheet_row, language, presets, fields, entity };
            handler(&ctx, text, catalog, warnings);
        }
    }
}

/// Folds all translation sheets into one message catalog.
///
/// Rows are matched to presets and fields by position. Bad headers, ragged
/// rows and untranslated entries only add to `warnings`; an `Err` means the
/// engine itself failed.
pub fn build_message_catalog(
    sheets: &[TranslationSheet<'_>],
    fields: &[Field],
    presets: &[Preset],
    languages: &LanguageCatalog,
    primary_language: &str,
    warnings: &mut Warnings,
) -> Result<MessageCatalog, TranslationError> {
    let mut catalog = MessageCatalog::new();
    let mut detected = BTreeSet::new();

    for sheet in sheets {
        let Some(kind) = TranslationSheetKind::from_sheet_name(&sheet.name) else {
            warnings.push(Warning::UnknownSheet { sheet: sheet.name.clone() });
            continue;
        };
        let header = sheet.grid.first().map(Vec::as_slice);
        let column_map = build_column_map(&sheet.name, header, languages, primary_language, warnings)?;
        debug!("Sheet {:?} maps columns {:?}", sheet.name, column_map.column_to_language);
        detected.extend(column_map.target_languages.iter().cloned());
        fold_sheet(sheet, kind, &column_map, presets, fields, &mut catalog, warnings);
    }

    let expected = source_keys(presets, fields);
    for language in detected.iter().filter(|language| !language.eq_ignore_ascii_case(primary_language)) {
        let missing = expected.iter().filter(|key| catalog.get(language, key).is_none()).count();
        if missing > 0 {
            warnings.push(Warning::MissingTranslations { language: language.clone(), missing, total: expected.len() });
        }
    }

    info!("Built {} messages in {} languages", catalog.message_count(), catalog.languages().count());
    Ok(catalog)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::comapeo::field::{parse_fields, tests::details_fixture};
    use crate::comapeo::preset::{parse_presets, tests::categories_fixture};
    use crate::translation::catalog::MessageValue;
    use crate::workbook::{Workbook, grid};

    fn entities() -> (Vec<Field>, Vec<Preset>) {
        let mut warnings = Warnings::new();
        let fields = parse_fields(&details_fixture(), &mut warnings);
        let presets = parse_presets(&categories_fixture(), &fields, &mut warnings);
        (fields, presets)
    }

    fn build(sheets: &[(&str, SheetGrid)], fields: &[Field], presets: &[Preset]) -> (MessageCatalog, Vec<Warning>) {
        let sheets: Vec<TranslationSheet> = sheets.iter().map(|(name, grid)| TranslationSheet::new(name, grid)).collect();
        let mut warnings = Warnings::new();
        let catalog = build_message_catalog(&sheets, fields, presets, &LanguageCatalog::new(), "en", &mut warnings).unwrap();
        (catalog, warnings.into_vec())
    }

    #[test]
    fn tst_sheet_kind_from_name() {
        assert_eq!(TranslationSheetKind::from_sheet_name("Category Translations"), Some(TranslationSheetKind::CategoryName));
        assert_eq!(TranslationSheetKind::from_sheet_name(" detail option translations "), Some(TranslationSheetKind::FieldOption));
        assert_eq!(TranslationSheetKind::from_sheet_name("Glossary Translations"), None);
    }

    #[test]
    fn tst_category_name_translation() {
        let mut warnings = Warnings::new();
        let fields = parse_fields(&details_fixture(), &mut warnings);
        let categories = grid([vec!["Name", "Icon", "Fields"], vec!["Trees", "", "species,diameter"]]);
        let presets = parse_presets(&categories, &fields, &mut warnings);

        let sheet = grid([vec!["English", "Español"], vec!["Trees", "Árboles"]]);
        let (catalog, warnings) = build(&[("Category Translations", sheet)], &fields, &presets);

        let entry = catalog.get("es", "presets.trees.name").unwrap();
        assert_eq!(entry.message, MessageValue::Text("Árboles".to_string()));
        assert_eq!(entry.description, "Name for category 'trees'");
        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["es"]);
        // only the category name was translated
        assert!(matches!(warnings.as_slice(), [Warning::MissingTranslations { language, .. }] if language == "es"));
    }

    #[test]
    fn tst_option_translations_zip_by_position() {
        let (fields, presets) = entities();
        let sheet = grid([
            vec!["English", "Español", "Français"],
            vec!["Oak, Pine", "Roble", "Chêne, Pin, Sapin"],
            vec!["", "", ""],
            vec!["", "", ""],
            vec!["Food, Medicine, Building material", "Comida,Medicina", ""],
        ]);
        let (catalog, warnings) = build(&[("Detail Option Translations", sheet)], &fields, &presets);

        assert_eq!(
            catalog.get("es", "fields.species.options.oak").map(|e| &e.message),
            Some(&MessageValue::OptionLabel { label: "Roble".to_string(), value: "oak".to_string() }),
        );
        assert!(catalog.get("es", "fields.species.options.pine").is_none());
        assert_eq!(catalog.label("es", "fields.tree_uses.options.medicine"), Some("Medicina"));
        assert!(catalog.get("es", "fields.tree_uses.options.building-material").is_none());
        assert_eq!(catalog.label("fr", "fields.species.options.pine"), Some("Pin"));
        assert_eq!(catalog.get("fr", "fields.species.options.pine").unwrap().description, "Option 'pine' for field 'species'");

        assert!(warnings.contains(&Warning::ExtraOptions {
            sheet: "Detail Option Translations".to_string(),
            row: 2,
            tag_key: "species".to_string(),
            language: "fr".to_string(),
            translated: 3,
            available: 2,
        }));
    }

    #[test]
    fn tst_option_gap_keeps_positions() {
        let (fields, presets) = entities();
        let sheet = grid([
            vec!["English", "Español"],
            vec!["Oak, Pine", ", Pino, ,"],
            vec!["", ""],
            vec!["", ""],
            vec!["Food, Medicine, Building material", "Comida, , Material de construcción"],
        ]);
        let (catalog, warnings) = build(&[("Detail Option Translations", sheet)], &fields, &presets);

        assert!(catalog.get("es", "fields.species.options.oak").is_none());
        assert_eq!(catalog.label("es", "fields.species.options.pine"), Some("Pino"));
        assert_eq!(catalog.label("es", "fields.tree_uses.options.food"), Some("Comida"));
        assert!(catalog.get("es", "fields.tree_uses.options.medicine").is_none());
        assert_eq!(catalog.label("es", "fields.tree_uses.options.building-material"), Some("Material de construcción"));
        // trailing empty pieces are not extra options
        assert!(!warnings.iter().any(|w| matches!(w, Warning::ExtraOptions { .. })));
    }

    #[test]
    fn tst_options_ignored_for_non_select_fields() {
        let (fields, presets) = entities();
        let sheet = grid([
            vec!["English", "Español"],
            vec!["Oak, Pine", ""],
            vec!["", "uno, dos"],
        ]);
        let (catalog, warnings) = build(&[("Detail Option Translations", sheet)], &fields, &presets);
        assert!(catalog.messages("es").is_none_or(|messages| messages.keys().all(|k| !k.starts_with("fields.diameter"))));
        assert!(warnings.contains(&Warning::OptionsOnNonSelectField {
            sheet: "Detail Option Translations".to_string(),
            row: 3,
            tag_key: "diameter".to_string(),
        }));
    }

    #[test]
    fn tst_fewer_rows_are_processed_positionally() {
        let mut warnings = Warnings::new();
        let mut categories = vec![vec!["Name".to_string()]];
        categories.extend((1..=6).map(|i| vec![format!("Place {i}")]));
        let presets = parse_presets(&categories, &[], &mut warnings);

        let mut sheet = vec![vec!["English".to_string(), "Português - pt".to_string()]];
        sheet.extend((1..=5).map(|i| vec![format!("Place {i}"), format!("Lugar {i}")]));
        let (catalog, warnings) = build(&[("Category Translations", sheet)], &[], &presets);

        assert_eq!(catalog.message_count(), 5);
        for i in 1..=5 {
            assert_eq!(catalog.label("pt", &format!("presets.place-{i}.name")), Some(format!("Lugar {i}").as_str()));
        }
        assert!(catalog.get("pt", "presets.place-6.name").is_none());
        assert_eq!(warnings[0], Warning::RowCountMismatch { sheet: "Category Translations".to_string(), rows: 5, entities: 6 });
        assert_eq!(warnings[1], Warning::MissingTranslations { language: "pt".to_string(), missing: 1, total: 6 });
    }

    #[test]
    fn tst_reordered_rows_keep_positional_assignment() {
        let (fields, presets) = entities();
        let sheet = grid([
            vec!["English", "Español"],
            vec!["Water source", "Fuente de agua"],
            vec!["Trees", "Árboles"],
        ]);
        let (catalog, warnings) = build(&[("Category Translations", sheet)], &fields, &presets);
        assert_eq!(catalog.label("es", "presets.trees.name"), Some("Fuente de agua"));
        assert_eq!(catalog.label("es", "presets.water-source.name"), Some("Árboles"));
        assert_eq!(warnings.iter().filter(|w| matches!(w, Warning::RowMismatch { .. })).count(), 2);
    }

    #[test]
    fn tst_ragged_rows_and_unknown_sheets() {
        let (fields, presets) = entities();
        let labels = grid([
            vec!["English", "Español", "Français"],
            vec!["Species", "Especie"],
            vec!["Diameter", "", "Diamètre"],
        ]);
        let glossary = grid([vec!["English", "Español"], vec!["tree", "árbol"]]);
        let (catalog, warnings) = build(
            &[("Detail Label Translations", labels), ("Glossary Translations", glossary)],
            &fields,
            &presets,
        );
        assert_eq!(catalog.label("es", "fields.species.label"), Some("Especie"));
        assert_eq!(catalog.label("fr", "fields.diameter.label"), Some("Diamètre"));
        assert!(catalog.get("es", "fields.diameter.label").is_none());
        assert_eq!(catalog.get("fr", "fields.diameter.label").unwrap().description, "Label for field 'diameter'");
        assert!(warnings.contains(&Warning::MissingCell {
            sheet: "Detail Label Translations".to_string(),
            row: 2,
            column: 2,
            language: "fr".to_string(),
        }));
        assert!(warnings.contains(&Warning::UnknownSheet { sheet: "Glossary Translations".to_string() }));
    }

    #[test]
    fn tst_headerless_sheet_uses_primary_language() {
        let (fields, presets) = entities();
        let (catalog, warnings) = build(&[("Detail Helper Text Translations", vec![])], &fields, &presets);
        assert!(catalog.is_empty());
        assert!(matches!(&warnings[0], Warning::MissingHeader { language, .. } if language == "en"));
        assert!(matches!(&warnings[1], Warning::RowCountMismatch { rows: 0, entities: 4, .. }));
    }

    #[test]
    fn tst_collect_translation_sheets() {
        let book = Workbook::new()
            .with_sheet("Categories", categories_fixture())
            .with_sheet("Category Translations", grid([vec!["English", "es"]]))
            .with_sheet("Detail Label Translations", grid([vec!["English", "es"]]));
        let names: Vec<String> = TranslationSheet::collect(&book).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Category Translations", "Detail Label Translations"]);
    }
}
