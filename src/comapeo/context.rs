// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use super::{field::Field, metadata::ProjectMetadata, preset::Preset};
use crate::translation::catalog::{CatalogKey, MessageCatalog};

/// Everything a single build needs besides the sheet contents.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub metadata: ProjectMetadata,
    /// Icon slugs of the categories to include; `None` means all of them.
    pub category_selection: Option<Vec<String>>,
}

impl BuildContext {
    pub fn new(metadata: ProjectMetadata) -> Self {
        BuildContext { metadata, category_selection: None }
    }

    pub fn with_category_selection(mut self, selection: Vec<String>) -> Self {
        self.category_selection = if selection.is_empty() { None } else { Some(selection) };
        self
    }

    pub fn primary_language(&self) -> &str {
        &self.metadata.primary_language
    }

    pub fn is_selected(&self, preset: &Preset) -> bool {
        match &self.category_selection {
            None => true,
            Some(selection) => selection.iter().any(|icon| icon == &preset.icon),
        }
    }

    /// Selected presets, in sheet order.
    pub fn select_presets(&self, presets: &[Preset]) -> Vec<Preset> {
        presets.iter().filter(|p| self.is_selected(p)).cloned().collect()
    }

    /// Fields used by the selected presets plus universal fields, in sheet order.
    pub fn select_fields(&self, selected_presets: &[Preset], fields: &[Field]) -> Vec<Field> {
        if self.category_selection.is_none() {
            return fields.to_vec();
        }
        let used: HashSet<&str> = selected_presets.iter()
            .flat_map(|p| p.fields.iter().map(String::as_str))
            .collect();
        fields.iter()
            .filter(|f| f.universal || used.contains(f.tag_key.as_str()))
            .cloned()
            .collect()
    }

    /// Drops catalog entries of presets and fields left out of the build.
    pub fn select_messages(&self, catalog: &mut MessageCatalog, selected_presets: &[Preset], selected_fields: &[Field]) {
        if self.category_selection.is_none() {
            return;
        }
        let icons: HashSet<&str> = selected_presets.iter().map(|p| p.icon.as_str()).collect();
        let tag_keys: HashSet<&str> = selected_fields.iter().map(|f| f.tag_key.as_str()).collect();
        catalog.retain(|key| match CatalogKey::parse(key) {
            Some(CatalogKey::PresetName { icon }) => icons.contains(icon.as_str()),
            Some(parsed) => parsed.tag_key().is_some_and(|tag_key| tag_keys.contains(tag_key)),
            None => false,
        });
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::comapeo::field::{parse_fields, tests::details_fixture};
    use crate::comapeo::preset::{parse_presets, tests::categories_fixture};
    use crate::diagnostics::Warnings;
    use crate::translation::catalog::{MessageEntry, keys};

    #[test]
    fn tst_category_selection_filters_in_sheet_order() {
        let mut warnings = Warnings::new();
        let fields = parse_fields(&details_fixture(), &mut warnings);
        let presets = parse_presets(&categories_fixture(), &fields, &mut warnings);

        let context = BuildContext::new(ProjectMetadata::with_name("test"));
        assert_eq!(context.select_presets(&presets).len(), 2);
        assert_eq!(context.select_fields(&presets, &fields).len(), 4);

        let context = context.with_category_selection(vec!["trees".to_string()]);
        let selected = context.select_presets(&presets);
        assert_eq!(selected.len(), 1);
        let selected_fields = context.select_fields(&selected, &fields);
        let tag_keys: Vec<&str> = selected_fields.iter().map(|f| f.tag_key.as_str()).collect();
        // notes is universal
        assert_eq!(tag_keys, vec!["species", "diameter", "notes"]);

        let mut catalog = MessageCatalog::default();
        catalog.insert("es", &keys::preset_name("trees"), MessageEntry::text("Árboles", "Name for category 'trees'"));
        catalog.insert("es", &keys::preset_name("water-source"), MessageEntry::text("Fuente de agua", ""));
        catalog.insert("es", &keys::field_label("tree_uses"), MessageEntry::text("Usos", ""));
        catalog.insert("es", &keys::field_option("species", "oak"), MessageEntry::option("Roble", "oak", ""));
        context.select_messages(&mut catalog, &selected, &selected_fields);
        let remaining: Vec<&String> = catalog.messages("es").unwrap().keys().collect();
        assert_eq!(remaining, vec!["fields.species.options.oak", "presets.trees.name"]);
    }

    #[test]
    fn tst_empty_selection_means_everything() {
        let context = BuildContext::new(ProjectMetadata::with_name("test")).with_category_selection(vec![]);
        assert!(context.category_selection.is_none());
    }
}
