// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use serde::Deserialize;
use serde_json::Value;

use crate::comapeo::preset::DEFAULT_COLOR;
use crate::comapeo::{Field, FieldType, Preset, ProjectMetadata, SelectOption, slugify};
use crate::translation::MessageCatalog;
use crate::translation::catalog::{MessageEntry, descriptions, keys};
use super::{ImportError, ImportedConfig};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, alias = "primary_language")]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DocumentMetadata {
    fn into_metadata(self, fallback_name: &str) -> ProjectMetadata {
        let mut metadata = ProjectMetadata::with_name(self.name.as_deref().unwrap_or(fallback_name));
        if let Some(version) = self.version {
            metadata.version = version;
        }
        if let Some(primary_language) = self.primary_language {
            metadata.primary_language = primary_language;
        }
        metadata.description = self.description;
        metadata
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoMapeoPreset {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub geometry: Vec<String>,
}

/// Current format: entity arrays plus a `messages` catalog keyed by language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoMapeoDocument {
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default)]
    pub presets: Vec<CoMapeoPreset>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub messages: MessageCatalog,
    /// icon id -> svg markup
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyOption {
    Label(String),
    Pair { label: String, value: Value },
}

impl LegacyOption {
    fn to_select_option(&self) -> SelectOption {
        match self {
            LegacyOption::Label(label) => SelectOption::from_label(label),
            LegacyOption::Pair { label, value } => SelectOption {
                label: label.clone(),
                value: match value {
                    Value::String(value) => value.clone(),
                    other => other.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyField {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, alias = "helper_text")]
    pub helper_text: Option<String>,
    #[serde(default)]
    pub options: Vec<LegacyOption>,
    #[serde(default)]
    pub universal: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyPreset {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub geometry: Vec<String>,
    #[serde(default)]
    pub sort: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyPresetTranslation {
    #[serde(default)]
    pub name: Option<String>,
}

/// Option translations are either keyed by value or listed in option order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyOptionTranslations {
    ByValue(BTreeMap<String, String>),
    Positional(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFieldTranslation {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, alias = "helper_text")]
    pub helper_text: Option<String>,
    #[serde(default)]
    pub options: Option<LegacyOptionTranslations>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyLanguageTranslations {
    #[serde(default)]
    pub presets: BTreeMap<String, LegacyPresetTranslation>,
    #[serde(default)]
    pub fields: BTreeMap<String, LegacyFieldTranslation>,
}

/// Mapeo settings format: entities in objects keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyDocument {
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default)]
    pub presets: BTreeMap<String, LegacyPreset>,
    #[serde(default)]
    pub fields: BTreeMap<String, LegacyField>,
    #[serde(default)]
    pub translations: BTreeMap<String, LegacyLanguageTranslations>,
}

/// A configuration document in one of the recognized schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigDocument {
    CoMapeo(CoMapeoDocument),
    MapeoLegacy(LegacyDocument),
}

fn legacy_field_type(type_name: Option<&str>) -> FieldType {
    match type_name.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("number") => FieldType::Number,
        Some("select_one" | "selectone" | "select") => FieldType::SelectOne,
        Some("select_multiple" | "selectmultiple" | "multiselect") => FieldType::SelectMultiple,
        _ => FieldType::Text,
    }
}

fn or_default_geometry(geometry: Vec<String>) -> Vec<String> {
    if geometry.is_empty() { vec!["point".to_string()] } else { geometry }
}

/// Looks up the svg of a preset under any of its names.
fn icon_for<'a>(icons: &'a BTreeMap<String, String>, names: &[Option<&str>]) -> Option<&'a String> {
    names.iter().flatten().find_map(|name| icons.get(*name))
}

impl ConfigDocument {
    /// Tells the schemas apart by the shape of `presets`.
    pub fn from_value(path: &Path, value: Value) -> Result<Self, ImportError> {
        let parse_error = |err: serde_json::Error| ImportError::Json(path.to_path_buf(), err);
        let is_legacy = match value.get("presets") {
            Some(Value::Object(_)) => true,
            Some(Value::Array(_)) => false,
            None if value.get("fields").is_some_and(Value::is_array) || value.get("messages").is_some() => false,
            _ => return Err(ImportError::UnrecognizedDocument(path.to_path_buf())),
        };
        if is_legacy {
            serde_json::from_value(value).map(ConfigDocument::MapeoLegacy).map_err(parse_error)
        } else {
            serde_json::from_value(value).map(ConfigDocument::CoMapeo).map_err(parse_error)
        }
    }

    pub fn from_str(path: &Path, content: &str) -> Result<Self, ImportError> {
        let value = serde_json::from_str::<Value>(content).map_err(|err| ImportError::Json(path.to_path_buf(), err))?;
        Self::from_value(path, value)
    }

    /// Converts either schema into workbook entities.
    ///
    /// `icon_files` holds icons found next to the document, by icon id; icons
    /// embedded in the document take precedence.
    pub fn normalize(self, fallback_name: &str, icon_files: &BTreeMap<String, String>) -> ImportedConfig {
        match self {
            ConfigDocument::CoMapeo(document) => normalize_comapeo(document, fallback_name, icon_files),
            ConfigDocument::MapeoLegacy(document) => normalize_legacy(document, fallback_name, icon_files),
        }
    }
}

fn normalize_comapeo(document: CoMapeoDocument, fallback_name: &str, icon_files: &BTreeMap<String, String>) -> ImportedConfig {
    let mut icons = Vec::new();
    let mut presets = Vec::with_capacity(document.presets.len());
    for (index, preset) in document.presets.into_iter().enumerate() {
        let icon = preset.id.clone()
            .or_else(|| preset.icon.clone())
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| slugify(&preset.name));
        let names = [preset.icon.as_deref(), preset.id.as_deref(), Some(icon.as_str())];
        let svg = icon_for(&document.icons, &names).or_else(|| icon_for(icon_files, &names));
        let icon_source = match svg {
            Some(svg) => {
                icons.push((icon.clone(), svg.clone()));
                Some(format!("{icon}.svg"))
            },
            None => preset.icon.clone(),
        };
        presets.push(Preset {
            icon,
            name: preset.name,
            color: preset.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            fields: preset.fields,
            geometry: or_default_geometry(preset.geometry),
            sort: (index + 1) as u32,
            icon_source,
        });
    }
    ImportedConfig {
        metadata: document.metadata.unwrap_or_default().into_metadata(fallback_name),
        presets,
        fields: document.fields,
        messages: document.messages,
        icons,
    }
}

fn normalize_legacy(document: LegacyDocument, fallback_name: &str, icon_files: &BTreeMap<String, String>) -> ImportedConfig {
    let mut tag_keys = HashMap::new();
    let mut fields = Vec::with_capacity(document.fields.len());
    for (id, field) in &document.fields {
        let tag_key = field.key.clone().filter(|k| !k.trim().is_empty()).unwrap_or_else(|| id.clone());
        let field_type = legacy_field_type(field.field_type.as_deref());
        tag_keys.insert(id.as_str(), tag_key.clone());
        fields.push(Field {
            label: field.label.clone().unwrap_or_else(|| tag_key.clone()),
            tag_key,
            field_type,
            helper_text: field.helper_text.clone().or_else(|| field.placeholder.clone()),
            options: if field_type.is_select() { field.options.iter().map(LegacyOption::to_select_option).collect() } else { Vec::new() },
            universal: field.universal,
        });
    }

    // Mapeo orders presets by `sort`, ties (and missing values) by id.
    let mut ordered: Vec<(&String, &LegacyPreset)> = document.presets.iter().collect();
    ordered.sort_by_key(|(id, preset)| (preset.sort.unwrap_or(u32::MAX), (*id).clone()));

    let mut icons = Vec::new();
    let mut presets = Vec::with_capacity(ordered.len());
    for (index, (id, preset)) in ordered.into_iter().enumerate() {
        let names = [preset.icon.as_deref(), Some(id.as_str())];
        let icon_source = match icon_for(icon_files, &names) {
            Some(svg) => {
                icons.push((id.clone(), svg.clone()));
                Some(format!("{id}.svg"))
            },
            None => preset.icon.clone(),
        };
        presets.push(Preset {
            icon: id.clone(),
            name: preset.name.clone(),
            color: preset.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            fields: preset.fields.iter()
                .map(|field_id| tag_keys.get(field_id.as_str()).cloned().unwrap_or_else(|| field_id.clone()))
                .collect(),
            geometry: or_default_geometry(preset.geometry.clone()),
            sort: (index + 1) as u32,
            icon_source,
        });
    }

    let mut messages = MessageCatalog::new();
    for (language, translations) in &document.translations {
        for (id, preset) in &translations.presets {
            if let Some(name) = preset.name.as_deref().filter(|n| !n.is_empty()) {
                messages.insert(language, &keys::preset_name(id), MessageEntry::text(name, &descriptions::preset_name(id)));
            }
        }
        for (id, translation) in &translations.fields {
            let tag_key = tag_keys.get(id.as_str()).cloned().unwrap_or_else(|| id.clone());
            if let Some(label) = translation.label.as_deref().filter(|l| !l.is_empty()) {
                messages.insert(language, &keys::field_label(&tag_key), MessageEntry::text(label, &descriptions::field_label(&tag_key)));
            }
            if let Some(helper_text) = translation.helper_text.as_deref().or(translation.placeholder.as_deref()).filter(|h| !h.is_empty()) {
                messages.insert(
                    language,
                    &keys::field_helper_text(&tag_key),
                    MessageEntry::text(helper_text, &descriptions::field_helper_text(&tag_key)),
                );
            }
            let source_options = fields.iter().find(|f| f.tag_key == tag_key).map(|f| f.options.as_slice()).unwrap_or_default();
            let pairs: Vec<(String, &str)> = match &translation.options {
                Some(LegacyOptionTranslations::ByValue(by_value)) => {
                    by_value.iter().map(|(value, label)| (value.clone(), label.as_str())).collect()
                },
                Some(LegacyOptionTranslations::Positional(labels)) => {
                    source_options.iter().zip(labels).map(|(option, label)| (option.value.clone(), label.as_str())).collect()
                },
                None => Vec::new(),
            };
            for (value, label) in pairs.into_iter().filter(|(_, label)| !label.is_empty()) {
                messages.insert(
                    language,
                    &keys::field_option(&tag_key, &value),
                    MessageEntry::option(label, &value, &descriptions::field_option(&tag_key, &value)),
                );
            }
        }
    }

    ImportedConfig {
        metadata: document.metadata.unwrap_or_default().into_metadata(fallback_name),
        presets,
        fields,
        messages,
        icons,
    }
}
