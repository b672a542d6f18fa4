// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::comapeo::{Field, FieldType, SelectOption};
use crate::project::Project;
use crate::translation::MessageCatalog;
use crate::translation::catalog::CatalogKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMetadata {
    pub name: String,
    pub version: String,
    pub primary_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub fields: Vec<String>,
    pub geometry: Vec<String>,
    pub sort: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadField {
    pub id: String,
    pub tag_key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub universal: bool,
}

impl From<&Field> for PayloadField {
    fn from(field: &Field) -> Self {
        PayloadField {
            id: field.tag_key.clone(),
            tag_key: field.tag_key.clone(),
            field_type: field.field_type,
            name: field.label.clone(),
            helper_text: field.helper_text.clone(),
            options: field.options.clone(),
            universal: field.universal,
        }
    }
}

/// An icon is sent either inline or as a URL the build service fetches itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadIcon {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTranslation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// option value -> translated label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleTranslations {
    pub categories: BTreeMap<String, CategoryTranslation>,
    pub fields: BTreeMap<String, FieldTranslation>,
}

/// Request body of `POST /build`.
///
/// `categories` and `fields` keep sheet order, the build service relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPayload {
    pub metadata: PayloadMetadata,
    pub categories: Vec<PayloadCategory>,
    pub fields: Vec<PayloadField>,
    pub icons: Vec<PayloadIcon>,
    pub translations: BTreeMap<String, LocaleTranslations>,
}

impl BuildPayload {
    pub fn new(project: &Project, icons: Vec<PayloadIcon>) -> Self {
        let metadata = &project.metadata;
        BuildPayload {
            metadata: PayloadMetadata {
                name: metadata.name.clone(),
                version: metadata.version.clone(),
                primary_language: metadata.primary_language.clone(),
                description: metadata.description.clone(),
            },
            categories: project.presets.iter().map(|preset| PayloadCategory {
                id: preset.icon.clone(),
                name: preset.name.clone(),
                icon: preset.icon.clone(),
                color: preset.color.clone(),
                fields: preset.fields.clone(),
                geometry: preset.geometry.clone(),
                sort: preset.sort,
            }).collect(),
            fields: project.fields.iter().map(PayloadField::from).collect(),
            icons,
            translations: translations_from_catalog(&project.messages),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

fn translations_from_catalog(catalog: &MessageCatalog) -> BTreeMap<String, LocaleTranslations> {
    let mut translations = BTreeMap::new();
    for (language, messages) in catalog.iter() {
        let locale: &mut LocaleTranslations = translations.entry(language.to_string()).or_default();
        for (key, entry) in messages {
            let label = entry.message.label().to_string();
            match CatalogKey::parse(key) {
                Some(CatalogKey::PresetName { icon }) => {
                    locale.categories.insert(icon, CategoryTranslation { name: label });
                },
                Some(CatalogKey::FieldLabel { tag_key }) => {
                    locale.fields.entry(tag_key).or_default().name = Some(label);
                },
                Some(CatalogKey::FieldHelperText { tag_key }) => {
                    locale.fields.entry(tag_key).or_default().helper_text = Some(label);
                },
                Some(CatalogKey::FieldOption { tag_key, value }) => {
                    locale.fields.entry(tag_key).or_default().options.insert(value, label);
                },
                None => {},
            }
        }
    }
    translations
}
