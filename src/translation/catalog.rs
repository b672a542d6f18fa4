// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

use crate::comapeo::{Field, Preset};

/// Catalog key builders.
///
/// Keys are dotted paths such as `fields.species.options.oak`.
pub mod keys {
    pub fn preset_name(icon: &str) -> String {
        format!("presets.{icon}.name")
    }

    pub fn field_label(tag_key: &str) -> String {
        format!("fields.{tag_key}.label")
    }

    pub fn field_helper_text(tag_key: &str) -> String {
        format!("fields.{tag_key}.helperText")
    }

    pub fn field_option(tag_key: &str, value: &str) -> String {
        format!("fields.{tag_key}.options.{value}")
    }
}

/// Translator-facing descriptions stored next to each message.
pub mod descriptions {
    pub fn preset_name(icon: &str) -> String {
        format!("Name for category '{icon}'")
    }

    pub fn field_label(tag_key: &str) -> String {
        format!("Label for field '{tag_key}'")
    }

    pub fn field_helper_text(tag_key: &str) -> String {
        format!("Helper text for field '{tag_key}'")
    }

    pub fn field_option(tag_key: &str, value: &str) -> String {
        format!("Option '{value}' for field '{tag_key}'")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogKey {
    PresetName { icon: String },
    FieldLabel { tag_key: String },
    FieldHelperText { tag_key: String },
    FieldOption { tag_key: String, value: String },
}

impl CatalogKey {
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(rest) = key.strip_prefix("presets.") {
            let icon = rest.strip_suffix(".name")?;
            return (!icon.is_empty()).then(|| CatalogKey::PresetName { icon: icon.to_string() });
        }
        let rest = key.strip_prefix("fields.")?;
        if let Some((tag_key, value)) = rest.split_once(".options.") {
            if tag_key.is_empty() || value.is_empty() {
                return None;
            }
            return Some(CatalogKey::FieldOption { tag_key: tag_key.to_string(), value: value.to_string() });
        }
        if let Some(tag_key) = rest.strip_suffix(".label").filter(|t| !t.is_empty()) {
            return Some(CatalogKey::FieldLabel { tag_key: tag_key.to_string() });
        }
        if let Some(tag_key) = rest.strip_suffix(".helperText").filter(|t| !t.is_empty()) {
            return Some(CatalogKey::FieldHelperText { tag_key: tag_key.to_string() });
        }
        None
    }

    pub fn tag_key(&self) -> Option<&str> {
        match self {
            CatalogKey::PresetName { .. } => None,
            CatalogKey::FieldLabel { tag_key }
            | CatalogKey::FieldHelperText { tag_key }
            | CatalogKey::FieldOption { tag_key, .. } => Some(tag_key.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Text(String),
    OptionLabel { label: String, value: String },
}

impl MessageValue {
    /// The translated text, whichever shape the message has.
    pub fn label(&self) -> &str {
        match self {
            MessageValue::Text(text) => text,
            MessageValue::OptionLabel { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub message: MessageValue,
    #[serde(default)]
    pub description: String,
}

impl MessageEntry {
    pub fn text(message: &str, description: &str) -> Self {
        MessageEntry { message: MessageValue::Text(message.to_string()), description: description.to_string() }
    }

    pub fn option(label: &str, value: &str, description: &str) -> Self {
        MessageEntry {
            message: MessageValue::OptionLabel { label: label.to_string(), value: value.to_string() },
            description: description.to_string(),
        }
    }
}

pub type LanguageMessages = BTreeMap<String, MessageEntry>;

/// Translated strings per language code, then per catalog key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    languages: BTreeMap<String, LanguageMessages>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, key: &str, entry: MessageEntry) {
        self.languages.entry(language.to_string()).or_default().insert(key.to_string(), entry);
    }

    /// Adds every message of `language`, replacing existing keys.
    pub fn extend_language(&mut self, language: &str, messages: LanguageMessages) {
        self.languages.entry(language.to_string()).or_default().extend(messages);
    }

    pub fn get(&self, language: &str, key: &str) -> Option<&MessageEntry> {
        self.languages.get(language)?.get(key)
    }

    /// Translated text of `key`, ignoring empty messages.
    pub fn label(&self, language: &str, key: &str) -> Option<&str> {
        self.get(language, key).map(|entry| entry.message.label()).filter(|label| !label.is_empty())
    }

    pub fn messages(&self, language: &str) -> Option<&LanguageMessages> {
        self.languages.get(language)
    }

    /// Language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageMessages)> {
        self.languages.iter().map(|(language, messages)| (language.as_str(), messages))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(BTreeMap::is_empty)
    }

    pub fn message_count(&self) -> usize {
        self.languages.values().map(BTreeMap::len).sum()
    }

    /// Keeps only the keys accepted by `keep`, dropping languages left empty.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        for messages in self.languages.values_mut() {
            messages.retain(|key, _| keep(key));
        }
        self.languages.retain(|_, messages| !messages.is_empty());
    }
}

/// Every key a complete translation of these entities would contain.
pub fn source_keys(presets: &[Preset], fields: &[Field]) -> BTreeSet<String> {
    let mut keys_set = BTreeSet::new();
    for preset in presets {
        keys_set.insert(keys::preset_name(&preset.icon));
    }
    for field in fields {
        keys_set.insert(keys::field_label(&field.tag_key));
        if field.helper_text.as_deref().is_some_and(|h| !h.trim().is_empty()) {
            keys_set.insert(keys::field_helper_text(&field.tag_key));
        }
        if field.field_type.is_select() {
            for option in &field.options {
                keys_set.insert(keys::field_option(&field.tag_key, &option.value));
            }
        }
    }
    keys_set
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn tst_parse_catalog_keys() {
        assert_eq!(CatalogKey::parse("presets.trees.name"), Some(CatalogKey::PresetName { icon: "trees".to_string() }));
        assert_eq!(CatalogKey::parse("fields.species.label"), Some(CatalogKey::FieldLabel { tag_key: "species".to_string() }));
        assert_eq!(CatalogKey::parse("fields.species.helperText"), Some(CatalogKey::FieldHelperText { tag_key: "species".to_string() }));
        assert_eq!(
            CatalogKey::parse("fields.tree_uses.options.building-material"),
            Some(CatalogKey::FieldOption { tag_key: "tree_uses".to_string(), value: "building-material".to_string() }),
        );
        assert_eq!(CatalogKey::parse("presets.trees.terms"), None);
        assert_eq!(CatalogKey::parse("fields..label"), None);
        assert_eq!(CatalogKey::parse("other.key"), None);
    }

    #[test]
    fn tst_catalog_json_shape() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("es", &keys::preset_name("trees"), MessageEntry::text("Árboles", "Name for category 'trees'"));
        catalog.insert("es", &keys::field_option("species", "oak"), MessageEntry::option("Roble", "oak", "Option for field 'species'"));
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["es"]["presets.trees.name"]["message"], "Árboles");
        assert_eq!(json["es"]["fields.species.options.oak"]["message"]["label"], "Roble");
        assert_eq!(json["es"]["fields.species.options.oak"]["message"]["value"], "oak");

        let parsed: MessageCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, catalog);
        assert_eq!(parsed.label("es", "fields.species.options.oak"), Some("Roble"));
        assert_eq!(parsed.label("fr", "presets.trees.name"), None);
    }

    #[test]
    fn tst_retain_drops_empty_languages() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("es", "presets.trees.name", MessageEntry::text("Árboles", ""));
        catalog.insert("pt", "presets.rivers.name", MessageEntry::text("Rios", ""));
        catalog.retain(|key| key.contains("trees"));
        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["es"]);
        assert_eq!(catalog.message_count(), 1);
    }
}
