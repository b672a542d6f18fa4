// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::comapeo::Field;
use crate::diagnostics::{Warning, Warnings};
use crate::translation::catalog::LanguageMessages;
use super::document::CoMapeoPreset;
use super::sprite::{insert_icon, split_sprite};
use super::{ConfigDocument, ImportError, ImportedConfig};

const LEGACY_PRESETS_FILE: &str = "presets.json";
const LEGACY_TRANSLATIONS_FILE: &str = "translations.json";
const LEGACY_SPRITE_FILE: &str = "icons.svg";
const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// An extracted bundle.
    Directory,
    /// A single configuration document.
    Json,
    /// Mapeo `.mapeosettings` (TAR).
    MapeoSettings,
    /// CoMapeo `.comapeocat` (ZIP).
    ComapeoCat,
}

impl BundleKind {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        if path.is_dir() {
            return Ok(Self::Directory);
        }
        let ext = path.extension().map(|e| e.to_ascii_lowercase());
        match ext.as_ref().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("mapeosettings") | Some("tar") => Ok(Self::MapeoSettings),
            Some("comapeocat") | Some("zip") => Ok(Self::ComapeoCat),
            Some(s) => Err(ImportError::UnknownExtension(s.to_string())),
            None => Err(ImportError::UnknownExtension(String::new())),
        }
    }
}

/// Reads a JSON file, reporting instead of failing when it is broken.
fn read_json(path: &Path, warnings: &mut Warnings) -> Option<Value> {
    if !path.is_file() {
        return None;
    }
    let parsed = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|content| serde_json::from_str::<Value>(&content).map_err(|err| err.to_string()));
    match parsed {
        Ok(value) => Some(value),
        Err(reason) => {
            warnings.push(Warning::UnreadableFile { path: path.to_path_buf(), reason });
            None
        },
    }
}

/// Files directly inside `dir` with extension `ext`, sorted by name.
fn files_with_ext(dir: &Path, ext: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)))
        .collect()
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Every `*.json` of `dir` that deserializes as `T`, as raw values.
fn read_entities<T: DeserializeOwned>(dir: &Path, warnings: &mut Warnings) -> Vec<Value> {
    let mut entities = Vec::new();
    for path in files_with_ext(dir, "json") {
        let Some(value) = read_json(&path, warnings) else {
            continue;
        };
        match serde_json::from_value::<T>(value.clone()) {
            Ok(_) => entities.push(value),
            Err(err) => warnings.push(Warning::UnreadableFile { path, reason: err.to_string() }),
        }
    }
    entities
}

/// SVG files of `icons/` plus the symbols of a legacy sprite, by icon id.
fn read_icons(dir: &Path, warnings: &mut Warnings) -> BTreeMap<String, String> {
    let mut icons = BTreeMap::new();
    for path in files_with_ext(&dir.join("icons"), "svg") {
        let Some(stem) = file_stem(&path) else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(svg) => insert_icon(&mut icons, &stem, svg),
            Err(err) => warnings.push(Warning::UnreadableFile { path, reason: err.to_string() }),
        }
    }
    let mut icons: BTreeMap<String, String> = icons.into_iter().map(|(name, (_, svg))| (name, svg)).collect();

    let sprite_path = dir.join(LEGACY_SPRITE_FILE);
    if sprite_path.is_file() {
        match fs::read_to_string(&sprite_path) {
            Ok(sprite) => {
                for (name, svg) in split_sprite(&sprite, warnings) {
                    icons.entry(name).or_insert(svg);
                }
            },
            Err(err) => warnings.push(Warning::UnreadableFile { path: sprite_path, reason: err.to_string() }),
        }
    }
    debug!("Found {} icons in {dir:?}", icons.len());
    icons
}

/// Mapeo layout: `presets.json` with presets and fields objects, plus an
/// optional `translations.json` and `metadata.json`.
fn read_legacy_directory(dir: &Path, warnings: &mut Warnings) -> Result<ConfigDocument, ImportError> {
    let presets_path = dir.join(LEGACY_PRESETS_FILE);
    let mut document = match read_json(&presets_path, warnings) {
        Some(Value::Object(document)) => document,
        _ => return Err(ImportError::EmptyBundle(dir.to_path_buf())),
    };
    if let Some(translations) = read_json(&dir.join(LEGACY_TRANSLATIONS_FILE), warnings) {
        document.insert("translations".to_string(), translations);
    }
    if let Some(metadata) = read_json(&dir.join(METADATA_FILE), warnings) {
        document.entry("metadata").or_insert(metadata);
    }
    ConfigDocument::from_value(&presets_path, Value::Object(document))
}

/// CoMapeo layout: one JSON file per preset and field, one catalog per language.
fn read_split_directory(dir: &Path, warnings: &mut Warnings) -> Result<ConfigDocument, ImportError> {
    let mut document = Map::new();
    if let Some(metadata) = read_json(&dir.join(METADATA_FILE), warnings) {
        document.insert("metadata".to_string(), metadata);
    }
    document.insert("presets".to_string(), Value::Array(read_entities::<CoMapeoPreset>(&dir.join("presets"), warnings)));
    document.insert("fields".to_string(), Value::Array(read_entities::<Field>(&dir.join("fields"), warnings)));

    let mut messages = Map::new();
    for path in files_with_ext(&dir.join("messages"), "json") {
        let Some(language) = file_stem(&path) else {
            continue;
        };
        let Some(value) = read_json(&path, warnings) else {
            continue;
        };
        match serde_json::from_value::<LanguageMessages>(value.clone()) {
            Ok(_) => {
                messages.insert(language, value);
            },
            Err(err) => warnings.push(Warning::UnreadableFile { path, reason: err.to_string() }),
        }
    }
    document.insert("messages".to_string(), Value::Object(messages));
    ConfigDocument::from_value(dir, Value::Object(document))
}

fn read_directory(dir: &Path, fallback_name: &str, warnings: &mut Warnings) -> Result<ImportedConfig, ImportError> {
    let document = if dir.join(LEGACY_PRESETS_FILE).is_file() {
        read_legacy_directory(dir, warnings)?
    } else {
        read_split_directory(dir, warnings)?
    };
    let icons = read_icons(dir, warnings);
    Ok(document.normalize(fallback_name, &icons))
}

/// Reads a bundle and normalizes it to workbook entities.
///
/// Broken files inside a directory are reported and skipped. Archives are
/// not unpacked here; a `.tar` that is really a JSON document is accepted.
pub fn read_bundle(path: &Path, warnings: &mut Warnings) -> Result<ImportedConfig, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }
    let kind = BundleKind::from_path(path)?;
    let fallback_name = file_stem(path).unwrap_or_default();
    debug!("Reading {path:?} as {kind:?}");

    let imported = match kind {
        BundleKind::Directory => read_directory(path, &fallback_name, warnings)?,
        BundleKind::Json => {
            let content = fs::read_to_string(path)?;
            ConfigDocument::from_str(path, &content)?.normalize(&fallback_name, &BTreeMap::new())
        },
        BundleKind::MapeoSettings => {
            let content = fs::read(path)?;
            let value = serde_json::from_slice::<Value>(&content)
                .map_err(|_| ImportError::TarNotImplemented(path.to_path_buf()))?;
            ConfigDocument::from_value(path, value)?.normalize(&fallback_name, &BTreeMap::new())
        },
        BundleKind::ComapeoCat => return Err(ImportError::ArchiveNotExtracted(path.to_path_buf())),
    };

    if imported.presets.is_empty() && imported.fields.is_empty() {
        return Err(ImportError::EmptyBundle(path.to_path_buf()));
    }
    info!(
        "Read {} categories, {} fields and {} translated messages from {path:?}",
        imported.presets.len(), imported.fields.len(), imported.messages.message_count(),
    );
    Ok(imported)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::bundle::document::tests::{TEST_COMAPEO_DOCUMENT, TEST_LEGACY_DOCUMENT};
    use crate::bundle::sprite::tests::TEST_SPRITE;

    #[test]
    fn tst_bundle_kind() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BundleKind::from_path(dir.path()).unwrap(), BundleKind::Directory);
        assert_eq!(BundleKind::from_path(Path::new("a/config.JSON")).unwrap(), BundleKind::Json);
        assert_eq!(BundleKind::from_path(Path::new("forest.mapeosettings")).unwrap(), BundleKind::MapeoSettings);
        assert_eq!(BundleKind::from_path(Path::new("forest.comapeocat")).unwrap(), BundleKind::ComapeoCat);
        assert!(matches!(BundleKind::from_path(Path::new("forest.xlsx")), Err(ImportError::UnknownExtension(e)) if e == "xlsx"));
        assert!(matches!(BundleKind::from_path(Path::new("forest")), Err(ImportError::UnknownExtension(e)) if e.is_empty()));
    }

    #[test]
    fn tst_read_json_and_archives() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("forest.json");
        fs::write(&json, TEST_COMAPEO_DOCUMENT).unwrap();
        let mut warnings = Warnings::new();
        let imported = read_bundle(&json, &mut warnings).unwrap();
        assert_eq!(imported.presets.len(), 2);

        let settings = dir.path().join("river.mapeosettings");
        fs::write(&settings, TEST_LEGACY_DOCUMENT).unwrap();
        let imported = read_bundle(&settings, &mut warnings).unwrap();
        assert_eq!(imported.metadata.name, "river");

        let tar = dir.path().join("binary.tar");
        fs::write(&tar, [0u8, 159, 146, 150]).unwrap();
        assert!(matches!(read_bundle(&tar, &mut warnings), Err(ImportError::TarNotImplemented(_))));

        let zip = dir.path().join("forest.comapeocat");
        fs::write(&zip, b"PK").unwrap();
        assert!(matches!(read_bundle(&zip, &mut warnings), Err(ImportError::ArchiveNotExtracted(_))));

        assert!(matches!(read_bundle(&dir.path().join("nope.json"), &mut warnings), Err(ImportError::NotFound(_))));
        assert!(warnings.is_empty());
    }

    #[test]
    fn tst_read_split_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("forest");
        for sub in ["presets", "fields", "messages", "icons"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join(METADATA_FILE), r#"{"name": "Forest", "primaryLanguage": "pt"}"#).unwrap();
        fs::write(root.join("presets/trees.json"), r#"{"id": "trees", "name": "Trees", "fields": ["species"]}"#).unwrap();
        fs::write(root.join("presets/broken.json"), "{ not json").unwrap();
        fs::write(root.join("presets/nameless.json"), r#"{"id": "nameless"}"#).unwrap();
        fs::write(root.join("fields/species.json"), r#"{"tagKey": "species", "type": "text", "label": "Species"}"#).unwrap();
        fs::write(root.join("messages/es.json"), r#"{"presets.trees.name": {"message": "Árboles", "description": ""}}"#).unwrap();
        fs::write(root.join("icons/trees-24px.svg"), "<svg>small</svg>").unwrap();
        fs::write(root.join("icons/trees-100px.svg"), "<svg>large</svg>").unwrap();

        let mut warnings = Warnings::new();
        let imported = read_bundle(&root, &mut warnings).unwrap();
        assert_eq!(imported.metadata.name, "Forest");
        assert_eq!(imported.metadata.primary_language, "pt");
        assert_eq!(imported.presets.len(), 1);
        assert_eq!(imported.fields[0].tag_key, "species");
        assert_eq!(imported.messages.label("es", "presets.trees.name"), Some("Árboles"));
        assert_eq!(imported.icons, vec![("trees".to_string(), "<svg>large</svg>".to_string())]);

        let unreadable: Vec<String> = warnings.iter().filter_map(|w| match w {
            Warning::UnreadableFile { path, .. } => file_stem(path),
            _ => None,
        }).collect();
        assert_eq!(unreadable, vec!["broken", "nameless"]);
    }

    #[test]
    fn tst_read_legacy_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("river");
        fs::create_dir_all(&root).unwrap();
        let document: Value = serde_json::from_str(TEST_LEGACY_DOCUMENT).unwrap();
        let presets = serde_json::json!({"presets": document["presets"], "fields": document["fields"]});
        fs::write(root.join(LEGACY_PRESETS_FILE), presets.to_string()).unwrap();
        fs::write(root.join(LEGACY_TRANSLATIONS_FILE), document["translations"].to_string()).unwrap();
        fs::write(root.join(LEGACY_SPRITE_FILE), TEST_SPRITE.replace("tree-100px", "water-100px")).unwrap();

        let mut warnings = Warnings::new();
        let imported = read_bundle(&root, &mut warnings).unwrap();
        assert_eq!(imported.metadata.name, "river");
        assert_eq!(imported.presets.len(), 3);
        assert_eq!(imported.messages.label("es", "presets.water.name"), Some("Agua"));
        assert_eq!(imported.icons.len(), 1);
        assert_eq!(imported.icons[0].0, "water");
        assert!(imported.icons[0].1.contains("M2 2"));
    }

    #[test]
    fn tst_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut warnings = Warnings::new();
        assert!(matches!(read_bundle(dir.path(), &mut warnings), Err(ImportError::EmptyBundle(_))));
    }
}
