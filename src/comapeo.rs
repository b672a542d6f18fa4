// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod slug;
pub mod field;
pub mod preset;
pub mod metadata;
pub mod context;

pub use slug::slugify;
pub use field::{Field, FieldType, SelectOption, parse_fields};
pub use preset::{Preset, parse_presets};
pub use metadata::ProjectMetadata;
pub use context::BuildContext;
