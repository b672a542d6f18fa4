// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod catalog;
pub mod table;

pub use catalog::{LanguageCatalog, LanguageEntry};
