// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod catalog;
pub mod header;
pub mod correlate;
pub mod builder;
pub mod redistribute;

use thiserror::Error as TeError;

pub use builder::{TranslationSheet, build_message_catalog};
pub use catalog::MessageCatalog;
pub use redistribute::redistribute;

/// Failures of the translation engine itself.
///
/// Problems in sheet contents are never reported through this type, they are
/// recorded as [`crate::diagnostics::Warning`]s instead.
#[derive(TeError, Debug)]
pub enum TranslationError {
    #[error("Fail to compile language header pattern: {0}")]
    HeaderPattern(#[from] regex::Error),
}
