// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod build;
pub mod messages;
pub mod import;
pub mod languages;

pub use build::{BuildOptions, subcmd_build};
pub use messages::subcmd_messages;
pub use import::subcmd_import;
pub use languages::subcmd_languages;
