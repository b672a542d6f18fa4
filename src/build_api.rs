// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod payload;
pub mod icons;
pub mod client;
pub mod settings;

pub use client::{BuildApiClient, BuildApiError};
pub use icons::collect_icons;
pub use payload::BuildPayload;
pub use settings::{BuildApiSettings, SettingsError};
