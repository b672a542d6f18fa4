// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

/// Turns a human label into a key-safe identifier.
///
/// Lowercases, drops anything that is not alphanumeric, and joins the
/// remaining words with single hyphens: `"Oak tree (old)"` -> `"oak-tree-old"`.
/// Letters outside ASCII are kept, so `"Árbol"` stays `"árbol"`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_separator = false;
    for ch in label.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }
    slug
}
