// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::diagnostics::{Warning, Warnings};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const PREFERRED_SIZE_SUFFIX: &str = "-100px";

/// Icon name of a sprite symbol or icon file, and how much it is preferred.
///
/// `tree-100px` beats `tree-24px`; a name without size suffix counts as
/// preferred too.
pub fn icon_name(symbol_id: &str) -> (String, u8) {
    if let Some(name) = symbol_id.strip_suffix(PREFERRED_SIZE_SUFFIX) {
        return (name.to_string(), 2);
    }
    if let Some((name, size)) = symbol_id.rsplit_once('-') {
        let is_size = size.strip_suffix("px").is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
        if is_size && !name.is_empty() {
            return (name.to_string(), 1);
        }
    }
    (symbol_id.to_string(), 2)
}

/// Keeps the better sized variant when two files or symbols name the same icon.
pub fn insert_icon(icons: &mut BTreeMap<String, (u8, String)>, symbol_id: &str, svg: String) {
    let (name, priority) = icon_name(symbol_id);
    match icons.get(&name) {
        Some((existing, _)) if *existing >= priority => {},
        _ => {
            icons.insert(name, (priority, svg));
        },
    }
}

fn is_symbol(start: &BytesStart) -> bool {
    start.local_name().as_ref() == b"symbol"
}

fn symbol_id(start: &BytesStart) -> Option<String> {
    let attr = start.try_get_attribute("id").ok().flatten()?;
    let id = attr.unescape_value().ok()?.trim().to_string();
    (!id.is_empty()).then_some(id)
}

/// `<svg>` start tag carrying the symbol's attributes except its id.
fn open_svg(symbol: &BytesStart) -> Result<BytesStart<'static>, String> {
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    for attr in symbol.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        if matches!(attr.key.as_ref(), b"id" | b"xmlns") {
            continue;
        }
        svg.push_attribute(attr);
    }
    Ok(svg)
}

/// Copies the symbol body into a standalone document, consuming its end tag.
fn copy_symbol(reader: &mut Reader<&[u8]>, svg: BytesStart<'static>) -> Result<String, String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Start(svg)).map_err(|err| err.to_string())?;
    let mut depth = 0usize;
    loop {
        let event = reader.read_event().map_err(|err| err.to_string())?;
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => return Err("sprite ends inside the symbol".to_string()),
            _ => {},
        }
        writer.write_event(event).map_err(|err| err.to_string())?;
    }
    writer.write_event(Event::End(BytesEnd::new("svg"))).map_err(|err| err.to_string())?;
    String::from_utf8(writer.into_inner()).map_err(|err| err.to_string())
}

/// Splits a legacy `icons.svg` sprite into one SVG document per `<symbol id>`.
///
/// A broken symbol is reported and skipped, the rest are still extracted.
/// Broken XML stops the scan but keeps what was extracted so far.
pub fn split_sprite(sprite: &str, warnings: &mut Warnings) -> BTreeMap<String, String> {
    let mut icons = BTreeMap::new();
    let mut reader = Reader::from_str(sprite);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if is_symbol(&start) => {
                let id = symbol_id(&start);
                let symbol = id.clone().unwrap_or_else(|| "<unnamed>".to_string());
                let opened = match id {
                    Some(_) => open_svg(&start),
                    None => Err("symbol has no id".to_string()),
                };
                match opened {
                    Ok(svg) => match copy_symbol(&mut reader, svg) {
                        Ok(markup) => insert_icon(&mut icons, &symbol, markup),
                        Err(reason) => {
                            warnings.push(Warning::BadSpriteSymbol { symbol, reason });
                            break;
                        },
                    },
                    Err(reason) => {
                        warnings.push(Warning::BadSpriteSymbol { symbol, reason });
                        if let Err(err) = reader.read_to_end(start.name()) {
                            warnings.push(Warning::BadSpriteSymbol { symbol: "<sprite>".to_string(), reason: err.to_string() });
                            break;
                        }
                    },
                }
            },
            Ok(Event::Empty(start)) if is_symbol(&start) => {
                let symbol = symbol_id(&start).unwrap_or_else(|| "<unnamed>".to_string());
                warnings.push(Warning::BadSpriteSymbol { symbol, reason: "symbol is empty".to_string() });
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(err) => {
                warnings.push(Warning::BadSpriteSymbol { symbol: "<sprite>".to_string(), reason: err.to_string() });
                break;
            },
        }
    }
    icons.into_iter().map(|(name, (_, svg))| (name, svg)).collect()
}
