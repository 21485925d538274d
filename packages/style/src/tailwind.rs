//! Utility-class encoding of styles (`prefix-[value]` tokens)

use crate::keys::{StyleKey, TAILWIND_PREFIXES};
use crate::style::Style;
use regex::Regex;
use std::sync::LazyLock;

static ARBITRARY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)-\[([^\]\s]+)\]$").expect("arbitrary value pattern is valid"));

/// Type hints that settle which key a `text-[...]` token belongs to
const COLOR_HINT: &str = "color:";
const LENGTH_HINT: &str = "length:";

const FONT_FAMILY_PREFIX: &str = "font";

/// Decode the style tokens of a class string. Tokens that are not
/// `prefix-[value]` with a known prefix are ignored. Later tokens win.
pub fn decode(class_names: &str) -> Style {
    let mut style = Style::new();
    for token in class_names.split_whitespace() {
        if let Some((key, value)) = decode_token(token) {
            style.set(key, &value);
        }
    }
    style
}

/// Encode a style as utility classes in prefix-table order, followed by the
/// font family
pub fn encode(style: &Style) -> String {
    let mut tokens = Vec::new();

    for (key, prefix) in TAILWIND_PREFIXES {
        let Some(value) = style.get(*key) else {
            continue;
        };
        let value = match key {
            StyleKey::Color if !looks_like_color(value) || has_hint(value) => format!("{}{}", COLOR_HINT, value),
            StyleKey::FontSize if looks_like_color(value) || has_hint(value) => format!("{}{}", LENGTH_HINT, value),
            _ => value.to_string(),
        };
        tokens.push(format!("{}-[{}]", prefix, escape(&value)));
    }

    if let Some(family) = style.get(StyleKey::FontFamily) {
        tokens.push(format!("{}-['{}']", FONT_FAMILY_PREFIX, escape(family)));
    }

    tokens.join(" ")
}

/// Replace the style tokens of `existing` with `encode(style)`, keeping
/// every token decode does not understand
pub fn merge_class_names(existing: &str, style: &Style) -> String {
    let has_family = style.get(StyleKey::FontFamily).is_some();

    let mut tokens: Vec<String> = existing
        .split_whitespace()
        .filter(|token| decode_token(token).is_none())
        .filter(|token| !(has_family && is_font_family_token(token)))
        .map(str::to_string)
        .collect();

    let encoded = encode(style);
    if !encoded.is_empty() {
        tokens.push(encoded);
    }
    tokens.join(" ")
}

/// Whether decode assigns this token to a key
pub fn is_style_token(token: &str) -> bool {
    decode_token(token).is_some()
}

fn decode_token(token: &str) -> Option<(StyleKey, String)> {
    let captures = ARBITRARY_VALUE.captures(token)?;
    let prefix = captures.get(1)?.as_str();
    let raw = captures.get(2)?.as_str();

    if prefix == FONT_FAMILY_PREFIX && raw.starts_with(['\'', '"']) {
        return None;
    }
    let value = unescape(raw);
    let value = value.as_str();

    if prefix == "text" {
        return Some(if let Some(color) = value.strip_prefix(COLOR_HINT) {
            (StyleKey::Color, color.to_string())
        } else if let Some(size) = value.strip_prefix(LENGTH_HINT) {
            (StyleKey::FontSize, size.to_string())
        } else if looks_like_color(value) {
            (StyleKey::Color, value.to_string())
        } else {
            (StyleKey::FontSize, value.to_string())
        });
    }

    TAILWIND_PREFIXES
        .iter()
        .find(|(_, candidate)| *candidate == prefix)
        .map(|(key, _)| (*key, value.to_string()))
}

fn is_font_family_token(token: &str) -> bool {
    token
        .strip_prefix("font-[")
        .map_or(false, |rest| rest.starts_with(['\'', '"']) && rest.ends_with(']'))
}

/// Whitespace cannot appear inside a class token: spaces are written as `_`
/// and a literal underscore as `\_`
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '_' => escaped.push_str("\\_"),
            c if c.is_whitespace() => escaped.push('_'),
            c => escaped.push(c),
        }
    }
    escaped
}

fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'_') => {
                chars.next();
                unescaped.push('_');
            }
            '_' => unescaped.push(' '),
            c => unescaped.push(c),
        }
    }
    unescaped
}

fn has_hint(value: &str) -> bool {
    value.starts_with(COLOR_HINT) || value.starts_with(LENGTH_HINT)
}

fn looks_like_color(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with('#')
        || ["rgb(", "rgba(", "hsl(", "hsla("].iter().any(|f| lower.starts_with(f))
        || lower == "transparent"
        || lower == "currentcolor"
}
