use crate::keys::{AnyStyleKey, ShorthandKey, StyleKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value that may disagree across the things it was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaybeMixed<T> {
    Value(T),
    Mixed,
}

impl<T> MaybeMixed<T> {
    pub fn is_mixed(&self) -> bool {
        matches!(self, MaybeMixed::Mixed)
    }

    pub fn value(self) -> Option<T> {
        match self {
            MaybeMixed::Value(value) => Some(value),
            MaybeMixed::Mixed => None,
        }
    }

    pub fn as_ref(&self) -> MaybeMixed<&T> {
        match self {
            MaybeMixed::Value(value) => MaybeMixed::Value(value),
            MaybeMixed::Mixed => MaybeMixed::Mixed,
        }
    }
}

/// The common value when every item agrees (absent counts as a value),
/// `Mixed` otherwise. An empty input reads as absent.
pub fn same_or_mixed<T: PartialEq>(values: impl IntoIterator<Item = Option<T>>) -> MaybeMixed<Option<T>> {
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return MaybeMixed::Value(None);
    };

    for value in values {
        if value != first {
            return MaybeMixed::Mixed;
        }
    }
    MaybeMixed::Value(first)
}

/// Longhand style values of one element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style {
    values: BTreeMap<StyleKey, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Set or (with an empty string) clear a longhand; returns whether the
    /// stored value changed
    pub fn set(&mut self, key: StyleKey, value: &str) -> bool {
        if value.is_empty() {
            return self.values.remove(&key).is_some();
        }
        if self.get(key) == Some(value) {
            return false;
        }
        self.values.insert(key, value.to_string());
        true
    }

    pub fn remove(&mut self, key: StyleKey) -> Option<String> {
        self.values.remove(&key)
    }

    /// Shorthand value, `Mixed` when the constituent longhands disagree
    pub fn shorthand(&self, key: ShorthandKey) -> MaybeMixed<Option<&str>> {
        same_or_mixed(key.longhands().iter().map(|longhand| self.get(*longhand)))
    }

    /// Write a shorthand to all of its longhands. `Mixed` is ignored.
    /// Returns the longhands that changed, in canonical order.
    pub fn set_shorthand(&mut self, key: ShorthandKey, value: MaybeMixed<&str>) -> Vec<StyleKey> {
        let MaybeMixed::Value(value) = value else {
            return Vec::new();
        };

        key.longhands()
            .iter()
            .copied()
            .filter(|longhand| self.set(*longhand, value))
            .collect()
    }

    pub fn get_any(&self, key: AnyStyleKey) -> MaybeMixed<Option<&str>> {
        match key {
            AnyStyleKey::Longhand(key) => MaybeMixed::Value(self.get(key)),
            AnyStyleKey::Shorthand(key) => self.shorthand(key),
        }
    }

    pub fn set_any(&mut self, key: AnyStyleKey, value: MaybeMixed<&str>) -> Vec<StyleKey> {
        match (key, value) {
            (_, MaybeMixed::Mixed) => Vec::new(),
            (AnyStyleKey::Longhand(key), MaybeMixed::Value(value)) => {
                if self.set(key, value) {
                    vec![key]
                } else {
                    Vec::new()
                }
            }
            (AnyStyleKey::Shorthand(key), value) => self.set_shorthand(key, value),
        }
    }

    /// Present values in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(StyleKey, String)> for Style {
    fn from_iter<I: IntoIterator<Item = (StyleKey, String)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (key, value) in iter {
            style.set(key, &value);
        }
        style
    }
}
