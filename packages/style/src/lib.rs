//! Typed style properties and their utility-class encoding
//!
//! A [`Style`] holds longhand values only. Shorthands such as `margin` are
//! read and written through their constituent longhands, and read as
//! [`MaybeMixed::Mixed`] when those disagree.

pub mod keys;
pub mod style;
pub mod tailwind;

pub use keys::{
    AnyStyleKey, ShorthandKey, StyleKey, UnknownStyleKey, IMAGE_STYLE_KEYS, POSITIONAL_STYLE_KEYS,
    TAILWIND_PREFIXES, TEXT_STYLE_KEYS,
};
pub use style::{same_or_mixed, MaybeMixed, Style};
pub use tailwind::{decode, encode, is_style_token, merge_class_names};
