//! Style key tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown style key '{0}'")]
pub struct UnknownStyleKey(pub String);

macro_rules! style_keys {
    ($($variant:ident => $name:literal,)*) => {
        /// Longhand style keys, declared in canonical order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum StyleKey {
            $($variant,)*
        }

        impl StyleKey {
            pub const ALL: &'static [StyleKey] = &[$(StyleKey::$variant,)*];

            /// camelCase property name
            pub fn name(self) -> &'static str {
                match self {
                    $(StyleKey::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<StyleKey> {
                match name {
                    $($name => Some(StyleKey::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

style_keys! {
    Position => "position",
    Top => "top",
    Right => "right",
    Bottom => "bottom",
    Left => "left",
    MarginTop => "marginTop",
    MarginRight => "marginRight",
    MarginBottom => "marginBottom",
    MarginLeft => "marginLeft",
    Width => "width",
    MinWidth => "minWidth",
    MaxWidth => "maxWidth",
    Height => "height",
    MinHeight => "minHeight",
    MaxHeight => "maxHeight",
    BorderTopLeftRadius => "borderTopLeftRadius",
    BorderTopRightRadius => "borderTopRightRadius",
    BorderBottomRightRadius => "borderBottomRightRadius",
    BorderBottomLeftRadius => "borderBottomLeftRadius",
    AlignSelf => "alignSelf",
    FlexGrow => "flexGrow",
    FlexShrink => "flexShrink",
    FlexBasis => "flexBasis",
    Display => "display",
    PaddingTop => "paddingTop",
    PaddingRight => "paddingRight",
    PaddingBottom => "paddingBottom",
    PaddingLeft => "paddingLeft",
    FlexDirection => "flexDirection",
    FlexWrap => "flexWrap",
    AlignItems => "alignItems",
    JustifyContent => "justifyContent",
    RowGap => "rowGap",
    ColumnGap => "columnGap",
    Color => "color",
    FontFamily => "fontFamily",
    FontWeight => "fontWeight",
    FontStyle => "fontStyle",
    FontSize => "fontSize",
    LineHeight => "lineHeight",
    LetterSpacing => "letterSpacing",
    TextDecorationLine => "textDecorationLine",
    TextAlign => "textAlign",
    ObjectFit => "objectFit",
    Background => "background",
    BorderTopWidth => "borderTopWidth",
    BorderTopStyle => "borderTopStyle",
    BorderTopColor => "borderTopColor",
    BorderRightWidth => "borderRightWidth",
    BorderRightStyle => "borderRightStyle",
    BorderRightColor => "borderRightColor",
    BorderBottomWidth => "borderBottomWidth",
    BorderBottomStyle => "borderBottomStyle",
    BorderBottomColor => "borderBottomColor",
    BorderLeftWidth => "borderLeftWidth",
    BorderLeftStyle => "borderLeftStyle",
    BorderLeftColor => "borderLeftColor",
    Opacity => "opacity",
    Cursor => "cursor",
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleKey {
    type Err = UnknownStyleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKey::from_name(s).ok_or_else(|| UnknownStyleKey(s.to_string()))
    }
}

/// Keys derived from two or four longhands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShorthandKey {
    Margin,
    Padding,
    BorderWidth,
    BorderColor,
    BorderStyle,
    BorderRadius,
}

impl ShorthandKey {
    pub const ALL: &'static [ShorthandKey] = &[
        ShorthandKey::Margin,
        ShorthandKey::Padding,
        ShorthandKey::BorderWidth,
        ShorthandKey::BorderColor,
        ShorthandKey::BorderStyle,
        ShorthandKey::BorderRadius,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShorthandKey::Margin => "margin",
            ShorthandKey::Padding => "padding",
            ShorthandKey::BorderWidth => "borderWidth",
            ShorthandKey::BorderColor => "borderColor",
            ShorthandKey::BorderStyle => "borderStyle",
            ShorthandKey::BorderRadius => "borderRadius",
        }
    }

    pub fn from_name(name: &str) -> Option<ShorthandKey> {
        ShorthandKey::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Constituent longhands in canonical (top, right, bottom, left) order
    pub fn longhands(self) -> &'static [StyleKey] {
        use StyleKey::*;
        match self {
            ShorthandKey::Margin => &[MarginTop, MarginRight, MarginBottom, MarginLeft],
            ShorthandKey::Padding => &[PaddingTop, PaddingRight, PaddingBottom, PaddingLeft],
            ShorthandKey::BorderWidth => &[BorderTopWidth, BorderRightWidth, BorderBottomWidth, BorderLeftWidth],
            ShorthandKey::BorderColor => &[BorderTopColor, BorderRightColor, BorderBottomColor, BorderLeftColor],
            ShorthandKey::BorderStyle => &[BorderTopStyle, BorderRightStyle, BorderBottomStyle, BorderLeftStyle],
            ShorthandKey::BorderRadius => &[
                BorderTopLeftRadius,
                BorderTopRightRadius,
                BorderBottomRightRadius,
                BorderBottomLeftRadius,
            ],
        }
    }
}

impl fmt::Display for ShorthandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either kind of key, as named by a user or a property panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyStyleKey {
    Longhand(StyleKey),
    Shorthand(ShorthandKey),
}

impl AnyStyleKey {
    pub fn from_name(name: &str) -> Option<AnyStyleKey> {
        StyleKey::from_name(name)
            .map(AnyStyleKey::Longhand)
            .or_else(|| ShorthandKey::from_name(name).map(AnyStyleKey::Shorthand))
    }

    pub fn name(self) -> &'static str {
        match self {
            AnyStyleKey::Longhand(key) => key.name(),
            AnyStyleKey::Shorthand(key) => key.name(),
        }
    }

    /// Every longhand followed by every shorthand
    pub fn all() -> impl Iterator<Item = AnyStyleKey> {
        StyleKey::ALL
            .iter()
            .copied()
            .map(AnyStyleKey::Longhand)
            .chain(ShorthandKey::ALL.iter().copied().map(AnyStyleKey::Shorthand))
    }
}

impl fmt::Display for AnyStyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnyStyleKey {
    type Err = UnknownStyleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnyStyleKey::from_name(s).ok_or_else(|| UnknownStyleKey(s.to_string()))
    }
}

impl From<StyleKey> for AnyStyleKey {
    fn from(key: StyleKey) -> Self {
        AnyStyleKey::Longhand(key)
    }
}

impl From<ShorthandKey> for AnyStyleKey {
    fn from(key: ShorthandKey) -> Self {
        AnyStyleKey::Shorthand(key)
    }
}

pub const TEXT_STYLE_KEYS: &[StyleKey] = &[
    StyleKey::Color,
    StyleKey::FontFamily,
    StyleKey::FontWeight,
    StyleKey::FontStyle,
    StyleKey::FontSize,
    StyleKey::LineHeight,
    StyleKey::LetterSpacing,
    StyleKey::TextDecorationLine,
    StyleKey::TextAlign,
];

pub const IMAGE_STYLE_KEYS: &[StyleKey] = &[StyleKey::ObjectFit];

/// Keys that place an element within its parent
pub const POSITIONAL_STYLE_KEYS: &[StyleKey] = &[
    StyleKey::Position,
    StyleKey::Top,
    StyleKey::Right,
    StyleKey::Bottom,
    StyleKey::Left,
    StyleKey::MarginTop,
    StyleKey::MarginRight,
    StyleKey::MarginBottom,
    StyleKey::MarginLeft,
    StyleKey::AlignSelf,
    StyleKey::FlexGrow,
    StyleKey::FlexShrink,
    StyleKey::FlexBasis,
];

/// Utility-class prefixes in encode order
pub const TAILWIND_PREFIXES: &[(StyleKey, &str)] = &[
    (StyleKey::MarginTop, "mt"),
    (StyleKey::MarginRight, "mr"),
    (StyleKey::MarginBottom, "mb"),
    (StyleKey::MarginLeft, "ml"),
    (StyleKey::Top, "t"),
    (StyleKey::Right, "r"),
    (StyleKey::Bottom, "b"),
    (StyleKey::Left, "l"),
    (StyleKey::Width, "w"),
    (StyleKey::Height, "h"),
    (StyleKey::BorderTopLeftRadius, "rounded-tl"),
    (StyleKey::BorderTopRightRadius, "rounded-tr"),
    (StyleKey::BorderBottomRightRadius, "rounded-br"),
    (StyleKey::BorderBottomLeftRadius, "rounded-bl"),
    (StyleKey::PaddingTop, "pt"),
    (StyleKey::PaddingRight, "pr"),
    (StyleKey::PaddingBottom, "pb"),
    (StyleKey::PaddingLeft, "pl"),
    (StyleKey::Background, "bg"),
    (StyleKey::FontWeight, "font"),
    (StyleKey::FontSize, "text"),
    (StyleKey::LineHeight, "leading"),
    (StyleKey::Color, "text"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table_is_complete() {
        assert_eq!(StyleKey::ALL.len(), 59);
        for key in StyleKey::ALL {
            assert_eq!(StyleKey::from_name(key.name()), Some(*key));
        }
    }

    #[test]
    fn test_shorthands_expand_in_order() {
        assert_eq!(
            ShorthandKey::Margin.longhands(),
            &[StyleKey::MarginTop, StyleKey::MarginRight, StyleKey::MarginBottom, StyleKey::MarginLeft]
        );
        assert_eq!(ShorthandKey::BorderRadius.longhands()[2], StyleKey::BorderBottomRightRadius);
    }

    #[test]
    fn test_any_key_parses_both_kinds() {
        assert_eq!("padding".parse::<AnyStyleKey>(), Ok(AnyStyleKey::Shorthand(ShorthandKey::Padding)));
        assert_eq!("fontSize".parse::<AnyStyleKey>(), Ok(AnyStyleKey::Longhand(StyleKey::FontSize)));
        assert!("font-size".parse::<AnyStyleKey>().is_err());
        assert_eq!(AnyStyleKey::all().count(), 65);
    }
}
