//! Style expressions and their structured form.
//!
//! A style expression is a short text like `"bold red"`, `"dim #383b3d"`, or
//! `"bold rgb(139,233,253) on #d73a49"`. Expressions parse into [`Style`]
//! values that resolve to `crossterm` content styles for terminal output.
//! Theme files store the canonical rendering of each style, so parse and
//! display form a stable round trip.

use crate::error::StyleError;
use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use std::fmt;

/// Attribute vocabulary, in canonical display order.
const ATTRIBUTE_TOKENS: &[(&str, Attribute)] = &[
    ("bold", Attribute::Bold),
    ("dim", Attribute::Dim),
    ("italic", Attribute::Italic),
    ("underline", Attribute::Underlined),
    ("blink", Attribute::SlowBlink),
    ("reverse", Attribute::Reverse),
    ("conceal", Attribute::Hidden),
    ("strike", Attribute::CrossedOut),
];

/// Single-letter flags for the compact attribute summary, same order as
/// `ATTRIBUTE_TOKENS`.
const ATTRIBUTE_LETTERS: &[char] = &['b', 'd', 'i', 'u', 'B', 'r', 'c', 's'];

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Structured text style: optional foreground, optional background, and a set
/// of attribute flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bgcolor: Option<Color>,
    pub attributes: Attributes,
}

impl Style {
    /// Parse a style expression.
    ///
    /// Tokens are separated by whitespace: attribute names, color values
    /// (named, `#RRGGBB`, or `rgb(r,g,b)`), `on` followed by a background
    /// color, or `none` for an empty style. An empty expression is an empty
    /// style.
    pub fn parse(expression: &str) -> Result<Self, StyleError> {
        let mut style = Style::default();
        let mut tokens = expression.split_whitespace();
        while let Some(token) = tokens.next() {
            let normalized = token.to_ascii_lowercase();
            if normalized == "none" {
                continue;
            }
            if normalized == "on" {
                let bg = tokens.next().ok_or(StyleError::MissingBackground)?;
                style.bgcolor = Some(parse_color(bg)?);
                continue;
            }
            if let Some((_, attr)) = ATTRIBUTE_TOKENS
                .iter()
                .find(|(name, _)| *name == normalized)
            {
                style.attributes.set(*attr);
                continue;
            }
            style.color = Some(parse_color(&normalized)?);
        }
        Ok(style)
    }

    /// True when the style sets no color and no attributes.
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty()
    }

    /// Convert to a `crossterm` content style for terminal output.
    pub fn content_style(&self) -> ContentStyle {
        let mut content = ContentStyle::new();
        content.foreground_color = self.color;
        content.background_color = self.bgcolor;
        content.attributes = self.attributes;
        content
    }

    /// Render `text` with this style applied as ANSI escape sequences.
    pub fn apply(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        self.content_style().apply(text).to_string()
    }

    /// Compact per-attribute flag string (`b` bold, `d` dim, `i` italic,
    /// `u` underline, `B` blink, `r` reverse, `c` conceal, `s` strike).
    pub fn attribute_summary(&self) -> String {
        ATTRIBUTE_TOKENS
            .iter()
            .zip(ATTRIBUTE_LETTERS)
            .map(|((_, attr), letter)| {
                if self.attributes.has(*attr) {
                    *letter
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl fmt::Display for Style {
    /// Canonical expression: attributes in fixed order, then the foreground
    /// color, then `on <background>`. An empty style renders as `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return write!(f, "none");
        }
        let mut parts: Vec<String> = Vec::new();
        for (name, attr) in ATTRIBUTE_TOKENS {
            if self.attributes.has(*attr) {
                parts.push((*name).to_string());
            }
        }
        if let Some(color) = self.color {
            parts.push(color_token(color));
        }
        if let Some(bgcolor) = self.bgcolor {
            parts.push(format!("on {}", color_token(bgcolor)));
        }
        write!(f, "{}", parts.join(" "))
    }
}

// ---------------------------------------------------------------------------
// StyleSpec
// ---------------------------------------------------------------------------

/// A style definition as held by a theme: either a raw textual expression or
/// an already-structured style. Text resolves lazily; two specs compare equal
/// when their resolved styles match.
#[derive(Debug, Clone)]
pub enum StyleSpec {
    Text(String),
    Style(Style),
}

impl StyleSpec {
    /// Resolve to a structured style, parsing textual expressions.
    pub fn resolve(&self) -> Result<Style, StyleError> {
        match self {
            Self::Text(expression) => Style::parse(expression),
            Self::Style(style) => Ok(*style),
        }
    }

    /// Expression form: canonical for structured styles, verbatim for text.
    pub fn expression(&self) -> String {
        match self {
            Self::Text(expression) => expression.clone(),
            Self::Style(style) => style.to_string(),
        }
    }
}

impl PartialEq for StyleSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self.resolve(), other.resolve()) {
            (Ok(a), Ok(b)) => a == b,
            // Unparseable text only equals the same text.
            _ => self.expression() == other.expression(),
        }
    }
}

impl From<&str> for StyleSpec {
    fn from(expression: &str) -> Self {
        Self::Text(expression.to_string())
    }
}

impl From<String> for StyleSpec {
    fn from(expression: String) -> Self {
        Self::Text(expression)
    }
}

impl From<Style> for StyleSpec {
    fn from(style: Style) -> Self {
        Self::Style(style)
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Parse one color token: a named ANSI color, `#RRGGBB`, or `rgb(r,g,b)`.
pub fn parse_color(token: &str) -> Result<Color, StyleError> {
    let normalized = token.trim().to_ascii_lowercase();
    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(StyleError::InvalidHex(token.to_string()));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|_| StyleError::InvalidHex(token.to_string()))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|_| StyleError::InvalidHex(token.to_string()))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|_| StyleError::InvalidHex(token.to_string()))?;
        return Ok(Color::Rgb { r, g, b });
    }
    if let Some(body) = normalized
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut components = body.split(',').map(|part| part.trim().parse::<u8>());
        let mut next = || {
            components
                .next()
                .and_then(Result::ok)
                .ok_or_else(|| StyleError::InvalidRgb(token.to_string()))
        };
        let (r, g, b) = (next()?, next()?, next()?);
        if components.next().is_some() {
            return Err(StyleError::InvalidRgb(token.to_string()));
        }
        return Ok(Color::Rgb { r, g, b });
    }

    let color = match normalized.as_str() {
        "black" => Color::Black,
        "darkgrey" | "dark-grey" | "darkgray" | "dark-gray" => Color::DarkGrey,
        "grey" | "gray" => Color::Grey,
        "white" => Color::White,
        "red" => Color::Red,
        "darkred" | "dark-red" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" | "dark-green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" | "dark-yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" | "dark-blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" | "dark-magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" | "dark-cyan" => Color::DarkCyan,
        _ => return Err(StyleError::UnknownToken(token.to_string())),
    };
    Ok(color)
}

/// Canonical token for a color, the inverse of `parse_color`.
fn color_token(color: Color) -> String {
    match color {
        Color::Black => "black".to_string(),
        Color::DarkGrey => "darkgrey".to_string(),
        Color::Grey => "grey".to_string(),
        Color::White => "white".to_string(),
        Color::Red => "red".to_string(),
        Color::DarkRed => "darkred".to_string(),
        Color::Green => "green".to_string(),
        Color::DarkGreen => "darkgreen".to_string(),
        Color::Yellow => "yellow".to_string(),
        Color::DarkYellow => "darkyellow".to_string(),
        Color::Blue => "blue".to_string(),
        Color::DarkBlue => "darkblue".to_string(),
        Color::Magenta => "magenta".to_string(),
        Color::DarkMagenta => "darkmagenta".to_string(),
        Color::Cyan => "cyan".to_string(),
        Color::DarkCyan => "darkcyan".to_string(),
        Color::Rgb { r, g, b } => format!("#{r:02x}{g:02x}{b:02x}"),
        Color::AnsiValue(value) => format!("ansi({value})"),
        Color::Reset => "none".to_string(),
    }
}
