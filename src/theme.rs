//! Theme data type and its on-disk document format.
//!
//! A theme file is a small TOML document with two tables:
//!
//! ```toml
//! [metadata]
//! name = "dark"
//! description = "Dark mode theme"
//! tags = "dark, default"
//! inherit = true
//!
//! [styles]
//! error = "bold #ff5555"
//! ```
//!
//! Style entries hold the canonical expression of each style, so writing a
//! theme out and reading it back yields an equal theme. Unknown keys and
//! tables are ignored on read so older builds can open newer files.

use crate::error::ThemeError;
use crate::style::{Style, StyleSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default sample text for style previews.
pub const SAMPLE_TEXT: &str = "The quick brown fox...";

/// File suffix for theme files in a theme directory.
pub const THEME_FILE_SUFFIX: &str = "theme";

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A named, taggable collection of style definitions.
///
/// Equality compares every field except `path`: the backing file location is
/// registry bookkeeping, not theme content.
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    description: String,
    tags: Vec<String>,
    styles: BTreeMap<String, StyleSpec>,
    inherit: bool,
    path: Option<PathBuf>,
}

impl Theme {
    /// Create an empty theme. `inherit` defaults to true.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            styles: BTreeMap::new(),
            inherit: true,
            path: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add one style definition; replaces any previous entry for `name`.
    pub fn with_style(mut self, name: impl Into<String>, spec: impl Into<StyleSpec>) -> Self {
        self.styles.insert(name.into(), spec.into());
        self
    }

    pub fn with_inherit(mut self, inherit: bool) -> Self {
        self.inherit = inherit;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn styles(&self) -> &BTreeMap<String, StyleSpec> {
        &self.styles
    }

    pub fn inherit(&self) -> bool {
        self.inherit
    }

    /// Backing file location, when managed by a registry or read from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Assign the backing file location. Called by the owning registry.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    // -- document conversion -------------------------------------------------

    /// Serialize to the two-table configuration document.
    pub fn to_config(&self) -> Result<String, ThemeError> {
        let document = DocumentOut {
            metadata: MetadataOut {
                name: &self.name,
                description: &self.description,
                tags: self.tags.join(", "),
                inherit: self.inherit,
            },
            styles: self
                .styles
                .iter()
                .map(|(name, spec)| {
                    let expression = spec
                        .resolve()
                        .map(|style| style.to_string())
                        .unwrap_or_else(|_| spec.expression());
                    (name.as_str(), expression)
                })
                .collect(),
        };
        toml::to_string(&document).map_err(|e| ThemeError::format(None, e.to_string()))
    }

    /// Parse a configuration document.
    ///
    /// `source` labels error messages and becomes the theme's `path`. A
    /// missing `metadata.name` is a format error; a missing `inherit` key
    /// falls back to `inherit_default`. Every style expression is parsed
    /// eagerly so malformed styles fail here rather than at render time.
    pub fn from_config(
        text: &str,
        source: Option<&Path>,
        inherit_default: bool,
    ) -> Result<Self, ThemeError> {
        let document: DocumentIn =
            toml::from_str(text).map_err(|e| ThemeError::format(source, e.message()))?;
        let name = document.metadata.name.trim();
        if name.is_empty() {
            return Err(ThemeError::format(source, "missing required name"));
        }

        let mut styles = BTreeMap::new();
        for (style_name, expression) in &document.styles {
            let style = Style::parse(expression).map_err(|e| {
                ThemeError::format(source, format!("style `{style_name}`: {e}"))
            })?;
            styles.insert(style_name.clone(), StyleSpec::Style(style));
        }

        Ok(Self {
            name: name.to_string(),
            description: document.metadata.description,
            tags: split_tags(&document.metadata.tags),
            styles,
            inherit: document.metadata.inherit.unwrap_or(inherit_default),
            path: source.map(PathBuf::from),
        })
    }

    // -- persistence ---------------------------------------------------------

    /// Write this theme to its backing path.
    ///
    /// Fails with `NoPath` when no path is set, and with `AlreadyExists`
    /// when the file exists and `overwrite` is false.
    pub fn save(&self, overwrite: bool) -> Result<(), ThemeError> {
        let Some(path) = &self.path else {
            return Err(ThemeError::NoPath(self.name.clone()));
        };
        if !overwrite && path.exists() {
            return Err(ThemeError::AlreadyExists(path.clone()));
        }
        self.to_file(path)
    }

    /// Write this theme to an explicit path without touching `self.path`.
    pub fn to_file(&self, path: &Path) -> Result<(), ThemeError> {
        fs::write(path, self.to_config()?)?;
        tracing::debug!(theme = %self.name, path = %path.display(), "wrote theme file");
        Ok(())
    }

    /// Re-read the backing file, replacing this theme's fields in place.
    pub fn load(&mut self) -> Result<(), ThemeError> {
        let Some(path) = self.path.clone() else {
            return Err(ThemeError::NoPath(self.name.clone()));
        };
        *self = Self::read(&path, true)?;
        Ok(())
    }

    /// Read a theme file. The returned theme's `path` is `path`.
    pub fn read(path: &Path, inherit_default: bool) -> Result<Self, ThemeError> {
        let text = fs::read_to_string(path)?;
        Self::from_config(&text, Some(path), inherit_default)
    }

    // -- preview -------------------------------------------------------------

    /// Assemble preview lines: a header, one row per style in key order
    /// (style name, attribute flags, canonical expression, sample text), and
    /// a trailing path line when `show_path` is set and a path is present.
    /// The sample is styled with ANSI sequences when `color` is enabled.
    pub fn preview_lines(
        &self,
        sample_text: Option<&str>,
        show_path: bool,
        color: bool,
    ) -> Vec<String> {
        let sample = sample_text.unwrap_or(SAMPLE_TEXT);
        let width = self
            .styles
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(5);

        let mut lines = vec![format!("Theme: {}", self.name)];
        for (name, spec) in &self.styles {
            let line = match spec.resolve() {
                Ok(style) => {
                    let rendered = if color {
                        style.apply(sample)
                    } else {
                        sample.to_string()
                    };
                    format!(
                        "  {name:<width$}  {}  {:<28}  {rendered}",
                        style.attribute_summary(),
                        style.to_string(),
                    )
                }
                // Unresolvable text specs render unstyled with the raw expression.
                Err(_) => format!(
                    "  {name:<width$}  {:<8}  {:<28}  {sample}",
                    "?",
                    spec.expression(),
                ),
            };
            lines.push(line);
        }
        if show_path {
            if let Some(path) = &self.path {
                lines.push(format!("  path: {}", path.display()));
            }
        }
        lines
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.tags == other.tags
            && self.styles == other.styles
            && self.inherit == other.inherit
    }
}

/// Split a comma- or space-separated tag list, dropping empty entries.
fn split_tags(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Document schema
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DocumentOut<'a> {
    metadata: MetadataOut<'a>,
    styles: BTreeMap<&'a str, String>,
}

#[derive(Serialize)]
struct MetadataOut<'a> {
    name: &'a str,
    description: &'a str,
    tags: String,
    inherit: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocumentIn {
    metadata: MetadataIn,
    styles: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataIn {
    name: String,
    description: String,
    tags: String,
    inherit: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::testsupport::TestTempDir;
    use crossterm::style::{Attribute, Color};

    fn sample_theme() -> Theme {
        Theme::new("dark")
            .with_description("Dark mode theme")
            .with_tags(["dark", "default"])
            .with_style("error", "bold rgb(255,85,85)")
            .with_style("hidden", "dim #383b3d")
            .with_style(
                "highlight",
                Style {
                    color: Some(Color::Black),
                    bgcolor: Some(Color::Rgb {
                        r: 0xd7,
                        g: 0x3a,
                        b: 0x49,
                    }),
                    attributes: Attribute::Bold.into(),
                },
            )
    }

    #[test]
    fn config_round_trip_preserves_equality() {
        let theme = sample_theme();
        let config = theme.to_config().expect("serialize");
        let parsed = Theme::from_config(&config, None, true).expect("parse");
        assert_eq!(parsed, theme);
        assert!(parsed.path().is_none());
    }

    #[test]
    fn config_styles_are_canonical() {
        let theme = sample_theme();
        let config = theme.to_config().expect("serialize");
        // Attributes precede colors; rgb colors normalize to hex.
        assert!(config.contains(r##"error = "bold #ff5555""##), "got: {config}");
        assert!(config.contains(r##"hidden = "dim #383b3d""##));
        assert!(config.contains(r##"highlight = "bold black on #d73a49""##));
        assert!(config.contains(r#"tags = "dark, default""#));
        assert!(config.contains("inherit = true"));
    }

    #[test]
    fn from_config_without_name_is_a_format_error() {
        let err = Theme::from_config("[metadata]\ndescription = \"x\"\n", None, true).unwrap_err();
        match err {
            ThemeError::Format { message, .. } => {
                assert_eq!(message, "missing required name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_config_reports_bad_style_with_source_label() {
        let text = "[metadata]\nname = \"x\"\n\n[styles]\nerror = \"sparkly\"\n";
        let err =
            Theme::from_config(text, Some(Path::new("/tmp/x.theme")), true).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("/tmp/x.theme"), "got: {rendered}");
        assert!(rendered.contains("style `error`"), "got: {rendered}");
    }

    #[test]
    fn from_config_ignores_unknown_sections_and_keys() {
        let text = "[metadata]\nname = \"x\"\nfuture_key = \"?\"\n\n[styles]\n\n[extra]\nfoo = \"bar\"\n";
        let theme = Theme::from_config(text, None, true).expect("parse");
        assert_eq!(theme.name(), "x");
        assert!(theme.styles().is_empty());
    }

    #[test]
    fn inherit_falls_back_to_default_when_absent() {
        let text = "[metadata]\nname = \"mono\"\n\n[styles]\nerror = \"reverse italic\"\n";
        let theme = Theme::from_config(text, None, true).expect("parse");
        assert!(theme.inherit());
        assert_eq!(
            theme.styles()["error"],
            StyleSpec::from("reverse italic"),
        );

        let theme = Theme::from_config(text, None, false).expect("parse");
        assert!(!theme.inherit());

        let text = "[metadata]\nname = \"mono\"\ninherit = false\n";
        let theme = Theme::from_config(text, None, true).expect("parse");
        assert!(!theme.inherit());
    }

    #[test]
    fn mono_scenario_round_trips_with_default_inherit() {
        let mono = Theme::new("mono").with_style("error", "reverse italic");
        let config = mono.to_config().expect("serialize");
        let parsed = Theme::from_config(&config, None, true).expect("parse");
        assert_eq!(parsed.styles()["error"], StyleSpec::from("reverse italic"));
        assert!(parsed.inherit());
        assert_eq!(parsed, mono);
    }

    #[test]
    fn read_malformed_file_is_a_format_error() {
        let dir = TestTempDir::new("theme-malformed");
        let path = dir.write_text("broken.theme", "[metadata]\ndescription = \"no name\"\n");
        let err = Theme::read(&path, true).unwrap_err();
        match err {
            ThemeError::Format { source, message } => {
                assert_eq!(source.as_deref(), Some(path.as_path()));
                assert_eq!(message, "missing required name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn tags_split_on_commas_and_spaces() {
        let text = "[metadata]\nname = \"x\"\ntags = \"mono, colorblind extra\"\n";
        let theme = Theme::from_config(text, None, true).expect("parse");
        assert_eq!(theme.tags(), ["mono", "colorblind", "extra"]);
    }

    #[test]
    fn equality_ignores_path() {
        let a = sample_theme();
        let b = sample_theme().with_path("/tmp/dark.theme");
        assert_eq!(a, b);

        let c = sample_theme().with_description("other");
        assert_ne!(a, c);
    }

    #[test]
    fn save_requires_a_path() {
        let theme = sample_theme();
        match theme.save(false) {
            Err(ThemeError::NoPath(name)) => assert_eq!(name, "dark"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn save_refuses_to_clobber_without_overwrite() {
        let dir = TestTempDir::new("theme-save");
        let path = dir.child("dark.theme");
        let theme = sample_theme().with_path(&path);
        theme.save(false).expect("first save");
        assert!(path.exists());

        match theme.save(false) {
            Err(ThemeError::AlreadyExists(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
        theme.save(true).expect("overwrite save");
    }

    #[test]
    fn to_file_does_not_set_path() {
        let dir = TestTempDir::new("theme-tofile");
        let path = dir.child("out.theme");
        let theme = sample_theme();
        theme.to_file(&path).expect("write");
        assert!(path.exists());
        assert!(theme.path().is_none());
    }

    #[test]
    fn read_sets_path_and_round_trips() {
        let dir = TestTempDir::new("theme-read");
        let path = dir.child("dark.theme");
        let theme = sample_theme();
        theme.to_file(&path).expect("write");

        let read = Theme::read(&path, true).expect("read");
        assert_eq!(read, theme);
        assert_eq!(read.path(), Some(path.as_path()));
    }

    #[test]
    fn read_missing_file_is_io_not_found() {
        let dir = TestTempDir::new("theme-missing");
        let err = Theme::read(&dir.child("absent.theme"), true).unwrap_err();
        match err {
            ThemeError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_replaces_fields_in_place() {
        let dir = TestTempDir::new("theme-load");
        let path = dir.child("shared.theme");
        Theme::new("replacement")
            .with_description("Replacement theme")
            .with_style("test", "bold red")
            .to_file(&path)
            .expect("write");

        let mut theme = sample_theme().with_path(&path);
        theme.load().expect("load");
        assert_eq!(theme.name(), "replacement");
        assert_eq!(theme.description(), "Replacement theme");
        assert_eq!(theme.path(), Some(path.as_path()));
    }

    #[test]
    fn load_without_path_fails() {
        let mut theme = sample_theme();
        assert!(matches!(theme.load(), Err(ThemeError::NoPath(_))));
    }

    #[test]
    fn preview_lines_cover_styles_and_path() {
        let theme = sample_theme().with_path("/tmp/dark.theme");
        let lines = theme.preview_lines(None, true, false);
        assert_eq!(lines[0], "Theme: dark");
        // One row per style plus header and path line.
        assert_eq!(lines.len(), theme.styles().len() + 2);
        assert!(lines[1].contains("error"));
        assert!(lines[1].contains(SAMPLE_TEXT));
        assert!(lines.last().unwrap().contains("/tmp/dark.theme"));

        let lines = theme.preview_lines(Some("Join the dark side"), false, false);
        assert!(lines[1].contains("Join the dark side"));
        assert!(!lines.last().unwrap().contains("path:"));
    }

    #[test]
    fn preview_colors_only_when_enabled() {
        let theme = Theme::new("x").with_style("error", "bold red");
        let plain = theme.preview_lines(None, false, false);
        assert!(!plain[1].contains('\u{1b}'));
        let colored = theme.preview_lines(None, false, true);
        assert!(colored[1].contains('\u{1b}'));
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use crate::style::Style;
        use proptest::prelude::*;

        fn color_strategy() -> impl Strategy<Value = Color> {
            prop_oneof![
                Just(Color::Red),
                Just(Color::DarkGreen),
                Just(Color::Yellow),
                Just(Color::Cyan),
                (any::<u8>(), any::<u8>(), any::<u8>())
                    .prop_map(|(r, g, b)| Color::Rgb { r, g, b }),
            ]
        }

        fn style_strategy() -> impl Strategy<Value = Style> {
            (
                proptest::option::of(color_strategy()),
                proptest::option::of(color_strategy()),
                proptest::collection::vec(0usize..8, 0..4),
            )
                .prop_map(|(color, bgcolor, attr_indexes)| {
                    let mut style = Style {
                        color,
                        bgcolor,
                        ..Style::default()
                    };
                    let attrs = [
                        Attribute::Bold,
                        Attribute::Dim,
                        Attribute::Italic,
                        Attribute::Underlined,
                        Attribute::SlowBlink,
                        Attribute::Reverse,
                        Attribute::Hidden,
                        Attribute::CrossedOut,
                    ];
                    for index in attr_indexes {
                        style.attributes.set(attrs[index]);
                    }
                    style
                })
        }

        fn theme_strategy() -> impl Strategy<Value = Theme> {
            (
                proptest::string::string_regex("[a-z][a-z0-9_-]{0,11}").expect("regex"),
                proptest::string::string_regex("[ -~]{0,30}").expect("regex"),
                proptest::collection::vec(
                    proptest::string::string_regex("[a-z]{1,8}").expect("regex"),
                    0..4,
                ),
                proptest::collection::btree_map(
                    proptest::string::string_regex("[a-z][a-z0-9_]{0,9}").expect("regex"),
                    style_strategy(),
                    0..6,
                ),
                any::<bool>(),
            )
                .prop_map(|(name, description, tags, styles, inherit)| {
                    let mut theme = Theme::new(name)
                        .with_description(description)
                        .with_tags(tags)
                        .with_inherit(inherit);
                    for (style_name, style) in styles {
                        theme = theme.with_style(style_name, style);
                    }
                    theme
                })
        }

        proptest! {
            #[test]
            fn config_round_trip_is_identity(theme in theme_strategy()) {
                let config = theme.to_config().expect("serialize");
                let parsed = Theme::from_config(&config, None, true).expect("parse");
                prop_assert_eq!(parsed, theme);
            }
        }
    }
}
