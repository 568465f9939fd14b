//! Unified error types for themes and the theme registry.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// StyleError
// ---------------------------------------------------------------------------

/// Errors from parsing a style expression string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Hex color token was not `#RRGGBB`.
    InvalidHex(String),
    /// `rgb(...)` token had a missing or out-of-range component.
    InvalidRgb(String),
    /// Token is neither a known attribute nor a color.
    UnknownToken(String),
    /// `on` appeared without a background color after it.
    MissingBackground,
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(token) => {
                write!(f, "invalid hex color `{token}` (expected #RRGGBB)")
            }
            Self::InvalidRgb(token) => {
                write!(f, "invalid rgb color `{token}` (expected rgb(r,g,b))")
            }
            Self::UnknownToken(token) => write!(f, "unsupported style token `{token}`"),
            Self::MissingBackground => write!(f, "missing background color after `on`"),
        }
    }
}

impl std::error::Error for StyleError {}

// ---------------------------------------------------------------------------
// ThemeError
// ---------------------------------------------------------------------------

/// Errors when reading, writing, or parsing a single theme.
#[derive(Debug)]
pub enum ThemeError {
    Io(std::io::Error),
    /// Configuration text could not be parsed into a theme. `source` is the
    /// originating file when known, for error messages only.
    Format {
        source: Option<PathBuf>,
        message: String,
    },
    /// `save` or `load` was called on a theme with no backing path.
    NoPath(String),
    /// `save` would clobber an existing file and `overwrite` was not set.
    AlreadyExists(PathBuf),
}

impl ThemeError {
    /// Build a format error, attaching the source label when available.
    pub(crate) fn format(source: Option<&std::path::Path>, message: impl Into<String>) -> Self {
        Self::Format {
            source: source.map(PathBuf::from),
            message: message.into(),
        }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Format {
                source: Some(path),
                message,
            } => write!(f, "invalid theme config `{}`: {message}", path.display()),
            Self::Format {
                source: None,
                message,
            } => write!(f, "invalid theme config: {message}"),
            Self::NoPath(name) => write!(f, "no path set for theme `{name}`"),
            Self::AlreadyExists(path) => {
                write!(f, "theme file already exists at `{}`", path.display())
            }
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<std::io::Error> for ThemeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ManagerError — registry-level
// ---------------------------------------------------------------------------

/// Errors from `ThemeManager` registry and directory operations.
#[derive(Debug)]
pub enum ManagerError {
    /// Theme directory passed to the constructor does not exist.
    DirNotFound(PathBuf),
    /// Operation needed a theme directory but none is configured.
    NoThemeDir,
    /// Requested theme name is not in the registry.
    NotFound(String),
    Theme(ThemeError),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirNotFound(path) => {
                write!(f, "theme directory `{}` does not exist", path.display())
            }
            Self::NoThemeDir => write!(f, "no theme directory configured"),
            Self::NotFound(name) => write!(f, "no theme found named `{name}`"),
            Self::Theme(e) => write!(f, "theme: {e}"),
        }
    }
}

impl std::error::Error for ManagerError {}

impl From<ThemeError> for ManagerError {
    fn from(e: ThemeError) -> Self {
        Self::Theme(e)
    }
}

impl From<std::io::Error> for ManagerError {
    fn from(e: std::io::Error) -> Self {
        Self::Theme(ThemeError::Io(e))
    }
}
