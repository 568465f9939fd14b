//! Swatch — named style themes for terminal output.
//!
//! A [`theme::Theme`] is a named, taggable collection of style definitions
//! (`"error"` → `"bold red"`). Themes serialize to human-editable `.theme`
//! files and back, preserving equality. A [`manager::ThemeManager`] keeps a
//! registry of themes, optionally synchronized with a directory: in-code
//! defaults are written out once, while files a user has edited are never
//! clobbered.
//!
//! # Quick start
//!
//! ```no_run
//! use swatch::manager::ThemeManager;
//! use swatch::theme::Theme;
//!
//! let defaults = vec![
//!     Theme::new("mono")
//!         .with_description("Monochromatic theme")
//!         .with_style("error", "reverse italic"),
//! ];
//! let manager = ThemeManager::new(Some("themes".as_ref()), defaults).unwrap();
//! let mono = manager.get("mono").unwrap();
//! for line in mono.preview_lines(None, true, true) {
//!     println!("{line}");
//! }
//! ```

pub mod console;
pub mod error;
pub mod manager;
pub mod style;
#[cfg(test)]
pub mod testsupport;
pub mod theme;
