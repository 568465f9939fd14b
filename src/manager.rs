//! In-memory theme registry, optionally synchronized with a directory of
//! theme files.
//!
//! Reconciliation rule: in-code default themes are written out when no file
//! exists for them, but a file that already exists is never overwritten by a
//! default. User edits on disk win across runs.

use crate::console::Console;
use crate::error::{ManagerError, ThemeError};
use crate::theme::{Theme, THEME_FILE_SUFFIX};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry of themes, keyed by name in insertion order.
#[derive(Debug, Default)]
pub struct ThemeManager {
    theme_dir: Option<PathBuf>,
    themes: Vec<Theme>,
}

impl ThemeManager {
    /// Build a registry from optional defaults and an optional theme
    /// directory, which must already exist.
    ///
    /// Defaults are added first (writing files that are missing on disk),
    /// then any theme files present in the directory for names *not* covered
    /// by the defaults are loaded. A default whose file already exists stays
    /// in the registry as provided; the on-disk version can still be pulled
    /// in explicitly with [`ThemeManager::load_themes`].
    pub fn new(theme_dir: Option<&Path>, themes: Vec<Theme>) -> Result<Self, ManagerError> {
        if let Some(dir) = theme_dir {
            if !dir.is_dir() {
                return Err(ManagerError::DirNotFound(dir.to_path_buf()));
            }
        }

        let mut manager = Self {
            theme_dir: theme_dir.map(PathBuf::from),
            themes: Vec::new(),
        };
        for theme in themes {
            manager.add(theme, false)?;
        }

        if let Some(dir) = manager.theme_dir.clone() {
            let known: BTreeSet<String> = manager
                .themes
                .iter()
                .map(|theme| theme.name().to_string())
                .collect();
            for path in theme_files(&dir)? {
                let covered = path
                    .file_stem()
                    .map(|stem| known.contains(&stem.to_string_lossy().into_owned()))
                    .unwrap_or(false);
                if covered {
                    continue;
                }
                manager.themes.push(Theme::read(&path, true)?);
            }
        }
        Ok(manager)
    }

    /// Managed themes in registry order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn theme_dir(&self) -> Option<&Path> {
        self.theme_dir.as_deref()
    }

    /// Add a theme to the registry.
    ///
    /// With a theme directory configured, the theme's path is pointed at
    /// `<dir>/<name>.theme` and the file is written when missing or when
    /// `overwrite` is set; an existing file is otherwise left untouched.
    /// The theme is appended to the registry either way. Duplicate names are
    /// not rejected; [`ThemeManager::get`] returns the first match.
    pub fn add(&mut self, mut theme: Theme, overwrite: bool) -> Result<(), ManagerError> {
        if let Some(dir) = &self.theme_dir {
            theme.set_path(dir.join(format!("{}.{THEME_FILE_SUFFIX}", theme.name())));
        }
        if theme.path().is_some() {
            match theme.save(overwrite) {
                Ok(()) => {}
                // Existing file wins over the in-code default.
                Err(ThemeError::AlreadyExists(_)) => {
                    tracing::debug!(theme = %theme.name(), "keeping existing theme file");
                }
                Err(e) => return Err(e.into()),
            }
        }
        self.themes.push(theme);
        Ok(())
    }

    /// Remove the first theme matching `name`, deleting its backing file if
    /// one exists. Returns the removed theme.
    pub fn remove(&mut self, name: &str) -> Result<Theme, ManagerError> {
        let index = self
            .themes
            .iter()
            .position(|theme| theme.name() == name)
            .ok_or_else(|| ManagerError::NotFound(name.to_string()))?;
        let theme = self.themes.remove(index);
        if let Some(path) = theme.path() {
            if path.exists() {
                fs::remove_file(path)?;
                tracing::debug!(theme = %name, path = %path.display(), "deleted theme file");
            }
        }
        Ok(theme)
    }

    /// Look up a theme by name, first match in registry order.
    pub fn get(&self, name: &str) -> Result<&Theme, ManagerError> {
        self.themes
            .iter()
            .find(|theme| theme.name() == name)
            .ok_or_else(|| ManagerError::NotFound(name.to_string()))
    }

    /// Load every `.theme` file from `dir` (or the configured directory) into
    /// the registry, sorted by file name. Already-registered names are not
    /// deduplicated.
    pub fn load_themes(&mut self, dir: Option<&Path>) -> Result<(), ManagerError> {
        let dir = dir
            .map(PathBuf::from)
            .or_else(|| self.theme_dir.clone())
            .ok_or(ManagerError::NoThemeDir)?;
        for path in theme_files(&dir)? {
            let theme = Theme::read(&path, true)?;
            tracing::debug!(theme = %theme.name(), path = %path.display(), "loaded theme file");
            self.themes.push(theme);
        }
        Ok(())
    }

    /// Write every managed theme that has a path, honoring `overwrite` the
    /// same way [`ThemeManager::add`] does. Pathless themes are skipped.
    pub fn write_themes(&self, overwrite: bool) -> Result<(), ManagerError> {
        for theme in &self.themes {
            if theme.path().is_none() {
                continue;
            }
            match theme.save(overwrite) {
                Ok(()) | Err(ThemeError::AlreadyExists(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Print a one-line summary per theme: name, description, tags, and the
    /// backing path when `show_path` is set.
    ///
    /// With `names` given, only those themes are listed; requesting a name
    /// that is not registered is an error, consistent with
    /// [`ThemeManager::get`].
    pub fn list_themes(
        &self,
        show_path: bool,
        names: Option<&[&str]>,
        console: Option<&mut Console>,
    ) -> Result<(), ManagerError> {
        if let Some(requested) = names {
            for name in requested {
                if !self.themes.iter().any(|theme| theme.name() == *name) {
                    return Err(ManagerError::NotFound((*name).to_string()));
                }
            }
        }
        let selected: Vec<&Theme> = self
            .themes
            .iter()
            .filter(|theme| names.map_or(true, |requested| requested.contains(&theme.name())))
            .collect();

        let name_width = column_width("Theme", selected.iter().map(|t| t.name()));
        let description_width =
            column_width("Description", selected.iter().map(|t| t.description()));

        let mut fallback = Console::default();
        let console = console.unwrap_or(&mut fallback);
        let mut header = format!("{:<name_width$}  {:<description_width$}  Tags", "Theme", "Description");
        if show_path {
            header.push_str("  Path");
        }
        console.line(&header);
        for theme in selected {
            let mut line = format!(
                "{:<name_width$}  {:<description_width$}  {}",
                theme.name(),
                theme.description(),
                theme.tags().join(", "),
            );
            if show_path {
                if let Some(path) = theme.path() {
                    line.push_str(&format!("  {}", path.display()));
                }
            }
            console.line(&line);
        }
        Ok(())
    }

    /// Preview one theme's styles on a console. Stateless: does not need a
    /// registry instance.
    pub fn preview_theme(
        theme: &Theme,
        sample_text: Option<&str>,
        show_path: bool,
        console: Option<&mut Console>,
    ) {
        let mut fallback = Console::default();
        let console = console.unwrap_or(&mut fallback);
        for line in theme.preview_lines(sample_text, show_path, console.color()) {
            console.line(&line);
        }
    }
}

/// `.theme` files directly inside `dir`, sorted by file name so registry
/// order does not depend on platform enumeration order.
fn theme_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == THEME_FILE_SUFFIX)
        })
        .collect();
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}

/// Padded column width covering a header and every value.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).chain([header.len()]).max().unwrap_or(0)
}
