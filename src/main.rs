//! CLI entry point for swatch.
//!
//! Ships a set of default themes, keeps them reconciled with the user's
//! theme directory, and exposes list/preview/config/example commands.

mod cli;

use clap::{CommandFactory, Parser};
use crossterm::style::{Attribute, Attributes, Color};
use std::path::PathBuf;
use swatch::console::Console;
use swatch::error::ManagerError;
use swatch::manager::ThemeManager;
use swatch::style::Style;
use swatch::theme::Theme;

fn main() {
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if args.example.is_none() && !args.list && args.preview.is_none() && args.config.is_none() {
        let _ = cli::Args::command().print_help();
        return;
    }

    let theme_dir = match resolve_theme_dir(args.theme_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: failed to prepare theme directory: {e}");
            std::process::exit(1);
        }
    };

    let manager = match ThemeManager::new(Some(&theme_dir), builtin_themes()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let mut console = Console::stdout(!args.no_color);
    let result = run(&args, &manager, &mut console);
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(
    args: &cli::Args,
    manager: &ThemeManager,
    console: &mut Console,
) -> Result<(), ManagerError> {
    if let Some(example) = &args.example {
        let name = example.as_deref().unwrap_or("dark");
        let theme = manager.get(name)?;
        print_example(theme, console);
        return Ok(());
    }
    if args.list {
        return manager.list_themes(true, None, Some(console));
    }
    if let Some(name) = &args.preview {
        let theme = manager.get(name)?;
        ThemeManager::preview_theme(theme, None, true, Some(console));
        return Ok(());
    }
    if let Some(name) = &args.config {
        let theme = manager.get(name)?;
        let config = theme.to_config()?;
        for line in config.lines() {
            console.line(line);
        }
    }
    Ok(())
}

/// Print sample sentences with the theme's styles applied.
fn print_example(theme: &Theme, console: &mut Console) {
    let rows = [
        ("filepath", "This is an example filepath: ", "/usr/local/bin/swatch"),
        ("filename", "This is an example filename: ", "swatch"),
        ("hidden", "This is an example of a hidden filename: ", ".zshrc"),
        (
            "warning",
            "This is an example of a warning: ",
            "I've giv'n her all she's got captain, an' I canna give her no more.",
        ),
        (
            "error",
            "This is an example of an error: ",
            "I'm sorry, Dave. I'm afraid I can't do that.",
        ),
        ("highlight", "This is an example of a highlight: ", "foo"),
        ("num", "This is an example of a number: ", "42"),
        ("time", "This is an example of a time: ", "12:34"),
    ];

    console.line(&format!(
        "Example output using the `{}` theme styles:",
        theme.name()
    ));
    console.line("");
    for (style_name, prefix, text) in rows {
        let rendered = theme
            .styles()
            .get(style_name)
            .and_then(|spec| spec.resolve().ok())
            .filter(|_| console.color())
            .map(|style| style.apply(text))
            .unwrap_or_else(|| text.to_string());
        console.line(&format!("{prefix}{rendered}"));
    }
}

/// Resolve and create the theme directory: the `--theme-dir` override when
/// given, else the per-user default.
fn resolve_theme_dir(override_dir: Option<&str>) -> Result<PathBuf, std::io::Error> {
    let dir = match override_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_theme_dir().unwrap_or_else(|| PathBuf::from(".swatch-themes")),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default per-user theme directory (`~/.config/swatch/themes`).
fn default_theme_dir() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("swatch").join("themes"))
}

fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Default themes
// ---------------------------------------------------------------------------

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

fn attrs(list: &[Attribute]) -> Attributes {
    let mut set = Attributes::default();
    for attr in list {
        set.set(*attr);
    }
    set
}

fn styled(color: Color, attributes: &[Attribute]) -> Style {
    Style {
        color: Some(color),
        bgcolor: None,
        attributes: attrs(attributes),
    }
}

/// Themes shipped with the CLI. Files a user has edited in the theme
/// directory take precedence over these definitions.
fn builtin_themes() -> Vec<Theme> {
    use Attribute::{Bold, Dim, Italic, Underlined};

    let dark = Theme::new("dark")
        .with_description("Dark mode theme")
        .with_tags(["dark"])
        .with_style("hidden", styled(rgb(0x38, 0x3b, 0x3d), &[Dim]))
        .with_style("error", styled(rgb(255, 85, 85), &[Bold]))
        .with_style("filename", styled(rgb(189, 147, 249), &[Bold]))
        .with_style("filepath", styled(rgb(80, 250, 123), &[Bold]))
        .with_style(
            "highlight",
            Style {
                color: Some(rgb(0x00, 0x00, 0x00)),
                bgcolor: Some(rgb(0xd7, 0x3a, 0x49)),
                attributes: attrs(&[Bold]),
            },
        )
        .with_style("num", styled(rgb(139, 233, 253), &[Bold]))
        .with_style("time", styled(rgb(139, 233, 253), &[Bold]))
        .with_style("warning", styled(rgb(241, 250, 140), &[Bold]));

    let light = Theme::new("light")
        .with_description("Light mode theme")
        .with_style("hidden", styled(rgb(0x38, 0x3b, 0x3d), &[Dim]))
        .with_style(
            "error",
            styled(rgb(0xb3, 0x1d, 0x28), &[Bold, Underlined, Italic]),
        )
        .with_style("filename", styled(rgb(0x6f, 0x42, 0xc1), &[Bold]))
        .with_style("filepath", styled(rgb(0x22, 0x86, 0x3a), &[Bold]))
        .with_style(
            "highlight",
            Style {
                color: Some(rgb(0xff, 0xff, 0xff)),
                bgcolor: Some(rgb(0xd7, 0x3a, 0x49)),
                attributes: attrs(&[Bold]),
            },
        )
        .with_style("num", styled(rgb(0x00, 0x5c, 0xc5), &[Bold]))
        .with_style("time", styled(rgb(0x03, 0x2f, 0x62), &[Bold]))
        .with_style(
            "warning",
            styled(rgb(0xe3, 0x62, 0x09), &[Bold, Underlined, Italic]),
        );

    let mono = Theme::new("mono")
        .with_description("Monochromatic theme")
        .with_tags(["mono", "colorblind"])
        .with_style("hidden", "dim")
        .with_style("error", "reverse italic")
        .with_style("filename", "bold")
        .with_style("filepath", "bold underline")
        .with_style("highlight", "reverse italic")
        .with_style("num", "bold")
        .with_style("time", "bold")
        .with_style("warning", "bold italic");

    let plain = Theme::new("plain")
        .with_description("Plain theme with no colors")
        .with_tags(["colorblind"])
        .with_style("hidden", "")
        .with_style("error", "")
        .with_style("filename", "")
        .with_style("filepath", "")
        .with_style("highlight", "")
        .with_style("num", "")
        .with_style("time", "")
        .with_style("warning", "");

    vec![dark, light, mono, plain]
}
