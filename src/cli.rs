//! CLI argument parsing via clap.

use clap::Parser;

/// Manage and preview style themes for terminal output.
#[derive(Debug, Parser)]
#[command(name = "swatch", version)]
pub struct Args {
    /// Print example output styled with a theme. Without a value, uses the
    /// `dark` theme.
    #[arg(long = "example", num_args = 0..=1, value_name = "THEME")]
    pub example: Option<Option<String>>,

    /// List available themes.
    #[arg(long = "list")]
    pub list: bool,

    /// Preview a theme's styles.
    #[arg(long = "preview", value_name = "THEME")]
    pub preview: Option<String>,

    /// Print the configuration document for a theme.
    #[arg(long = "config", value_name = "THEME")]
    pub config: Option<String>,

    /// Directory for theme files (default: ~/.config/swatch/themes).
    #[arg(long = "theme-dir", value_name = "DIR")]
    pub theme_dir: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
