//! Line-oriented console sink for theme listings and previews.
//!
//! The sink is injectable so callers (and tests) can capture output instead
//! of writing to stdout. Styling decisions stay with the producer of each
//! line; the console only carries the color switch and delivers lines.

/// Output sink with a color preference.
#[derive(Debug)]
pub struct Console {
    color: bool,
    target: Target,
}

#[derive(Debug)]
enum Target {
    Stdout,
    Buffer(Vec<String>),
}

impl Console {
    /// Console writing to stdout, with optional ANSI color.
    pub fn stdout(color: bool) -> Self {
        Self {
            color,
            target: Target::Stdout,
        }
    }

    /// Console capturing lines in memory, with color disabled. Used for
    /// output redirection in tests.
    pub fn buffered() -> Self {
        Self {
            color: false,
            target: Target::Buffer(Vec::new()),
        }
    }

    /// Whether producers should emit ANSI styling for this console.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Deliver one line.
    pub fn line(&mut self, text: &str) {
        match &mut self.target {
            Target::Stdout => println!("{text}"),
            Target::Buffer(lines) => lines.push(text.to_string()),
        }
    }

    /// Captured lines; empty for stdout consoles.
    pub fn lines(&self) -> &[String] {
        match &self.target {
            Target::Stdout => &[],
            Target::Buffer(lines) => lines,
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout(true)
    }
}
