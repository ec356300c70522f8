//! Colored output helpers for CLI

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup line
    pub fn banner(&self, addr: &str) {
        if self.colored {
            println!(
                "\n   {} {}  {}\n",
                "ident-server".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed(),
                format!("http://{}", addr).bright_white()
            );
        } else {
            println!(
                "\n   ident-server v{}  http://{}\n",
                env!("CARGO_PKG_VERSION"),
                addr
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n{}", title.bright_white().bold().underline());
        } else {
            println!("\n== {} ==", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("  {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("  {}: {}", key, value);
        }
    }

    /// Print an empty line
    pub fn newline(&self) {
        println!();
    }
}
