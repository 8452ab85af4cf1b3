//! Colored console output.
//!
//! Status lines go to stdout, warnings and errors to stderr. `--quiet`
//! silences everything but errors; `--verbose` enables [`OutputManager::verbose`].

use owo_colors::{OwoColorize, Stream};
use std::io::{self, Write};

pub mod symbols {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const WARNING: &str = "⚠️ ";
    pub const INFO: &str = "ℹ️ ";
    pub const ITEM: &str = "✓";
    pub const BULLET: &str = "•";
}

/// Console output honoring `--verbose` / `--quiet`.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout(),
            "{} {}",
            symbols::SUCCESS,
            message.if_supports_color(Stream::Stdout, |s| s.green())
        )
    }

    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout(),
            "{} {}",
            symbols::INFO,
            message.if_supports_color(Stream::Stdout, |s| s.blue())
        )
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stderr(),
            "{} {}",
            symbols::WARNING,
            message.if_supports_color(Stream::Stderr, |s| s.yellow())
        )
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr(),
            "{} {}",
            symbols::ERROR,
            message.if_supports_color(Stream::Stderr, |s| s.red())
        )
    }

    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout(),
            "  {}",
            message.if_supports_color(Stream::Stdout, |s| s.dimmed())
        )
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout(),
            "{}",
            message.if_supports_color(Stream::Stdout, |s| s.cyan())
        )
    }

    /// Banner between pipeline stages.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let rule = "=".repeat(60);
        let mut out = io::stdout();
        writeln!(out)?;
        writeln!(out, "{}", rule.if_supports_color(Stream::Stdout, |s| s.cyan()))?;
        writeln!(
            out,
            "{}",
            title.if_supports_color(Stream::Stdout, |s| s.bold())
        )?;
        writeln!(out, "{}", rule.if_supports_color(Stream::Stdout, |s| s.cyan()))?;
        writeln!(out)
    }

    /// Bold label opening a summary block.
    pub fn heading(&self, label: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout())?;
        writeln!(
            io::stdout(),
            "{}",
            label.if_supports_color(Stream::Stdout, |s| s.bold())
        )
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "  {}", message)
    }

    /// Pretty-printed JSON on stdout. Printed even in quiet mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{}", json)?;
        Ok(())
    }
}
