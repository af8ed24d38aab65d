//! Terminal rendering of the planner's markdown output
//!
//! Rich mode runs the markdown through a termimad skin so stop lists and
//! schedule tables come out as aligned terminal tables. Plain mode prints the
//! markdown unchanged, which keeps output stable for scripts and tests.

use std::{
    fmt::Display,
    io::{self, Write},
};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.table.set_fg(Color::DarkGrey);

        Self { rich_enabled, skin }
    }

    /// Render a markdown value to stdout
    pub fn render(&self, content: &impl Display) -> Result<()> {
        let markdown = content.to_string();
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            write!(out, "{}", self.skin.term_text(&markdown))?;
        } else {
            write!(out, "{markdown}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write a document (CSV, HTML) to stdout without markdown processing
    pub fn write_raw(&self, document: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(document.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_rich_text_keeps_table_cells() {
        let renderer = TerminalRenderer::new(true);
        let text = renderer
            .skin
            .term_text("| Port | Days |\n|---|---|\n| Nevelsk | 1 |\n")
            .to_string();
        assert!(text.contains("Nevelsk"));
    }
}
