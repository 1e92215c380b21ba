//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. Prose is wrapped to the terminal width minus a
//! margin.

use std::io;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::{FmtText, MadSkin};
use thiserror::Error;

const CODE_THEME: &str = "base16-ocean.dark";

/// Columns left free on the right of rendered text.
const WIDTH_MARGIN: u16 = 20;
const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("syntax theme '{0}' is not available")]
    MissingTheme(&'static str),

    #[error("failed to highlight code: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Wrap width for a measured terminal size.
pub fn wrap_width(size: io::Result<(u16, u16)>) -> usize {
    match size {
        Ok((cols, _)) if cols > WIDTH_MARGIN => usize::from(cols - WIDTH_MARGIN),
        _ => FALLBACK_WIDTH,
    }
}

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl ChatRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        let theme = ThemeSet::load_defaults()
            .themes
            .remove(CODE_THEME)
            .ok_or(RenderError::MissingTheme(CODE_THEME))?;

        Ok(Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Render markdown wrapped to the current terminal width.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self.render_with_width(markdown, wrap_width(crossterm::terminal::size()))
    }

    /// Render a complete markdown document.
    ///
    /// Code fences are highlighted via syntect; everything else is rendered
    /// through termimad in runs so lists and paragraphs wrap together.
    pub fn render_with_width(&self, markdown: &str, width: usize) -> Result<String, RenderError> {
        let mut output = String::new();
        let mut prose = String::new();
        let mut code: Option<(String, String)> = None;

        for line in markdown.lines() {
            let fence = line.trim_start().starts_with("```");
            match code.take() {
                Some((lang, buf)) if fence => {
                    output.push_str(&self.highlight_code(&buf, &lang)?);
                }
                Some((lang, mut buf)) => {
                    buf.push_str(line);
                    buf.push('\n');
                    code = Some((lang, buf));
                }
                None if fence => {
                    self.flush_prose(&mut prose, width, &mut output);
                    let lang = line.trim_start().trim_start_matches('`').trim().to_string();
                    code = Some((lang, String::new()));
                }
                None => {
                    prose.push_str(line);
                    prose.push('\n');
                }
            }
        }

        // Unclosed code block
        if let Some((lang, buf)) = code {
            output.push_str(&self.highlight_code(&buf, &lang)?);
        }
        self.flush_prose(&mut prose, width, &mut output);

        Ok(output)
    }

    fn flush_prose(&self, prose: &mut String, width: usize, output: &mut String) {
        if prose.is_empty() {
            return;
        }
        output.push_str(&FmtText::from(&self.skin, prose.as_str(), Some(width)).to_string());
        prose.clear();
    }

    /// Highlight a code block using syntect.
    fn highlight_code(&self, code: &str, lang: &str) -> Result<String, RenderError> {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut h = HighlightLines::new(syntax, &self.theme);
        let mut output = String::new();
        if !lang.is_empty() {
            output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));
        }

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h.highlight_line(line, &self.syntax_set)?;
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        Ok(output)
    }
}
