use regex::{Regex, RegexBuilder};
use std::io::IsTerminal;
use std::ops::Range;
use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // line numbers, muted text
    pub secondary: (u8, u8, u8), // file headers
    pub highlight: (u8, u8, u8), // search matches
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        highlight: (243, 139, 168), // Pink
    };
}

/// Formatting context passed through rendering pipeline
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    /// Color only when stdout is a terminal and `NO_COLOR` is unset;
    /// `CLICOLOR_FORCE` turns it back on for pipes.
    pub fn from_env() -> Self {
        let forced = std::env::var("CLICOLOR_FORCE")
            .map(|v| !v.is_empty() && v != "0")
            .unwrap_or(false);
        let use_color = forced
            || (std::io::stdout().is_terminal()
                && std::env::var_os("NO_COLOR").is_none());
        Self::new(use_color)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            text.rgb(r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_muted(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.primary;
            text.rgb(r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    /// Wrap every case-insensitive occurrence of `term` in a highlight.
    /// Plain output is returned untouched.
    pub fn highlight_match(&self, text: &str, term: &str) -> String {
        if term.is_empty() || !self.use_color {
            return text.to_string();
        }
        let Ok(Some(finder)) = TermFinder::new(term) else {
            return text.to_string();
        };

        let (r, g, b) = self.palette.highlight;
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in finder.spans(text) {
            // Spans come from the original text, in order, never overlapping.
            let (Some(before), Some(matched)) =
                (text.get(cursor..span.start), text.get(span.clone()))
            else {
                break;
            };
            out.push_str(before);
            out.push_str(&matched.rgb(r, g, b).bold().to_string());
            cursor = span.end;
        }
        out.push_str(text.get(cursor..).unwrap_or_default());
        out
    }
}

/// Case-insensitive literal search for a term.
pub struct TermFinder {
    regex: Regex,
}

/// Compiled size allowed for a term's matcher; the regex crate's default.
pub const TERM_SIZE_LIMIT: usize = 10 * (1 << 20);

impl TermFinder {
    /// `Ok(None)` for an empty term. Fails when the term is too large to
    /// compile.
    pub fn new(term: &str) -> Result<Option<Self>, regex::Error> {
        Self::with_size_limit(term, TERM_SIZE_LIMIT)
    }

    pub fn with_size_limit(
        term: &str,
        size_limit: usize,
    ) -> Result<Option<Self>, regex::Error> {
        if term.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()?;
        Ok(Some(Self { regex }))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Non-overlapping byte ranges of every occurrence, left to right.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }
}
