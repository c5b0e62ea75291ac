use crate::shared::text::{terminal_columns, wrap};
use std::io::{self, Write};

mod content;

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub summary: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub environment: &'a [HelpFlag<'a>],
    pub examples: &'a [&'a str],
    pub footer: &'a [&'a str],
}

pub fn print_help(out: &mut dyn Write) -> io::Result<()> {
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    for line in HelpPrinter::new(width).render(&content::book()) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn new(width: usize) -> Self {
        Self { width }
    }

    fn render(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(book.title.to_string());
        out.push(format!("usage: {}", book.usage));
        out.push(String::new());

        for line in book.summary {
            out.extend(wrap(line, self.width));
        }
        out.push(String::new());

        out.extend(self.render_block("Flags", book.flags));
        out.extend(self.render_block("Environment", book.environment));

        if !book.examples.is_empty() {
            out.push("Examples:".to_string());
            for ex in book.examples {
                out.push(format!("  {ex}"));
            }
            out.push(String::new());
        }

        for line in book.footer {
            out.extend(wrap(line, self.width));
        }
        out
    }

    fn render_block(&self, title: &str, rows: &[HelpFlag<'_>]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let min_desc = self.width / 2;
        let mut label_width =
            rows.iter().map(|r| r.name.len()).max().unwrap_or(0).min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        out.push(format!("{title}:"));
        for row in rows {
            let label_lines = wrap(row.name, label_width);
            let desc_lines = wrap(row.desc, desc_width);
            let count = label_lines.len().max(desc_lines.len());
            for idx in 0..count {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}"));
            }
        }
        out.push(String::new());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_flag() {
        let lines = HelpPrinter::new(80).render(&content::book());
        let text = lines.join("\n");
        for flag in ["-l", "-a", "-s <term>", "-d <pattern>", "--config", "--autocomplete", "--alias"] {
            assert!(text.contains(flag), "missing {flag}");
        }
        assert!(text.starts_with("Stamp Notes\nusage: note"));
    }

    #[test]
    fn help_respects_width() {
        let lines = HelpPrinter::new(64).render(&content::book());
        for line in lines {
            assert!(line.trim_end().chars().count() <= 64, "too wide: {line}");
        }
    }
}
