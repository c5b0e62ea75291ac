use chrono::{Local, NaiveDate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const NOTE_EXT: &str = "md";
pub const DATE_STAMP_FMT: &str = "%Y%m%d";

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether a file name looks like a note. The extension is matched
/// case-insensitively, like note names.
pub fn is_note_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXT))
}

/// `name` without its note extension, if it has one.
pub fn strip_note_ext(name: &str) -> &str {
    if is_note_name(name) {
        &name[..name.len() - NOTE_EXT.len() - 1]
    } else {
        name
    }
}

/// Turn a joined title into the name part of a file: trimmed, inner
/// whitespace runs become single underscores, path separators are dropped.
pub fn normalize_name(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-")
}

/// File name for a note created on `date`, e.g. `daily_standup-20240131.md`.
pub fn stamped_file_name(title: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{NOTE_EXT}",
        normalize_name(title),
        date.format(DATE_STAMP_FMT)
    )
}

pub fn note_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

/// Starting content for a freshly created note.
pub fn initial_content(title: &str) -> String {
    format!("# {}\n\n", title.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(normalize_name("daily standup"), "daily_standup");
        assert_eq!(normalize_name("  a   b  "), "a_b");
        assert_eq!(normalize_name("x/y"), "x-y");
    }

    #[test]
    fn stamped_names() {
        assert_eq!(
            stamped_file_name("daily standup", date(2021, 1, 1)),
            "daily_standup-20210101.md"
        );
        assert_eq!(
            stamped_file_name("Meeting-Notes", date(2024, 12, 31)),
            "Meeting-Notes-20241231.md"
        );
    }

    #[test]
    fn note_names() {
        assert!(is_note_name("a.md"));
        assert!(is_note_name("Archive/a.md"));
        assert!(!is_note_name("a.txt"));
        assert!(!is_note_name("md"));
        assert!(!is_note_name("a.md.bak"));
        assert!(is_note_name("foo.MD"));
        assert!(is_note_name("foo.Md"));
    }

    #[test]
    fn extension_is_stripped_in_any_case() {
        assert_eq!(strip_note_ext("plan.md"), "plan");
        assert_eq!(strip_note_ext("plan.MD"), "plan");
        assert_eq!(strip_note_ext("plan"), "plan");
        assert_eq!(strip_note_ext("plan.txt"), "plan.txt");
    }

    #[test]
    fn initial_content_has_heading() {
        assert_eq!(initial_content(" Plan "), "# Plan\n\n");
    }
}
