use crate::config::Config;
use crate::editor::{Launcher, open_in_editor};
use crate::error::{Error, Result};
use crate::note::{
    ensure_dir, initial_content, is_note_name, note_path, stamped_file_name,
    strip_note_ext,
};
use crate::scan::scan;
use crate::shared::archive::archive_dir;
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Move a note into the archive. Falls back to copy + delete only when the
/// archive is on another file system. Never overwrites, and never leaves the
/// note in both places.
pub fn move_to_archive(src: &Path, dst: &Path) -> io::Result<()> {
    if dst.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dst.display()),
        ));
    }
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!(src = %src.display(), %err, "rename crosses devices; copying instead");
            copy_then_remove(src, dst, |path| fs::remove_file(path))
        }
        Err(err) => Err(err),
    }
}

/// Copy `src` to `dst`, then remove `src`. On failure `dst` is removed again
/// so only the original remains.
fn copy_then_remove(
    src: &Path,
    dst: &Path,
    remove: impl FnOnce(&Path) -> io::Result<()>,
) -> io::Result<()> {
    let result = fs::copy(src, dst).and_then(|_| remove(src));
    if result.is_err() {
        if let Err(err) = fs::remove_file(dst) {
            debug!(dst = %dst.display(), %err, "could not remove partial copy");
        }
    }
    result
}

/// Archive every top-level note matching `pattern`. Each failure is reported
/// on `err` and the remaining notes are still processed.
pub fn archive_notes(
    notes_dir: &Path,
    pattern: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<usize> {
    if pattern.trim().is_empty() {
        return Err(Error::usage("Provide a pattern after -d"));
    }
    let mut names: Vec<String> = scan(notes_dir, pattern, false).into_iter().collect();
    names.sort();
    if names.is_empty() {
        let _ = writeln!(err, "No notes matched.");
        return Ok(0);
    }

    let archive = archive_dir(notes_dir);
    ensure_dir(&archive).map_err(|e| Error::io(&archive, e))?;

    let mut moved = 0;
    let mut failed = 0;
    for name in names {
        let src = notes_dir.join(&name);
        match move_to_archive(&src, &archive.join(&name)) {
            Ok(()) => {
                moved += 1;
                writeln!(out, "Archived {name}").map_err(|e| Error::io(&src, e))?;
            }
            Err(e) => {
                failed += 1;
                let _ = writeln!(err, "error: could not archive {name}: {e}");
            }
        }
    }

    if failed > 0 {
        return Err(Error::Archive { failed });
    }
    Ok(moved)
}

/// Open the note `name` refers to, creating today's note when needed.
/// Returns the path handed to the editor.
pub fn create_or_open(
    config: &Config,
    name: &str,
    date: NaiveDate,
    launcher: &dyn Launcher,
    out: &mut dyn Write,
) -> Result<PathBuf> {
    let dir = &config.notes_dir;
    if !stays_inside(name.trim()) {
        return Err(Error::usage(format!(
            "Note name must stay inside the notes directory: {}",
            name.trim()
        )));
    }
    ensure_dir(dir).map_err(|e| Error::io(dir, e))?;

    let path = match existing_note(dir, name) {
        Some(path) => path,
        None => {
            let title = strip_note_ext(name.trim());
            if title.trim().is_empty() {
                return Err(Error::usage("Provide a name for the note"));
            }
            let path = note_path(dir, &stamped_file_name(title, date));
            if !path.exists() {
                fs::write(&path, initial_content(title))
                    .map_err(|e| Error::io(&path, e))?;
                let file = path.file_name().unwrap_or_default().to_string_lossy();
                writeln!(out, "Created {file}").map_err(|e| Error::io(&path, e))?;
            }
            path
        }
    };

    open_in_editor(launcher, &config.editor, &path)?;
    Ok(path)
}

/// Only plain relative components: no `..`, root or drive prefix.
fn stays_inside(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// A note named exactly `name` (with its extension), live or archived.
fn existing_note(dir: &Path, name: &str) -> Option<PathBuf> {
    let name = name.trim();
    if !is_note_name(name) {
        return None;
    }
    [dir.to_path_buf(), archive_dir(dir)]
        .into_iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
}
