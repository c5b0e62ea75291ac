use crate::matcher::NameMatcher;
use crate::note::is_note_name;
use crate::shared::archive::{archive_dir, archive_label, is_archive_name};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Names of the notes in `directory` matching `pattern`. With
/// `include_subdirs` nested notes are returned as `sub/name.md`; the archive
/// directory is never descended into. Unreadable entries are skipped.
pub fn scan(
    directory: &Path,
    pattern: &str,
    include_subdirs: bool,
) -> HashSet<String> {
    let matcher = NameMatcher::new(pattern);
    let mut found = HashSet::new();

    if include_subdirs {
        let walker = WalkDir::new(directory)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !(e.depth() == 1 && is_archive_entry(e)));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rel) = entry
                .path()
                .strip_prefix(directory)
                .ok()
                .and_then(utf8_relative_name)
            else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 name");
                continue;
            };
            let name = rel.rsplit('/').next().unwrap_or(rel.as_str());
            if is_note_name(name) && matcher.is_match(name) {
                found.insert(rel);
            }
        }
        return found;
    }

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %directory.display(), %err, "cannot read directory");
            return found;
        }
    };
    for entry in entries {
        let Ok(entry) = entry else { continue };
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string)
        else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 name");
            continue;
        };
        if is_note_name(&name) && matcher.is_match(&name) {
            found.insert(name);
        }
    }
    found
}

/// `sub/name.md` for a path relative to the scanned directory; `None` when
/// any component is not valid UTF-8.
fn utf8_relative_name(rel: &Path) -> Option<String> {
    let parts = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn is_archive_entry(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(is_archive_name)
}

/// Sorted listing of the notes matching `pattern`. Archived notes are
/// appended as `Archive/name.md` when requested.
pub fn list_notes(
    notes_dir: &Path,
    pattern: &str,
    include_archived: bool,
    recursive: bool,
) -> Vec<String> {
    let mut names: Vec<String> =
        scan(notes_dir, pattern, recursive).into_iter().collect();

    if include_archived {
        let label = archive_label(notes_dir);
        names.extend(
            scan(&archive_dir(notes_dir), pattern, recursive)
                .into_iter()
                .map(|name| format!("{label}/{name}")),
        );
    }

    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        if let Some(parent) = dir.join(name).parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(dir.join(name), "x\n").unwrap();
    }

    #[test]
    fn only_markdown_files_count() {
        let tmp = tempdir().unwrap();
        for name in ["a.md", "b.md", "c.md"] {
            touch(tmp.path(), name);
        }
        for name in ["a.txt", "notes.md.bak", "README"] {
            touch(tmp.path(), name);
        }
        fs::create_dir(tmp.path().join("dir.md")).unwrap();
        assert_eq!(scan(tmp.path(), "", false).len(), 3);
    }

    #[test]
    fn pattern_filters_names() {
        let tmp = tempdir().unwrap();
        for name in ["temp1.md", "temp2.md", "keep.md"] {
            touch(tmp.path(), name);
        }
        let found = scan(tmp.path(), "temp*", false);
        assert_eq!(found.len(), 2);
        assert!(found.contains("temp1.md"));
        assert!(found.contains("temp2.md"));
    }

    #[test]
    fn missing_directory_is_empty() {
        let tmp = tempdir().unwrap();
        assert!(scan(&tmp.path().join("nope"), "", false).is_empty());
        assert!(scan(&tmp.path().join("nope"), "", true).is_empty());
    }

    #[test]
    fn recursive_scan_skips_archive() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "top.md");
        touch(tmp.path(), "work/nested.md");
        touch(tmp.path(), "Archive/old.md");

        let flat = scan(tmp.path(), "", false);
        assert_eq!(flat.len(), 1);

        let deep = scan(tmp.path(), "", true);
        assert_eq!(deep.len(), 2);
        assert!(deep.contains("top.md"));
        assert!(deep.contains("work/nested.md"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_skipped_in_both_modes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        touch(tmp.path(), "good.md");
        touch(tmp.path(), "work/nested.md");
        let bad = OsStr::from_bytes(b"bad\xff.md");
        if fs::write(tmp.path().join(bad), "x\n").is_err() {
            // File system refuses non UTF-8 names.
            return;
        }
        fs::create_dir(tmp.path().join(OsStr::from_bytes(b"dir\xfe"))).unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"dir\xfe")).join("inner.md"), "x\n")
            .unwrap();

        let flat = scan(tmp.path(), "", false);
        assert_eq!(flat.len(), 1);
        assert!(flat.contains("good.md"));

        let deep = scan(tmp.path(), "", true);
        assert_eq!(deep.len(), 2);
        assert!(deep.contains("good.md"));
        assert!(deep.contains("work/nested.md"));
    }

    #[test]
    fn archive_inclusive_listing_is_prefixed_and_sorted() {
        let tmp = tempdir().unwrap();
        touch(tmp.path(), "b.md");
        touch(tmp.path(), "a.md");
        touch(tmp.path(), "Archive/c.md");

        assert_eq!(list_notes(tmp.path(), "", false, false), vec!["a.md", "b.md"]);
        assert_eq!(
            list_notes(tmp.path(), "", true, false),
            vec!["Archive/c.md", "a.md", "b.md"]
        );
        assert_eq!(
            list_notes(tmp.path(), "c", true, false),
            vec!["Archive/c.md"]
        );
    }

    #[test]
    fn listing_is_idempotent() {
        let tmp = tempdir().unwrap();
        for name in ["x.md", "y.md", "z.md"] {
            touch(tmp.path(), name);
        }
        assert_eq!(
            list_notes(tmp.path(), "", true, false),
            list_notes(tmp.path(), "", true, false)
        );
    }
}
