use std::path::{Path, PathBuf};

/// Directory names accepted for the archive, in order of preference.
pub const ARCHIVE_NAMES: [&str; 2] = ["Archive", "archive"];

/// The archive directory under `notes_dir`. Either capitalization is
/// accepted when it already exists; `Archive` is used when it must be
/// created.
pub fn archive_dir(notes_dir: &Path) -> PathBuf {
    ARCHIVE_NAMES
        .iter()
        .map(|name| notes_dir.join(name))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| notes_dir.join(ARCHIVE_NAMES[0]))
}

/// Name of the archive directory as shown in listings.
pub fn archive_label(notes_dir: &Path) -> String {
    archive_dir(notes_dir)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(ARCHIVE_NAMES[0])
        .to_string()
}

/// Whether `name` names an archive directory.
pub fn is_archive_name(name: &str) -> bool {
    ARCHIVE_NAMES.contains(&name)
}
