use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "stamp_notes";
const CONFIG_FILE: &str = "config.toml";

/// Settings every command runs with. Built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Command used to open notes; may include arguments.
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default = "default_notes_dir")]
    pub notes_dir: PathBuf,
    /// Descend into subdirectories of the notes directory when listing and
    /// searching.
    #[serde(default)]
    pub recursive: bool,
}

fn default_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from("~/notes")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            notes_dir: default_notes_dir(),
            recursive: false,
        }
    }
}

impl Config {
    /// Expand `~` and resolve symlinks so later code sees a real path.
    pub fn resolve(mut self) -> Result<Self> {
        let expanded = expand_tilde(&self.notes_dir)?;
        let absolute = std::path::absolute(&expanded)
            .map_err(|e| Error::io(&expanded, e))?;
        self.notes_dir = fs::canonicalize(&absolute).unwrap_or(absolute);
        Ok(self)
    }

    pub fn with_notes_dir_override(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.is_empty()) {
            self.notes_dir = PathBuf::from(dir);
        }
        self
    }
}

/// `$STAMP_NOTES_CONFIG`, or `config.toml` in the platform config dir.
pub fn config_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("STAMP_NOTES_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    let dir = dirs::config_dir().ok_or_else(|| {
        Error::Config("could not determine config directory".into())
    })?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Read a config file; a missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(e.to_string()))?;
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// The fully resolved configuration for this process.
pub fn load_config() -> Result<Config> {
    let path = config_file()?;
    let config = read_config(&path)?
        .with_notes_dir_override(std::env::var("STAMP_NOTES_DIR").ok())
        .resolve()?;
    tracing::debug!(config = %path.display(), notes_dir = %config.notes_dir.display(), "loaded config");
    Ok(config)
}

pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| {
        Error::Config("could not determine home directory".into())
    })?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempdir().unwrap();
        let config = read_config(&tmp.path().join("none.toml")).unwrap();
        assert_eq!(config.notes_dir, PathBuf::from("~/notes"));
        assert!(!config.recursive);
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn config_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = Config {
            editor: "nano".into(),
            notes_dir: PathBuf::from("/srv/notes"),
            recursive: true,
        };
        save_config(&config, &path).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "editor = \"hx\"\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.editor, "hx");
        assert_eq!(config.notes_dir, PathBuf::from("~/notes"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "editor = [").unwrap();
        assert!(matches!(read_config(&path), Err(Error::Config(_))));
    }

    #[test]
    fn resolve_follows_symlinks() {
        let tmp = tempdir().unwrap();
        let real = tmp.path().join("real");
        fs::create_dir(&real).unwrap();
        #[cfg(unix)]
        {
            let link = tmp.path().join("link");
            std::os::unix::fs::symlink(&real, &link).unwrap();
            let config = Config { notes_dir: link, ..Config::default() }
                .resolve()
                .unwrap();
            assert_eq!(config.notes_dir, fs::canonicalize(&real).unwrap());
        }
    }

    #[test]
    fn override_replaces_notes_dir() {
        let config = Config::default()
            .with_notes_dir_override(Some("/tmp/elsewhere".into()));
        assert_eq!(config.notes_dir, PathBuf::from("/tmp/elsewhere"));
        let config = Config::default().with_notes_dir_override(Some(String::new()));
        assert_eq!(config.notes_dir, PathBuf::from("~/notes"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_tilde(Path::new("~/notes")).unwrap(),
                home.join("notes")
            );
        }
        assert_eq!(
            expand_tilde(Path::new("/abs/notes")).unwrap(),
            PathBuf::from("/abs/notes")
        );
    }
}
