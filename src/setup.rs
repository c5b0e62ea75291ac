use crate::config::{Config, save_config};
use crate::error::{Error, Result};
use crate::note::ensure_dir;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Ask for the editor and the notes directory, showing the current values as
/// defaults, then write the config file and create the notes directory.
pub fn run_setup(
    config_path: &Path,
    current: Config,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Config> {
    let editor = prompt(input, out, "Editor", &current.editor)?;
    let notes_dir = prompt(
        input,
        out,
        "Notes directory",
        &current.notes_dir.to_string_lossy(),
    )?;

    let config = Config {
        editor,
        notes_dir: PathBuf::from(notes_dir),
        ..current
    };
    save_config(&config, config_path)?;

    let resolved = config.clone().resolve()?;
    ensure_dir(&resolved.notes_dir)
        .map_err(|e| Error::io(&resolved.notes_dir, e))?;

    writeln!(out, "Saved {}", config_path.display())
        .map_err(|e| Error::io(config_path, e))?;
    Ok(config)
}

/// One prompt; an empty answer (or end of input) keeps `default`.
fn prompt(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    label: &str,
    default: &str,
) -> Result<String> {
    let stdio = |e| Error::io("<stdin>", e);
    write!(out, "{label} [{default}]: ").map_err(stdio)?;
    out.flush().map_err(stdio)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(stdio)?;
    let answer = answer.trim();
    Ok(if answer.is_empty() { default.to_string() } else { answer.to_string() })
}
