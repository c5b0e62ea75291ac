use crate::error::{Error, Result};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs an external program and waits for it.
pub trait Launcher {
    /// Exit code of the finished process (`-1` when killed by a signal).
    fn run(&self, program: &str, args: &[String]) -> io::Result<i32>;
}

/// Spawns real processes sharing this process's terminal.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, program: &str, args: &[String]) -> io::Result<i32> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Open `path` in `editor`. The editor string may carry its own arguments,
/// e.g. `code --wait`.
pub fn open_in_editor(
    launcher: &dyn Launcher,
    editor: &str,
    path: &Path,
) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::Editor("no editor configured".into()))?;
    let mut args: Vec<String> = parts.map(str::to_string).collect();
    args.push(path.to_string_lossy().into_owned());

    tracing::debug!(program, ?args, "launching editor");
    match launcher.run(program, &args) {
        Ok(0) => Ok(()),
        Ok(code) => Err(Error::Editor(format!(
            "{program} exited with status {code}"
        ))),
        Err(err) => Err(Error::Editor(format!("could not start {program}: {err}"))),
    }
}
