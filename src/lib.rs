pub mod args;
pub mod config;
pub mod editor;
pub mod error;
pub mod formatting;
pub mod help;
pub mod matcher;
pub mod note;
pub mod operations;
pub mod scan;
pub mod search;
pub mod setup;
pub mod shared;
pub mod shell;

use crate::args::Command;
use crate::config::{Config, config_file, load_config, read_config};
use crate::editor::{Launcher, SystemLauncher};
use crate::error::{Error, Result};
use crate::formatting::FormatContext;
use crate::search::{SearchRoot, Searcher, print_file_hits};
use crate::shared::archive::{archive_dir, archive_label};
use crate::shell::{Shell, alias_script, completion_script};
use std::env;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Per-process collaborators the dispatcher hands work to.
pub struct Session<'a> {
    pub launcher: &'a dyn Launcher,
    pub format: FormatContext,
    /// Terminal width for trimming long lines; `None` when piped.
    pub width: Option<usize>,
    /// Name used in generated shell snippets.
    pub bin_name: String,
}

pub fn entry() -> Result<()> {
    init_logging();

    let mut argv = env::args();
    let bin_name = argv
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_stem()?.to_str().map(str::to_string))
        .unwrap_or_else(|| "note".to_string());
    let (command, positional) = args::parse(argv.collect())?;
    tracing::debug!(?command, "parsed command line");

    let format = FormatContext::from_env();
    let width = if format.use_color { shared::text::terminal_columns() } else { None };
    let session = Session { launcher: &SystemLauncher, format, width, bin_name };

    let stdout = io::stdout();
    execute(command, &positional, &session, &mut stdout.lock())
}

/// Run one command and flush its output. A reader that stops early (e.g.
/// `note -l | head -1`) ends the command quietly.
pub fn execute(
    command: Command,
    positional: &[String],
    session: &Session<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let result = run(command, positional, session, out)
        .and_then(|()| out.flush().map_err(stdout_err));
    quiet_broken_pipe(result)
}

fn quiet_broken_pipe(result: Result<()>) -> Result<()> {
    match result {
        Err(err) if err.is_broken_pipe() => {
            tracing::debug!("output closed early");
            Ok(())
        }
        other => other,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("STAMP_NOTES_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(false),
        )
        .try_init();
}

fn stdout_err(e: io::Error) -> Error {
    Error::io("<stdout>", e)
}

/// Carry out one command. Commands that touch notes load the config first.
pub fn run(
    command: Command,
    positional: &[String],
    session: &Session<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let first_word = positional.first().map(String::as_str);
    match command {
        Command::Help => help::print_help(out).map_err(stdout_err),
        Command::Autocomplete => {
            let shell_env = env::var("SHELL").ok();
            let shell = Shell::detect(first_word, shell_env.as_deref())?;
            write!(out, "{}", completion_script(shell, &session.bin_name))
                .map_err(stdout_err)
        }
        Command::Alias => {
            let shell_env = env::var("SHELL").ok();
            let shell = Shell::detect(None, shell_env.as_deref())?;
            let alias = first_word.unwrap_or("n");
            write!(out, "{}", alias_script(shell, alias, &session.bin_name))
                .map_err(stdout_err)
        }
        Command::Config => {
            let path = config_file()?;
            let current = read_config(&path)?;
            let stdin = io::stdin();
            setup::run_setup(&path, current, &mut stdin.lock(), out)?;
            Ok(())
        }
        other => {
            let config = load_config()?;
            dispatch(other, &config, session, out)
        }
    }
}

/// The note commands: list, search, archive and create-or-open.
pub fn dispatch(
    command: Command,
    config: &Config,
    session: &Session<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let notes_dir = &config.notes_dir;
    match command {
        Command::List { pattern, include_archived } => {
            let names = scan::list_notes(
                notes_dir,
                &pattern,
                include_archived,
                config.recursive,
            );
            if names.is_empty() {
                eprintln!("No notes found.");
            }
            for name in names {
                writeln!(out, "{name}").map_err(stdout_err)?;
            }
            Ok(())
        }
        Command::Search { term, include_archived } => {
            let searcher = Searcher::new(&term)?.recursive(config.recursive);
            let mut roots = vec![SearchRoot::new(notes_dir)];
            if include_archived {
                roots.push(SearchRoot::labeled(
                    archive_dir(notes_dir),
                    archive_label(notes_dir),
                ));
            }

            let mut any = false;
            for file in searcher.search(&roots) {
                any = true;
                print_file_hits(out, &file, &term, &session.format, session.width)
                    .map_err(stdout_err)?;
            }
            if !any {
                eprintln!("No matches found.");
            }
            Ok(())
        }
        Command::Archive { pattern } => {
            let stderr = io::stderr();
            operations::archive_notes(notes_dir, &pattern, out, &mut stderr.lock())?;
            Ok(())
        }
        Command::Create { name } => {
            operations::create_or_open(
                config,
                &name,
                note::today(),
                session.launcher,
                out,
            )?;
            Ok(())
        }
        Command::Help | Command::Config | Command::Autocomplete | Command::Alias => {
            run(command, &[], session, out)
        }
    }
}
