use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed command line; nothing has been executed yet.
    #[error("{0}")]
    Usage(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("editor failed: {0}")]
    Editor(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{failed} note(s) could not be archived")]
    Archive { failed: usize },

    /// The search term could not be turned into a matcher.
    #[error("cannot search for that term: {0}")]
    Term(#[source] regex::Error),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 2,
            _ => 1,
        }
    }

    /// The reader on the other end of an output stream went away.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
