//! Error types for msh

use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Error, Debug)]
pub enum ShellError {
    /// A builtin was invoked without a required argument
    #[error("expected argument to \"{0}\"")]
    MissingArgument(&'static str),

    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    /// `>` was the last token on the line
    #[error("expected a file name after '>'")]
    MissingRedirectTarget,

    /// Arguments are handed to execvp as C strings
    #[error("argument contains a NUL byte: {0:?}")]
    NulByte(String),

    #[error("fork: {0}")]
    Fork(#[source] nix::Error),

    #[error("waitpid: {0}")]
    Wait(#[source] nix::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Readline(#[from] ReadlineError),
}
