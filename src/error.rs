use thiserror::Error;

/// Errors raised by the shell backend.
///
/// Tauri commands flatten these into `String` at the IPC boundary.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to start BuildTools: {0}")]
    Spawn(String),

    #[error("BuildTools is already running")]
    AlreadyRunning,

    #[error("unknown compilation target '{0}'")]
    UnknownTarget(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),
}

pub type ShellResult<T> = Result<T, ShellError>;
