use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("syntax error: no file specified for redirection")]
    Syntax,

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("{}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: {source}")]
    Launch {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Handler(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
