use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmbUserError {
    #[error("Failed to find required binary {tool}: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: which::Error,
    },

    /// Display is the captured stderr, untouched
    #[error("{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("User {0} disappeared while its password was being set")]
    UserVanished(String),

    #[error("A password is required to create user {0}")]
    MissingPassword(String),

    #[error("Invalid parameters: {0}")]
    Config(String),

    #[error("Failed to start process: {0}")]
    Spawn(#[from] subprocess::PopenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse args file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl SmbUserError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SmbUserError>;
