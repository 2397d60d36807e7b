use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] divdash_core::CoreError),

    #[error(transparent)]
    Store(#[from] divdash_core::StoreError),

    /// The command ran but raised at least one error notice.
    #[error("{count} error notice(s) raised")]
    Rejected { count: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Rejected { .. } => 3,
            Self::Serialization(_) => 4,
            Self::Core(_) | Self::Store(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
