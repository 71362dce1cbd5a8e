use std::path::PathBuf;

/// Everything that can abort a build.
///
/// Unresolvable references and non-numeric transform inputs are not errors:
/// the first are dropped from the output, the second flow through as `NaN`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid token JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    #[error("invalid token manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("token splitter failed for set `{set}`: {reason}")]
    Splitter { set: String, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
