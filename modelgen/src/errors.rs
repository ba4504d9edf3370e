use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the generators.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Top-level error type returned by the model generators.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An input could not be read or an output could not be written.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration document decoded to something other than an object.
    #[error("configuration root must be a JSON object, found {kind}")]
    RootNotObject { kind: &'static str },

    /// A value is neither a supported scalar nor a nested object.
    #[error("unsupported {kind} value at '{path}'")]
    UnsupportedValue { path: String, kind: &'static str },

    /// Two nested objects map to the same generated struct name.
    #[error("nested objects produce duplicate struct name '{name}'")]
    DuplicateStruct { name: String },

    /// Two keys of one object map to the same generated field name.
    #[error("duplicate field name '{name}' at '{path}'")]
    DuplicateField { path: String, name: String },

    /// A table maps to an output file already written earlier in the same run.
    #[error("{} was already generated earlier in this run", path.display())]
    OutputCollision { path: PathBuf },

    /// Generated source could not be turned back into a syntax tree.
    #[error("failed to render generated code: {0}")]
    Render(String),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
