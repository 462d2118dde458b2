//! Error taxonomy for the duotone pipeline.

use thiserror::Error;

/// Every way a decode, transform or encode request can fail.
///
/// All failures are deterministic: retrying the same request with the same
/// input yields the same error.
#[derive(Debug, Error)]
pub enum ToneError {
    /// Source bytes could not be decoded into a raster image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// A parameter or buffer did not satisfy its documented constraints.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested container format is not one we can produce or read.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected an otherwise valid raster.
    #[error("failed to encode {format}: {reason}")]
    Encode { format: String, reason: String },

    /// Filesystem failure while reading a source or writing an export.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToneError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ToneError::InvalidArgument(msg.into())
    }

    pub(crate) fn encode(format: impl ToString, reason: impl ToString) -> Self {
        ToneError::Encode {
            format: format.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ToneError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToneError>;

/// Lets `?` lift core failures into the CLI's `Result<_, String>` commands.
impl From<ToneError> for String {
    fn from(err: ToneError) -> Self {
        err.to_string()
    }
}
