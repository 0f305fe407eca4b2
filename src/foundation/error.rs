use std::path::{Path, PathBuf};

/// Crate-wide result alias.
pub type FramekitResult<T> = Result<T, FramekitError>;

/// Coarse error classification callers can match on without inspecting messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or malformed frame sequence, or an output path the compositor refuses.
    InvalidInput,
    /// A source frame could not be read or decoded, or a destination could not be written.
    IoFailure,
    /// Frame dimensions or formats the compositor cannot reconcile.
    UnsupportedFormat,
}

#[derive(thiserror::Error, Debug)]
pub enum FramekitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode error at '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("encode error at '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramekitError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classify a decode failure. A missing or unreadable file stays an I/O failure even when
    /// the image crate reports it.
    pub fn decode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        let path = path.as_ref().to_path_buf();
        match source {
            image::ImageError::IoError(source) => Self::Io { path, source },
            source => Self::Decode { path, source },
        }
    }

    pub fn encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        let path = path.as_ref().to_path_buf();
        match source {
            image::ImageError::IoError(source) => Self::Io { path, source },
            source => Self::Encode { path, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Io { .. }
            | Self::Decode { .. }
            | Self::Encode { .. }
            | Self::Serde(_)
            | Self::Other(_) => ErrorKind::IoFailure,
        }
    }
}
