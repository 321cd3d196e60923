//! Fatal decode errors.
//!
//! These abort a whole decode call. Failures confined to one field or
//! declaration never surface here; the walker turns them into diagnostics.

use crate::archive::Generation;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer archive envelope could not be decoded.
    #[error("malformed archive envelope: {0}")]
    MalformedArchive(#[source] prost::DecodeError),

    /// The archive payload could not be decoded.
    #[error("malformed archive payload: {0}")]
    MalformedPayload(#[source] prost::DecodeError),

    /// The generation-specific package could not be decoded.
    #[error("malformed {generation} package: {source}")]
    MalformedPackage {
        /// Generation whose schema was applied.
        generation: Generation,
        /// Underlying protobuf error.
        #[source]
        source: prost::DecodeError,
    },

    /// The payload is tagged with an IR generation this build cannot read.
    #[error("unsupported IR version (minor `{minor}`)")]
    UnsupportedIrVersion {
        /// Minor version string carried by the payload.
        minor: String,
    },

    /// The configured deadline elapsed before every module was walked.
    #[error("decode deadline of {limit:?} exceeded before module {module} of {total}")]
    DeadlineExceeded {
        /// Configured deadline.
        limit: Duration,
        /// Position of the module whose walk was refused.
        module: usize,
        /// Modules in the package.
        total: usize,
    },

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
