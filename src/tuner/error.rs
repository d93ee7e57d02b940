use std::io;

use thiserror::Error;

/// Failures reported by the tuner device layer.
#[derive(Debug, Error)]
pub enum TunerError {
    #[error("failed to open tuner {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to set channel (freq_idx {freq_idx}, slot {slot}): {source}")]
    TuneFailed {
        freq_idx: u32,
        slot: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to start streaming: {0}")]
    StreamStartFailed(#[source] io::Error),

    /// The device produced no stream data; recoverable with a retry.
    #[error("no stream data available")]
    NoData,

    #[error("tuner device access is not supported on this platform")]
    Unsupported,
}
