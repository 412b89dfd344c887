//! Error types for the `lumadump` crate.
//!
//! [`DumpError`] is returned by every fallible operation: opening a source,
//! discovering streams, building a decoder, decoding, and writing frames.
//! Variants carry the path or upstream message needed to explain the failure
//! in a single log line.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `lumadump` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DumpError {
    /// The media source could not be opened or is not a recognised container.
    #[error("Failed to open media source {path}: {reason}")]
    FileOpen {
        /// Location that was passed to the backend.
        path: String,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// Stream parameters could not be read from the container.
    #[error("Failed to discover stream info: {0}")]
    StreamDiscovery(String),

    /// The source does not contain a video stream.
    #[error("No video stream found in source")]
    NoVideoStream,

    /// No decoder is registered for the selected stream's codec.
    #[error("Unsupported codec {codec} on stream {stream_index}")]
    UnsupportedCodec {
        /// Index of the stream within the container.
        stream_index: usize,
        /// Codec name reported by the container.
        codec: String,
    },

    /// The decoder could not be allocated, configured, or opened.
    #[error("Failed to initialise decoder: {0}")]
    DecoderInit(String),

    /// Submitting a packet or receiving a frame failed.
    #[error("Failed to decode video: {0}")]
    Decode(String),

    /// Reading the next packet from the container failed.
    #[error("Failed to read packet: {0}")]
    Demux(String),

    /// An output image could not be created.
    #[error("Failed to open output file {path}: {source}")]
    OutputOpen {
        /// Destination that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: IoError,
    },

    /// A frame plane does not hold enough bytes for its declared geometry.
    #[error("Invalid frame plane: {0}")]
    InvalidPlane(String),

    /// An I/O error occurred while writing an image.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

impl From<FfmpegError> for DumpError {
    fn from(error: FfmpegError) -> Self {
        DumpError::FfmpegError(error.to_string())
    }
}
