//! Container and stream metadata types.
//!
//! These structures are backend-neutral: the FFmpeg backend fills them from
//! `AVFormatContext`/`AVStream` fields, and custom backends can build them
//! directly. They are produced during stream discovery and read-only after.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

/// A rational number such as a time base or a frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ratio {
    /// Numerator.
    pub numerator: i32,
    /// Denominator. Zero means the value is unknown.
    pub denominator: i32,
}

impl Ratio {
    /// Create a ratio from its two parts.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl Display for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// The kind of payload carried by an elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    Unknown,
}

/// Container-level information, available as soon as the source is open.
#[derive(Debug, Clone)]
#[must_use]
pub struct ContainerMetadata {
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`, `"matroska,webm"`).
    pub format: String,
    /// Total duration, `None` if the container does not declare one.
    pub duration: Option<Duration>,
    /// Overall bit rate in bits per second, zero if unknown.
    pub bit_rate: i64,
    /// Number of elementary streams in the container.
    pub stream_count: usize,
}

/// Geometry of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoParameters {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Sampling layout of an audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioParameters {
    /// Sample rate in hertz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
}

/// Metadata for one elementary stream.
#[derive(Debug, Clone)]
#[must_use]
pub struct StreamMetadata {
    /// Index of the stream within the container. Packets refer to it.
    pub index: usize,
    /// What the stream carries.
    pub kind: MediaKind,
    /// Codec name (e.g. `"h264"`, `"aac"`).
    pub codec: String,
    /// Bit rate in bits per second, zero if unknown.
    pub bit_rate: i64,
    /// Unit of the stream's timestamps.
    pub time_base: Ratio,
    /// Lowest frame rate that can represent all timestamps exactly.
    pub frame_rate: Ratio,
    /// First presentation timestamp, in `time_base` units.
    pub start_time: Option<i64>,
    /// Stream duration, in `time_base` units.
    pub duration: Option<i64>,
    /// Present for video streams.
    pub video: Option<VideoParameters>,
    /// Present for audio streams.
    pub audio: Option<AudioParameters>,
}

impl StreamMetadata {
    /// Whether this stream carries video.
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
