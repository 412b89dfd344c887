//! Compressed units read from a media source.
//!
//! The driver only needs a handful of facts about each packet: which stream
//! it belongs to, its timestamps, and its size. [`CompressedUnit`] exposes
//! exactly those, and is implemented for FFmpeg's [`Packet`] as well as for
//! the plain-data [`PacketInfo`] used by custom backends.

use ffmpeg_next::Packet;

/// Read-only view of one demuxed packet.
pub trait CompressedUnit {
    /// The stream index this packet belongs to.
    fn stream_index(&self) -> usize;
    /// Presentation timestamp, if the container provides one.
    fn pts(&self) -> Option<i64>;
    /// Decoding timestamp, if the container provides one.
    fn dts(&self) -> Option<i64>;
    /// Payload size in bytes.
    fn size(&self) -> usize;
    /// Whether this packet is a keyframe / sync point.
    fn is_keyframe(&self) -> bool;
}

impl CompressedUnit for Packet {
    fn stream_index(&self) -> usize {
        self.stream()
    }

    fn pts(&self) -> Option<i64> {
        Packet::pts(self)
    }

    fn dts(&self) -> Option<i64> {
        Packet::dts(self)
    }

    fn size(&self) -> usize {
        Packet::size(self)
    }

    fn is_keyframe(&self) -> bool {
        self.is_key()
    }
}

/// An owned packet: metadata plus payload bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketInfo {
    /// The stream index this packet belongs to.
    pub stream_index: usize,
    /// Presentation timestamp (if available).
    pub pts: Option<i64>,
    /// Decoding timestamp (if available).
    pub dts: Option<i64>,
    /// Whether this packet is a keyframe / sync point.
    pub is_keyframe: bool,
    /// Encoded payload.
    pub data: Vec<u8>,
}

impl CompressedUnit for PacketInfo {
    fn stream_index(&self) -> usize {
        self.stream_index
    }

    fn pts(&self) -> Option<i64> {
        self.pts
    }

    fn dts(&self) -> Option<i64> {
        self.dts
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn is_keyframe(&self) -> bool {
        self.is_keyframe
    }
}
