//! The seam between the pipeline and the codec/container library.
//!
//! The pipeline never touches FFmpeg directly. It drives three traits:
//!
//! - [`MediaBackend`] opens a location and yields a [`MediaSource`].
//! - [`MediaSource`] describes the container, discovers its streams, finds
//!   and builds decoders, and hands out packets.
//! - [`FrameDecoder`] accepts packets and returns [`Received`] outcomes.
//!
//! [`FfmpegBackend`](crate::FfmpegBackend) is the production implementation.
//! Anything else that can produce 8-bit luma planes can plug in here.

use crate::{
    error::DumpError,
    metadata::{ContainerMetadata, StreamMetadata},
    packet::CompressedUnit,
};

/// Opens media sources.
pub trait MediaBackend {
    /// The open-container handle this backend produces.
    type Source: MediaSource;

    /// Open `location` (a path or URL) and read its container header.
    ///
    /// # Errors
    ///
    /// [`DumpError::FileOpen`] if the location cannot be opened or is not a
    /// recognised container.
    fn open(&self, location: &str) -> Result<Self::Source, DumpError>;
}

/// A decoder registered for a codec.
pub trait DecoderDescriptor {
    /// Short decoder name, e.g. `"h264"`.
    fn name(&self) -> &str;
}

/// An open container.
pub trait MediaSource {
    /// Packet type read from this source.
    type Packet: CompressedUnit;
    /// Decoder lookup result.
    type Codec: DecoderDescriptor;
    /// Decoder state built for one of this source's streams.
    type Decoder: FrameDecoder<Packet = Self::Packet>;

    /// Container-level information from the header.
    fn container(&self) -> ContainerMetadata;

    /// Read per-stream parameters, in container order.
    ///
    /// # Errors
    ///
    /// [`DumpError::StreamDiscovery`] if the parameters cannot be read.
    fn discover_streams(&mut self) -> Result<Vec<StreamMetadata>, DumpError>;

    /// Look up the decoder registered for `stream`'s codec.
    fn find_decoder(&self, stream: &StreamMetadata) -> Option<Self::Codec>;

    /// Build decoder state bound to `stream`'s parameters.
    ///
    /// # Errors
    ///
    /// [`DumpError::DecoderInit`] if allocation, parameter transfer, or
    /// opening the codec fails.
    fn create_decoder(
        &self,
        stream: &StreamMetadata,
        codec: Self::Codec,
    ) -> Result<Self::Decoder, DumpError>;

    /// Read the next packet from any stream. `Ok(None)` once exhausted.
    ///
    /// # Errors
    ///
    /// [`DumpError::Demux`] if the container cannot be read further.
    fn read_packet(&mut self) -> Result<Option<Self::Packet>, DumpError>;
}

/// Decoder state for one stream.
///
/// The decoder owns a single frame slot. A [`DecodedFrame`] borrows it, so
/// the borrow checker ends every frame's use before the next
/// [`receive_frame`](FrameDecoder::receive_frame) overwrites the slot.
pub trait FrameDecoder {
    /// Packet type accepted by this decoder.
    type Packet: CompressedUnit;

    /// Submit one compressed packet.
    ///
    /// # Errors
    ///
    /// [`DumpError::Decode`] if the decoder rejects the packet.
    fn submit(&mut self, packet: &Self::Packet) -> Result<(), DumpError>;

    /// Ask for the next decoded frame.
    ///
    /// # Errors
    ///
    /// [`DumpError::Decode`] for any failure other than "need more input"
    /// or "end of stream", which are reported as [`Received`] variants.
    fn receive_frame(&mut self) -> Result<Received<'_>, DumpError>;
}

/// Outcome of [`FrameDecoder::receive_frame`].
#[derive(Debug)]
pub enum Received<'a> {
    /// A frame is ready. It stays valid until the next receive call.
    Frame(DecodedFrame<'a>),
    /// The decoder needs another packet before it can emit a frame.
    NeedMoreInput,
    /// The decoder has been drained and will emit no more frames.
    EndOfStream,
}

/// One plane of a decoded picture.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    /// Plane bytes, starting at the first row.
    pub data: &'a [u8],
    /// Byte distance between the starts of consecutive rows.
    pub stride: usize,
}

/// A borrowed view of the decoder's current frame.
#[derive(Debug, Clone)]
pub struct DecodedFrame<'a> {
    /// Decoder frame counter: 1 for the first frame produced, and so on.
    pub number: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Picture planes; plane 0 is luma for YUV and gray formats.
    pub planes: Vec<Plane<'a>>,
    /// Presentation timestamp.
    pub pts: Option<i64>,
    /// Picture type character (`I`, `P`, `B`, ...; `?` when unknown).
    pub picture_type: char,
    /// Whether the frame is a keyframe.
    pub is_keyframe: bool,
}

impl<'a> DecodedFrame<'a> {
    /// The luma plane, if the frame has any planes at all.
    pub fn luma(&self) -> Option<Plane<'a>> {
        self.planes.first().copied()
    }
}
