//! FFmpeg-backed media source.
//!
//! [`FfmpegBackend`] opens locations with libavformat and yields
//! [`MediaFile`] handles. Opening only reads the container header
//! (`avformat_open_input`); [`MediaSource::discover_streams`] runs
//! `avformat_find_stream_info` and converts each `AVStream` into
//! [`StreamMetadata`]. `MediaFile` also looks decoders up in libavcodec's
//! registry and reads packets in container order.

use std::{
    ffi::CString,
    fmt::{Debug, Formatter, Result as FmtResult},
    ptr,
    time::Duration,
};

use ffmpeg_next::{
    Codec, Error as FfmpegError, Packet, Rational, codec::context::Context as CodecContext,
    format::context::Input, media::Type,
};
use ffmpeg_sys_next::{avformat_find_stream_info, avformat_open_input};

use crate::{
    backend::{DecoderDescriptor, MediaBackend, MediaSource},
    decoder::VideoDecoder,
    error::DumpError,
    metadata::{
        AudioParameters, ContainerMetadata, MediaKind, Ratio, StreamMetadata, VideoParameters,
    },
};

/// libavformat's marker for "no timestamp".
const NO_TIMESTAMP: i64 = i64::MIN;

/// Opens media sources through FFmpeg.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBackend;

impl MediaBackend for FfmpegBackend {
    type Source = MediaFile;

    fn open(&self, location: &str) -> Result<MediaFile, DumpError> {
        MediaFile::open(location)
    }
}

impl DecoderDescriptor for Codec {
    fn name(&self) -> &str {
        Codec::name(self)
    }
}

/// An open container read through libavformat.
pub struct MediaFile {
    /// The opened FFmpeg input (demuxer) context.
    input_context: Input,
    /// Location the file was opened from (kept for error messages).
    location: String,
}

impl Debug for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaFile")
            .field("location", &self.location)
            .field("stream_count", &self.input_context.nb_streams())
            .finish_non_exhaustive()
    }
}

impl MediaFile {
    /// Open a media file or URL and read its container header.
    ///
    /// Initialises FFmpeg (idempotent) before opening. Stream parameters are
    /// not read until [`MediaSource::discover_streams`].
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::FileOpen`] if the location cannot be opened or
    /// is not a recognised container.
    pub fn open(location: &str) -> Result<Self, DumpError> {
        log::debug!("Opening media source: {location}");

        let open_error = |reason: String| DumpError::FileOpen {
            path: location.to_string(),
            reason,
        };

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let url = CString::new(location)
            .map_err(|_| open_error("location contains a NUL byte".to_string()))?;

        let mut context = ptr::null_mut();
        // SAFETY: `context` starts null so libavformat allocates it, and is
        // left null again if opening fails.
        let status = unsafe {
            avformat_open_input(&mut context, url.as_ptr(), ptr::null_mut(), ptr::null_mut())
        };
        if status < 0 {
            return Err(open_error(FfmpegError::from(status).to_string()));
        }

        Ok(Self {
            // SAFETY: a successful open hands over ownership of the context;
            // `Input` closes it on drop.
            input_context: unsafe { Input::wrap(context) },
            location: location.to_string(),
        })
    }
}

fn to_ratio(rational: Rational) -> Ratio {
    Ratio::new(rational.numerator(), rational.denominator())
}

fn to_kind(medium: Type) -> MediaKind {
    match medium {
        Type::Video => MediaKind::Video,
        Type::Audio => MediaKind::Audio,
        Type::Subtitle => MediaKind::Subtitle,
        Type::Data => MediaKind::Data,
        Type::Attachment => MediaKind::Attachment,
        Type::Unknown => MediaKind::Unknown,
    }
}

fn known_timestamp(value: i64) -> Option<i64> {
    (value != NO_TIMESTAMP).then_some(value)
}

impl MediaSource for MediaFile {
    type Packet = Packet;
    type Codec = Codec;
    type Decoder = VideoDecoder;

    fn container(&self) -> ContainerMetadata {
        let duration_microseconds = self.input_context.duration();
        let duration = if duration_microseconds > 0 {
            Some(Duration::from_micros(duration_microseconds as u64))
        } else {
            None
        };

        // SAFETY: the format context is valid for as long as `self` is.
        let bit_rate = unsafe { (*self.input_context.as_ptr()).bit_rate };

        ContainerMetadata {
            format: self.input_context.format().name().to_string(),
            duration,
            bit_rate,
            stream_count: self.input_context.nb_streams() as usize,
        }
    }

    fn discover_streams(&mut self) -> Result<Vec<StreamMetadata>, DumpError> {
        // SAFETY: the context is open and exclusively borrowed through `self`.
        let status =
            unsafe { avformat_find_stream_info(self.input_context.as_mut_ptr(), ptr::null_mut()) };
        if status < 0 {
            return Err(DumpError::StreamDiscovery(format!(
                "could not get the stream info of {}: {}",
                self.location,
                FfmpegError::from(status)
            )));
        }

        let mut streams = Vec::with_capacity(self.input_context.nb_streams() as usize);

        for stream in self.input_context.streams() {
            let index = stream.index();
            let parameters = stream.parameters();
            let kind = to_kind(parameters.medium());
            // SAFETY: libavformat allocates codec parameters with every
            // stream, and the stream outlives this borrow.
            let raw = unsafe { &*parameters.as_ptr() };

            let video = (kind == MediaKind::Video).then(|| VideoParameters {
                width: raw.width.max(0) as u32,
                height: raw.height.max(0) as u32,
            });
            let audio = (kind == MediaKind::Audio).then(|| AudioParameters {
                sample_rate: raw.sample_rate.max(0) as u32,
                channels: raw.ch_layout.nb_channels.max(0) as u16,
            });

            streams.push(StreamMetadata {
                index,
                kind,
                codec: parameters.id().name().to_string(),
                bit_rate: raw.bit_rate,
                time_base: to_ratio(stream.time_base()),
                frame_rate: to_ratio(stream.rate()),
                start_time: known_timestamp(stream.start_time()),
                duration: known_timestamp(stream.duration()),
                video,
                audio,
            });
        }

        Ok(streams)
    }

    fn find_decoder(&self, stream: &StreamMetadata) -> Option<Codec> {
        let parameters = self.input_context.stream(stream.index)?.parameters();
        ffmpeg_next::decoder::find(parameters.id())
    }

    fn create_decoder(
        &self,
        stream: &StreamMetadata,
        codec: Codec,
    ) -> Result<VideoDecoder, DumpError> {
        let parameters = self
            .input_context
            .stream(stream.index)
            .ok_or_else(|| {
                DumpError::DecoderInit(format!("stream {} disappeared", stream.index))
            })?
            .parameters();

        let codec_name = codec.name().to_string();
        let mut context = CodecContext::new_with_codec(codec);
        context.set_parameters(parameters).map_err(|error| {
            DumpError::DecoderInit(format!(
                "failed to copy codec parameters for stream {}: {error}",
                stream.index
            ))
        })?;

        let decoder = context
            .decoder()
            .open_as(codec)
            .and_then(|opened| opened.video())
            .map_err(|error| {
                DumpError::DecoderInit(format!("failed to open {codec_name} decoder: {error}"))
            })?;

        Ok(VideoDecoder::new(decoder))
    }

    fn read_packet(&mut self) -> Result<Option<Packet>, DumpError> {
        let mut packet = Packet::empty();
        match packet.read(&mut self.input_context) {
            Ok(()) => Ok(Some(packet)),
            Err(FfmpegError::Eof) => Ok(None),
            Err(error) => Err(DumpError::Demux(error.to_string())),
        }
    }
}
