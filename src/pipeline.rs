//! The demux -> decode -> export driver.
//!
//! [`Pipeline::run`] opens a source, logs what it contains, picks the first
//! video stream, and feeds at most [`DumpConfig::packet_limit`] of that
//! stream's packets through [`decode_packet`], which writes every frame the
//! decoder produces as a PGM file. Packets from other streams are skipped
//! and never count towards the limit.
//!
//! The source and decoder live on the driver's stack: whichever way the run
//! ends, the decoder is dropped before the source.
//!
//! # Example
//!
//! ```no_run
//! use lumadump::{DumpConfig, FfmpegBackend, Pipeline};
//!
//! let pipeline = Pipeline::new(FfmpegBackend, DumpConfig::new());
//! let summary = pipeline.run("input.mp4")?;
//! println!("wrote {} frames", summary.frames_written());
//! # Ok::<(), lumadump::DumpError>(())
//! ```

use std::path::PathBuf;

use crate::{
    backend::{DecoderDescriptor, FrameDecoder, MediaBackend, MediaSource, Received},
    config::DumpConfig,
    error::DumpError,
    metadata::{ContainerMetadata, StreamMetadata},
    packet::CompressedUnit,
    pgm,
};

/// Loop state threaded through the decode loop.
///
/// Tracks the remaining packet budget, what was submitted to the decoder,
/// and every file written so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeProgress {
    packets_remaining: u32,
    packets_processed: u32,
    bytes_submitted: u64,
    keyframe_packets: u32,
    output_files: Vec<PathBuf>,
}

impl DecodeProgress {
    /// Start with a budget of `packet_limit` video packets.
    pub fn new(packet_limit: u32) -> Self {
        Self {
            packets_remaining: packet_limit,
            packets_processed: 0,
            bytes_submitted: 0,
            keyframe_packets: 0,
            output_files: Vec::new(),
        }
    }

    /// Whether the packet budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.packets_remaining == 0
    }

    pub fn packets_remaining(&self) -> u32 {
        self.packets_remaining
    }

    pub fn packets_processed(&self) -> u32 {
        self.packets_processed
    }

    /// Compressed payload bytes submitted to the decoder.
    pub fn bytes_submitted(&self) -> u64 {
        self.bytes_submitted
    }

    pub fn keyframe_packets(&self) -> u32 {
        self.keyframe_packets
    }

    /// Files written so far, in decode order.
    pub fn output_files(&self) -> &[PathBuf] {
        &self.output_files
    }

    fn record_packet<P: CompressedUnit>(&mut self, packet: &P) {
        self.packets_remaining = self.packets_remaining.saturating_sub(1);
        self.packets_processed += 1;
        self.bytes_submitted += packet.size() as u64;
        if packet.is_keyframe() {
            self.keyframe_packets += 1;
        }
    }

    fn record_frame(&mut self, path: PathBuf) {
        self.output_files.push(path);
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PipelineSummary {
    /// Container index of the decoded video stream.
    pub video_stream_index: usize,
    /// Video packets submitted to the decoder.
    pub packets_processed: u32,
    /// Compressed bytes in those packets.
    pub bytes_submitted: u64,
    /// How many of those packets were keyframes.
    pub keyframe_packets: u32,
    /// Files written, in decode order.
    pub output_files: Vec<PathBuf>,
}

impl PipelineSummary {
    pub fn frames_written(&self) -> usize {
        self.output_files.len()
    }
}

fn describe_timestamp(timestamp: Option<i64>) -> String {
    timestamp.map_or_else(|| "none".to_string(), |value| value.to_string())
}

fn log_container(container: &ContainerMetadata) {
    log::info!(
        "format {}, duration {} us, bit_rate {}, {} streams",
        container.format,
        container
            .duration
            .map_or_else(|| "unknown".to_string(), |d| d.as_micros().to_string()),
        container.bit_rate,
        container.stream_count,
    );
}

fn log_stream(stream: &StreamMetadata) {
    log::info!(
        "stream {}: time_base {}, r_frame_rate {}, start_time {}, duration {}",
        stream.index,
        stream.time_base,
        stream.frame_rate,
        describe_timestamp(stream.start_time),
        describe_timestamp(stream.duration),
    );
    if let Some(video) = &stream.video {
        log::info!("Video Codec: resolution {} x {}", video.width, video.height);
    } else if let Some(audio) = &stream.audio {
        log::info!(
            "Audio Codec: {} channels, sample rate {}",
            audio.channels,
            audio.sample_rate
        );
    }
}

/// Scan every stream once and pick the first video stream.
///
/// Each stream is logged and its decoder looked up. Only the selected
/// stream needs a decoder; a missing one anywhere else is a warning.
///
/// # Errors
///
/// [`DumpError::UnsupportedCodec`] if the first video stream has no
/// registered decoder, [`DumpError::NoVideoStream`] if there is no video
/// stream.
pub fn select_video_stream<'s, S: MediaSource>(
    source: &S,
    streams: &'s [StreamMetadata],
) -> Result<(&'s StreamMetadata, S::Codec), DumpError> {
    let mut selected = None;

    for stream in streams {
        log_stream(stream);
        log::info!("finding the proper decoder (CODEC)");
        let codec = source.find_decoder(stream);

        match &codec {
            Some(codec) => log::info!(
                "\tCodec {} ({}) bit_rate {}",
                codec.name(),
                stream.codec,
                stream.bit_rate
            ),
            None if stream.is_video() && selected.is_none() => {
                return Err(DumpError::UnsupportedCodec {
                    stream_index: stream.index,
                    codec: stream.codec.clone(),
                });
            }
            None => log::warn!(
                "no decoder for codec {} on stream {}, ignoring it",
                stream.codec,
                stream.index
            ),
        }

        if stream.is_video() && selected.is_none() {
            selected = codec.map(|codec| (stream, codec));
        }
    }

    selected.ok_or(DumpError::NoVideoStream)
}

/// Submit one packet and export every frame it yields.
///
/// Frames are received until the decoder asks for more input or reports
/// end of stream. Each frame is written to
/// `<output_directory>/<file_stem>-<number>.pgm` before the next receive.
///
/// # Errors
///
/// Decoder errors other than "need more input" / "end of stream", and any
/// export failure.
pub fn decode_packet<D: FrameDecoder>(
    decoder: &mut D,
    packet: &D::Packet,
    config: &DumpConfig,
    progress: &mut DecodeProgress,
) -> Result<(), DumpError> {
    decoder.submit(packet)?;

    loop {
        let frame = match decoder.receive_frame()? {
            Received::Frame(frame) => frame,
            Received::NeedMoreInput | Received::EndOfStream => return Ok(()),
        };

        log::info!(
            "Frame {} (type={}, {}x{}) pts {} key_frame {}",
            frame.number,
            frame.picture_type,
            frame.width,
            frame.height,
            describe_timestamp(frame.pts),
            u8::from(frame.is_keyframe),
        );

        let path = pgm::frame_path(config.output_directory(), config.file_stem(), frame.number);
        pgm::save_gray_frame(&path, &frame)?;
        progress.record_frame(path);
    }
}

/// Runs the decode loop against a [`MediaBackend`].
#[derive(Debug, Clone)]
pub struct Pipeline<B> {
    backend: B,
    config: DumpConfig,
}

impl<B: MediaBackend> Pipeline<B> {
    pub fn new(backend: B, config: DumpConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Open `location` and dump the first frames of its video stream.
    ///
    /// # Errors
    ///
    /// The first failure from opening, discovery, decoder selection and
    /// setup, reading, decoding, or writing. Nothing is retried.
    pub fn run(&self, location: &str) -> Result<PipelineSummary, DumpError> {
        log::info!("opening the input file ({location}) and loading format (container) header");
        let mut source = self.backend.open(location)?;

        let result = self.decode_source(&mut source);

        log::info!("releasing all the resources");
        result
    }

    fn decode_source(&self, source: &mut B::Source) -> Result<PipelineSummary, DumpError> {
        log_container(&source.container());

        log::info!("finding stream info from format");
        let streams = source.discover_streams()?;
        let (stream, codec) = select_video_stream(&*source, &streams)?;
        let video_stream_index = stream.index;
        log::info!(
            "using stream {video_stream_index} ({}) as the video stream",
            stream.codec
        );

        let mut decoder = source.create_decoder(stream, codec)?;
        let mut progress = DecodeProgress::new(self.config.packet_limit);

        while !progress.is_exhausted() {
            let Some(packet) = source.read_packet()? else {
                log::info!("end of input reached");
                break;
            };
            if packet.stream_index() != video_stream_index {
                continue;
            }

            log::info!(
                "AVPacket->pts {} dts {} size {} bytes key_frame {}",
                describe_timestamp(packet.pts()),
                describe_timestamp(packet.dts()),
                packet.size(),
                u8::from(packet.is_keyframe()),
            );
            decode_packet(&mut decoder, &packet, &self.config, &mut progress)?;
            progress.record_packet(&packet);
        }

        let summary = PipelineSummary {
            video_stream_index,
            packets_processed: progress.packets_processed,
            bytes_submitted: progress.bytes_submitted,
            keyframe_packets: progress.keyframe_packets,
            output_files: progress.output_files,
        };
        log::info!(
            "processed {} video packets ({} bytes, {} keyframes), wrote {} frames",
            summary.packets_processed,
            summary.bytes_submitted,
            summary.keyframe_packets,
            summary.frames_written()
        );
        Ok(summary)
    }
}
