//! # lumadump
//!
//! Decode the first frames of a media file's video stream and write each
//! frame's luma plane as a binary PGM image.
//!
//! `lumadump` is a walkthrough of the demux -> decode -> export pipeline:
//! open a container, find its first video stream, submit a bounded number of
//! packets to the decoder, and export every decoded frame. Demuxing and
//! decoding are done by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate, behind the
//! traits in [`backend`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use lumadump::{DumpConfig, FfmpegBackend, Pipeline};
//!
//! // Writes 0_frames/frame-1.pgm, 0_frames/frame-2.pgm, ...
//! let summary = Pipeline::new(FfmpegBackend, DumpConfig::new()).run("input.mp4")?;
//! for path in &summary.output_files {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), lumadump::DumpError>(())
//! ```
//!
//! ## Exporting a plane directly
//!
//! ```
//! use lumadump::{Plane, pgm};
//!
//! let pixels = [0u8; 16];
//! let mut out = Vec::new();
//! pgm::write_gray_frame(&mut out, Plane { data: &pixels, stride: 4 }, 4, 4)?;
//! assert_eq!(out.len(), pgm::header_len(4, 4) + 16);
//! # Ok::<(), lumadump::DumpError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system for
//! `ffmpeg-sys-next` to link against.

pub mod backend;
pub mod config;
mod decoder;
pub mod error;
pub mod ffmpeg;
mod media_file;
pub mod metadata;
pub mod packet;
pub mod pgm;
pub mod pipeline;

pub use backend::{
    DecodedFrame, DecoderDescriptor, FrameDecoder, MediaBackend, MediaSource, Plane, Received,
};
pub use config::DumpConfig;
pub use decoder::VideoDecoder;
pub use error::DumpError;
pub use media_file::{FfmpegBackend, MediaFile};
pub use metadata::{
    AudioParameters, ContainerMetadata, MediaKind, Ratio, StreamMetadata, VideoParameters,
};
pub use packet::{CompressedUnit, PacketInfo};
pub use pipeline::{DecodeProgress, Pipeline, PipelineSummary, decode_packet, select_video_stream};
