//! FFmpeg runtime setup.
//!
//! FFmpeg prints to stderr through its own logger, separately from the Rust
//! [`log`](https://crates.io/crates/log) facade. [`init`] registers the
//! libraries and lines FFmpeg's verbosity up with a [`LevelFilter`], so a
//! binary that installs a `log` backend at `Info` does not also get
//! FFmpeg's warnings interleaved with its own lines unless it asks for them.
//!
//! # Example
//!
//! ```no_run
//! use log::LevelFilter;
//!
//! // Only let FFmpeg report errors.
//! lumadump::ffmpeg::init(LevelFilter::Error).unwrap();
//! ```

use ffmpeg_next::util::log::Level;
use log::LevelFilter;

use crate::error::DumpError;

/// Map a Rust log filter onto the closest FFmpeg log level.
///
/// `Off` silences FFmpeg entirely; `Trace` enables its most verbose output.
pub fn ffmpeg_level(filter: LevelFilter) -> Level {
    match filter {
        LevelFilter::Off => Level::Quiet,
        LevelFilter::Error => Level::Error,
        LevelFilter::Warn => Level::Warning,
        LevelFilter::Info => Level::Info,
        LevelFilter::Debug => Level::Debug,
        LevelFilter::Trace => Level::Trace,
    }
}

/// Initialise FFmpeg and set its console verbosity.
///
/// Safe to call more than once.
///
/// # Errors
///
/// [`DumpError::FfmpegError`] if the libraries fail to initialise.
pub fn init(filter: LevelFilter) -> Result<(), DumpError> {
    ffmpeg_next::init()?;
    ffmpeg_next::util::log::set_level(ffmpeg_level(filter));
    log::debug!("FFmpeg initialised (log level {filter})");
    Ok(())
}
