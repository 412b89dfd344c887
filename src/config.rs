//! Pipeline configuration.
//!
//! [`DumpConfig`] is a small builder carrying the packet budget and the
//! output naming scheme. The defaults reproduce the command-line tool:
//! twelve video packets, files named `0_frames/frame-<n>.pgm`.
//!
//! # Example
//!
//! ```
//! use lumadump::DumpConfig;
//!
//! let config = DumpConfig::new()
//!     .with_packet_limit(3)
//!     .with_output_directory("/tmp/luma")
//!     .with_file_stem("shot");
//! assert_eq!(config.packet_limit(), 3);
//! ```

use std::path::{Path, PathBuf};

/// Video packets decoded before the pipeline stops.
pub const DEFAULT_PACKET_LIMIT: u32 = 12;

/// Directory frames are written to, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "0_frames";

/// File name prefix for written frames.
pub const DEFAULT_FILE_STEM: &str = "frame";

/// Settings for a [`Pipeline`](crate::Pipeline) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    pub(crate) packet_limit: u32,
    pub(crate) output_directory: PathBuf,
    pub(crate) file_stem: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpConfig {
    /// Create a configuration with the command-line defaults.
    pub fn new() -> Self {
        Self {
            packet_limit: DEFAULT_PACKET_LIMIT,
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }

    /// Set how many video packets to decode. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_packet_limit(mut self, limit: u32) -> Self {
        self.packet_limit = limit.max(1);
        self
    }

    /// Set the directory frames are written to. It must already exist.
    #[must_use]
    pub fn with_output_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.output_directory = directory.into();
        self
    }

    /// Set the file name prefix for written frames.
    #[must_use]
    pub fn with_file_stem<S: Into<String>>(mut self, stem: S) -> Self {
        self.file_stem = stem.into();
        self
    }

    pub fn packet_limit(&self) -> u32 {
        self.packet_limit
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }
}
