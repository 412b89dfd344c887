//! DumpConfig tests.

use std::path::Path;

use lumadump::{
    DumpConfig,
    config::{DEFAULT_FILE_STEM, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_PACKET_LIMIT},
    pgm,
};

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = DumpConfig::new();
    assert_eq!(config.packet_limit(), DEFAULT_PACKET_LIMIT);
    assert_eq!(config.packet_limit(), 12);
    assert_eq!(config.output_directory(), Path::new(DEFAULT_OUTPUT_DIRECTORY));
    assert_eq!(config.file_stem(), DEFAULT_FILE_STEM);
}

#[test]
fn default_matches_new() {
    assert_eq!(DumpConfig::default(), DumpConfig::new());
}

// ── Builder ──────────────────────────────────────────────────────

#[test]
fn config_with_packet_limit() {
    let config = DumpConfig::new().with_packet_limit(40);
    assert_eq!(config.packet_limit(), 40);
}

#[test]
fn config_with_packet_limit_clamps_zero() {
    let config = DumpConfig::new().with_packet_limit(0);
    // Clamped to 1.
    assert_eq!(config.packet_limit(), 1);
}

#[test]
fn config_with_output_naming() {
    let config = DumpConfig::new()
        .with_output_directory("/tmp/luma")
        .with_file_stem("shot");

    assert_eq!(config.output_directory(), Path::new("/tmp/luma"));
    assert_eq!(
        pgm::frame_path(config.output_directory(), config.file_stem(), 3),
        Path::new("/tmp/luma/shot-3.pgm"),
    );
}

#[test]
fn default_naming_matches_command_line_layout() {
    let config = DumpConfig::new();
    let path = pgm::frame_path(config.output_directory(), config.file_stem(), 1);
    assert_eq!(path, Path::new("0_frames").join("frame-1.pgm"));
}

#[test]
fn debug_output_names_fields() {
    let debug = format!("{:?}", DumpConfig::new().with_packet_limit(5));
    assert!(debug.contains("DumpConfig"));
    assert!(debug.contains("packet_limit: 5"));
}

// ── FFmpeg log level ─────────────────────────────────────────────

#[test]
fn ffmpeg_level_follows_log_filter() {
    use ffmpeg_next::util::log::Level;
    use log::LevelFilter;
    use lumadump::ffmpeg::ffmpeg_level;

    assert!(matches!(ffmpeg_level(LevelFilter::Off), Level::Quiet));
    assert!(matches!(ffmpeg_level(LevelFilter::Error), Level::Error));
    assert!(matches!(ffmpeg_level(LevelFilter::Warn), Level::Warning));
    assert!(matches!(ffmpeg_level(LevelFilter::Trace), Level::Trace));
}

#[test]
fn default_output_directory_is_0_frames() {
    assert_eq!(DEFAULT_OUTPUT_DIRECTORY, "0_frames");
    assert_eq!(DumpConfig::new().output_directory(), Path::new("0_frames"));
}
