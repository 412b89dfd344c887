//! Error handling and end-to-end tests against the FFmpeg backend.
//!
//! Fixture-based tests require files from `tests/fixtures/generate_fixtures.sh`
//! and return early when they are missing.

use std::{fs, path::Path};

use lumadump::{DumpConfig, DumpError, FfmpegBackend, MediaBackend, MediaFile, MediaSource, Pipeline};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";
const SAMPLE_AUDIO_ONLY: &str = "tests/fixtures/sample_audio_only.mp4";

fn pipeline_into(directory: &Path) -> Pipeline<FfmpegBackend> {
    Pipeline::new(
        FfmpegBackend,
        DumpConfig::new().with_output_directory(directory),
    )
}

#[test]
fn open_nonexistent_file() {
    let result = MediaFile::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open media source"),
        "Error message should mention source open failure: {error_message}",
    );
    assert!(error_message.contains("this_file_does_not_exist.mp4"));
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = FfmpegBackend.open(invalid_file_path.to_str().expect("utf-8 temp path"));
    assert!(
        matches!(result, Err(DumpError::FileOpen { .. })),
        "Expected FileOpen for invalid media file",
    );
}

#[test]
fn location_with_nul_byte_is_rejected() {
    let error = MediaFile::open("clip\0.mp4").expect_err("NUL byte in location");

    match error {
        DumpError::FileOpen { path, reason } => {
            assert_eq!(path, "clip\0.mp4");
            assert!(reason.contains("NUL"), "unexpected reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn streams_are_discovered_after_open() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let mut media_file = MediaFile::open(SAMPLE_VIDEO).expect("Failed to open test video");
    let streams = media_file.discover_streams().expect("Failed to discover streams");
    assert!(streams.iter().any(|stream| stream.is_video()));

    // A second discovery pass sees the same streams.
    let again = media_file.discover_streams().expect("Failed to rediscover streams");
    assert_eq!(again.len(), streams.len());
}

#[test]
fn pipeline_reports_open_failure() {
    let output_directory = tempfile::tempdir().expect("Failed to create temp dir");

    let result = pipeline_into(output_directory.path()).run("missing/clip.mkv");

    assert!(matches!(result, Err(DumpError::FileOpen { .. })));
    assert_eq!(fs::read_dir(output_directory.path()).unwrap().count(), 0);
}

#[test]
fn sample_video_dumps_at_most_twelve_frames() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let output_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let summary = pipeline_into(output_directory.path())
        .run(SAMPLE_VIDEO)
        .expect("Failed to dump sample video");

    assert!(summary.packets_processed <= 12);
    assert!(summary.frames_written() <= 12);
    if summary.packets_processed > 0 {
        assert!(summary.bytes_submitted > 0);
        assert!(summary.keyframe_packets >= 1, "decoding starts at a keyframe");
    }
    for (offset, path) in summary.output_files.iter().enumerate() {
        let expected = output_directory
            .path()
            .join(format!("frame-{}.pgm", offset + 1));
        assert_eq!(path, &expected);

        let bytes = fs::read(path).expect("Failed to read frame");
        assert!(bytes.starts_with(b"P5\n"), "{} is not a P5 image", path.display());
        let image = image::load_from_memory(&bytes).expect("Failed to decode PGM");
        assert_eq!(image.color(), image::ColorType::L8);
    }
}

#[test]
fn sample_video_metadata() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let mut media_file = MediaFile::open(SAMPLE_VIDEO).expect("Failed to open test video");
    let container = media_file.container();
    assert!(container.stream_count > 0);

    let streams = media_file.discover_streams().expect("Failed to discover streams");
    assert_eq!(streams.len(), container.stream_count);

    let video = streams
        .iter()
        .find(|stream| stream.is_video())
        .expect("Fixture should contain video");
    let parameters = video.video.expect("Video stream should carry geometry");
    assert!(parameters.width > 0 && parameters.height > 0);
    assert!(video.time_base.denominator > 0);
    assert!(media_file.find_decoder(video).is_some());
}

#[test]
fn no_video_stream_error() {
    if !Path::new(SAMPLE_AUDIO_ONLY).exists() {
        return;
    }

    let output_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let result = pipeline_into(output_directory.path()).run(SAMPLE_AUDIO_ONLY);

    let error = result.expect_err("audio-only file has no video stream");
    assert!(matches!(error, DumpError::NoVideoStream));
    assert!(
        error.to_string().contains("No video stream"),
        "Error should mention missing video stream: {error}",
    );
}
