//! Benchmarks for PGM export and the full decode pipeline.
//!
//! Run with: cargo bench
//!
//! The pipeline benchmark needs `tests/fixtures/sample_video.mp4` and is
//! skipped when it is missing.

use std::{hint::black_box, path::Path};

use criterion::Criterion;
use log::LevelFilter;
use lumadump::{DumpConfig, FfmpegBackend, Pipeline, Plane, pgm};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";

fn padded_plane(width: usize, height: usize, stride: usize) -> Vec<u8> {
    (0..stride * height).map(|index| (index % 251) as u8).collect()
}

fn benchmark_gray_export(criterion: &mut Criterion) {
    let packed = padded_plane(1920, 1080, 1920);
    let padded = padded_plane(1920, 1080, 2048);
    let mut output = Vec::with_capacity(pgm::header_len(1920, 1080) + 1920 * 1080);

    criterion.bench_function("write 1080p luma (packed stride)", |bencher| {
        bencher.iter(|| {
            output.clear();
            let plane = Plane { data: &packed, stride: 1920 };
            pgm::write_gray_frame(&mut output, black_box(plane), 1920, 1080).unwrap();
        });
    });

    criterion.bench_function("write 1080p luma (padded stride)", |bencher| {
        bencher.iter(|| {
            output.clear();
            let plane = Plane { data: &padded, stride: 2048 };
            pgm::write_gray_frame(&mut output, black_box(plane), 1920, 1080).unwrap();
        });
    });
}

fn benchmark_pipeline(criterion: &mut Criterion) {
    lumadump::ffmpeg::init(LevelFilter::Error).unwrap();

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    let output_directory = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        FfmpegBackend,
        DumpConfig::new().with_output_directory(output_directory.path()),
    );

    criterion.bench_function("decode and dump 12 packets", |bencher| {
        bencher.iter(|| pipeline.run(SAMPLE_VIDEO).unwrap());
    });
}

criterion::criterion_group!(benches, benchmark_gray_export, benchmark_pipeline);
criterion::criterion_main!(benches);
