use std::io::Write;

use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use lumadump::{DumpConfig, DumpError, FfmpegBackend, Pipeline};

const LOG_PREFIX: &str = "LOG: ";

const CLI_AFTER_HELP: &str = "Frames are written to ./0_frames/frame-<n>.pgm; the directory must already exist.\n\nExample:\n  mkdir -p 0_frames && lumadump input.mp4";

#[derive(Debug, Parser)]
#[command(
    name = "lumadump",
    version,
    about = "Decode the first video packets of a media file and save each frame's luma plane as PGM",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input media path or URL.
    input: String,
}

fn init_logging() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "{LOG_PREFIX}{}", record.args()))
        .init();
}

fn run(cli: &Cli) -> Result<(), DumpError> {
    log::info!("initializing all the containers, codecs and protocols.");
    lumadump::ffmpeg::init(LevelFilter::Error)?;

    let summary = Pipeline::new(FfmpegBackend, DumpConfig::new()).run(&cli.input)?;
    for path in &summary.output_files {
        log::debug!("saved {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(error) = run(&cli) {
        log::error!("ERROR {error}");
        std::process::exit(1);
    }
}
