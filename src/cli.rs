use crate::constants::{MAX_HEIGHT_ENV, MAX_WIDTH_ENV, QUALITY_ENV};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-shrink",
    about = "Batch-compress and downscale the images of a directory",
    long_about = "img-shrink re-encodes every PNG, JPEG and WebP file found directly inside \
                  INPUT_DIR at a reduced quality, optionally downscaling each one to fit a \
                  bounding box, and writes the results under the same names into OUTPUT_DIR. \
                  Files that cannot be processed are reported and skipped.",
    version,
    after_help = "EXAMPLES:\n  \
    img-shrink ./photos ./photos/compressed -q 50 -w 1024 -H 768\n  \
    img-shrink ./scans ./out --max-width 2048\n  \
    IMG_SHRINK_QUALITY=60 img-shrink ./in ./out --quiet"
)]
pub struct Args {
    #[arg(help = "Directory containing the images to compress")]
    pub input: PathBuf,

    #[arg(
        help = "Directory to write compressed images to",
        long_help = "Directory to write compressed images to. Created, including missing \
                     parents, if it does not exist. Existing files with the same name are \
                     overwritten."
    )]
    pub output: PathBuf,

    #[arg(
        short = 'q',
        long,
        env = QUALITY_ENV,
        help = "Compression quality (1-100, default: 70)",
        long_help = "Compression quality from 1 (smallest) to 100 (best). \
                     JPEG and WebP use it as the lossy quality. PNG stays lossless: \
                     >=90 uses Zopfli, >=70 high compression, <70 standard compression."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'w',
        long,
        env = MAX_WIDTH_ENV,
        help = "Maximum width in pixels",
        long_help = "Downscale images wider than this while preserving aspect ratio. \
                     Images are never enlarged."
    )]
    pub max_width: Option<u32>,

    #[arg(
        short = 'H',
        long,
        env = MAX_HEIGHT_ENV,
        help = "Maximum height in pixels",
        long_help = "Downscale images taller than this while preserving aspect ratio. \
                     Images are never enlarged."
    )]
    pub max_height: Option<u32>,

    #[arg(long, conflicts_with = "verbose", help = "Only print failures")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print resize and size details per file")]
    pub verbose: bool,
}
