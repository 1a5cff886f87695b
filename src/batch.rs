use crate::codec::{ImageCodec, StandardCodec};
use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::{CompressionError, Result};
use crate::formats::is_candidate_file;
use crate::logger;
use crate::outcome::{BatchReport, ProcessingOutcome};
use crate::processing::{process_file, ProcessingRequest};
use crate::utils::format_file_size;
use crate::{error, info, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Compresses every candidate image of `request.input_dir` with the default codec.
///
/// See [`compress_with`].
pub fn compress(request: &ProcessingRequest) -> Result<BatchReport> {
    compress_with(&StandardCodec, request)
}

/// Compresses every candidate image of `request.input_dir` into
/// `request.output_dir`, one file at a time.
///
/// # Returns
/// * `Ok(report)` - One outcome per candidate file, in file-name order. Files
///   that failed to decode or encode are reported there and never abort the run
/// * `Err(CompressionError)` - Only if the output directory cannot be created
///   or the input directory cannot be listed
pub fn compress_with<C: ImageCodec>(codec: &C, request: &ProcessingRequest) -> Result<BatchReport> {
    info!("🚀 Starting batch compression...");
    info!("📁 Input: {}", request.input_dir.display());
    info!("📁 Output: {}", request.output_dir.display());

    let start_time = Instant::now();

    ensure_output_directory(&request.output_dir)?;
    let candidates = collect_candidate_files(&request.input_dir)?;

    if candidates.is_empty() {
        warn!("No image files found in {}", request.input_dir.display());
        return Ok(BatchReport::default());
    }

    info!("📊 Found {} image files to process", candidates.len());
    verbose!(
        "Quality {}, bounds {:?}x{:?}",
        request.quality,
        request.max_width,
        request.max_height
    );

    let progress = create_progress_bar(candidates.len());
    let mut report = BatchReport::default();

    for input_path in &candidates {
        if let Some(name) = input_path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }

        let outcome = process_file(codec, input_path, request);
        progress.suspend(|| log_outcome(&outcome));
        progress.inc(1);
        report.push(outcome);
    }

    progress.finish_and_clear();
    print_summary(&report, start_time.elapsed());

    Ok(report)
}

/// Creates the output directory and any missing parents.
pub fn ensure_output_directory(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|source| CompressionError::DirectoryCreationFailed {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Lists the candidate files directly inside `input_dir`, sorted by file name.
///
/// Sub-directories are not descended into. Symlinks are kept unless they point
/// at a directory; a dangling one surfaces later as a per-file failure.
pub fn collect_candidate_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CompressionError::InputNotADirectory(input_dir.to_path_buf()));
    }

    let mut image_files = Vec::new();
    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !is_candidate_file(path) {
            continue;
        }

        let is_file = entry.file_type().is_file();
        let is_file_link = entry.path_is_symlink() && !path.is_dir();
        if is_file || is_file_link {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

fn create_progress_bar(total: usize) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress
}

fn log_outcome(outcome: &ProcessingOutcome) {
    match outcome {
        ProcessingOutcome::Success {
            output,
            original_size,
            compressed_size,
            original_dimensions,
            final_dimensions,
            ..
        } => {
            info!("Compressed and saved: {}", output.display());
            verbose!(
                "{}x{} -> {}x{}, {} -> {}",
                original_dimensions.0,
                original_dimensions.1,
                final_dimensions.0,
                final_dimensions.1,
                format_file_size(*original_size),
                format_file_size(*compressed_size)
            );
        }
        ProcessingOutcome::Failure {
            input,
            stage,
            reason,
        } => {
            error!("Failed to process {}: {}", input.display(), reason);
            verbose!("{} failed during {}", input.display(), stage);
        }
    }
}

fn print_summary(report: &BatchReport, elapsed: Duration) {
    let (total_before, total_after) = report.total_sizes();

    info!("\n📊 Batch Compression Summary:");
    info!("  📁 Total files processed: {}", report.success_count());
    info!(
        "  📊 Total original size: {}",
        format_file_size(total_before)
    );
    info!(
        "  📊 Total compressed size: {}",
        format_file_size(total_after)
    );
    info!(
        "  🎯 Overall compression ratio: {:.1}%",
        report.compression_ratio()
    );
    info!("  ⏱️  Total time: {:.2?}", elapsed);

    let failed_count = report.failure_count();
    if failed_count > 0 {
        info!("  ⚠️  Failed files: {}", failed_count);
    }
}
