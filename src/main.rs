use anyhow::Context;
use clap::Parser;
use img_shrink::cli::Args;
use img_shrink::{compress, logger, ProcessingRequest};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    let request = ProcessingRequest::new(
        args.input,
        args.output,
        args.quality,
        args.max_width,
        args.max_height,
    )?;

    // Per-file failures are already reported; only setup errors end the run here.
    compress(&request).with_context(|| {
        format!(
            "batch compression of {} aborted",
            request.input_dir.display()
        )
    })?;

    Ok(())
}
