pub mod logger;

pub mod batch;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod formats;
pub mod outcome;
pub mod processing;
pub mod utils;

pub use batch::{collect_candidate_files, compress, compress_with, ensure_output_directory};
pub use codec::{ImageCodec, StandardCodec};
pub use error::{CompressionError, Result};
pub use formats::{is_candidate_file, SupportedFormat};
pub use outcome::{BatchReport, FailureStage, ProcessingOutcome};
pub use processing::{fit_dimensions, process_file, resize_image, ProcessingRequest};
