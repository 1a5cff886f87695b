use crate::error::CompressionError;
use crate::utils::calculate_compression_ratio;
use std::fmt;
use std::path::{Path, PathBuf};

/// Step of the per-file pipeline a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Reading, decoding or validating the input
    Decode,
    /// Encoding or writing the output
    Encode,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Decode => write!(f, "decode"),
            FailureStage::Encode => write!(f, "encode"),
        }
    }
}

/// Result of processing a single candidate file.
#[derive(Debug)]
pub enum ProcessingOutcome {
    Success {
        input: PathBuf,
        output: PathBuf,
        original_size: u64,
        compressed_size: u64,
        original_dimensions: (u32, u32),
        final_dimensions: (u32, u32),
    },
    Failure {
        input: PathBuf,
        stage: FailureStage,
        reason: CompressionError,
    },
}

impl ProcessingOutcome {
    pub fn input(&self) -> &Path {
        match self {
            ProcessingOutcome::Success { input, .. } | ProcessingOutcome::Failure { input, .. } => {
                input.as_path()
            }
        }
    }

    pub fn output(&self) -> Option<&Path> {
        match self {
            ProcessingOutcome::Success { output, .. } => Some(output.as_path()),
            ProcessingOutcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success { .. })
    }
}

/// Every outcome of one batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ProcessingOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: ProcessingOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &ProcessingOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProcessingOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Input and output byte totals over successful files only.
    pub fn total_sizes(&self) -> (u64, u64) {
        self.outcomes
            .iter()
            .fold((0, 0), |(before, after), outcome| match outcome {
                ProcessingOutcome::Success {
                    original_size,
                    compressed_size,
                    ..
                } => (before + original_size, after + compressed_size),
                ProcessingOutcome::Failure { .. } => (before, after),
            })
    }

    pub fn compression_ratio(&self) -> f64 {
        let (before, after) = self.total_sizes();
        calculate_compression_ratio(before, after)
    }

    pub fn into_outcomes(self) -> Vec<ProcessingOutcome> {
        self.outcomes
    }
}
