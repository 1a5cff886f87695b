use crate::codec::ImageCodec;
use crate::constants::{
    DEFAULT_QUALITY, MAX_FILE_SIZE, MAX_IMAGE_DIMENSION, MAX_QUALITY, MIN_QUALITY,
};
use crate::error::{CompressionError, Result};
use crate::formats::SupportedFormat;
use crate::outcome::{FailureStage, ProcessingOutcome};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Everything one batch run needs. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quality: u8,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl ProcessingRequest {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        quality: Option<u8>,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }
        if max_width == Some(0) {
            return Err(CompressionError::InvalidBound("width"));
        }
        if max_height == Some(0) {
            return Err(CompressionError::InvalidBound("height"));
        }

        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            quality,
            max_width,
            max_height,
        })
    }

    pub fn has_bounds(&self) -> bool {
        self.max_width.is_some() || self.max_height.is_some()
    }
}

/// Computes the bounded-fit size of a `width`x`height` image.
///
/// An unset bound leaves that axis unconstrained. The image is scaled by
/// `min(box_w / width, box_h / height, 1)` and each side is floored, so the
/// result never exceeds the box nor the original size. Returns `None` when no
/// resize is needed.
///
/// The arithmetic is done on integers so that e.g. 2000x1000 into 1024x768
/// yields exactly 1024x512.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let box_w = u64::from(max_width.unwrap_or(width));
    let box_h = u64::from(max_height.unwrap_or(height));
    let (w, h) = (u64::from(width), u64::from(height));

    if box_w >= w && box_h >= h {
        return None;
    }

    // box_w / w <= box_h / h, cross-multiplied
    let (new_w, new_h) = if box_w * h <= box_h * w {
        (box_w, h * box_w / w)
    } else {
        (w * box_h / h, box_h)
    };

    // Extreme aspect ratios would otherwise floor to zero
    Some((new_w.max(1) as u32, new_h.max(1) as u32))
}

/// Resizes `image` in place to its bounded-fit size, if it needs one.
///
/// # Returns
/// * The image's dimensions after the call
pub fn resize_image<C: ImageCodec>(
    codec: &C,
    image: &mut C::Image,
    request: &ProcessingRequest,
) -> (u32, u32) {
    let (width, height) = codec.dimensions(image);
    if !request.has_bounds() {
        return (width, height);
    }

    match fit_dimensions(width, height, request.max_width, request.max_height) {
        Some((new_width, new_height)) => {
            crate::verbose!(
                "Resizing {}x{} -> {}x{}",
                width,
                height,
                new_width,
                new_height
            );
            *image = codec.resize(image, new_width, new_height);
            (new_width, new_height)
        }
        None => (width, height),
    }
}

/// Reads `input_path`, enforcing the size limit before anything is decoded.
fn read_input(input_path: &Path) -> Result<Vec<u8>> {
    let file_size = fs::metadata(input_path)?.len();
    if file_size > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(file_size, MAX_FILE_SIZE));
    }
    Ok(fs::read(input_path)?)
}

/// Decodes a file and validates its dimensions.
///
/// # Returns
/// * `Ok((image, file_size))` - The decoded image and the input size in bytes
pub fn load_image<C: ImageCodec>(codec: &C, input_path: &Path) -> Result<(C::Image, u64)> {
    let bytes = read_input(input_path)?;
    let image = codec.decode(&bytes)?;

    let (width, height) = codec.dimensions(&image);
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }

    Ok((image, bytes.len() as u64))
}

/// Writes `bytes` to `output_path` through a temporary file in the same
/// directory, so a failed write never leaves a truncated output behind.
/// An existing file at `output_path` is replaced.
pub fn write_atomically(output_path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(output_path).map_err(|e| e.error)?;
    Ok(())
}

/// Output location of a candidate: same file name, under `output_dir`.
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| CompressionError::UnsupportedFormat("Invalid file name".to_string()))?;
    Ok(output_dir.join(file_name))
}

/// Runs one candidate file through decode -> resize -> encode -> write.
///
/// Never fails: every error is turned into a [`ProcessingOutcome::Failure`]
/// tagged with the stage it happened in. The decoded image is dropped before
/// this returns.
pub fn process_file<C: ImageCodec>(
    codec: &C,
    input_path: &Path,
    request: &ProcessingRequest,
) -> ProcessingOutcome {
    let failure = |stage, reason| ProcessingOutcome::Failure {
        input: input_path.to_path_buf(),
        stage,
        reason,
    };

    let format = match SupportedFormat::from_path(input_path) {
        Some(format) => format,
        None => {
            let ext = input_path.extension().map(|e| e.to_string_lossy().into_owned());
            return failure(
                FailureStage::Decode,
                CompressionError::UnsupportedFormat(ext.unwrap_or_default()),
            );
        }
    };
    let output_path = match output_path_for(input_path, &request.output_dir) {
        Ok(path) => path,
        Err(e) => return failure(FailureStage::Decode, e),
    };

    let (mut image, original_size) = match load_image(codec, input_path) {
        Ok(loaded) => loaded,
        Err(e) => return failure(FailureStage::Decode, e),
    };
    let original_dimensions = codec.dimensions(&image);

    let final_dimensions = resize_image(codec, &mut image, request);

    crate::verbose!("Encoding {} at quality {}", format, request.quality);
    let encoded = codec
        .encode(&image, format, request.quality)
        .and_then(|bytes| write_atomically(&output_path, &bytes).map(|_| bytes.len() as u64));
    drop(image);

    match encoded {
        Ok(compressed_size) => ProcessingOutcome::Success {
            input: input_path.to_path_buf(),
            output: output_path,
            original_size,
            compressed_size,
            original_dimensions,
            final_dimensions,
        },
        Err(e) => failure(FailureStage::Encode, e),
    }
}
