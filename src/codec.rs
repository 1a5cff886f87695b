use crate::constants::{
    HIGH_COMPRESSION_QUALITY_THRESHOLD, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL,
    OXIPNG_PRESET, ZOPFLI_ITERATIONS, ZOPFLI_QUALITY_THRESHOLD,
};
use crate::error::{CompressionError, Result};
use crate::formats::SupportedFormat;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat};
use oxipng::{Deflaters, Options, StripChunks};
use std::io::Cursor;
use std::num::NonZeroU8;

/// The imaging capabilities the batch compressor needs.
///
/// Any backend that can decode bytes into an image, resize it to exact
/// dimensions and encode it back at a quality level can drive a batch.
pub trait ImageCodec {
    type Image;

    /// Decodes an in-memory file, guessing the format from its content.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image>;

    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    fn resize(&self, image: &Self::Image, width: u32, height: u32) -> Self::Image;

    /// Encodes with size optimisation enabled. `quality` is in `1..=100`.
    fn encode(&self, image: &Self::Image, format: SupportedFormat, quality: u8) -> Result<Vec<u8>>;
}

/// Codec backed by `image` for decoding and JPEG, `oxipng` for PNG and
/// `libwebp` for lossy WebP.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        image.dimensions()
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn encode(&self, image: &DynamicImage, format: SupportedFormat, quality: u8) -> Result<Vec<u8>> {
        match format {
            SupportedFormat::Jpeg => encode_jpeg(image, quality),
            SupportedFormat::Png => encode_png(image, quality),
            SupportedFormat::WebP => encode_webp(image, quality),
        }
    }
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    }
    Ok(buf)
}

fn encode_png(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    image.write_to(&mut Cursor::new(&mut raw), ImageFormat::Png)?;

    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = png_deflater(quality);
    options.strip = StripChunks::Safe;

    oxipng::optimize_from_memory(&raw, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// PNG is lossless, so quality only decides how hard the deflate stage works.
pub(crate) fn png_deflater(quality: u8) -> Deflaters {
    if quality >= ZOPFLI_QUALITY_THRESHOLD {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
        }
    } else if quality >= HIGH_COMPRESSION_QUALITY_THRESHOLD {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    }
}

fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let quality = f32::from(quality);
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
            .encode_simple(false, quality)
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
            .encode_simple(false, quality)
    };

    let memory = encoded.map_err(|e| CompressionError::WebPEncoding(format!("{:?}", e)))?;
    Ok(memory.to_vec())
}
