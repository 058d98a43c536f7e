//! Transport encoding: fixed-size JPEG, base64 wrapped.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

use crate::config::EncodeConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::llm::ImageInput;

/// Produces the square JPEG copy of an image that is sent to the model.
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    size: u32,
}

impl ImageEncoder {
    pub fn new(config: &EncodeConfig) -> Self {
        Self { size: config.size }
    }

    /// Edge length of the output raster.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Decode `path`, stretch it to `size`×`size` and return it as base64 JPEG.
    ///
    /// The JPEG is staged in a temporary file that is removed when this
    /// function returns, on success or error. Blocking; run it on the
    /// blocking pool from async code.
    pub fn encode(&self, path: &Path) -> PipelineResult<ImageInput> {
        let decode_err = |message: String| PipelineError::Decode {
            path: path.to_path_buf(),
            message,
        };

        // Format comes from the file contents, not the extension.
        let image = ImageReader::open(path)
            .map_err(|e| decode_err(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_err(format!("Cannot detect image format: {e}")))?
            .decode()
            .map_err(|e| decode_err(e.to_string()))?;

        // Aspect ratio is not preserved.
        let resized = image.resize_exact(self.size, self.size, FilterType::CatmullRom);
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let encode_err = |message: String| PipelineError::Encode {
            path: path.to_path_buf(),
            message,
        };

        let staged = tempfile::Builder::new()
            .prefix("taxon-")
            .suffix(".jpg")
            .tempfile()
            .map_err(|e| encode_err(format!("Cannot create temporary file: {e}")))?;

        rgb.save_with_format(staged.path(), ImageFormat::Jpeg)
            .map_err(|e| encode_err(e.to_string()))?;

        let bytes = std::fs::read(staged.path())
            .map_err(|e| encode_err(format!("Cannot read staged JPEG: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            "Encoded {}x{} JPEG",
            self.size,
            self.size
        );

        Ok(ImageInput::from_jpeg(&bytes))
    }
}
