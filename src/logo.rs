//! Loading and resizing the logo.

use std::io::ErrorKind;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use tracing::{debug, info, instrument};

use crate::error::{QrLogoError, Result};

/// Fraction of the raster width taken by the logo.
pub const LOGO_SCALE: f64 = 0.2;

/// Side of the square logo for a raster `raster_width` pixels wide.
pub fn logo_size(raster_width: u32) -> u32 {
    (raster_width as f64 * LOGO_SCALE).floor() as u32
}

/// Reads and decodes the image at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_logo(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| match err {
        ImageError::IoError(io) if io.kind() == ErrorKind::NotFound => {
            QrLogoError::FileNotFound(path.to_path_buf())
        }
        source => QrLogoError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;
    info!(
        width = img.width(),
        height = img.height(),
        alpha = img.color().has_alpha(),
        "Logo loaded"
    );
    Ok(img)
}

/// Resamples an image to an exact size.
pub trait Resize {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;
}

/// [`Resize`] implementation using one of the `image` crate filters.
///
/// The aspect ratio is not preserved: a non-square logo is stretched.
#[derive(Clone, Copy, Debug)]
pub struct FilterResizer {
    filter: FilterType,
}

impl FilterResizer {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for FilterResizer {
    /// Bicubic (Catmull-Rom) resampling.
    fn default() -> Self {
        Self::new(FilterType::CatmullRom)
    }
}

impl Resize for FilterResizer {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        debug!(
            from_w = image.width(),
            from_h = image.height(),
            width,
            height,
            "Resizing logo"
        );
        image.resize_exact(width, height, self.filter)
    }
}
