use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, RgbImage};
use tracing::{info, instrument};

use crate::compose::{paste_logo, paste_position};
use crate::config::{LogoQrJob, QrConfig, Version};
use crate::error::{QrLogoError, Result};
use crate::logo::{load_logo, logo_size, FilterResizer, Resize};
use crate::raster::{encode_modules, render_modules, QrRasterizer, Rasterize};

/// Summary of a generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedQr {
    pub path: PathBuf,
    /// Version the payload was finally encoded with.
    pub version: Version,
    pub width: u32,
    pub height: u32,
}

/// Generates the QR code image buffer for `content`, without a logo.
///
/// # Example
///
/// ```
/// use qrlogo::config::QrConfig;
/// use qrlogo::helper::generate_image_buffer;
///
/// let img = generate_image_buffer("Hello, World!", &QrConfig::default()).unwrap();
/// assert_eq!(img.width(), img.height());
/// ```
pub fn generate_image_buffer(content: &str, config: &QrConfig) -> Result<RgbImage> {
    config.validate()?;
    QrRasterizer.rasterize(content, config)
}

/// Rasterizes `content` and pastes `logo`, resized to a fifth of the raster
/// width, at its center.
pub fn compose_logo_qr<R, S>(
    content: &str,
    config: &QrConfig,
    logo: &DynamicImage,
    rasterizer: &R,
    resizer: &S,
) -> Result<RgbImage>
where
    R: Rasterize + ?Sized,
    S: Resize + ?Sized,
{
    config.validate()?;
    let mut img = rasterizer.rasterize(content, config)?;
    overlay_logo(&mut img, logo, resizer)?;
    Ok(img)
}

/// Resizes `logo` to a square a fifth of the width of `img` and pastes it
/// centered.
pub fn overlay_logo<S>(img: &mut RgbImage, logo: &DynamicImage, resizer: &S) -> Result<()>
where
    S: Resize + ?Sized,
{
    let (width, height) = img.dimensions();
    let size = logo_size(width);
    if size == 0 {
        return Err(QrLogoError::InvalidConfig(format!(
            "a {width}px wide code leaves no room for a logo"
        )));
    }
    let logo = resizer.resize(logo, size, size);
    let (x, y) = paste_position(width, height, size);
    paste_logo(img, &logo, x, y);
    Ok(())
}

/// Writes `img` to `path`, picking the format from the extension. An existing
/// file is overwritten; missing parent directories are an error.
pub fn save_image(img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    img.save(path).map_err(|err| match err {
        ImageError::IoError(source) => QrLogoError::Io {
            path: path.to_path_buf(),
            source,
        },
        ImageError::Unsupported(_) => QrLogoError::UnsupportedFormat(path.to_path_buf()),
        source => QrLogoError::Encode {
            path: path.to_path_buf(),
            source,
        },
    })?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "Image written");
    Ok(())
}

/// Runs a whole job: encode, load the logo, composite, save.
///
/// Every failure aborts the run. Encoding and logo loading happen before
/// anything is written, so a payload that does not fit or a missing logo
/// leaves no output file behind.
///
/// # Example
///
/// ```no_run
/// use qrlogo::config::LogoQrJob;
/// use qrlogo::helper::generate_logo_qr_and_save;
///
/// let generated = generate_logo_qr_and_save(&LogoQrJob::default()).unwrap();
/// println!("{}", generated.path.display());
/// ```
#[instrument(skip_all, fields(output = %job.output_path.display()))]
pub fn generate_logo_qr_and_save(job: &LogoQrJob) -> Result<GeneratedQr> {
    job.qr.validate()?;
    let modules = encode_modules(&job.payload, &job.qr)?;
    let logo = load_logo(&job.logo_path)?;

    let mut img = render_modules(&modules, &job.qr);
    overlay_logo(&mut img, &logo, &FilterResizer::default())?;
    save_image(&img, &job.output_path)?;

    Ok(GeneratedQr {
        path: job.output_path.clone(),
        version: modules.version(),
        width: img.width(),
        height: img.height(),
    })
}
