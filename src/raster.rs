//! QR symbol encoding and rasterization.
//!
//! Symbol construction (segment selection, Reed–Solomon coding, masking) is
//! delegated to the `qrcode` crate; this module picks the version, collects
//! the module grid and paints it into an RGB buffer.

use image::{ImageBuffer, RgbImage};
use qrcode::types::QrError;
use tracing::{debug, info};

use crate::config::{QrConfig, Version};
use crate::error::{QrLogoError, Result};

/// Turns a payload into a raster image.
pub trait Rasterize {
    fn rasterize(&self, payload: &str, config: &QrConfig) -> Result<RgbImage>;
}

/// [`Rasterize`] implementation backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrRasterizer;

impl Rasterize for QrRasterizer {
    fn rasterize(&self, payload: &str, config: &QrConfig) -> Result<RgbImage> {
        let modules = encode_modules(payload, config)?;
        Ok(render_modules(&modules, config))
    }
}

/// The module grid of an encoded symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrModules {
    version: Version,
    width: u32,
    dark: Vec<bool>,
}

impl QrModules {
    /// The version the payload was finally encoded with.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Modules along one side, without quiet zone.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the color of the module at the given coordinates, which are
    /// allowed to be out of bounds. Out of bounds modules are light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        if (0..w).contains(&x) && (0..w).contains(&y) {
            self.dark[(y * w + x) as usize]
        } else {
            false
        }
    }
}

/// Encodes `payload` at the configured version and error correction level.
///
/// With `config.fit` every version from the requested one up to 40 is tried in
/// turn; otherwise only the requested version is.
pub fn encode_modules(payload: &str, config: &QrConfig) -> Result<QrModules> {
    let last = if config.fit { Version::MAX } else { config.version };
    for version in config.version.upwards().take_while(|v| *v <= last) {
        let symbol = qrcode::QrCode::with_version(
            payload.as_bytes(),
            qrcode::Version::Normal(version.value() as i16),
            config.ecc.into(),
        );
        match symbol {
            Ok(code) => {
                let width = code.width() as u32;
                let dark = code
                    .to_colors()
                    .into_iter()
                    .map(|color| color == qrcode::Color::Dark)
                    .collect();
                info!(
                    version = version.value(),
                    requested = config.version.value(),
                    modules = width,
                    "QR symbol encoded"
                );
                return Ok(QrModules { version, width, dark });
            }
            Err(QrError::DataTooLong) => {
                debug!(version = version.value(), "payload too long, trying next version");
            }
            Err(err) => return Err(QrLogoError::Qr(err)),
        }
    }
    Err(QrLogoError::CapacityExceeded {
        version: last.value(),
        ecc: config.ecc,
        len: payload.len(),
    })
}

/// Paints `modules` at `config.module_size` pixels per module, surrounded by
/// `config.border` modules of quiet zone.
pub fn render_modules(modules: &QrModules, config: &QrConfig) -> RgbImage {
    let scale = config.module_size;
    let border = config.border as i64;
    let size = (modules.width() + 2 * config.border) * scale;
    let mut img: RgbImage = ImageBuffer::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / scale) as i64 - border;
        let qr_y = (y / scale) as i64 - border;
        *pixel = if modules.is_dark(qr_x, qr_y) {
            config.fill_color
        } else {
            config.back_color
        };
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QrCodeEcc;

    fn fixed_v2() -> QrConfig {
        QrConfig::default().with_fit(false)
    }

    #[test]
    fn test_version_2_raster_dimensions() {
        let img = QrRasterizer.rasterize("HELLO", &fixed_v2()).unwrap();
        // (25 modules + 2 * 4 border) * 10 pixels
        assert_eq!(img.dimensions(), (330, 330));
    }

    #[test]
    fn test_border_is_background() {
        let img = QrRasterizer.rasterize("HELLO", &fixed_v2()).unwrap();
        for i in 0..40 {
            assert_eq!(*img.get_pixel(i, i), image::Rgb([255, 255, 255]));
        }
        // Top-left finder pattern starts right after the quiet zone.
        assert_eq!(*img.get_pixel(40, 40), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_zero_border_and_unit_modules() {
        let config = fixed_v2().with_border(0).with_module_size(1);
        let img = QrRasterizer.rasterize("HELLO", &config).unwrap();
        assert_eq!(img.dimensions(), (25, 25));
        assert_eq!(*img.get_pixel(0, 0), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_rasterization_is_deterministic() {
        let config = QrConfig::default();
        let first = QrRasterizer.rasterize(crate::config::DEFAULT_URL, &config).unwrap();
        let second = QrRasterizer.rasterize(crate::config::DEFAULT_URL, &config).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
        assert_eq!(
            encode_modules(crate::config::DEFAULT_URL, &config).unwrap(),
            encode_modules(crate::config::DEFAULT_URL, &config).unwrap()
        );
    }

    #[test]
    fn test_fit_raises_version() {
        let payload = "a".repeat(100);
        let modules = encode_modules(&payload, &QrConfig::default()).unwrap();
        assert!(modules.version() > Version::new(2).unwrap());
        assert_eq!(modules.width(), modules.version().modules_across());
    }

    #[test]
    fn test_fit_never_lowers_version() {
        let config = QrConfig::default().with_version(Version::new(5).unwrap());
        let modules = encode_modules("HI", &config).unwrap();
        assert_eq!(modules.version().value(), 5);
        assert_eq!(modules.width(), 37);
    }

    #[test]
    fn test_fixed_version_capacity_exceeded() {
        let payload = "a".repeat(100);
        match encode_modules(&payload, &fixed_v2()) {
            Err(QrLogoError::CapacityExceeded { version, ecc, len }) => {
                assert_eq!(version, 2);
                assert_eq!(ecc, QrCodeEcc::High);
                assert_eq!(len, 100);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_fit_capacity_exceeded_at_max_version() {
        let payload = "a".repeat(5000);
        let err = encode_modules(&payload, &QrConfig::default()).unwrap_err();
        assert!(matches!(err, QrLogoError::CapacityExceeded { version: 40, .. }));
    }

    #[test]
    fn test_custom_colors() {
        let fill = image::Rgb([200, 0, 0]);
        let back = image::Rgb([0, 0, 200]);
        let config = fixed_v2().with_colors(fill, back);
        let img = QrRasterizer.rasterize("HELLO", &config).unwrap();
        assert_eq!(*img.get_pixel(0, 0), back);
        assert_eq!(*img.get_pixel(40, 40), fill);
        assert!(img.pixels().all(|p| *p == fill || *p == back));
    }

    #[test]
    fn test_out_of_bounds_modules_are_light() {
        let modules = encode_modules("HELLO", &fixed_v2()).unwrap();
        assert!(!modules.is_dark(-1, 0));
        assert!(!modules.is_dark(0, 25));
        assert!(modules.is_dark(0, 0));
    }
}
