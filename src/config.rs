//! Encoder parameters and the description of a single generation job.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use image::Rgb;

use crate::error::{QrLogoError, Result};

/// URL encoded when nothing else is requested.
pub const DEFAULT_URL: &str = "https://webshield100.onrender.com";
/// Logo read from the working directory by default.
pub const DEFAULT_LOGO_PATH: &str = "logo192.png";
/// Composite written to the working directory by default.
pub const DEFAULT_OUTPUT_PATH: &str = "webshield_qr_logo.png";

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl From<QrCodeEcc> for qrcode::EcLevel {
    fn from(ecc: QrCodeEcc) -> Self {
        match ecc {
            QrCodeEcc::Low => qrcode::EcLevel::L,
            QrCodeEcc::Medium => qrcode::EcLevel::M,
            QrCodeEcc::Quartile => qrcode::EcLevel::Q,
            QrCodeEcc::High => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for QrCodeEcc {
    type Err = QrLogoError;

    /// Accepts the single-letter names (`L`, `M`, `Q`, `H`) as well as the
    /// full names, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "q" | "quartile" => Ok(Self::Quartile),
            "h" | "high" => Ok(Self::High),
            other => Err(QrLogoError::InvalidConfig(format!(
                "unknown error correction level '{other}', expected one of L, M, Q, H"
            ))),
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version from its number, or `None` outside [1, 40].
    pub const fn new(ver: u8) -> Option<Self> {
        if Version::MIN.value() <= ver && ver <= Version::MAX.value() {
            Some(Self(ver))
        } else {
            None
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Number of modules along one side of a symbol of this version.
    pub const fn modules_across(self) -> u32 {
        self.0 as u32 * 4 + 17
    }

    /// Iterates from this version up to [`Version::MAX`], inclusive.
    pub fn upwards(self) -> impl Iterator<Item = Version> {
        (self.0..=Version::MAX.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = QrLogoError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Version::new)
            .ok_or_else(|| {
                QrLogoError::InvalidConfig(format!("QR version must be between 1 and 40, got '{s}'"))
            })
    }
}

/// Parses a `#rrggbb` (or `rrggbb`) color.
pub fn parse_hex_color(s: &str) -> Result<Rgb<u8>> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || QrLogoError::InvalidConfig(format!("invalid color '{s}', expected #rrggbb"));
    if digits.len() != 6 {
        return Err(invalid());
    }
    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    Ok(Rgb([bytes[0], bytes[1], bytes[2]]))
}

/// Parameters of the QR symbol and its rasterization.
#[derive(Clone, Debug, PartialEq)]
pub struct QrConfig {
    /// Requested symbol version. With `fit` set this is the smallest version tried.
    pub version: Version,
    pub ecc: QrCodeEcc,
    /// Pixels per module.
    pub module_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    /// Raise the version until the payload fits instead of failing.
    pub fit: bool,
    pub fill_color: Rgb<u8>,
    pub back_color: Rgb<u8>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            version: Version(2),
            ecc: QrCodeEcc::High,
            module_size: 10,
            border: 4,
            fit: true,
            fill_color: Rgb([0, 0, 0]),
            back_color: Rgb([255, 255, 255]),
        }
    }
}

impl QrConfig {
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_ecc(mut self, ecc: QrCodeEcc) -> Self {
        self.ecc = ecc;
        self
    }

    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size;
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_colors(mut self, fill_color: Rgb<u8>, back_color: Rgb<u8>) -> Self {
        self.fill_color = fill_color;
        self.back_color = back_color;
        self
    }

    /// Checks the parameters that the type system does not already enforce.
    pub fn validate(&self) -> Result<()> {
        if self.module_size == 0 {
            return Err(QrLogoError::InvalidConfig(
                "module size must be at least one pixel".into(),
            ));
        }
        let largest = if self.fit { Version::MAX } else { self.version };
        let side = (largest.modules_across() as u64 + 2 * self.border as u64)
            * self.module_size as u64;
        if side > u32::MAX as u64 {
            return Err(QrLogoError::InvalidConfig(format!(
                "raster side of {side} pixels is too large"
            )));
        }
        Ok(())
    }
}

/// Everything needed for one run: what to encode, which logo, where to write.
#[derive(Clone, Debug)]
pub struct LogoQrJob {
    pub payload: String,
    pub logo_path: PathBuf,
    pub output_path: PathBuf,
    pub qr: QrConfig,
}

impl Default for LogoQrJob {
    fn default() -> Self {
        Self {
            payload: DEFAULT_URL.to_string(),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            qr: QrConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_from_str() {
        assert_eq!("H".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::High);
        assert_eq!("quartile".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::Quartile);
        assert_eq!("m".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::Medium);
        assert!("X".parse::<QrCodeEcc>().is_err());
    }

    #[test]
    fn test_version_range() {
        assert!(Version::new(0).is_none());
        assert!(Version::new(41).is_none());
        assert_eq!(Version::new(2).unwrap().modules_across(), 25);
        assert_eq!(Version::MAX.modules_across(), 177);
        assert!("0".parse::<Version>().is_err());
        assert_eq!("40".parse::<Version>().unwrap(), Version::MAX);
    }

    #[test]
    fn test_version_upwards() {
        let versions: Vec<u8> = Version::new(38).unwrap().upwards().map(Version::value).collect();
        assert_eq!(versions, vec![38, 39, 40]);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), Rgb([255, 128, 0]));
        assert_eq!(parse_hex_color("000000").unwrap(), Rgb([0, 0, 0]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn test_default_parameters() {
        let config = QrConfig::default();
        assert_eq!(config.version.value(), 2);
        assert_eq!(config.ecc, QrCodeEcc::High);
        assert_eq!(config.module_size, 10);
        assert_eq!(config.border, 4);
        assert!(config.fit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_module_size_rejected() {
        let config = QrConfig::default().with_module_size(0);
        assert!(matches!(config.validate(), Err(QrLogoError::InvalidConfig(_))));
    }
}
