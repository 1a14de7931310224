use std::path::PathBuf;

use thiserror::Error;

use crate::config::QrCodeEcc;

/// Errors raised while building a logo QR code.
#[derive(Debug, Error)]
pub enum QrLogoError {
    /// The payload does not fit the requested version / error correction level.
    #[error("payload of {len} bytes does not fit a version {version} symbol at {ecc:?} error correction")]
    CapacityExceeded {
        version: u8,
        ecc: QrCodeEcc,
        len: usize,
    },

    #[error("QR encoding failed: {0}")]
    Qr(qrcode::types::QrError),

    #[error("logo file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no image format matches the extension of {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, QrLogoError>;
