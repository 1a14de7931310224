//! # qrlogo
//!
//! Generate a QR code with a logo pasted at its center.
//!
//! `qrlogo` encodes a payload (typically a URL) into a QR symbol with the `qrcode` crate,
//! rasterizes it into an RGB image, resizes a logo to a fifth of the code's width, pastes it
//! in the middle and writes the result with the `image` crate. Use a high error correction
//! level so the code still scans with the logo covering its center.
//!
//! ## Features
//!
//! - Choose the QR version, error correction level, module size and quiet zone width.
//! - Let the version grow automatically until the payload fits, or fail on overflow.
//! - Logos with an alpha channel are blended through it; opaque logos overwrite the center.
//! - Any output format the `image` crate can infer from the file extension.
//!
//! ## Example
//!
//! Generate the default job (`logo192.png` in, `webshield_qr_logo.png` out):
//!
//! ```no_run
//! use qrlogo::{config::LogoQrJob, helper::generate_logo_qr_and_save};
//!
//! let job = LogoQrJob {
//!     payload: "https://example.com".to_string(),
//!     ..LogoQrJob::default()
//! };
//! let generated = generate_logo_qr_and_save(&job).expect("Failed to generate QR code");
//! println!("QR code written to {}", generated.path.display());
//! ```
//!
//! Compose in memory with the pluggable rasterizer and resizer:
//!
//! ```rust
//! use image::DynamicImage;
//! use qrlogo::config::QrConfig;
//! use qrlogo::helper::compose_logo_qr;
//! use qrlogo::logo::FilterResizer;
//! use qrlogo::raster::QrRasterizer;
//!
//! let logo = DynamicImage::new_rgba8(192, 192);
//! let img = compose_logo_qr(
//!     "Hello, World!",
//!     &QrConfig::default(),
//!     &logo,
//!     &QrRasterizer,
//!     &FilterResizer::default(),
//! )
//! .unwrap();
//! assert_eq!(img.width(), img.height());
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Encoder parameters and job description.
//! - [`raster`]: QR encoding and rasterization.
//! - [`logo`]: Logo loading and resizing.
//! - [`compose`]: Centered, alpha-aware pasting.
//! - [`helper`]: The end-to-end pipeline and the image writer.
//! - [`error`]: The error type shared by all of the above.

pub mod compose;
pub mod config;
pub mod error;
pub mod helper;
pub mod logo;
pub mod raster;

pub use config::{LogoQrJob, QrCodeEcc, QrConfig, Version};
pub use error::{QrLogoError, Result};
pub use helper::{generate_logo_qr_and_save, GeneratedQr};
