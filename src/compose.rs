//! Pasting the logo onto the rasterized symbol.

use image::{imageops, DynamicImage, RgbImage};
use tracing::debug;

/// Top-left corner that centers a `logo_size` square on a `width` x `height` base.
pub fn paste_position(width: u32, height: u32, logo_size: u32) -> (u32, u32) {
    (
        width.saturating_sub(logo_size) / 2,
        height.saturating_sub(logo_size) / 2,
    )
}

/// Pastes `logo` onto `base` with its top-left corner at (`x`, `y`).
///
/// A logo with an alpha channel is blended using alpha as the paste mask: fully
/// transparent pixels keep the base, fully opaque ones replace it. A logo
/// without alpha overwrites the rectangle. Anything past the edges of `base`
/// is clipped.
pub fn paste_logo(base: &mut RgbImage, logo: &DynamicImage, x: u32, y: u32) {
    if logo.color().has_alpha() {
        debug!(x, y, width = logo.width(), height = logo.height(), "Pasting logo with alpha mask");
        let logo = logo.to_rgba8();
        for (lx, ly, src) in logo.enumerate_pixels() {
            let (bx, by) = (x + lx, y + ly);
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            let alpha = src[3] as u32;
            let dst = base.get_pixel_mut(bx, by);
            for c in 0..3 {
                dst[c] = blend(dst[c], src[c], alpha);
            }
        }
    } else {
        debug!(x, y, width = logo.width(), height = logo.height(), "Pasting opaque logo");
        imageops::replace(base, &logo.to_rgb8(), x as i64, y as i64);
    }
}

fn blend(base: u8, over: u8, alpha: u32) -> u8 {
    let mixed = base as u32 * (255 - alpha) + over as u32 * alpha;
    ((mixed + 127) / 255) as u8
}
