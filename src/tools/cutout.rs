//! Cutout compositing for the background remover.
//!
//! Segmentation happens in an external model (see `folio-functions`); the
//! local half of the feature just composites the returned RGBA cutout over
//! a chosen treatment of the original image: fully transparent, a solid
//! fill, or a blurred copy of the original.

use crate::error::Error;
use crate::tools::color::Rgb;
use folio_functions::Cutout;

/// What goes behind the cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundTreatment {
    Transparent,
    Solid(Rgb),
    /// Box blur of the original with the given radius in pixels.
    Blur(u32),
}

/// Composite `cutout` over the treated background.
///
/// `original` supplies the pixels for the blur treatment and must share the
/// cutout's dimensions.
pub fn composite(
    cutout: &Cutout,
    original: &Cutout,
    treatment: BackgroundTreatment,
) -> Result<Cutout, Error> {
    if cutout.width != original.width || cutout.height != original.height {
        return Err(Error::tool(format!(
            "cutout is {}x{} but original is {}x{}",
            cutout.width, cutout.height, original.width, original.height
        )));
    }

    let background = match treatment {
        BackgroundTreatment::Transparent => {
            return Ok(Cutout {
                width: cutout.width,
                height: cutout.height,
                rgba: cutout.rgba.clone(),
            })
        }
        BackgroundTreatment::Solid(color) => {
            let mut rgba = Vec::with_capacity(cutout.rgba.len());
            for _ in 0..(cutout.width as usize * cutout.height as usize) {
                rgba.extend_from_slice(&[color.r, color.g, color.b, 255]);
            }
            Cutout {
                width: cutout.width,
                height: cutout.height,
                rgba,
            }
        }
        BackgroundTreatment::Blur(radius) => box_blur(original, radius),
    };

    Ok(blend_over(cutout, &background))
}

/// Alpha-blend `fg` over an opaque `bg` of the same dimensions.
fn blend_over(fg: &Cutout, bg: &Cutout) -> Cutout {
    let mut rgba = Vec::with_capacity(bg.rgba.len());

    for (fg_px, bg_px) in fg.rgba.chunks_exact(4).zip(bg.rgba.chunks_exact(4)) {
        let alpha = fg_px[3] as u32;
        let inv = 255 - alpha;
        for channel in 0..3 {
            let value = (fg_px[channel] as u32 * alpha + bg_px[channel] as u32 * inv + 127) / 255;
            rgba.push(value as u8);
        }
        rgba.push(255);
    }

    Cutout {
        width: bg.width,
        height: bg.height,
        rgba,
    }
}

/// Separable box blur over the RGB channels; alpha is forced opaque.
fn box_blur(image: &Cutout, radius: u32) -> Cutout {
    if radius == 0 {
        let mut rgba = image.rgba.clone();
        for px in rgba.chunks_exact_mut(4) {
            px[3] = 255;
        }
        return Cutout {
            width: image.width,
            height: image.height,
            rgba,
        };
    }

    let width = image.width as i64;
    let height = image.height as i64;
    let r = radius as i64;

    let sample = |data: &[u8], x: i64, y: i64, channel: usize| -> u32 {
        let x = x.clamp(0, width - 1);
        let y = y.clamp(0, height - 1);
        data[(y * width + x) as usize * 4 + channel] as u32
    };

    // Horizontal pass.
    let mut horizontal = vec![0u8; image.rgba.len()];
    for y in 0..height {
        for x in 0..width {
            for channel in 0..3 {
                let mut sum = 0u32;
                for dx in -r..=r {
                    sum += sample(&image.rgba, x + dx, y, channel);
                }
                horizontal[(y * width + x) as usize * 4 + channel] =
                    (sum / (2 * radius + 1)) as u8;
            }
            horizontal[(y * width + x) as usize * 4 + 3] = 255;
        }
    }

    // Vertical pass.
    let mut rgba = vec![0u8; image.rgba.len()];
    for y in 0..height {
        for x in 0..width {
            for channel in 0..3 {
                let mut sum = 0u32;
                for dy in -r..=r {
                    sum += sample(&horizontal, x, y + dy, channel);
                }
                rgba[(y * width + x) as usize * 4 + channel] = (sum / (2 * radius + 1)) as u8;
            }
            rgba[(y * width + x) as usize * 4 + 3] = 255;
        }
    }

    Cutout {
        width: image.width,
        height: image.height,
        rgba,
    }
}
