use crate::foundation::random::RandomSource;
use crate::render::backend::FrameRGBA;

/// Gray the frame and add Gaussian noise to every pixel.
///
/// Pixels are visited column by column. For each, `gray = (r + g + b) / 3` (integer
/// division) and `v = round(clamp(gray + gaussian() * sigma + mean, 0, 255))`; the pixel
/// becomes `(v, v, v)` with its alpha left untouched. Color information is discarded.
pub fn apply_gaussian_noise(
    frame: &mut FrameRGBA,
    mean: f64,
    sigma: f64,
    rng: &mut dyn RandomSource,
) {
    let (w, h) = (frame.width as usize, frame.height as usize);
    for x in 0..w {
        for y in 0..h {
            let noise = rng.gaussian() * sigma + mean;
            let i = (y * w + x) * 4;
            let Some(px) = frame.data.get_mut(i..i + 4) else {
                continue;
            };
            let gray = (u32::from(px[0]) + u32::from(px[1]) + u32::from(px[2])) / 3;
            let v = noisy_gray(gray as u8, noise);
            px[0] = v;
            px[1] = v;
            px[2] = v;
        }
    }
}

/// `round(clamp(gray + noise, 0, 255))`. NaN noise leaves the gray value as is.
pub(crate) fn noisy_gray(gray: u8, noise: f64) -> u8 {
    let v = f64::from(gray) + noise;
    if v.is_nan() {
        return gray;
    }
    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gaussian.rs"]
mod tests;
