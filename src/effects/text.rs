use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::CaptchaResult;
use crate::foundation::random::RandomSource;
use crate::render::canvas::CaptchaCanvas;

/// Horizontal jitter range `[min_x, max_x)` for glyph `index` in cells of width `segment`.
///
/// Each glyph keeps a `segment / 4` margin from both edges of its cell.
pub fn glyph_cell(index: usize, segment: f32) -> (f32, f32) {
    let i = index as f32;
    let min_x = i * segment + segment / 4.0;
    let max_x = (i + 1.0) * segment - segment / 4.0;
    (min_x, max_x)
}

/// Draw `text` one glyph at a time.
///
/// The canvas width is split into one cell per character. Each glyph lands at a random
/// integer position inside its cell, vertically between one line height from the top and
/// one line height from the bottom, rotated by a whole number of degrees drawn from
/// `[-half_rotation, half_rotation)`. Empty text draws nothing.
pub fn render_text(
    canvas: &mut dyn CaptchaCanvas,
    text: &str,
    color: Rgba8,
    half_rotation: u32,
    rng: &mut dyn RandomSource,
) -> CaptchaResult<()> {
    let len = text.chars().count();
    if len == 0 {
        return Ok(());
    }

    let size = canvas.canvas();
    let segment = size.width as f32 / len as f32;
    let line_height = canvas.line_height();
    let (min_y, max_y) = (line_height, size.height as f32 - line_height);
    let r = i32::try_from(half_rotation).unwrap_or(i32::MAX);

    for (index, ch) in text.chars().enumerate() {
        let (min_x, max_x) = glyph_cell(index, segment);
        let x = rng.uniform_float(min_x, max_x) as i32;
        let y = rng.uniform_float(min_y, max_y) as i32;
        let degrees = rng.uniform_int(-r, r);
        let theta = f64::from(degrees).to_radians();

        tracing::trace!(index, %ch, x, y, degrees, "glyph");
        canvas.draw_glyph(ch, Point::new(f64::from(x), f64::from(y)), theta, color)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text.rs"]
mod tests;
