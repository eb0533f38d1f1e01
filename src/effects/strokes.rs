use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::error::CaptchaResult;
use crate::foundation::random::RandomSource;
use crate::render::canvas::CaptchaCanvas;

/// Stroke `count` random cubic curves across the canvas.
///
/// Every curve samples four fresh points in `[0, W) x [0, H)`: the start point, two
/// control points and the end point. Curves are not clipped or otherwise constrained.
pub fn render_stroke_noise(
    canvas: &mut dyn CaptchaCanvas,
    count: u32,
    color: Rgba8,
    rng: &mut dyn RandomSource,
) -> CaptchaResult<()> {
    let size = canvas.canvas();
    let w = i32::try_from(size.width).unwrap_or(i32::MAX);
    let h = i32::try_from(size.height).unwrap_or(i32::MAX);

    for _ in 0..count {
        let p0 = random_point(rng, w, h);
        let c1 = random_point(rng, w, h);
        let c2 = random_point(rng, w, h);
        let p3 = random_point(rng, w, h);

        let mut path = BezPath::new();
        path.move_to(p0);
        path.curve_to(c1, c2, p3);
        canvas.stroke_path(&path, color)?;
    }
    tracing::trace!(count, "stroke noise");
    Ok(())
}

fn random_point(rng: &mut dyn RandomSource, w: i32, h: i32) -> Point {
    let x = rng.uniform_int(0, w);
    let y = rng.uniform_int(0, h);
    Point::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/strokes.rs"]
mod tests;
