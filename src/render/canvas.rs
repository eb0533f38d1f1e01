use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::CaptchaResult;
use crate::render::backend::FrameRGBA;

/// Drawing surface the text and stroke stages paint onto.
///
/// A canvas starts as opaque black. [`CaptchaCanvas::finish`] is called once, after all
/// drawing, and yields the frame the pixel filters operate on.
pub trait CaptchaCanvas {
    /// Canvas geometry.
    fn canvas(&self) -> Canvas;

    /// Line height of the active font in pixels.
    fn line_height(&mut self) -> f32;

    /// Draw exactly one glyph with its baseline origin at `origin`, rotated by `theta`
    /// radians about that origin. The rotation applies to this glyph only.
    fn draw_glyph(
        &mut self,
        glyph: char,
        origin: Point,
        theta: f64,
        color: Rgba8,
    ) -> CaptchaResult<()>;

    /// Stroke `path` with a 1px pen.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba8) -> CaptchaResult<()>;

    /// Rasterize everything drawn so far.
    fn finish(&mut self) -> CaptchaResult<FrameRGBA>;
}
