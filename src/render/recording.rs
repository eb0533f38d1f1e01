use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::CaptchaResult;
use crate::render::backend::FrameRGBA;
use crate::render::canvas::CaptchaCanvas;

/// One call made against a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Glyph {
        ch: char,
        origin: Point,
        theta: f64,
        color: Rgba8,
    },
    Stroke {
        path: BezPath,
        color: Rgba8,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
///
/// `finish` produces an opaque-black frame with one pixel marked per glyph origin and per
/// stroke endpoint, so frame contents still depend on everything that was drawn.
/// Public for tests and debugging.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    canvas: Canvas,
    line_height: f32,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(canvas: Canvas, line_height: f32) -> Self {
        Self {
            canvas,
            line_height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (char, Point, f64, Rgba8)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Glyph {
                ch,
                origin,
                theta,
                color,
            } => Some((*ch, *origin, *theta, *color)),
            DrawCall::Stroke { .. } => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, Rgba8)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Stroke { path, color } => Some((path, *color)),
            DrawCall::Glyph { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl CaptchaCanvas for RecordingCanvas {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn line_height(&mut self) -> f32 {
        self.line_height
    }

    fn draw_glyph(
        &mut self,
        glyph: char,
        origin: Point,
        theta: f64,
        color: Rgba8,
    ) -> CaptchaResult<()> {
        self.calls.push(DrawCall::Glyph {
            ch: glyph,
            origin,
            theta,
            color,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8) -> CaptchaResult<()> {
        self.calls.push(DrawCall::Stroke {
            path: path.clone(),
            color,
        });
        Ok(())
    }

    fn finish(&mut self) -> CaptchaResult<FrameRGBA> {
        self.canvas.validate()?;
        let mut frame = FrameRGBA::filled(self.canvas, Rgba8::BLACK);
        let mut mark = |p: Point, color: Rgba8| {
            if p.x >= 0.0 && p.y >= 0.0 {
                frame.set_pixel(p.x as u32, p.y as u32, color);
            }
        };
        for call in &self.calls {
            match call {
                DrawCall::Glyph { origin, color, .. } => mark(*origin, *color),
                DrawCall::Stroke { path, color } => {
                    if let Some(start) = path.elements().first().and_then(|el| el.end_point()) {
                        mark(start, *color);
                    }
                    if let Some(end) = path.elements().last().and_then(|el| el.end_point()) {
                        mark(end, *color);
                    }
                }
            }
        }
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
