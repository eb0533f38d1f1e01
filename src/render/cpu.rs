use crate::assets::font::GlyphShaper;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::CaptchaResult;
use crate::render::backend::FrameRGBA;
use crate::render::canvas::CaptchaCanvas;

/// Default pen width for stroke noise.
pub const STROKE_WIDTH_PX: f64 = 1.0;

/// Anti-aliased CPU canvas powered by `vello_cpu`, shaping glyphs with a shared
/// [`GlyphShaper`].
pub struct CpuCanvas<'a> {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    shaper: &'a mut GlyphShaper,
}

impl<'a> CpuCanvas<'a> {
    /// Fresh opaque-black canvas.
    pub fn new(canvas: Canvas, shaper: &'a mut GlyphShaper) -> CaptchaResult<Self> {
        canvas.validate()?;
        let (width, height) = canvas.as_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(Rgba8::BLACK.to_cpu_color());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
        Ok(Self {
            canvas,
            width,
            height,
            ctx,
            shaper,
        })
    }
}

impl CaptchaCanvas for CpuCanvas<'_> {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn line_height(&mut self) -> f32 {
        self.shaper.line_height()
    }

    fn draw_glyph(
        &mut self,
        glyph: char,
        origin: Point,
        theta: f64,
        color: Rgba8,
    ) -> CaptchaResult<()> {
        let mut buf = [0u8; 4];
        let text = glyph.encode_utf8(&mut buf);
        let layout = self.shaper.layout(text, color);
        let rotation = Affine::rotate_about(theta, origin);

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Layout space puts the baseline at `run.baseline()`; move it onto `origin`.
                let placement = rotation
                    * Affine::translate(Vec2::new(
                        origin.x,
                        origin.y - f64::from(run.baseline()),
                    ));
                self.ctx.set_transform(affine_to_cpu(placement));

                let brush = run.style().brush;
                self.ctx.set_paint(brush.to_cpu_color());
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(self.shaper.font_data())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8) -> CaptchaResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(STROKE_WIDTH_PX));
        self.ctx.set_paint(color.to_cpu_color());
        self.ctx.stroke_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn finish(&mut self) -> CaptchaResult<FrameRGBA> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        FrameRGBA::from_rgba8(self.canvas.width, self.canvas.height, data)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let p = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p0) => out.move_to(p(p0)),
            PathEl::LineTo(p1) => out.line_to(p(p1)),
            PathEl::QuadTo(p1, p2) => out.quad_to(p(p1), p(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(p(p1), p(p2), p(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Premultiplied RGBA8 back to straight alpha. Fully transparent pixels become zero.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        match a {
            255 => {}
            0 => px[..3].fill(0),
            _ => {
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
