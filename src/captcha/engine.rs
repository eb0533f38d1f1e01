use crate::assets::font::GlyphShaper;
use crate::captcha::spec::CaptchaSpec;
use crate::effects::{gaussian, strokes, text};
use crate::foundation::error::{CaptchaError, CaptchaResult};
use crate::foundation::random::RandomSource;
use crate::render::backend::FrameRGBA;
use crate::render::canvas::CaptchaCanvas;
use crate::render::cpu::CpuCanvas;

/// One finished CAPTCHA frame and the text drawn on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCaptcha {
    pub frame: FrameRGBA,
    pub text: String,
}

/// Text for the next frame: the fixed text, or a fresh string from the generator.
///
/// The generator's output is used as returned, whatever its length.
pub fn resolve_text(spec: &CaptchaSpec, rng: &mut dyn RandomSource) -> String {
    spec.text.resolve(rng)
}

/// Run the frame pipeline over a fresh `canvas`: text, then stroke noise, then rasterize,
/// then Gaussian noise over the finished pixels.
#[tracing::instrument(skip_all, fields(chars = text.chars().count()))]
pub fn render_captcha(
    canvas: &mut dyn CaptchaCanvas,
    spec: &CaptchaSpec,
    text: &str,
    rng: &mut dyn RandomSource,
) -> CaptchaResult<FrameRGBA> {
    if canvas.canvas() != spec.canvas {
        return Err(CaptchaError::render(format!(
            "canvas is {}x{}, configuration expects {}x{}",
            canvas.canvas().width,
            canvas.canvas().height,
            spec.canvas.width,
            spec.canvas.height
        )));
    }

    text::render_text(canvas, text, spec.text_color, spec.half_rotation, rng)?;
    if spec.stroke_noise.enabled {
        strokes::render_stroke_noise(
            canvas,
            spec.stroke_noise.count,
            spec.stroke_noise.color,
            rng,
        )?;
    }

    let mut frame = canvas.finish()?;
    if spec.gaussian_noise.enabled {
        gaussian::apply_gaussian_noise(
            &mut frame,
            spec.gaussian_noise.mean,
            spec.gaussian_noise.sigma,
            rng,
        );
    }
    Ok(frame)
}

/// Resolve the text and render one frame onto `canvas`.
pub fn produce_frame_with(
    canvas: &mut dyn CaptchaCanvas,
    spec: &CaptchaSpec,
    rng: &mut dyn RandomSource,
) -> CaptchaResult<RenderedCaptcha> {
    let text = resolve_text(spec, rng);
    let frame = render_captcha(canvas, spec, &text, rng)?;
    Ok(RenderedCaptcha { frame, text })
}

/// Renders CAPTCHA frames for one validated [`CaptchaSpec`].
///
/// The configuration is never modified; every call allocates its own canvas and resolves its
/// own text.
pub struct CaptchaEngine {
    spec: CaptchaSpec,
    shaper: GlyphShaper,
}

impl CaptchaEngine {
    pub fn new(spec: CaptchaSpec) -> CaptchaResult<Self> {
        spec.validate()?;
        let shaper = GlyphShaper::new(&spec.font)?;
        Ok(Self { spec, shaper })
    }

    pub fn spec(&self) -> &CaptchaSpec {
        &self.spec
    }

    /// Render one independent frame.
    #[tracing::instrument(skip(self, rng), fields(width = self.spec.canvas.width, height = self.spec.canvas.height))]
    pub fn produce_frame(&mut self, rng: &mut dyn RandomSource) -> CaptchaResult<RenderedCaptcha> {
        let mut canvas = CpuCanvas::new(self.spec.canvas, &mut self.shaper)?;
        let rendered = produce_frame_with(&mut canvas, &self.spec, rng)?;
        tracing::debug!(chars = rendered.text.chars().count(), "produced captcha frame");
        Ok(rendered)
    }
}

impl std::fmt::Debug for CaptchaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptchaEngine")
            .field("spec", &self.spec)
            .field("family", &self.shaper.family_name())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captcha/engine.rs"]
mod tests;
