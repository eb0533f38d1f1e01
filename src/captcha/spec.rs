use std::sync::Arc;

use crate::assets::font::FontSpec;
use crate::captcha::text::{AlphanumericText, DEFAULT_TEXT_LENGTH, TextGenerator, TextSource};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CaptchaError, CaptchaResult};

/// Default symmetric glyph rotation bound in degrees.
pub const DEFAULT_HALF_ROTATION: u32 = 60;
/// Rotation bounds must stay below a half turn.
pub const MAX_HALF_ROTATION_EXCLUSIVE: u32 = 180;

/// Grayscale + Gaussian noise settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaussianNoise {
    pub enabled: bool,
    pub mean: f64,
    pub sigma: f64,
}

impl GaussianNoise {
    pub const DEFAULT_SIGMA: f64 = 30.0;

    /// Enabled noise with the given distribution.
    pub fn new(mean: f64, sigma: f64) -> Self {
        Self {
            enabled: true,
            mean,
            sigma,
        }
    }

    pub fn validate(&self) -> CaptchaResult<()> {
        if !self.mean.is_finite() {
            return Err(CaptchaError::config("gaussian noise mean must be finite"));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(CaptchaError::config(
                "gaussian noise sigma must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self {
            enabled: false,
            mean: 0.0,
            sigma: Self::DEFAULT_SIGMA,
        }
    }
}

/// Random Bezier stroke settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeNoise {
    pub enabled: bool,
    pub count: u32,
    pub color: Rgba8,
}

impl StrokeNoise {
    pub const DEFAULT_COUNT: u32 = 20;

    /// Enabled noise with `count` strokes in the default color.
    pub fn new(count: u32) -> Self {
        Self {
            enabled: true,
            count,
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

impl Default for StrokeNoise {
    fn default() -> Self {
        Self {
            enabled: false,
            count: Self::DEFAULT_COUNT,
            color: Rgba8::DEFAULT_STROKE,
        }
    }
}

/// Immutable CAPTCHA configuration shared by every frame of a session.
#[derive(Clone, Debug)]
pub struct CaptchaSpec {
    pub canvas: Canvas,
    pub font: FontSpec,
    /// Glyph fill color.
    pub text_color: Rgba8,
    /// Glyph rotation is drawn from `[-half_rotation, half_rotation)` whole degrees.
    pub half_rotation: u32,
    pub text: TextSource,
    pub gaussian_noise: GaussianNoise,
    pub stroke_noise: StrokeNoise,
}

impl CaptchaSpec {
    pub fn builder(width: u32, height: u32, font: FontSpec) -> CaptchaSpecBuilder {
        CaptchaSpecBuilder::new(width, height, font)
    }

    /// Character count for fixed text, otherwise the requested generated length.
    pub fn text_length(&self) -> usize {
        self.text.length()
    }

    pub fn validate(&self) -> CaptchaResult<()> {
        self.canvas.validate()?;
        self.font.validate()?;
        if self.half_rotation >= MAX_HALF_ROTATION_EXCLUSIVE {
            return Err(CaptchaError::config(format!(
                "half rotation must be < {MAX_HALF_ROTATION_EXCLUSIVE} degrees, got {}",
                self.half_rotation
            )));
        }
        self.gaussian_noise.validate()?;
        Ok(())
    }
}

pub struct CaptchaSpecBuilder {
    width: u32,
    height: u32,
    font: FontSpec,
    text_color: Rgba8,
    half_rotation: u32,
    fixed_text: Option<String>,
    text_length: usize,
    generator: Arc<dyn TextGenerator>,
    gaussian_noise: GaussianNoise,
    stroke_noise: StrokeNoise,
}

impl CaptchaSpecBuilder {
    pub fn new(width: u32, height: u32, font: FontSpec) -> Self {
        Self {
            width,
            height,
            font,
            text_color: Rgba8::DEFAULT_TEXT,
            half_rotation: DEFAULT_HALF_ROTATION,
            fixed_text: None,
            text_length: DEFAULT_TEXT_LENGTH,
            generator: Arc::new(AlphanumericText),
            gaussian_noise: GaussianNoise::default(),
            stroke_noise: StrokeNoise::default(),
        }
    }

    pub fn text_color(mut self, color: Rgba8) -> Self {
        self.text_color = color;
        self
    }

    pub fn half_rotation(mut self, degrees: u32) -> Self {
        self.half_rotation = degrees;
        self
    }

    /// Render `text` on every frame. Overrides the generated length and generator.
    pub fn fixed_text(mut self, text: impl Into<String>) -> Self {
        self.fixed_text = Some(text.into());
        self
    }

    pub fn text_length(mut self, len: usize) -> Self {
        self.text_length = len;
        self
    }

    pub fn text_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn gaussian_noise(mut self, noise: GaussianNoise) -> Self {
        self.gaussian_noise = noise;
        self
    }

    pub fn stroke_noise(mut self, noise: StrokeNoise) -> Self {
        self.stroke_noise = noise;
        self
    }

    pub fn build(self) -> CaptchaResult<CaptchaSpec> {
        let text = match self.fixed_text {
            Some(text) => TextSource::Fixed(text),
            None => TextSource::Generated {
                length: self.text_length,
                generator: self.generator,
            },
        };
        let spec = CaptchaSpec {
            canvas: Canvas {
                width: self.width,
                height: self.height,
            },
            font: self.font,
            text_color: self.text_color,
            half_rotation: self.half_rotation,
            text,
            gaussian_noise: self.gaussian_noise,
            stroke_noise: self.stroke_noise,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captcha/spec.rs"]
mod tests;
