//! JSON configuration files.
//!
//! ```json
//! {
//!   "canvas": { "width": 300, "height": 100 },
//!   "font": { "family": "DejaVu Sans", "style": "bold", "size_px": 30 },
//!   "text": { "length": 6, "color": "#8b6767ba", "half_rotation": 60 },
//!   "gaussian_noise": { "enabled": true, "mean": 0, "sigma": 30 },
//!   "stroke_noise": { "enabled": true, "count": 20, "color": [241, 167, 167, 87] },
//!   "animation": { "frames": 10, "delay_ms": 300, "loop": true },
//!   "seed": 7
//! }
//! ```
//!
//! Only `canvas` is required.

use std::path::{Path, PathBuf};

use crate::assets::color::ColorDef;
use crate::assets::font::{DEFAULT_FONT_SIZE_PX, FontSpec, FontStyle};
use crate::captcha::spec::{CaptchaSpec, DEFAULT_HALF_ROTATION, GaussianNoise, StrokeNoise};
use crate::captcha::text::DEFAULT_TEXT_LENGTH;
use crate::encode::gif::AnimationSpec;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CaptchaError, CaptchaResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptchaConfig {
    pub canvas: Canvas,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub gaussian_noise: GaussianNoise,
    #[serde(default)]
    pub stroke_noise: StrokeNoiseConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Fixed RNG seed for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Font selection. `path` wins over `family`; with neither, the first system font is used.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub path: Option<PathBuf>,
    pub family: Option<String>,
    pub style: FontStyle,
    pub size_px: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            family: None,
            style: FontStyle::Plain,
            size_px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Same text on every frame; `length` is ignored when set.
    pub fixed: Option<String>,
    pub length: usize,
    pub color: ColorDef,
    pub half_rotation: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            fixed: None,
            length: DEFAULT_TEXT_LENGTH,
            color: ColorDef(Rgba8::DEFAULT_TEXT),
            half_rotation: DEFAULT_HALF_ROTATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeNoiseConfig {
    pub enabled: bool,
    pub count: u32,
    pub color: ColorDef,
}

impl Default for StrokeNoiseConfig {
    fn default() -> Self {
        let d = StrokeNoise::default();
        Self {
            enabled: d.enabled,
            count: d.count,
            color: ColorDef(d.color),
        }
    }
}

impl From<&StrokeNoiseConfig> for StrokeNoise {
    fn from(c: &StrokeNoiseConfig) -> Self {
        Self {
            enabled: c.enabled,
            count: c.count,
            color: c.color.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Frames after the first one.
    pub frames: u32,
    pub delay_ms: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: AnimationSpec::DEFAULT_EXTRA_FRAMES,
            delay_ms: AnimationSpec::DEFAULT_DELAY_MS,
            looped: true,
        }
    }
}

impl CaptchaConfig {
    /// Config with defaults for everything but the canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            font: FontConfig::default(),
            text: TextConfig::default(),
            gaussian_noise: GaussianNoise::default(),
            stroke_noise: StrokeNoiseConfig::default(),
            animation: AnimationConfig::default(),
            seed: None,
        }
    }

    pub fn from_json_str(s: &str) -> CaptchaResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CaptchaError::serde(format!("parse captcha config JSON: {e}")))
    }

    /// Parse a config file. A relative `font.path` is resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> CaptchaResult<Self> {
        use anyhow::Context as _;

        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("open captcha config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&s)?;
        if let Some(font_path) = cfg.font.path.as_mut().filter(|p| p.is_relative()) {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            *font_path = base.join(&*font_path);
        }
        Ok(cfg)
    }

    /// Load the configured font bytes.
    pub fn load_font(&self) -> CaptchaResult<FontSpec> {
        let spec = match &self.font.path {
            Some(path) => FontSpec::from_path(path)?,
            None => FontSpec::discover(self.font.family.as_deref())?,
        };
        let spec = match &self.font.family {
            Some(family) => spec.family(family.clone()),
            None => spec,
        };
        Ok(spec.style(self.font.style).size_px(self.font.size_px))
    }

    /// Validated [`CaptchaSpec`] drawing with `font`.
    pub fn captcha_spec(&self, font: FontSpec) -> CaptchaResult<CaptchaSpec> {
        let mut builder = CaptchaSpec::builder(self.canvas.width, self.canvas.height, font)
            .text_color(self.text.color.0)
            .half_rotation(self.text.half_rotation)
            .text_length(self.text.length)
            .gaussian_noise(self.gaussian_noise)
            .stroke_noise(StrokeNoise::from(&self.stroke_noise));
        if let Some(fixed) = &self.text.fixed {
            builder = builder.fixed_text(fixed.clone());
        }
        builder.build()
    }

    pub fn animation(&self) -> AnimationSpec {
        AnimationSpec::new(
            self.animation.frames,
            self.animation.delay_ms,
            self.animation.looped,
        )
    }

    /// Load the font and build both specs.
    pub fn into_specs(self) -> CaptchaResult<(CaptchaSpec, AnimationSpec)> {
        let font = self.load_font()?;
        Ok((self.captcha_spec(font)?, self.animation()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
