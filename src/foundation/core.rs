use crate::foundation::error::{CaptchaError, CaptchaResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// 0-based index of a frame inside an animated sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
///
/// Both dimensions are limited to `u16` because the raster backend and the GIF container
/// address pixels with 16-bit coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> CaptchaResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check `0 < width, height <= u16::MAX`.
    pub fn validate(self) -> CaptchaResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(CaptchaError::config(format!(
                "canvas {}x{} exceeds the {}px limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Width and height as `u16`. Only meaningful on a validated canvas.
    pub(crate) fn as_u16(self) -> CaptchaResult<(u16, u16)> {
        let w = u16::try_from(self.width)
            .map_err(|_| CaptchaError::config("canvas width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| CaptchaError::config("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the background of every fresh canvas.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Default glyph color.
    pub const DEFAULT_TEXT: Self = Self::new(139, 103, 103, 186);

    /// Default stroke-noise color.
    pub const DEFAULT_STROKE: Self = Self::new(241, 167, 167, 87);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
