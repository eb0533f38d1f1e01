use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CaptchaError, CaptchaResult};

/// A rendered CAPTCHA frame as straight-alpha RGBA8 pixels.
///
/// Each generation call allocates its own frame; stages mutate it in place and then hand it to
/// the caller or to a [`FrameSink`](crate::FrameSink).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Frame of `canvas` size with every pixel set to `color`.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let mut data = vec![0u8; canvas.pixel_count() * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Wrap an existing buffer, checking its length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> CaptchaResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CaptchaError::render("frame buffer size overflow"))?;
        if data.len() != expected {
            return Err(CaptchaError::render(format!(
                "frame buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame geometry.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + 4];
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Packed RGB8 bytes with alpha dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> CaptchaResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| CaptchaError::render("frame buffer does not match its dimensions"))
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        (i + 4 <= self.data.len()).then_some(i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
