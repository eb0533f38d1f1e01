use std::io::Cursor;
use std::path::Path;

use crate::foundation::error::{CaptchaError, CaptchaResult};
use crate::render::backend::FrameRGBA;

/// Encode one frame as an RGBA PNG.
pub fn encode_png(frame: &FrameRGBA) -> CaptchaResult<Vec<u8>> {
    let img = frame.to_rgba_image()?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| CaptchaError::encoding(None, format!("png: {e}")))?;
    Ok(out.into_inner())
}

/// [`encode_png`] to a file, creating parent directories.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> CaptchaResult<()> {
    let bytes = encode_png(frame)?;
    crate::encode::write_output(path, &bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
