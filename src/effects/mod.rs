//! Pipeline stages that paint or filter one CAPTCHA frame.
//!
//! Text and strokes draw onto a [`crate::CaptchaCanvas`]; the Gaussian filter runs on the
//! finished [`crate::FrameRGBA`].

/// Per-pixel grayscale + Gaussian noise filter.
pub mod gaussian;
/// Random cubic Bezier stroke noise.
pub mod strokes;
/// Jittered, rotated glyph placement.
pub mod text;
