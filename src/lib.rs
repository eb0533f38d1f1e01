//! Procedural CAPTCHA frames and animated CAPTCHA sequences.
//!
//! A [`CaptchaSpec`] describes one CAPTCHA style. A [`CaptchaEngine`] renders independent
//! frames from it: jittered and rotated glyphs, random Bezier strokes, then optional
//! grayscale Gaussian noise. [`encode_captcha_gif`] strings frames into a looping GIF.
//!
//! Randomness is always passed in explicitly as a [`RandomSource`], so seeded runs replay
//! exactly.
#![forbid(unsafe_code)]

mod assets;
pub mod captcha;
pub mod config;
pub mod effects;
pub mod encode;
mod foundation;
pub mod render;

pub use assets::color::ColorDef;
pub use assets::font::{DEFAULT_FONT_SIZE_PX, FontSpec, FontStyle, GlyphShaper};
pub use captcha::engine::{
    CaptchaEngine, RenderedCaptcha, produce_frame_with, render_captcha, resolve_text,
};
pub use captcha::spec::{CaptchaSpec, CaptchaSpecBuilder, GaussianNoise, StrokeNoise};
pub use captcha::text::{AlphanumericText, TextGenerator, TextSource};
pub use config::CaptchaConfig;
pub use encode::gif::{
    AnimationSpec, GifSink, encode_captcha_gif, encode_gif, encode_sequence, write_captcha_gif,
};
pub use encode::png::{encode_png, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{CaptchaError, CaptchaResult};
pub use foundation::random::{RandomSource, SeededRandom};
pub use render::backend::FrameRGBA;
pub use render::canvas::CaptchaCanvas;
pub use render::cpu::CpuCanvas;
pub use render::recording::{DrawCall, RecordingCanvas};
