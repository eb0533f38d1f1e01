//! CAPTCHA configuration and the per-frame pipeline.

/// Frame orchestration.
pub mod engine;
/// `CaptchaSpec` and its builder.
pub mod spec;
/// Text sources and generators.
pub mod text;
