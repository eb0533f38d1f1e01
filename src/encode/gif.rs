use std::io::Write;
use std::path::Path;

use crate::captcha::engine::{CaptchaEngine, RenderedCaptcha};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{CaptchaError, CaptchaResult};
use crate::foundation::random::RandomSource;
use crate::render::backend::FrameRGBA;

/// NeuQuant sampling factor for per-frame palettes (1 = best, 30 = fastest).
pub const QUANTIZE_SPEED: i32 = 10;

/// Timing and loop control for an animated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    /// Frames emitted after the first one.
    pub extra_frames: u32,
    /// Per-frame delay in milliseconds.
    pub delay_ms: u32,
    /// Repeat forever when set, play once otherwise.
    pub looped: bool,
}

impl AnimationSpec {
    pub const DEFAULT_EXTRA_FRAMES: u32 = 10;
    pub const DEFAULT_DELAY_MS: u32 = 300;

    /// Delays below 1ms clamp to 1ms.
    pub fn new(extra_frames: u32, delay_ms: u32, looped: bool) -> Self {
        Self {
            extra_frames,
            delay_ms: delay_ms.max(1),
            looped,
        }
    }

    /// Total frames in the sequence.
    pub fn frame_count(&self) -> u64 {
        u64::from(self.extra_frames) + 1
    }

    /// Delay in GIF centiseconds, truncated: 250ms is 25, anything under 10ms is 0.
    pub fn delay_centis(&self) -> u16 {
        u16::try_from(self.delay_ms.max(1) / 10).unwrap_or(u16::MAX)
    }

    /// Loop control: count 0 (forever) or 1 (play once).
    pub fn repeat(&self) -> ::gif::Repeat {
        if self.looped {
            ::gif::Repeat::Infinite
        } else {
            ::gif::Repeat::Finite(1)
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXTRA_FRAMES, Self::DEFAULT_DELAY_MS, true)
    }
}

/// Writer handed to the encoder. Once poisoned every write fails, so the trailer the
/// encoder emits on drop never reaches an aborted stream.
struct AbortGuard<W: Write> {
    inner: W,
    poisoned: bool,
}

impl<W: Write> Write for AbortGuard<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.poisoned {
            return Err(std::io::Error::other("gif stream aborted"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.poisoned {
            return Ok(());
        }
        self.inner.flush()
    }
}

enum GifState<W: Write> {
    Idle(W),
    Encoding {
        encoder: ::gif::Encoder<AbortGuard<W>>,
        cfg: SinkConfig,
        next: u64,
    },
    Finished(W),
    Closed,
}

/// [`FrameSink`] producing an animated GIF.
///
/// The stream has no global palette; `begin` writes the header and the NETSCAPE2.0 loop
/// block, each frame gets a graphic control extension (no disposal, no user input, no
/// transparency, configured delay) and its own quantized palette, and `end` writes the
/// trailer.
pub struct GifSink<W: Write> {
    state: GifState<W>,
}

impl<W: Write> GifSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: GifState::Idle(writer),
        }
    }

    /// The underlying writer, available once the stream has been ended.
    pub fn into_inner(self) -> CaptchaResult<W> {
        match self.state {
            GifState::Finished(w) => Ok(w),
            _ => Err(CaptchaError::encoding(None, "gif stream is not finished")),
        }
    }
}

fn gif_error(frame: Option<u64>, err: impl std::fmt::Display) -> CaptchaError {
    CaptchaError::encoding(frame, format!("gif: {err}"))
}

impl<W: Write> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> CaptchaResult<()> {
        let writer = match std::mem::replace(&mut self.state, GifState::Closed) {
            GifState::Idle(writer) => writer,
            other => {
                self.state = other;
                return Err(CaptchaError::encoding(None, "gif sink already started"));
            }
        };
        let canvas = Canvas {
            width: cfg.width,
            height: cfg.height,
        };
        let (w, h) = canvas.as_u16()?;

        let guarded = AbortGuard {
            inner: writer,
            poisoned: false,
        };
        let mut encoder = ::gif::Encoder::new(guarded, w, h, &[]).map_err(|e| gif_error(None, e))?;
        encoder
            .set_repeat(cfg.animation.repeat())
            .map_err(|e| gif_error(None, e))?;
        tracing::debug!(
            width = w,
            height = h,
            delay_cs = cfg.animation.delay_centis(),
            looped = cfg.animation.looped,
            "gif sink begin"
        );

        self.state = GifState::Encoding {
            encoder,
            cfg,
            next: 0,
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CaptchaResult<()> {
        let GifState::Encoding { encoder, cfg, next } = &mut self.state else {
            return Err(CaptchaError::encoding(Some(idx.0), "gif sink is not encoding"));
        };
        if idx.0 < *next {
            return Err(CaptchaError::encoding(
                Some(idx.0),
                format!("frame pushed out of order, expected index >= {next}"),
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(CaptchaError::encoding(
                Some(idx.0),
                format!(
                    "frame is {}x{}, sink expects {}x{}",
                    frame.width, frame.height, cfg.width, cfg.height
                ),
            ));
        }
        let expected = frame.canvas().pixel_count() * 4;
        if frame.data.len() != expected {
            return Err(CaptchaError::encoding(
                Some(idx.0),
                format!("frame has {} bytes, expected {expected}", frame.data.len()),
            ));
        }

        let (w, h) = frame.canvas().as_u16()?;
        let rgb = frame.to_rgb8();
        let mut gif_frame = ::gif::Frame::from_rgb_speed(w, h, &rgb, QUANTIZE_SPEED);
        gif_frame.delay = cfg.animation.delay_centis();
        gif_frame.dispose = ::gif::DisposalMethod::Any;
        gif_frame.needs_user_input = false;
        gif_frame.transparent = None;

        encoder
            .write_frame(&gif_frame)
            .map_err(|e| gif_error(Some(idx.0), e))?;
        *next = idx.0 + 1;
        tracing::debug!(frame = idx.0, "gif frame written");
        Ok(())
    }

    fn end(&mut self) -> CaptchaResult<()> {
        let (encoder, cfg, next) = match std::mem::replace(&mut self.state, GifState::Closed) {
            GifState::Encoding { encoder, cfg, next } => (encoder, cfg, next),
            other => {
                self.state = other;
                return Err(CaptchaError::encoding(None, "gif sink is not encoding"));
            }
        };
        if next == 0 {
            self.state = GifState::Encoding { encoder, cfg, next };
            return Err(CaptchaError::encoding(None, "gif stream has no frames"));
        }
        let guarded = encoder.into_inner().map_err(|e| gif_error(None, e))?;
        self.state = GifState::Finished(guarded.inner);
        tracing::debug!(frames = next, "gif sink end");
        Ok(())
    }

    fn abort(&mut self) {
        if let GifState::Encoding { encoder, .. } = &mut self.state {
            encoder.get_mut().poisoned = true;
        }
        self.state = GifState::Closed;
        tracing::debug!("gif sink aborted");
    }
}

/// Drive `sink` through one sequence of `anim.frame_count()` frames.
///
/// Frame 0 comes first, followed by `anim.extra_frames` more, each produced by a fresh call
/// to `frame_source`. `end` is called on success and `abort` on every failure path.
#[tracing::instrument(skip(frame_source, sink), fields(frames = anim.frame_count()))]
pub fn encode_sequence<F>(
    anim: AnimationSpec,
    canvas: Canvas,
    mut frame_source: F,
    sink: &mut dyn FrameSink,
) -> CaptchaResult<()>
where
    F: FnMut(FrameIndex) -> CaptchaResult<FrameRGBA>,
{
    let result = push_sequence(anim, canvas, &mut frame_source, sink);
    if let Err(err) = &result {
        tracing::warn!(error = %err, "sequence encoding failed");
        sink.abort();
    }
    result
}

fn push_sequence(
    anim: AnimationSpec,
    canvas: Canvas,
    frame_source: &mut dyn FnMut(FrameIndex) -> CaptchaResult<FrameRGBA>,
    sink: &mut dyn FrameSink,
) -> CaptchaResult<()> {
    canvas.validate()?;
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        animation: anim,
    })?;
    for i in 0..anim.frame_count() {
        let idx = FrameIndex(i);
        let frame = frame_source(idx)?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()
}

/// Encode a full GIF stream in memory.
pub fn encode_gif<F>(anim: AnimationSpec, canvas: Canvas, frame_source: F) -> CaptchaResult<Vec<u8>>
where
    F: FnMut(FrameIndex) -> CaptchaResult<FrameRGBA>,
{
    let mut sink = GifSink::new(Vec::new());
    encode_sequence(anim, canvas, frame_source, &mut sink)?;
    sink.into_inner()
}

/// Encode an animation of independently generated CAPTCHA frames.
///
/// Returns the GIF bytes and the text of every frame in display order.
pub fn encode_captcha_gif(
    engine: &mut CaptchaEngine,
    anim: AnimationSpec,
    rng: &mut dyn RandomSource,
) -> CaptchaResult<(Vec<u8>, Vec<String>)> {
    let canvas = engine.spec().canvas;
    encode_rendered_gif(anim, canvas, |_| engine.produce_frame(rng))
}

/// Encode rendered captchas, keeping each frame's text. `texts` grows with the frames
/// actually produced, so a huge `extra_frames` costs nothing until frames exist.
fn encode_rendered_gif<F>(
    anim: AnimationSpec,
    canvas: Canvas,
    mut produce: F,
) -> CaptchaResult<(Vec<u8>, Vec<String>)>
where
    F: FnMut(FrameIndex) -> CaptchaResult<RenderedCaptcha>,
{
    let mut texts = Vec::new();
    let bytes = encode_gif(anim, canvas, |idx| {
        let rendered = produce(idx)?;
        texts.push(rendered.text);
        Ok(rendered.frame)
    })?;
    Ok((bytes, texts))
}

/// [`encode_captcha_gif`] to a file. Nothing is written unless encoding succeeds.
pub fn write_captcha_gif(
    engine: &mut CaptchaEngine,
    anim: AnimationSpec,
    rng: &mut dyn RandomSource,
    path: &Path,
) -> CaptchaResult<Vec<String>> {
    let (bytes, texts) = encode_captcha_gif(engine, anim, rng)?;
    crate::encode::write_output(path, &bytes)?;
    Ok(texts)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
