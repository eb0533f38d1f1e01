use crate::encode::gif::AnimationSpec;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::CaptchaResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub animation: AnimationSpec,
}

/// Sink contract for consuming frames in display order.
///
/// Lifecycle: `begin` once, `push_frame` with strictly increasing `FrameIndex`, then `end`
/// once. After any failure the caller invokes `abort` instead of `end`; output produced so
/// far must then be treated as unusable.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> CaptchaResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CaptchaResult<()>;
    fn end(&mut self) -> CaptchaResult<()>;
    /// Release resources after a failed sequence.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in display order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
    aborted: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// `end` was reached.
    pub fn is_complete(&self) -> bool {
        self.ended
    }

    pub fn was_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CaptchaResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CaptchaResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CaptchaResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}
