//! Raster targets for CAPTCHA frames.

/// Finished frame buffers.
pub mod backend;
/// Drawing surface contract used by the effect stages.
pub mod canvas;
/// `vello_cpu` canvas.
pub mod cpu;
/// Draw-call recording canvas.
pub mod recording;
