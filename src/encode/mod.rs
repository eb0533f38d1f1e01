//! Frame sinks and file output.

use std::path::Path;

use crate::foundation::error::CaptchaResult;

/// Animated GIF sequences.
pub mod gif;
/// Still PNG frames.
pub mod png;
/// Frame consumer contract.
pub mod sink;

/// Create `path`'s parent directory if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> CaptchaResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write a fully encoded byte stream to `path`.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> CaptchaResult<()> {
    use anyhow::Context as _;
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write output file '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output file");
    Ok(())
}
