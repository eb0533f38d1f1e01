use std::sync::Arc;

use crate::foundation::random::RandomSource;

/// Length of generated text when none is configured.
pub const DEFAULT_TEXT_LENGTH: usize = 6;

/// Produces CAPTCHA text of a requested length.
///
/// The returned string may differ in length from the request; callers treat its character
/// count as authoritative.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, len: usize, rng: &mut dyn RandomSource) -> String;
}

impl<F> TextGenerator for F
where
    F: Fn(usize, &mut dyn RandomSource) -> String + Send + Sync,
{
    fn generate(&self, len: usize, rng: &mut dyn RandomSource) -> String {
        self(len, rng)
    }
}

/// `[0-9A-Za-z]` text, one uniform draw per character.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphanumericText;

impl TextGenerator for AlphanumericText {
    fn generate(&self, len: usize, rng: &mut dyn RandomSource) -> String {
        rng.alphanumeric_string(len)
    }
}

/// Where each frame's text comes from.
#[derive(Clone)]
pub enum TextSource {
    /// Same text on every frame.
    Fixed(String),
    /// Fresh text per frame.
    Generated {
        length: usize,
        generator: Arc<dyn TextGenerator>,
    },
}

impl TextSource {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::Fixed(text.into())
    }

    /// Alphanumeric text of `length` characters.
    pub fn generated(length: usize) -> Self {
        Self::with_generator(length, AlphanumericText)
    }

    pub fn with_generator(length: usize, generator: impl TextGenerator + 'static) -> Self {
        Self::Generated {
            length,
            generator: Arc::new(generator),
        }
    }

    /// Character count of fixed text, or the requested length of generated text.
    pub fn length(&self) -> usize {
        match self {
            Self::Fixed(text) => text.chars().count(),
            Self::Generated { length, .. } => *length,
        }
    }

    /// Text for one frame.
    pub fn resolve(&self, rng: &mut dyn RandomSource) -> String {
        match self {
            Self::Fixed(text) => text.clone(),
            Self::Generated { length, generator } => generator.generate(*length, rng),
        }
    }
}

impl Default for TextSource {
    fn default() -> Self {
        Self::generated(DEFAULT_TEXT_LENGTH)
    }
}

impl std::fmt::Debug for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            Self::Generated { length, .. } => f
                .debug_struct("Generated")
                .field("length", length)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captcha/text.rs"]
mod tests;
