use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaptchaError, CaptchaResult};

/// Default glyph size in pixels.
pub const DEFAULT_FONT_SIZE_PX: f32 = 30.0;

/// Face style requested for the CAPTCHA glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Upright, regular weight.
    #[default]
    Plain,
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Bold weight and italic slant.
    BoldItalic,
}

impl FontStyle {
    fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Font descriptor: family, style and size plus the raw font bytes they resolve to.
#[derive(Clone)]
pub struct FontSpec {
    /// Preferred family inside the font file. `None` picks the first registered family.
    pub family: Option<String>,
    /// Requested face style.
    pub style: FontStyle,
    /// Glyph size in pixels.
    pub size_px: f32,
    /// TrueType/OpenType bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSpec")
            .field("family", &self.family)
            .field("style", &self.style)
            .field("size_px", &self.size_px)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontSpec {
    /// Font from in-memory bytes at the default size.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            family: None,
            style: FontStyle::Plain,
            size_px: DEFAULT_FONT_SIZE_PX,
            bytes: Arc::new(bytes.into()),
        }
    }

    /// Read a `.ttf`/`.otf`/`.ttc` file.
    pub fn from_path(path: impl AsRef<Path>) -> CaptchaResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Search the usual font directories for a file matching `family`, falling back to the
    /// first font found when nothing matches.
    pub fn discover(family: Option<&str>) -> CaptchaResult<Self> {
        let candidates = discover_font_files(&default_font_dirs());
        let path = pick_font_file(&candidates, family).ok_or_else(|| {
            CaptchaError::font("no font files found in system font directories")
        })?;
        tracing::debug!(path = %path.display(), ?family, "discovered font");
        let mut spec = Self::from_path(path)?;
        spec.family = family.map(str::to_owned);
        Ok(spec)
    }

    /// Set the preferred family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the face style.
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the glyph size in pixels.
    pub fn size_px(mut self, size_px: f32) -> Self {
        self.size_px = size_px;
        self
    }

    /// Check the size is usable. Font bytes are checked when a [`GlyphShaper`] is built.
    pub fn validate(&self) -> CaptchaResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(CaptchaError::config(format!(
                "font size must be finite and > 0, got {}",
                self.size_px
            )));
        }
        Ok(())
    }
}

fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("fonts"), PathBuf::from("assets")];
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".fonts"));
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    dirs.extend(
        [
            "/usr/share/fonts",
            "/usr/local/share/fonts",
            "/Library/Fonts",
            "/System/Library/Fonts",
            "C:\\Windows\\Fonts",
        ]
        .map(PathBuf::from),
    );
    dirs
}

/// Font files below `dirs`, searched recursively, in a stable order.
pub(crate) fn discover_font_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for dir in dirs {
        collect_font_files(dir, 0, &mut out);
    }
    out
}

fn collect_font_files(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    const MAX_DEPTH: usize = 6;
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<PathBuf> = rd.flatten().map(|e| e.path()).collect();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            if depth < MAX_DEPTH {
                collect_font_files(&path, depth + 1, out);
            }
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext == "ttf" || ext == "otf" || ext == "ttc" {
            out.push(path);
        }
    }
}

/// First candidate whose file stem contains `family` (case and separator insensitive), or the
/// first candidate overall.
pub(crate) fn pick_font_file<'a>(candidates: &'a [PathBuf], family: Option<&str>) -> Option<&'a Path> {
    fn squash(s: &str) -> String {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    if let Some(family) = family.map(squash).filter(|f| !f.is_empty()) {
        let hit = candidates.iter().find(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| squash(stem).contains(&family))
        });
        if let Some(hit) = hit {
            return Some(hit.as_path());
        }
    }
    candidates.first().map(PathBuf::as_path)
}

/// Parley-backed shaper for single CAPTCHA glyphs.
///
/// Registers the font bytes once and keeps the Parley contexts alive across frames. Also owns
/// the `vello_cpu` handle to the same bytes so glyph ids line up with the rasterizer.
pub struct GlyphShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
    style: FontStyle,
    size_px: f32,
    line_height: Option<f32>,
    font_data: vello_cpu::peniko::FontData,
}

impl GlyphShaper {
    /// Register `spec`'s bytes and resolve its family.
    pub fn new(spec: &FontSpec) -> CaptchaResult<Self> {
        spec.validate()?;
        if spec.bytes.is_empty() {
            return Err(CaptchaError::font("font bytes are empty"));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(spec.bytes.as_ref().clone()),
            None,
        );
        if families.is_empty() {
            return Err(CaptchaError::font("no font families registered from font bytes"));
        }

        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            let name = font_ctx
                .collection
                .family_name(*id)
                .ok_or_else(|| CaptchaError::font("registered font family has no name"))?;
            names.push(name.to_string());
        }
        let family_name = match spec.family.as_deref() {
            Some(wanted) => names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(wanted))
                .unwrap_or(&names[0])
                .clone(),
            None => names[0].clone(),
        };
        tracing::debug!(family = %family_name, size_px = spec.size_px, "registered captcha font");

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(spec.bytes.as_ref().clone()),
            0,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            style: spec.style,
            size_px: spec.size_px,
            line_height: None,
            font_data,
        })
    }

    /// Resolved family name.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Glyph size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Height of one laid-out line (ascent + descent + leading) for this font and size.
    pub fn line_height(&mut self) -> f32 {
        if let Some(h) = self.line_height {
            return h;
        }
        let h = self.layout("Xg", Rgba8::default()).height();
        self.line_height = Some(h);
        h
    }

    /// Shape `text` on a single unwrapped line.
    pub fn layout(&mut self, text: &str, brush: Rgba8) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if self.style.is_bold() {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if self.style.is_italic() {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
