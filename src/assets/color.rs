use crate::foundation::core::Rgba8;

/// Color as written in configuration files.
///
/// Reads `"#rrggbb"` / `"#rrggbbaa"` hex strings (the `#` is optional), `[r, g, b]` /
/// `[r, g, b, a]` arrays and `{ "r", "g", "b", "a"? }` objects. A missing alpha means opaque.
/// Written back as an 8-digit hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef(pub Rgba8);

impl From<ColorDef> for Rgba8 {
    fn from(c: ColorDef) -> Self {
        c.0
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl serde::Serialize for ColorDef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [r, g, b, a] = self.0.to_array();
        serializer.collect_str(&format_args!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

impl<'de> serde::Deserialize<'de> for ColorDef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Written {
            Hex(String),
            Channels(Vec<u8>),
            Object {
                r: u8,
                g: u8,
                b: u8,
                a: Option<u8>,
            },
        }

        let rgba = match Written::deserialize(deserializer)? {
            Written::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom)?,
            Written::Channels(v) => match *v.as_slice() {
                [r, g, b] => Rgba8::new(r, g, b, 255),
                [r, g, b, a] => Rgba8::new(r, g, b, a),
                _ => {
                    return Err(serde::de::Error::invalid_length(
                        v.len(),
                        &"3 or 4 color channels",
                    ));
                }
            },
            Written::Object { r, g, b, a } => Rgba8::new(r, g, b, a.unwrap_or(255)),
        };
        Ok(Self(rgba))
    }
}

/// Parse `rrggbb` or `rrggbbaa` hex digits, with an optional leading `#`.
pub(crate) fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let digits = s.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected #rrggbb or #rrggbbaa, got {s:?}"));
    }
    let mut channels = [255u8; 4];
    for (slot, i) in channels.iter_mut().zip((0..digits.len()).step_by(2)) {
        *slot = u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| e.to_string())?;
    }
    let [r, g, b, a] = channels;
    Ok(Rgba8::new(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
