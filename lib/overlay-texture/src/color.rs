//! Overlay colors and the ordered name -> color table driving generation.

use crate::{OverlayError, OverlayResult};
use image::Rgba;
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Accepts `r,g,b` with decimal channels or `#rrggbb`
impl FromStr for Rgb {
    type Err = OverlayError;

    fn from_str(s: &str) -> OverlayResult<Self> {
        let s = s.trim();
        let invalid = || OverlayError::InvalidParameter(format!("invalid color `{s}`"));

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }

            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let channels = s
            .split(',')
            .map(str::trim)
            .map(|c| {
                if c.is_empty() || !c.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }

                c.parse::<u8>().map_err(|_| invalid())
            })
            .collect::<OverlayResult<Vec<_>>>()?;

        match channels[..] {
            [r, g, b] => Ok(Self::new(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub name: String,
    pub color: Rgb,
}

impl ColorEntry {
    pub fn new(name: impl Into<String>, color: impl Into<Rgb>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Parses `name=r,g,b` or `name=#rrggbb`
impl FromStr for ColorEntry {
    type Err = OverlayError;

    fn from_str(s: &str) -> OverlayResult<Self> {
        let (name, color) = s.split_once('=').ok_or_else(|| {
            OverlayError::InvalidParameter(format!("expected `name=color`, got `{s}`"))
        })?;

        Ok(Self::new(name.trim(), color.parse::<Rgb>()?))
    }
}

/// Ordered, immutable set of overlay colors. Iteration order is the
/// generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ColorEntry::new("radiation_green", (0, 255, 0)),
                ColorEntry::new("radiation_violet", (128, 0, 255)),
                ColorEntry::new("radiation_red", (255, 0, 0)),
            ],
        }
    }
}

impl ColorTable {
    pub fn new(entries: Vec<ColorEntry>) -> OverlayResult<Self> {
        let mut names = HashSet::new();
        for entry in &entries {
            validate_name(&entry.name)?;

            if !names.insert(entry.name.as_str()) {
                return Err(OverlayError::InvalidParameter(format!(
                    "duplicate color name `{}`",
                    entry.name
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.color)
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Names become file stems, so they must stay inside the output directory
pub fn validate_name(name: &str) -> OverlayResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);

    if bad {
        return Err(OverlayError::InvalidParameter(format!(
            "invalid overlay name `{name}`"
        )));
    }

    Ok(())
}
