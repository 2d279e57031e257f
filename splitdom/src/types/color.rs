use std::str::FromStr;

use palette::{IntoColor, Oklch, Srgb};

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{value}'")]
pub struct ColorError {
    pub value: String,
}

impl ColorError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color usable in a style declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    Oklch { l: f32, c: f32, h: f32 },
    Transparent,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Create a color from a hex value (0xRRGGBB).
    pub const fn hex(value: u32) -> Self {
        Self::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `transparent`.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }

        if let Some(inner) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<u8> = inner
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<_, _>>()
                .map_err(|_| ColorError::new(value))?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                _ => Err(ColorError::new(value)),
            };
        }

        if !trimmed.starts_with('#') {
            return Err(ColorError::new(value));
        }
        let srgb = Srgb::<u8>::from_str(trimmed).map_err(|_| ColorError::new(value))?;
        let (r, g, b) = srgb.into_components();
        Ok(Self::rgb(r, g, b))
    }

    pub fn to_rgb(&self) -> Option<Rgb> {
        match self {
            Self::Rgb { r, g, b } => Some(Rgb::new(*r, *g, *b)),
            Self::Oklch { l, c, h } => Some(oklch_to_rgb(*l, *c, *h)),
            Self::Transparent => None,
        }
    }

    /// CSS text for this color.
    pub fn to_css(&self) -> String {
        match self.to_rgb() {
            Some(Rgb { r, g, b }) => format!("#{r:02x}{g:02x}{b:02x}"),
            None => "transparent".to_string(),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}
