use std::{fmt, str::FromStr};

use crate::foundation::error::{FotobooError, FotobooResult};

pub use kurbo::{Affine, Line, Point, Rect, Size, Vec2};

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn rect(self) -> Rect {
        self.size().to_rect()
    }
}

/// Input device behind a pointer event. Touch gets larger hit targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a `#rrggbb` / `#rrggbbaa` string so project files stay hand-editable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> FotobooResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(FotobooError::validation(format!("invalid color '{s}'")));
        }

        let channel = |range: std::ops::Range<usize>| -> FotobooResult<u8> {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| FotobooError::validation(format!("invalid color '{s}'")))
        };

        match hex.len() {
            3 => {
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(FotobooError::validation(format!("invalid color '{s}'"))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            crate::foundation::math::mul_div255_u8(u16::from(self.r), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.g), a),
            crate::foundation::math::mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba8 {
    type Err = FotobooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Width-to-height ratio kept by crop regions and strip slots.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub const WIDESCREEN: Self = Self {
        width: 16.0,
        height: 9.0,
    };

    pub fn new(width: f64, height: f64) -> FotobooResult<Self> {
        let out = Self { width, height };
        out.validate()?;
        Ok(out)
    }

    pub fn value(self) -> f64 {
        self.width / self.height
    }

    pub fn height_for(self, width: f64) -> f64 {
        width / self.value()
    }

    pub fn validate(self) -> FotobooResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(FotobooError::validation(
                "aspect ratio components must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
