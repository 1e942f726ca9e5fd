use crate::foundation::core::{Point, Rgba8};

/// Opaque element identity, unique within one [`super::layer::DecorationLayer`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextElement {
    pub id: ElementId,
    pub content: String,
    /// Font stack, e.g. `"Comic Neue", cursive`.
    pub font: String,
    pub size: f64,
    pub color: Rgba8,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerElement {
    pub id: ElementId,
    pub glyph: String,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// A text or sticker overlay. `(x, y)` is its top-left corner in preview content coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecorationElement {
    Text(TextElement),
    Sticker(StickerElement),
}

impl DecorationElement {
    pub fn id(&self) -> ElementId {
        match self {
            Self::Text(t) => t.id,
            Self::Sticker(s) => s.id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::Text(t) => Point::new(t.x, t.y),
            Self::Sticker(s) => Point::new(s.x, s.y),
        }
    }

    pub fn set_position(&mut self, p: Point) {
        let (x, y) = match self {
            Self::Text(t) => (&mut t.x, &mut t.y),
            Self::Sticker(s) => (&mut s.x, &mut s.y),
        };
        *x = p.x;
        *y = p.y;
    }

    pub fn size(&self) -> f64 {
        match self {
            Self::Text(t) => t.size,
            Self::Sticker(s) => s.size,
        }
    }

    pub(crate) fn size_mut(&mut self) -> &mut f64 {
        match self {
            Self::Text(t) => &mut t.size,
            Self::Sticker(s) => &mut s.size,
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Self::Text(t) => t.rotation,
            Self::Sticker(s) => s.rotation,
        }
    }

    pub(crate) fn rotation_mut(&mut self) -> &mut f64 {
        match self {
            Self::Text(t) => &mut t.rotation,
            Self::Sticker(s) => &mut s.rotation,
        }
    }

    /// The string that gets drawn.
    pub fn content(&self) -> &str {
        match self {
            Self::Text(t) => &t.content,
            Self::Sticker(s) => &s.glyph,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}
