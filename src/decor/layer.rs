//! Ordered collection of decoration elements with single selection.
//!
//! Insertion order is draw order: later elements paint over earlier ones, both in the preview
//! and in the export. Selection never reorders anything.

use crate::{
    decor::element::{DecorationElement, ElementId, StickerElement, TextElement},
    foundation::{
        core::{Point, Rgba8},
        error::{FotobooError, FotobooResult},
        math::normalize_degrees,
    },
};

pub const TEXT_ANCHOR: Point = Point::new(50.0, 100.0);
pub const STICKER_ANCHOR: Point = Point::new(50.0, 200.0);
pub const DEFAULT_TEXT_SIZE: f64 = 32.0;
pub const DEFAULT_STICKER_SIZE: f64 = 48.0;
pub const DEFAULT_TEXT_COLOR: Rgba8 = Rgba8::BLACK;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationLayer {
    elements: Vec<DecorationElement>,
    selected: Option<ElementId>,
    next_id: u64,
}

impl DecorationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a layer from a saved snapshot. Duplicate ids are rejected and rotations are
    /// normalized to `[0, 360)`.
    pub fn from_elements(mut elements: Vec<DecorationElement>) -> FotobooResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for e in &elements {
            if !seen.insert(e.id()) {
                return Err(FotobooError::validation(format!(
                    "duplicate decoration id {}",
                    e.id()
                )));
            }
        }
        for e in &mut elements {
            let r = e.rotation_mut();
            *r = normalize_degrees(*r);
        }
        let next_id = elements.iter().map(|e| e.id().0 + 1).max().unwrap_or(0);
        Ok(Self {
            elements,
            selected: None,
            next_id,
        })
    }

    /// Append a text element at the default anchor and select it.
    pub fn add_text(
        &mut self,
        content: &str,
        font: &str,
        size: f64,
        color: Rgba8,
    ) -> FotobooResult<ElementId> {
        if content.trim().is_empty() {
            return Err(FotobooError::validation("Please enter some text"));
        }
        validate_size(size)?;

        let id = self.allocate_id();
        self.elements.push(DecorationElement::Text(TextElement {
            id,
            content: content.to_string(),
            font: font.to_string(),
            size,
            color,
            x: TEXT_ANCHOR.x,
            y: TEXT_ANCHOR.y,
            rotation: 0.0,
        }));
        self.selected = Some(id);
        Ok(id)
    }

    /// Append a sticker at the default anchor with the default size and select it.
    pub fn add_sticker(&mut self, glyph: &str) -> FotobooResult<ElementId> {
        if glyph.trim().is_empty() {
            return Err(FotobooError::validation("sticker glyph must be non-empty"));
        }

        let id = self.allocate_id();
        self.elements.push(DecorationElement::Sticker(StickerElement {
            id,
            glyph: glyph.to_string(),
            size: DEFAULT_STICKER_SIZE,
            x: STICKER_ANCHOR.x,
            y: STICKER_ANCHOR.y,
            rotation: 0.0,
        }));
        self.selected = Some(id);
        Ok(id)
    }

    /// Select `id`; `None` or an unknown id clears the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.get(*id).is_some());
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&DecorationElement> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ElementId) -> Option<&DecorationElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut DecorationElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Overwrite the position. No clamping: elements may leave the visible strip.
    pub fn move_to(&mut self, id: ElementId, x: f64, y: f64) -> bool {
        let Some(e) = self.get_mut(id) else {
            return false;
        };
        e.set_position(Point::new(x, y));
        true
    }

    pub fn resize(&mut self, id: ElementId, size: f64) -> bool {
        if validate_size(size).is_err() {
            return false;
        }
        let Some(e) = self.get_mut(id) else {
            return false;
        };
        *e.size_mut() = size;
        true
    }

    /// Like [`DecorationLayer::resize`] but only touches text elements.
    pub fn update_text_size(&mut self, id: ElementId, size: f64) -> bool {
        match self.get(id) {
            Some(e) if e.is_text() => self.resize(id, size),
            _ => false,
        }
    }

    /// Set the absolute rotation, normalized into [0, 360).
    pub fn rotate(&mut self, id: ElementId, degrees: f64) -> bool {
        let Some(e) = self.get_mut(id) else {
            return false;
        };
        *e.rotation_mut() = normalize_degrees(degrees);
        true
    }

    /// Add `delta` degrees to the current rotation.
    pub fn rotate_by(&mut self, id: ElementId, delta: f64) -> bool {
        let Some(current) = self.get(id).map(DecorationElement::rotation) else {
            return false;
        };
        self.rotate(id, current + delta)
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.elements.len() != before
    }

    /// Elements in draw order.
    pub fn elements(&self) -> &[DecorationElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Owned copy of the elements for a render job.
    pub fn snapshot(&self) -> Vec<DecorationElement> {
        self.elements.clone()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn validate_size(size: f64) -> FotobooResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(FotobooError::validation(
            "decoration size must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/decor/layer.rs"]
mod tests;
