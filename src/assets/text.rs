use std::{borrow::Cow, collections::HashMap};

use crate::{
    assets::fonts::ResolvedFont,
    foundation::{
        core::Rgba8,
        error::{FotobooError, FotobooResult},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A single shaped line of text ready to draw.
///
/// Glyph positions are relative to the top-left of the line box; `baseline` is the distance from
/// that top edge down to the alphabetic baseline.
pub struct TextLayout {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: ResolvedFont,
    width: f64,
    height: f64,
    baseline: f64,
}

impl std::fmt::Debug for TextLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayout")
            .field("family", &self.font.family)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl TextLayout {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }
}

/// Stateful helper for shaping decoration and watermark text.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    // (family, face index, byte length) -> family name parley registered.
    registered: HashMap<(String, u32, usize), String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Shape `text` as a single unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> FotobooResult<TextLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FotobooError::validation(
                "text size must be finite and > 0",
            ));
        }

        let family_name = self.register(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(f64::from(size_px));

        Ok(TextLayout {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            baseline,
            layout,
            font: font.clone(),
        })
    }

    fn register(&mut self, font: &ResolvedFont) -> FotobooResult<String> {
        let key = (font.family.clone(), font.index, font.bytes.len());
        if let Some(name) = self.registered.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FotobooError::render(format!("font '{}' registered no families", font.family))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FotobooError::render("registered font family has no name"))?
            .to_string();

        self.registered.insert(key, family_name.clone());
        Ok(family_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
