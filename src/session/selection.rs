use crate::foundation::error::{FotobooError, FotobooResult};

/// Most photos a strip holds.
pub const MAX_SELECTION: usize = 4;

/// Indices into the photo collection, in the order they were picked.
///
/// The order is the strip's top-to-bottom order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `index`, or deselect it when already selected.
    ///
    /// Returns whether the index is selected afterwards. A fifth pick is rejected and leaves the
    /// set unchanged.
    pub fn toggle(&mut self, index: usize) -> FotobooResult<bool> {
        if let Some(pos) = self.position(index) {
            self.indices.remove(pos);
            return Ok(false);
        }
        if self.indices.len() >= MAX_SELECTION {
            return Err(FotobooError::validation(format!(
                "You can only select {MAX_SELECTION} photos"
            )));
        }
        self.indices.push(index);
        Ok(true)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Zero-based strip slot of `index`, if selected.
    pub fn position(&self, index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == index)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.indices.len() == MAX_SELECTION
    }

    /// Keep indices pointing at the same photos after photo `removed` left the collection.
    pub fn on_photo_removed(&mut self, removed: usize) {
        self.indices.retain(|&i| i != removed);
        for i in &mut self.indices {
            if *i > removed {
                *i -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/selection.rs"]
mod tests;
