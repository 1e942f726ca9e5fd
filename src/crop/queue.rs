use std::collections::VecDeque;

use crate::assets::decode::EncodedImage;

/// Position of the image being cropped within its batch (zero-based `index`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CropProgress {
    pub index: usize,
    pub total: usize,
}

/// Images waiting to be cropped one after another.
#[derive(Clone, Debug, Default)]
pub struct CropQueue {
    pending: VecDeque<EncodedImage>,
    total: usize,
    started: usize,
}

impl CropQueue {
    pub fn new(images: Vec<EncodedImage>) -> Self {
        Self {
            total: images.len(),
            pending: images.into(),
            started: 0,
        }
    }

    /// Append more images to the current batch.
    pub fn extend(&mut self, images: impl IntoIterator<Item = EncodedImage>) {
        for image in images {
            self.pending.push_back(image);
            self.total += 1;
        }
    }

    /// Take the next image along with its batch position.
    pub fn advance(&mut self) -> Option<(EncodedImage, CropProgress)> {
        let image = self.pending.pop_front()?;
        let progress = CropProgress {
            index: self.started,
            total: self.total,
        };
        self.started += 1;
        Some((image, progress))
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Forget every pending image and reset progress.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.total = 0;
        self.started = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/queue.rs"]
mod tests;
