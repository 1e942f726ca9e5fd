use crate::foundation::core::{AspectRatio, Point, Rect, Size};

/// Slack for float comparisons against the display bounds.
pub(crate) const BOUNDS_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// Hit-test order: top-left wins over top-right over bottom-left over bottom-right.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    pub fn opposite(self) -> Self {
        match self {
            Self::Nw => Self::Se,
            Self::Ne => Self::Sw,
            Self::Sw => Self::Ne,
            Self::Se => Self::Nw,
        }
    }

    pub fn is_west(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    pub fn is_north(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }
}

/// Aspect-locked rectangle in display space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Region of `width` with the height derived from `aspect`.
    pub fn with_width(x: f64, y: f64, width: f64, aspect: AspectRatio) -> Self {
        Self {
            x,
            y,
            width,
            height: aspect.height_for(width),
        }
    }

    /// Region of `width` centered in `display`.
    pub fn centered(display: Size, width: f64, aspect: AspectRatio) -> Self {
        let height = aspect.height_for(width);
        Self {
            x: (display.width - width) / 2.0,
            y: (display.height - height) / 2.0,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn corner(&self, corner: Corner) -> Point {
        let x = if corner.is_west() {
            self.x
        } else {
            self.x + self.width
        };
        let y = if corner.is_north() {
            self.y
        } else {
            self.y + self.height
        };
        Point::new(x, y)
    }

    /// First corner whose handle lies strictly within `tolerance` of `p` on both axes.
    pub fn handle_at(&self, p: Point, tolerance: f64) -> Option<Corner> {
        Corner::ALL.into_iter().find(|&c| {
            let q = self.corner(c);
            (p.x - q.x).abs() < tolerance && (p.y - q.y).abs() < tolerance
        })
    }

    pub fn fits_within(&self, display: Size) -> bool {
        self.x >= -BOUNDS_EPSILON
            && self.y >= -BOUNDS_EPSILON
            && self.x + self.width <= display.width + BOUNDS_EPSILON
            && self.y + self.height <= display.height + BOUNDS_EPSILON
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/region.rs"]
mod tests;
