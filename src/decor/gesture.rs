//! Element drag gestures.
//!
//! The host forwards its global pointer move/up events here from a single listener pair it
//! registers once ([`GestureTracker::mount`]) and removes once ([`GestureTracker::unmount`]).
//! At most one gesture is in flight; a new pointer-down replaces it.

use crate::{
    decor::{element::ElementId, layer::DecorationLayer},
    foundation::core::{Point, PointerKind},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveGesture {
    pub target: ElementId,
    pub kind: PointerKind,
    /// Pointer position at gesture start.
    pub start: Point,
    /// Element position at gesture start.
    pub origin: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mount {
    #[default]
    Unmounted,
    Mounted,
    TornDown,
}

#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    mount: Mount,
    active: Option<ActiveGesture>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the global listeners. Only the first call has an effect.
    pub fn mount(&mut self) -> bool {
        if self.mount != Mount::Unmounted {
            return false;
        }
        self.mount = Mount::Mounted;
        true
    }

    /// Tear the listeners down and drop any in-flight gesture. Only effective once, after mount.
    pub fn unmount(&mut self) -> bool {
        if self.mount != Mount::Mounted {
            return false;
        }
        self.mount = Mount::TornDown;
        self.active = None;
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mount == Mount::Mounted
    }

    pub fn active(&self) -> Option<&ActiveGesture> {
        self.active.as_ref()
    }

    /// Select `id` and start dragging it. Ignored while unmounted or when `id` is unknown.
    pub fn pointer_down(
        &mut self,
        layer: &mut DecorationLayer,
        id: ElementId,
        at: Point,
        kind: PointerKind,
    ) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let Some(origin) = layer.get(id).map(|e| e.position()) else {
            return false;
        };
        layer.select(Some(id));
        self.active = Some(ActiveGesture {
            target: id,
            kind,
            start: at,
            origin,
        });
        true
    }

    /// Move the dragged element by the pointer delta since gesture start.
    pub fn pointer_move(&mut self, layer: &mut DecorationLayer, at: Point) -> bool {
        let Some(g) = self.active else {
            return false;
        };
        let p = g.origin + (at - g.start);
        layer.move_to(g.target, p.x, p.y)
    }

    /// End the gesture (mouse up, touch end or touch cancel).
    pub fn pointer_up(&mut self) -> Option<ActiveGesture> {
        self.active.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decor/gesture.rs"]
mod tests;
