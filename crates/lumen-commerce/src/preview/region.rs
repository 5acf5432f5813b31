//! Geometry of the cart preview: trigger and panel bounds.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle. Contains its top/left edges, not its
/// bottom/right edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `point` lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        let dx = i64::from(point.x) - i64::from(self.x);
        let dy = i64::from(point.y) - i64::from(self.y);
        (0..i64::from(self.width)).contains(&dx) && (0..i64::from(self.height)).contains(&dy)
    }
}

#[derive(Debug, Default)]
struct LayoutState {
    trigger: Option<Rect>,
    panel: Option<Rect>,
}

/// Current rendered bounds of the preview region.
///
/// The presentation layer updates this as it lays the preview out; the
/// controller reads it at the moment an activation arrives. The trigger and
/// the panel together form one region: a point in either is inside.
#[derive(Debug, Clone, Default)]
pub struct PreviewLayout {
    state: Arc<RwLock<LayoutState>>,
}

impl PreviewLayout {
    /// Layout with nothing rendered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with a rendered trigger.
    pub fn with_trigger(trigger: Rect) -> Self {
        let layout = Self::new();
        layout.set_trigger(Some(trigger));
        layout
    }

    /// Update the trigger bounds.
    pub fn set_trigger(&self, bounds: Option<Rect>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .trigger = bounds;
    }

    /// Update the panel bounds; `None` when the panel is not rendered.
    pub fn set_panel(&self, bounds: Option<Rect>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .panel = bounds;
    }

    /// Current trigger bounds.
    pub fn trigger(&self) -> Option<Rect> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).trigger
    }

    /// Current panel bounds.
    pub fn panel(&self) -> Option<Rect> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).panel
    }

    /// Whether `point` lies inside the trigger or the panel.
    pub fn contains(&self, point: Point) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        [state.trigger, state.panel]
            .iter()
            .flatten()
            .any(|rect| rect.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(14, 14)));
        assert!(!r.contains(Point::new(15, 10)));
        assert!(!r.contains(Point::new(9, 12)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(!r.contains(Point::new(0, 0)));
    }

    #[test]
    fn test_extreme_coordinates() {
        let r = Rect::new(i32::MAX - 1, 0, u32::MAX, 1);
        assert!(r.contains(Point::new(i32::MAX, 0)));
        assert!(!r.contains(Point::new(i32::MIN, 0)));
    }

    #[test]
    fn test_layout_union() {
        let layout = PreviewLayout::with_trigger(Rect::new(0, 0, 24, 24));
        layout.set_panel(Some(Rect::new(-200, 30, 224, 300)));

        assert!(layout.contains(Point::new(5, 5)));
        assert!(layout.contains(Point::new(-100, 100)));
        assert!(!layout.contains(Point::new(500, 500)));
    }

    #[test]
    fn test_layout_reads_current_bounds() {
        let layout = PreviewLayout::with_trigger(Rect::new(0, 0, 24, 24));
        let inside_panel = Point::new(50, 50);
        assert!(!layout.contains(inside_panel));

        layout.set_panel(Some(Rect::new(40, 40, 100, 100)));
        assert!(layout.contains(inside_panel));

        layout.set_panel(None);
        assert!(!layout.contains(inside_panel));
    }
}
