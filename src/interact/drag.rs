//! Drag gestures.
//!
//! Each gesture captures what it needs at pointer-down and turns every later
//! pointer position into an `ItemPatch`. Positions are in chart space.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::model::{ItemId, ItemPatch};
use crate::render::defaults;
use crate::render::geometry::pointer_angle;
use crate::render::ChartLayout;
use crate::types::{Degrees, round_to};

/// Common behaviour of the three drags.
#[enum_dispatch]
pub trait DragGesture {
    /// Item being dragged.
    fn item(&self) -> &ItemId;

    /// Patch for the pointer at `pointer`. `layout` is the chart as currently
    /// rendered, so scaling always uses the current largest radius.
    fn drag_to(&mut self, pointer: DVec2, layout: &ChartLayout) -> Option<ItemPatch>;
}

/// Moves a label by the pointer delta since pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDrag {
    pub id: ItemId,
    pub start_pointer: DVec2,
    pub start_offset: DVec2,
}

impl LabelDrag {
    pub fn new(id: ItemId, start_pointer: DVec2, start_offset: DVec2) -> Self {
        Self {
            id,
            start_pointer,
            start_offset,
        }
    }

    pub fn offset_at(&self, pointer: DVec2) -> DVec2 {
        self.start_offset + (pointer - self.start_pointer)
    }
}

impl DragGesture for LabelDrag {
    fn item(&self) -> &ItemId {
        &self.id
    }

    fn drag_to(&mut self, pointer: DVec2, _layout: &ChartLayout) -> Option<ItemPatch> {
        let offset = self.offset_at(pointer);
        Some(ItemPatch::new().with_label_offset(offset.x, offset.y))
    }
}

/// Sets an item's radius from the pointer's distance to the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusDrag {
    pub id: ItemId,
}

impl RadiusDrag {
    pub fn new(id: ItemId) -> Self {
        Self { id }
    }

    /// Stored radius that renders the outer edge at `pointer`.
    pub fn radius_at(pointer: DVec2, layout: &ChartLayout) -> f64 {
        let frame = &layout.frame;
        let distance = (pointer - frame.center).length();
        let effective = frame.effective_radius_at(distance);
        round_to(effective - defaults::RADIUS_PADDING, defaults::DRAG_PRECISION)
    }
}

impl DragGesture for RadiusDrag {
    fn item(&self) -> &ItemId {
        &self.id
    }

    fn drag_to(&mut self, pointer: DVec2, layout: &ChartLayout) -> Option<ItemPatch> {
        Some(ItemPatch::new().with_radius(Self::radius_at(pointer, layout)))
    }
}

/// Sets an item's angle so its end edge follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleDrag {
    pub id: ItemId,
    /// Start angle of the wedge when the drag began.
    pub start: Degrees,
}

impl AngleDrag {
    pub fn new(id: ItemId, start: Degrees) -> Self {
        Self { id, start }
    }

    /// Angular width from the captured start to `pointer`, in `[1, 360]`.
    pub fn angle_at(&self, center: DVec2, pointer: DVec2) -> f64 {
        let wrapped = (pointer_angle(center, pointer).raw() - self.start.raw()).rem_euclid(360.0);
        let width = if wrapped == 0.0 { 360.0 } else { wrapped };
        round_to(width, defaults::DRAG_PRECISION)
            .clamp(defaults::MIN_DRAG_ANGLE, defaults::MAX_DRAG_ANGLE)
    }
}

impl DragGesture for AngleDrag {
    fn item(&self) -> &ItemId {
        &self.id
    }

    fn drag_to(&mut self, pointer: DVec2, layout: &ChartLayout) -> Option<ItemPatch> {
        if !self.start.raw().is_finite() {
            return None;
        }
        Some(ItemPatch::new().with_angle(self.angle_at(layout.frame.center, pointer)))
    }
}

/// A drag in progress.
#[enum_dispatch(DragGesture)]
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    LabelDrag,
    RadiusDrag,
    AngleDrag,
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::LabelDrag(_) => "label",
            Gesture::RadiusDrag(_) => "radius",
            Gesture::AngleDrag(_) => "angle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChartSettings, DataItem};
    use crate::render::geometry::polar;
    use crate::render::layout;
    use glam::dvec2;

    fn two_items() -> ChartLayout {
        layout(
            &[
                DataItem::new("a", "A", 1.0, 180.0, 92.0, "red"),
                DataItem::new("b", "B", 1.0, 180.0, 42.0, "blue"),
            ],
            &ChartSettings::default(),
        )
    }

    #[test]
    fn label_drag_adds_delta_to_start_offset() {
        let mut drag = LabelDrag::new("a".into(), dvec2(100.0, 100.0), dvec2(5.0, 5.0));
        let patch = drag.drag_to(dvec2(110.0, 90.0), &two_items()).unwrap();
        assert_eq!(patch.label_x, Some(Some(15.0)));
        assert_eq!(patch.label_y, Some(Some(-5.0)));
    }

    #[test]
    fn radius_drag_inverts_scaling() {
        let layout = two_items();
        let slice = layout.slice(&"b".into()).unwrap();
        // pointer exactly on b's rendered outer edge gives back b's radius
        let patch = RadiusDrag::new("b".into())
            .drag_to(slice.radius_handle, &layout)
            .unwrap();
        assert_eq!(patch.radius, Some(42.0));
    }

    #[test]
    fn radius_drag_clamps_to_band() {
        let layout = two_items();
        let center = layout.frame.center;
        // at the centre: inner + 1 -> eff = 1/195 * 100
        let r = RadiusDrag::radius_at(center, &layout);
        assert_eq!(r, round_to(100.0 / 195.0 - 8.0, 2));
        // far outside: max radius -> eff = 100
        let r = RadiusDrag::radius_at(center + dvec2(1000.0, 0.0), &layout);
        assert_eq!(r, 92.0);
    }

    #[test]
    fn angle_drag_follows_pointer() {
        let layout = two_items();
        let center = layout.frame.center;
        let drag = AngleDrag::new("b".into(), Degrees(180.0));
        let p = polar(center, 100.0, Degrees(270.0));
        assert_eq!(drag.angle_at(center, p), 90.0);
    }

    #[test]
    fn angle_drag_wraps_past_start() {
        let layout = two_items();
        let center = layout.frame.center;
        let drag = AngleDrag::new("b".into(), Degrees(180.0));
        // pointer at 90° is behind the start: wraps to 270
        let p = polar(center, 100.0, Degrees(90.0));
        assert_eq!(drag.angle_at(center, p), 270.0);
        // pointer exactly on the start ray is a full turn, not zero
        let p = polar(center, 100.0, Degrees(180.0));
        let angle = drag.angle_at(center, p);
        assert!(angle == 360.0 || angle <= 1.0, "got {angle}");
    }

    #[test]
    fn angle_drag_stays_in_range() {
        let layout = two_items();
        let center = layout.frame.center;
        for start in [0.0, 45.0, 180.0, 359.0, 720.0, -90.0] {
            let drag = AngleDrag::new("a".into(), Degrees(start));
            for step in 0..72 {
                let p = polar(center, 50.0, Degrees(step as f64 * 5.0 + 0.3));
                let angle = drag.angle_at(center, p);
                assert!((1.0..=360.0).contains(&angle), "{start} {step}: {angle}");
            }
        }
    }

    #[test]
    fn angle_drag_from_huge_start_returns_promptly() {
        let layout = two_items();
        let center = layout.frame.center;
        // 360 is below one ulp of 1e20
        for start in [1e12, -1e12, 1e20, f64::MAX] {
            let drag = AngleDrag::new("a".into(), Degrees(start));
            let angle = drag.angle_at(center, polar(center, 50.0, Degrees(90.0)));
            assert!((1.0..=360.0).contains(&angle), "{start}: {angle}");
        }
    }

    #[test]
    fn gestures_dispatch_through_the_enum() {
        let layout = two_items();
        let mut gesture: Gesture = RadiusDrag::new("a".into()).into();
        assert_eq!(gesture.item().as_str(), "a");
        assert_eq!(gesture.name(), "radius");
        assert!(gesture.drag_to(dvec2(325.0, 0.0), &layout).is_some());
    }
}
