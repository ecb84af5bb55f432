//! Hit testing against a computed layout.
//!
//! Handles win over labels, labels over wedges. Within a kind, later items
//! are drawn on top and win.

use glam::DVec2;

use crate::model::ItemId;
use crate::render::geometry::pointer_angle;
use crate::render::{ChartLayout, HandleKind, SliceLayout, defaults};

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Handle { id: ItemId, kind: HandleKind },
    Label(ItemId),
    Wedge(ItemId),
}

impl Hit {
    pub fn id(&self) -> &ItemId {
        match self {
            Hit::Handle { id, .. } | Hit::Label(id) | Hit::Wedge(id) => id,
        }
    }
}

/// Find the topmost target under `point`. Handles are only considered for
/// the `hovered` item, since only its handles are visible.
pub fn hit_test(layout: &ChartLayout, point: DVec2, hovered: Option<&ItemId>) -> Option<Hit> {
    if let Some(slice) = hovered.and_then(|id| layout.slice(id)) {
        if let Some(kind) = handle_at(slice, point) {
            return Some(Hit::Handle {
                id: slice.id().clone(),
                kind,
            });
        }
    }

    if let Some(slice) = layout.slices.iter().rev().find(|s| label_contains(s, point)) {
        return Some(Hit::Label(slice.id().clone()));
    }

    layout
        .slices
        .iter()
        .rev()
        .find(|s| wedge_contains(layout, s, point))
        .map(|s| Hit::Wedge(s.id().clone()))
}

fn handle_at(slice: &SliceLayout, point: DVec2) -> Option<HandleKind> {
    // the angle handle is drawn after the radius handle
    [
        (HandleKind::Angle, slice.angle_handle),
        (HandleKind::Radius, slice.radius_handle),
    ]
    .into_iter()
    .find(|(_, pos)| pos.distance(point) <= defaults::HANDLE_HIT_RADIUS)
    .map(|(kind, _)| kind)
}

fn label_contains(slice: &SliceLayout, point: DVec2) -> bool {
    slice
        .label_bounds
        .inflate(defaults::LABEL_HIT_PADDING)
        .contains(point)
}

fn wedge_contains(layout: &ChartLayout, slice: &SliceLayout, point: DVec2) -> bool {
    let width = slice.width.raw();
    if width <= 0.0 {
        return false;
    }
    let distance = point.distance(layout.frame.center);
    if distance < layout.frame.inner_radius || distance > slice.outer_radius {
        return false;
    }
    if width >= 360.0 {
        return true;
    }
    let along = (pointer_angle(layout.frame.center, point) - slice.start_angle)
        .normalized()
        .raw();
    along < width
}
