//! Pointer and keyboard interaction
//!
//! This module is organized into submodules:
//! - `capture`: Pointer capture guards
//! - `drag`: Label, radius and angle drag gestures
//! - `hit`: Hit testing against a layout
//! - `editor`: Field editor, rename box and quick toolbar
//!
//! The `Controller` turns host events into `ItemPatch`es sent to an
//! `ItemSink`. It never mutates items itself; after each update the host
//! recomputes the layout and passes it back in with the next event.

pub mod capture;
pub mod drag;
pub mod editor;
pub mod hit;

pub use capture::{InteractionSurface, PointerCapture};
pub use drag::{AngleDrag, DragGesture, Gesture, LabelDrag, RadiusDrag};
pub use editor::{Field, FieldEditor, QuickToolbar, RenameBox, adjust_font_size};
pub use hit::{Hit, hit_test};

use glam::DVec2;

use crate::errors::EditError;
use crate::log;
use crate::model::{Chart, ItemId, ItemPatch, ItemSink};
use crate::render::{self, ChartLayout, HandleKind, RenderOptions};

/// Where the chart sits on the page. Events arrive in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Client position of the chart's top-left corner.
    pub chart_origin: DVec2,
    /// Client position of the box that holds the chart and its popovers.
    pub container_origin: DVec2,
}

impl Viewport {
    pub fn to_chart(&self, client: DVec2) -> DVec2 {
        client - self.chart_origin
    }

    pub fn to_container(&self, client: DVec2) -> DVec2 {
        client - self.container_origin
    }
}

/// Pointer input, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { client: DVec2 },
    Move { client: DVec2 },
    Up { client: DVec2 },
    Click { client: DVec2 },
    DoubleClick { client: DVec2 },
    Wheel { client: DVec2, delta_y: f64 },
    /// The pointer left the chart.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        gesture: Gesture,
        // released on drop
        _capture: PointerCapture,
        moved: bool,
    },
}

/// Interaction state for one chart.
#[derive(Debug, Default)]
pub struct Controller {
    surface: InteractionSurface,
    viewport: Viewport,
    drag: DragState,
    hovered: Option<ItemId>,
    editor: Option<FieldEditor>,
    rename: Option<RenameBox>,
    toolbar: Option<QuickToolbar>,
    suppress_click: bool,
}

impl Controller {
    pub fn new(surface: InteractionSurface) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    pub fn surface(&self) -> &InteractionSurface {
        &self.surface
    }

    /// Update the page position of the chart and its container. Call when
    /// the page scrolls or the layout shifts.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hovered(&self) -> Option<&ItemId> {
        self.hovered.as_ref()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        match &self.drag {
            DragState::Dragging { gesture, .. } => Some(gesture),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture().is_some()
    }

    pub fn editor(&self) -> Option<&FieldEditor> {
        self.editor.as_ref()
    }

    pub fn rename(&self) -> Option<&RenameBox> {
        self.rename.as_ref()
    }

    pub fn toolbar(&self) -> Option<&QuickToolbar> {
        self.toolbar.as_ref()
    }

    /// Options for rendering the current state: handles of the hovered item.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            hovered: self.hovered.clone(),
        }
    }

    /// Handle one pointer event. Returns `true` when an update was sent to
    /// `sink` and the host should re-render.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        layout: &ChartLayout,
        sink: &mut impl ItemSink,
    ) -> bool {
        match event {
            PointerEvent::Down { client } => {
                self.pointer_down(self.viewport.to_chart(client), layout);
                false
            }
            PointerEvent::Move { client } => {
                self.pointer_move(self.viewport.to_chart(client), layout, sink)
            }
            PointerEvent::Up { .. } => {
                self.end_drag();
                false
            }
            PointerEvent::Click { client } => {
                self.click(client, layout);
                false
            }
            PointerEvent::DoubleClick { client } => {
                self.double_click(client, layout);
                false
            }
            PointerEvent::Wheel { client, delta_y } => {
                self.wheel(self.viewport.to_chart(client), delta_y, layout, sink)
            }
            PointerEvent::Leave => {
                if !self.is_dragging() {
                    self.hovered = None;
                }
                self.toolbar = None;
                false
            }
        }
    }

    /// Lay out `chart` and handle `event` against it.
    pub fn dispatch(&mut self, chart: &mut Chart, event: PointerEvent) -> bool {
        let layout = render::layout(chart.items(), &chart.settings);
        self.handle(event, &layout, chart)
    }

    fn pointer_down(&mut self, point: DVec2, layout: &ChartLayout) {
        if let DragState::Dragging { gesture, .. } = &self.drag {
            log::warn!(item = %gesture.item(), "replacing a stale drag");
            self.drag = DragState::Idle;
        }

        let Some(hit) = hit_test(layout, point, self.hovered.as_ref()) else {
            return;
        };
        let Some(slice) = layout.slice(hit.id()) else {
            return;
        };
        let gesture: Gesture = match hit {
            Hit::Handle {
                id,
                kind: HandleKind::Radius,
            } => RadiusDrag::new(id).into(),
            Hit::Handle {
                id,
                kind: HandleKind::Angle,
            } => AngleDrag::new(id, slice.start_angle).into(),
            Hit::Label(id) => LabelDrag::new(id, point, slice.item.label_offset()).into(),
            Hit::Wedge(_) => return,
        };

        log::debug!(item = %gesture.item(), kind = gesture.name(), "drag started");
        self.hovered = Some(gesture.item().clone());
        self.drag = DragState::Dragging {
            gesture,
            _capture: self.surface.capture(),
            moved: false,
        };
    }

    fn pointer_move(
        &mut self,
        point: DVec2,
        layout: &ChartLayout,
        sink: &mut impl ItemSink,
    ) -> bool {
        if let DragState::Dragging { gesture, moved, .. } = &mut self.drag {
            let Some(patch) = gesture.drag_to(point, layout) else {
                return false;
            };
            *moved = true;
            sink.update_item(gesture.item(), patch);
            return true;
        }

        let hit = hit_test(layout, point, self.hovered.as_ref());
        self.hovered = hit.as_ref().map(|h| h.id().clone());
        // the toolbar lives only while its label is under the pointer
        self.toolbar = match hit {
            Some(Hit::Label(id)) => layout
                .slice(&id)
                .map(|slice| QuickToolbar::above(id, slice.label_position)),
            _ => None,
        };
        false
    }

    /// End the current drag, if any, releasing its capture.
    pub fn end_drag(&mut self) {
        if let DragState::Dragging { gesture, moved, .. } = std::mem::take(&mut self.drag) {
            log::debug!(item = %gesture.item(), kind = gesture.name(), moved, "drag ended");
            // the click that follows a real drag is not a click
            self.suppress_click = moved;
        }
    }

    fn click(&mut self, client: DVec2, layout: &ChartLayout) {
        if std::mem::take(&mut self.suppress_click) {
            return;
        }
        let point = self.viewport.to_chart(client);
        match hit_test(layout, point, self.hovered.as_ref()) {
            Some(Hit::Label(id)) | Some(Hit::Wedge(id)) => {
                self.editor = Some(FieldEditor::new(id, self.viewport.to_container(client)));
            }
            Some(Hit::Handle { .. }) => {}
            None => self.editor = None,
        }
    }

    fn double_click(&mut self, client: DVec2, layout: &ChartLayout) {
        let point = self.viewport.to_chart(client);
        if let Some(Hit::Label(id)) = hit_test(layout, point, self.hovered.as_ref()) {
            if let Some(slice) = layout.slice(&id) {
                let name = slice.item.name.clone();
                self.rename = Some(RenameBox::new(id, self.viewport.to_container(client), name));
            }
        }
    }

    fn wheel(
        &mut self,
        point: DVec2,
        delta_y: f64,
        layout: &ChartLayout,
        sink: &mut impl ItemSink,
    ) -> bool {
        let Some(Hit::Label(id)) = hit_test(layout, point, self.hovered.as_ref()) else {
            return false;
        };
        let Some(slice) = layout.slice(&id) else {
            return false;
        };
        let current = slice.item.font_size();
        let next = adjust_font_size(current, delta_y);
        if next == current {
            return false;
        }
        sink.update_item(&id, ItemPatch::new().with_font_size(next));
        true
    }

    /// Apply an edit from the open field editor.
    pub fn edit(&mut self, field: Field, text: &str, sink: &mut impl ItemSink) -> Result<(), EditError> {
        self.editor
            .as_ref()
            .ok_or(EditError::Closed)?
            .edit(field, text, sink)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Apply an edit from the quick toolbar.
    pub fn toolbar_edit(
        &mut self,
        field: Field,
        text: &str,
        sink: &mut impl ItemSink,
    ) -> Result<(), EditError> {
        self.toolbar
            .as_ref()
            .ok_or(EditError::Closed)?
            .edit(field, text, sink)
    }

    /// Replace the text in the open rename box.
    pub fn set_rename_text(&mut self, text: impl Into<String>) {
        if let Some(rename) = &mut self.rename {
            rename.set_text(text);
        }
    }

    /// Keyboard input for the rename box. Enter commits, Escape discards.
    /// Returns `true` when a name was sent.
    pub fn key(&mut self, key: Key, sink: &mut impl ItemSink) -> bool {
        match key {
            Key::Enter => self.commit_rename(sink),
            Key::Escape => {
                self.rename = None;
                false
            }
            Key::Other => false,
        }
    }

    /// The rename box lost focus: keep what was typed.
    pub fn blur(&mut self, sink: &mut impl ItemSink) -> bool {
        self.commit_rename(sink)
    }

    fn commit_rename(&mut self, sink: &mut impl ItemSink) -> bool {
        match self.rename.take() {
            Some(rename) => {
                rename.commit(sink);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataItem;
    use glam::dvec2;

    fn chart() -> Chart {
        Chart::with_items(vec![
            DataItem::new("a", "Alpha", 10.0, 90.0, 92.0, "red"),
            DataItem::new("b", "Beta", 20.0, 270.0, 42.0, "blue"),
        ])
    }

    fn label_of(chart: &Chart, id: &str) -> DVec2 {
        render::layout(chart.items(), &chart.settings)
            .slice(&id.into())
            .unwrap()
            .label_position
    }

    #[test]
    fn viewport_offsets() {
        let vp = Viewport {
            chart_origin: dvec2(100.0, 50.0),
            container_origin: dvec2(80.0, 40.0),
        };
        assert_eq!(vp.to_chart(dvec2(110.0, 60.0)), dvec2(10.0, 10.0));
        assert_eq!(vp.to_container(dvec2(110.0, 60.0)), dvec2(30.0, 20.0));
    }

    #[test]
    fn hover_tracks_item_and_shows_toolbar() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "a");
        ctl.dispatch(&mut chart, PointerEvent::Move { client: label });
        assert_eq!(ctl.hovered().map(ItemId::as_str), Some("a"));
        assert_eq!(ctl.toolbar().unwrap().item.as_str(), "a");

        ctl.dispatch(&mut chart, PointerEvent::Leave);
        assert!(ctl.hovered().is_none());
        assert!(ctl.toolbar().is_none());
    }

    #[test]
    fn toolbar_closes_when_pointer_leaves_its_label() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "a");

        ctl.dispatch(&mut chart, PointerEvent::Move { client: label });
        assert!(ctl.toolbar().is_some());
        // empty canvas
        ctl.dispatch(&mut chart, PointerEvent::Move { client: dvec2(5.0, 640.0) });
        assert!(ctl.hovered().is_none());
        assert!(ctl.toolbar().is_none());

        // the wedge of the same item does not keep it open either
        ctl.dispatch(&mut chart, PointerEvent::Move { client: label });
        let slice = render::layout(chart.items(), &chart.settings)
            .slice(&"a".into())
            .unwrap()
            .clone();
        let mid = slice.start_angle + crate::types::Degrees(slice.width.raw() / 2.0);
        let inside = render::geometry::polar(dvec2(325.0, 325.0), 100.0, mid);
        ctl.dispatch(&mut chart, PointerEvent::Move { client: inside });
        assert_eq!(ctl.hovered().map(ItemId::as_str), Some("a"));
        assert!(ctl.toolbar().is_none());
    }

    #[test]
    fn label_drag_moves_and_releases_capture() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "b");

        ctl.dispatch(&mut chart, PointerEvent::Down { client: label });
        assert!(ctl.is_dragging());
        assert_eq!(ctl.surface().active_captures(), 1);

        assert!(ctl.dispatch(&mut chart, PointerEvent::Move { client: label + dvec2(10.0, 5.0) }));
        ctl.dispatch(&mut chart, PointerEvent::Up { client: label + dvec2(10.0, 5.0) });
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.surface().active_captures(), 0);

        let item = chart.get(&"b".into()).unwrap();
        assert!(item.label_offset().distance(dvec2(10.0, 5.0)) < 1e-9);
    }

    #[test]
    fn click_after_drag_is_suppressed() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "b");
        let end = label + dvec2(4.0, 0.0);
        ctl.dispatch(&mut chart, PointerEvent::Down { client: label });
        ctl.dispatch(&mut chart, PointerEvent::Move { client: end });
        ctl.dispatch(&mut chart, PointerEvent::Up { client: end });
        ctl.dispatch(&mut chart, PointerEvent::Click { client: end });
        assert!(ctl.editor().is_none());

        // a plain click opens the editor
        let label = label_of(&chart, "b");
        ctl.dispatch(&mut chart, PointerEvent::Down { client: label });
        ctl.dispatch(&mut chart, PointerEvent::Up { client: label });
        ctl.dispatch(&mut chart, PointerEvent::Click { client: label });
        assert_eq!(ctl.editor().unwrap().item.as_str(), "b");
    }

    #[test]
    fn editor_anchor_is_container_relative() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        ctl.set_viewport(Viewport {
            chart_origin: dvec2(200.0, 300.0),
            container_origin: dvec2(150.0, 250.0),
        });
        // 45° from the top, about 141px out: inside wedge a
        let inside_a = dvec2(425.0, 225.0);
        let client = inside_a + dvec2(200.0, 300.0);
        ctl.dispatch(&mut chart, PointerEvent::Click { client });
        let editor = ctl.editor().unwrap();
        assert_eq!(editor.item.as_str(), "a");
        assert_eq!(editor.anchor, inside_a + dvec2(50.0, 50.0));

        ctl.edit(Field::Value, "99", &mut chart).unwrap();
        assert_eq!(chart.get(&"a".into()).unwrap().value, 99.0);
        ctl.close_editor();
        assert_eq!(ctl.edit(Field::Value, "1", &mut chart), Err(EditError::Closed));
    }

    #[test]
    fn rename_enter_commits_escape_discards() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "a");

        ctl.dispatch(&mut chart, PointerEvent::DoubleClick { client: label });
        assert_eq!(ctl.rename().unwrap().text, "Alpha");
        ctl.set_rename_text("Aleph");
        assert!(ctl.key(Key::Enter, &mut chart));
        assert_eq!(chart.get(&"a".into()).unwrap().name, "Aleph");
        assert!(ctl.rename().is_none());

        let label = label_of(&chart, "a");
        ctl.dispatch(&mut chart, PointerEvent::DoubleClick { client: label });
        ctl.set_rename_text("Nope");
        assert!(!ctl.key(Key::Escape, &mut chart));
        assert_eq!(chart.get(&"a".into()).unwrap().name, "Aleph");
    }

    #[test]
    fn rename_blur_commits() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "b");
        ctl.dispatch(&mut chart, PointerEvent::DoubleClick { client: label });
        ctl.set_rename_text("Bet");
        assert!(ctl.blur(&mut chart));
        assert_eq!(chart.get(&"b".into()).unwrap().name, "Bet");
    }

    #[test]
    fn wheel_over_label_changes_font_size() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "a");
        assert!(ctl.dispatch(&mut chart, PointerEvent::Wheel { client: label, delta_y: -1.0 }));
        assert_eq!(chart.get(&"a".into()).unwrap().font_size, Some(13.0));

        // not over a label: nothing
        assert!(!ctl.dispatch(
            &mut chart,
            PointerEvent::Wheel {
                client: dvec2(325.0, 325.0),
                delta_y: -1.0
            }
        ));
    }

    #[test]
    fn new_press_replaces_stale_gesture() {
        let mut chart = chart();
        let mut ctl = Controller::default();
        let label = label_of(&chart, "a");
        ctl.dispatch(&mut chart, PointerEvent::Down { client: label });
        ctl.dispatch(&mut chart, PointerEvent::Down { client: label });
        assert_eq!(ctl.surface().active_captures(), 1);
        let surface = ctl.surface().clone();
        drop(ctl);
        assert_eq!(surface.active_captures(), 0);
    }
}
