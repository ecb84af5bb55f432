//! Layout and scene types produced by the renderer

use glam::DVec2;

use crate::model::{AngleAdvisory, DataItem, ItemId};
use crate::types::{Degrees, Rect};

use super::geometry::{ChartFrame, WedgePath};

/// Geometry of one item, recomputed every render.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceLayout {
    /// Snapshot of the item this slice was computed from.
    pub item: DataItem,
    pub start_angle: Degrees,
    pub width: Degrees,
    pub effective_radius: f64,
    pub outer_radius: f64,
    pub path: WedgePath,
    /// Default label anchor before the user offset.
    pub label_anchor: DVec2,
    /// Final label position: anchor plus `label_x/label_y`.
    pub label_position: DVec2,
    /// Approximate text box around the label, for hit-testing.
    pub label_bounds: Rect,
    pub label_text: String,
    pub radius_handle: DVec2,
    pub angle_handle: DVec2,
}

impl SliceLayout {
    pub fn id(&self) -> &ItemId {
        &self.item.id
    }

    pub fn end_angle(&self) -> Degrees {
        self.start_angle + self.width
    }
}

/// Geometry of a whole chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub frame: ChartFrame,
    pub slices: Vec<SliceLayout>,
    pub total_angle: f64,
}

impl ChartLayout {
    pub fn slice(&self, id: &ItemId) -> Option<&SliceLayout> {
        self.slices.iter().find(|s| s.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn advisory(&self) -> Option<AngleAdvisory> {
        AngleAdvisory::check(self.total_angle)
    }
}

/// Options that affect what ends up in the scene
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Item whose handles are shown. `None` for exports.
    pub hovered: Option<ItemId>,
}

/// Stroke drawn between wedges when gaps are enabled
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WedgeNode {
    pub id: ItemId,
    pub d: String,
    pub fill: String,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub id: ItemId,
    pub position: DVec2,
    pub text: String,
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Radius,
    Angle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleNode {
    pub id: ItemId,
    pub kind: HandleKind,
    pub position: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CenterText {
    pub text: String,
    pub color: String,
    pub font_size: f64,
    pub bold: bool,
}

/// The centre hole with its outline and optional caption
#[derive(Debug, Clone, PartialEq)]
pub struct CenterNode {
    pub position: DVec2,
    pub radius: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub text: Option<CenterText>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub id: ItemId,
    pub color: String,
    /// `"{name}: {value} ({angle}°, R{radius})"`. `R` is the stored radius
    /// as the user entered it, with no padding added, so it reads back the
    /// same number the editor shows.
    pub text: String,
}

/// Drawable description of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub wedges: Vec<WedgeNode>,
    pub labels: Vec<LabelNode>,
    pub handles: Vec<HandleNode>,
    pub center: CenterNode,
    pub legend: Vec<LegendEntry>,
    pub advisory: Option<AngleAdvisory>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
    }
}
