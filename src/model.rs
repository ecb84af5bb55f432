//! Chart data model: items, chart-wide settings and the in-memory store.
//!
//! `Chart` is the authoritative state owner. The interaction layer never
//! mutates items directly; it sends `ItemPatch`es through the `ItemSink`
//! trait and the owner merges them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::log;
use crate::render::defaults;

/// Opaque, stable identifier of a data item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// A fresh random id for a newly created item.
    pub fn random() -> Self {
        ItemId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One wedge of the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    pub id: ItemId,
    pub name: String,
    /// Shown in the label and legend; does not affect geometry.
    pub value: f64,
    /// Angular width in degrees.
    pub angle: f64,
    /// Radial magnitude in user units, scaled against the largest item.
    pub radius: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
}

impl DataItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        value: f64,
        angle: f64,
        radius: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            angle,
            radius,
            color: color.into(),
            font_size: None,
            label_x: None,
            label_y: None,
            label_color: None,
        }
    }

    /// Radius used for all geometry: the stored value plus a fixed visual padding.
    pub fn effective_radius(&self) -> f64 {
        self.radius + defaults::RADIUS_PADDING
    }

    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(defaults::FONT_SIZE)
    }

    /// Pixel translation applied on top of the default label anchor.
    pub fn label_offset(&self) -> glam::DVec2 {
        glam::dvec2(self.label_x.unwrap_or(0.0), self.label_y.unwrap_or(0.0))
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

/// A partial `DataItem`, merged into the stored item.
///
/// Optional item fields use `Option<Option<_>>`: the outer `None` leaves the
/// field alone, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub angle: Option<f64>,
    pub radius: Option<f64>,
    pub color: Option<String>,
    pub font_size: Option<Option<f64>>,
    pub label_x: Option<Option<f64>>,
    pub label_y: Option<Option<f64>>,
    pub label_color: Option<Option<String>>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(Some(size));
        self
    }

    pub fn with_label_offset(mut self, x: f64, y: f64) -> Self {
        self.label_x = Some(Some(x));
        self.label_y = Some(Some(y));
        self
    }

    pub fn clear_label_offset(mut self) -> Self {
        self.label_x = Some(None);
        self.label_y = Some(None);
        self
    }

    pub fn with_label_color(mut self, color: Option<String>) -> Self {
        self.label_color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }

    /// Merge into `item`. Non-finite numbers are dropped so they never reach geometry.
    pub fn apply_to(self, item: &mut DataItem) {
        fn keep_finite(field: &str, v: f64) -> Option<f64> {
            if v.is_finite() {
                Some(v)
            } else {
                log::warn!(field, value = v, "dropping non-finite value from patch");
                None
            }
        }
        fn keep_finite_opt(field: &str, v: Option<f64>) -> Option<Option<f64>> {
            match v {
                Some(v) => keep_finite(field, v).map(Some),
                None => Some(None),
            }
        }

        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(v) = self.value.and_then(|v| keep_finite("value", v)) {
            item.value = v;
        }
        if let Some(v) = self.angle.and_then(|v| keep_finite("angle", v)) {
            item.angle = v;
        }
        if let Some(v) = self.radius.and_then(|v| keep_finite("radius", v)) {
            item.radius = v;
        }
        if let Some(color) = self.color {
            item.color = color;
        }
        if let Some(v) = self.font_size.and_then(|v| keep_finite_opt("fontSize", v)) {
            item.font_size = v;
        }
        if let Some(v) = self.label_x.and_then(|v| keep_finite_opt("labelX", v)) {
            item.label_x = v;
        }
        if let Some(v) = self.label_y.and_then(|v| keep_finite_opt("labelY", v)) {
            item.label_y = v;
        }
        if let Some(color) = self.label_color {
            item.label_color = color;
        }
    }
}

/// Receiver of item updates emitted by the interaction layer.
///
/// Calls are fire-and-forget: the sink owns the authoritative state, merges
/// the patch and re-renders.
pub trait ItemSink {
    fn update_item(&mut self, id: &ItemId, patch: ItemPatch);

    /// Set an item's label offset.
    fn move_label(&mut self, id: &ItemId, x: f64, y: f64) {
        self.update_item(id, ItemPatch::new().with_label_offset(x, y));
    }
}

/// Chart-wide display settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    pub show_value_in_label: bool,
    /// Radius of the centre hole. Clamped at read time, never stored clamped.
    pub inner_radius: f64,
    pub gap_enabled: bool,
    pub center_text: String,
    pub bold_text: bool,
    pub center_circle_stroke_width: f64,
    pub center_circle_stroke_color: String,
    pub label_text_color: String,
    pub center_text_color: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            show_value_in_label: true,
            inner_radius: defaults::INNER_RADIUS,
            gap_enabled: false,
            center_text: String::new(),
            bold_text: true,
            center_circle_stroke_width: 1.0,
            center_circle_stroke_color: "#3b82f6".to_string(),
            label_text_color: defaults::TEXT_COLOR.to_string(),
            center_text_color: defaults::TEXT_COLOR.to_string(),
        }
    }
}

/// Non-blocking notice that the angles do not add up to a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleAdvisory {
    pub total: f64,
}

impl AngleAdvisory {
    /// `None` when the total is within tolerance of 360°.
    pub fn check(total: f64) -> Option<Self> {
        if (total - 360.0).abs() > defaults::ANGLE_TOLERANCE {
            Some(AngleAdvisory { total })
        } else {
            None
        }
    }
}

impl fmt::Display for AngleAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "angles add up to {:.1}°, adjust them to 360°", self.total)
    }
}

/// The official two-tone palette ("template one").
pub const TEMPLATE_ONE: [&str; 16] = [
    "rgb(57,124,186)",
    "rgb(189,215,238)",
    "rgb(57,124,186)",
    "rgb(189,215,238)",
    "rgb(57,124,186)",
    "rgb(189,215,238)",
    "rgb(57,124,186)",
    "rgb(189,215,238)",
    "rgb(166,166,166)",
    "rgb(217,217,217)",
    "rgb(166,166,166)",
    "rgb(217,217,217)",
    "rgb(166,166,166)",
    "rgb(217,217,217)",
    "rgb(166,166,166)",
    "rgb(217,217,217)",
];

/// Ordered item list plus settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    items: Vec<DataItem>,
    pub settings: ChartSettings,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<DataItem>) -> Self {
        Self {
            items,
            settings: ChartSettings::default(),
        }
    }

    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&DataItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the whole item list (used by configuration import).
    pub fn replace_items(&mut self, items: Vec<DataItem>) {
        self.items = items;
    }

    /// Append a new item that nests inside every existing one.
    pub fn add_item(&mut self) -> ItemId {
        let radius = self
            .items
            .iter()
            .map(|item| item.radius)
            .reduce(f64::min)
            .map(|min| min - 1.0)
            .unwrap_or(defaults::NEW_ITEM_RADIUS);

        let color = format!("#{:06x}", rand::random::<u32>() & 0x00ff_ffff);
        let item = DataItem::new(
            ItemId::random(),
            format!("Item {}", self.items.len() + 1),
            defaults::NEW_ITEM_VALUE,
            defaults::NEW_ITEM_ANGLE,
            radius,
            color,
        );
        let id = item.id.clone();
        log::debug!(id = %id, radius, "added item");
        self.items.push(item);
        id
    }

    pub fn push(&mut self, item: DataItem) {
        self.items.push(item);
    }

    /// Remove by id. No cascading effects.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<DataItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn reset_label_positions(&mut self) {
        for item in &mut self.items {
            item.label_x = None;
            item.label_y = None;
        }
    }

    /// Recolour items cyclically from `palette`.
    pub fn apply_palette(&mut self, palette: &[&str]) {
        if palette.is_empty() {
            return;
        }
        for (item, color) in self.items.iter_mut().zip(palette.iter().cycle()) {
            item.color = (*color).to_string();
        }
    }

    pub fn total_angle(&self) -> f64 {
        self.items.iter().map(|item| item.angle).sum()
    }

    pub fn angle_advisory(&self) -> Option<AngleAdvisory> {
        AngleAdvisory::check(self.total_angle())
    }
}

impl ItemSink for Chart {
    fn update_item(&mut self, id: &ItemId, patch: ItemPatch) {
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => patch.apply_to(item),
            None => log::warn!(id = %id, "update for unknown item ignored"),
        }
    }
}
