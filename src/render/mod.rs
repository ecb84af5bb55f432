//! Rose chart rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Fixed sizes and settings
//! - `geometry`: Angle sweep, radius scaling and wedge paths
//! - `types`: Layout and scene types
//! - `svg`: SVG generation

pub mod defaults;
pub mod geometry;
pub mod svg;
pub mod types;

pub use geometry::{ChartFrame, WedgePath};
pub use types::*;

use glam::dvec2;

use crate::log;
use crate::model::{ChartSettings, DataItem};
use crate::types::{Degrees, Rect};

/// Proportional character widths for printable ASCII, in hundredths of a
/// character cell.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of a full-width (CJK) glyph in the same units.
const WIDE_CHAR: u32 = 175;

/// A character cell is this fraction of the font size.
const CHAR_CELL_EM: f64 = 0.08 / 0.14;

/// Text length in hundredths of a character cell.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                WIDE_CHAR
            }
        })
        .sum()
}

/// Approximate rendered width of a label in pixels.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text_length(text) as f64 * 0.01 * CHAR_CELL_EM * font_size
}

/// Text shown in an item's label.
pub fn label_text(item: &DataItem, show_value: bool) -> String {
    if show_value {
        format!("{} {}", item.name, item.value)
    } else {
        item.name.clone()
    }
}

/// Compute the geometry of every wedge.
pub fn layout(items: &[DataItem], settings: &ChartSettings) -> ChartLayout {
    let frame = ChartFrame::new(settings, items);
    let (starts, total_angle) = geometry::sweep(items);

    let slices = items
        .iter()
        .zip(starts)
        .map(|(item, start)| {
            let width = Degrees(item.angle);
            let eff = item.effective_radius();
            let label_anchor = frame.label_anchor(start, width, eff);
            let label_position = label_anchor + item.label_offset();
            let label_text = label_text(item, settings.show_value_in_label);
            let font_size = item.font_size();
            let label_bounds = Rect::from_center_size(
                label_position,
                dvec2(text_width(&label_text, font_size), font_size),
            );
            SliceLayout {
                item: item.clone(),
                start_angle: start,
                width,
                effective_radius: eff,
                outer_radius: frame.outer_radius(eff),
                path: frame.wedge_path(start, width, eff),
                label_anchor,
                label_position,
                label_bounds,
                label_text,
                radius_handle: frame.radius_handle(start, width, eff),
                angle_handle: frame.angle_handle(start, width, eff),
            }
        })
        .collect();

    ChartLayout {
        frame,
        slices,
        total_angle,
    }
}

/// Build the drawable scene for a chart.
pub fn render(items: &[DataItem], settings: &ChartSettings, options: &RenderOptions) -> Scene {
    scene_from_layout(&layout(items, settings), settings, options)
}

/// Build the scene from an already computed layout.
pub fn scene_from_layout(
    layout: &ChartLayout,
    settings: &ChartSettings,
    options: &RenderOptions,
) -> Scene {
    let stroke = settings.gap_enabled.then(|| Stroke {
        color: defaults::GAP_STROKE_COLOR.to_string(),
        width: defaults::GAP_STROKE_WIDTH,
    });

    let mut wedges = Vec::with_capacity(layout.slices.len());
    let mut labels = Vec::with_capacity(layout.slices.len());
    let mut legend = Vec::with_capacity(layout.slices.len());
    let mut handles = Vec::new();

    for slice in &layout.slices {
        let item = &slice.item;
        wedges.push(WedgeNode {
            id: item.id.clone(),
            d: slice.path.to_string(),
            fill: item.color.clone(),
            stroke: stroke.clone(),
            opacity: defaults::WEDGE_OPACITY,
            tooltip: format!(
                "{}: {} ({}°, radius {})",
                item.name, item.value, item.angle, item.radius
            ),
        });
        labels.push(LabelNode {
            id: item.id.clone(),
            position: slice.label_position,
            text: slice.label_text.clone(),
            font_size: item.font_size(),
            color: item
                .label_color
                .clone()
                .unwrap_or_else(|| settings.label_text_color.clone()),
            bold: settings.bold_text,
        });
        legend.push(LegendEntry {
            id: item.id.clone(),
            color: item.color.clone(),
            text: format!(
                "{}: {} ({}°, R{})",
                item.name, item.value, item.angle, item.radius
            ),
        });
        if options.hovered.as_ref() == Some(&item.id) {
            handles.push(HandleNode {
                id: item.id.clone(),
                kind: HandleKind::Radius,
                position: slice.radius_handle,
            });
            handles.push(HandleNode {
                id: item.id.clone(),
                kind: HandleKind::Angle,
                position: slice.angle_handle,
            });
        }
    }

    let center_text = (!settings.center_text.is_empty()).then(|| CenterText {
        text: settings.center_text.clone(),
        color: settings.center_text_color.clone(),
        font_size: defaults::CENTER_FONT_SIZE,
        bold: settings.bold_text,
    });

    let advisory = layout.advisory();
    if let Some(advisory) = advisory {
        log::debug!(total = advisory.total, "angle total is not a full turn");
    }

    Scene {
        size: defaults::CANVAS_SIZE,
        wedges,
        labels,
        handles,
        center: CenterNode {
            position: layout.frame.center,
            radius: layout.frame.inner_radius,
            stroke_color: settings.center_circle_stroke_color.clone(),
            stroke_width: settings.center_circle_stroke_width,
            text: center_text,
        },
        legend,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn items() -> Vec<DataItem> {
        vec![
            DataItem::new("a", "Alpha", 10.0, 180.0, 100.0, "#ff0000"),
            DataItem::new("b", "Beta", 20.0, 180.0, 50.0, "#00ff00"),
        ]
    }

    #[test]
    fn text_length_uses_proportional_widths() {
        // 'i' is narrow, 'W' is wide
        assert!(text_length("W") > text_length("i"));
        assert_eq!(text_length("A"), 102);
        assert_eq!(text_length("中"), WIDE_CHAR);
    }

    #[test]
    fn text_width_scales_with_font_size() {
        let w12 = text_width("Hello", 12.0);
        let w24 = text_width("Hello", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 1e-9);
    }

    #[test]
    fn label_text_with_and_without_value() {
        let item = DataItem::new("a", "Alpha", 95.0, 10.0, 10.0, "red");
        assert_eq!(label_text(&item, true), "Alpha 95");
        assert_eq!(label_text(&item, false), "Alpha");
    }

    #[test]
    fn layout_places_label_offset_on_top_of_anchor() {
        let mut items = items();
        items[1].label_x = Some(5.0);
        items[1].label_y = Some(-7.0);
        let layout = layout(&items, &ChartSettings::default());
        let slice = &layout.slices[1];
        assert_eq!(slice.label_position, slice.label_anchor + dvec2(5.0, -7.0));
        assert_eq!(slice.label_bounds.center(), slice.label_position);
    }

    #[test]
    fn empty_layout() {
        let layout = layout(&[], &ChartSettings::default());
        assert!(layout.is_empty());
        assert_eq!(layout.total_angle, 0.0);
        let scene = scene_from_layout(&layout, &ChartSettings::default(), &RenderOptions::default());
        assert!(scene.is_empty());
        assert!(scene.legend.is_empty());
    }

    #[test]
    fn handles_only_for_hovered_item() {
        let options = RenderOptions {
            hovered: Some(ItemId::from("b")),
        };
        let scene = render(&items(), &ChartSettings::default(), &options);
        assert_eq!(scene.handles.len(), 2);
        assert!(scene.handles.iter().all(|h| h.id.as_str() == "b"));

        let scene = render(&items(), &ChartSettings::default(), &RenderOptions::default());
        assert!(scene.handles.is_empty());
    }

    #[test]
    fn gap_adds_white_stroke() {
        let settings = ChartSettings {
            gap_enabled: true,
            ..ChartSettings::default()
        };
        let scene = render(&items(), &settings, &RenderOptions::default());
        let stroke = scene.wedges[0].stroke.as_ref().unwrap();
        assert_eq!(stroke.color, "white");
        assert_eq!(stroke.width, 2.0);

        let scene = render(&items(), &ChartSettings::default(), &RenderOptions::default());
        assert!(scene.wedges[0].stroke.is_none());
    }

    #[test]
    fn label_color_overrides_chart_default() {
        let mut items = items();
        items[0].label_color = Some("#123456".into());
        let scene = render(&items, &ChartSettings::default(), &RenderOptions::default());
        assert_eq!(scene.labels[0].color, "#123456");
        assert_eq!(scene.labels[1].color, defaults::TEXT_COLOR);
    }

    #[test]
    fn center_text_only_when_set() {
        let scene = render(&items(), &ChartSettings::default(), &RenderOptions::default());
        assert!(scene.center.text.is_none());

        let settings = ChartSettings {
            center_text: "2024".into(),
            ..ChartSettings::default()
        };
        let scene = render(&items(), &settings, &RenderOptions::default());
        let text = scene.center.text.unwrap();
        assert_eq!(text.text, "2024");
        assert_eq!(text.font_size, 14.0);
        assert_eq!(scene.center.radius, 50.0);
    }

    #[test]
    fn scene_carries_advisory() {
        let mut items = items();
        items[1].angle = 90.0;
        let scene = render(&items, &ChartSettings::default(), &RenderOptions::default());
        assert_eq!(scene.advisory.unwrap().total, 270.0);
    }

    #[test]
    fn legend_lists_items_in_order() {
        let scene = render(&items(), &ChartSettings::default(), &RenderOptions::default());
        assert_eq!(scene.legend[0].text, "Alpha: 10 (180°, R100)");
        assert_eq!(scene.legend[1].color, "#00ff00");
    }
}
