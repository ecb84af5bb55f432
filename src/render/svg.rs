//! SVG generation

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{
    Circle, FontWeight, Group, Line, Path, SVG_NS, Svg, SvgNode, Text, TextStyle, facet_xml,
};

use crate::errors::RenderError;

use super::defaults;
use super::geometry::{fmt_num, round3};
use super::types::*;

fn label_style(font_size: f64, bold: bool) -> String {
    TextStyle::new(font_size, defaults::FONT_FAMILY, FontWeight::from_bold(bold)).to_string()
}

fn wedge_group(wedge: &WedgeNode, label: Option<&LabelNode>) -> SvgNode {
    let mut children = vec![SvgNode::Path(Path {
        id: Some(format!("wedge-{}", wedge.id)),
        d: Some(wedge.d.clone()),
        fill: Some(wedge.fill.clone()),
        stroke: Some(
            wedge
                .stroke
                .as_ref()
                .map_or_else(|| "none".to_string(), |s| s.color.clone()),
        ),
        stroke_width: Some(wedge.stroke.as_ref().map_or(0.0, |s| s.width)),
        opacity: Some(wedge.opacity),
    })];

    if let Some(label) = label {
        children.push(SvgNode::Text(Text {
            x: Some(round3(label.position.x)),
            y: Some(round3(label.position.y)),
            fill: Some(label.color.clone()),
            style: Some(label_style(label.font_size, label.bold)),
            text_anchor: Some("middle".to_string()),
            dominant_baseline: Some("middle".to_string()),
            content: label.text.clone(),
        }));
    }

    SvgNode::G(Group {
        id: Some(format!("item-{}", wedge.id)),
        class: Some("wedge".to_string()),
        children,
    })
}

fn handle_nodes(handle: &HandleNode, center: &CenterNode) -> [SvgNode; 2] {
    let class = match handle.kind {
        HandleKind::Radius => "handle handle-radius",
        HandleKind::Angle => "handle handle-angle",
    };
    [
        SvgNode::Line(Line {
            x1: Some(round3(center.position.x)),
            y1: Some(round3(center.position.y)),
            x2: Some(round3(handle.position.x)),
            y2: Some(round3(handle.position.y)),
            class: Some("handle-guide".to_string()),
            stroke: Some(defaults::HANDLE_STROKE.to_string()),
            stroke_width: Some(1.0),
            stroke_dasharray: Some("4,4".to_string()),
        }),
        SvgNode::Circle(Circle {
            cx: Some(round3(handle.position.x)),
            cy: Some(round3(handle.position.y)),
            r: Some(defaults::HANDLE_RADIUS),
            class: Some(class.to_string()),
            fill: Some(defaults::HANDLE_FILL.to_string()),
            stroke: Some(defaults::HANDLE_STROKE.to_string()),
            stroke_width: Some(1.5),
        }),
    ]
}

/// Build the SVG document for a scene.
///
/// Wedges are drawn in list order with their labels, then the centre circle
/// and caption on top, then any visible handles.
pub fn to_document(scene: &Scene) -> Svg {
    let mut children = Vec::with_capacity(scene.wedges.len() + scene.handles.len() * 2 + 2);

    for wedge in &scene.wedges {
        let label = scene.labels.iter().find(|l| l.id == wedge.id);
        children.push(wedge_group(wedge, label));
    }

    let center = &scene.center;
    children.push(SvgNode::Circle(Circle {
        cx: Some(round3(center.position.x)),
        cy: Some(round3(center.position.y)),
        r: Some(round3(center.radius)),
        class: Some("center".to_string()),
        fill: Some(defaults::CENTER_FILL.to_string()),
        stroke: Some(center.stroke_color.clone()),
        stroke_width: Some(center.stroke_width),
    }));

    if let Some(ref text) = center.text {
        children.push(SvgNode::Text(Text {
            x: Some(round3(center.position.x)),
            y: Some(round3(center.position.y)),
            fill: Some(text.color.clone()),
            style: Some(label_style(text.font_size, text.bold)),
            text_anchor: Some("middle".to_string()),
            dominant_baseline: Some("middle".to_string()),
            content: text.text.clone(),
        }));
    }

    for handle in &scene.handles {
        children.extend(handle_nodes(handle, center));
    }

    let size = fmt_num(scene.size);
    Svg {
        xmlns: Some(SVG_NS.to_string()),
        id: Some("rose-chart-svg".to_string()),
        width: Some(size.clone()),
        height: Some(size.clone()),
        view_box: Some(format!("0 0 {size} {size}")),
        children,
    }
}

/// Serialize a scene to an SVG string.
pub fn to_svg(scene: &Scene) -> Result<String, RenderError> {
    fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
        write!(writer, "{}", fmt_num(value))
    }

    let document = to_document(scene);
    let options = SerializeOptions {
        float_formatter: Some(format_float),
        ..Default::default()
    };
    facet_xml::to_string_with_options(&document, &options).map_err(|e| RenderError::Serialize {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChartSettings, DataItem, ItemId};
    use crate::render::render;

    fn scene(options: &RenderOptions) -> Scene {
        let items = vec![
            DataItem::new("a", "Alpha", 10.0, 120.0, 100.0, "#ff0000"),
            DataItem::new("b", "Beta", 20.0, 240.0, 50.0, "#00ff00"),
        ];
        let settings = ChartSettings {
            center_text: "Total".into(),
            ..ChartSettings::default()
        };
        render(&items, &settings, options)
    }

    #[test]
    fn document_has_group_per_item_then_center() {
        let doc = to_document(&scene(&RenderOptions::default()));
        assert_eq!(doc.width.as_deref(), Some("650"));
        assert_eq!(doc.view_box.as_deref(), Some("0 0 650 650"));
        assert_eq!(doc.children.len(), 4);
        match &doc.children[0] {
            SvgNode::G(g) => {
                assert_eq!(g.id.as_deref(), Some("item-a"));
                assert_eq!(g.children.len(), 2);
            }
            other => panic!("expected group, got {other:?}"),
        }
        match &doc.children[2] {
            SvgNode::Circle(c) => {
                assert_eq!(c.r, Some(50.0));
                assert_eq!(c.stroke.as_deref(), Some("#3b82f6"));
            }
            other => panic!("expected center circle, got {other:?}"),
        }
        match &doc.children[3] {
            SvgNode::Text(t) => assert_eq!(t.content, "Total"),
            other => panic!("expected center text, got {other:?}"),
        }
    }

    #[test]
    fn wedge_without_gap_has_no_stroke() {
        let doc = to_document(&scene(&RenderOptions::default()));
        let SvgNode::G(g) = &doc.children[1] else {
            panic!("expected group");
        };
        let SvgNode::Path(p) = &g.children[0] else {
            panic!("expected path");
        };
        assert_eq!(p.stroke.as_deref(), Some("none"));
        assert_eq!(p.stroke_width, Some(0.0));
        assert_eq!(p.opacity, Some(0.9));
        assert!(p.d.as_deref().unwrap().starts_with("M "));
    }

    #[test]
    fn label_style_carries_font() {
        let doc = to_document(&scene(&RenderOptions::default()));
        let SvgNode::G(g) = &doc.children[0] else {
            panic!("expected group");
        };
        let SvgNode::Text(t) = &g.children[1] else {
            panic!("expected text");
        };
        let style = TextStyle::parse(t.style.as_deref().unwrap()).unwrap();
        assert_eq!(style.font_size, Some(12.0));
        assert_eq!(style.font_weight, Some(FontWeight::Bold));
        assert_eq!(t.content, "Alpha 10");
    }

    #[test]
    fn hovered_item_adds_handles_last() {
        let options = RenderOptions {
            hovered: Some(ItemId::from("a")),
        };
        let doc = to_document(&scene(&options));
        assert_eq!(doc.children.len(), 8);
        assert!(matches!(doc.children[7], SvgNode::Circle(_)));
    }
}
