//! Facet-derived types for SVG serialization.
//!
//! This crate provides the strongly-typed subset of SVG elements that a rose
//! chart needs: groups, paths, circles, lines and text. Documents are built as
//! plain structs and written out with `facet-xml`.
//!
//! # Example
//!
//! ```rust
//! use facet_svg::{Circle, Svg, SvgNode};
//!
//! let svg = Svg {
//!     xmlns: Some(facet_svg::SVG_NS.to_string()),
//!     width: Some("100".to_string()),
//!     height: Some("100".to_string()),
//!     children: vec![SvgNode::Circle(Circle {
//!         cx: Some(50.0),
//!         cy: Some(50.0),
//!         r: Some(10.0),
//!         ..Default::default()
//!     })],
//!     ..Default::default()
//! };
//! let xml = facet_svg::facet_xml::to_string(&svg).unwrap();
//! assert!(xml.contains("circle"));
//! ```

use facet::Facet;
use facet_xml as xml;

mod style;

pub use style::{FontWeight, StyleParseError, TextStyle};

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root SVG element
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Svg {
    #[facet(xml::attribute)]
    pub xmlns: Option<String>,
    #[facet(xml::attribute)]
    pub id: Option<String>,
    #[facet(xml::attribute)]
    pub width: Option<String>,
    #[facet(xml::attribute)]
    pub height: Option<String>,
    #[facet(xml::attribute, rename = "viewBox")]
    pub view_box: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// Any SVG node a chart emits
#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
pub enum SvgNode {
    #[facet(rename = "g")]
    G(Group),
    #[facet(rename = "circle")]
    Circle(Circle),
    #[facet(rename = "line")]
    Line(Line),
    #[facet(rename = "path")]
    Path(Path),
    #[facet(rename = "text")]
    Text(Text),
}

/// SVG group element (`<g>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Group {
    #[facet(xml::attribute)]
    pub id: Option<String>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// SVG circle element (`<circle>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Circle {
    #[facet(xml::attribute)]
    pub cx: Option<f64>,
    #[facet(xml::attribute)]
    pub cy: Option<f64>,
    #[facet(xml::attribute)]
    pub r: Option<f64>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
}

/// SVG line element (`<line>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Line {
    #[facet(xml::attribute)]
    pub x1: Option<f64>,
    #[facet(xml::attribute)]
    pub y1: Option<f64>,
    #[facet(xml::attribute)]
    pub x2: Option<f64>,
    #[facet(xml::attribute)]
    pub y2: Option<f64>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
    #[facet(xml::attribute, rename = "stroke-dasharray")]
    pub stroke_dasharray: Option<String>,
}

/// SVG path element (`<path>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Path {
    #[facet(xml::attribute)]
    pub id: Option<String>,
    #[facet(xml::attribute)]
    pub d: Option<String>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    pub stroke_width: Option<f64>,
    #[facet(xml::attribute)]
    pub opacity: Option<f64>,
}

/// SVG text element (`<text>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Text {
    #[facet(xml::attribute)]
    pub x: Option<f64>,
    #[facet(xml::attribute)]
    pub y: Option<f64>,
    #[facet(xml::attribute)]
    pub fill: Option<String>,
    #[facet(xml::attribute)]
    pub style: Option<String>,
    #[facet(xml::attribute, rename = "text-anchor")]
    pub text_anchor: Option<String>,
    #[facet(xml::attribute, rename = "dominant-baseline")]
    pub dominant_baseline: Option<String>,
    #[facet(xml::text)]
    pub content: String,
}

/// Fill and stroke accessors shared by the shape elements
pub trait PresentationAttrs {
    fn fill(&self) -> Option<&str>;
    fn stroke(&self) -> Option<&str>;
}

macro_rules! impl_presentation_attrs {
    ($($ty:ty),*) => {
        $(
            impl PresentationAttrs for $ty {
                fn fill(&self) -> Option<&str> { self.fill.as_deref() }
                fn stroke(&self) -> Option<&str> { self.stroke.as_deref() }
            }
        )*
    };
}

impl_presentation_attrs!(Circle, Path);

impl PresentationAttrs for Text {
    fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }
    fn stroke(&self) -> Option<&str> {
        None
    }
}

impl PresentationAttrs for Line {
    fn fill(&self) -> Option<&str> {
        None
    }
    fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }
}

// Re-export facet_xml for convenience
pub use facet_xml;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_attrs_by_element() {
        let path = Path {
            fill: Some("red".into()),
            stroke: Some("white".into()),
            ..Default::default()
        };
        assert_eq!(path.fill(), Some("red"));
        assert_eq!(path.stroke(), Some("white"));

        let line = Line {
            stroke: Some("black".into()),
            ..Default::default()
        };
        assert_eq!(line.fill(), None);
        assert_eq!(line.stroke(), Some("black"));

        let text = Text {
            fill: Some("#334155".into()),
            content: "hi".into(),
            ..Default::default()
        };
        assert_eq!(text.fill(), Some("#334155"));
        assert_eq!(text.stroke(), None);
    }

    #[test]
    fn group_serializes_children() {
        let svg = Svg {
            children: vec![SvgNode::G(Group {
                id: Some("item-a".into()),
                class: None,
                children: vec![SvgNode::Path(Path {
                    d: Some("M 0 0 Z".into()),
                    ..Default::default()
                })],
            })],
            ..Default::default()
        };
        let xml = facet_xml::to_string(&svg).unwrap();
        assert!(xml.contains("item-a"));
        assert!(xml.contains("M 0 0 Z"));
    }
}
