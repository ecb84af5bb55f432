//! Fixed sizes and settings for the rose chart (all in pixels unless noted)

/// Side of the square canvas.
pub const CANVAS_SIZE: f64 = 650.0;
/// Space between the largest wedge and the canvas edge, reserved for labels.
pub const CHART_MARGIN: f64 = 80.0;
/// Minimum ring width left between the centre hole and the outer edge.
pub const MIN_RING_WIDTH: f64 = 10.0;
/// Added to every stored radius so tiny wedges stay visible (user units).
pub const RADIUS_PADDING: f64 = 8.0;
/// Distance from a wedge's outer edge to its default label anchor.
pub const LABEL_DISTANCE: f64 = 30.0;

pub const INNER_RADIUS: f64 = 50.0;
pub const FONT_SIZE: f64 = 12.0;
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 64.0;
pub const CENTER_FONT_SIZE: f64 = 14.0;
pub const FONT_FAMILY: &str = "仿宋_GB2312, FangSong, STFangSong, serif";
pub const TEXT_COLOR: &str = "#334155";

pub const WEDGE_OPACITY: f64 = 0.9;
pub const GAP_STROKE_COLOR: &str = "white";
pub const GAP_STROKE_WIDTH: f64 = 2.0;
pub const CENTER_FILL: &str = "white";

pub const HANDLE_RADIUS: f64 = 6.0;
/// Pointer tolerance around a handle.
pub const HANDLE_HIT_RADIUS: f64 = 10.0;
pub const HANDLE_FILL: &str = "white";
pub const HANDLE_STROKE: &str = "#0f172a";
/// Pointer tolerance around a label's text box.
pub const LABEL_HIT_PADDING: f64 = 2.0;
/// Gap between a label and the quick-edit toolbar above it.
pub const TOOLBAR_OFFSET: f64 = 28.0;

/// Allowed deviation of the angle total from 360° before warning.
pub const ANGLE_TOLERANCE: f64 = 0.1;
pub const MIN_DRAG_ANGLE: f64 = 1.0;
pub const MAX_DRAG_ANGLE: f64 = 360.0;
/// Decimal places kept for dragged radius and angle values.
pub const DRAG_PRECISION: i32 = 2;

pub const NEW_ITEM_RADIUS: f64 = 100.0;
pub const NEW_ITEM_VALUE: f64 = 50.0;
pub const NEW_ITEM_ANGLE: f64 = 20.0;

/// Largest outer radius a wedge can reach.
pub const fn max_radius() -> f64 {
    CANVAS_SIZE / 2.0 - CHART_MARGIN
}
