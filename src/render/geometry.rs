//! Polar geometry: angle sweep, radius scaling and wedge paths.
//!
//! Everything here is a pure function of the item list and the settings.
//! Callers recompute on every data change; nothing is cached.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::model::{ChartSettings, DataItem};
use crate::types::Degrees;

use super::defaults;

/// Start angle of every item from a cumulative sweep beginning at 0°, plus
/// the total of all angles.
pub fn sweep(items: &[DataItem]) -> (Vec<Degrees>, f64) {
    let mut starts = Vec::with_capacity(items.len());
    let mut acc = 0.0;
    for item in items {
        starts.push(Degrees(acc));
        acc += item.angle;
    }
    (starts, acc)
}

/// Largest effective radius in the set; 1 when nothing is positive.
pub fn max_effective_radius(items: &[DataItem]) -> f64 {
    let max = items
        .iter()
        .map(DataItem::effective_radius)
        .fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

/// Clamp the configured inner radius to `[0, max_radius - MIN_RING_WIDTH]`.
pub fn clamp_inner_radius(inner: f64, max_radius: f64) -> f64 {
    let upper = (max_radius - defaults::MIN_RING_WIDTH).max(0.0);
    if inner.is_finite() {
        inner.clamp(0.0, upper)
    } else {
        0.0
    }
}

/// Point at `radius` from `center` along `angle`.
#[inline]
pub fn polar(center: DVec2, radius: f64, angle: Degrees) -> DVec2 {
    let rad = angle.to_screen_radians();
    center + dvec2(rad.cos(), rad.sin()) * radius
}

/// Angle of `point` around `center`, clockwise from 12 o'clock, in `[0, 360)`.
#[inline]
pub fn pointer_angle(center: DVec2, point: DVec2) -> Degrees {
    let d = point - center;
    Degrees::from_screen_radians(d.y.atan2(d.x)).normalized()
}

/// Chart-wide scaling parameters shared by every wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub center: DVec2,
    pub max_radius: f64,
    /// Already clamped.
    pub inner_radius: f64,
    /// Normalisation denominator shared by all wedges.
    pub max_effective_radius: f64,
}

impl ChartFrame {
    pub fn new(settings: &ChartSettings, items: &[DataItem]) -> Self {
        let max_radius = defaults::max_radius();
        Self {
            center: DVec2::splat(defaults::CANVAS_SIZE / 2.0),
            max_radius,
            inner_radius: clamp_inner_radius(settings.inner_radius, max_radius),
            max_effective_radius: max_effective_radius(items),
        }
    }

    fn span(&self) -> f64 {
        self.max_radius - self.inner_radius
    }

    /// Outer pixel radius for an effective radius, scaled against the largest item.
    pub fn outer_radius(&self, effective_radius: f64) -> f64 {
        self.inner_radius + (effective_radius / self.max_effective_radius) * self.span()
    }

    /// Clamp a pointer distance to the draggable band `[inner + 1, max_radius]`.
    pub fn clamp_distance(&self, distance: f64) -> f64 {
        distance.clamp(self.inner_radius + 1.0, self.max_radius)
    }

    /// Inverse of `outer_radius` after clamping: the effective radius that
    /// renders at `distance`.
    pub fn effective_radius_at(&self, distance: f64) -> f64 {
        let outer = self.clamp_distance(distance);
        ((outer - self.inner_radius) / self.span()) * self.max_effective_radius
    }

    pub fn wedge_path(&self, start: Degrees, width: Degrees, effective_radius: f64) -> WedgePath {
        let end = start + width;
        let outer = self.outer_radius(effective_radius);
        let inner = self.inner_radius;
        WedgePath {
            inner_start: polar(self.center, inner, start),
            outer_start: polar(self.center, outer, start),
            outer_end: polar(self.center, outer, end),
            inner_end: polar(self.center, inner, end),
            outer_radius: outer,
            inner_radius: inner,
            large_arc: width.raw() > 180.0,
        }
    }

    /// Mid-angle of a wedge.
    pub fn mid_angle(start: Degrees, width: Degrees) -> Degrees {
        Degrees(start.raw() + width.raw() / 2.0)
    }

    /// Default label position: `LABEL_DISTANCE` past the outer edge on the mid-angle ray.
    pub fn label_anchor(&self, start: Degrees, width: Degrees, effective_radius: f64) -> DVec2 {
        let radius = self.outer_radius(effective_radius) + defaults::LABEL_DISTANCE;
        polar(self.center, radius, Self::mid_angle(start, width))
    }

    /// Radius handle: on the outer edge, mid-angle ray.
    pub fn radius_handle(&self, start: Degrees, width: Degrees, effective_radius: f64) -> DVec2 {
        polar(
            self.center,
            self.outer_radius(effective_radius),
            Self::mid_angle(start, width),
        )
    }

    /// Angle handle: on the outer edge, end-angle ray.
    pub fn angle_handle(&self, start: Degrees, width: Degrees, effective_radius: f64) -> DVec2 {
        polar(self.center, self.outer_radius(effective_radius), start + width)
    }
}

/// Closed donut-slice outline.
///
/// The outer arc sweeps clockwise (sweep flag 1) and the inner arc returns
/// counter-clockwise (sweep flag 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgePath {
    pub inner_start: DVec2,
    pub outer_start: DVec2,
    pub outer_end: DVec2,
    pub inner_end: DVec2,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub large_arc: bool,
}

impl WedgePath {
    pub fn large_arc_flag(&self) -> u8 {
        u8::from(self.large_arc)
    }
}

impl fmt::Display for WedgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = self.large_arc_flag();
        let ro = fmt_num(self.outer_radius);
        let ri = fmt_num(self.inner_radius);
        write!(
            f,
            "M {} L {} A {ro} {ro} 0 {flag} 1 {} L {} A {ri} {ri} 0 {flag} 0 {} Z",
            fmt_point(self.inner_start),
            fmt_point(self.outer_start),
            fmt_point(self.outer_end),
            fmt_point(self.inner_end),
            fmt_point(self.inner_start),
        )
    }
}

fn fmt_point(p: DVec2) -> String {
    format!("{} {}", fmt_num(p.x), fmt_num(p.y))
}

/// Format a coordinate with at most 3 decimals, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = round3(value);
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Round to 3 decimals, folding `-0` into `0`.
pub(crate) fn round3(value: f64) -> f64 {
    let r = (value * 1000.0).round() / 1000.0;
    if r == 0.0 { 0.0 } else { r }
}
