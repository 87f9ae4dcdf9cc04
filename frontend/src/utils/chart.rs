//! Pie and doughnut geometry for the SVG charts.

use std::f64::consts::{FRAC_PI_2, TAU};

pub const CATEGORY_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

pub const SYNC_IMPORTED_COLOR: &str = "#10b981";
pub const SYNC_UPDATED_COLOR: &str = "#3b82f6";
pub const SYNC_SKIPPED_COLOR: &str = "#f59e0b";
pub const SYNC_ERRORS_COLOR: &str = "#ef4444";

// A full 2π arc has coincident endpoints and SVG draws nothing.
const MAX_SWEEP: f64 = TAU - 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartItem {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl ChartItem {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

/// Colours `values` from the category palette, cycling after six.
pub fn with_palette(values: Vec<(String, f64)>) -> Vec<ChartItem> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            ChartItem::new(label, value, CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()])
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub value: f64,
    pub color: String,
    pub percentage: f64,
    pub path: String,
}

impl Segment {
    /// Tooltip text, e.g. `electronics: 6 (60.0%)`.
    pub fn tooltip(&self) -> String {
        format!(
            "{}: {} ({:.1}%)",
            self.label,
            format_value(self.value),
            self.percentage
        )
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub cx: f64,
    pub cy: f64,
    pub outer_radius: f64,
    /// Zero draws a pie, anything larger a doughnut.
    pub inner_radius: f64,
}

impl Geometry {
    pub fn pie(size: f64) -> Self {
        let r = size / 2.0;
        Self {
            cx: r,
            cy: r,
            outer_radius: r,
            inner_radius: 0.0,
        }
    }

    pub fn doughnut(size: f64) -> Self {
        Self {
            inner_radius: size / 4.0,
            ..Self::pie(size)
        }
    }

    fn point(&self, radius: f64, angle: f64) -> (f64, f64) {
        (
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        )
    }

    fn arc_path(&self, start: f64, sweep: f64) -> String {
        let sweep = sweep.min(MAX_SWEEP);
        let end = start + sweep;
        let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
        let (ox1, oy1) = self.point(self.outer_radius, start);
        let (ox2, oy2) = self.point(self.outer_radius, end);
        let r = self.outer_radius;
        if self.inner_radius <= 0.0 {
            return format!(
                "M {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} Z",
                self.cx, self.cy, ox1, oy1, r, r, large, ox2, oy2
            );
        }
        let ir = self.inner_radius;
        let (ix2, iy2) = self.point(ir, end);
        let (ix1, iy1) = self.point(ir, start);
        format!(
            "M {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 0 {:.3} {:.3} Z",
            ox1, oy1, r, r, large, ox2, oy2, ix2, iy2, ir, ir, large, ix1, iy1
        )
    }
}

/// Segments clockwise from twelve o'clock; non-positive values are omitted.
pub fn segments(items: &[ChartItem], geometry: Geometry) -> Vec<Segment> {
    let visible: Vec<&ChartItem> = items
        .iter()
        .filter(|item| item.value.is_finite() && item.value > 0.0)
        .collect();
    let total: f64 = visible.iter().map(|item| item.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = -FRAC_PI_2;
    visible
        .into_iter()
        .map(|item| {
            let fraction = item.value / total;
            let sweep = fraction * TAU;
            let path = geometry.arc_path(angle, sweep);
            angle += sweep;
            Segment {
                label: item.label.clone(),
                value: item.value,
                color: item.color.clone(),
                percentage: fraction * 100.0,
                path,
            }
        })
        .collect()
}
