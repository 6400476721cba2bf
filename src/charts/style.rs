//! Chart Style Module
//! Colors, the heatmap color ramp, and layout helpers shared by the renderer.

use plotters::style::RGBColor;

pub const LINE_COLOR: RGBColor = RGBColor(31, 119, 180); // Blue
pub const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Pie wedge colors, cycled.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Grey
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

// Viridis stops, low to high
const HEAT_STOPS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Map `value` within `[min, max]` onto the viridis ramp.
pub fn heat_color(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    let scaled = t * (HEAT_STOPS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(HEAT_STOPS.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (HEAT_STOPS[lower], HEAT_STOPS[lower + 1]);

    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Label for a tick on a categorical axis where category `i` spans `[i, i + 1)`.
/// Only ticks at a category's center get text.
pub fn category_label(labels: &[String], value: f64) -> String {
    let offset = value - 0.5;
    let index = offset.round();
    if (offset - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Tick-count hint that lands a tick on every category center (step 0.5).
pub fn category_ticks(count: usize) -> usize {
    count.max(1) * 2 + 1
}

/// Wedge spans in degrees, counter-clockwise from `start_angle`.
pub fn wedge_angles(values: &[f64], start_angle: f64) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = start_angle;
    values
        .iter()
        .map(|v| {
            let sweep = v / total * 360.0;
            let span = (angle, angle + sweep);
            angle += sweep;
            span
        })
        .collect()
}

/// Pixel position at `radius` and `angle_deg` (counter-clockwise, screen y down).
pub fn polar_point(center: (i32, i32), radius: f64, angle_deg: f64) -> (i32, i32) {
    let rad = angle_deg.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_hits_ramp_ends() {
        assert_eq!(heat_color(-50.0, -50.0, 150.0), RGBColor(68, 1, 84));
        assert_eq!(heat_color(150.0, -50.0, 150.0), RGBColor(253, 231, 37));
        assert_eq!(heat_color(50.0, -50.0, 150.0), RGBColor(33, 145, 140));
        // Out of range clamps
        assert_eq!(heat_color(1e9, 0.0, 1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn heat_color_flat_range_is_mid_ramp() {
        assert_eq!(heat_color(3.0, 3.0, 3.0), RGBColor(33, 145, 140));
    }

    #[test]
    fn category_label_only_at_centers() {
        let labels = vec!["Central".to_string(), "East".to_string()];
        assert_eq!(category_label(&labels, 0.5), "Central");
        assert_eq!(category_label(&labels, 1.5), "East");
        assert_eq!(category_label(&labels, 1.0), "");
        assert_eq!(category_label(&labels, 2.5), "");
        assert_eq!(category_label(&labels, -0.5), "");
        assert_eq!(category_ticks(2), 5);
        assert_eq!(category_ticks(0), 3);
    }

    #[test]
    fn wedges_start_at_ninety_and_cover_circle() {
        let wedges = wedge_angles(&[50.0, 30.0, 20.0], 90.0);
        assert_eq!(wedges.len(), 3);
        assert_eq!(wedges[0], (90.0, 270.0));
        assert!((wedges[1].1 - 378.0).abs() < 1e-9);
        assert!((wedges[2].1 - 450.0).abs() < 1e-9);
        assert!(wedge_angles(&[0.0, 0.0], 90.0).is_empty());
    }

    #[test]
    fn polar_point_is_counter_clockwise() {
        assert_eq!(polar_point((100, 100), 10.0, 0.0), (110, 100));
        assert_eq!(polar_point((100, 100), 10.0, 90.0), (100, 90));
        assert_eq!(polar_point((100, 100), 10.0, 180.0), (90, 100));
    }
}
