use crate::api::SeriesStyle;
use crate::api::layout::{text_height_px, text_width_px};
use crate::core::{PixelPoint, PlotArea};
use crate::render::{
    CanvasLayerKind, Color, PolylinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive, TextVAlign,
};

const BORDER_OFFSET_PX: f64 = 7.0;
const PAD_RATIO: f64 = 0.4;
const HANDLE_LENGTH_RATIO: f64 = 2.0;
const HANDLE_GAP_RATIO: f64 = 0.8;
const ROW_SPACING_RATIO: f64 = 0.5;
const CORNER_RADIUS_PX: f64 = 3.0;

/// Plot-area corner the legend box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl LegendCorner {
    /// Preference order used to break ties.
    pub const ORDER: [LegendCorner; 4] = [
        LegendCorner::UpperRight,
        LegendCorner::UpperLeft,
        LegendCorner::LowerLeft,
        LegendCorner::LowerRight,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendPlacement {
    pub corner: LegendCorner,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LegendPlacement {
    #[must_use]
    pub fn contains(self, point: PixelPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Returns `true` when the segment `a`-`b` touches the box.
    #[must_use]
    pub fn intersects_segment(self, a: PixelPoint, b: PixelPoint) -> bool {
        // Liang-Barsky: clip the parameter range against each edge.
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t_min = 0.0_f64;
        let mut t_max = 1.0_f64;
        for (p, q) in [
            (-dx, a.x - self.x),
            (dx, self.x + self.width - a.x),
            (-dy, a.y - self.y),
            (dy, self.y + self.height - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_min = t_min.max(t);
            } else {
                t_max = t_max.min(t);
            }
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

/// Box size for the given entry labels.
#[must_use]
pub fn legend_size(labels: &[&str], font_size_px: f64) -> (f64, f64) {
    let pad = PAD_RATIO * font_size_px;
    let row_height = text_height_px(font_size_px);
    let label_width = labels
        .iter()
        .map(|label| text_width_px(label, font_size_px))
        .fold(0.0, f64::max);
    let rows = labels.len() as f64;

    let width = pad * 2.0
        + HANDLE_LENGTH_RATIO * font_size_px
        + HANDLE_GAP_RATIO * font_size_px
        + label_width;
    let height = pad * 2.0
        + rows * row_height
        + (rows - 1.0).max(0.0) * ROW_SPACING_RATIO * font_size_px;
    (width, height)
}

fn placement_at(corner: LegendCorner, area: PlotArea, size: (f64, f64)) -> LegendPlacement {
    let (width, height) = size;
    let left = area.left + BORDER_OFFSET_PX;
    let right = area.right() - BORDER_OFFSET_PX - width;
    let top = area.top + BORDER_OFFSET_PX;
    let bottom = area.bottom() - BORDER_OFFSET_PX - height;
    let (x, y) = match corner {
        LegendCorner::UpperRight => (right, top),
        LegendCorner::UpperLeft => (left, top),
        LegendCorner::LowerLeft => (left, bottom),
        LegendCorner::LowerRight => (right, bottom),
    };
    LegendPlacement {
        corner,
        x,
        y,
        width,
        height,
    }
}

/// Anchors the legend in the corner that covers the least of the plotted lines.
///
/// A corner scores one for every vertex inside the box and one for every
/// segment crossing it; ties go to the earlier corner in [`LegendCorner::ORDER`].
#[must_use]
pub fn place_legend(
    area: PlotArea,
    size: (f64, f64),
    runs: &[Vec<PixelPoint>],
) -> LegendPlacement {
    let mut best = placement_at(LegendCorner::ORDER[0], area, size);
    let mut best_badness = usize::MAX;
    for corner in LegendCorner::ORDER {
        let candidate = placement_at(corner, area, size);
        let badness = runs
            .iter()
            .map(|run| {
                let vertices = run.iter().filter(|point| candidate.contains(**point)).count();
                let segments = run
                    .windows(2)
                    .filter(|pair| candidate.intersects_segment(pair[0], pair[1]))
                    .count();
                vertices + segments
            })
            .sum::<usize>();
        if badness < best_badness {
            best = candidate;
            best_badness = badness;
        }
    }
    best
}

/// Appends the legend box, line samples and labels to the legend layer.
pub fn push_legend(
    frame: &mut RenderFrame,
    placement: LegendPlacement,
    entries: &[&SeriesStyle],
    font_size_px: f64,
) {
    frame.push_rect(
        CanvasLayerKind::Legend,
        RectPrimitive::new(
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            Color::WHITE.with_alpha(0.8),
        )
        .with_border(1.0, Color::FRAME_GREY)
        .with_corner_radius(CORNER_RADIUS_PX),
    );

    let pad = PAD_RATIO * font_size_px;
    let row_height = text_height_px(font_size_px);
    let row_step = row_height + ROW_SPACING_RATIO * font_size_px;
    let handle_left = placement.x + pad;
    let handle_right = handle_left + HANDLE_LENGTH_RATIO * font_size_px;
    let label_x = handle_right + HANDLE_GAP_RATIO * font_size_px;

    for (row, style) in entries.iter().enumerate() {
        let center_y = placement.y + pad + row as f64 * row_step + row_height / 2.0;
        frame.push_polyline(
            CanvasLayerKind::Legend,
            PolylinePrimitive::new(
                vec![(handle_left, center_y), (handle_right, center_y)],
                style.stroke_width,
                style.color,
                style.stroke_style,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                style.label.clone(),
                label_x,
                center_y,
                font_size_px,
                Color::BLACK,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Center),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea::new(50.0, 20.0, 400.0, 300.0)
    }

    #[test]
    fn empty_plot_prefers_upper_right() {
        let placement = place_legend(area(), (60.0, 50.0), &[]);
        assert_eq!(placement.corner, LegendCorner::UpperRight);
        assert_eq!(placement.x, 450.0 - 7.0 - 60.0);
        assert_eq!(placement.y, 27.0);
    }

    #[test]
    fn moves_away_from_data() {
        let crowded_top: Vec<PixelPoint> = (0..40)
            .map(|i| PixelPoint::new(50.0 + f64::from(i) * 10.0, 40.0))
            .collect();
        let placement = place_legend(area(), (60.0, 50.0), &[crowded_top]);
        assert_eq!(placement.corner, LegendCorner::LowerLeft);
    }

    #[test]
    fn avoids_corner_crossed_by_sparse_line() {
        // Both vertices lie outside every box; only the segment crosses the
        // upper-right one.
        let line = vec![PixelPoint::new(350.0, 50.0), PixelPoint::new(449.0, 50.0)];
        let placement = place_legend(area(), (60.0, 50.0), &[line]);
        assert_eq!(placement.corner, LegendCorner::UpperLeft);
    }

    #[test]
    fn segment_intersection_checks_box_edges() {
        let placement = LegendPlacement {
            corner: LegendCorner::UpperRight,
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 10.0,
        };
        let p = PixelPoint::new;
        assert!(placement.intersects_segment(p(0.0, 15.0), p(40.0, 15.0)));
        assert!(placement.intersects_segment(p(15.0, 12.0), p(16.0, 13.0)));
        assert!(!placement.intersects_segment(p(0.0, 0.0), p(40.0, 5.0)));
        assert!(!placement.intersects_segment(p(0.0, 15.0), p(5.0, 15.0)));
        assert!(!placement.intersects_segment(p(0.0, 30.0), p(30.0, 21.0)));
    }

    #[test]
    fn size_grows_with_labels() {
        let (w1, h1) = legend_size(&["min"], 12.0);
        let (w3, h3) = legend_size(&["min", "avg", "maximum"], 12.0);
        assert!(w3 > w1);
        assert!(h3 > h1);
    }
}
