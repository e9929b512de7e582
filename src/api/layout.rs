//! Tight layout: fits the plot area around title, tick labels and axis labels.
//!
//! Text extents are estimated from the font size since the chart is laid out
//! before any backend measures glyphs. The configured font is monospace, so a
//! fixed advance per character is close to what Pango reports.

use crate::api::ChartConfig;
use crate::core::{PlotArea, Viewport};
use crate::error::{PlotError, PlotResult};

const CHAR_ADVANCE_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.2;
const OUTER_PAD_PX: f64 = 8.0;
const LABEL_PAD_PX: f64 = 4.0;

pub const TICK_LENGTH_PX: f64 = 3.5;
pub const MINOR_TICK_LENGTH_PX: f64 = 2.0;
pub const TICK_PAD_PX: f64 = 3.5;

#[must_use]
pub fn text_width_px(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * CHAR_ADVANCE_RATIO
}

#[must_use]
pub fn text_height_px(font_size_px: f64) -> f64 {
    font_size_px * LINE_HEIGHT_RATIO
}

fn max_text_width(labels: &[String], font_size_px: f64) -> f64 {
    labels
        .iter()
        .map(|label| text_width_px(label, font_size_px))
        .fold(0.0, f64::max)
}

fn optional_text_height(text: &str, font_size_px: f64) -> f64 {
    if text.trim().is_empty() {
        0.0
    } else {
        text_height_px(font_size_px)
    }
}

/// Space reserved above and below the plot area.
///
/// Depends only on the title and x tick labels, so it can be resolved before
/// the y ticks, whose density depends on the plot height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMargins {
    pub top: f64,
    pub bottom: f64,
    x_tick_extent: f64,
}

impl VerticalMargins {
    #[must_use]
    pub fn compute(config: &ChartConfig, x_tick_labels: &[String]) -> Self {
        let title_height = optional_text_height(&config.title, config.title_font_size_px);
        let top = if title_height > 0.0 {
            OUTER_PAD_PX + title_height + LABEL_PAD_PX * 2.0
        } else {
            OUTER_PAD_PX * 2.0
        };

        let x_tick_extent = if x_tick_labels.is_empty() {
            0.0
        } else if config.rotate_x_tick_labels {
            max_text_width(x_tick_labels, config.tick_font_size_px)
        } else {
            text_height_px(config.tick_font_size_px)
        };
        let x_label_height = optional_text_height(&config.x_label, config.label_font_size_px);
        let bottom = TICK_LENGTH_PX
            + TICK_PAD_PX
            + x_tick_extent
            + LABEL_PAD_PX
            + x_label_height
            + OUTER_PAD_PX;

        Self {
            top,
            bottom,
            x_tick_extent,
        }
    }

    /// Plot height left for a viewport, possibly non-positive.
    #[must_use]
    pub fn plot_height(self, viewport: Viewport) -> f64 {
        f64::from(viewport.height) - self.top - self.bottom
    }
}

/// Resolved positions of the plot area and every text block around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot_area: PlotArea,
    /// Top edge of the title, centered over the plot area.
    pub title_y: f64,
    /// Top edge of the x tick labels.
    pub x_tick_label_y: f64,
    /// Top edge of the x axis label.
    pub x_label_y: f64,
    /// Right edge of the y tick labels.
    pub y_tick_label_x: f64,
    /// Left edge of the rotated y axis label.
    pub y_label_x: f64,
}

impl ChartLayout {
    pub fn compute(
        viewport: Viewport,
        config: &ChartConfig,
        vertical: VerticalMargins,
        x_tick_labels: &[String],
        y_tick_labels: &[String],
    ) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let y_label_height = optional_text_height(&config.y_label, config.label_font_size_px);
        let y_tick_extent = max_text_width(y_tick_labels, config.tick_font_size_px);
        let left = OUTER_PAD_PX
            + y_label_height
            + LABEL_PAD_PX
            + y_tick_extent
            + TICK_PAD_PX
            + TICK_LENGTH_PX;

        // Unrotated x labels are centered on their tick and overhang the right edge.
        let overhang = match x_tick_labels.last() {
            Some(label) if !config.rotate_x_tick_labels => {
                text_width_px(label, config.tick_font_size_px) / 2.0
            }
            _ => 0.0,
        };
        let right = OUTER_PAD_PX * 2.0 + overhang;

        let plot_area = PlotArea::new(
            left,
            vertical.top,
            f64::from(viewport.width) - left - right,
            vertical.plot_height(viewport),
        );
        if !plot_area.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let x_tick_label_y = plot_area.bottom() + TICK_LENGTH_PX + TICK_PAD_PX;
        Ok(Self {
            plot_area,
            title_y: OUTER_PAD_PX,
            x_tick_label_y,
            x_label_y: x_tick_label_y + vertical.x_tick_extent + LABEL_PAD_PX,
            y_tick_label_x: plot_area.left - TICK_LENGTH_PX - TICK_PAD_PX,
            y_label_x: OUTER_PAD_PX,
        })
    }
}
