use tracing::{debug, warn};

use crate::api::axis_ticks::{
    NiceTicks, arange_ticks, format_tick_label, multiple_ticks, nice_ticks, y_bins_for_span,
};
use crate::api::ChartConfig;
use crate::api::layout::{ChartLayout, MINOR_TICK_LENGTH_PX, TICK_LENGTH_PX, VerticalMargins};
use crate::api::legend::{legend_size, place_legend, push_legend};
use crate::core::{
    LinearScale, MeasurementSet, PixelPoint, SeriesKind, Viewport, nonsingular, project_line_runs,
};
use crate::error::{PlotError, PlotResult};
use crate::render::{
    CanvasLayerKind, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

/// Relative widening applied to a zero-width axis range.
const SINGULAR_EXPANDER: f64 = 0.05;
const GRID_STROKE_PX: f64 = 0.8;
const SPINE_STROKE_PX: f64 = 0.8;

/// Line chart of min/avg/max cycles against instruction count.
///
/// Holds the parsed data and appearance settings; every draw pass derives
/// its geometry from the viewport it is given, so one chart can back both a
/// resizable window and a fixed-size image.
#[derive(Debug, Clone)]
pub struct CycleChart {
    measurements: MeasurementSet,
    config: ChartConfig,
    x_limits: (i64, i64),
}

/// Everything a draw pass needs that depends on the viewport.
#[derive(Debug, Clone)]
struct ChartGeometry {
    layout: ChartLayout,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_major: Vec<i64>,
    x_minor: Vec<i64>,
    x_labels: Vec<String>,
    y_ticks: NiceTicks,
    y_labels: Vec<String>,
}

impl CycleChart {
    pub fn new(measurements: MeasurementSet, config: ChartConfig) -> PlotResult<Self> {
        config.validate()?;
        let x_limits = measurements.x_limits().ok_or(PlotError::EmptyInput)?;
        if x_limits.0 == x_limits.1 {
            warn!(
                instructions = x_limits.0,
                "identical first and last instruction counts; widening x view"
            );
        }
        if measurements.cycle_range().is_none() {
            warn!("no finite cycle values; using default y view");
        }

        Ok(Self {
            measurements,
            config,
            x_limits,
        })
    }

    #[must_use]
    pub fn measurements(&self) -> &MeasurementSet {
        &self.measurements
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// First and last instruction count, in input order.
    #[must_use]
    pub fn x_limits(&self) -> (i64, i64) {
        self.x_limits
    }

    /// Drawn x domain: the x limits, widened only when they coincide.
    #[must_use]
    pub fn x_view(&self) -> (f64, f64) {
        let (first, last) = self.x_limits;
        nonsingular(first as f64, last as f64, SINGULAR_EXPANDER)
    }

    /// Drawn y domain covering every finite cycle value plus the margin.
    #[must_use]
    pub fn y_view(&self) -> (f64, f64) {
        match self.measurements.cycle_range() {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => nonsingular(lo, hi, SINGULAR_EXPANDER),
            Some((lo, hi)) => {
                // Working from the half span keeps ranges near f64::MAX finite.
                let half_margin = (hi / 2.0 - lo / 2.0) * self.config.y_margin_ratio;
                (
                    (lo - half_margin - half_margin).max(f64::MIN),
                    (hi + half_margin + half_margin).min(f64::MAX),
                )
            }
        }
    }

    /// Labelled x ticks: every step from the first count, stopping before the last.
    #[must_use]
    pub fn x_major_ticks(&self) -> Vec<i64> {
        let (first, last) = self.x_limits;
        arange_ticks(first, last, self.config.x_tick_step)
    }

    /// Unlabelled x ticks at multiples of the step that are not major ticks.
    #[must_use]
    pub fn x_minor_ticks(&self) -> Vec<i64> {
        multiple_ticks(
            self.x_view(),
            self.config.x_tick_step,
            &self.x_major_ticks(),
        )
    }

    fn geometry(&self, viewport: Viewport) -> PlotResult<ChartGeometry> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let x_major = self.x_major_ticks();
        let x_minor = self.x_minor_ticks();
        let x_labels: Vec<String> = x_major.iter().map(ToString::to_string).collect();
        let vertical = VerticalMargins::compute(&self.config, &x_labels);

        let (y_lo, y_hi) = self.y_view();
        let y_ticks = nice_ticks(y_lo, y_hi, y_bins_for_span(vertical.plot_height(viewport)));
        let y_labels: Vec<String> = y_ticks
            .values
            .iter()
            .map(|value| format_tick_label(*value, y_ticks.step))
            .collect();

        let layout = ChartLayout::compute(viewport, &self.config, vertical, &x_labels, &y_labels)?;
        let (x_lo, x_hi) = self.x_view();

        Ok(ChartGeometry {
            layout,
            x_scale: LinearScale::new(x_lo, x_hi)?,
            y_scale: LinearScale::new(y_lo, y_hi)?,
            x_major,
            x_minor,
            x_labels,
            y_ticks,
            y_labels,
        })
    }

    /// Resolves plot area and text positions for a viewport.
    pub fn layout(&self, viewport: Viewport) -> PlotResult<ChartLayout> {
        Ok(self.geometry(viewport)?.layout)
    }

    /// Materializes the full chart scene for one draw pass.
    pub fn build_render_frame(&self, viewport: Viewport) -> PlotResult<RenderFrame> {
        let geometry = self.geometry(viewport)?;
        let area = geometry.layout.plot_area;
        let mut frame = RenderFrame::new(viewport).with_font_family(self.config.font_family.clone());

        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(viewport.width),
                f64::from(viewport.height),
                Color::WHITE,
            ),
        );

        let x_major_px = project_x_ticks(&geometry.x_major, &geometry)?;
        let x_minor_px = project_x_ticks(&geometry.x_minor, &geometry)?;
        let y_ticks_px = geometry
            .y_ticks
            .values
            .iter()
            .map(|value| geometry.y_scale.domain_to_pixel(*value, area.bottom(), area.top))
            .collect::<PlotResult<Vec<f64>>>()?;

        if self.config.show_grid {
            for &x in &x_major_px {
                frame.push_line(
                    CanvasLayerKind::Grid,
                    LinePrimitive::new(x, area.top, x, area.bottom(), GRID_STROKE_PX, Color::GRID_GREY),
                );
            }
            for &y in &y_ticks_px {
                frame.push_line(
                    CanvasLayerKind::Grid,
                    LinePrimitive::new(area.left, y, area.right(), y, GRID_STROKE_PX, Color::GRID_GREY),
                );
            }
        }

        frame.set_clip(CanvasLayerKind::Series, area);
        let mut drawn_runs: Vec<Vec<PixelPoint>> = Vec::new();
        for kind in SeriesKind::ALL {
            let style = self.config.series.get(kind);
            let points = self.measurements.points(kind);
            for run in project_line_runs(&points, geometry.x_scale, geometry.y_scale, area)? {
                frame.push_polyline(
                    CanvasLayerKind::Series,
                    PolylinePrimitive::new(
                        run.iter().map(|p| (p.x, p.y)).collect(),
                        style.stroke_width,
                        style.color,
                        style.stroke_style,
                    ),
                );
                drawn_runs.push(run);
            }
        }

        push_axes(&mut frame, &geometry, &x_major_px, &x_minor_px, &y_ticks_px);

        let entries: Vec<_> = SeriesKind::ALL
            .iter()
            .map(|kind| self.config.series.get(*kind))
            .collect();
        let labels: Vec<&str> = entries.iter().map(|style| style.label.as_str()).collect();
        let size = legend_size(&labels, self.config.legend_font_size_px);
        let placement = place_legend(area, size, &drawn_runs);
        push_legend(&mut frame, placement, &entries, self.config.legend_font_size_px);

        self.push_labels(&mut frame, &geometry, &x_major_px, &y_ticks_px);

        debug!(
            width = viewport.width,
            height = viewport.height,
            polylines = frame.polyline_count(),
            lines = frame.line_count(),
            texts = frame.text_count(),
            "built chart frame"
        );
        Ok(frame)
    }

    /// Builds a frame for `viewport` and hands it to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R, viewport: Viewport) -> PlotResult<()> {
        let frame = self.build_render_frame(viewport)?;
        renderer.render(&frame)
    }

    /// Maps a pixel position back to `(instructions, cycles)`.
    ///
    /// Returns `None` outside the plot area.
    pub fn data_at_pixel(
        &self,
        viewport: Viewport,
        x: f64,
        y: f64,
    ) -> PlotResult<Option<(f64, f64)>> {
        let geometry = self.geometry(viewport)?;
        let area = geometry.layout.plot_area;
        if !area.contains(x, y) {
            return Ok(None);
        }
        let instructions = geometry.x_scale.pixel_to_domain(x, area.left, area.right())?;
        let cycles = geometry.y_scale.pixel_to_domain(y, area.bottom(), area.top)?;
        Ok(Some((instructions, cycles)))
    }

    fn push_labels(
        &self,
        frame: &mut RenderFrame,
        geometry: &ChartGeometry,
        x_major_px: &[f64],
        y_ticks_px: &[f64],
    ) {
        let config = &self.config;
        let layout = geometry.layout;
        let area = layout.plot_area;
        let center_x = area.left + area.width / 2.0;

        if !config.title.trim().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    config.title.clone(),
                    center_x,
                    layout.title_y,
                    config.title_font_size_px,
                    Color::BLACK,
                    TextHAlign::Center,
                ),
            );
        }

        for (label, &x) in geometry.x_labels.iter().zip(x_major_px) {
            let text = if config.rotate_x_tick_labels {
                // Rotated labels end just below the tick and read upward.
                TextPrimitive::new(
                    label.clone(),
                    x,
                    layout.x_tick_label_y,
                    config.tick_font_size_px,
                    Color::BLACK,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Center)
                .vertical()
            } else {
                TextPrimitive::new(
                    label.clone(),
                    x,
                    layout.x_tick_label_y,
                    config.tick_font_size_px,
                    Color::BLACK,
                    TextHAlign::Center,
                )
            };
            frame.push_text(CanvasLayerKind::Labels, text);
        }

        for (label, &y) in geometry.y_labels.iter().zip(y_ticks_px) {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    label.clone(),
                    layout.y_tick_label_x,
                    y,
                    config.tick_font_size_px,
                    Color::BLACK,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Center),
            );
        }

        if !config.x_label.trim().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    config.x_label.clone(),
                    center_x,
                    layout.x_label_y,
                    config.label_font_size_px,
                    Color::BLACK,
                    TextHAlign::Center,
                ),
            );
        }

        if !config.y_label.trim().is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    config.y_label.clone(),
                    layout.y_label_x,
                    area.top + area.height / 2.0,
                    config.label_font_size_px,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .vertical(),
            );
        }
    }
}

fn project_x_ticks(ticks: &[i64], geometry: &ChartGeometry) -> PlotResult<Vec<f64>> {
    let area = geometry.layout.plot_area;
    ticks
        .iter()
        .map(|tick| {
            geometry
                .x_scale
                .domain_to_pixel(*tick as f64, area.left, area.right())
        })
        .collect()
}

fn push_axes(
    frame: &mut RenderFrame,
    geometry: &ChartGeometry,
    x_major_px: &[f64],
    x_minor_px: &[f64],
    y_ticks_px: &[f64],
) {
    let area = geometry.layout.plot_area;
    let spine = |x1, y1, x2, y2| LinePrimitive::new(x1, y1, x2, y2, SPINE_STROKE_PX, Color::BLACK);

    for line in [
        spine(area.left, area.top, area.right(), area.top),
        spine(area.left, area.bottom(), area.right(), area.bottom()),
        spine(area.left, area.top, area.left, area.bottom()),
        spine(area.right(), area.top, area.right(), area.bottom()),
    ] {
        frame.push_line(CanvasLayerKind::Axis, line);
    }

    for &x in x_major_px {
        frame.push_line(
            CanvasLayerKind::Axis,
            spine(x, area.bottom(), x, area.bottom() + TICK_LENGTH_PX),
        );
    }
    for &x in x_minor_px {
        frame.push_line(
            CanvasLayerKind::Axis,
            spine(x, area.bottom(), x, area.bottom() + MINOR_TICK_LENGTH_PX),
        );
    }
    for &y in y_ticks_px {
        frame.push_line(
            CanvasLayerKind::Axis,
            spine(area.left - TICK_LENGTH_PX, y, area.left, y),
        );
    }
}
