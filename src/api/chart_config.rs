use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{SeriesKind, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, LineStrokeStyle};

/// Stroke and legend entry for one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub label: String,
    pub color: Color,
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: LineStrokeStyle,
}

impl SeriesStyle {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        color: Color,
        stroke_width: f64,
        stroke_style: LineStrokeStyle,
    ) -> Self {
        Self {
            label: label.into(),
            color,
            stroke_width,
            stroke_style,
        }
    }

    fn validate(&self) -> PlotResult<()> {
        if self.label.trim().is_empty() {
            return Err(PlotError::Config(
                "series label must not be empty".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(PlotError::Config(format!(
                "series `{}` stroke width must be finite and > 0",
                self.label
            )));
        }
        self.color
            .validate()
            .map_err(|err| PlotError::Config(format!("series `{}`: {err}", self.label)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyles {
    pub min: SeriesStyle,
    pub avg: SeriesStyle,
    pub max: SeriesStyle,
}

impl SeriesStyles {
    #[must_use]
    pub fn get(&self, kind: SeriesKind) -> &SeriesStyle {
        match kind {
            SeriesKind::Min => &self.min,
            SeriesKind::Avg => &self.avg,
            SeriesKind::Max => &self.max,
        }
    }
}

impl Default for SeriesStyles {
    fn default() -> Self {
        Self {
            min: SeriesStyle::new(
                "min",
                Color::GREEN.with_alpha(0.75),
                1.0,
                LineStrokeStyle::Dotted,
            ),
            avg: SeriesStyle::new("avg", Color::BLACK, 1.0, LineStrokeStyle::Solid),
            max: SeriesStyle::new(
                "max",
                Color::RED.with_alpha(0.75),
                1.0,
                LineStrokeStyle::Dotted,
            ),
        }
    }
}

/// Chart appearance and layout settings.
///
/// Serializable so a JSON file can override any subset of the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub font_family: String,
    pub title_font_size_px: f64,
    pub label_font_size_px: f64,
    pub tick_font_size_px: f64,
    pub legend_font_size_px: f64,
    /// Spacing of major and minor x ticks, in instructions.
    pub x_tick_step: i64,
    /// Fraction of the data span added above and below the y data range.
    pub y_margin_ratio: f64,
    pub show_grid: bool,
    pub rotate_x_tick_labels: bool,
    pub viewport: Viewport,
    pub series: SeriesStyles,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "# of instructions".to_owned(),
            y_label: "Cycles elapsed (APERF)".to_owned(),
            font_family: "monospace".to_owned(),
            title_font_size_px: 16.0,
            label_font_size_px: 13.0,
            tick_font_size_px: 11.0,
            legend_font_size_px: 12.0,
            x_tick_step: 4,
            y_margin_ratio: 0.05,
            show_grid: true,
            rotate_x_tick_labels: true,
            viewport: Viewport::default(),
            series: SeriesStyles::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn with_x_tick_step(mut self, step: i64) -> Self {
        self.x_tick_step = step;
        self
    }

    #[must_use]
    pub fn with_y_margin_ratio(mut self, ratio: f64) -> Self {
        self.y_margin_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_series_style(mut self, kind: SeriesKind, style: SeriesStyle) -> Self {
        match kind {
            SeriesKind::Min => self.series.min = style,
            SeriesKind::Avg => self.series.avg = style,
            SeriesKind::Max => self.series.max = style,
        }
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(PlotError::Config("font family must not be empty".to_owned()));
        }
        for (name, size) in [
            ("title_font_size_px", self.title_font_size_px),
            ("label_font_size_px", self.label_font_size_px),
            ("tick_font_size_px", self.tick_font_size_px),
            ("legend_font_size_px", self.legend_font_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(PlotError::Config(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.x_tick_step <= 0 {
            return Err(PlotError::Config("`x_tick_step` must be > 0".to_owned()));
        }
        if !self.y_margin_ratio.is_finite() || self.y_margin_ratio < 0.0 {
            return Err(PlotError::Config(
                "`y_margin_ratio` must be finite and >= 0".to_owned(),
            ));
        }
        if !self.viewport.is_valid() {
            return Err(PlotError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        for kind in SeriesKind::ALL {
            self.series.get(kind).validate()?;
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::Config(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::Config(format!("failed to serialize config json: {e}")))
    }

    /// Loads a JSON config file; absent fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
