mod axis_ticks;
mod chart_config;
mod cycle_chart;
mod layout;
mod legend;

pub use axis_ticks::{
    MAX_TICKS, NiceTicks, arange_ticks, format_tick_label, multiple_ticks, nice_ticks,
};
pub use chart_config::{ChartConfig, SeriesStyle, SeriesStyles};
pub use cycle_chart::CycleChart;
pub use layout::{ChartLayout, VerticalMargins, text_height_px, text_width_px};
pub use legend::{LegendCorner, LegendPlacement, legend_size, place_legend};
