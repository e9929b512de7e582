use approx::assert_relative_eq;
use aperf_plot::api::{ChartConfig, CycleChart};
use aperf_plot::core::{Measurement, MeasurementSet, Viewport, parse_measurements};
use aperf_plot::error::PlotError;
use aperf_plot::render::{CanvasLayerKind, Color, LineStrokeStyle, NullRenderer, TextOrientation};

const ROB_SWEEP: &str = "\
0: min=40 avg=41.5 max=48
4: min=44 avg=45.25 max=51
8: min=48 avg=49 max=60
12: min=52 avg=53.5 max=61
16: min=90 avg=96 max=120
";

fn rob_chart() -> CycleChart {
    let measurements = parse_measurements(ROB_SWEEP).expect("parse");
    CycleChart::new(measurements, ChartConfig::new("ROB capacity")).expect("chart")
}

#[test]
fn x_limits_are_first_and_last_instruction_counts() {
    let chart = rob_chart();
    assert_eq!(chart.x_limits(), (0, 16));
    assert_eq!(chart.x_view(), (0.0, 16.0));
}

#[test]
fn x_limits_follow_input_order_not_extremes() {
    let measurements: MeasurementSet = [
        Measurement::new(8, 1.0, 2.0, 3.0),
        Measurement::new(100, 1.0, 2.0, 3.0),
        Measurement::new(20, 1.0, 2.0, 3.0),
    ]
    .into_iter()
    .collect();
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");
    assert_eq!(chart.x_limits(), (8, 20));
}

#[test]
fn major_ticks_step_by_four_from_first_count() {
    let chart = rob_chart();
    assert_eq!(chart.x_major_ticks(), vec![0, 4, 8, 12]);
}

#[test]
fn major_ticks_start_at_unaligned_first_count() {
    let measurements = parse_measurements("2: min=1 avg=2 max=3\n11: min=1 avg=2 max=3\n")
        .expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");
    assert_eq!(chart.x_major_ticks(), vec![2, 6, 10]);
    assert_eq!(chart.x_minor_ticks(), vec![4, 8]);
}

#[test]
fn y_view_adds_margin_around_all_series() {
    let chart = rob_chart();
    let (lo, hi) = chart.y_view();
    assert_relative_eq!(lo, 40.0 - 4.0);
    assert_relative_eq!(hi, 120.0 + 4.0);
}

#[test]
fn frame_holds_three_series_in_min_avg_max_order() {
    let chart = rob_chart();
    let frame = chart.build_render_frame(Viewport::default()).expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");

    assert_eq!(series.polylines.len(), 3);
    let [min, avg, max] = [&series.polylines[0], &series.polylines[1], &series.polylines[2]];

    assert_eq!(min.stroke_style, LineStrokeStyle::Dotted);
    assert_eq!(min.color, Color::GREEN.with_alpha(0.75));
    assert_eq!(avg.stroke_style, LineStrokeStyle::Solid);
    assert_eq!(avg.color, Color::BLACK);
    assert_eq!(max.stroke_style, LineStrokeStyle::Dotted);
    assert_eq!(max.color, Color::RED.with_alpha(0.75));
    for polyline in [min, avg, max] {
        assert_eq!(polyline.points.len(), 5);
        assert_relative_eq!(polyline.stroke_width, 1.0);
    }

    // Larger cycle counts sit higher on screen.
    assert!(max.points[4].1 < min.points[4].1);
}

#[test]
fn frame_carries_title_axis_labels_and_legend() {
    let chart = rob_chart();
    let frame = chart.build_render_frame(Viewport::default()).expect("frame");
    let texts: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();

    assert!(texts.contains(&"ROB capacity"));
    assert!(texts.contains(&"# of instructions"));
    assert!(texts.contains(&"Cycles elapsed (APERF)"));

    let legend = frame.layer(CanvasLayerKind::Legend).expect("legend layer");
    let labels: Vec<&str> = legend.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels, ["min", "avg", "max"]);

    let x_tick_label = frame
        .texts()
        .find(|text| text.text == "12")
        .expect("x tick label");
    assert_eq!(x_tick_label.orientation, TextOrientation::Vertical);
}

#[test]
fn null_renderer_accepts_chart_frame() {
    let chart = rob_chart();
    let mut renderer = NullRenderer::default();
    chart
        .render(&mut renderer, Viewport::new(800, 600))
        .expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_polyline_count >= 6);
    assert!(renderer.last_text_count > 0);
}

#[test]
fn empty_input_is_rejected() {
    let err = CycleChart::new(MeasurementSet::new(), ChartConfig::default()).expect_err("empty");
    assert!(matches!(err, PlotError::EmptyInput));
}

#[test]
fn single_sample_widens_views_and_draws_no_series() {
    let measurements = parse_measurements("32: min=10 avg=10 max=10").expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");

    assert_eq!(chart.x_limits(), (32, 32));
    let (x_lo, x_hi) = chart.x_view();
    assert_relative_eq!(x_lo, 30.4);
    assert_relative_eq!(x_hi, 33.6);
    assert!(chart.x_major_ticks().is_empty());

    let frame = chart.build_render_frame(Viewport::default()).expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert!(series.polylines.is_empty());
}

#[test]
fn descending_counts_have_no_major_ticks() {
    let measurements = parse_measurements("16: min=1 avg=2 max=3\n0: min=2 avg=3 max=4\n")
        .expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");
    assert_eq!(chart.x_view(), (16.0, 0.0));
    assert!(chart.x_major_ticks().is_empty());
    chart
        .render(&mut NullRenderer::default(), Viewport::default())
        .expect("render");
}

#[test]
fn non_finite_sample_splits_series_line() {
    let measurements = parse_measurements(
        "0: min=1 avg=2 max=3\n4: min=2 avg=3 max=4\n8: min=nan avg=4 max=5\n12: min=3 avg=5 max=6\n16: min=4 avg=6 max=7\n",
    )
    .expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");
    let frame = chart.build_render_frame(Viewport::default()).expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");

    assert_eq!(series.polylines.len(), 4);
    assert_eq!(series.polylines[0].points.len(), 2);
    assert_eq!(series.polylines[1].points.len(), 2);
    assert_eq!(series.polylines[2].points.len(), 5);
}

#[test]
fn data_at_pixel_inverts_plot_area_corners() {
    let chart = rob_chart();
    let viewport = Viewport::default();
    let area = chart.layout(viewport).expect("layout").plot_area;
    let (y_lo, y_hi) = chart.y_view();

    let (x, y) = chart
        .data_at_pixel(viewport, area.left, area.bottom())
        .expect("lookup")
        .expect("inside");
    assert_relative_eq!(x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(y, y_lo, epsilon = 1e-9);

    let (x, y) = chart
        .data_at_pixel(viewport, area.right(), area.top)
        .expect("lookup")
        .expect("inside");
    assert_relative_eq!(x, 16.0, epsilon = 1e-9);
    assert_relative_eq!(y, y_hi, epsilon = 1e-9);

    assert_eq!(chart.data_at_pixel(viewport, 0.0, 0.0).expect("lookup"), None);
}

#[test]
fn tiny_viewport_is_rejected() {
    let chart = rob_chart();
    let err = chart
        .build_render_frame(Viewport::new(20, 20))
        .expect_err("too small");
    assert!(matches!(err, PlotError::InvalidViewport { .. }));
}

#[test]
fn cycle_range_near_f64_limits_still_renders() {
    let measurements = parse_measurements(
        "0: min=-1e308 avg=0 max=1e308\n4: min=-1e308 avg=1 max=1e308\n",
    )
    .expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::default()).expect("chart");

    let (lo, hi) = chart.y_view();
    assert!(lo.is_finite() && hi.is_finite());
    assert!(lo < -1e308 && hi > 1e308);

    let viewport = Viewport::default();
    let frame = chart.build_render_frame(viewport).expect("frame");
    let area = chart.layout(viewport).expect("layout").plot_area;
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.polylines.len(), 3);
    for polyline in &series.polylines {
        for &(x, y) in &polyline.points {
            assert!(area.contains(x, y), "({x}, {y}) outside plot area");
        }
    }

    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer, viewport).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
}
