#![cfg(feature = "cairo-backend")]

use aperf_plot::api::{ChartConfig, CycleChart};
use aperf_plot::core::{Viewport, parse_measurements};
use aperf_plot::render::CairoRenderer;

#[test]
fn renders_chart_to_png() {
    let measurements = parse_measurements(
        "0: min=40 avg=41 max=48\n4: min=44 avg=45 max=51\n8: min=48 avg=49 max=60\n",
    )
    .expect("parse");
    let chart = CycleChart::new(measurements, ChartConfig::new("png smoke")).expect("chart");

    let mut renderer = CairoRenderer::new(640, 480).expect("renderer");
    chart
        .render(&mut renderer, Viewport::new(640, 480))
        .expect("render");
    let stats = renderer.last_stats();
    assert!(stats.polylines_drawn >= 3);
    assert!(stats.texts_drawn > 0);

    let path = std::env::temp_dir().join(format!("aperf-plot-{}-smoke.png", std::process::id()));
    renderer.write_png(&path).expect("write png");
    let bytes = std::fs::read(&path).expect("read png");
    std::fs::remove_file(&path).expect("cleanup");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
