use std::path::Path;
use std::process::ExitCode;

use aperf_plot::api::{ChartConfig, CycleChart};
use aperf_plot::cli::{CliArgs, CliCommand, USAGE, parse_args};
use aperf_plot::core::read_measurements;
use aperf_plot::error::{PlotError, PlotResult};

const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let _ = aperf_plot::telemetry::init_default_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Plot(args)) => args,
        Ok(CliCommand::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> PlotResult<()> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    config.title = args.title;
    if let Some(size) = args.size {
        config.viewport = size;
    }

    let measurements = read_measurements(&args.input)?;
    let chart = CycleChart::new(measurements, config)?;

    match args.output {
        Some(path) => write_png(&chart, &path),
        None => show_window(chart),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_png(chart: &CycleChart, path: &Path) -> PlotResult<()> {
    use aperf_plot::render::CairoRenderer;

    let viewport = chart.config().viewport;
    let width = i32::try_from(viewport.width).map_err(|_| PlotError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    })?;
    let height = i32::try_from(viewport.height).map_err(|_| PlotError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    })?;

    let mut renderer = CairoRenderer::new(width, height)?;
    chart.render(&mut renderer, viewport)?;
    renderer.write_png(path)?;
    tracing::info!(path = %path.display(), width, height, "wrote chart png");
    Ok(())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_chart: &CycleChart, path: &Path) -> PlotResult<()> {
    Err(PlotError::Backend(format!(
        "cannot write `{}`: PNG output requires feature `cairo-backend`",
        path.display()
    )))
}

#[cfg(feature = "gtk4-adapter")]
fn show_window(chart: CycleChart) -> PlotResult<()> {
    aperf_plot::platform_gtk::show_chart_window(chart)
}

#[cfg(not(feature = "gtk4-adapter"))]
fn show_window(_chart: CycleChart) -> PlotResult<()> {
    Err(PlotError::Backend(
        "the chart window requires feature `desktop`; pass --output <png> to render offscreen"
            .to_owned(),
    ))
}
