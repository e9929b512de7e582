//! GTK4 window hosting a [`CycleChart`].
//!
//! The chart is redrawn at the drawing area's current size on every draw
//! signal, and a status label tracks the data coordinates under the pointer.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::{info, trace, warn};

use crate::api::CycleChart;
use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::{CairoContextRenderer, CairoRenderer};

const APPLICATION_ID: &str = "rs.aperf.plot";

pub struct GtkChartAdapter {
    drawing_area: gtk::DrawingArea,
    readout: gtk::Label,
    container: gtk::Box,
}

impl GtkChartAdapter {
    pub fn new(chart: Rc<CycleChart>) -> PlotResult<Self> {
        let renderer = Rc::new(RefCell::new(CairoRenderer::new(1, 1)?));
        let viewport = chart.config().viewport;

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        let draw_chart = Rc::clone(&chart);
        drawing_area.set_draw_func(move |_area, context, width, height| {
            let Some(viewport) = viewport_from_allocation(width, height) else {
                return;
            };
            let result = draw_chart
                .build_render_frame(viewport)
                .and_then(|frame| renderer.borrow_mut().render_on_cairo_context(context, &frame));
            if let Err(err) = result {
                warn!(error = %err, width, height, "skipping chart redraw");
            }
        });

        let readout = gtk::Label::new(None);
        readout.set_xalign(0.0);
        readout.set_margin_start(6);
        readout.set_margin_bottom(4);

        let motion = gtk::EventControllerMotion::new();
        let motion_area = drawing_area.downgrade();
        let motion_label = readout.clone();
        motion.connect_motion(move |_controller, x, y| {
            let Some(area) = motion_area.upgrade() else {
                return;
            };
            let Some(viewport) = viewport_from_allocation(area.width(), area.height()) else {
                return;
            };
            match chart.data_at_pixel(viewport, x, y) {
                Ok(Some((instructions, cycles))) => {
                    trace!(instructions, cycles, "pointer readout");
                    motion_label.set_text(&format!("x={instructions:.1}  y={cycles:.1}"));
                }
                Ok(None) | Err(_) => motion_label.set_text(""),
            }
        });
        let leave_label = readout.clone();
        motion.connect_leave(move |_controller| leave_label.set_text(""));
        drawing_area.add_controller(motion);

        let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
        container.append(&drawing_area);
        container.append(&readout);

        Ok(Self {
            drawing_area,
            readout,
            container,
        })
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn readout(&self) -> &gtk::Label {
        &self.readout
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }
}

fn viewport_from_allocation(width: i32, height: i32) -> Option<Viewport> {
    let viewport = Viewport::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    viewport.is_valid().then_some(viewport)
}

/// Opens the chart in a window and blocks until it is closed.
pub fn show_chart_window(chart: CycleChart) -> PlotResult<()> {
    let viewport = chart.config().viewport;
    let title = if chart.title().trim().is_empty() {
        "plot".to_owned()
    } else {
        chart.title().to_owned()
    };
    let chart = Rc::new(chart);
    let activation_error: Rc<RefCell<Option<PlotError>>> = Rc::new(RefCell::new(None));

    let app = gtk::Application::builder()
        .application_id(APPLICATION_ID)
        .flags(gtk::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    let activate_error = Rc::clone(&activation_error);
    app.connect_activate(move |app| {
        let adapter = match GtkChartAdapter::new(Rc::clone(&chart)) {
            Ok(adapter) => adapter,
            Err(err) => {
                *activate_error.borrow_mut() = Some(err);
                app.quit();
                return;
            }
        };

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title(title.as_str())
            .default_width(i32::try_from(viewport.width).unwrap_or(i32::MAX))
            .default_height(i32::try_from(viewport.height).unwrap_or(i32::MAX))
            .build();
        window.set_child(Some(adapter.widget()));
        window.present();
        info!(title = %title, "opened chart window");
    });

    // Arguments belong to the `plot` binary, not to GTK.
    let status = app.run_with_args::<&str>(&[]);
    if let Some(err) = activation_error.borrow_mut().take() {
        return Err(err);
    }
    if status != gtk::glib::ExitCode::SUCCESS {
        return Err(PlotError::Backend(format!(
            "gtk application exited with status {status:?}"
        )));
    }
    Ok(())
}
