use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs::File;
use std::path::Path;

use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextOrientation,
    TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> PlotResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface to a PNG file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            PlotError::Backend(format!("failed to write png `{}`: {err}", path.display()))
        })
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;

        let mut stats = CairoRenderStats::default();
        context.set_line_cap(LineCap::Butt);
        context.set_line_join(LineJoin::Round);

        for layer in &frame.layers {
            if let Some(clip) = layer.clip {
                context
                    .save()
                    .map_err(|err| map_backend_error("failed to save cairo state", err))?;
                context.rectangle(clip.left, clip.top, clip.width, clip.height);
                context.clip();
            }

            for rect in &layer.rects {
                fill_rect(context, *rect)?;
                stats.rects_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_dash(&[], 0.0);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for polyline in &layer.polylines {
                stroke_polyline(context, polyline)?;
                stats.polylines_drawn += 1;
            }
            context.set_dash(&[], 0.0);

            for text in &layer.texts {
                draw_text(context, &frame.font_family, text)?;
                stats.texts_drawn += 1;
            }

            if layer.clip.is_some() {
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> PlotResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_rect(context: &Context, rect: RectPrimitive) -> PlotResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_dash(&[], 0.0);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn stroke_polyline(context: &Context, polyline: &PolylinePrimitive) -> PlotResult<()> {
    let Some((&(first_x, first_y), rest)) = polyline.points.split_first() else {
        return Ok(());
    };

    apply_color(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context.set_dash(&polyline.stroke_style.dash_pattern(polyline.stroke_width), 0.0);
    context.move_to(first_x, first_y);
    for &(x, y) in rest {
        context.line_to(x, y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke polyline", err))
}

fn draw_text(context: &Context, font_family: &str, text: &TextPrimitive) -> PlotResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::new();
    font_description.set_family(font_family);
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let along = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };
    let across = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Center => -f64::from(text_height) / 2.0,
        TextVAlign::Bottom => -f64::from(text_height),
    };

    apply_color(context, text.color);
    match text.orientation {
        TextOrientation::Horizontal => {
            context.move_to(text.x + along, text.y + across);
            pangocairo::functions::show_layout(context, &layout);
        }
        TextOrientation::Vertical => {
            context
                .save()
                .map_err(|err| map_backend_error("failed to save cairo state", err))?;
            context.translate(text.x, text.y);
            context.rotate(-FRAC_PI_2);
            pangocairo::functions::update_layout(context, &layout);
            context.move_to(along, across);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        }
    }
    Ok(())
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::Backend(format!("{prefix}: {err}"))
}
