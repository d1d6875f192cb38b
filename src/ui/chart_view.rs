//! egui backend for the chart engine: replays scenes with the painter and feeds pointer
//! events back into the `ChartInstance`.

use eframe::egui::{
    self, Align, Align2, Color32, Context, FontId, Frame, Id, Order, Painter, Pos2, Rect,
    RichText, ScrollArea, Sense, Shape, Stroke, Ui, pos2, vec2,
};

use crate::chart::scene::{LineStyle, Point, TextAnchor, TextBaseline};
use crate::chart::{ChartInstance, OverlayState, PointerEvent, Primitive, TextMeasure, TooltipTemplate};
use crate::config::{CHART_COLORS, ViewWidth};
use crate::ui::config::UI_CONFIG;

/// Label widths from the real egui fonts, so the axis panel fits its text
#[derive(Clone)]
pub struct EguiTextMeasure {
    ctx: Context,
}

impl EguiTextMeasure {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for EguiTextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let font_id = FontId::proportional(font_size as f32);
        self.ctx.fonts_mut(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font_id, Color32::BLACK)
                .size()
                .x as f64
        })
    }
}

/// Pointer bookkeeping for the chart on screen
#[derive(Default)]
pub struct ChartView {
    overlay: OverlayState,
    container_width: Option<f32>,
    hovering: bool,
}

impl ChartView {
    /// Forget pointer state; call when a new chart instance replaces the old one
    pub fn reset(&mut self) {
        *self = ChartView::default();
    }

    /// Scrollable plot on the left, fixed value axis on the right
    pub fn show(&mut self, ui: &mut Ui, chart: &mut ChartInstance) {
        let axis_width = chart.axis_y_width() as f32;
        let view_height = chart.layout().view_height as f32;
        let container_width = match chart.config().view_width {
            ViewWidth::Auto => (ui.available_width() - axis_width).max(0.0),
            ViewWidth::Fixed(width) => width as f32,
        };

        if self.container_width != Some(container_width) {
            let sizing = chart.handle_container_width_change(container_width as f64);
            self.container_width = Some(container_width);
            log::debug!("Chart container {:.0}px -> {:?}", container_width, sizing);
        }
        let canvas_width = chart.canvas_width() as f32;

        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            let container_origin = ScrollArea::horizontal()
                .id_salt("chart_scroll")
                .max_width(container_width)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    let (rect, response) =
                        ui.allocate_exact_size(vec2(canvas_width, view_height), Sense::hover());
                    let painter = ui.painter_at(rect);
                    painter.rect_filled(rect, 0.0, CHART_COLORS.background);
                    paint_primitives(&painter, rect.min, canvas_width, &chart.plot_scene().primitives);

                    let viewport_left = ui.clip_rect().min.x;
                    self.track_pointer(chart, response.hover_pos(), rect.min, viewport_left);

                    let plot_bottom = chart.layout().plot_bottom(chart.config());
                    paint_primitives(
                        &painter,
                        rect.min,
                        canvas_width,
                        &self.overlay.plot_primitives(plot_bottom),
                    );
                    pos2(viewport_left, rect.min.y)
                })
                .inner;

            let (axis_rect, _) = ui.allocate_exact_size(vec2(axis_width, view_height), Sense::hover());
            let painter = ui.painter_at(axis_rect);
            painter.rect_filled(axis_rect, 0.0, CHART_COLORS.background);
            paint_primitives(&painter, axis_rect.min, axis_width, &chart.axis_scene().primitives);
            paint_primitives(
                &painter,
                axis_rect.min,
                axis_width,
                &self.overlay.axis_primitives(axis_width as f64),
            );

            let tooltip = chart.signals().tooltip();
            if tooltip.is_visible() {
                if let Some(template) = tooltip.template() {
                    let style = tooltip.style();
                    let pos = container_origin + vec2(style.left as f32, style.top as f32);
                    show_tooltip(ui.ctx(), pos, template);
                }
            }
        });
    }

    fn track_pointer(
        &mut self,
        chart: &mut ChartInstance,
        hover: Option<Pos2>,
        origin: Pos2,
        viewport_left: f32,
    ) {
        match hover {
            Some(pos) => {
                let local = pos - origin;
                let (x, y) = (local.x as f64, local.y as f64);
                self.overlay = chart.on_pointer_move(x, y);
                let pointer = PointerEvent {
                    x,
                    y,
                    layer_x: (pos.x - viewport_left) as f64,
                };
                if let Err(e) = chart.on_signal_pointer(&pointer) {
                    log::warn!("⚠️ Signal tooltip failed: {}", e);
                }
                self.hovering = true;
            }
            None if self.hovering => {
                self.overlay = chart.on_pointer_leave();
                self.hovering = false;
            }
            None => {}
        }
    }
}

fn show_tooltip(ctx: &Context, pos: Pos2, template: &TooltipTemplate) {
    egui::Area::new(Id::new("signal_tooltip"))
        .fixed_pos(pos)
        .order(Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            Frame::popup(ui.style())
                .fill(CHART_COLORS.tooltip_fill)
                .show(ui, |ui| {
                    for row in &template.rows {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!("{}:", row.label))
                                    .size(UI_CONFIG.tooltip_font_size)
                                    .color(CHART_COLORS.tooltip_text)
                                    .strong(),
                            );
                            ui.label(
                                RichText::new(&row.value)
                                    .size(UI_CONFIG.tooltip_font_size)
                                    .color(CHART_COLORS.tooltip_text),
                            );
                        });
                    }
                });
        });
}

/// Replay primitives with `origin` as the scene's top-left corner.
/// `width` is what full-width rules stretch to.
pub fn paint_primitives(painter: &Painter, origin: Pos2, width: f32, primitives: &[Primitive]) {
    for primitive in primitives {
        paint_primitive(painter, origin, width, primitive);
    }
}

fn paint_primitive(painter: &Painter, origin: Pos2, width: f32, primitive: &Primitive) {
    match primitive {
        Primitive::Line { from, to, style } => {
            stroke_segment(painter, [at(origin, from), at(origin, to)], style);
        }
        Primitive::HRule { y, style } => {
            let y = origin.y + *y as f32;
            stroke_segment(painter, [pos2(origin.x, y), pos2(origin.x + width, y)], style);
        }
        Primitive::Rect {
            min,
            width,
            height,
            fill,
            opacity,
            corner_radius,
        } => {
            let rect = Rect::from_min_size(at(origin, min), vec2(*width as f32, *height as f32));
            painter.rect_filled(rect, *corner_radius as f32, fill.gamma_multiply(*opacity));
        }
        Primitive::Polygon {
            points,
            fill,
            opacity,
        } => {
            let points = points.iter().map(|p| at(origin, p)).collect();
            painter.add(Shape::convex_polygon(
                points,
                fill.gamma_multiply(*opacity),
                Stroke::NONE,
            ));
        }
        Primitive::Text {
            pos,
            text,
            color,
            size,
            anchor,
            baseline,
        } => {
            painter.text(
                at(origin, pos),
                text_align(*anchor, *baseline),
                text,
                FontId::proportional(*size as f32),
                *color,
            );
        }
    }
}

fn stroke_segment(painter: &Painter, segment: [Pos2; 2], style: &LineStyle) {
    let stroke = Stroke::new(style.width as f32, style.color.gamma_multiply(style.opacity));
    match style.dash {
        Some(dash) => {
            let dash = dash as f32;
            painter.extend(Shape::dashed_line(&segment, stroke, dash, dash));
        }
        None => {
            painter.line_segment(segment, stroke);
        }
    }
}

fn at(origin: Pos2, point: &Point) -> Pos2 {
    origin + vec2(point.x as f32, point.y as f32)
}

fn text_align(anchor: TextAnchor, baseline: TextBaseline) -> Align2 {
    let horizontal = match anchor {
        TextAnchor::Start => Align::Min,
        TextAnchor::Middle => Align::Center,
        TextAnchor::End => Align::Max,
    };
    let vertical = match baseline {
        TextBaseline::Top => Align::Min,
        TextBaseline::Middle => Align::Center,
        TextBaseline::Bottom => Align::Max,
    };
    Align2([horizontal, vertical])
}
