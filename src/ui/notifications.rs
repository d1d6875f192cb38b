use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Context, Frame, RichText};

use crate::config::CLIENT;
use crate::ui::config::UI_CONFIG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub detail: Option<String>,
    created_at: Instant,
}

/// Timed messages stacked in the bottom-right corner
#[derive(Debug)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Toasts::new(Duration::from_secs(CLIENT.toast_duration_sec))
    }
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Toasts {
            queue: VecDeque::new(),
            lifetime,
        }
    }

    pub fn error(&mut self, title: impl Into<String>, detail: Option<String>) {
        self.push_at(ToastKind::Error, title.into(), detail, Instant::now());
    }

    pub fn info(&mut self, title: impl Into<String>) {
        self.push_at(ToastKind::Info, title.into(), None, Instant::now());
    }

    fn push_at(&mut self, kind: ToastKind, title: String, detail: Option<String>, now: Instant) {
        log::info!("Toast ({:?}): {} {}", kind, title, detail.as_deref().unwrap_or(""));
        self.queue.push_back(Toast {
            kind,
            title,
            detail,
            created_at: now,
        });
    }

    /// Drop everything older than the lifetime
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.queue
            .retain(|toast| now.saturating_duration_since(toast.created_at) < lifetime);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn show(&mut self, ctx: &Context) {
        self.prune(Instant::now());
        if self.queue.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_max_width(UI_CONFIG.toast_width);
                for toast in &self.queue {
                    let accent = match toast.kind {
                        ToastKind::Info => UI_CONFIG.colors.toast_info,
                        ToastKind::Error => UI_CONFIG.colors.toast_error,
                    };
                    Frame::popup(ui.style())
                        .fill(UI_CONFIG.colors.toast_fill)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&toast.title).strong().color(accent));
                            if let Some(detail) = &toast.detail {
                                ui.label(RichText::new(detail).small());
                            }
                        });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so expired toasts disappear without further input
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
