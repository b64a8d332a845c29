//! Per-window view logic, independent of the renderer.
//!
//! A [`WindowShell`] registers its window on mount, maps the registry record
//! to an on-screen frame and turns control clicks into registry calls. The
//! Dioxus `FloatingWindow` component is a thin binding over it.

use std::rc::Rc;

use shared_types::{InitialWindowState, Rect, Viewport, WindowMode, WindowRecord};

use crate::config::ShellConfig;
use crate::gesture::{HitRegion, PointerPress};
use crate::registry::WindowRegistry;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

/// What to paint for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    pub rect: Rect,
    pub z_order: u32,
    pub mode: WindowMode,
}

impl WindowFrame {
    pub fn from_record(record: &WindowRecord, viewport: Viewport, config: &ShellConfig) -> Self {
        let size = match record.mode {
            WindowMode::Minimized => config.minimized_size,
            WindowMode::Maximized => viewport,
            WindowMode::Normal => record.size,
        };
        Self {
            rect: Rect {
                origin: record.position,
                size,
            },
            z_order: record.z_order,
            mode: record.mode,
        }
    }

    /// Replace the painted rect with in-flight gesture geometry.
    pub fn with_live(mut self, live: Option<Rect>) -> Self {
        if let Some(rect) = live {
            self.rect = rect;
        }
        self
    }

    /// CSS classes; an active gesture disables transitions.
    pub fn class_list(&self, gesture: Option<GestureKind>) -> String {
        let mut classes = vec!["floating-window"];
        match self.mode {
            WindowMode::Minimized => classes.push("window-collapsed"),
            WindowMode::Maximized => classes.push("window-maximized"),
            WindowMode::Normal => {}
        }
        match gesture {
            Some(GestureKind::Drag) => classes.push("dragging"),
            Some(GestureKind::Resize) => classes.push("resizing"),
            None => {}
        }
        classes.join(" ")
    }

    /// Resize handles are only offered in the normal mode
    pub fn resizable(&self) -> bool {
        self.mode == WindowMode::Normal
    }

    pub fn shows_content(&self) -> bool {
        self.mode != WindowMode::Minimized
    }
}

pub struct WindowShell {
    id: String,
    initial: InitialWindowState,
    registry: WindowRegistry,
    scheduler: Rc<dyn Scheduler>,
    config: ShellConfig,
}

impl WindowShell {
    pub fn new(
        id: impl Into<String>,
        initial: InitialWindowState,
        registry: WindowRegistry,
        scheduler: Rc<dyn Scheduler>,
        config: ShellConfig,
    ) -> Self {
        Self {
            id: id.into(),
            initial,
            registry,
            scheduler,
            config,
        }
    }

    pub fn mount(&self) -> bool {
        self.registry.register(self.id.clone(), self.initial.clone())
    }

    pub fn unmount(&self) -> bool {
        self.registry.unregister(&self.id)
    }

    pub fn record(&self) -> Option<WindowRecord> {
        self.registry.get(&self.id)
    }

    /// `None` until the window has a registry record.
    pub fn frame(&self, viewport: Viewport) -> Option<WindowFrame> {
        self.record()
            .map(|record| WindowFrame::from_record(&record, viewport, &self.config))
    }

    /// A primary press anywhere except the controls raises the window.
    pub fn press(&self, press: PointerPress, region: HitRegion) -> bool {
        if !press.is_primary() || region == HitRegion::Control {
            return false;
        }
        self.registry.bring_to_front(&self.id).is_some()
    }

    /// Toggle minimized; a window coming back from the strip is raised again
    /// once z-orders changed while it was collapsed have settled.
    pub fn minimize_clicked(&self) -> bool {
        let Some(record) = self.record() else {
            return false;
        };
        let restoring = record.is_minimized();
        let changed = self.registry.set_minimized(&self.id);
        if changed && restoring {
            self.raise_later();
        }
        changed
    }

    /// From the strip, restore straight to a content-sized centered frame;
    /// otherwise toggle maximized. Both paths raise the window afterwards.
    pub fn maximize_clicked(&self, viewport: Viewport) -> bool {
        let Some(record) = self.record() else {
            return false;
        };
        let changed = if record.is_minimized() {
            self.registry
                .fit_to_content(&self.id, self.initial.size_or_default(), viewport)
        } else {
            self.registry.set_maximized(&self.id)
        };
        self.raise_later();
        changed
    }

    fn raise_later(&self) {
        let registry = self.registry.clone();
        let id = self.id.clone();
        self.scheduler.schedule(
            self.config.raise_delay_ms,
            Box::new(move || {
                if registry.contains(&id) {
                    registry.bring_to_front(&id);
                } else {
                    tracing::trace!(window_id = %id, "deferred raise skipped, window gone");
                }
            }),
        );
    }
}
