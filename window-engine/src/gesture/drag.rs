use shared_types::{Point, Rect, Viewport};

use super::{HitRegion, PointerPress};
use crate::config::DragConfig;
use crate::registry::WindowRegistry;

type LiveListener = Box<dyn Fn(Point)>;

/// One in-flight drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub origin_pointer: Point,
    pub origin: Point,
    /// Last clamped position, pending commit
    pub latest: Option<Point>,
}

/// Drag gesture for one window's header.
pub struct DragController {
    window_id: String,
    registry: WindowRegistry,
    config: DragConfig,
    session: Option<DragSession>,
    live_listeners: Vec<LiveListener>,
}

impl DragController {
    pub fn new(window_id: impl Into<String>, registry: WindowRegistry, config: DragConfig) -> Self {
        Self {
            window_id: window_id.into(),
            registry,
            config,
            session: None,
            live_listeners: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn live(&self) -> Option<Point> {
        self.session.and_then(|session| session.latest)
    }

    pub fn on_live<F>(&mut self, listener: F)
    where
        F: Fn(Point) + 'static,
    {
        self.live_listeners.push(Box::new(listener));
    }

    /// Start dragging from a primary press on the header. Maximized windows
    /// do not move. Raises the window on success.
    pub fn begin(&mut self, press: PointerPress, region: HitRegion, rendered: Rect) -> bool {
        if self.session.is_some() || region != HitRegion::Header || !press.is_primary() {
            return false;
        }
        let Some(record) = self.registry.get(&self.window_id) else {
            return false;
        };
        if record.is_maximized() {
            return false;
        }

        self.registry.bring_to_front(&self.window_id);
        self.session = Some(DragSession {
            origin_pointer: press.point,
            origin: rendered.origin,
            latest: None,
        });
        tracing::trace!(window_id = %self.window_id, "drag started");
        true
    }

    /// Track a pointer move. Returns the clamped position to paint.
    pub fn update(&mut self, pointer: Point, viewport: Viewport) -> Option<Point> {
        let session = self.session.as_mut()?;
        let dx = pointer.x - session.origin_pointer.x;
        let dy = pointer.y - session.origin_pointer.y;
        let next = clamp_drag_origin(session.origin.offset(dx, dy), viewport, &self.config);
        session.latest = Some(next);

        for listener in &self.live_listeners {
            listener(next);
        }
        Some(next)
    }

    /// Finish the gesture, committing the last position if the pointer moved.
    pub fn end(&mut self) -> Option<Point> {
        let session = self.session.take()?;
        let latest = session.latest?;
        self.registry.set_position(&self.window_id, latest);
        tracing::debug!(
            window_id = %self.window_id,
            x = latest.x,
            y = latest.y,
            "drag committed"
        );
        Some(latest)
    }
}

/// Keep the top-left corner inside `[0, vw - margin_x] x [0, vh - margin_y]`.
pub fn clamp_drag_origin(candidate: Point, viewport: Viewport, config: &DragConfig) -> Point {
    let max_x = viewport.width - config.margin_x;
    let max_y = viewport.height - config.margin_y;
    Point::new(
        candidate.x.min(max_x).max(0),
        candidate.y.min(max_y).max(0),
    )
}
