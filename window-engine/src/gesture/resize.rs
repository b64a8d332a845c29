use shared_types::{Point, Rect, ResizeDirection};

use super::{HitRegion, PointerPress};
use crate::config::ResizeConfig;
use crate::registry::WindowRegistry;

type LiveListener = Box<dyn Fn(Rect)>;

/// One in-flight resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub direction: ResizeDirection,
    pub origin_pointer: Point,
    pub origin: Rect,
    /// Last computed frame, pending commit
    pub latest: Option<Rect>,
}

/// Resize gesture along one of the eight edge/corner handles.
pub struct ResizeController {
    window_id: String,
    registry: WindowRegistry,
    config: ResizeConfig,
    session: Option<ResizeSession>,
    live_listeners: Vec<LiveListener>,
}

impl ResizeController {
    pub fn new(
        window_id: impl Into<String>,
        registry: WindowRegistry,
        config: ResizeConfig,
    ) -> Self {
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

    pub fn direction(&self) -> Option<ResizeDirection> {
        self.session.map(|session| session.direction)
    }

    pub fn live(&self) -> Option<Rect> {
        self.session.and_then(|session| session.latest)
    }

    pub fn on_live<F>(&mut self, listener: F)
    where
        F: Fn(Rect) + 'static,
    {
        self.live_listeners.push(Box::new(listener));
    }

    /// Start resizing from a primary press on a handle. Minimized and
    /// maximized windows cannot be resized.
    pub fn begin(&mut self, press: PointerPress, region: HitRegion, rendered: Rect) -> bool {
        let HitRegion::Handle(direction) = region else {
            return false;
        };
        if self.session.is_some() || !press.is_primary() {
            return false;
        }
        let Some(record) = self.registry.get(&self.window_id) else {
            return false;
        };
        if record.is_minimized() || record.is_maximized() {
            return false;
        }

        self.session = Some(ResizeSession {
            direction,
            origin_pointer: press.point,
            origin: rendered,
            latest: None,
        });
        tracing::trace!(window_id = %self.window_id, %direction, "resize started");
        true
    }

    /// Track a pointer move. Returns the frame to paint.
    pub fn update(&mut self, pointer: Point) -> Option<Rect> {
        let session = self.session.as_mut()?;
        let dx = pointer.x - session.origin_pointer.x;
        let dy = pointer.y - session.origin_pointer.y;
        let next = resize_rect(session.origin, session.direction, dx, dy, &self.config);
        session.latest = Some(next);

        for listener in &self.live_listeners {
            listener(next);
        }
        Some(next)
    }

    /// Finish the gesture: commit the size, and the position only if a
    /// north or west handle actually moved it.
    pub fn end(&mut self) -> Option<Rect> {
        let session = self.session.take()?;
        let latest = session.latest?;

        self.registry.set_size(&self.window_id, latest.size);
        if latest.origin != session.origin.origin {
            self.registry.set_position(&self.window_id, latest.origin);
        }
        tracing::debug!(
            window_id = %self.window_id,
            direction = %session.direction,
            width = latest.size.width,
            height = latest.size.height,
            "resize committed"
        );
        Some(latest)
    }
}

/// Apply a pointer delta to `origin` for the given handle.
///
/// East/south edges floor at the minimum. West/north edges only apply when
/// the proposed size still meets the minimum; otherwise that axis keeps its
/// origin width and offset for this event. Axes are independent.
pub fn resize_rect(
    origin: Rect,
    direction: ResizeDirection,
    dx: i32,
    dy: i32,
    config: &ResizeConfig,
) -> Rect {
    let mut next = origin;

    if direction.has_east() {
        next.size.width = (origin.size.width + dx).max(config.min_width);
    } else if direction.has_west() {
        let proposed = origin.size.width - dx;
        if proposed >= config.min_width {
            next.size.width = proposed;
            next.origin.x = origin.origin.x + dx;
        }
    }

    if direction.has_south() {
        next.size.height = (origin.size.height + dy).max(config.min_height);
    } else if direction.has_north() {
        let proposed = origin.size.height - dy;
        if proposed >= config.min_height {
            next.size.height = proposed;
            next.origin.y = origin.origin.y + dy;
        }
    }

    next
}
