//! WindowRegistry - single owner and mutator of every window record
//!
//! The registry is a cheap-clone handle to one window system. Each mutation
//! borrows the shared state, applies the whole change, releases the borrow
//! and only then fans out to the window's subscribers and the notifier, so
//! observers always see fully applied writes and may read the registry from
//! inside their callbacks.
//!
//! Unknown ids and duplicate registrations are silent no-ops. Writes that
//! would not change a record are short-circuited: no revision bump, no
//! subscriber callback, no notification.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use shared_types::{InitialWindowState, Point, Rect, Size, Viewport, WindowMode, WindowRecord};

use crate::config::{DesktopConfig, FitConfig, MAX_Z_ORDER_OVERRIDE};
use crate::notify::{Notifier, Transition};

pub type SubscriptionId = u64;

type Listener = Rc<dyn Fn(Option<&WindowRecord>)>;

#[derive(Clone)]
pub struct WindowRegistry {
    inner: Rc<RefCell<RegistryState>>,
    notifier: Rc<dyn Notifier>,
}

struct RegistryState {
    windows: HashMap<String, WindowRecord>,
    /// Source of every z-order value; never decreases
    focus_counter: u32,
    baseline_z: u32,
    notification_ms: u32,
    fit: FitConfig,
    revision: u64,
    next_subscription: SubscriptionId,
    listeners: HashMap<String, Vec<(SubscriptionId, Listener)>>,
}

impl RegistryState {
    fn allocate_z_order(&mut self) -> Option<u32> {
        let allocated = self.focus_counter.checked_add(1)?;
        self.focus_counter = allocated;
        Some(allocated)
    }

    /// An explicit override is capped at [`MAX_Z_ORDER_OVERRIDE`] and moved
    /// to a fresh allocation when another window already holds it.
    fn claim_z_order(&mut self, requested: u32) -> u32 {
        let requested = requested.min(MAX_Z_ORDER_OVERRIDE);
        let taken = self
            .windows
            .values()
            .any(|record| record.z_order == requested);
        if !taken {
            return requested;
        }
        self.allocate_z_order().unwrap_or(requested)
    }
}

/// Result of editing one record in place
enum Edit {
    Unchanged,
    Changed,
    Announced(Transition),
}

// ============================================================================
// Construction & Queries
// ============================================================================

impl WindowRegistry {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self::with_config(notifier, &DesktopConfig::default())
    }

    pub fn with_config(notifier: Rc<dyn Notifier>, config: &DesktopConfig) -> Self {
        let state = RegistryState {
            windows: HashMap::new(),
            focus_counter: config.baseline_z,
            baseline_z: config.baseline_z,
            notification_ms: config.notification_ms,
            fit: config.fit,
            revision: 0,
            next_subscription: 1,
            listeners: HashMap::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(state)),
            notifier,
        }
    }

    pub fn get(&self, id: &str) -> Option<WindowRecord> {
        self.inner.borrow().windows.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.borrow().windows.contains_key(id)
    }

    /// All records, back to front.
    pub fn records(&self) -> Vec<WindowRecord> {
        let mut records: Vec<_> = self.inner.borrow().windows.values().cloned().collect();
        records.sort_by_key(|record| record.z_order);
        records
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().windows.is_empty()
    }

    pub fn focus_counter(&self) -> u32 {
        self.inner.borrow().focus_counter
    }

    /// Bumped once per applied mutation
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    pub fn fit_config(&self) -> FitConfig {
        self.inner.borrow().fit
    }

    /// Post a free-form message through this registry's notifier.
    pub fn announce(&self, message: &str, duration_ms: u32) {
        self.notifier.notify(message, duration_ms);
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

impl WindowRegistry {
    /// Observe changes to a single window. The callback receives `None` once
    /// the window is unregistered.
    pub fn subscribe<F>(&self, id: impl Into<String>, listener: F) -> SubscriptionId
    where
        F: Fn(Option<&WindowRecord>) + 'static,
    {
        let mut state = self.inner.borrow_mut();
        let subscription = state.next_subscription;
        state.next_subscription += 1;
        state
            .listeners
            .entry(id.into())
            .or_default()
            .push((subscription, Rc::new(listener)));
        subscription
    }

    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut state = self.inner.borrow_mut();
        let mut removed = false;
        state.listeners.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|(existing, _)| *existing != subscription);
            removed |= listeners.len() != before;
            !listeners.is_empty()
        });
        removed
    }

    fn publish(&self, id: &str, announcement: Option<Transition>) {
        let (record, listeners, duration_ms) = {
            let state = self.inner.borrow();
            let listeners: Vec<Listener> = state
                .listeners
                .get(id)
                .map(|entries| entries.iter().map(|(_, listener)| listener.clone()).collect())
                .unwrap_or_default();
            (state.windows.get(id).cloned(), listeners, state.notification_ms)
        };

        for listener in listeners {
            listener(record.as_ref());
        }

        if let Some(transition) = announcement {
            self.notifier.notify(&transition.message(id), duration_ms);
        }
    }
}

// ============================================================================
// Mutations
// ============================================================================

impl WindowRegistry {
    /// Insert a record for `id`. A second registration of the same id is
    /// ignored so a re-mount never resets live geometry.
    pub fn register(&self, id: impl Into<String>, initial: InitialWindowState) -> bool {
        let id = id.into();
        {
            let mut state = self.inner.borrow_mut();
            if state.windows.contains_key(&id) {
                tracing::trace!(window_id = %id, "duplicate registration ignored");
                return false;
            }

            let z_order = match initial.z_order {
                None => state.baseline_z,
                Some(requested) => state.claim_z_order(requested),
            };
            // Keep later allocations strictly above an explicit override.
            state.focus_counter = state.focus_counter.max(z_order);
            let record = WindowRecord {
                id: id.clone(),
                position: initial.position_or_default(),
                size: initial.size_or_default(),
                z_order,
                mode: initial.mode,
            };
            state.windows.insert(id.clone(), record);
            state.revision += 1;
        }

        tracing::debug!(window_id = %id, "window registered");
        self.publish(&id, None);
        true
    }

    pub fn unregister(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.inner.borrow_mut();
            let removed = state.windows.remove(id).is_some();
            if removed {
                state.revision += 1;
            }
            removed
        };

        if !removed {
            tracing::trace!(window_id = %id, "unregister of unknown window ignored");
            return false;
        }

        tracing::debug!(window_id = %id, "window unregistered");
        self.publish(id, None);
        true
    }

    /// Allocate the next z-order value and raise the window with it.
    ///
    /// Returns the allocated value, or `None` for an unknown id or an
    /// exhausted counter. The record is only rewritten when the window is not
    /// already strictly above every other window.
    pub fn bring_to_front(&self, id: &str) -> Option<u32> {
        let (allocated, raised) = {
            let mut state = self.inner.borrow_mut();
            let current = state.windows.get(id)?.z_order;

            let Some(allocated) = state.allocate_z_order() else {
                tracing::trace!(window_id = %id, "focus counter exhausted, raise ignored");
                return None;
            };

            let already_front = state
                .windows
                .values()
                .filter(|record| record.id != id)
                .all(|record| record.z_order < current);

            if !already_front {
                if let Some(record) = state.windows.get_mut(id) {
                    record.z_order = allocated;
                }
                state.revision += 1;
            }
            (allocated, !already_front)
        };

        if raised {
            tracing::debug!(window_id = %id, z_order = allocated, "window raised");
            self.publish(id, None);
        }
        Some(allocated)
    }

    /// Toggle minimized. Minimizing a maximized window leaves it minimized
    /// only.
    pub fn set_minimized(&self, id: &str) -> bool {
        self.edit(id, "set_minimized", |record| match record.mode {
            WindowMode::Minimized => {
                record.mode = WindowMode::Normal;
                Edit::Announced(Transition::Restored)
            }
            WindowMode::Normal | WindowMode::Maximized => {
                record.mode = WindowMode::Minimized;
                Edit::Announced(Transition::Minimized)
            }
        })
    }

    /// Toggle maximized. On a minimized window the first call only restores
    /// it; a second call is needed to maximize.
    pub fn set_maximized(&self, id: &str) -> bool {
        self.edit(id, "set_maximized", |record| match record.mode {
            WindowMode::Minimized | WindowMode::Maximized => {
                record.mode = WindowMode::Normal;
                Edit::Announced(Transition::Restored)
            }
            WindowMode::Normal => {
                record.mode = WindowMode::Maximized;
                Edit::Announced(Transition::Maximized)
            }
        })
    }

    pub fn set_position(&self, id: &str, position: Point) -> bool {
        self.edit(id, "set_position", |record| {
            if record.position == position {
                return Edit::Unchanged;
            }
            record.position = position;
            Edit::Changed
        })
    }

    pub fn set_size(&self, id: &str, size: Size) -> bool {
        self.edit(id, "set_size", |record| {
            if record.size == size {
                return Edit::Unchanged;
            }
            record.size = size;
            Edit::Changed
        })
    }

    /// Restore to a content-sized frame centered in the viewport. Size,
    /// position and both mode flags change in one step.
    pub fn fit_to_content(&self, id: &str, content: Size, viewport: Viewport) -> bool {
        let target = fit_rect(content, viewport, &self.fit_config());
        self.edit(id, "fit_to_content", |record| {
            record.size = target.size;
            record.position = target.origin;
            record.mode = WindowMode::Normal;
            Edit::Announced(Transition::Restored)
        })
    }

    fn edit<F>(&self, id: &str, operation: &'static str, apply: F) -> bool
    where
        F: FnOnce(&mut WindowRecord) -> Edit,
    {
        let outcome = {
            let mut state = self.inner.borrow_mut();
            let Some(record) = state.windows.get_mut(id) else {
                tracing::trace!(window_id = %id, operation, "mutation of unknown window ignored");
                return false;
            };
            let outcome = apply(record);
            if !matches!(outcome, Edit::Unchanged) {
                state.revision += 1;
            }
            outcome
        };

        let announcement = match outcome {
            Edit::Unchanged => return false,
            Edit::Changed => None,
            Edit::Announced(transition) => Some(transition),
        };

        tracing::debug!(window_id = %id, operation, "window updated");
        self.publish(id, announcement);
        true
    }
}

/// Content-sized frame centered in `viewport`: each axis is
/// `max(content + padding, minimum)` capped at a fraction of the viewport.
pub fn fit_rect(content: Size, viewport: Viewport, fit: &FitConfig) -> Rect {
    let cap_width = (f64::from(viewport.width) * fit.max_viewport_fraction).floor() as i32;
    let cap_height = (f64::from(viewport.height) * fit.max_viewport_fraction).floor() as i32;

    let width = content.width.saturating_add(fit.padding);
    let height = content.height.saturating_add(fit.padding);
    let width = width.max(fit.min_width).min(cap_width);
    let height = height.max(fit.min_height).min(cap_height);

    Rect::new(
        (viewport.width - width) / 2,
        (viewport.height - height) / 2,
        width,
        height,
    )
}
