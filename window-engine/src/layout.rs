//! Auto-layout choreography.
//!
//! Once every listed window has a record, the choreographer waits a fixed
//! delay, then walks the windows into a horizontal strip near the top of the
//! viewport and minimizes each. The run happens once per instance. After it
//! completes, viewport changes re-flow the strip for windows that are still
//! minimized.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared_types::{Point, Viewport};

use crate::config::{LayoutConfig, LAYOUT_COMPLETE_MESSAGE};
use crate::registry::{SubscriptionId, WindowRegistry};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Some listed windows are not registered yet
    Waiting,
    /// All present; start delay running
    Scheduled,
    Running,
    Completed,
}

/// Top-left corner of each strip slot, left to right.
pub fn strip_slots(count: usize, viewport_width: i32, config: &LayoutConfig) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }

    let item_width = if viewport_width < config.compact_breakpoint {
        config.compact_item_width
    } else {
        config.item_width
    };
    let viewport_width = f64::from(viewport_width);
    let menu_width =
        (viewport_width * config.max_menu_fraction).min(count as f64 * f64::from(item_width));
    let spacing = menu_width / count as f64;
    let start_x = ((viewport_width - menu_width) / 2.0).max(f64::from(config.min_start_x));

    (0..count)
        .map(|index| {
            let x = start_x + spacing * index as f64;
            Point::new(x.round() as i32, config.menu_y)
        })
        .collect()
}

#[derive(Clone)]
pub struct Choreographer {
    shared: Rc<Shared>,
}

struct Shared {
    registry: WindowRegistry,
    scheduler: Rc<dyn Scheduler>,
    config: LayoutConfig,
    state: RefCell<State>,
}

struct State {
    phase: LayoutPhase,
    viewport: Viewport,
    subscriptions: Vec<SubscriptionId>,
    /// Invalidates a pending start when a window leaves before it fires
    arm_generation: u64,
    /// Debounce key for viewport re-flows
    resize_generation: u64,
}

impl Choreographer {
    pub fn new(
        registry: WindowRegistry,
        scheduler: Rc<dyn Scheduler>,
        config: LayoutConfig,
        viewport: Viewport,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                registry,
                scheduler,
                config,
                state: RefCell::new(State {
                    phase: LayoutPhase::Waiting,
                    viewport,
                    subscriptions: Vec::new(),
                    arm_generation: 0,
                    resize_generation: 0,
                }),
            }),
        }
    }

    pub fn phase(&self) -> LayoutPhase {
        self.shared.state.borrow().phase
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.state.borrow().viewport
    }

    pub fn window_ids(&self) -> &[String] {
        &self.shared.config.window_ids
    }

    /// Watch the listed windows and arm as soon as all of them exist.
    pub fn attach(&self) {
        if !self.shared.state.borrow().subscriptions.is_empty() {
            return;
        }

        let subscriptions: Vec<SubscriptionId> = self
            .shared
            .config
            .window_ids
            .iter()
            .map(|id| {
                let weak = Rc::downgrade(&self.shared);
                self.shared.registry.subscribe(id.clone(), move |_| {
                    if let Some(shared) = weak.upgrade() {
                        check_ready(&shared);
                    }
                })
            })
            .collect();
        self.shared.state.borrow_mut().subscriptions = subscriptions;

        check_ready(&self.shared);
    }

    pub fn detach(&self) {
        let subscriptions = std::mem::take(&mut self.shared.state.borrow_mut().subscriptions);
        for subscription in subscriptions {
            self.shared.registry.unsubscribe(subscription);
        }
    }

    /// Record the new viewport. After the run has completed, a debounced
    /// re-flow moves minimized windows onto the recomputed strip.
    pub fn on_viewport_resized(&self, viewport: Viewport) {
        let generation = {
            let mut state = self.shared.state.borrow_mut();
            state.viewport = viewport;
            if state.phase != LayoutPhase::Completed {
                return;
            }
            state.resize_generation += 1;
            state.resize_generation
        };

        let weak = Rc::downgrade(&self.shared);
        self.shared.scheduler.schedule(
            self.shared.config.resize_debounce_ms,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    if shared.state.borrow().resize_generation == generation {
                        reflow(&shared);
                    }
                }
            }),
        );
    }
}

fn check_ready(shared: &Rc<Shared>) {
    let phase = shared.state.borrow().phase;
    let ids = &shared.config.window_ids;
    let all_present = !ids.is_empty() && ids.iter().all(|id| shared.registry.contains(id));

    match phase {
        LayoutPhase::Waiting if all_present => arm(shared),
        LayoutPhase::Scheduled if !all_present => {
            let mut state = shared.state.borrow_mut();
            state.phase = LayoutPhase::Waiting;
            state.arm_generation += 1;
            tracing::debug!("auto-layout disarmed, a window left before the start");
        }
        _ => {}
    }
}

fn arm(shared: &Rc<Shared>) {
    let generation = {
        let mut state = shared.state.borrow_mut();
        state.phase = LayoutPhase::Scheduled;
        state.arm_generation += 1;
        state.arm_generation
    };
    tracing::debug!(
        delay_ms = shared.config.start_delay_ms,
        windows = shared.config.window_ids.len(),
        "auto-layout armed"
    );

    let weak = Rc::downgrade(shared);
    shared.scheduler.schedule(
        shared.config.start_delay_ms,
        Box::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let current = {
                let state = shared.state.borrow();
                state.phase == LayoutPhase::Scheduled && state.arm_generation == generation
            };
            if current {
                run(&shared);
            }
        }),
    );
}

fn run(shared: &Rc<Shared>) {
    let viewport = {
        let mut state = shared.state.borrow_mut();
        state.phase = LayoutPhase::Running;
        state.viewport
    };
    let config = &shared.config;
    let slots = strip_slots(config.window_ids.len(), viewport.width, config);
    tracing::info!(
        windows = slots.len(),
        viewport_width = viewport.width,
        "auto-layout started"
    );

    for (index, slot) in slots.into_iter().enumerate() {
        let weak = Rc::downgrade(shared);
        let delay = config.stagger_ms.saturating_mul(index as u32);
        shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    move_step(&shared, index, slot);
                }
            }),
        );
    }
}

fn move_step(shared: &Rc<Shared>, index: usize, slot: Point) {
    let id = &shared.config.window_ids[index];
    if shared.registry.contains(id) {
        shared.registry.set_position(id, slot);
    } else {
        tracing::trace!(window_id = %id, "layout move skipped, window gone");
    }

    let weak = Rc::downgrade(shared);
    shared.scheduler.schedule(
        shared.config.minimize_delay_ms,
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                minimize_step(&shared, index);
            }
        }),
    );
}

fn minimize_step(shared: &Rc<Shared>, index: usize) {
    let config = &shared.config;
    let id = &config.window_ids[index];
    match shared.registry.get(id) {
        Some(record) if !record.is_minimized() => {
            shared.registry.set_minimized(id);
        }
        Some(_) => {}
        None => tracing::trace!(window_id = %id, "layout minimize skipped, window gone"),
    }

    if index + 1 == config.window_ids.len() {
        shared.state.borrow_mut().phase = LayoutPhase::Completed;
        shared.registry.announce(LAYOUT_COMPLETE_MESSAGE, config.notice_ms);
        tracing::info!(windows = config.window_ids.len(), "auto-layout completed");
    }
}

fn reflow(shared: &Rc<Shared>) {
    let viewport = shared.state.borrow().viewport;
    let ids = &shared.config.window_ids;
    let slots = strip_slots(ids.len(), viewport.width, &shared.config);

    let mut moved = 0;
    for (id, slot) in ids.iter().zip(slots) {
        let minimized = shared
            .registry
            .get(id)
            .is_some_and(|record| record.is_minimized());
        if minimized && shared.registry.set_position(id, slot) {
            moved += 1;
        }
    }
    tracing::debug!(viewport_width = viewport.width, moved, "strip re-flowed");
}
