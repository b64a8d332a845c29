//! Desktop surface - engine handles shared with every window

use std::rc::Rc;

use dioxus::prelude::*;
use shared_types::Viewport;
use window_engine::{DesktopConfig, Scheduler, WindowRegistry};

mod effects;
mod shell;
mod timers;
mod toast;

pub use shell::DesktopShell;
pub use timers::GlooScheduler;
pub use toast::{toast_offset, Toast, ToastNotifier, ToastStack};

/// Provided by [`DesktopShell`] to the windows it hosts.
#[derive(Clone)]
pub struct DesktopContext {
    pub registry: WindowRegistry,
    pub scheduler: Rc<dyn Scheduler>,
    pub config: Rc<DesktopConfig>,
    pub viewport: Signal<Viewport>,
}
