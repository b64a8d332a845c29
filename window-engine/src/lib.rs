//! Folio Desk window engine
//!
//! Renderer-independent model for a desktop of floating windows: the
//! registry that owns every window record, pointer gesture controllers, the
//! per-window shell and the auto-layout choreographer. Everything runs on
//! one thread; deferred work goes through an injected [`Scheduler`].

pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod notify;
pub mod registry;
pub mod scheduler;
pub mod shell;

pub use config::{
    DesktopConfig, DragConfig, FitConfig, LayoutConfig, ResizeConfig, ShellConfig,
    BASELINE_Z_ORDER, LAYOUT_COMPLETE_MESSAGE, MAX_Z_ORDER_OVERRIDE,
};
pub use error::{ConfigError, Result};
pub use gesture::{
    clamp_drag_origin, resize_rect, DragController, HitRegion, PointerButton, PointerPress,
    ResizeController,
};
pub use layout::{strip_slots, Choreographer, LayoutPhase};
pub use notify::{display_name, Notification, Notifier, NullNotifier, RecordingNotifier, Transition};
pub use registry::{fit_rect, SubscriptionId, WindowRegistry};
pub use scheduler::{ManualScheduler, Scheduler, Task};
pub use shell::{GestureKind, WindowFrame, WindowShell};
