use std::rc::Rc;

use dioxus::prelude::*;
use window_engine::{Choreographer, WindowRegistry};

use crate::desktop::effects;
use crate::desktop::timers::GlooScheduler;
use crate::desktop::toast::{Toast, ToastNotifier, ToastStack};
use crate::desktop::DesktopContext;
use crate::interop::{get_viewport_size, load_desktop_config};

/// Hosts a set of floating windows.
///
/// `layout_windows` and `layout_delay_ms` override the auto-layout section
/// of the host page config when given.
#[component]
pub fn DesktopShell(
    #[props(default)] layout_windows: Vec<String>,
    layout_delay_ms: Option<u32>,
    children: Element,
) -> Element {
    let toasts = use_signal(Vec::<Toast>::new);
    let viewport = use_signal(get_viewport_size);

    let desktop = use_context_provider(|| {
        let config = Rc::new(load_desktop_config());
        let notifier = Rc::new(ToastNotifier::new(toasts));
        DesktopContext {
            registry: WindowRegistry::with_config(notifier, &config),
            scheduler: Rc::new(GlooScheduler),
            config,
            viewport,
        }
    });

    let choreographer = use_hook(|| {
        let mut layout = desktop.config.layout.clone();
        if !layout_windows.is_empty() {
            layout.window_ids = layout_windows.clone();
        }
        if let Some(delay_ms) = layout_delay_ms {
            layout.start_delay_ms = delay_ms;
        }

        let choreographer = Choreographer::new(
            desktop.registry.clone(),
            desktop.scheduler.clone(),
            layout,
            *viewport.peek(),
        );
        choreographer.attach();
        dioxus_logger::tracing::info!(
            windows = choreographer.window_ids().len(),
            "Desktop auto-layout attached"
        );
        choreographer
    });

    {
        let choreographer = choreographer.clone();
        use_effect(move || {
            let choreographer = choreographer.clone();
            spawn(async move {
                effects::track_viewport(viewport, move |size| {
                    choreographer.on_viewport_resized(size);
                })
                .await;
            });
        });
    }

    {
        let choreographer = choreographer.clone();
        use_drop(move || choreographer.detach());
    }

    rsx! {
        div {
            class: "desktop-shell",
            style: "position: fixed; inset: 0; overflow: hidden; background: var(--desktop-bg, #0f172a);",
            {children}
            ToastStack { toasts }
        }
    }
}
