use std::cell::Cell;

use dioxus::prelude::*;
use gloo_timers::callback::Timeout;
use window_engine::Notifier;

const TOAST_BASE_OFFSET_PX: i32 = 20;
const TOAST_STACK_STEP_PX: i32 = 70;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Notification sink backed by a toast list signal. Each toast removes
/// itself once its duration elapses.
pub struct ToastNotifier {
    toasts: Signal<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub fn new(toasts: Signal<Vec<Toast>>) -> Self {
        Self {
            toasts,
            next_id: Cell::new(0),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, duration_ms: u32) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut toasts = self.toasts;
        let Ok(mut list) = toasts.try_write() else {
            dioxus_logger::tracing::debug!(toast_id = id, "toast stack unavailable, dropping toast");
            return;
        };
        list.push(Toast {
            id,
            message: message.to_string(),
        });
        drop(list);
        dioxus_logger::tracing::debug!(toast_id = id, duration_ms, "{}", message);

        // The desktop may unmount before the timer fires.
        let _ = Timeout::new(duration_ms, move || {
            if let Ok(mut list) = toasts.try_write() {
                dismiss_toast(&mut list, id);
            }
        })
        .forget();
    }
}

/// Remove the toast with `id`, returning whether it was still showing.
pub fn dismiss_toast(toasts: &mut Vec<Toast>, id: u64) -> bool {
    let before = toasts.len();
    toasts.retain(|toast| toast.id != id);
    toasts.len() != before
}

/// Distance from the bottom edge for the toast at `index`
pub fn toast_offset(index: usize) -> i32 {
    TOAST_BASE_OFFSET_PX + TOAST_STACK_STEP_PX * index as i32
}

#[component]
pub fn ToastStack(toasts: Signal<Vec<Toast>>) -> Element {
    let stacked: Vec<(Toast, i32)> = toasts
        .read()
        .iter()
        .enumerate()
        .map(|(index, toast)| (toast.clone(), toast_offset(index)))
        .collect();

    rsx! {
        div {
            class: "toast-container",
            role: "status",
            "aria-live": "polite",
            for (toast, bottom) in stacked {
                div {
                    key: "{toast.id}",
                    class: "toast",
                    style: "position: fixed; right: 20px; bottom: {bottom}px; z-index: 100000; padding: 0.75rem 1rem; border-radius: var(--radius-md, 8px); background: var(--toast-bg, #111827); color: var(--text-primary, white); border: 1px solid var(--accent-bg, #3b82f6); box-shadow: var(--shadow-lg, 0 10px 40px rgba(0,0,0,0.5));",
                    div { class: "toast-message", "{toast.message}" }
                }
            }
        }
    }
}
