//! Notification sink for user-visible announcements.
//!
//! The registry owns an injected [`Notifier`] instead of reaching for a
//! process-wide toast channel, so independent window systems never share
//! announcements and tests can record them.

use std::cell::RefCell;
use std::rc::Rc;

pub trait Notifier {
    /// Fire-and-forget announcement shown for `duration_ms`.
    fn notify(&self, message: &str, duration_ms: u32);
}

/// Mode transition announced by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Minimized,
    Maximized,
    Restored,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Minimized => "minimized",
            Transition::Maximized => "maximized",
            Transition::Restored => "restored",
        }
    }

    pub fn message(self, window_id: &str) -> String {
        format!("{} {}", display_name(window_id), self.as_str())
    }
}

/// Human name for a window id: `"recent-visitors-window"` becomes
/// `"Recent Visitors"`.
pub fn display_name(window_id: &str) -> String {
    let base = window_id.strip_suffix("-window").unwrap_or(window_id);
    base.split('-')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration_ms: u32,
}

/// Keeps every notification in order. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|notification| notification.message.clone())
            .collect()
    }

    pub fn count_of(&self, message: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|notification| notification.message == message)
            .count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, duration_ms: u32) {
        self.log.borrow_mut().push(Notification {
            message: message.to_string(),
            duration_ms,
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _duration_ms: u32) {}
}
