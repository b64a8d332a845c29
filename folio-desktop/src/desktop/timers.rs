use gloo_timers::callback::Timeout;
use window_engine::{Scheduler, Task};

/// Runs deferred engine tasks on browser timers.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        // Dropping a Timeout cancels it.
        let _ = Timeout::new(delay_ms, task).forget();
    }
}
