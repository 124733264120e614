use crate::session::Screen;
use crate::util::pool::{Handle, Pool};

/// Deferred effect applied by the owner when its timer fires.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    ClearTooltip,
    ShowTooltip(String),
    Enter(Screen),
}

/// Identifies a scheduled timer. Cancelling a fired or cancelled id is a no-op.
pub type TimerId = Handle;

struct Pending {
    remaining: f32,
    action: TimerAction,
}

/// One-shot timers advanced by frame time and owned by whoever schedules them.
pub struct Scheduler {
    pending: Pool<Pending>,
    /// Scratch list of live ids reused by `advance` and `cancel_all`.
    live: Vec<TimerId>,
    /// Scratch list of (overshoot, id) reused every advance.
    due: Vec<(f32, TimerId)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            pending: Pool::with_capacity(8),
            live: Vec::with_capacity(8),
            due: Vec::with_capacity(8),
        }
    }

    pub fn schedule(&mut self, delay: f32, action: TimerAction) -> TimerId {
        log::debug!("timer scheduled in {delay:.2}s: {action:?}");
        self.pending.alloc(Pending {
            remaining: delay.max(0.0),
            action,
        })
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.free(id).is_some()
    }

    pub fn cancel_all(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.live.extend(self.pending.handles());
        log::debug!("cancelling {} pending timers", self.live.len());
        for id in self.live.drain(..) {
            self.pending.free(id);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance every timer by `dt` and append the actions that came due, soonest first.
    pub fn advance(&mut self, dt: f32, fired: &mut Vec<TimerAction>) {
        self.live.extend(self.pending.handles());
        for &id in &self.live {
            if let Some(p) = self.pending.get_mut(id) {
                p.remaining -= dt;
                if p.remaining <= 0.0 {
                    self.due.push((p.remaining, id));
                }
            }
        }
        self.live.clear();
        self.due.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, id) in self.due.drain(..) {
            if let Some(p) = self.pending.free(id) {
                fired.push(p.action);
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
