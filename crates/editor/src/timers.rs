#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    PathWrite,
    Cleanup,
    ReadyPoll,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    purpose: TimerPurpose,
    due: u64,
}

/// Single-threaded timer queue keyed by purpose. Scheduling a purpose that is
/// already pending replaces the old timer, so only the most recent request
/// survives. The host drives it with `run_due` from its event loop.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, purpose: TimerPurpose, due: u64) {
        if self.cancel(purpose) {
            log::trace!("replaced pending {purpose:?} timer; new deadline {due}");
        }
        self.timers.push(Timer { purpose, due });
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.purpose != purpose);
        self.timers.len() != before
    }

    pub fn is_scheduled(&self, purpose: TimerPurpose) -> bool {
        self.timers.iter().any(|t| t.purpose == purpose)
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Removes and returns every purpose whose deadline has passed, earliest
    /// deadline first.
    pub fn run_due(&mut self, now: u64) -> Vec<TimerPurpose> {
        let mut fired: Vec<Timer> = Vec::new();
        self.timers.retain(|t| {
            if t.due <= now {
                fired.push(*t);
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|t| t.due);
        fired.into_iter().map(|t| t.purpose).collect()
    }
}
