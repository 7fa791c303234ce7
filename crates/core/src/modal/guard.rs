use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    Confirmed,
    Cancelled,
}

/// Settles a modal body exactly once. The first terminal callback wins;
/// a second one (double click, escape after confirm) is dropped.
#[derive(Debug, Clone, Default)]
pub struct TerminalGuard {
    outcome: Rc<Cell<Option<ModalOutcome>>>,
}

impl TerminalGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<ModalOutcome> {
        self.outcome.get()
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Run `terminal` if nothing has settled yet. Returns whether it ran.
    pub fn settle(&self, outcome: ModalOutcome, terminal: impl FnOnce()) -> bool {
        if self.is_settled() {
            return false;
        }
        self.outcome.set(Some(outcome));
        terminal();
        true
    }
}

impl PartialEq for TerminalGuard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.outcome, &other.outcome)
    }
}

/// Detects route changes. The first observed location is the baseline and
/// does not count as a navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationTracker {
    current: Option<String>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `location`; true when it differs from the previous one.
    pub fn observe(&mut self, location: &str) -> bool {
        match self.current.as_deref() {
            Some(previous) if previous == location => false,
            Some(_) => {
                self.current = Some(location.to_string());
                true
            }
            None => {
                self.current = Some(location.to_string());
                false
            }
        }
    }
}

/// Blocks a second submit between the hand-off to the screen and the
/// screen's first props update (which bumps the session revision).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitLatch {
    handed_off: Option<(u64, u64)>,
}

impl SubmitLatch {
    /// Whether a submit made at this `(seq, revision)` is still unanswered.
    pub fn is_pending(&self, seq: u64, revision: u64) -> bool {
        self.handed_off == Some((seq, revision))
    }

    /// Latch a submit. False when one is already pending.
    pub fn begin(&mut self, seq: u64, revision: u64) -> bool {
        if self.is_pending(seq, revision) {
            return false;
        }
        self.handed_off = Some((seq, revision));
        true
    }
}
