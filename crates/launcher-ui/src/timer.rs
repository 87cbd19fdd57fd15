//! Single-shot deferred callbacks for hover previews.
//!
//! Each handler owns at most one pending entry. Arming again replaces the
//! entry, disarming removes it. Time only moves when the active view's logic
//! tick advances the controller, so a frozen view's timers stay frozen.

extern crate alloc;

use alloc::vec::Vec;

/// Identity of something that receives timeout callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u32);

impl HandlerId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    handler: HandlerId,
    deadline_ms: u64,
    /// Advance generation the entry was armed in.
    epoch: u64,
}

/// Pending deferred callbacks, at most one per handler.
#[derive(Debug, Default)]
pub struct TimerController {
    /// Insertion order doubles as the firing order for simultaneous expiry.
    entries: Vec<TimerEntry>,
    now_ms: u64,
    epoch: u64,
    next_handler: u32,
}

impl TimerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh handler identity.
    pub fn register(&mut self) -> HandlerId {
        let id = HandlerId(self.next_handler);
        self.next_handler = self.next_handler.wrapping_add(1);
        id
    }

    /// Schedule `handler` to fire after `delay_ms` of logic time.
    ///
    /// An already pending entry for `handler` is replaced, which resets its
    /// deadline and moves it to the back of the firing order.
    pub fn arm(&mut self, handler: HandlerId, delay_ms: u32) {
        let replaced = self.remove(handler);
        self.entries.push(TimerEntry {
            handler,
            deadline_ms: self.now_ms + u64::from(delay_ms),
            epoch: self.epoch,
        });
        log::debug!(
            "TIMER: arm handler {} for {}ms{}",
            handler.0,
            delay_ms,
            if replaced { " (replaced)" } else { "" }
        );
    }

    /// Cancel the pending entry for `handler`, if any.
    pub fn disarm(&mut self, handler: HandlerId) {
        if self.remove(handler) {
            log::debug!("TIMER: disarm handler {}", handler.0);
        }
    }

    /// Whether `handler` has a pending entry.
    pub fn is_armed(&self, handler: HandlerId) -> bool {
        self.entries.iter().any(|e| e.handler == handler)
    }

    /// Milliseconds left before `handler` fires.
    pub fn remaining(&self, handler: HandlerId) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.handler == handler)
            .map(|e| e.deadline_ms.saturating_sub(self.now_ms))
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Advance the clock and drain everything that expired, in arm order.
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<HandlerId> {
        self.advance(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(handler) = self.take_expired() {
            fired.push(handler);
        }
        fired
    }

    /// Move the clock forward without firing anything.
    ///
    /// Pair with [`take_expired`](Self::take_expired) when callbacks may
    /// disarm other handlers while the expired set is being drained.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms += u64::from(elapsed_ms);
        self.epoch += 1;
        log::trace!("TIMER: now {}ms", self.now_ms);
    }

    /// Remove and return the oldest expired entry.
    ///
    /// Entries armed after the last [`advance`](Self::advance) are never
    /// returned, so a callback re-arming with a zero delay waits one frame.
    pub fn take_expired(&mut self) -> Option<HandlerId> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.epoch < self.epoch && e.deadline_ms <= self.now_ms)?;
        let entry = self.entries.remove(pos);
        log::debug!("TIMER: handler {} expired", entry.handler.0);
        Some(entry.handler)
    }

    fn remove(&mut self, handler: HandlerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handler != handler);
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_on_the_tick_that_crosses_the_deadline() {
        let mut timers = TimerController::new();
        let h = timers.register();

        timers.arm(h, 10);
        assert!(timers.tick(5).is_empty());
        assert_eq!(timers.tick(10), [h]);
        assert!(timers.tick(100).is_empty());
        assert!(!timers.is_armed(h));
    }

    #[test]
    fn disarm_before_tick_never_fires() {
        for delay in [0, 1, 10, 100, u32::MAX] {
            let mut timers = TimerController::new();
            let h = timers.register();
            timers.arm(h, delay);
            timers.disarm(h);
            assert!(timers.tick(u32::MAX).is_empty());
        }
    }

    #[test]
    fn rearm_resets_the_deadline() {
        let mut timers = TimerController::new();
        let h = timers.register();

        timers.arm(h, 10);
        assert!(timers.tick(5).is_empty());
        timers.arm(h, 10);
        assert!(timers.tick(6).is_empty());
        assert_eq!(timers.remaining(h), Some(4));
        assert_eq!(timers.tick(4), [h]);
    }

    #[test]
    fn rearm_does_not_duplicate() {
        let mut timers = TimerController::new();
        let h = timers.register();

        timers.arm(h, 10);
        timers.arm(h, 10);
        timers.arm(h, 20);
        assert_eq!(timers.pending_count(), 1);
        assert_eq!(timers.tick(20), [h]);
    }

    #[test]
    fn disarm_without_pending_entry_is_noop() {
        let mut timers = TimerController::new();
        let h = timers.register();
        timers.disarm(h);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn simultaneous_expiry_fires_in_arm_order() {
        let mut timers = TimerController::new();
        let a = timers.register();
        let b = timers.register();
        let c = timers.register();

        timers.arm(b, 5);
        timers.arm(a, 5);
        timers.arm(c, 3);
        assert_eq!(timers.tick(5), [b, a, c]);
    }

    #[test]
    fn entry_armed_while_draining_waits_for_next_advance() {
        let mut timers = TimerController::new();
        let h = timers.register();

        timers.arm(h, 1);
        timers.advance(1);
        assert_eq!(timers.take_expired(), Some(h));

        timers.arm(h, 0);
        assert_eq!(timers.take_expired(), None);
        timers.advance(0);
        assert_eq!(timers.take_expired(), Some(h));
    }

    #[test]
    fn disarm_during_drain_wins() {
        let mut timers = TimerController::new();
        let a = timers.register();
        let b = timers.register();

        timers.arm(a, 5);
        timers.arm(b, 5);
        timers.advance(5);
        assert_eq!(timers.take_expired(), Some(a));
        timers.disarm(b);
        assert_eq!(timers.take_expired(), None);
    }

    #[test]
    fn registered_handlers_are_distinct() {
        let mut timers = TimerController::new();
        let a = timers.register();
        let b = timers.register();
        assert_ne!(a, b);
    }
}
