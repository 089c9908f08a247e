//! Synchronization primitives for search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A thread-safe stop flag for cancelling a running search.
///
/// Clones share the same flag, so a driver can keep one handle and pass
/// another into the search (or into every worker of a parallel search).
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Stop flag plus optional wall-clock deadline, polled between sibling moves.
#[derive(Clone, Debug)]
pub(crate) struct Cancellation {
    flag: StopFlag,
    deadline: Option<Instant>,
}

impl Cancellation {
    pub(crate) fn new(flag: StopFlag, deadline: Option<Instant>) -> Self {
        Cancellation { flag, deadline }
    }

    /// True once the flag is raised or the deadline has passed. An expired
    /// deadline raises the shared flag so every clone observes it.
    pub(crate) fn is_cancelled(&self) -> bool {
        if self.flag.is_stopped() {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.flag.stop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());

        flag.reset();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_stop_flag_clone_shares_state() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();

        flag1.stop();
        assert!(flag2.is_stopped());
        assert!(StopFlag::stopped().is_stopped());
    }

    #[test]
    fn test_expired_deadline_raises_flag() {
        let flag = StopFlag::new();
        let past = Instant::now() - Duration::from_millis(1);
        let cancel = Cancellation::new(flag.clone(), Some(past));
        assert!(cancel.is_cancelled());
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_no_deadline_never_expires() {
        let cancel = Cancellation::new(StopFlag::new(), None);
        assert!(!cancel.is_cancelled());
    }
}
