//! Resize notification.
//!
//! The signal handler only flips an atomic flag. Redrawing from the handler
//! could interleave with a frame that is half assembled, so the session
//! loop consumes the flag between keystrokes and redraws there.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pending "dimensions changed" notification.
#[derive(Debug, Clone, Default)]
pub struct ResizeFlag {
    pending: Arc<AtomicBool>,
}

impl ResizeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the dimensions as changed.
    #[inline]
    pub fn notify(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Consume a pending notification.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}

/// SIGWINCH registration that feeds a [`ResizeFlag`].
///
/// Unregisters the handler when dropped.
#[derive(Debug)]
pub struct ResizeWatcher {
    flag: ResizeFlag,
    #[cfg(unix)]
    id: signal_hook::SigId,
}

impl ResizeWatcher {
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        let flag = ResizeFlag::new();
        let id = signal_hook::flag::register(
            signal_hook::consts::SIGWINCH,
            Arc::clone(&flag.pending),
        )?;
        Ok(Self { flag, id })
    }

    /// No resize signal on this platform; the flag never fires.
    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            flag: ResizeFlag::new(),
        })
    }

    pub fn flag(&self) -> &ResizeFlag {
        &self.flag
    }
}

#[cfg(unix)]
impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_once() {
        let flag = ResizeFlag::new();
        assert!(!flag.take());
        flag.notify();
        flag.notify();
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = ResizeFlag::new();
        let handler_side = flag.clone();
        handler_side.notify();
        assert!(flag.take());
    }
}
