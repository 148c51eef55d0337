//! Call stacks captured when an issue is recorded.

use std::fmt;
use std::sync::Arc;

/// An opaque, displayable call stack.
///
/// Cloning shares the captured frames.
#[derive(Clone)]
pub struct Backtrace(Arc<std::backtrace::Backtrace>);

impl Backtrace {
    /// Capture the current call stack, regardless of `RUST_BACKTRACE`.
    #[inline(never)]
    pub fn capture() -> Self {
        Backtrace(Arc::new(std::backtrace::Backtrace::force_capture()))
    }

    /// Check if frames were actually captured on this platform.
    pub fn is_captured(&self) -> bool {
        self.0.status() == std::backtrace::BacktraceStatus::Captured
    }
}

impl fmt::Display for Backtrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Backtrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Backtrace")
            .field(&self.0.status())
            .finish()
    }
}
