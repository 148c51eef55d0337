//! Stack growth for the recursive parts of failure reporting.
//!
//! Reflecting a runtime value, squashing a capture graph and rendering an
//! expanded description all recurse over user-controlled structure. A test
//! that compares a deeply nested value must get a report, not a crash in
//! the reporter, so each recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a new segment when the
//!   remaining stack drops below the red zone.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn reflect_child(&mut self, child: &dyn Reflect) -> Value {
///     ensure_sufficient_stack(|| self.reflect(child))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
