//! Stack growth for deep recursion in the parser and the dispatcher.
//!
//! Two places recurse in proportion to their input:
//!
//! - the expression parser, once per nesting level;
//! - the dispatcher, once per `bind`/`do`/`unit` continuation it hands to a
//!   capability, because the capability calls back into the engine to run the
//!   rest of the sequence.
//!
//! Both wrap their re-entry point in [`ensure_sufficient_stack`], so a
//! sequence of many thousands of binds grows the stack on the heap instead of
//! overflowing the thread's fixed stack.
//!
//! On `wasm32` the closure runs directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
