//! Stack growth guard for recursive type walks.
//!
//! Interning, touching and reification all recurse over the structure of a
//! type expression. Nesting depth comes from source text, so a pathological
//! generic alias can nest far deeper than the default thread stack allows.
//! Every recursive entry point in the type core wraps its body in [`guarded`].
//!
//! On wasm the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    f()
}
