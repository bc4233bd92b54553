//! Stack growth for deep recursion.
//!
//! Tarn programs loop by calling continuations: every loop iteration and
//! every statement adds native frames to the evaluator's recursion. Instead
//! of bounding the loop count by the thread's stack, recursive entry points
//! wrap themselves in [`ensure_sufficient_stack`], which moves execution onto
//! a freshly allocated segment whenever the remaining space drops below the
//! red zone.
//!
//! # Usage
//!
//! ```text
//! fn eval(&mut self, expr: ExprId, frame: FrameId) -> EvalResult {
//!     ensure_sufficient_stack(|| self.eval_inner(expr, frame))
//! }
//! ```
//!
//! On `wasm32` the wrapper is a passthrough.

/// Remaining stack below which a new segment is allocated (100 KiB).
pub const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1 MiB).
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if less than
/// [`RED_ZONE`] bytes remain on the current one.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Passthrough on wasm32, where `stacker` is unavailable.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mimics a continuation chain: each step hands the rest of the work to
    /// a nested call instead of returning.
    fn countdown(n: u64, acc: u64) -> u64 {
        ensure_sufficient_stack(|| {
            if n == 0 {
                acc
            } else {
                countdown(n - 1, acc + n)
            }
        })
    }

    #[test]
    fn short_chain_returns_result() {
        assert_eq!(countdown(10, 0), 55);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        assert_eq!(countdown(200_000, 0), 20_000_100_000);
    }

    #[test]
    fn propagates_errors() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("stop".to_string()));
        assert_eq!(result, Err("stop".to_string()));
    }
}
