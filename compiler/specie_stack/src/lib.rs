//! Stack growth for deep recursion.
//!
//! Both the combinator parser and the tree-walking evaluator recurse once
//! per nesting level of the source program. A script with a few thousand
//! nested brackets, or a user function recursing deeply, would otherwise
//! overflow the host thread's stack.
//!
//! Call sites wrap their recursive step in [`ensure_sufficient_stack`]. On
//! native targets this switches to a freshly allocated segment when less
//! than [`RED_ZONE`] bytes remain; on wasm32 it simply calls the closure.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting_depth(levels: u32) -> u32 {
        ensure_sufficient_stack(|| {
            if levels == 0 {
                0
            } else {
                nesting_depth(levels - 1) + 1
            }
        })
    }

    #[test]
    fn test_passes_value_through() {
        assert_eq!(ensure_sufficient_stack(|| "specie"), "specie");
    }

    #[test]
    fn test_passes_errors_through() {
        let result: Result<(), String> = ensure_sufficient_stack(|| Err("boom".to_owned()));
        assert_eq!(result, Err("boom".to_owned()));
    }

    #[test]
    fn test_recursion_beyond_default_stack() {
        assert_eq!(nesting_depth(200_000), 200_000);
    }
}
