//! Stack growth for deep type decomposition.
//!
//! Type resolution recurses once per pointer, array, reference and record
//! layer. Generated code can nest those layers far deeper than hand-written
//! code, so every recursive resolution step runs under
//! [`ensure_sufficient_stack`], which grows the native stack on demand.
//!
//! - **Red zone**: 64KB. Below this much remaining stack, a new segment is allocated.
//! - **Segment size**: 1MB per growth.

const RED_ZONE: usize = 64 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    #[test]
    fn deep_pointer_chain_depth() {
        fn depth(layers: u32) -> u32 {
            ensure_sufficient_stack(|| if layers == 0 { 0 } else { depth(layers - 1) + 1 })
        }

        assert_eq!(depth(200_000), 200_000);
    }
}
