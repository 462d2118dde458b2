//! Threshold-based dispatch between rayon and a plain loop.
//!
//! Small images are faster on one thread; past a pixel count the work is
//! split across the rayon pool. Both paths visit every chunk exactly once,
//! so callers get identical results either way.

use rayon::prelude::*;

/// Pixel count at which per-pixel work moves onto the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 100_000;

/// For-each over mutable chunks, in parallel once `data` holds at least
/// `threshold` chunks.
pub fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, threshold: usize, f: F)
where
    T: Send + Sync,
    F: Fn(&mut [T]) + Sync,
{
    let num_chunks = data.len() / chunk_size;

    if num_chunks >= threshold {
        data.par_chunks_exact_mut(chunk_size).for_each(&f);
    } else {
        for chunk in data.chunks_exact_mut(chunk_size) {
            f(chunk);
        }
    }
}

/// Parallel fold/reduce over chunks with the same threshold rule.
pub fn fold_chunks<T, A, I, F, R>(
    data: &[T],
    chunk_size: usize,
    threshold: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, &[T]) -> A + Sync + Send,
    R: Fn(A, A) -> A + Sync + Send,
{
    let num_chunks = data.len() / chunk_size;

    if num_chunks >= threshold {
        data.par_chunks_exact(chunk_size)
            .fold(&init, &fold_fn)
            .reduce(&init, &reduce_fn)
    } else {
        data.chunks_exact(chunk_size).fold(init(), &fold_fn)
    }
}
