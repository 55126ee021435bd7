use rand::Rng;

/// Draws candidates uniformly at random without replacement and returns the
/// first one `accept` agrees to, or `None` once the pool is exhausted.
///
/// An empty pool yields `None` without touching `rng`.
pub fn pick_first_acceptable<'a, T, R, F>(pool: &'a [T], rng: &mut R, mut accept: F) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: FnMut(&T) -> bool,
{
    let mut untried: Vec<usize> = (0..pool.len()).collect();

    while !untried.is_empty() {
        let slot = rng.random_range(0..untried.len());
        let candidate = &pool[untried[slot]];
        if accept(candidate) {
            return Some(candidate);
        }
        untried.swap_remove(slot);
    }

    None
}
