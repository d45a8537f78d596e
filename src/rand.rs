use std::cell::RefCell;

use crate::options::Range;

thread_local! {
    /// A thread-local random number generator that is insecure but fast.
    static RNG: RefCell<fastrand::Rng> = RefCell::new(fastrand::Rng::new());
}

/// Access a pre-initialized random number generator that is insecure but fast.
pub fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut fastrand::Rng) -> R,
{
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        f(&mut rng)
    })
}

/// Reseeds this thread's generator, making subsequent draws repeatable.
pub fn seed(seed: u64) {
    with_rng(|rng| rng.seed(seed));
}

/// Draws a number uniformly from `range`, both ends included.
#[must_use]
pub fn draw(range: Range) -> i64 {
    with_rng(|rng| draw_with(rng, range))
}

/// Draws a number uniformly from `range` using `rng`.
#[must_use]
pub fn draw_with(rng: &mut fastrand::Rng, range: Range) -> i64 {
    rng.i64(range.min()..=range.max())
}
