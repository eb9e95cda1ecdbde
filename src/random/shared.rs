//! Thread-shared random instance.
//!
//! Every thread owns one lazily created [`Random`] reachable through
//! [`instance`]. Handles are `Rc<RefCell<…>>`, so they stay on the thread
//! that created them. Reseeding through [`set_seed`] is visible to every
//! holder of the thread's handle.
use crate::random::source::{Random, RandomSource};
use std::{cell::RefCell, rc::Rc};

/// Shared, single-threaded handle to a random source.
pub type SharedRandom = Rc<RefCell<dyn RandomSource>>;

thread_local! {
    static SHARED: Rc<RefCell<Random>> = Rc::new(RefCell::new(Random::new()));
}

/// Handle to this thread's shared [`Random`].
pub fn instance() -> SharedRandom {
    SHARED.with(|shared| shared.clone() as SharedRandom)
}

/// Reseed this thread's shared [`Random`].
pub fn set_seed(seed: u64) {
    SHARED.with(|shared| shared.borrow_mut().set_seed(seed));
}

/// Wrap any source into a [`SharedRandom`] handle.
pub fn share<R: RandomSource + 'static>(source: R) -> SharedRandom {
    Rc::new(RefCell::new(source))
}
