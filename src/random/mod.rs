//! random: injected scalar random sources and the thread-shared instance.
//!
//! Purpose
//! -------
//! Supply the standard-normal draws that `FunctionMinimum` turns into
//! correlated parameter samples, behind a small trait so tests and callers
//! can substitute their own sequences.
//!
//! Key behaviors
//! -------------
//! - [`RandomSource`]: `uniform()` on `[0, 1)` and `normal()` with mean 0 and
//!   variance 1.
//! - [`Random`]: seeded `rand::rngs::StdRng` with normals from
//!   `rand_distr::StandardNormal`; also single-precision uniforms and
//!   seed-addressed array fills.
//! - [`instance`] / [`set_seed`]: one lazily created [`Random`] per thread,
//!   handed out as a [`SharedRandom`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Handles are `Rc<RefCell<dyn RandomSource>>` and therefore `!Send`;
//!   each thread sees its own shared instance.
//! - Draw sequences are a deterministic function of the seed.
//!
//! Conventions
//! -----------
//! - Seeds are `u64`. The default seed is [`DEFAULT_SEED`].
//!
//! Downstream usage
//! ----------------
//! - `FunctionMinimum` stores a [`SharedRandom`], defaulting to
//!   [`instance`], and accepts an explicit handle via `with_random`.
//!
//! Testing notes
//! -------------
//! - Unit tests check ranges, moments, reseeding, and that array fills leave
//!   the instance stream untouched.

pub mod shared;
pub mod source;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::shared::{SharedRandom, instance, set_seed, share};
pub use self::source::{DEFAULT_SEED, Random, RandomSource};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::shared::{SharedRandom, instance};
    pub use super::source::{Random, RandomSource};
}
