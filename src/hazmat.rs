//! Lower-level building blocks: the modular primitives, integer roots, the
//! residue wheel, the segmented sieve, Miller-Rabin machinery, factorization
//! and the Meissel-Lehmer counter.
//!
//! Everything here is correct on its documented domain, but preconditions are
//! enforced with debug assertions rather than errors. Prefer the crate-root
//! functions unless you need the individual pieces.

pub(crate) mod arith;
pub(crate) mod factor;
pub(crate) mod miller_rabin;
pub(crate) mod precomputed;
pub(crate) mod primecount;
pub(crate) mod roots;
pub(crate) mod sieve;
pub(crate) mod wheel;

pub use arith::{mulmod, powmod};
pub use factor::{euler_totient, factorize, trial_division};
pub use miller_rabin::{MillerRabin, Primality};
pub use precomputed::MILLER_RABIN_WITNESSES;
pub use primecount::{DEFAULT_TABLE_LIMIT, PrimeCounter};
pub use roots::iroot;
pub use sieve::generate_primes;
pub use wheel::{Wheel, increments};
