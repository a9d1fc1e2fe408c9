use core::fmt;

/// Errors returned by the crate's API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The prime table backing a [`PrimeCounter`](`crate::PrimeCounter`) does not
    /// reach the square root of the requested bound, so the count cannot be
    /// computed from it.
    PrimeTableExhausted {
        /// The requested counting bound.
        n: u64,
        /// The limit the counter's prime table was generated for.
        table_limit: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::PrimeTableExhausted { n, table_limit } => write!(
                f,
                concat![
                    "The counter's prime table was generated to {}, which cannot ",
                    "support counting primes up to {} (the table must cover the ",
                    "square root of the bound)."
                ],
                table_limit, n
            ),
        }
    }
}
