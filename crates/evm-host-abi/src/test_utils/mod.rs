//! Test utilities: in-memory and instrumented [`Host`](crate::Host)
//! implementations.

mod host;

pub use host::*;
