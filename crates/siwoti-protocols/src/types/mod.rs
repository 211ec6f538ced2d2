//! Common value types.

mod control;
mod request;
mod tone;

pub use control::*;
pub use request::*;
pub use tone::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
