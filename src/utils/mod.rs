// Shared utilities

pub mod constants;
pub mod clock;

pub use constants::*;
pub use clock::{Clock, SystemClock};
