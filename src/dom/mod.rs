// ============================================================================
// DOM MODULE - DOM manipulation helpers
// ============================================================================

pub mod element;
pub mod builder;

pub use element::*;
pub use builder::*;
