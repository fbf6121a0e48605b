// ============================================================================
// VIEWS - functions that render DOM (no logic)
// ============================================================================

pub mod my_reports;

pub use my_reports::render_my_reports;
