// ============================================================================
// STATE MODULE - Rc<RefCell> state + notifications
// ============================================================================

pub mod reactivity;
pub mod my_reports_state;

pub use reactivity::*;
pub use my_reports_state::*;
