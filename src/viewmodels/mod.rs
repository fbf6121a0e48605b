// ============================================================================
// VIEWMODELS - UI state + logic, no DOM
// ============================================================================

pub mod my_reports_viewmodel;

pub use my_reports_viewmodel::*;
