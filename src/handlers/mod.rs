// Handler modules
pub mod check;
pub mod rules;

// Re-export all handler functions
pub use check::{CheckOptions, CheckOutcome, handle_check, resolve_config};
pub use rules::handle_rules;
