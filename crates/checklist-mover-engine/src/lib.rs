pub mod checklist;
pub mod io;
pub mod processor;
pub mod reorder;
pub mod state;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use checklist::{ChecklistLine, Directive};
pub use processor::{InFlight, ProcessError, Processor, Report};
pub use reorder::{BlockPolicy, Policy, Transformed, reorder, transform};
pub use state::{MoverState, Settings, StateError};
pub use store::{HiddenEntry, HiddenStore};
