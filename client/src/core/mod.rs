//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod reducer;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use reducer::{Action, FetchTicket, PublishedState, ResultsState, Transition, reduce};
pub use store::{ResultStore, StoreChange};
pub use views::{DerivedViews, TOP_PARTICIPANTS, build_views};
