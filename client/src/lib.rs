//! Live results client
//!
//! Keeps a local copy of the festival results collection in sync with the
//! backend: one full fetch, then incremental change events from a realtime
//! channel. Every change recomputes the derived views (teams, programs per
//! category, top single participants) that the presentation layer reads.

pub mod config;
pub mod core;
pub mod error;
pub mod provider;
pub mod services;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{Args, ClientConfig};
pub use self::core::{Action, DerivedViews, FetchTicket, PublishedState, ResultStore, ResultsState, build_views};
pub use error::{ClientError, ClientResult};
pub use provider::ResultsProvider;
pub use traits::{ChangeTransport, ResultNotifier, ResultsApi, StatePersistence};
pub use types::{Subscription, TransportEvent};
