//! Central state management for the results client
//!
//! Pure business logic with no I/O dependencies. Every input the client
//! reacts to (fetch lifecycle, realtime events, local mutations) is an
//! `Action`; `ResultsState::apply` folds it into the state and rebuilds the
//! derived views whenever the collection changes.

use serde::{Deserialize, Serialize};

use shared::{ChangeEvent, ResultRecord};

use crate::core::store::ResultStore;
use crate::core::views::{DerivedViews, build_views};

/// Sequence stamp of a full fetch. Only the most recently started fetch
/// may replace the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FetchTicket(pub u64);

/// Everything that can change the client state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Seed the collection from a persisted cache
    Hydrate(Vec<ResultRecord>),
    FetchStarted(FetchTicket),
    FetchSucceeded {
        ticket: FetchTicket,
        records: Vec<ResultRecord>,
    },
    FetchFailed {
        ticket: FetchTicket,
        message: String,
    },
    /// Change event delivered by the realtime transport
    Remote(ChangeEvent),
    MutationStarted,
    /// A local write the server confirmed, applied to the local collection
    MutationCommitted(ChangeEvent),
    MutationFailed(String),
}

/// State published to the presentation layer after every change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedState {
    pub results: Vec<ResultRecord>,
    pub views: DerivedViews,
    pub loading: bool,
    pub error: Option<String>,
    /// Incremented on every view recomputation
    pub revision: u64,
}

/// Outcome of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The collection changed and views were rebuilt
    pub recomputed: bool,
    /// Anything visible changed (collection, loading or error)
    pub changed: bool,
}

impl Transition {
    fn unchanged() -> Self {
        Self { recomputed: false, changed: false }
    }

    fn flags_only() -> Self {
        Self { recomputed: false, changed: true }
    }

    fn recomputed() -> Self {
        Self { recomputed: true, changed: true }
    }
}

/// Client state: the collection, its views and the request bookkeeping
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    store: ResultStore,
    views: DerivedViews,

    /// Fetches and mutations currently in flight
    in_flight: u32,

    /// Last fetch or mutation error
    error: Option<String>,

    /// Latest started fetch still awaiting its response
    pending_fetch: Option<FetchTicket>,

    /// Changes applied while `pending_fetch` is outstanding, replayed on
    /// top of its snapshot
    replay_log: Vec<ChangeEvent>,

    /// Set once any fetch has replaced the collection
    fetched: bool,

    revision: u64,
}

impl ResultsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one action into the state
    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::Hydrate(records) => {
                if self.fetched {
                    return Transition::unchanged();
                }
                self.store.initialize(records);
                self.recompute();
                Transition::recomputed()
            }

            Action::FetchStarted(ticket) => {
                self.in_flight += 1;
                self.pending_fetch = Some(ticket);
                self.replay_log.clear();
                Transition::flags_only()
            }

            Action::FetchSucceeded { ticket, records } => {
                self.finish_request();

                if self.pending_fetch != Some(ticket) {
                    // Superseded by a later fetch
                    return Transition::flags_only();
                }

                self.pending_fetch = None;
                self.store.initialize(records);
                for event in std::mem::take(&mut self.replay_log) {
                    self.store.apply(event);
                }
                self.fetched = true;
                self.error = None;
                self.recompute();
                Transition::recomputed()
            }

            Action::FetchFailed { ticket, message } => {
                self.finish_request();
                if self.pending_fetch != Some(ticket) {
                    // A later fetch owns the collection and its error state
                    return Transition::flags_only();
                }

                self.pending_fetch = None;
                self.replay_log.clear();
                self.error = Some(message);
                Transition::flags_only()
            }

            Action::Remote(event) => self.apply_change(event),

            Action::MutationStarted => {
                self.in_flight += 1;
                Transition::flags_only()
            }

            Action::MutationCommitted(event) => {
                self.finish_request();
                let transition = self.apply_change(event);
                Transition { changed: true, ..transition }
            }

            Action::MutationFailed(message) => {
                self.finish_request();
                self.error = Some(message);
                Transition::flags_only()
            }
        }
    }

    /// Snapshot for the presentation layer
    pub fn published(&self) -> PublishedState {
        PublishedState {
            results: self.store.records().to_vec(),
            views: self.views.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
            revision: self.revision,
        }
    }

    pub fn results(&self) -> &[ResultRecord] {
        self.store.records()
    }

    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending_fetch(&self) -> Option<FetchTicket> {
        self.pending_fetch
    }

    fn apply_change(&mut self, event: ChangeEvent) -> Transition {
        if self.pending_fetch.is_some() {
            self.replay_log.push(event.clone());
        }

        if self.store.apply(event).is_change() {
            self.recompute();
            Transition::recomputed()
        } else {
            Transition::unchanged()
        }
    }

    fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn recompute(&mut self) {
        self.views = build_views(self.store.records());
        self.revision += 1;
    }
}

/// Pure reducer form: `(state, action) -> state`
pub fn reduce(mut state: ResultsState, action: Action) -> ResultsState {
    state.apply(action);
    state
}
