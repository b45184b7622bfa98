//! Results provider
//!
//! Owns the client state and wires it to the injected services: the REST
//! backend, the realtime change transport, the optional cache and the
//! notifier. Every input becomes an `Action` that is applied under one lock
//! and published to subscribers before the next one runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

use shared::{
    ChangeEvent, DEFAULT_EVENT_TITLE, NotificationContent, ProcessId, ResultDraft, ResultId, ResultRecord, logging,
    process_debug, process_info, process_warn,
};

use crate::core::{Action, FetchTicket, PublishedState, ResultsState, Transition};
use crate::error::{ClientError, ClientResult};
use crate::traits::{ChangeTransport, ResultNotifier, ResultsApi, StatePersistence};
use crate::types::{Subscription, TransportEvent};

/// Capacity of the queue between the transport and the state
const EVENT_BUFFER: usize = 256;

/// State plus the services the event pump needs: it applies actions,
/// publishes the result and refetches on resync
struct Dispatcher<A, P> {
    state: Mutex<ResultsState>,
    publisher: watch::Sender<PublishedState>,
    persistence: P,
    api: A,
    next_ticket: AtomicU64,
}

impl<A: ResultsApi, P: StatePersistence> Dispatcher<A, P> {
    async fn dispatch(&self, action: Action) -> Transition {
        // Held through the save so cached snapshots are written in order
        let mut state = self.state.lock().await;
        let transition = state.apply(action);
        if !transition.changed {
            return transition;
        }

        let published = state.published();
        if let Err(e) = self.persistence.save(&published).await {
            process_warn!(ProcessId::current(), "Failed to cache state: {}", e);
        }
        self.publisher.send_replace(published);

        transition
    }

    async fn refresh(&self) -> ClientResult<()> {
        let ticket = FetchTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst));
        self.dispatch(Action::FetchStarted(ticket)).await;

        match self.api.fetch_all().await {
            Ok(records) => {
                process_debug!(ProcessId::current(), "📥 Fetch {:?} returned {} results", ticket, records.len());
                self.dispatch(Action::FetchSucceeded { ticket, records }).await;
                Ok(())
            }
            Err(e) => {
                self.dispatch(Action::FetchFailed {
                    ticket,
                    message: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }
}

/// Client-side owner of the results collection
pub struct ResultsProvider<A, T, P, N>
where
    A: ResultsApi + 'static,
    T: ChangeTransport + 'static,
    P: StatePersistence + 'static,
    N: ResultNotifier + 'static,
{
    dispatcher: Arc<Dispatcher<A, P>>,

    /// Injected services
    transport: T,
    notifier: N,

    event_title: String,

    /// Live transport subscription and the task draining it
    subscription: Mutex<Option<(Subscription, JoinHandle<()>)>>,
}

impl<A, T, P, N> ResultsProvider<A, T, P, N>
where
    A: ResultsApi + 'static,
    T: ChangeTransport + 'static,
    P: StatePersistence + 'static,
    N: ResultNotifier + 'static,
{
    /// Create a provider with injected dependencies
    pub fn new(api: A, transport: T, persistence: P, notifier: N) -> Self {
        let state = ResultsState::new();
        let (publisher, _) = watch::channel(state.published());

        Self {
            dispatcher: Arc::new(Dispatcher {
                state: Mutex::new(state),
                publisher,
                persistence,
                api,
                next_ticket: AtomicU64::new(1),
            }),
            transport,
            notifier,
            event_title: DEFAULT_EVENT_TITLE.to_string(),
            subscription: Mutex::new(None),
        }
    }

    /// Title used in notification headings
    pub fn with_event_title(mut self, title: impl Into<String>) -> Self {
        self.event_title = title.into();
        self
    }

    /// Receive every published state
    pub fn subscribe_state(&self) -> watch::Receiver<PublishedState> {
        self.dispatcher.publisher.subscribe()
    }

    /// Latest published state
    pub fn snapshot(&self) -> PublishedState {
        self.dispatcher.publisher.borrow().clone()
    }

    /// Hydrate from the cache, subscribe to changes, then fetch everything
    pub async fn start(&self) -> ClientResult<()> {
        let mut subscription = self.subscription.lock().await;
        if subscription.is_some() {
            return Err(ClientError::AlreadyStarted);
        }

        match self.dispatcher.persistence.load().await {
            Ok(Some(records)) => {
                process_debug!(ProcessId::current(), "💾 Hydrating {} cached results", records.len());
                self.dispatcher.dispatch(Action::Hydrate(records)).await;
            }
            Ok(None) => {}
            Err(e) => process_warn!(ProcessId::current(), "Ignoring unreadable cache: {}", e),
        }

        // Subscribe before fetching so nothing published meanwhile is lost
        let (sink, mut events) = mpsc::channel::<TransportEvent>(EVENT_BUFFER);
        let live = self.transport.subscribe(sink).await?;

        let dispatcher = Arc::clone(&self.dispatcher);
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    TransportEvent::Change(event) => {
                        process_debug!(ProcessId::current(), "📨 Applying {} for {}", event.kind(), event.target_id());
                        dispatcher.dispatch(Action::Remote(event)).await;
                    }
                    TransportEvent::Resync => {
                        process_info!(ProcessId::current(), "🔄 Change stream interrupted, refetching results");
                        if let Err(e) = dispatcher.refresh().await {
                            logging::log_error(ProcessId::current(), "Resync fetch", &e);
                        }
                    }
                }
            }
        });
        *subscription = Some((live, pump));
        drop(subscription);

        if let Err(e) = self.refresh().await {
            logging::log_error(ProcessId::current(), "Initial fetch", &e);
        }

        process_info!(ProcessId::current(), "✅ Results provider started");
        Ok(())
    }

    /// Replace the collection with a fresh fetch from the backend.
    ///
    /// The failure is also recorded in the published state's `error`.
    pub async fn refresh(&self) -> ClientResult<()> {
        self.dispatcher.refresh().await
    }

    /// Create a result on the backend and apply it locally
    pub async fn add(&self, draft: ResultDraft) -> ClientResult<ResultRecord> {
        let record = self
            .mutate(|api| api.create(draft), |record: &ResultRecord| ChangeEvent::New { result: record.clone() })
            .await?;

        self.notify_added(&record).await;
        Ok(record)
    }

    /// Replace a result on the backend and apply it locally
    pub async fn edit(&self, id: &ResultId, draft: ResultDraft) -> ClientResult<ResultRecord> {
        self.mutate(
            |api| api.update(id, draft),
            |record: &ResultRecord| ChangeEvent::Update { result: record.clone() },
        )
        .await
    }

    /// Delete a result on the backend and drop it locally
    pub async fn remove(&self, id: &ResultId) -> ClientResult<()> {
        self.mutate(|api| api.delete(id), |_: &()| ChangeEvent::Delete { id: id.clone() })
            .await
    }

    /// Stop receiving change events
    pub async fn shutdown(&self) {
        if let Some((live, pump)) = self.subscription.lock().await.take() {
            live.unsubscribe().await;
            pump.abort();
            let _ = pump.await;
            process_info!(ProcessId::current(), "🔌 Results provider stopped");
        }
    }

    /// Run a backend write and commit the confirmed change
    async fn mutate<'a, R, F, Fut>(&'a self, call: F, committed: impl FnOnce(&R) -> ChangeEvent) -> ClientResult<R>
    where
        F: FnOnce(&'a A) -> Fut,
        Fut: std::future::Future<Output = ClientResult<R>>,
    {
        self.dispatcher.dispatch(Action::MutationStarted).await;

        match call(&self.dispatcher.api).await {
            Ok(value) => {
                self.dispatcher.dispatch(Action::MutationCommitted(committed(&value))).await;
                Ok(value)
            }
            Err(e) => {
                self.dispatcher.dispatch(Action::MutationFailed(e.to_string())).await;
                Err(e)
            }
        }
    }

    async fn notify_added(&self, record: &ResultRecord) {
        let content = match NotificationContent::for_result(&self.event_title, record) {
            Ok(content) => content,
            Err(e) => {
                process_warn!(ProcessId::current(), "Skipping notification for {}: {}", record.id, e);
                return;
            }
        };

        if let Err(e) = self.notifier.notify(content).await {
            process_warn!(ProcessId::current(), "Notification for {} failed: {}", record.id, e);
        }
    }
}
