//! Main entry point for the results client binary
//!
//! Wires the provider to the real backend and logs every published state
//! until interrupted.

use clap::Parser;
use tokio::signal;

use client::{
    Args, ClientConfig, ClientResult, PublishedState, ResultsProvider,
    services::{RealFilePersistence, RealResultsApi, RealWebSocketTransport, TracingNotifier},
};
use shared::{Category, ProcessId, logging, process_info};

#[tokio::main]
async fn main() -> ClientResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_client();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), &format!("results client for {}", args.api_url));

    let config = ClientConfig::from_args(&args)?;

    let api = RealResultsApi::new(config.api_url.clone(), config.request_timeout)?;
    let transport = RealWebSocketTransport::new(config.ws_url.clone());
    let persistence = config.cache_file.clone().map(RealFilePersistence::new);

    let provider = ResultsProvider::new(api, transport, persistence, TracingNotifier::new())
        .with_event_title(config.event_title.clone());

    let mut states = provider.subscribe_state();
    let reporter = tokio::spawn(async move {
        let mut last_revision = None;
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if last_revision != Some(state.revision) {
                last_revision = Some(state.revision);
                report(&state);
            }
        }
    });

    provider.start().await?;

    signal::ctrl_c().await?;
    logging::log_shutdown(ProcessId::current(), "interrupt received");

    provider.shutdown().await;
    reporter.abort();

    Ok(())
}

fn report(state: &PublishedState) {
    let views = &state.views;
    process_info!(
        ProcessId::current(),
        revision = state.revision,
        "📊 {} results, {} teams, programs G/S/Gen {}/{}/{}",
        state.results.len(),
        views.unique_teams.len(),
        views.programs_for(Category::Group).len(),
        views.programs_for(Category::Single).len(),
        views.programs_for(Category::General).len(),
    );

    for (rank, record) in views.top_single_participants.iter().enumerate() {
        process_info!(
            ProcessId::current(),
            "🏅 #{} {} ({}) {}",
            rank + 1,
            record.student_name,
            record.program_name,
            record.score()
        );
    }
}
