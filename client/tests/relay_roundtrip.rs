//! End-to-end: provider against a live relay over HTTP and WebSocket

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

use client::services::{NoPersistence, RealResultsApi, RealWebSocketTransport, TracingNotifier};
use client::{ResultsApi, ResultsProvider};
use common::fixtures::draft;
use common::{TEST_TIMEOUT, wait_for_state};
use relay::{RealResultRepository, RelayServer};
use shared::Category;

async fn spawn_relay() -> (SocketAddr, Arc<RelayServer<RealResultRepository>>) {
    let server = Arc::new(RelayServer::new(RealResultRepository::new(), &[]).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let serving = Arc::clone(&server);
    tokio::spawn(async move { serving.serve(listener, std::future::pending()).await });
    (addr, server)
}

fn api_for(addr: SocketAddr) -> RealResultsApi {
    let base = Url::parse(&format!("http://{addr}")).unwrap();
    RealResultsApi::new(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_provider_tracks_writes_from_other_clients() {
    let (addr, relay) = spawn_relay().await;
    let ws_url = Url::parse(&format!("ws://{addr}/ws")).unwrap();

    let provider = ResultsProvider::new(
        api_for(addr),
        RealWebSocketTransport::new(ws_url),
        NoPersistence::None,
        TracingNotifier::new(),
    );
    let mut states = provider.subscribe_state();
    provider.start().await.unwrap();

    // Wait for the relay to register the socket before writing
    let state = relay.state();
    tokio::time::timeout(TEST_TIMEOUT, async {
        while state.connection_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    // Local add: applied from the response and echoed back over the socket
    let own = provider.add(draft("Asha", "Essay", Category::Single, 7.0)).await.unwrap();
    let snapshot = wait_for_state(&mut states, |s| s.results.len() == 1).await;
    assert_eq!(snapshot.results[0].id, own.id);

    // Another client writes through the REST API
    let other = api_for(addr);
    let theirs = other.create(draft("Bilal", "Poem", Category::Group, 9.0)).await.unwrap();
    let snapshot = wait_for_state(&mut states, |s| s.results.len() == 2).await;
    assert_eq!(snapshot.views.group_programs, vec!["POEM"]);

    other
        .update(&own.id, draft("Asha", "Essay", Category::Single, 11.0))
        .await
        .unwrap();
    wait_for_state(&mut states, |s| s.results.iter().any(|r| r.id == own.id && r.score() == 11.0)).await;

    other.delete(&theirs.id).await.unwrap();
    let snapshot = wait_for_state(&mut states, |s| s.results.len() == 1).await;
    assert!(snapshot.views.group_programs.is_empty());
    assert_eq!(snapshot.views.top_single_participants[0].student_name, "Asha");

    // The echo of our own add never duplicated it
    assert_eq!(provider.snapshot().results.len(), 1);

    provider.shutdown().await;
}
