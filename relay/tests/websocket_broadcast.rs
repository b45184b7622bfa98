//! End-to-end test of the WebSocket change channel

mod common;

use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use common::fixtures::single_draft;
use common::send;
use relay::{RealResultRepository, RelayServer};
use shared::ChangeEvent;

#[tokio::test]
async fn test_writes_are_pushed_to_socket_clients() {
    let server = Arc::new(RelayServer::new(RealResultRepository::new(), &[]).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let serving = Arc::clone(&server);
    tokio::spawn(async move { serving.serve(listener, std::future::pending()).await });

    let (mut socket, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();

    // The upgrade completes before the handler registers; wait for it
    let state = server.state();
    timeout(Duration::from_secs(2), async {
        while state.connection_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    let router = server.build_router();
    let (_, created) = send(&router, "POST", "/api", Some(single_draft("Asha"))).await;

    let frame = timeout(Duration::from_secs(2), socket.next()).await.unwrap().unwrap().unwrap();
    let text = match frame {
        Message::Text(text) => text,
        other => panic!("expected text frame, got {other:?}"),
    };
    let event = ChangeEvent::from_json(&text).unwrap();

    assert_eq!(event.kind(), "new-result");
    assert_eq!(event.target_id().as_str(), created["data"]["_id"].as_str().unwrap());
}
