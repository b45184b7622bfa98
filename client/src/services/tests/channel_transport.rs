//! Tests for the in-process change transport

use tokio::sync::mpsc;

use super::fixtures::create_new_event;
use super::helpers::{assert_no_event, recv_event, recv_transport_event};
use crate::services::ChannelTransport;
use crate::traits::ChangeTransport;
use crate::types::TransportEvent;

#[tokio::test]
async fn test_events_reach_subscriber_in_order() {
    let transport = ChannelTransport::default();
    let (sink, mut events) = mpsc::channel(8);
    let _subscription = transport.subscribe(sink).await.unwrap();

    transport.publish(create_new_event("a"));
    transport.publish(create_new_event("b"));

    assert_eq!(recv_event(&mut events).await.target_id().as_str(), "a");
    assert_eq!(recv_event(&mut events).await.target_id().as_str(), "b");
}

#[tokio::test]
async fn test_every_subscriber_receives_each_event() {
    let transport = ChannelTransport::default();
    let (first_sink, mut first) = mpsc::channel(8);
    let (second_sink, mut second) = mpsc::channel(8);
    let _first_sub = transport.subscribe(first_sink).await.unwrap();
    let _second_sub = transport.subscribe(second_sink).await.unwrap();

    assert_eq!(transport.subscriber_count(), 2);
    assert_eq!(transport.publish(create_new_event("x")), 2);

    assert_eq!(recv_event(&mut first).await, create_new_event("x"));
    assert_eq!(recv_event(&mut second).await, create_new_event("x"));
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery() {
    let transport = ChannelTransport::default();
    let (sink, mut events) = mpsc::channel(8);
    let subscription = transport.subscribe(sink).await.unwrap();
    assert!(subscription.is_active());

    subscription.unsubscribe().await;
    transport.publish(create_new_event("late"));

    assert_no_event(&mut events).await;
    assert_eq!(transport.subscriber_count(), 0);
}

#[tokio::test]
async fn test_publish_without_subscribers_is_dropped() {
    let transport = ChannelTransport::new(4);
    assert_eq!(transport.publish(create_new_event("nobody")), 0);
}

#[tokio::test]
async fn test_resync_reaches_subscriber_between_changes() {
    let transport = ChannelTransport::default();
    let (sink, mut events) = mpsc::channel(8);
    let _subscription = transport.subscribe(sink).await.unwrap();

    transport.publish(create_new_event("a"));
    assert_eq!(transport.resync(), 1);
    transport.publish(create_new_event("b"));

    assert_eq!(recv_event(&mut events).await.target_id().as_str(), "a");
    assert_eq!(recv_transport_event(&mut events).await, TransportEvent::Resync);
    assert_eq!(recv_event(&mut events).await.target_id().as_str(), "b");
}

#[tokio::test]
async fn test_lagging_subscriber_is_told_to_resync() {
    let transport = ChannelTransport::new(2);
    let (sink, mut events) = mpsc::channel(8);
    let _subscription = transport.subscribe(sink).await.unwrap();

    // Overflow the broadcast buffer before the forwarder gets to run
    for id in ["a", "b", "c", "d", "e"] {
        transport.publish(create_new_event(id));
    }

    let mut saw_resync = false;
    while let Ok(Some(event)) = tokio::time::timeout(std::time::Duration::from_millis(100), events.recv()).await {
        if event == TransportEvent::Resync {
            saw_resync = true;
        }
    }
    assert!(saw_resync);
}
