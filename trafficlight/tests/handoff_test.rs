use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, timeout};
use trafficlight::concurrency::handoff::HandoffQueue;
use trafficlight_telemetry::init_test_tracing;

#[tokio::test(flavor = "multi_thread")]
async fn receive_returns_values_newest_first() {
    init_test_tracing();

    let queue = HandoffQueue::new();

    queue.send('a').await;
    queue.send('b').await;
    queue.send('c').await;

    assert_eq!(queue.receive().await, 'c');
    assert_eq!(queue.receive().await, 'b');
    assert_eq!(queue.receive().await, 'a');
}

#[tokio::test(flavor = "multi_thread")]
async fn receive_suspends_until_a_value_is_sent() {
    init_test_tracing();

    let queue = Arc::new(HandoffQueue::new());

    let sender = tokio::spawn({
        let queue = queue.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            queue.send(42).await;
        }
    });

    let started_at = Instant::now();
    let value = timeout(Duration::from_secs(2), queue.receive())
        .await
        .expect("receive did not return after the send");
    let elapsed = started_at.elapsed();

    assert_eq!(value, 42);
    assert!(
        elapsed >= Duration::from_millis(200),
        "receive returned after {elapsed:?}, before the send happened"
    );

    sender.await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn sends_pair_with_suspended_receivers() {
    init_test_tracing();

    // Stress the registration/wakeup handshake across many interleavings: a
    // hung receiver here means a wakeup was lost.
    for round in 0..100u32 {
        let queue = Arc::new(HandoffQueue::new());

        let receiver = tokio::spawn({
            let queue = queue.clone();
            async move { queue.receive().await }
        });

        // Shift the interleaving between receiver registration and the send.
        if round % 2 == 0 {
            tokio::task::yield_now().await;
        }

        queue.send(round).await;

        let received = timeout(Duration::from_secs(1), receiver)
            .await
            .expect("receiver hung: a wakeup was lost")
            .unwrap();
        assert_eq!(received, round);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn each_send_wakes_at_most_one_receiver() {
    init_test_tracing();

    let queue = Arc::new(HandoffQueue::new());

    let mut receivers = Vec::new();
    for _ in 0..3 {
        receivers.push(tokio::spawn({
            let queue = queue.clone();
            async move { queue.receive().await }
        }));
    }

    // Let the receivers park on the empty queue before sending.
    tokio::time::sleep(Duration::from_millis(50)).await;

    for value in [1, 2, 3] {
        queue.send(value).await;
    }

    let mut received = Vec::new();
    for receiver in receivers {
        let value = timeout(Duration::from_secs(1), receiver)
            .await
            .expect("receiver hung: a wakeup was lost")
            .unwrap();
        received.push(value);
    }

    // No ordering guarantee across waiters, but every sent value is delivered
    // exactly once.
    received.sort_unstable();
    assert_eq!(received, vec![1, 2, 3]);
}

#[tokio::test(flavor = "multi_thread")]
async fn try_receive_returns_without_suspending() {
    init_test_tracing();

    let queue: HandoffQueue<u32> = HandoffQueue::new();

    assert_eq!(queue.try_receive().await, None);

    queue.send(7).await;

    assert_eq!(queue.try_receive().await, Some(7));
    assert_eq!(queue.try_receive().await, None);
}
