//! Scale scenario: 20 subscribers, 20 publishers, 50 messages each. Every
//! subscriber must observe all 1000 messages with each publisher's sequence
//! in emission order.

#[path = "common.rs"]
mod common;

use std::collections::HashMap;
use std::time::Duration;

use fanmq::client::{Publisher, Subscription};
use fanmq::Config;
use tokio::time::timeout;

const SUBSCRIBERS: usize = 20;
const PUBLISHERS: usize = 20;
const MESSAGES_PER_PUBLISHER: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fanout_scale_preserves_per_publisher_order() {
    common::init_logging();

    let mut config = Config::default();
    // Lagging test readers must never overflow their mailboxes; a drop
    // would fail the delivery count below.
    config.delivery.mailbox_capacity = PUBLISHERS * MESSAGES_PER_PUBLISHER;
    let addr = common::spawn_broker(config).await.to_string();

    let total = PUBLISHERS * MESSAGES_PER_PUBLISHER;

    let mut readers = Vec::new();
    for _ in 0..SUBSCRIBERS {
        let mut subscription = Subscription::connect(&addr).await.unwrap();
        readers.push(tokio::spawn(async move {
            let mut received = Vec::with_capacity(total);
            while received.len() < total {
                let payload = timeout(Duration::from_secs(30), subscription.next_message())
                    .await
                    .expect("timed out waiting for broadcast")
                    .unwrap()
                    .expect("connection closed early");
                received.push(String::from_utf8(payload.to_vec()).unwrap());
            }
            received
        }));
    }

    // Let every subscription reach the registry before the first publish.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut writers = Vec::new();
    for publisher_id in 0..PUBLISHERS {
        let addr = addr.clone();
        writers.push(tokio::spawn(async move {
            let publisher = Publisher::new(&addr);
            for seq in 0..MESSAGES_PER_PUBLISHER {
                publisher
                    .publish(format!("{publisher_id}:{seq}"))
                    .await
                    .expect("publish failed");
            }
        }));
    }
    for writer in writers {
        writer.await.unwrap();
    }

    for reader in readers {
        let received = reader.await.unwrap();
        assert_eq!(received.len(), total);

        // Within one publisher's stream, sequence numbers must ascend.
        let mut last_seen: HashMap<usize, usize> = HashMap::new();
        for entry in &received {
            let (publisher_id, seq) = entry.split_once(':').unwrap();
            let publisher_id: usize = publisher_id.parse().unwrap();
            let seq: usize = seq.parse().unwrap();
            if let Some(prev) = last_seen.insert(publisher_id, seq) {
                assert!(
                    prev < seq,
                    "publisher {publisher_id} reordered: {prev} before {seq}"
                );
            }
        }
        for (publisher_id, last) in last_seen {
            assert_eq!(
                last,
                MESSAGES_PER_PUBLISHER - 1,
                "publisher {publisher_id} incomplete"
            );
        }
    }
}
