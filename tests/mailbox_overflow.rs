//! Overflow policy: a full mailbox loses the new message for that
//! subscriber only, and never stalls the hub event loop.

#[path = "common.rs"]
mod common;

use std::time::Duration;

use fanmq::core::error::FanError;
use fanmq::core::hub::Hub;
use fanmq::core::message::new_message;
use fanmq::core::subscriber::Subscriber;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(1);

#[test]
fn full_mailbox_rejects_the_new_message() {
    let (subscriber, mut mailbox) = Subscriber::new(common::peer_addr(), 1);

    subscriber.enqueue(new_message("m1")).unwrap();
    assert_eq!(
        subscriber.enqueue(new_message("m2")),
        Err(FanError::MailboxFull)
    );

    // The oldest message is the one kept.
    let stored = mailbox.try_recv().unwrap();
    assert_eq!(stored.payload().as_ref(), b"m1");
    assert!(mailbox.try_recv().is_err());
}

#[test]
fn closed_mailbox_reports_closed() {
    let (subscriber, mailbox) = Subscriber::new(common::peer_addr(), 1);
    drop(mailbox);

    assert_eq!(
        subscriber.enqueue(new_message("m1")),
        Err(FanError::MailboxClosed)
    );
}

#[tokio::test]
async fn saturated_subscriber_does_not_stall_the_hub() {
    common::init_logging();

    let (hub, handle) = Hub::new();
    tokio::spawn(hub.run());

    // Never drained: saturates after one message.
    let (stalled, mut stalled_mailbox) = Subscriber::new(common::peer_addr(), 1);
    let (healthy, mut healthy_mailbox) = Subscriber::new(common::peer_addr(), 64);
    handle.subscribe(stalled).await;
    handle.subscribe(healthy).await;

    for i in 0..20 {
        timeout(WAIT, handle.publish(new_message(format!("m{i}"))))
            .await
            .expect("publish stalled behind a saturated subscriber");
    }

    // The healthy subscriber observed every message, in order.
    for i in 0..20 {
        let got = common::recv_within(&mut healthy_mailbox, WAIT).await.unwrap();
        assert_eq!(got.payload().as_ref(), format!("m{i}").as_bytes());
    }

    // The stalled mailbox kept only its first message; the overflow was
    // dropped for that subscriber alone.
    let stored = stalled_mailbox.try_recv().unwrap();
    assert_eq!(stored.payload().as_ref(), b"m0");
    assert!(stalled_mailbox.try_recv().is_err());

    // Membership changes still flow while the stalled mailbox stays full.
    let (late, mut late_mailbox) = Subscriber::new(common::peer_addr(), 8);
    handle.subscribe(late).await;
    handle.publish(new_message("late")).await;

    let got = common::recv_within(&mut late_mailbox, WAIT).await.unwrap();
    assert_eq!(got.payload().as_ref(), b"late");
}
