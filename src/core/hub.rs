//! The broadcast hub: one event loop owning the live-subscriber registry.
//!
//! The hub is the only component that reads or mutates the registry. All
//! membership changes and fan-outs arrive as events on three rendezvous
//! channels and are processed strictly one at a time, so the registry needs
//! no locking at all. Fan-out never waits on a subscriber: a full mailbox
//! loses the message for that subscriber only.

use std::collections::HashMap;

use flume::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::core::error::FanError;
use crate::core::message::Message;
use crate::core::subscriber::{Subscriber, SubscriberId};

/// Cloneable handle used by ingress and ingest to submit events to the hub.
///
/// Every send rendezvouses with the event loop: a call completes once the
/// hub has taken the event, not once it has been acted on downstream.
#[derive(Debug, Clone)]
pub struct HubHandle {
    subscribe_tx: Sender<Subscriber>,
    unsubscribe_tx: Sender<SubscriberId>,
    publish_tx: Sender<Message>,
}

impl HubHandle {
    /// Registers a live subscriber. Membership takes effect before the call
    /// returns.
    pub async fn subscribe(&self, subscriber: Subscriber) {
        if self.subscribe_tx.send_async(subscriber).await.is_err() {
            debug!("subscribe after hub shutdown");
        }
    }

    /// Removes a subscriber. Removing an id that is not a member is a no-op.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        if self.unsubscribe_tx.send_async(id).await.is_err() {
            debug!("unsubscribe after hub shutdown");
        }
    }

    /// Hands one message to the hub for fan-out. Completes when the hub has
    /// accepted ownership of the message, not when any subscriber has
    /// received it.
    pub async fn publish(&self, message: Message) {
        if self.publish_tx.send_async(message).await.is_err() {
            debug!("publish after hub shutdown");
        }
    }
}

/// The authoritative set of live subscribers. Owned and mutated only by the
/// hub event loop.
#[derive(Debug, Default)]
struct Registry {
    members: HashMap<SubscriberId, Subscriber>,
    dropped: u64,
}

impl Registry {
    fn insert(&mut self, subscriber: Subscriber) {
        info!(
            subscriber = %subscriber.id(),
            peer = %subscriber.peer_addr(),
            count = self.members.len() + 1,
            "new subscriber"
        );
        self.members.insert(subscriber.id(), subscriber);
    }

    fn remove(&mut self, id: SubscriberId) {
        if self.members.remove(&id).is_some() {
            info!(subscriber = %id, count = self.members.len(), "subscriber removed");
        }
    }

    /// Enqueues `message` into every member's mailbox. Iteration order is
    /// unspecified; per-member mailbox order follows event arrival order.
    fn fan_out(&mut self, message: Message) {
        debug!(
            subscribers = self.members.len(),
            bytes = message.len(),
            "fan-out"
        );
        for subscriber in self.members.values() {
            match subscriber.enqueue(message.clone()) {
                Ok(()) => {}
                Err(FanError::MailboxFull) => {
                    self.dropped += 1;
                    warn!(
                        subscriber = %subscriber.id(),
                        dropped_total = self.dropped,
                        "mailbox full, message dropped for this subscriber"
                    );
                }
                Err(FanError::MailboxClosed) => {
                    // Writer already exited; its unsubscribe is in flight.
                    debug!(subscriber = %subscriber.id(), "mailbox closed, skipping");
                }
            }
        }
    }
}

/// Event-loop half of the hub. Construct with [`Hub::new`] and drive it on a
/// dedicated task; it runs until every [`HubHandle`] has been dropped.
#[derive(Debug)]
pub struct Hub {
    registry: Registry,
    subscribe_rx: Receiver<Subscriber>,
    unsubscribe_rx: Receiver<SubscriberId>,
    publish_rx: Receiver<Message>,
}

impl Hub {
    pub fn new() -> (Self, HubHandle) {
        // Rendezvous channels: a submitter parks until the loop takes the
        // event, the async equivalent of an unbuffered handoff.
        let (subscribe_tx, subscribe_rx) = flume::bounded(0);
        let (unsubscribe_tx, unsubscribe_rx) = flume::bounded(0);
        let (publish_tx, publish_rx) = flume::bounded(0);

        (
            Hub {
                registry: Registry::default(),
                subscribe_rx,
                unsubscribe_rx,
                publish_rx,
            },
            HubHandle {
                subscribe_tx,
                unsubscribe_tx,
                publish_tx,
            },
        )
    }

    /// Processes events one at a time, to completion, until all handles are
    /// gone. No fairness across the three channels; per-channel order is
    /// FIFO.
    pub async fn run(self) {
        let Hub {
            mut registry,
            subscribe_rx,
            unsubscribe_rx,
            publish_rx,
        } = self;

        loop {
            tokio::select! {
                Ok(subscriber) = subscribe_rx.recv_async() => registry.insert(subscriber),
                Ok(id) = unsubscribe_rx.recv_async() => registry.remove(id),
                Ok(message) = publish_rx.recv_async() => registry.fan_out(message),
                else => break,
            }
        }

        debug!("hub event loop stopped");
    }
}
