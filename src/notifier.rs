//! Live update fan-out
//!
//! Keeps the registry of connected viewers and pushes typed envelopes to
//! every open subscription. Delivery is at-most-once and best-effort: a
//! subscriber that connects after a broadcast never sees it, and a failed
//! enqueue closes that subscription without touching the others.
//!
//! `broadcast` only enqueues; the per-connection socket task drains the
//! channel outside any lock, so the correlation path never waits on I/O.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::{Alert, HoneypotAttack, SystemStats};

/// Wire envelope delivered to subscribers as
/// `{"type": "...", "payload": {...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Envelope {
    NewAlert(Alert),
    HoneypotAttack(HoneypotAttack),
    StatsUpdate(SystemStats),
}

/// Subscription lifecycle. `Closed` is terminal; reconnecting means a new
/// subscription with a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberState {
    Connecting,
    Open,
}

struct Subscriber {
    state: SubscriberState,
    tx: mpsc::UnboundedSender<Envelope>,
}

pub struct Notifier {
    subscribers: RwLock<HashMap<Uuid, Subscriber>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new subscription in `Connecting` state. The caller owns
    /// the receiving half and promotes the subscription with [`open`]
    /// once its transport is ready.
    ///
    /// [`open`]: Notifier::open
    pub fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.write().insert(
            id,
            Subscriber {
                state: SubscriberState::Connecting,
                tx,
            },
        );
        tracing::debug!(subscriber = %id, "Subscriber connecting");
        (id, rx)
    }

    /// Handshake finished; the subscription starts receiving broadcasts.
    pub fn open(&self, id: Uuid) {
        if let Some(sub) = self.subscribers.write().get_mut(&id) {
            sub.state = SubscriberState::Open;
            tracing::debug!(subscriber = %id, "Subscriber open");
        }
    }

    /// Explicit disconnect, transport error, or shutdown. Terminal: the
    /// subscription leaves the active set and is never re-opened.
    pub fn close(&self, id: Uuid) {
        if self.subscribers.write().remove(&id).is_some() {
            tracing::debug!(subscriber = %id, "Subscriber closed");
        }
    }

    /// Enqueue an envelope to every open subscriber. Subscribers whose
    /// channel is gone transition to closed and are removed; the rest are
    /// unaffected. FIFO order holds per subscriber.
    pub fn broadcast(&self, envelope: &Envelope) {
        let mut dead = Vec::new();
        {
            let subscribers = self.subscribers.read();
            for (id, sub) in subscribers.iter() {
                if sub.state != SubscriberState::Open {
                    continue;
                }
                if sub.tx.send(envelope.clone()).is_err() {
                    dead.push(*id);
                }
            }
        }

        for id in dead {
            tracing::debug!(subscriber = %id, "Dropping subscriber with closed channel");
            self.close(id);
        }
    }

    pub fn open_count(&self) -> usize {
        self.subscribers
            .read()
            .values()
            .filter(|s| s.state == SubscriberState::Open)
            .count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
