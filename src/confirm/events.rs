//! Resolved-capture notification
//!
//! The only externally observable side effect of a resolved capture: a
//! fire-and-forget broadcast carrying the accepted card's number and date,
//! or nothing at all for a rejection.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Payload of one resolved capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEvent {
    /// Digit-only card number; absent when the capture was rejected
    pub card_number: Option<String>,
    /// Expiry as "MMYY"; absent on rejection or when no expiry was captured
    pub card_date: Option<String>,
}

impl CardEvent {
    /// Event carrying no card data
    pub fn empty() -> Self {
        Self {
            card_number: None,
            card_date: None,
        }
    }

    /// Event carrying `card`'s number and date
    pub fn for_card(card: &Card) -> Self {
        Self {
            card_number: Some(card.number().to_string()),
            card_date: card.expiry().map(|e| e.mmyy()),
        }
    }

    /// True when the event carries no card data
    pub fn is_empty(&self) -> bool {
        self.card_number.is_none() && self.card_date.is_none()
    }
}

/// Fans resolved-capture events out to every live subscriber
///
/// Delivery is fire-and-forget: no acknowledgment, no guarantee beyond the
/// channel itself. Subscribers that dropped their receiver are pruned on the
/// next broadcast.
pub struct EventBroadcaster {
    subscribers: Mutex<Vec<Sender<CardEvent>>>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Receiver<CardEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Send `event` to every live subscriber
    pub fn broadcast(&self, event: CardEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Subscribers still registered; drops are only detected on broadcast
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
