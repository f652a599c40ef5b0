//! Capture confirmation state machine
//!
//! Detections and user actions reach the coordinator as messages over one
//! FIFO channel, so a post can never interleave with an in-flight user
//! action. The coordinator runs on the UI context: it owns the confirmation
//! surface, the capture state and the locked gate, and broadcasts the
//! outcome of a resolved capture as a [`CardEvent`].

pub mod events;

pub use events::{CardEvent, EventBroadcaster};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::card::Card;

/// Message consumed by the coordinator, in posting order
#[derive(Debug, Clone)]
pub enum CaptureMessage {
    /// A completed detection from the scanner
    Post(Card),
    /// User dismissed the confirmation without accepting
    Leave,
    /// User accepted the shown card
    Confirm,
    /// User asked to scan again
    Retry,
}

/// Terminal outcome of a capture cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accepted,
    Rejected,
}

/// Lifecycle of one capture cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// Nothing shown; a post may open a confirmation
    Idle,
    /// A detection is showing on the confirmation surface
    PendingConfirmation(Card),
    /// A terminal user action resolved the cycle
    Resolved(Resolution),
}

/// What the confirmation surface displays for one detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPayload {
    /// Issuer label used as the title
    pub issuer_label: String,
    /// Card number grouped for display
    pub number: String,
    /// Expiry as "MM/YY" when one was captured
    pub expiry: Option<String>,
}

impl ConfirmationPayload {
    fn for_card(card: &Card) -> Self {
        Self {
            issuer_label: card.issuer().label().to_string(),
            number: card.formatted_number(),
            expiry: card.expiry().map(|e| e.to_string()),
        }
    }

    /// Body text: the grouped number and, when present, the expiry
    pub fn message(&self) -> String {
        match &self.expiry {
            Some(expiry) => format!("Card number\n{}\n\nValid thru\n{}", self.number, expiry),
            None => format!("Card number\n{}", self.number),
        }
    }
}

/// Confirmation surface collaborator
///
/// `show` presents one payload. The surface reports `is_showing` until the
/// user acts; it dismisses itself as part of the action and feeds the action
/// back through a [`CaptureHandle`].
pub trait ConfirmationUi: Send {
    fn show(&mut self, payload: ConfirmationPayload);
    fn is_showing(&self) -> bool;
}

/// Clonable producer side of the coordinator's message channel
///
/// Held by the frame scanner and by the confirmation surface's action
/// callbacks. Sends never block; messages queue until the coordinator drains
/// them on the UI context.
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    tx: Sender<CaptureMessage>,
}

impl CaptureHandle {
    /// Post a completed detection
    pub fn post(&self, card: Card) {
        let _ = self.tx.send(CaptureMessage::Post(card));
    }

    /// Signal that the user dismissed the confirmation
    pub fn leave(&self) {
        let _ = self.tx.send(CaptureMessage::Leave);
    }

    /// Signal that the user accepted the shown card
    pub fn confirm(&self) {
        let _ = self.tx.send(CaptureMessage::Confirm);
    }

    /// Signal that the user asked to scan again
    pub fn retry(&self) {
        let _ = self.tx.send(CaptureMessage::Retry);
    }
}

/// Owns the confirmation protocol on the UI context
pub struct CaptureCoordinator {
    rx: Receiver<CaptureMessage>,
    handle: CaptureHandle,
    ui: Box<dyn ConfirmationUi>,
    events: EventBroadcaster,
    state: CaptureState,
    locked: bool,
}

impl CaptureCoordinator {
    /// Create a coordinator around a confirmation surface
    pub fn new(ui: Box<dyn ConfirmationUi>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            rx,
            handle: CaptureHandle { tx },
            ui,
            events: EventBroadcaster::new(),
            state: CaptureState::Idle,
            locked: false,
        }
    }

    /// Producer handle for the scanner and the surface's action callbacks
    pub fn handle(&self) -> CaptureHandle {
        self.handle.clone()
    }

    /// Subscribe to resolved-capture events
    pub fn subscribe(&self) -> Receiver<CardEvent> {
        self.events.subscribe()
    }

    /// Current capture state
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Whether a terminal action has locked out new confirmations
    ///
    /// Both confirm and leave lock; only retry re-arms.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Drain queued messages in posting order
    ///
    /// Call from the UI context only. Returns the number of messages
    /// handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            handled += 1;
        }
        handled
    }

    fn apply(&mut self, msg: CaptureMessage) {
        match msg {
            CaptureMessage::Post(card) => self.on_post(card),
            CaptureMessage::Leave => self.on_leave(),
            CaptureMessage::Confirm => self.on_confirm(),
            CaptureMessage::Retry => self.on_retry(),
        }
    }

    fn on_post(&mut self, card: Card) {
        if self.locked || self.ui.is_showing() {
            debug!("detection dropped, confirmation gate closed");
            return;
        }
        let payload = ConfirmationPayload::for_card(&card);
        debug!("showing confirmation for {} detection", payload.issuer_label);
        self.ui.show(payload);
        self.state = CaptureState::PendingConfirmation(card);
    }

    fn on_leave(&mut self) {
        self.locked = true;
        self.state = CaptureState::Resolved(Resolution::Rejected);
        debug!("capture rejected");
        self.events.broadcast(CardEvent::empty());
    }

    fn on_confirm(&mut self) {
        self.locked = true;
        let event = match &self.state {
            CaptureState::PendingConfirmation(card) => CardEvent::for_card(card),
            _ => CardEvent::empty(),
        };
        self.state = CaptureState::Resolved(Resolution::Accepted);
        debug!("capture accepted");
        self.events.broadcast(event);
    }

    fn on_retry(&mut self) {
        self.locked = false;
        self.state = CaptureState::Idle;
        debug!("capture re-armed for scanning");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ExpiryDate;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct UiLog {
        shown: Vec<ConfirmationPayload>,
        showing: bool,
    }

    /// Surface double shared between the test and the coordinator
    #[derive(Clone, Default)]
    struct SharedUi(Arc<Mutex<UiLog>>);

    impl SharedUi {
        fn dismiss(&self) {
            self.0.lock().showing = false;
        }

        fn shown_count(&self) -> usize {
            self.0.lock().shown.len()
        }

        fn last_payload(&self) -> ConfirmationPayload {
            self.0.lock().shown.last().cloned().unwrap()
        }
    }

    impl ConfirmationUi for SharedUi {
        fn show(&mut self, payload: ConfirmationPayload) {
            let mut log = self.0.lock();
            log.shown.push(payload);
            log.showing = true;
        }

        fn is_showing(&self) -> bool {
            self.0.lock().showing
        }
    }

    fn visa_with_expiry() -> Card {
        let mut card = Card::from_digits("4111111111111111");
        card.attach_expiry(ExpiryDate::new(3, 25));
        card
    }

    fn coordinator() -> (CaptureCoordinator, SharedUi) {
        let ui = SharedUi::default();
        (CaptureCoordinator::new(Box::new(ui.clone())), ui)
    }

    #[test]
    fn test_post_opens_confirmation() {
        let (mut coordinator, ui) = coordinator();
        coordinator.handle().post(visa_with_expiry());

        assert_eq!(coordinator.process_pending(), 1);
        assert_eq!(ui.shown_count(), 1);

        let payload = ui.last_payload();
        assert_eq!(payload.issuer_label, "VISA");
        assert_eq!(payload.number, "4111 1111 1111 1111");
        assert_eq!(payload.expiry.as_deref(), Some("03/25"));
        assert_eq!(
            payload.message(),
            "Card number\n4111 1111 1111 1111\n\nValid thru\n03/25"
        );
        assert!(matches!(
            coordinator.state(),
            CaptureState::PendingConfirmation(_)
        ));
    }

    #[test]
    fn test_posts_are_dropped_while_showing() {
        let (mut coordinator, ui) = coordinator();
        let handle = coordinator.handle();

        handle.post(visa_with_expiry());
        handle.post(Card::from_digits("371449635398431"));
        assert_eq!(coordinator.process_pending(), 2);

        // The second post found the surface showing and was dropped.
        assert_eq!(ui.shown_count(), 1);
    }

    #[test]
    fn test_leave_locks_and_broadcasts_empty() {
        let (mut coordinator, ui) = coordinator();
        let handle = coordinator.handle();
        let events = coordinator.subscribe();

        handle.post(visa_with_expiry());
        coordinator.process_pending();

        ui.dismiss();
        handle.leave();
        coordinator.process_pending();

        assert!(coordinator.is_locked());
        assert_eq!(
            coordinator.state(),
            &CaptureState::Resolved(Resolution::Rejected)
        );
        assert!(events.try_recv().unwrap().is_empty());

        // Locked: later posts do nothing even with the surface dismissed.
        handle.post(visa_with_expiry());
        coordinator.process_pending();
        assert_eq!(ui.shown_count(), 1);
    }

    #[test]
    fn test_confirm_broadcasts_card_and_locks() {
        let (mut coordinator, ui) = coordinator();
        let handle = coordinator.handle();
        let events = coordinator.subscribe();

        handle.post(visa_with_expiry());
        coordinator.process_pending();
        ui.dismiss();
        handle.confirm();
        coordinator.process_pending();

        assert!(coordinator.is_locked());
        assert_eq!(
            coordinator.state(),
            &CaptureState::Resolved(Resolution::Accepted)
        );
        let event = events.try_recv().unwrap();
        assert_eq!(event.card_number.as_deref(), Some("4111111111111111"));
        assert_eq!(event.card_date.as_deref(), Some("0325"));
    }

    #[test]
    fn test_confirm_without_pending_card_broadcasts_empty() {
        let (mut coordinator, _ui) = coordinator();
        let events = coordinator.subscribe();

        coordinator.handle().confirm();
        coordinator.process_pending();

        assert!(coordinator.is_locked());
        assert!(events.try_recv().unwrap().is_empty());
    }

    #[test]
    fn test_retry_rearms_after_either_terminal_action() {
        let (mut coordinator, ui) = coordinator();
        let handle = coordinator.handle();

        handle.post(visa_with_expiry());
        coordinator.process_pending();
        ui.dismiss();
        handle.leave();
        coordinator.process_pending();
        assert!(coordinator.is_locked());

        handle.retry();
        coordinator.process_pending();
        assert!(!coordinator.is_locked());
        assert_eq!(coordinator.state(), &CaptureState::Idle);

        handle.post(Card::from_digits("5105105105105100"));
        coordinator.process_pending();
        assert_eq!(ui.shown_count(), 2);
        assert_eq!(ui.last_payload().issuer_label, "MasterCard");
    }

    #[test]
    fn test_messages_apply_in_posting_order() {
        let (mut coordinator, ui) = coordinator();
        let handle = coordinator.handle();

        // Queued before any processing: the second post must still see the
        // surface opened by the first.
        handle.post(visa_with_expiry());
        handle.post(Card::from_digits("371449635398431"));
        handle.confirm();

        assert_eq!(coordinator.process_pending(), 3);
        assert_eq!(ui.shown_count(), 1);
        assert_eq!(
            coordinator.state(),
            &CaptureState::Resolved(Resolution::Accepted)
        );
    }

    #[test]
    fn test_payload_without_expiry_omits_valid_thru() {
        let payload = ConfirmationPayload::for_card(&Card::from_digits("4111111111111111"));
        assert_eq!(payload.expiry, None);
        assert_eq!(payload.message(), "Card number\n4111 1111 1111 1111");
    }

    #[test]
    fn test_unknown_issuer_still_confirms() {
        let (mut coordinator, ui) = coordinator();
        coordinator.handle().post(Card::from_digits("9999999999999"));
        coordinator.process_pending();

        assert_eq!(ui.last_payload().issuer_label, "Unknown card");
        assert_eq!(ui.last_payload().number, "9999999999999");
    }
}
