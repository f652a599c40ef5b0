//! Per-frame scan driver
//!
//! Walks one frame's text blocks in order, fills the frame-local number and
//! expiry candidates, marks contributing blocks on the overlay, and posts a
//! completed card to the capture coordinator. Nothing survives the call:
//! partial matches are never combined across frames.

use std::sync::Arc;
use tracing::debug;

use crate::card::{extract_expiry, extract_number_with, Card, ExpiryDate, NumberPattern};
use crate::confirm::CaptureHandle;
use crate::overlay::{GraphicOverlay, TextGraphic};
use crate::vision::TextBlock;

/// Scans recognized text for a card number and expiry
#[derive(Clone)]
pub struct FrameScanner {
    overlay: Arc<GraphicOverlay>,
    capture: CaptureHandle,
    pattern: NumberPattern,
}

impl FrameScanner {
    /// Scanner with the default plausible-length window
    pub fn new(overlay: Arc<GraphicOverlay>, capture: CaptureHandle) -> Self {
        Self::with_pattern(overlay, capture, NumberPattern::default())
    }

    /// Scanner with a custom plausible-length window
    pub fn with_pattern(
        overlay: Arc<GraphicOverlay>,
        capture: CaptureHandle,
        pattern: NumberPattern,
    ) -> Self {
        Self {
            overlay,
            capture,
            pattern,
        }
    }

    /// Scan one frame's text blocks
    ///
    /// Clears the previous frame's marks, then walks the blocks in order.
    /// The first plausible number becomes the frame's card candidate,
    /// classified even when no issuer rule matches; the first expiry becomes
    /// the expiry candidate; both may come from the same block. Each fill
    /// marks its block on the overlay. Once both candidates are present the
    /// remaining blocks are not consulted, the expiry is attached, and the
    /// card is posted for confirmation. Returns the posted card, or `None`
    /// when the frame had no dual match.
    pub fn scan(&self, blocks: &[TextBlock]) -> Option<Card> {
        self.overlay.clear();

        let mut card: Option<Card> = None;
        let mut expiry: Option<ExpiryDate> = None;

        for block in blocks {
            if block.text.is_empty() {
                continue;
            }

            if card.is_none() {
                if let Some(digits) = extract_number_with(&block.text, &self.pattern) {
                    debug!("card number candidate found ({} digits)", digits.len());
                    card = Some(Card::from_digits(digits));
                    self.overlay.add(Box::new(TextGraphic::for_block(block)));
                }
            }

            if expiry.is_none() {
                if let Some(found) = extract_expiry(&block.text) {
                    debug!("expiry candidate found: {}", found);
                    expiry = Some(found);
                    self.overlay.add(Box::new(TextGraphic::for_block(block)));
                }
            }

            if card.is_some() && expiry.is_some() {
                break;
            }
        }

        match (card, expiry) {
            (Some(mut card), Some(expiry)) => {
                card.attach_expiry(expiry);
                debug!("{} detection complete, posting for confirmation", card.issuer());
                self.capture.post(card.clone());
                Some(card)
            }
            _ => None,
        }
    }
}
