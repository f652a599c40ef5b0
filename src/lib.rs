//! Payment-card capture core
//!
//! Extracts card numbers and expiry dates from per-frame OCR text,
//! classifies the issuer, and keeps a mirrorable camera overlay and a
//! one-shot confirmation flow consistent between the recognition thread and
//! the UI context.
//!
//! The camera pipeline, the OCR engine, the drawing surface and the
//! confirmation dialog are collaborators behind traits ([`OcrEngine`],
//! [`DrawContext`], [`ConfirmationUi`]); this crate owns everything between
//! them.
//!
//! A capture cycle looks like this:
//!
//! 1. The host feeds frames to a [`RecognitionWorker`], which drops frames
//!    while a recognition is in flight.
//! 2. Each completion runs through the [`FrameScanner`]: extract a number
//!    and an expiry from the frame's text blocks, mark contributing blocks
//!    on the [`GraphicOverlay`], and post a completed [`Card`].
//! 3. The [`CaptureCoordinator`] shows the detection on the confirmation
//!    surface; confirm or leave resolves the cycle and broadcasts a
//!    [`CardEvent`], retry re-arms scanning.

pub mod capture;
pub mod card;
pub mod config;
pub mod confirm;
pub mod overlay;
pub mod vision;

pub use capture::{CameraFacing, CameraGeometry, Frame};
pub use card::{Card, CardIssuer, ExpiryDate, NumberPattern};
pub use config::{load_config, save_config, ScanConfig};
pub use confirm::{
    CaptureCoordinator, CaptureHandle, CaptureMessage, CaptureState, CardEvent,
    ConfirmationPayload, ConfirmationUi, EventBroadcaster, Resolution,
};
pub use overlay::{
    DrawContext, GraphicId, GraphicOverlay, OverlayGraphic, TextGraphic, ViewTransform,
};
pub use vision::{
    BlockBounds, FrameScanner, OcrCompletion, OcrEngine, OcrError, RecognitionWorker, TextBlock,
};
