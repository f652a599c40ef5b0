//! Text recognition boundary
//!
//! The OCR engine is a collaborator outside this crate. It takes a frame and
//! later completes, on whatever thread it likes, with the frame's text
//! blocks or an error. Engine failures never propagate past the worker: the
//! frame is logged and dropped.

pub mod scanner;
pub mod worker;

pub use scanner::FrameScanner;
pub use worker::RecognitionWorker;

use thiserror::Error;

use crate::capture::Frame;

/// One unit of recognized text within a frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Recognized text, exactly as the engine produced it
    pub text: String,
    /// Bounding box in preview coordinates, when the engine provides one
    pub bounds: Option<BlockBounds>,
}

impl TextBlock {
    /// Block carrying text only
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: None,
        }
    }

    /// Block carrying text and a preview-space bounding box
    pub fn with_bounds(text: impl Into<String>, bounds: BlockBounds) -> Self {
        Self {
            text: text.into(),
            bounds: Some(bounds),
        }
    }
}

/// Axis-aligned block bounds in preview coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Error reported by an OCR engine for one frame
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine failed while recognizing the frame
    #[error("text recognition failed")]
    Recognition(#[source] anyhow::Error),
    /// The engine cannot process frames of this shape at all
    #[error("unsupported frame: {0}")]
    UnsupportedFrame(String),
}

/// Completion for one frame of recognition; may run on any thread
pub type OcrCompletion = Box<dyn FnOnce(Result<Vec<TextBlock>, OcrError>) + Send + 'static>;

/// Asynchronous text recognition engine
///
/// `recognize` must invoke `done` exactly once, on any thread. `close`
/// releases whatever native resource the engine holds; the worker logs a
/// failure there and carries on.
pub trait OcrEngine: Send {
    /// Begin recognition of one frame
    fn recognize(&self, frame: Frame, done: OcrCompletion);

    /// Release the engine's resources
    fn close(&mut self) -> anyhow::Result<()>;
}
