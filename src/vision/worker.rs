//! Recognition worker
//!
//! Plumbs captured frames into the OCR engine and engine completions into
//! the frame scanner. At most one recognition is in flight; frames arriving
//! while busy are dropped and the next accepted frame starts from fresh
//! state. Stopping releases the engine and refuses further frames.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::capture::Frame;
use crate::vision::{FrameScanner, OcrEngine};

/// Drives frames through the OCR engine and the scanner
pub struct RecognitionWorker {
    engine: Option<Box<dyn OcrEngine>>,
    scanner: FrameScanner,
    in_flight: Arc<AtomicBool>,
}

impl RecognitionWorker {
    /// Create a worker around an OCR engine
    pub fn new(engine: Box<dyn OcrEngine>, scanner: FrameScanner) -> Self {
        Self {
            engine: Some(engine),
            scanner,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Feed one captured frame into recognition
    ///
    /// The frame is dropped when the worker is stopped or a recognition is
    /// already in flight. The completion runs on whatever thread the engine
    /// invokes it from; a recognition failure is logged and that frame is
    /// skipped.
    pub fn process_frame(&self, frame: Frame) {
        let Some(engine) = &self.engine else {
            debug!("worker stopped, frame dropped");
            return;
        };

        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("recognition in flight, frame dropped");
            return;
        }

        let scanner = self.scanner.clone();
        let in_flight = self.in_flight.clone();
        engine.recognize(
            frame,
            Box::new(move |result| {
                match result {
                    Ok(blocks) => {
                        scanner.scan(&blocks);
                    }
                    Err(e) => warn!("text recognition failed, frame skipped: {}", e),
                }
                in_flight.store(false, Ordering::Release);
            }),
        );
    }

    /// Whether a recognition is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Stop accepting frames and release the OCR engine
    ///
    /// A release failure is logged and otherwise ignored. An in-flight
    /// completion is not cancelled; its results still reach the scanner.
    pub fn stop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            info!("stopping recognition worker");
            if let Err(e) = engine.close() {
                warn!("failed to release text recognizer: {}", e);
            }
        }
    }
}

impl Drop for RecognitionWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
