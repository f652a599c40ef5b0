//! Captured frames and camera geometry
//!
//! Frames come from the camera pipeline, a collaborator outside this crate,
//! and are handed to the OCR engine untouched. Camera geometry feeds the
//! overlay's preview-to-view coordinate transform.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A captured frame from the camera preview
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp when the frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Create a new frame from raw pixel data
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Which camera produced the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    /// Rear camera; overlay coordinates map straight through
    #[default]
    Back,
    /// Front camera; overlay X coordinates are mirrored around the view width
    Front,
}

/// Camera preview size and facing direction
///
/// Preview dimensions of zero mean the camera has not reported a size yet;
/// the overlay keeps its current scale factors until both are nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraGeometry {
    /// Preview width in pixels
    pub preview_width: u32,
    /// Preview height in pixels
    pub preview_height: u32,
    /// Camera facing direction
    pub facing: CameraFacing,
}
