//! Live camera overlay state
//!
//! A thread-safe set of graphics rendered on top of the camera preview.
//! Detections are expressed in preview coordinates and scaled up to the view
//! at render time, mirrored horizontally for the front camera. The graphics
//! list and the camera geometry live under one lock: scale factors derive
//! from the geometry and are consumed by the same render pass that walks the
//! list, so no pass can observe one without the other.

pub mod graphics;

pub use graphics::{DrawContext, GraphicId, OverlayGraphic, TextGraphic};

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::capture::{CameraFacing, CameraGeometry};

/// Scale and mirror state captured for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    width_scale: f32,
    height_scale: f32,
    view_width: f32,
    mirrored: bool,
}

impl ViewTransform {
    /// Transform with explicit factors, for hosts testing their own graphics
    pub fn new(width_scale: f32, height_scale: f32, view_width: f32, mirrored: bool) -> Self {
        Self {
            width_scale,
            height_scale,
            view_width,
            mirrored,
        }
    }

    /// Scale a horizontal size from preview to view space
    pub fn scale_x(&self, horizontal: f32) -> f32 {
        horizontal * self.width_scale
    }

    /// Scale a vertical size from preview to view space
    pub fn scale_y(&self, vertical: f32) -> f32 {
        vertical * self.height_scale
    }

    /// Translate an x coordinate from preview to view space
    ///
    /// Mirrored around the view width for the front camera so graphics track
    /// what the user sees in the preview.
    pub fn translate_x(&self, x: f32) -> f32 {
        if self.mirrored {
            self.view_width - self.scale_x(x)
        } else {
            self.scale_x(x)
        }
    }

    /// Translate a y coordinate from preview to view space; never mirrored
    pub fn translate_y(&self, y: f32) -> f32 {
        self.scale_y(y)
    }
}

struct OverlayInner {
    geometry: CameraGeometry,
    width_scale: f32,
    height_scale: f32,
    graphics: Vec<(GraphicId, Box<dyn OverlayGraphic>)>,
}

/// Thread-safe overlay shared between the recognition worker and the host
pub struct GraphicOverlay {
    inner: Mutex<OverlayInner>,
    redraw_requested: AtomicBool,
}

impl GraphicOverlay {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OverlayInner {
                geometry: CameraGeometry::default(),
                width_scale: 1.0,
                height_scale: 1.0,
                graphics: Vec::new(),
            }),
            redraw_requested: AtomicBool::new(false),
        }
    }

    /// Remove all graphics
    pub fn clear(&self) {
        self.inner.lock().graphics.clear();
        self.request_redraw();
    }

    /// Append a graphic, returning its identity handle
    pub fn add(&self, graphic: Box<dyn OverlayGraphic>) -> GraphicId {
        let id = GraphicId::new();
        self.inner.lock().graphics.push((id, graphic));
        self.request_redraw();
        id
    }

    /// Remove one graphic by identity
    ///
    /// Returns false when no graphic with that handle is present; a redraw
    /// is requested either way.
    pub fn remove(&self, id: GraphicId) -> bool {
        let removed = {
            let mut inner = self.inner.lock();
            let before = inner.graphics.len();
            inner.graphics.retain(|(gid, _)| *gid != id);
            inner.graphics.len() != before
        };
        self.request_redraw();
        removed
    }

    /// Number of graphics currently held
    pub fn len(&self) -> usize {
        self.inner.lock().graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Update the preview size and facing the transform derives from
    pub fn set_camera_geometry(
        &self,
        preview_width: u32,
        preview_height: u32,
        facing: CameraFacing,
    ) {
        {
            let mut inner = self.inner.lock();
            inner.geometry = CameraGeometry {
                preview_width,
                preview_height,
                facing,
            };
        }
        self.request_redraw();
    }

    /// Current camera geometry
    pub fn camera_geometry(&self) -> CameraGeometry {
        self.inner.lock().geometry
    }

    /// Render every graphic in insertion order
    ///
    /// Scale factors are recomputed from the current geometry and the given
    /// view size only when both preview dimensions are nonzero; otherwise
    /// they keep their previous value (1.0 before the first recompute).
    /// Rendering reads state without raising the redraw request.
    pub fn render(&self, view_width: u32, view_height: u32, ctx: &mut dyn DrawContext) {
        let mut inner = self.inner.lock();

        if inner.geometry.preview_width != 0 && inner.geometry.preview_height != 0 {
            inner.width_scale = view_width as f32 / inner.geometry.preview_width as f32;
            inner.height_scale = view_height as f32 / inner.geometry.preview_height as f32;
        }

        let transform = ViewTransform {
            width_scale: inner.width_scale,
            height_scale: inner.height_scale,
            view_width: view_width as f32,
            mirrored: inner.geometry.facing == CameraFacing::Front,
        };

        for (_, graphic) in &inner.graphics {
            graphic.draw(ctx, &transform);
        }
    }

    /// Consume the pending redraw request, if any
    ///
    /// Hosts poll this from their render loop and call [`render`] when it
    /// returns true.
    ///
    /// [`render`]: GraphicOverlay::render
    pub fn take_redraw_request(&self) -> bool {
        self.redraw_requested.swap(false, Ordering::AcqRel)
    }

    fn request_redraw(&self) {
        self.redraw_requested.store(true, Ordering::Release);
    }
}

impl Default for GraphicOverlay {
    fn default() -> Self {
        Self::new()
    }
}
