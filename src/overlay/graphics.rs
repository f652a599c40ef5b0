//! Overlay graphics
//!
//! Graphics live behind the [`OverlayGraphic`] trait and draw themselves
//! through a [`DrawContext`] supplied by the rendering host. The scale and
//! mirror state current at render time arrives as a [`ViewTransform`];
//! graphics never reach into overlay state directly.

use uuid::Uuid;

use crate::overlay::ViewTransform;
use crate::vision::{BlockBounds, TextBlock};

/// Identity handle for a graphic added to the overlay
///
/// Two graphics with identical content still compare unequal; removal goes
/// by the handle returned from [`GraphicOverlay::add`].
///
/// [`GraphicOverlay::add`]: crate::overlay::GraphicOverlay::add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicId(Uuid);

impl GraphicId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Primitive drawing surface supplied by the rendering host
///
/// All coordinates reaching this trait are view coordinates; the overlay
/// applies the preview-to-view transform before any call lands here.
pub trait DrawContext {
    /// Draw an axis-aligned rectangle outline
    fn draw_rect(&mut self, left: f32, top: f32, right: f32, bottom: f32);

    /// Draw a text run anchored at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
}

/// A drawable item owned by the overlay
pub trait OverlayGraphic: Send {
    /// Draw in view coordinates using the transform current at render time
    fn draw(&self, ctx: &mut dyn DrawContext, transform: &ViewTransform);
}

/// Marks one recognized text block with its box and text
#[derive(Debug, Clone)]
pub struct TextGraphic {
    text: String,
    bounds: Option<BlockBounds>,
}

impl TextGraphic {
    /// Graphic marking `block`
    pub fn for_block(block: &TextBlock) -> Self {
        Self {
            text: block.text.clone(),
            bounds: block.bounds,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl OverlayGraphic for TextGraphic {
    fn draw(&self, ctx: &mut dyn DrawContext, transform: &ViewTransform) {
        match self.bounds {
            Some(b) => {
                ctx.draw_rect(
                    transform.translate_x(b.left),
                    transform.translate_y(b.top),
                    transform.translate_x(b.right),
                    transform.translate_y(b.bottom),
                );
                ctx.draw_text(
                    &self.text,
                    transform.translate_x(b.left),
                    transform.translate_y(b.bottom),
                );
            }
            // No box from the engine; anchor the text at the view origin.
            None => {
                ctx.draw_text(&self.text, transform.translate_x(0.0), transform.translate_y(0.0))
            }
        }
    }
}
