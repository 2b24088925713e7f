mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{BarPrimitive, Color, SelectionPrimitive};

use crate::error::BarViewResult;

/// Drawing backend driven by `BarView`.
///
/// Implementations receive finished frames and never see the data index or
/// the selection window directly.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> BarViewResult<()>;
}
