use crate::error::BarViewResult;
use crate::render::{RenderFrame, Renderer, SelectionPrimitive};

/// Headless renderer that validates and counts what it would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_bar_count: usize,
    pub last_selection: Option<SelectionPrimitive>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> BarViewResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_bar_count = frame.bars.len();
        self.last_selection = frame.selection;
        Ok(())
    }
}
