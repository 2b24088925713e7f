use tracing::{debug, trace, warn};

use crate::core::project_bars;
use crate::error::{BarViewError, BarViewResult};
use crate::extensions::BarViewEvent;
use crate::render::{BarPrimitive, Color, RenderFrame, Renderer, SelectionPrimitive};

use super::BarView;

const BAR_STROKE_WIDTH: f64 = 2.0;
const BAR_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);
const WINDOW_FILL: Color = Color::rgba(0.5, 0.5, 0.5, 0.3);

impl<R: Renderer, V: Sync> BarView<R, V> {
    /// Builds the frame for the current data and window.
    pub fn build_frame(&self) -> BarViewResult<RenderFrame> {
        if !self.viewport.is_valid() {
            return Err(BarViewError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let bars = if self.index.is_empty() {
            Vec::new()
        } else {
            project_bars(&self.index, self.mapper()?, height)?
        };

        let bounds = self.window.bounds();
        Ok(RenderFrame::new(self.viewport)
            .with_bars(
                bars.into_iter()
                    .map(|bar| BarPrimitive::from_geometry(bar, BAR_STROKE_WIDTH, BAR_COLOR)),
            )
            .with_selection(SelectionPrimitive::new(
                bounds.start * width,
                bounds.size * width,
                height,
                WINDOW_FILL,
            )))
    }

    /// Draws unconditionally and clears the modified flag.
    pub fn render(&mut self) -> BarViewResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.modified = false;
        let bar_count = frame.bars.len();
        trace!(bar_count, "rendered bar view");
        self.emit(BarViewEvent::Rendered { bar_count });
        Ok(())
    }

    /// Draws only when something changed and the container has a size.
    pub(super) fn redraw_if_modified(&mut self) -> BarViewResult<()> {
        if !self.modified {
            return Ok(());
        }
        if !self.viewport.is_valid() {
            debug!(
                width = self.viewport.width,
                height = self.viewport.height,
                "deferring redraw until the container has a size"
            );
            return Ok(());
        }
        if !self.index.is_empty() {
            if let Err(err) = self.mapper() {
                warn!(error = %err, "skipping redraw: display extent cannot hold the data");
                return Ok(());
            }
        }
        self.render()
    }
}
