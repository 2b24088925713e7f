use tracing::debug;

use crate::core::Viewport;
use crate::error::BarViewResult;
use crate::extensions::BarViewEvent;
use crate::render::Renderer;

use super::BarView;

impl<R: Renderer, V: Sync> BarView<R, V> {
    /// Reports the parent's newly measured size.
    ///
    /// Emits `AfterResize` and redraws only when the resolved container size
    /// differs from the cached one. Returns whether it did.
    pub fn resize(&mut self, parent: Viewport) -> BarViewResult<bool> {
        self.parent = parent;
        let resolved = self.config.resolve_viewport(parent);
        if resolved == self.viewport {
            return Ok(false);
        }

        let old = self.viewport;
        self.viewport = resolved;
        debug!(
            old_width = old.width,
            old_height = old.height,
            width = resolved.width,
            height = resolved.height,
            "container resized"
        );
        self.emit(BarViewEvent::AfterResize { old, new: resolved });
        self.modified = true;
        self.redraw_if_modified()?;
        Ok(true)
    }
}
