use tracing::trace;

use crate::core::{ListenerId, WindowChange, WindowListener};
use crate::error::BarViewResult;
use crate::extensions::BarViewEvent;
use crate::render::Renderer;

use super::BarView;

impl<R: Renderer, V: Sync> BarView<R, V> {
    #[must_use]
    pub fn window_start(&self) -> f64 {
        self.window.start()
    }

    #[must_use]
    pub fn window_size(&self) -> f64 {
        self.window.size()
    }

    #[must_use]
    pub fn window_end(&self) -> f64 {
        self.window.end()
    }

    pub fn set_window_start(&mut self, value: f64) -> BarViewResult<()> {
        let change = self.window.set_start(value)?;
        self.after_window_change(change)
    }

    pub fn set_window_size(&mut self, value: f64) -> BarViewResult<()> {
        let change = self.window.set_size(value)?;
        self.after_window_change(change)
    }

    pub fn set_window_end(&mut self, value: f64) -> BarViewResult<()> {
        let change = self.window.set_end(value)?;
        self.after_window_change(change)
    }

    /// Adds a listener directly on the selection window.
    pub fn subscribe_window(&mut self, listener: impl WindowListener + 'static) -> ListenerId {
        self.window.subscribe(listener)
    }

    pub fn unsubscribe_window(&mut self, id: ListenerId) -> bool {
        self.window.unsubscribe(id)
    }

    /// Pointer pressed on the window handle at `x` container pixels.
    pub fn window_drag_start(&mut self, x: f64) {
        self.drag.on_press(x);
    }

    /// Pointer moved while pressed.
    ///
    /// The window itself does not move until the gesture ends.
    pub fn window_drag(&mut self, x: f64) {
        match self.drag.on_move(x) {
            Some(true) => {
                let origin = self.drag.origin_x();
                trace!(origin, x, "window drag started");
                self.emit(BarViewEvent::BeforeWindowMove { x: origin });
                self.emit(BarViewEvent::WindowMove { x });
            }
            Some(false) => {
                trace!(x, "window drag moved");
                self.emit(BarViewEvent::WindowMove { x });
            }
            None => {}
        }
    }

    /// Pointer released. Commits the handle position as the new start.
    ///
    /// A rejected position leaves the window untouched and returns the error.
    pub fn window_drag_end(&mut self, x: f64) -> BarViewResult<()> {
        let Some(x) = self.drag.on_release(x) else {
            return Ok(());
        };
        let container_width = f64::from(self.viewport.width);
        let change = self.window.apply_drag_delta(x, container_width)?;
        self.after_window_change(change)?;
        self.emit(BarViewEvent::AfterWindowMove { x });
        Ok(())
    }

    pub fn window_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    fn after_window_change(&mut self, change: WindowChange) -> BarViewResult<()> {
        self.config.window_start = self.window.start();
        self.config.window_size = self.window.size();
        self.emit(BarViewEvent::WindowChanged(change));
        self.modified = true;
        self.redraw_if_modified()
    }
}
