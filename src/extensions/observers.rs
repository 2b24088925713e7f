use serde::{Deserialize, Serialize};

use crate::api::OptionChange;
use crate::core::{Viewport, WindowBounds, WindowChange};
use crate::interaction::DragMode;

/// Read-only view state passed alongside every event.
///
/// The emitting view is handed over explicitly here instead of being bound
/// into the callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub viewport: Viewport,
    pub window: WindowBounds,
    pub data_offset: f64,
    pub data_range: f64,
    pub data_max_depth: usize,
    pub bucket_count: usize,
    pub drag_mode: DragMode,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BarViewEvent {
    /// An option changed value.
    Change(OptionChange),
    /// The selection window moved or resized.
    WindowChanged(WindowChange),
    /// Measured container size differs from the cached one.
    AfterResize { old: Viewport, new: Viewport },
    BeforeWindowMove { x: f64 },
    WindowMove { x: f64 },
    AfterWindowMove { x: f64 },
    Rendered { bar_count: usize },
}

/// Callback interface registered on a `BarView`.
///
/// Observers see events and context but cannot reach view internals.
pub trait BarViewObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &BarViewEvent, context: ObserverContext);
}
