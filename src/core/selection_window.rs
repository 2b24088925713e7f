use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{BarViewError, BarViewResult, WindowField};

pub const DEFAULT_WINDOW_START: f64 = 0.25;
pub const DEFAULT_WINDOW_SIZE: f64 = 0.25;

/// Plain `(start, size)` pair, used for snapshots and config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub start: f64,
    pub size: f64,
}

impl WindowBounds {
    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.size
    }
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Notification emitted once per successful window mutation.
///
/// For `WindowField::End` both values are absolute end fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowChange {
    pub field: WindowField,
    pub old_value: f64,
    pub new_value: f64,
}

/// Callback receiving the window that changed and the change itself.
pub trait WindowListener {
    fn on_window_change(&mut self, window: &SelectionWindow, change: WindowChange);
}

impl<F> WindowListener for F
where
    F: FnMut(&SelectionWindow, WindowChange),
{
    fn on_window_change(&mut self, window: &SelectionWindow, change: WindowChange) {
        self(window, change);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Draggable sub-range of the display, as fractions of its full width.
///
/// `start ∈ [0, 1)`, `size ∈ (0, 1]` and `start + size <= 1` hold after
/// every call. Rejected mutations change nothing and notify no one.
pub struct SelectionWindow {
    start: f64,
    size: f64,
    listeners: Vec<(ListenerId, Box<dyn WindowListener>)>,
    next_listener_id: u64,
}

impl fmt::Debug for SelectionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionWindow")
            .field("start", &self.start)
            .field("size", &self.size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for SelectionWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            size: DEFAULT_WINDOW_SIZE,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }
}

impl SelectionWindow {
    pub fn new(start: f64, size: f64) -> BarViewResult<Self> {
        check_start(start)?;
        check_size(size)?;
        check_fits(WindowField::Start, start, start, size)?;
        Ok(Self {
            start,
            size,
            ..Self::default()
        })
    }

    pub fn from_bounds(bounds: WindowBounds) -> BarViewResult<Self> {
        Self::new(bounds.start, bounds.size)
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.size
    }

    #[must_use]
    pub fn bounds(&self) -> WindowBounds {
        WindowBounds {
            start: self.start,
            size: self.size,
        }
    }

    pub fn set_start(&mut self, value: f64) -> BarViewResult<WindowChange> {
        check_start(value)?;
        check_fits(WindowField::Start, value, value, self.size)?;

        let change = WindowChange {
            field: WindowField::Start,
            old_value: self.start,
            new_value: value,
        };
        self.start = value;
        self.notify(change);
        Ok(change)
    }

    pub fn set_size(&mut self, value: f64) -> BarViewResult<WindowChange> {
        check_size(value)?;
        check_fits(WindowField::Size, value, self.start, value)?;

        let change = WindowChange {
            field: WindowField::Size,
            old_value: self.size,
            new_value: value,
        };
        self.size = value;
        self.notify(change);
        Ok(change)
    }

    /// Moves the right edge, deriving `size = value - start`.
    ///
    /// When `value - start` rounds up so that `start + size` lands past 1,
    /// the size is stepped down to the largest value that still fits.
    pub fn set_end(&mut self, value: f64) -> BarViewResult<WindowChange> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(out_of_range(
                WindowField::End,
                value,
                "end must satisfy 0 < end <= 1".to_owned(),
            ));
        }
        if value <= self.start {
            return Err(out_of_range(
                WindowField::End,
                value,
                format!("end must be greater than start {}", self.start),
            ));
        }

        let size = fitting_size(self.start, value - self.start).ok_or_else(|| {
            out_of_range(
                WindowField::End,
                value,
                format!("no size fits between start {} and end", self.start),
            )
        })?;

        let change = WindowChange {
            field: WindowField::End,
            old_value: self.end(),
            new_value: self.start + size,
        };
        self.size = size;
        self.notify(change);
        Ok(change)
    }

    /// Commits a drag: the handle's left edge in pixels becomes the new start.
    pub fn apply_drag_delta(
        &mut self,
        pixel_position: f64,
        container_width_px: f64,
    ) -> BarViewResult<WindowChange> {
        if !container_width_px.is_finite() || container_width_px <= 0.0 {
            return Err(BarViewError::InvalidData(format!(
                "container width must be finite and > 0, got {container_width_px}"
            )));
        }
        if !pixel_position.is_finite() {
            return Err(BarViewError::InvalidData(
                "drag position must be finite".to_owned(),
            ));
        }
        self.set_start(pixel_position / container_width_px)
    }

    pub fn subscribe(&mut self, listener: impl WindowListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `true` when it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(entry, _)| *entry != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: WindowChange) {
        trace!(
            field = %change.field,
            old_value = change.old_value,
            new_value = change.new_value,
            "selection window changed"
        );
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener.on_window_change(self, change);
        }
        self.listeners = listeners;
    }
}

fn check_start(value: f64) -> BarViewResult<()> {
    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(out_of_range(
            WindowField::Start,
            value,
            "start must satisfy 0 <= start < 1".to_owned(),
        ));
    }
    Ok(())
}

fn check_size(value: f64) -> BarViewResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(out_of_range(
            WindowField::Size,
            value,
            "size must satisfy 0 < size <= 1".to_owned(),
        ));
    }
    Ok(())
}

fn check_fits(field: WindowField, value: f64, start: f64, size: f64) -> BarViewResult<()> {
    if start + size > 1.0 {
        return Err(out_of_range(
            field,
            value,
            format!("start + size must not exceed 1 (start={start}, size={size})"),
        ));
    }
    Ok(())
}

/// Largest size `<= size` with `start + size <= 1`, if it stays positive.
fn fitting_size(start: f64, mut size: f64) -> Option<f64> {
    while size > 0.0 && start + size > 1.0 {
        size = f64::from_bits(size.to_bits() - 1);
    }
    (size > 0.0).then_some(size)
}

fn out_of_range(field: WindowField, value: f64, reason: String) -> BarViewError {
    BarViewError::WindowOutOfRange {
        field,
        value,
        reason,
    }
}
