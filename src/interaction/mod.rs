use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Idle,
    /// Pointer is down on the window handle but has not moved far enough.
    Pressed,
    Dragging,
}

/// Tuning for selection-window drag gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel in pixels before a press turns into a drag.
    pub min_distance_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_distance_px: 1.0,
        }
    }
}

/// Pointer state for one selection-window drag gesture.
///
/// Positions are the handle's left edge in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    mode: DragMode,
    config: DragConfig,
    origin_x: f64,
    current_x: f64,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            mode: DragMode::Idle,
            config: DragConfig::default(),
            origin_x: 0.0,
            current_x: 0.0,
        }
    }
}

impl DragState {
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(self) -> DragMode {
        self.mode
    }

    #[must_use]
    pub fn config(self) -> DragConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn origin_x(self) -> f64 {
        self.origin_x
    }

    #[must_use]
    pub fn current_x(self) -> f64 {
        self.current_x
    }

    pub fn on_press(&mut self, x: f64) {
        self.mode = DragMode::Pressed;
        self.origin_x = x;
        self.current_x = x;
    }

    /// Tracks pointer travel.
    ///
    /// Returns `Some(true)` when this move started the drag, `Some(false)`
    /// for a move inside an active drag, and `None` when nothing moves.
    pub fn on_move(&mut self, x: f64) -> Option<bool> {
        match self.mode {
            DragMode::Idle => None,
            DragMode::Pressed => {
                self.current_x = x;
                if (x - self.origin_x).abs() >= self.config.min_distance_px {
                    self.mode = DragMode::Dragging;
                    Some(true)
                } else {
                    None
                }
            }
            DragMode::Dragging => {
                self.current_x = x;
                Some(false)
            }
        }
    }

    /// Ends the gesture. Returns the final position when a drag was active.
    pub fn on_release(&mut self, x: f64) -> Option<f64> {
        let was_dragging = self.mode == DragMode::Dragging;
        self.mode = DragMode::Idle;
        if was_dragging {
            self.current_x = x;
            Some(x)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.mode = DragMode::Idle;
        self.current_x = self.origin_x;
    }
}
