use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_START, EmptyDataPolicy, SelectionWindow, Viewport};
use crate::error::{BarViewError, BarViewResult};

use super::CssLength;

/// Per-instance bar view configuration.
///
/// Serializable so hosts can persist and reload a view setup. Unknown keys
/// are rejected rather than ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarViewConfig {
    #[serde(default)]
    pub width: CssLength,
    #[serde(default)]
    pub height: CssLength,
    #[serde(default = "default_clone_data")]
    pub clone_data: bool,
    #[serde(default)]
    pub pre_relief: u32,
    #[serde(default)]
    pub post_relief: u32,
    #[serde(default = "default_window_start")]
    pub window_start: f64,
    #[serde(default = "default_window_size")]
    pub window_size: f64,
    #[serde(default)]
    pub empty_data: EmptyDataPolicy,
    #[serde(default = "default_drag_distance_px")]
    pub drag_distance_px: f64,
}

impl Default for BarViewConfig {
    fn default() -> Self {
        Self {
            width: CssLength::FULL,
            height: CssLength::FULL,
            clone_data: default_clone_data(),
            pre_relief: 0,
            post_relief: 0,
            window_start: default_window_start(),
            window_size: default_window_size(),
            empty_data: EmptyDataPolicy::Accept,
            drag_distance_px: default_drag_distance_px(),
        }
    }
}

impl BarViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON options object.
    pub fn from_json_str(input: &str) -> BarViewResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| BarViewError::InvalidOption(format!("failed to parse options: {e}")))?;
        config.validate()
    }

    #[must_use]
    pub fn with_size(mut self, width: CssLength, height: CssLength) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_clone_data(mut self, clone_data: bool) -> Self {
        self.clone_data = clone_data;
        self
    }

    /// Sets pixel padding kept free before the first and after the last key.
    #[must_use]
    pub fn with_relief(mut self, pre_relief: u32, post_relief: u32) -> Self {
        self.pre_relief = pre_relief;
        self.post_relief = post_relief;
        self
    }

    #[must_use]
    pub fn with_window(mut self, start: f64, size: f64) -> Self {
        self.window_start = start;
        self.window_size = size;
        self
    }

    #[must_use]
    pub fn with_empty_data(mut self, policy: EmptyDataPolicy) -> Self {
        self.empty_data = policy;
        self
    }

    #[must_use]
    pub fn with_drag_distance_px(mut self, distance: f64) -> Self {
        self.drag_distance_px = distance;
        self
    }

    pub fn validate(self) -> BarViewResult<Self> {
        SelectionWindow::new(self.window_start, self.window_size)?;
        if !self.drag_distance_px.is_finite() || self.drag_distance_px < 0.0 {
            return Err(BarViewError::InvalidOption(format!(
                "dragDistancePx must be finite and >= 0, got {}",
                self.drag_distance_px
            )));
        }
        Ok(self)
    }

    /// Container size for a parent of the given measured size.
    #[must_use]
    pub fn resolve_viewport(self, parent: Viewport) -> Viewport {
        Viewport::new(self.width.resolve(parent.width), self.height.resolve(parent.height))
    }
}

fn default_clone_data() -> bool {
    true
}

fn default_window_start() -> f64 {
    DEFAULT_WINDOW_START
}

fn default_window_size() -> f64 {
    DEFAULT_WINDOW_SIZE
}

fn default_drag_distance_px() -> f64 {
    1.0
}

/// Static schema of option names accepted by `BarView::option`/`set_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKey {
    Width,
    Height,
    CloneData,
    PreRelief,
    PostRelief,
    WindowStart,
    WindowSize,
    EmptyData,
    DragDistancePx,
    Data,
}

impl OptionKey {
    pub const ALL: [Self; 10] = [
        Self::Width,
        Self::Height,
        Self::CloneData,
        Self::PreRelief,
        Self::PostRelief,
        Self::WindowStart,
        Self::WindowSize,
        Self::EmptyData,
        Self::DragDistancePx,
        Self::Data,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::CloneData => "cloneData",
            Self::PreRelief => "preRelief",
            Self::PostRelief => "postRelief",
            Self::WindowStart => "windowStart",
            Self::WindowSize => "windowSize",
            Self::EmptyData => "emptyData",
            Self::DragDistancePx => "dragDistancePx",
            Self::Data => "data",
        }
    }
}

impl FromStr for OptionKey {
    type Err = BarViewError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| BarViewError::InvalidOption(name.to_owned()))
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
