use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BarViewResult<T> = Result<T, BarViewError>;

/// Selection-window field named by a rejected mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowField {
    Start,
    Size,
    End,
}

impl WindowField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Size => "size",
            Self::End => "end",
        }
    }
}

impl fmt::Display for WindowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BarViewError {
    #[error("empty data: at least one keyed point is required")]
    EmptyData,

    #[error("invalid data range: {0}")]
    InvalidRange(String),

    #[error(
        "invalid display extent: extent={extent}, pre_relief={pre_relief}, post_relief={post_relief}"
    )]
    InvalidDisplayExtent {
        extent: f64,
        pre_relief: f64,
        post_relief: f64,
    },

    #[error("selection window {field} out of range: {value} ({reason})")]
    WindowOutOfRange {
        field: WindowField,
        value: f64,
        reason: String,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
